// bellatrix_rt/src/config.rs

//! Build-time constants shared by the trap layer and the host glue.

/// Slots per handler table. Must stay a power of two: dispatch relies on
/// `cause & INDEX_MASK` to pick a slot.
pub const TABLE_SIZE: usize = 16;

/// Mask applied to the index field of a raw cause value.
pub const INDEX_MASK: usize = TABLE_SIZE - 1;

const _: () = assert!(TABLE_SIZE.is_power_of_two());

/// Exit status reported to the host on every fatal halt.
pub const ABORT_STATUS: isize = -1;

/// Size of the static arena used by `init::alloc::init_default` (1MB).
pub const DEFAULT_HEAP_SIZE: usize = 1024 * 1024;

/// Syscall number understood by the HTIF proxy for `write`.
pub const HTIF_SYS_WRITE: u64 = 64;

/// File descriptor used for console output.
pub const STDOUT_FD: usize = 1;

/// Smallest region `init::alloc::init` accepts.
pub const MIN_HEAP_SIZE: usize = 4096;
