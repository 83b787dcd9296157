// bellatrix_rt/src/init/alloc.rs

//! # Firmware Heap
//!
//! A `linked_list_allocator` heap backing `Box`ed trap handlers. On
//! bare-metal targets it is the global allocator; `init` has to run before
//! the first handler is registered.

use crate::config::MIN_HEAP_SIZE;
#[cfg(target_os = "none")]
use crate::config::DEFAULT_HEAP_SIZE;
use core::sync::atomic::{AtomicBool, Ordering};
use linked_list_allocator::LockedHeap;
use log::{info, warn};

#[cfg_attr(all(target_os = "none", not(test)), global_allocator)]
static HEAP: LockedHeap = LockedHeap::empty();

static INITIALIZED: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HeapError {
    AlreadyInitialized,
    /// Region is null or smaller than `MIN_HEAP_SIZE`.
    InvalidRegion { start: usize, size: usize },
}

impl core::fmt::Display for HeapError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            HeapError::AlreadyInitialized => write!(f, "heap already initialized"),
            HeapError::InvalidRegion { start, size } => {
                write!(f, "invalid heap region {:#x}+{:#x}", start, size)
            }
        }
    }
}

/// Hands the region `[start, start + size)` to the heap.
///
/// # Safety
///
/// The region must be valid, writable, unused by anything else and live for
/// the rest of the program.
pub unsafe fn init(start: usize, size: usize) -> Result<(), HeapError> {
    if start == 0 || size < MIN_HEAP_SIZE {
        return Err(HeapError::InvalidRegion { start, size });
    }
    if INITIALIZED.swap(true, Ordering::AcqRel) {
        warn!("heap already initialized");
        return Err(HeapError::AlreadyInitialized);
    }
    unsafe { HEAP.lock().init(start as *mut u8, size) };
    info!("heap ready: {:#x}+{:#x}", start, size);
    Ok(())
}

#[cfg(target_os = "none")]
#[repr(align(16))]
struct HeapSpace([u8; DEFAULT_HEAP_SIZE]);

#[cfg(target_os = "none")]
static mut HEAP_SPACE: HeapSpace = HeapSpace([0; DEFAULT_HEAP_SIZE]);

/// Initializes the heap over a static `.bss` arena of `DEFAULT_HEAP_SIZE` bytes.
#[cfg(target_os = "none")]
pub fn init_default() -> Result<(), HeapError> {
    let start = core::ptr::addr_of_mut!(HEAP_SPACE) as usize;
    // The arena is only ever handed out once: a second call fails with AlreadyInitialized.
    unsafe { init(start, DEFAULT_HEAP_SIZE) }
}

pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::Acquire)
}

/// Total, used and free bytes, or `None` before `init`.
pub fn usage() -> Option<(usize, usize, usize)> {
    if !is_initialized() {
        return None;
    }
    let heap = HEAP.lock();
    Some((heap.size(), heap.used(), heap.free()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::alloc::Layout;

    #[repr(align(16))]
    struct Arena([u8; 4096]);

    static mut ARENA: Arena = Arena([0; 4096]);

    #[test]
    fn test_heap_lifecycle() {
        assert_eq!(usage(), None);
        assert_eq!(
            unsafe { init(0, 4096) },
            Err(HeapError::InvalidRegion { start: 0, size: 4096 })
        );

        let start = core::ptr::addr_of_mut!(ARENA) as usize;
        assert_eq!(unsafe { init(start, 4096) }, Ok(()));
        assert!(is_initialized());
        assert_eq!(unsafe { init(start, 4096) }, Err(HeapError::AlreadyInitialized));

        let layout = Layout::from_size_align(64, 8).unwrap();
        let block = HEAP.lock().allocate_first_fit(layout).unwrap();
        let (total, used, free) = usage().unwrap();
        assert_eq!(total, 4096);
        assert!(used >= 64);
        assert_eq!(used + free, total);

        unsafe { HEAP.lock().deallocate(block, layout) };
        assert_eq!(usage().unwrap().1, 0);
    }
}
