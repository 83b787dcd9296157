// bellatrix_rt/src/lib.rs

//! Machine-mode trap dispatch for bare-metal RISC-V test programs.
//!
//! Boot order: heap, console, trap system, then enable the interrupts a
//! program needs. [`boot`] does the first three on a HTIF target.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
pub mod console;
pub mod config;
pub mod init;
pub mod trap;
pub mod util;

#[cfg(all(target_os = "none", not(test)))]
mod lang;

#[cfg(test)]
mod testing;

/// Heap from the static arena, console and logger over HTIF, then the trap
/// system on the machine CSRs. Returns false if any step was already done.
#[cfg(all(target_os = "none", any(target_arch = "riscv32", target_arch = "riscv64")))]
pub fn boot() -> bool {
    use crate::util::htif::{HostChannel, Htif};
    use alloc::sync::Arc;

    if let Err(err) = init::alloc::init_default() {
        // No heap means no console yet.
        console::print_to(&Htif, format_args!("boot: {}\n", err));
        return false;
    }
    let host: Arc<dyn HostChannel> = Arc::new(Htif);
    console::init(Arc::clone(&host));
    console::init_logger();
    trap::init_machine(host)
}
