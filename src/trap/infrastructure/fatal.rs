// bellatrix_rt/src/trap/infrastructure/fatal.rs

//! The single terminal path: diagnostic, host exit, halt.

use crate::config::ABORT_STATUS;
use crate::trap::ds::{FatalError, HandlerEntry, HandlerOrigin, TrapContext};
use crate::util::htif::HostChannel;
use alloc::sync::Arc;
use log::error;

/// Logs `err` and ends the program with `ABORT_STATUS`.
pub fn abort(host: &dyn HostChannel, err: FatalError) -> ! {
    error!("{}. Abort...", err);
    host.exit(ABORT_STATUS)
}

/// Aborts through whichever host is known: the trap system's, else the
/// console's. With neither, the hart spins.
pub fn halt(err: FatalError) -> ! {
    match super::di::host().or_else(crate::console::host) {
        Some(host) => abort(host, err),
        None => {
            error!("{}. No host to report to", err);
            loop {
                core::hint::spin_loop();
            }
        }
    }
}

/// The entry every table slot starts with. Runs only for causes nobody
/// registered, and never returns to the dispatcher.
pub fn default_handler(host: Arc<dyn HostChannel>) -> HandlerEntry {
    let handler = move |ctx: &mut TrapContext| -> usize {
        abort(&*host, FatalError::UnhandledTrap { epc: ctx.epc })
    };
    HandlerEntry::new(Arc::new(handler), HandlerOrigin::Fallback)
}
