// bellatrix_rt/src/trap/infrastructure/di/mod.rs

//! # Global Trap System
//!
//! The one `TrapSystem` the firmware traps into. It must be initialized
//! before interrupts are enabled and before the first trap can occur; a
//! trap taken earlier ends the program through the fatal path.

pub mod container;
pub mod traits;

use self::container::TrapSystem;
use self::traits::ControlRegisters;
use crate::trap::ds::{FatalError, ResumeAddress, TrapContext, TrapError};
use crate::trap::infrastructure::fatal;
use crate::util::htif::HostChannel;
use alloc::boxed::Box;
use alloc::sync::Arc;
use log::{info, warn};
use spin::Once;

static GLOBAL_TRAP_SYSTEM: Once<TrapSystem> = Once::new();

/// Builds the global trap system. Returns false, changing nothing, if it already exists.
pub fn initialize_trap_system(host: Arc<dyn HostChannel>, regs: Box<dyn ControlRegisters>) -> bool {
    if GLOBAL_TRAP_SYSTEM.is_completed() {
        warn!("trap system already initialized");
        return false;
    }
    GLOBAL_TRAP_SYSTEM.call_once(|| TrapSystem::new(host, regs));
    info!("trap system ready");
    true
}

pub fn is_initialized() -> bool {
    GLOBAL_TRAP_SYSTEM.is_completed()
}

/// Runs `f` on the global trap system.
pub fn with_trap_system<F, R>(f: F) -> Result<R, TrapError>
where
    F: FnOnce(&TrapSystem) -> R,
{
    GLOBAL_TRAP_SYSTEM.get().map(f).ok_or(TrapError::NotInitialized)
}

/// The host channel of the global trap system.
pub fn host() -> Option<&'static dyn HostChannel> {
    GLOBAL_TRAP_SYSTEM.get().map(|system| system.host())
}

/// Bridge from `low_level::handle_trap` into the global system.
pub(super) fn dispatch_trap(cause: usize, context: &mut TrapContext) -> ResumeAddress {
    match GLOBAL_TRAP_SYSTEM.get() {
        Some(system) => system.dispatch(cause, context),
        None => fatal::halt(FatalError::Uninitialized { cause }),
    }
}
