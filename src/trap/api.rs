// bellatrix_rt/src/trap/api.rs

//! # Public API for the Trap Subsystem
//!
//! Free functions over the global trap system. Each returns
//! `TrapError::NotInitialized` until `trap::init` has run.

use crate::trap::ds::{FatalError, InterruptClass, ResumeAddress, TableKind, TrapContext, TrapError};
use crate::trap::infrastructure::di::with_trap_system;
use crate::trap::infrastructure::fatal;

/// Installs `handler` for the interrupt `cause` (e.g. `I_MACHINE_TIMER_INT`).
///
/// An out-of-range cause is rejected with a diagnostic and the table is left
/// as it was.
pub fn insert_interrupt_handler<F>(cause: usize, handler: F) -> Result<(), TrapError>
where
    F: Fn(&mut TrapContext) -> ResumeAddress + Send + Sync + 'static,
{
    with_trap_system(|ts| ts.insert_interrupt_handler(cause, handler))?
}

/// Installs `handler` for the exception `cause` (e.g. `X_ILLEGAL_INSTRUCTION`).
pub fn insert_exception_handler<F>(cause: usize, handler: F) -> Result<(), TrapError>
where
    F: Fn(&mut TrapContext) -> ResumeAddress + Send + Sync + 'static,
{
    with_trap_system(|ts| ts.insert_exception_handler(cause, handler))?
}

/// Whether slot `index` of `kind` holds a registered handler rather than the default.
pub fn is_registered(kind: TableKind, index: usize) -> Result<bool, TrapError> {
    with_trap_system(|ts| ts.is_registered(kind, index))
}

/// Opens the global interrupt gate. Returns whether it was already open.
pub fn enable_interrupts() -> Result<bool, TrapError> {
    with_trap_system(|ts| ts.controller().enable_interrupts())
}

/// Closes the global interrupt gate. Returns whether it was open.
pub fn disable_interrupts() -> Result<bool, TrapError> {
    with_trap_system(|ts| ts.controller().disable_interrupts())
}

/// Reopens the gate if `was_enabled`.
pub fn restore_interrupts(was_enabled: bool) -> Result<(), TrapError> {
    with_trap_system(|ts| ts.controller().restore_interrupts(was_enabled))
}

pub fn enable_software_int() -> Result<bool, TrapError> {
    with_trap_system(|ts| ts.controller().enable_software_int())
}

pub fn disable_software_int() -> Result<bool, TrapError> {
    with_trap_system(|ts| ts.controller().disable_software_int())
}

pub fn enable_timer_int() -> Result<bool, TrapError> {
    with_trap_system(|ts| ts.controller().enable_timer_int())
}

pub fn disable_timer_int() -> Result<bool, TrapError> {
    with_trap_system(|ts| ts.controller().disable_timer_int())
}

pub fn enable_external_int() -> Result<bool, TrapError> {
    with_trap_system(|ts| ts.controller().enable_external_int())
}

pub fn disable_external_int() -> Result<bool, TrapError> {
    with_trap_system(|ts| ts.controller().disable_external_int())
}

pub fn interrupt_class_enabled(class: InterruptClass) -> Result<bool, TrapError> {
    with_trap_system(|ts| ts.controller().is_enabled(class))
}

/// Ends the program for a host-facing operation that has no implementation.
pub fn unimplemented_operation(name: &'static str) -> ! {
    halt(FatalError::UnimplementedOperation(name))
}

/// Logs `err` and ends the program with a non-zero host exit.
pub fn halt(err: FatalError) -> ! {
    fatal::halt(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ABORT_STATUS, TABLE_SIZE};
    use crate::trap::ds::types::{I_MACHINE_TIMER_INT, X_BREAKPOINT, X_MCALL};
    use crate::trap::infrastructure::low_level::handle_trap;
    use crate::trap::infrastructure::simulated::SimulatedControlRegisters;
    use crate::testing::RecordingHost;
    use alloc::boxed::Box;
    use alloc::sync::Arc;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    // The global system is process-wide, so the whole lifecycle lives in one test.
    #[test]
    fn test_global_lifecycle() {
        assert_eq!(enable_timer_int(), Err(TrapError::NotInitialized));
        assert_eq!(
            insert_exception_handler(X_MCALL, |ctx: &mut TrapContext| ctx.next_pc()),
            Err(TrapError::NotInitialized)
        );

        let host = Arc::new(RecordingHost::default());
        assert!(crate::trap::init(host.clone(), Box::new(SimulatedControlRegisters::new())));
        assert!(!crate::trap::init(host.clone(), Box::new(SimulatedControlRegisters::new())));

        insert_exception_handler(X_MCALL, |ctx: &mut TrapContext| {
            ctx.set_return_value(ctx.x[17] + 1);
            ctx.next_pc()
        })
        .unwrap();
        insert_interrupt_handler(I_MACHINE_TIMER_INT, |ctx: &mut TrapContext| ctx.epc).unwrap();
        assert_eq!(
            insert_interrupt_handler(TABLE_SIZE, |ctx: &mut TrapContext| ctx.epc),
            Err(TrapError::RegistrationOutOfRange { table: TableKind::Interrupt, index: TABLE_SIZE })
        );
        assert_eq!(is_registered(TableKind::Interrupt, 7), Ok(true));
        assert_eq!(is_registered(TableKind::Exception, X_BREAKPOINT), Ok(false));

        assert_eq!(enable_interrupts(), Ok(false));
        assert_eq!(enable_timer_int(), Ok(false));
        assert_eq!(interrupt_class_enabled(InterruptClass::Timer), Ok(true));
        assert_eq!(interrupt_class_enabled(InterruptClass::External), Ok(false));
        assert_eq!(disable_interrupts(), Ok(true));
        restore_interrupts(true).unwrap();
        assert_eq!(disable_timer_int(), Ok(true));
        assert_eq!(enable_software_int(), Ok(false));
        assert_eq!(disable_software_int(), Ok(true));
        assert_eq!(enable_external_int(), Ok(false));
        assert_eq!(disable_external_int(), Ok(true));

        let mut ctx = TrapContext::new(0x8000_1000);
        ctx.x[17] = 92;
        let next = unsafe { handle_trap(X_MCALL, &mut ctx) };
        assert_eq!(next, 0x8000_1004);
        assert_eq!(ctx.a0(), 93);

        let result = catch_unwind(AssertUnwindSafe(|| with_trap_system(|ts| ts.dispatch(X_BREAKPOINT, &mut ctx))));
        assert!(result.is_err());
        let result = catch_unwind(|| unimplemented_operation("lseek"));
        assert!(result.is_err());
        assert_eq!(*host.exits.lock(), [ABORT_STATUS, ABORT_STATUS]);
    }
}
