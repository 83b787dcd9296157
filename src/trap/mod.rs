// bellatrix_rt/src/trap/mod.rs

//! # RISC-V Machine-Mode Trap Subsystem
//!
//! Two fixed handler tables indexed by the low bits of `mcause`, a
//! dispatcher that routes every trap to exactly one handler, and the
//! `mstatus`/`mie` enable bits for software, timer and external interrupts.
//!
//! Call [`init`] once after the heap is ready and before interrupts are
//! enabled. Unregistered causes end the program through the host.

mod ds;
mod infrastructure;
mod api;

pub use self::api::*;

pub use self::ds::types::*;
pub use self::ds::{FatalError, HandlerEntry, HandlerOrigin, ResumeAddress, TrapContext, TrapError, TrapHandler};

pub use self::infrastructure::controller::InterruptController;
pub use self::infrastructure::di::container::TrapSystem;
pub use self::infrastructure::di::traits::{ControlRegister, ControlRegisters};
pub use self::infrastructure::di::{is_initialized, with_trap_system};
pub use self::infrastructure::low_level::handle_trap;
pub use self::infrastructure::simulated::SimulatedControlRegisters;

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
pub use self::infrastructure::low_level::{init_trap_vector, MachineControlRegisters};

use crate::util::htif::HostChannel;
use alloc::boxed::Box;
use alloc::sync::Arc;

/// Builds the global trap system over `host` and the register backend `regs`.
///
/// Returns false, changing nothing, if it was already built.
pub fn init(host: Arc<dyn HostChannel>, regs: Box<dyn ControlRegisters>) -> bool {
    infrastructure::initialize_trap_system(host, regs)
}

/// Builds the global trap system over the machine CSRs and points `mtvec`
/// at the trap entry.
#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
pub fn init_machine(host: Arc<dyn HostChannel>) -> bool {
    if !init(host, Box::new(MachineControlRegisters)) {
        return false;
    }
    init_trap_vector();
    true
}
