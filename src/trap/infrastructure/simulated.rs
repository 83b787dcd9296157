// bellatrix_rt/src/trap/infrastructure/simulated.rs

//! Control registers kept in memory, for hosts without privileged CSRs.

use super::di::traits::{ControlRegister, ControlRegisters};
use core::sync::atomic::{AtomicUsize, Ordering};

/// `ControlRegisters` backend holding `mstatus` and `mie` in atomics.
#[derive(Debug, Default)]
pub struct SimulatedControlRegisters {
    status: AtomicUsize,
    enable: AtomicUsize,
}

impl SimulatedControlRegisters {
    pub const fn new() -> Self {
        Self {
            status: AtomicUsize::new(0),
            enable: AtomicUsize::new(0),
        }
    }

    /// Starts from arbitrary register contents, e.g. to check untouched bits survive.
    pub const fn with_values(status: usize, enable: usize) -> Self {
        Self {
            status: AtomicUsize::new(status),
            enable: AtomicUsize::new(enable),
        }
    }

    fn cell(&self, reg: ControlRegister) -> &AtomicUsize {
        match reg {
            ControlRegister::Status => &self.status,
            ControlRegister::InterruptEnable => &self.enable,
        }
    }
}

impl ControlRegisters for SimulatedControlRegisters {
    fn read(&self, reg: ControlRegister) -> usize {
        self.cell(reg).load(Ordering::SeqCst)
    }

    fn set_bits(&self, reg: ControlRegister, mask: usize) -> usize {
        self.cell(reg).fetch_or(mask, Ordering::SeqCst)
    }

    fn clear_bits(&self, reg: ControlRegister, mask: usize) -> usize {
        self.cell(reg).fetch_and(!mask, Ordering::SeqCst)
    }
}
