// bellatrix_rt/src/trap/infrastructure/controller.rs

//! # Interrupt Controller
//!
//! One toggle per enable bit. Each toggle is a single atomic set or clear of
//! its own bit and reports whether that bit was set before.

use super::di::traits::{ControlRegister, ControlRegisters};
use crate::trap::ds::types::MSTATUS_MIE;
use crate::trap::ds::{Interrupt, InterruptClass};
use alloc::boxed::Box;
use log::trace;

pub struct InterruptController {
    regs: Box<dyn ControlRegisters>,
}

impl InterruptController {
    pub fn new(regs: Box<dyn ControlRegisters>) -> Self {
        Self { regs }
    }

    /// Opens the global gate (`mstatus.MIE`).
    pub fn enable_interrupts(&self) -> bool {
        trace!("global interrupts on");
        self.regs.set_bits(ControlRegister::Status, MSTATUS_MIE) & MSTATUS_MIE != 0
    }

    /// Closes the global gate.
    pub fn disable_interrupts(&self) -> bool {
        trace!("global interrupts off");
        self.regs.clear_bits(ControlRegister::Status, MSTATUS_MIE) & MSTATUS_MIE != 0
    }

    /// Reopens the gate if `was_enabled`, as returned by `disable_interrupts`.
    pub fn restore_interrupts(&self, was_enabled: bool) {
        if was_enabled {
            self.enable_interrupts();
        }
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.regs.read(ControlRegister::Status) & MSTATUS_MIE != 0
    }

    pub fn enable(&self, class: InterruptClass) -> bool {
        trace!("{:?} interrupts on", class);
        let mask = class.enable_mask();
        self.regs.set_bits(ControlRegister::InterruptEnable, mask) & mask != 0
    }

    pub fn disable(&self, class: InterruptClass) -> bool {
        trace!("{:?} interrupts off", class);
        let mask = class.enable_mask();
        self.regs.clear_bits(ControlRegister::InterruptEnable, mask) & mask != 0
    }

    pub fn is_enabled(&self, class: InterruptClass) -> bool {
        self.regs.read(ControlRegister::InterruptEnable) & class.enable_mask() != 0
    }

    pub fn enable_software_int(&self) -> bool {
        self.enable(InterruptClass::Software)
    }

    pub fn disable_software_int(&self) -> bool {
        self.disable(InterruptClass::Software)
    }

    pub fn enable_timer_int(&self) -> bool {
        self.enable(InterruptClass::Timer)
    }

    pub fn disable_timer_int(&self) -> bool {
        self.disable(InterruptClass::Timer)
    }

    pub fn enable_external_int(&self) -> bool {
        self.enable(InterruptClass::External)
    }

    pub fn disable_external_int(&self) -> bool {
        self.disable(InterruptClass::External)
    }

    /// Whether a pending `interrupt` would be taken right now: gate open and its `mie` bit set.
    pub fn would_deliver(&self, interrupt: Interrupt) -> bool {
        self.interrupts_enabled()
            && self.regs.read(ControlRegister::InterruptEnable) & interrupt.enable_mask() != 0
    }
}
