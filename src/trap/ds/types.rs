// bellatrix_rt/src/trap/ds/types.rs

//! # Trap Type Definitions
//!
//! Cause codes, their decoded form, and the control register bits the
//! interrupt controller toggles. Numeric values follow the RISC-V privileged
//! architecture and must not change.

use crate::config::{INDEX_MASK, TABLE_SIZE};
use core::fmt;

/// Class tag of a raw cause value: set for interrupts, clear for exceptions.
pub const INTERRUPT_BIT: usize = 1 << (usize::BITS - 1);

pub const X_INST_ADDRESS_MISA: usize = 0;
pub const X_INST_ACCESS_FAULT: usize = 1;
pub const X_ILLEGAL_INSTRUCTION: usize = 2;
pub const X_BREAKPOINT: usize = 3;
pub const X_LOAD_ADDRESS_MISA: usize = 4;
pub const X_LOAD_ACCESS_FAULT: usize = 5;
pub const X_STORE_ADDRESS_MISA: usize = 6;
pub const X_STORE_ACCESS_FAULT: usize = 7;
pub const X_UCALL: usize = 8;
pub const X_SCALL: usize = 9;
pub const X_MCALL: usize = 11;

pub const I_USER_SW_INT: usize = INTERRUPT_BIT | 0;
pub const I_SUPERVISOR_SW_INT: usize = INTERRUPT_BIT | 1;
pub const I_MACHINE_SW_INT: usize = INTERRUPT_BIT | 3;
pub const I_USER_TIMER_INT: usize = INTERRUPT_BIT | 4;
pub const I_SUPERVISOR_TIMER_INT: usize = INTERRUPT_BIT | 5;
pub const I_MACHINE_TIMER_INT: usize = INTERRUPT_BIT | 7;
pub const I_USER_X_INT: usize = INTERRUPT_BIT | 8;
pub const I_SUPERVISOR_X_INT: usize = INTERRUPT_BIT | 9;
pub const I_MACHINE_X_INT: usize = INTERRUPT_BIT | 11;

/// `mstatus.MIE`: machine-mode global interrupt gate.
pub const MSTATUS_MIE: usize = 1 << 3;
/// `mie.MSIE`: machine software interrupt enable.
pub const MIE_MSIE: usize = 1 << 3;
/// `mie.MTIE`: machine timer interrupt enable.
pub const MIE_MTIE: usize = 1 << 7;
/// `mie.MEIE`: machine external interrupt enable.
pub const MIE_MEIE: usize = 1 << 11;

/// Interrupt causes, by code.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(usize)]
pub enum Interrupt {
    UserSoft = 0,
    SupervisorSoft = 1,
    MachineSoft = 3,
    UserTimer = 4,
    SupervisorTimer = 5,
    MachineTimer = 7,
    UserExternal = 8,
    SupervisorExternal = 9,
    MachineExternal = 11,
}

impl Interrupt {
    /// The raw cause value, class bit included.
    pub const fn cause(self) -> usize {
        INTERRUPT_BIT | self as usize
    }

    /// Bit in `mie` that gates this interrupt. The enable bit position equals the code.
    pub const fn enable_mask(self) -> usize {
        1 << (self as usize)
    }

    pub fn from_code(code: usize) -> Option<Self> {
        match code {
            0 => Some(Self::UserSoft),
            1 => Some(Self::SupervisorSoft),
            3 => Some(Self::MachineSoft),
            4 => Some(Self::UserTimer),
            5 => Some(Self::SupervisorTimer),
            7 => Some(Self::MachineTimer),
            8 => Some(Self::UserExternal),
            9 => Some(Self::SupervisorExternal),
            11 => Some(Self::MachineExternal),
            _ => None,
        }
    }
}

/// Exception causes, by code.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(usize)]
pub enum Exception {
    InstructionMisaligned = 0,
    InstructionFault = 1,
    IllegalInstruction = 2,
    Breakpoint = 3,
    LoadMisaligned = 4,
    LoadFault = 5,
    StoreMisaligned = 6,
    StoreFault = 7,
    UserEnvCall = 8,
    SupervisorEnvCall = 9,
    MachineEnvCall = 11,
}

impl Exception {
    pub fn from_code(code: usize) -> Option<Self> {
        match code {
            0 => Some(Self::InstructionMisaligned),
            1 => Some(Self::InstructionFault),
            2 => Some(Self::IllegalInstruction),
            3 => Some(Self::Breakpoint),
            4 => Some(Self::LoadMisaligned),
            5 => Some(Self::LoadFault),
            6 => Some(Self::StoreMisaligned),
            7 => Some(Self::StoreFault),
            8 => Some(Self::UserEnvCall),
            9 => Some(Self::SupervisorEnvCall),
            11 => Some(Self::MachineEnvCall),
            _ => None,
        }
    }
}

/// Selects one of the two handler tables.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TableKind {
    Exception,
    Interrupt,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exception => f.write_str("exception"),
            Self::Interrupt => f.write_str("interrupt"),
        }
    }
}

/// Interrupt classes with an individual enable bit in `mie`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InterruptClass {
    Software,
    Timer,
    External,
}

impl InterruptClass {
    pub const fn enable_mask(self) -> usize {
        match self {
            Self::Software => MIE_MSIE,
            Self::Timer => MIE_MTIE,
            Self::External => MIE_MEIE,
        }
    }
}

/// A decoded cause: which table, and which slot in it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrapKind {
    Exception(usize),
    Interrupt(usize),
}

impl TrapKind {
    pub fn table(&self) -> TableKind {
        match self {
            Self::Exception(_) => TableKind::Exception,
            Self::Interrupt(_) => TableKind::Interrupt,
        }
    }

    pub fn index(&self) -> usize {
        match *self {
            Self::Exception(index) | Self::Interrupt(index) => index,
        }
    }
}

/// A wrapper for a raw `mcause` value.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct TrapCause {
    bits: usize,
}

impl TrapCause {
    pub const fn from_bits(bits: usize) -> Self {
        Self { bits }
    }

    pub const fn is_interrupt(&self) -> bool {
        self.bits & INTERRUPT_BIT != 0
    }

    /// The index field with the class bit removed, before any masking.
    pub const fn code(&self) -> usize {
        self.bits & !INTERRUPT_BIT
    }

    /// True when the index field does not fit the table and will alias onto a lower slot.
    pub const fn aliases(&self) -> bool {
        self.code() >= TABLE_SIZE
    }

    /// Splits the cause into its table and in-range slot.
    pub const fn decode(&self) -> TrapKind {
        let index = self.bits & INDEX_MASK;
        if self.is_interrupt() {
            TrapKind::Interrupt(index)
        } else {
            TrapKind::Exception(index)
        }
    }
}

impl fmt::Debug for TrapCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_interrupt() {
            match Interrupt::from_code(self.code()) {
                Some(interrupt) => write!(f, "Interrupt::{:?}", interrupt)?,
                None => write!(f, "Interrupt::Unknown({})", self.code())?,
            }
        } else {
            match Exception::from_code(self.code()) {
                Some(exception) => write!(f, "Exception::{:?}", exception)?,
                None => write!(f, "Exception::Unknown({})", self.code())?,
            }
        }
        write!(f, " (raw: {:#x})", self.bits)
    }
}
