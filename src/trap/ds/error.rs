// bellatrix_rt/src/trap/ds/error.rs

//! # Error Definitions
//!
//! Two tiers only: recoverable registration errors that leave the tables
//! untouched, and fatal errors that end the program through the host.

use super::types::TableKind;
use core::fmt;

/// Errors returned by the registration and control API. None of them is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapError {
    /// Cause index does not fit the table; nothing was installed.
    RegistrationOutOfRange { table: TableKind, index: usize },
    /// Another registration is updating the tables.
    TableBusy { table: TableKind },
    /// `trap::init` has not run yet.
    NotInitialized,
}

impl fmt::Display for TrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegistrationOutOfRange { table, index } => {
                write!(f, "{} cause index {} is out of bounds", table, index)
            }
            Self::TableBusy { table } => {
                write!(f, "{} table is being updated", table)
            }
            Self::NotInitialized => write!(f, "trap system has not been initialized"),
        }
    }
}

/// Conditions that halt the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalError {
    /// A trap reached a slot still holding the default handler.
    UnhandledTrap { epc: usize },
    /// A host-facing operation with no implementation was called.
    UnimplementedOperation(&'static str),
    /// A trap arrived before `trap::init`.
    Uninitialized { cause: usize },
    /// A trap arrived while a registration held the tables.
    TablesLocked { cause: usize },
    /// Rust panic.
    Panic,
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnhandledTrap { epc } => write!(f, "unhandled trap at epc {:#x}", epc),
            Self::UnimplementedOperation(name) => write!(f, "unimplemented operation `{}`", name),
            Self::Uninitialized { cause } => {
                write!(f, "trap {:#x} taken before the trap system was initialized", cause)
            }
            Self::TablesLocked { cause } => {
                write!(f, "trap {:#x} taken while the handler tables were being updated", cause)
            }
            Self::Panic => write!(f, "panic"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_messages_name_the_table() {
        let err = TrapError::RegistrationOutOfRange { table: TableKind::Interrupt, index: 16 };
        assert_eq!(err.to_string(), "interrupt cause index 16 is out of bounds");
        let fatal = FatalError::UnhandledTrap { epc: 0x80 };
        assert_eq!(fatal.to_string(), "unhandled trap at epc 0x80");
    }
}
