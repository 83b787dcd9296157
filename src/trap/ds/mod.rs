// bellatrix_rt/src/trap/ds/mod.rs

//! # Trap Data Structures Module
//!
//! Cause encodings, the trap context, handler entries and error types.

pub mod types;
pub mod context;
pub mod error;
pub mod handler;

pub use self::types::{
    TrapCause, TrapKind, TableKind,
    Interrupt, InterruptClass, Exception,
};

pub use self::context::TrapContext;

pub use self::error::{FatalError, TrapError};

pub use self::handler::{
    HandlerEntry, HandlerOrigin, ResumeAddress, TrapHandler,
};
