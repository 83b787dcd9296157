// bellatrix_rt/src/trap/ds/handler.rs

//! # Trap Handler Definitions
//!
//! Handler signature and the entries stored in the handler tables.

use super::context::TrapContext;
use alloc::sync::Arc;
use core::fmt;

/// Program counter at which execution resumes after the trap.
pub type ResumeAddress = usize;

/// A trap handler. Receives the saved context, may mutate it, and returns
/// the address to resume at (usually `ctx.epc` or `ctx.next_pc()`).
///
/// Handlers are shared, not borrowed from the table: dispatch clones the
/// entry out and runs it with no lock held, so a trap taken inside a handler
/// can dispatch again.
pub type TrapHandler = Arc<dyn Fn(&mut TrapContext) -> ResumeAddress + Send + Sync>;

/// Who put a handler into its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOrigin {
    /// The default handler installed at table construction.
    Fallback,
    /// Installed through the registration API.
    Registered,
}

/// # Handler Entry
///
/// One table slot. A slot is never empty: absence of a user handler is
/// represented by a `Fallback` entry.
#[derive(Clone)]
pub struct HandlerEntry {
    handler: TrapHandler,
    origin: HandlerOrigin,
}

impl HandlerEntry {
    pub fn new(handler: TrapHandler, origin: HandlerOrigin) -> Self {
        Self { handler, origin }
    }

    pub fn registered<F>(handler: F) -> Self
    where
        F: Fn(&mut TrapContext) -> ResumeAddress + Send + Sync + 'static,
    {
        Self::new(Arc::new(handler), HandlerOrigin::Registered)
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == HandlerOrigin::Fallback
    }

    /// Runs the handler against `ctx`.
    pub fn invoke(&self, ctx: &mut TrapContext) -> ResumeAddress {
        (self.handler)(ctx)
    }
}

impl fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerEntry").field("origin", &self.origin).finish_non_exhaustive()
    }
}
