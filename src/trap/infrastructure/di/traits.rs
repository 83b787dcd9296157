// bellatrix_rt/src/trap/infrastructure/di/traits.rs

//! # Backend Traits
//!
//! The hardware seam of the trap layer. Everything above it is plain Rust
//! and runs unchanged against the simulated backend.

use alloc::sync::Arc;

/// Privileged registers the interrupt controller touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRegister {
    /// `mstatus`, holding the global interrupt gate.
    Status,
    /// `mie`, holding the per-class enable bits.
    InterruptEnable,
}

/// Bit-level access to the privileged control registers.
///
/// `set_bits` and `clear_bits` must only touch the bits in `mask` and return
/// the register value from before the write, like `csrrs`/`csrrc`.
pub trait ControlRegisters: Send + Sync {
    fn read(&self, reg: ControlRegister) -> usize;

    fn set_bits(&self, reg: ControlRegister, mask: usize) -> usize;

    fn clear_bits(&self, reg: ControlRegister, mask: usize) -> usize;
}

impl<T: ControlRegisters + ?Sized> ControlRegisters for Arc<T> {
    fn read(&self, reg: ControlRegister) -> usize {
        (**self).read(reg)
    }

    fn set_bits(&self, reg: ControlRegister, mask: usize) -> usize {
        (**self).set_bits(reg, mask)
    }

    fn clear_bits(&self, reg: ControlRegister, mask: usize) -> usize {
        (**self).clear_bits(reg, mask)
    }
}
