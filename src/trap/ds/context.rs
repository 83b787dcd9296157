// bellatrix_rt/src/trap/ds/context.rs

//! # Trap Context
//!
//! The register frame built by `__trap_entry` and handed to every handler.

/// # Trap Context
///
/// Layout is shared with the assembly entry: `x[i]` sits at `i * XLEN`
/// bytes and `epc` directly after `x31`. Do not reorder the fields.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapContext {
    /// General-purpose registers x0-x31 at trap entry. `x[0]` is always zero.
    pub x: [usize; 32],
    /// Address of the trapping instruction (`mepc`).
    pub epc: usize,
}

impl TrapContext {
    pub const fn new(epc: usize) -> Self {
        Self { x: [0; 32], epc }
    }

    /// Resume at the instruction after the trapping one.
    /// Assumes a 4-byte encoding; compressed instructions need their own handler.
    pub const fn next_pc(&self) -> usize {
        self.epc.wrapping_add(4)
    }

    /// `a0`, the first argument / return value register.
    pub const fn a0(&self) -> usize {
        self.x[10]
    }

    pub fn set_return_value(&mut self, value: usize) {
        self.x[10] = value;
    }
}

impl Default for TrapContext {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_layout() {
        let word = core::mem::size_of::<usize>();
        assert_eq!(core::mem::size_of::<TrapContext>(), 33 * word);
        assert_eq!(core::mem::offset_of!(TrapContext, epc), 32 * word);
    }

    #[test]
    fn test_return_value_lands_in_a0() {
        let mut ctx = TrapContext::new(0x8000_0000);
        ctx.set_return_value(7);
        assert_eq!(ctx.a0(), 7);
        assert_eq!(ctx.next_pc(), 0x8000_0004);
    }
}
