// bellatrix_rt/src/trap/infrastructure/low_level.rs

//! # Low-Level Trap Hardware Control
//!
//! Machine-mode CSR backend, the assembly trap entry and the Rust function
//! it calls. Only the entry bridge exists on non-RISC-V hosts.

use crate::trap::ds::TrapContext;

/// Called by `__trap_entry` with `mcause` and the saved frame; returns the
/// address written back to `mepc`.
///
/// # Safety
///
/// `context` must point to a valid, exclusively owned `TrapContext`.
#[no_mangle]
pub unsafe extern "C" fn handle_trap(cause: usize, context: *mut TrapContext) -> usize {
    let context = unsafe { &mut *context };
    crate::trap::infrastructure::di::dispatch_trap(cause, context)
}

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
pub use imp::{init_trap_vector, MachineControlRegisters};

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
mod imp {
    use super::handle_trap;
    use crate::trap::infrastructure::di::traits::{ControlRegister, ControlRegisters};
    use core::arch::{asm, global_asm};

    #[cfg(target_arch = "riscv64")]
    macro_rules! frame_ops {
        () => {
            ".macro STORE reg, slot\n sd \\reg, \\slot*8(sp)\n.endm\n\
             .macro LOAD reg, slot\n ld \\reg, \\slot*8(sp)\n.endm\n"
        };
    }

    #[cfg(target_arch = "riscv32")]
    macro_rules! frame_ops {
        () => {
            ".macro STORE reg, slot\n sw \\reg, \\slot*4(sp)\n.endm\n\
             .macro LOAD reg, slot\n lw \\reg, \\slot*4(sp)\n.endm\n"
        };
    }

    // 36 words keeps sp 16-byte aligned on both XLENs; slots 0..=32 hold the TrapContext.
    const FRAME_BYTES: usize = 36 * core::mem::size_of::<usize>();

    global_asm!(
        frame_ops!(),
        ".section .text.trap_entry",
        ".balign 4",
        ".globl __trap_entry",
        "__trap_entry:",
        "addi sp, sp, -{frame}",
        "STORE x1, 1",
        ".irp i, 3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22,23,24,25,26,27,28,29,30,31",
        "STORE x\\i, \\i",
        ".endr",
        "addi t0, sp, {frame}",
        "STORE t0, 2",
        "STORE zero, 0",
        "csrr t0, mepc",
        "STORE t0, 32",
        "csrr a0, mcause",
        "mv a1, sp",
        "call {handler}",
        "csrw mepc, a0",
        "LOAD x1, 1",
        ".irp i, 3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22,23,24,25,26,27,28,29,30,31",
        "LOAD x\\i, \\i",
        ".endr",
        "addi sp, sp, {frame}",
        "mret",
        ".purgem STORE",
        ".purgem LOAD",
        frame = const FRAME_BYTES,
        handler = sym handle_trap,
    );

    extern "C" {
        fn __trap_entry();
    }

    /// `mtvec.MODE` for direct mode: every trap enters at the base address.
    const MTVEC_DIRECT: usize = 0;

    /// Points `mtvec` at `__trap_entry`. The entry demultiplexes on `mcause`
    /// itself, so the vector is always in direct mode.
    pub fn init_trap_vector() {
        let mtvec = __trap_entry as usize | MTVEC_DIRECT;
        unsafe {
            asm!("csrw mtvec, {}", in(reg) mtvec);
        }
    }

    /// `ControlRegisters` over the real `mstatus`/`mie`, using atomic `csrrs`/`csrrc`.
    pub struct MachineControlRegisters;

    impl ControlRegisters for MachineControlRegisters {
        fn read(&self, reg: ControlRegister) -> usize {
            match reg {
                ControlRegister::Status => riscv::register::mstatus::read().bits(),
                ControlRegister::InterruptEnable => riscv::register::mie::read().bits(),
            }
        }

        fn set_bits(&self, reg: ControlRegister, mask: usize) -> usize {
            let previous: usize;
            unsafe {
                match reg {
                    ControlRegister::Status => {
                        asm!("csrrs {}, mstatus, {}", out(reg) previous, in(reg) mask)
                    }
                    ControlRegister::InterruptEnable => {
                        asm!("csrrs {}, mie, {}", out(reg) previous, in(reg) mask)
                    }
                }
            }
            previous
        }

        fn clear_bits(&self, reg: ControlRegister, mask: usize) -> usize {
            let previous: usize;
            unsafe {
                match reg {
                    ControlRegister::Status => {
                        asm!("csrrc {}, mstatus, {}", out(reg) previous, in(reg) mask)
                    }
                    ControlRegister::InterruptEnable => {
                        asm!("csrrc {}, mie, {}", out(reg) previous, in(reg) mask)
                    }
                }
            }
            previous
        }
    }
}
