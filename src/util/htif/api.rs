// bellatrix_rt/src/util/htif/api.rs

//! Host-target interface.
//!
//! The simulation host watches two 64-bit words, `tohost` and `fromhost`,
//! placed by the linker script. Exit is a single tagged write to `tohost`.
//! Output hands the host the address of an aligned descriptor and waits for
//! `fromhost` to become non-zero.

use crate::config::HTIF_SYS_WRITE;

/// Mailbox used to report exit status and print to the host.
pub trait HostChannel: Send + Sync {
    /// Report `status` to the host and stop. Never returns.
    fn exit(&self, status: isize) -> !;

    /// Write `bytes` to the host file descriptor `fd`. Blocks until acknowledged.
    fn write(&self, fd: usize, bytes: &[u8]);
}

/// `tohost` value signalling exit with `status`.
pub const fn exit_word(status: isize) -> u64 {
    (((status as usize) << 1) | 1) as u64
}

/// Eight-word request block read by the host proxy.
#[repr(C, align(64))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyscallDescriptor {
    pub words: [u64; 8],
}

impl SyscallDescriptor {
    pub fn write(fd: usize, bytes: &[u8]) -> Self {
        let mut words = [0u64; 8];
        words[0] = HTIF_SYS_WRITE;
        words[1] = fd as u64;
        words[2] = bytes.as_ptr() as usize as u64;
        words[3] = bytes.len() as u64;
        Self { words }
    }
}

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
mod imp {
    use super::{exit_word, HostChannel, SyscallDescriptor};
    use core::ptr::{addr_of, addr_of_mut};
    use core::sync::atomic::{fence, Ordering};

    extern "C" {
        static mut tohost: u64;
        static mut fromhost: u64;
    }

    /// HTIF backend over the linker-provided `tohost`/`fromhost` words.
    pub struct Htif;

    impl HostChannel for Htif {
        fn exit(&self, status: isize) -> ! {
            unsafe { core::ptr::write_volatile(addr_of_mut!(tohost), exit_word(status)) };
            loop {
                unsafe { riscv::asm::wfi() };
            }
        }

        fn write(&self, fd: usize, bytes: &[u8]) {
            let descriptor = SyscallDescriptor::write(fd, bytes);
            fence(Ordering::SeqCst);
            unsafe {
                core::ptr::write_volatile(addr_of_mut!(tohost), addr_of!(descriptor) as usize as u64);
                while core::ptr::read_volatile(addr_of!(fromhost)) == 0 {}
                core::ptr::write_volatile(addr_of_mut!(fromhost), 0);
            }
            fence(Ordering::SeqCst);
        }
    }
}

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
pub use imp::Htif;
