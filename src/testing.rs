// bellatrix_rt/src/testing.rs

//! Host doubles shared by the unit tests.

use crate::util::htif::HostChannel;
use alloc::vec::Vec;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Records exits and console bytes. `exit` unwinds instead of halting.
#[derive(Default)]
pub struct RecordingHost {
    pub exits: spin::Mutex<Vec<isize>>,
    pub output: spin::Mutex<Vec<u8>>,
}

impl HostChannel for RecordingHost {
    fn exit(&self, status: isize) -> ! {
        self.exits.lock().push(status);
        panic!("host exit {}", status)
    }

    fn write(&self, _fd: usize, bytes: &[u8]) {
        self.output.lock().extend_from_slice(bytes);
    }
}

/// Runs `f` on its own thread and reports whether it finished, by returning
/// or unwinding, within `timeout`. A hart stuck on a spin lock never does.
pub fn finishes_within<F>(timeout: Duration, f: F) -> bool
where
    F: FnOnce() + Send + 'static,
{
    let (done, finished) = mpsc::channel();
    thread::spawn(move || {
        let _ = catch_unwind(AssertUnwindSafe(f));
        let _ = done.send(());
    });
    finished.recv_timeout(timeout).is_ok()
}
