// bellatrix_rt/src/lang.rs

//! Panic handler for bare-metal builds.

use crate::trap::{halt, FatalError};
use core::panic::PanicInfo;
use log::error;

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    match info.location() {
        Some(location) => error!(
            "panicked at {}:{}: {}",
            location.file(),
            location.line(),
            info.message()
        ),
        None => error!("panicked: {}", info.message()),
    }
    halt(FatalError::Panic)
}
