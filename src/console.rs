// bellatrix_rt/src/console.rs

//! Console output over the host channel, and the `log` backend built on it.

use crate::config::STDOUT_FD;
use crate::util::htif::HostChannel;
use alloc::sync::Arc;
use core::fmt::{self, Write};
use spin::{Mutex, Once};

static CONSOLE: Once<Arc<dyn HostChannel>> = Once::new();
static STDOUT: Mutex<Stdout> = Mutex::new(Stdout);

/// Routes console output to `host`. Later calls are ignored.
pub fn init(host: Arc<dyn HostChannel>) {
    CONSOLE.call_once(|| host);
}

/// The host channel given to `init`, if any.
pub fn host() -> Option<&'static dyn HostChannel> {
    CONSOLE.get().map(|host| &**host)
}

struct Stdout;

impl Write for Stdout {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if let Some(host) = CONSOLE.get() {
            HostWriter(&**host).write_str(s)?;
        }
        Ok(())
    }
}

struct HostWriter<'a>(&'a dyn HostChannel);

impl Write for HostWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write(STDOUT_FD, s.as_bytes());
        Ok(())
    }
}

/// Prints to the console. Output before `init` is dropped.
///
/// The lock only keeps whole messages together. A trap taken in the middle
/// of a print finds it held and writes straight through instead of waiting
/// on the hart it interrupted.
pub fn print(args: fmt::Arguments) {
    // Writing to the host cannot fail.
    let _ = match STDOUT.try_lock() {
        Some(mut stdout) => stdout.write_fmt(args),
        None => Stdout.write_fmt(args),
    };
}

/// Prints straight to `host`, for output before the console exists.
pub fn print_to(host: &dyn HostChannel, args: fmt::Arguments) {
    let _ = HostWriter(host).write_fmt(args);
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::console::print(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! println {
    () => {
        $crate::print!("\n")
    };
    ($($arg:tt)*) => {
        $crate::print!("{}\n", format_args!($($arg)*))
    };
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let color = match record.level() {
            log::Level::Error => 31,
            log::Level::Warn => 33,
            log::Level::Info => 32,
            log::Level::Debug => 36,
            log::Level::Trace => 90,
        };
        println!(
            "\u{1B}[{}m[{:>5}] {}\u{1B}[0m",
            color,
            record.level(),
            record.args(),
        );
    }

    fn flush(&self) {}
}

/// Level selected by the `LOG` environment variable at build time.
pub fn max_level() -> log::LevelFilter {
    match option_env!("LOG") {
        Some("ERROR") => log::LevelFilter::Error,
        Some("WARN") => log::LevelFilter::Warn,
        Some("INFO") => log::LevelFilter::Info,
        Some("DEBUG") => log::LevelFilter::Debug,
        Some("TRACE") => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    }
}

/// Installs the console logger. Returns false if another logger was already set.
pub fn init_logger() -> bool {
    static LOGGER: Logger = Logger;
    if log::set_logger(&LOGGER).is_err() {
        return false;
    }
    log::set_max_level(max_level());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ABORT_STATUS;
    use crate::testing::{finishes_within, RecordingHost};
    use crate::trap::{SimulatedControlRegisters, TrapContext, TrapSystem, X_ILLEGAL_INSTRUCTION};
    use alloc::boxed::Box;
    use alloc::string::String;
    use std::time::Duration;

    fn printed(host: &RecordingHost) -> String {
        String::from_utf8_lossy(&host.output.lock()).into_owned()
    }

    #[test]
    fn test_print_to_writes_without_console() {
        let host = RecordingHost::default();
        print_to(&host, format_args!("heap {}\n", "down"));
        assert_eq!(printed(&host), "heap down\n");
    }

    // The console and logger are process-wide, so they are set up once here.
    #[test]
    fn test_trap_during_console_output_still_exits() {
        let host = Arc::new(RecordingHost::default());
        init(host.clone());
        init_logger();
        println!("console ready");
        assert!(printed(&host).contains("console ready"));

        let system = Arc::new(TrapSystem::new(host.clone(), Box::new(SimulatedControlRegisters::new())));
        let printing = STDOUT.lock();
        let worker = Arc::clone(&system);
        assert!(finishes_within(Duration::from_secs(2), move || {
            let mut ctx = TrapContext::new(0x8000_0040);
            worker.dispatch(X_ILLEGAL_INSTRUCTION, &mut ctx);
        }));
        drop(printing);

        assert_eq!(*host.exits.lock(), [ABORT_STATUS]);
    }
}
