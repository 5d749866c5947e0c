#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use color_eyre::eyre;
pub use kiln_testhelpers_macros::test;

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::{OwoColorize, Style};
use std::io::Write;
use std::sync::Once;

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let level_style = match record.level() {
            Level::Error => Style::new().fg_rgb::<243, 139, 168>(),
            Level::Warn => Style::new().fg_rgb::<249, 226, 175>(),
            Level::Info => Style::new().fg_rgb::<166, 227, 161>(),
            Level::Debug => Style::new().fg_rgb::<137, 180, 250>(),
            Level::Trace => Style::new().fg_rgb::<148, 226, 213>(),
        };

        eprintln!(
            "{} - {}: {}",
            record.level().style(level_style),
            record
                .target()
                .style(Style::new().fg_rgb::<137, 180, 250>()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static SETUP: Once = Once::new();

/// Installs color-eyre and color-backtrace (except on miri), and a logger
/// that writes every record to stderr.
///
/// Tests share a process, so only the first call does anything.
pub fn setup() {
    SETUP.call_once(|| {
        #[cfg(not(miri))]
        install_hooks();

        // Another harness may have installed a logger already
        if log::set_boxed_logger(Box::new(StderrLogger)).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}

#[cfg(not(miri))]
fn install_hooks() {
    use color_eyre::config::HookBuilder;
    use regex::Regex;
    use std::sync::LazyLock;

    /// Frames from the panic machinery and the test runner, which say
    /// nothing about the failing test.
    static IGNORE_FRAMES: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^(std::panic|core::panic|test::run_test|__pthread_cond_wait|std::sys::(pal|backtrace)|std::thread::Builder|core::ops::function|test::__rust_begin_short_backtrace|<core::panic::|<alloc::boxed::Box<F,A> as core::ops::function::FnOnce<Args>>::call_once)")
            .expect("frame filter regex is valid")
    });

    let eyre_filter = move |frames: &mut Vec<&color_eyre::config::Frame>| {
        frames.retain(|frame| {
            frame
                .name
                .as_ref()
                .is_none_or(|name| !IGNORE_FRAMES.is_match(&name.to_string()))
        });
    };

    HookBuilder::default()
        .add_frame_filter(Box::new(eyre_filter))
        .install()
        .expect("Failed to set up color-eyre");

    {
        use color_backtrace::{BacktracePrinter, Frame};

        let filter = move |frames: &mut Vec<&Frame>| {
            frames.retain(|frame| {
                frame
                    .name
                    .as_ref()
                    .is_none_or(|name| !IGNORE_FRAMES.is_match(name))
            });
        };

        let stderr = color_backtrace::termcolor::StandardStream::stderr(
            color_backtrace::termcolor::ColorChoice::Auto,
        );
        let printer = BacktracePrinter::new().add_frame_filter(Box::new(filter));
        printer.install(Box::new(stderr));
    }
}
