//! Utilities for logging and error reporting.
//!
//! Standard output is reserved for the printed readings, so log events are written to stderr
//! and optionally to a rotating log file.

use std::{io::Write, path::PathBuf, str::FromStr};

use eyre::Context;
use tracing_appender::{
    non_blocking::{NonBlockingBuilder, WorkerGuard},
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "warn,simple_weather=info";

/// Prefix of the log file names, the rotation date is appended.
const LOG_FILE_PREFIX: &str = "simple-weather.log";

/// Options for writing to log file.
#[derive(Clone)]
struct LogFileOptions {
    /// The directory to store the log files in.
    /// Will be created if it doesn't yet exist.
    pub directory: PathBuf,
    /// How often to rotate the log files
    pub rotation: Rotation,
}

#[derive(Clone)]
struct ReportWriterOptions {
    /// Whether to write to stderr.
    stderr: bool,
    /// Whether to write to the log file.
    log_file: Option<LogFileOptions>,
}

/// Implements [`std::io::Write`] to write `tracing` messages to multiple outputs.
struct ReportWriter {
    stderr: bool,
    log_file_writer: Option<RollingFileAppender>,
}

impl ReportWriter {
    /// Try creating a new [`ReportWriter`].
    fn try_new(options: &ReportWriterOptions) -> eyre::Result<Self> {
        let log_file_writer = if let Some(log_file_options) = &options.log_file {
            std::fs::create_dir_all(&log_file_options.directory).wrap_err_with(|| {
                format!(
                    "Unable to create log file directory {:?}",
                    log_file_options.directory
                )
            })?;
            Some(RollingFileAppender::new(
                log_file_options.rotation.clone(),
                log_file_options.directory.clone(),
                LOG_FILE_PREFIX,
            ))
        } else {
            None
        };

        Ok(Self {
            stderr: options.stderr,
            log_file_writer,
        })
    }
}

impl Write for ReportWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut retval: usize = buf.len();

        if self.stderr {
            std::io::stderr().write_all(buf)?;
        }

        if let Some(writer) = &mut self.log_file_writer {
            retval = usize::min(retval, writer.write(buf)?);
        }

        Ok(retval)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if self.stderr {
            std::io::stderr().flush()?;
        }

        if let Some(writer) = &mut self.log_file_writer {
            writer.flush()?;
        }

        Ok(())
    }
}

/// Keeps the non-blocking log writer alive, pending messages are flushed when dropped.
pub struct ReportingGuard {
    _writer: WorkerGuard,
}

/// Options for [`setup_logging()`].
pub struct Options {
    /// Directory containing the `log` directory.
    pub data_dir: PathBuf,
    /// Whether to also write logs to a file.
    pub log_file: bool,
    /// How often to rotate the log file.
    pub log_rotation: Rotation,
}

impl Options {
    fn log_dir(&self) -> PathBuf {
        self.data_dir.join("log")
    }
}

/// Install `color-eyre` handlers for error reports and panics.
pub fn setup_error_hooks() -> eyre::Result<()> {
    let (eyre_panic_hook, eyre_hook) = color_eyre::config::HookBuilder::new().into_hooks();
    let eyre_panic_hook = eyre_panic_hook.into_panic_hook();
    eyre::set_hook(eyre_hook.into_eyre_hook())?;
    std::panic::set_hook(Box::new(move |panic_info| {
        eyre_panic_hook(panic_info);
    }));
    Ok(())
}

/// Set up the global `tracing` subscriber. Respects the `RUST_LOG` environment variable.
pub fn setup_logging(options: &Options) -> eyre::Result<ReportingGuard> {
    let report_writer = ReportWriter::try_new(&ReportWriterOptions {
        stderr: true,
        log_file: options.log_file.then(|| LogFileOptions {
            directory: options.log_dir(),
            rotation: options.log_rotation.clone(),
        }),
    })?;

    let (non_blocking_writer, report_writer_guard) = NonBlockingBuilder::default()
        .buffered_lines_limit(1000)
        .lossy(false)
        .finish(report_writer);

    let rust_log_env: String =
        std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking_writer);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(tracing_subscriber::EnvFilter::from_str(rust_log_env.as_str()).unwrap_or_default())
        .with(tracing_error::ErrorLayer::default())
        .try_init()
        .wrap_err("Unable to set global tracing subscriber")?;

    if options.log_file {
        tracing::info!("Writing logs to {:?}", options.log_dir());
    }

    Ok(ReportingGuard {
        _writer: report_writer_guard,
    })
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use tracing_appender::rolling::Rotation;

    use super::{LogFileOptions, ReportWriter, ReportWriterOptions, LOG_FILE_PREFIX};

    #[test]
    fn test_report_writer_log_file() {
        let directory = std::env::temp_dir().join(format!(
            "simple-weather-test-log-{}",
            std::process::id()
        ));
        let mut writer = ReportWriter::try_new(&ReportWriterOptions {
            stderr: false,
            log_file: Some(LogFileOptions {
                directory: directory.clone(),
                rotation: Rotation::NEVER,
            }),
        })
        .unwrap();

        writer.write_all(b"Generated reading\n").unwrap();
        writer.flush().unwrap();

        let contents = std::fs::read_to_string(directory.join(LOG_FILE_PREFIX)).unwrap();
        std::fs::remove_dir_all(&directory).unwrap();
        assert_eq!("Generated reading\n", contents);
    }

    #[test]
    fn test_report_writer_without_outputs() {
        let mut writer = ReportWriter::try_new(&ReportWriterOptions {
            stderr: false,
            log_file: None,
        })
        .unwrap();
        assert_eq!(5, writer.write(b"hello").unwrap());
        writer.flush().unwrap();
    }
}
