//! Plain-text log file behind the `log` facade
//!
//! `env_logger` is installed once per process and pipes every record into a
//! shared sink. The sink only holds an open file while a [`LogGuard`] is
//! alive; records emitted outside that window are dropped.

use std::fs::File;
use std::io::{self, LineWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

use miette::{Context, IntoDiagnostic, Result};

type SharedFile = Arc<Mutex<Option<LineWriter<File>>>>;

#[derive(Clone, Default)]
struct LogSink(SharedFile);

impl LogSink {
    fn open(&self, file: File) -> Result<()> {
        let mut slot = self
            .0
            .lock()
            .map_err(|_| miette::miette!("Log sink poisoned"))?;
        if slot.is_some() {
            miette::bail!("Log file already open");
        }
        *slot = Some(LineWriter::new(file));
        Ok(())
    }

    fn close(&self) {
        if let Ok(mut slot) = self.0.lock() {
            if let Some(mut file) = slot.take() {
                let _ = file.flush();
            }
        }
    }

    fn is_open(&self) -> bool {
        self.0.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.0.lock() {
            Ok(mut slot) => match slot.as_mut() {
                Some(file) => file.write(buf),
                None => Ok(buf.len()),
            },
            Err(_) => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0.lock() {
            Ok(mut slot) => match slot.as_mut() {
                Some(file) => file.flush(),
                None => Ok(()),
            },
            Err(_) => Ok(()),
        }
    }
}

static SINK: OnceLock<LogSink> = OnceLock::new();

/// Serializes tests that open the process-wide log file
#[cfg(test)]
pub(crate) static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Keeps the log file open; closing happens on drop
#[must_use = "the log file is closed as soon as the guard is dropped"]
pub struct LogGuard {
    sink: LogSink,
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        log::debug!("Closing log file");
        log::logger().flush();
        self.sink.close();
    }
}

/// Open (truncate) `path` and route log records into it.
///
/// `filter` uses `RUST_LOG` syntax. Fails if a guard is already alive or the
/// file can't be created.
pub fn init(path: &Path, filter: &str) -> Result<LogGuard> {
    let mut first_use = false;
    let sink = SINK
        .get_or_init(|| {
            first_use = true;
            LogSink::default()
        })
        .clone();

    if sink.is_open() {
        miette::bail!("Logging is already initialized");
    }

    if first_use {
        env_logger::Builder::new()
            .parse_filters(filter)
            .write_style(env_logger::WriteStyle::Never)
            .format(|buf, record| {
                writeln!(
                    buf,
                    "[{} {:<5} {}] {}",
                    buf.timestamp_millis(),
                    record.level(),
                    record.target(),
                    record.args()
                )
            })
            .target(env_logger::Target::Pipe(Box::new(sink.clone())))
            .try_init()
            .into_diagnostic()
            .wrap_err("Error installing logger")?;
    }

    let file = File::create(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Error creating log file {}", path.display()))?;
    sink.open(file)?;

    log::info!("Logging to {}", path.display());

    Ok(LogGuard { sink })
}
