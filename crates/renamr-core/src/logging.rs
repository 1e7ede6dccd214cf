//! Log setup for the `renamr` binary.
//!
//! Stdout is reserved for the native-messaging protocol, so logs go to
//! `$XDG_STATE_HOME/renamr/renamr.log` or, when that cannot be opened, to
//! stderr. `RENAMR_LOG` overrides the filter, then `RUST_LOG`.

use anyhow::{anyhow, Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,renamr=debug,renamr_core=debug";
const FILTER_ENV: &str = "RENAMR_LOG";

/// Where log records ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    File(PathBuf),
    Stderr,
}

/// Per-record handle on the log file. A handle that cannot be duplicated
/// degrades to stderr for that record instead of losing it.
enum RecordWriter {
    Log(File),
    Stderr,
}

impl Write for RecordWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            RecordWriter::Log(f) => f.write(buf),
            RecordWriter::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            RecordWriter::Log(f) => f.flush(),
            RecordWriter::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct LogFile(File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = RecordWriter;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(f) => RecordWriter::Log(f),
            Err(_) => RecordWriter::Stderr,
        }
    }
}

fn filter_from(renamr_log: Option<&str>, rust_log: Option<&str>) -> EnvFilter {
    [renamr_log, rust_log]
        .into_iter()
        .flatten()
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn env_filter() -> EnvFilter {
    let renamr_log = std::env::var(FILTER_ENV).ok();
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(renamr_log.as_deref(), rust_log.as_deref())
}

/// `$XDG_STATE_HOME/renamr/renamr.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("renamr")?;
    Ok(xdg_dirs.get_state_home().join("renamr.log"))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))
}

fn install(writer: BoxMakeWriter) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("installing subscriber: {e}"))
}

/// Installs the global subscriber, preferring the state-dir log file.
/// Never fails: a log file that cannot be opened means stderr, and a
/// subscriber installed earlier is left alone.
pub fn init_logging() -> LogSink {
    let opened = log_file_path().and_then(|path| {
        let file = open_log_file(&path)?;
        Ok((path, file))
    });

    match opened {
        Ok((path, file)) => {
            if install(BoxMakeWriter::new(LogFile(file))).is_ok() {
                tracing::info!("renamr logging to {}", path.display());
            }
            LogSink::File(path)
        }
        Err(err) => {
            let _ = install(BoxMakeWriter::new(io::stderr));
            tracing::warn!("file logging unavailable, using stderr: {:#}", err);
            LogSink::Stderr
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn renamr_log_wins_over_rust_log() {
        let filter = filter_from(Some("warn"), Some("trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn unparsable_override_falls_through() {
        let filter = filter_from(Some("renamr=loud"), Some("error"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn default_filter_when_unset() {
        let filter = filter_from(None, None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn open_log_file_creates_state_dir_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("renamr.log");
        open_log_file(&path).unwrap().write_all(b"one\n").unwrap();
        open_log_file(&path).unwrap().write_all(b"two\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }
}
