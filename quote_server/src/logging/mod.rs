//! Process-wide logging.
//!
//! `Logging::init` installs `env_logger` once at startup, writing every record to
//! stderr and to a size-rotating file. The returned handle owns the file and must
//! be kept alive by `main`; `Logging::shutdown` flushes it before exit.
//!
//! Records are formatted as `timestamp - target - level - message`. The default
//! level is `info`; `RUST_LOG` overrides it.
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Local;
use log::LevelFilter;
use quote_common::{QuoteError, Result};

pub mod rotating_file;

pub use rotating_file::RotatingFile;

/// Rotate once the file reaches 10 MB.
pub const DEFAULT_MAX_BYTES: u64 = 10_000_000;
/// Keep five rotated files.
pub const DEFAULT_BACKUPS: usize = 5;

/// Where and how large the log file may grow.
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Active log file path.
    pub path: PathBuf,
    /// Size that triggers a rotation.
    pub max_bytes: u64,
    /// Number of rotated files kept.
    pub backups: usize,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("api.log"),
            max_bytes: DEFAULT_MAX_BYTES,
            backups: DEFAULT_BACKUPS,
        }
    }
}

/// Handle to the installed logger.
pub struct Logging {
    file: Arc<Mutex<RotatingFile>>,
}

impl Logging {
    /// Install the global logger. Fails if a logger is already installed.
    pub fn init(settings: &LogSettings) -> Result<Self> {
        let file = Arc::new(Mutex::new(RotatingFile::open(
            &settings.path,
            settings.max_bytes,
            settings.backups,
        )?));
        let tee = TeeWriter {
            file: Arc::clone(&file),
        };

        env_logger::Builder::new()
            .filter_level(LevelFilter::Info)
            .parse_default_env()
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{} - {} - {} - {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                    record.target(),
                    record.level(),
                    record.args()
                )
            })
            .target(env_logger::Target::Pipe(Box::new(tee)))
            .try_init()
            .map_err(|e| QuoteError::Config(format!("logger already initialized: {}", e)))?;

        Ok(Self { file })
    }

    /// Flush pending records. Call once before the process exits.
    pub fn shutdown(self) -> Result<()> {
        log::logger().flush();
        self.file.lock()?.flush()?;
        Ok(())
    }
}

/// Copies every record to stderr and the rotating file.
struct TeeWriter {
    file: Arc<Mutex<RotatingFile>>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file
            .lock()
            .map_err(|e| io::Error::other(e.to_string()))?
            .write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file
            .lock()
            .map_err(|e| io::Error::other(e.to_string()))?
            .flush()
    }
}
