//! Startup configuration.
//!
//! Read once in `main` from the command line and environment, then passed into
//! the bootstrap; nothing else in the crate looks at the environment.
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use quote_common::net::{self, DEFAULT_HOST, DEFAULT_PORT};
use quote_common::{QuoteError, Result};

use crate::logging::{DEFAULT_BACKUPS, DEFAULT_MAX_BYTES, LogSettings};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Real-Time Stock Price API", long_about = None)]
pub struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Interface to bind.
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Log file; rotated copies are written next to it.
    #[arg(long, env = "LOG_FILE", default_value = "api.log")]
    pub log_file: PathBuf,

    /// Size in bytes at which the log file is rotated.
    #[arg(long, default_value_t = DEFAULT_MAX_BYTES)]
    pub log_max_bytes: u64,

    /// Number of rotated log files to keep.
    #[arg(long, default_value_t = DEFAULT_BACKUPS)]
    pub log_backups: usize,

    /// Chromium/Chrome binary. Searched for on the usual paths when omitted.
    #[arg(long, env = "CHROME_PATH")]
    pub chrome_executable: Option<PathBuf>,
}

impl Args {
    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let addr = net::addr(&self.host, self.port);
        addr.parse()
            .map_err(|e| QuoteError::Config(format!("invalid bind address {}: {}", addr, e)))
    }

    /// Log file settings.
    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            path: self.log_file.clone(),
            max_bytes: self.log_max_bytes,
            backups: self.log_backups,
        }
    }
}
