//! Logger setup.
//!
//! The TUI owns the terminal, so interactive runs log to a file. One-shot
//! commands log to stderr.

use std::fs::{self, OpenOptions};

use anyhow::{Context, Result};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode, WriteLogger};

use crate::config::{self, Config};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    File,
    Stderr,
}

pub fn init(config: &Config, target: LogTarget) -> Result<()> {
    let log_config = ConfigBuilder::new()
        .set_target_level(log::LevelFilter::Error)
        .set_thread_level(log::LevelFilter::Off)
        .build();

    match target {
        LogTarget::Stderr => TermLogger::init(
            config.log_level,
            log_config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )
        .context("failed to install stderr logger"),
        LogTarget::File => {
            let path = match &config.log_file {
                Some(path) => path.clone(),
                None => config::default_log_path()?,
            };
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create log dir: {}", dir.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            WriteLogger::init(config.log_level, log_config, file)
                .context("failed to install file logger")
        }
    }
}
