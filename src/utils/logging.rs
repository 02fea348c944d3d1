//! File logging. The terminal belongs to the UI, so log output goes to
//! `slither.log` in the data directory instead of stderr.

use crate::core::constants::LOG_FILE_NAME;
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Install the global logger writing to `dir/slither.log` (truncated on each
/// launch). Returns the log file path.
pub fn init_file_logger(dir: &Path, debug: bool) -> io::Result<PathBuf> {
    let path = dir.join(LOG_FILE_NAME);
    let file = File::create(&path)?;
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    WriteLogger::init(level, config, file)
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;
    Ok(path)
}
