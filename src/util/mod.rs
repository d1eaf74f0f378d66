pub mod colors;
pub mod hook;
pub mod log;
pub mod task;

use directories::ProjectDirs;
use std::path::PathBuf;

/// Local data directory holding the key-value store and the log file.
pub fn data_dir() -> PathBuf {
    ProjectDirs::from("com", "celebra", "celebra")
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".celebra"))
}
