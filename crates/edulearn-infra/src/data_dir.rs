//! Location of the Edulearn data directory.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "EDULEARN_DATA_DIR";

/// Resolve the data directory: `EDULEARN_DATA_DIR` if set, else
/// `~/.edulearn`, else `./.edulearn`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    // Use home directory fallback: ~/.edulearn
    if let Some(home) = dirs::home_dir() {
        return home.join(".edulearn");
    }

    // Last resort: current directory
    PathBuf::from(".edulearn")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_data_dir_from_env() {
        // SAFETY: This test is single-threaded and restores the env var immediately.
        unsafe {
            std::env::set_var(DATA_DIR_ENV, "/tmp/test-edulearn");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-edulearn"));
        unsafe {
            std::env::remove_var(DATA_DIR_ENV);
        }
    }
}
