//! Default data directory resolution.

use std::path::PathBuf;
use taskdeck_core::error::{Result, TaskdeckError};

/// Returns the default location for persisted client state (`~/.taskdeck`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| TaskdeckError::storage("Failed to get home directory"))?;
    Ok(home_dir.join(".taskdeck"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_dir_ends_with_taskdeck() {
        let dir = default_data_dir().unwrap();
        assert!(dir.ends_with(".taskdeck"));
    }
}
