use crate::core::errors::{Error, Result};
use log::{info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  Snapshot Files
-------------------------------------------------------------------------------------------------*/

/// Read the previously saved Service Tags JSON.
///
/// Returns `None` when the file does not exist or cannot be read; an unreadable snapshot is
/// logged as a warning and treated the same as a missing one.
pub fn read_snapshot(path: &Path) -> Option<Vec<u8>> {
    match fs::read(path) {
        Ok(json) => {
            info!("Read previous data from: {:?}", path);
            Some(json)
        }
        Err(error) if error.kind() == ErrorKind::NotFound => {
            info!("No previous data file found at: {:?}", path);
            None
        }
        Err(error) => {
            warn!(
                "Failed to read previous data from `{:?}`, treating as new: {}",
                path, error
            );
            None
        }
    }
}

/// Save the Service Tags JSON so the next run can compare against it.
pub fn save_snapshot(path: &Path, json: &[u8]) -> Result<()> {
    // Ensure parent directories exist
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|error| Error::io(parent, error))?;
    }

    fs::write(path, json)
        .map_err(|error| Error::io(path, error))
        .inspect(|_| info!("Saved JSON file: {:?}", path))
        .inspect_err(|error| log::error!("Failed to save JSON file: {}", error))
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::log_error;
    use test_log::test;

    #[test]
    fn test_save_and_read_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ServiceTags_Public.json");

        assert_eq!(read_snapshot(&path), None);

        save_snapshot(&path, b"{\"changeNumber\": 3}")
            .inspect_err(log_error)
            .unwrap();
        assert_eq!(
            read_snapshot(&path).as_deref(),
            Some(&b"{\"changeNumber\": 3}"[..])
        );
    }

    #[test]
    fn test_read_unreadable_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        // Reading a directory fails with something other than NotFound
        assert_eq!(read_snapshot(dir.path()), None);
    }

    #[test]
    fn test_save_snapshot_failure() {
        let dir = tempfile::tempdir().unwrap();
        let result = save_snapshot(dir.path(), b"{}");
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
