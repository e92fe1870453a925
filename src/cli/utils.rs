use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Utility Functions
-------------------------------------------------------------------------------------------------*/

const SNAPSHOT_FILE_NAME: &str = "ServiceTags_Public.json";

/// `${HOME}/.azure/ServiceTags_Public.json`, or the bare file name when there is no home
/// directory.
pub fn default_snapshot_file() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".azure").join(SNAPSHOT_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(SNAPSHOT_FILE_NAME))
}
