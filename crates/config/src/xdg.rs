//! Standard locations of gottem's files.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "gottem";

/// Directory of `config.toml` and user themes: `$XDG_CONFIG_HOME/gottem`
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME))
        .context("no config directory on this platform")
}

/// Directory of transcripts and the log file: `$XDG_DATA_HOME/gottem`
pub fn get_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|p| p.join(APP_NAME))
        .context("no data directory on this platform")
}

pub fn default_transcripts_dir() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("transcripts"))
}

pub fn default_log_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("gottem.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcripts_live_under_data_dir() {
        let data = get_data_dir().unwrap();
        let transcripts = default_transcripts_dir().unwrap();
        assert!(data.ends_with("gottem"));
        assert_eq!(transcripts.parent(), Some(data.as_path()));
    }

    #[test]
    fn test_log_path() {
        let log = default_log_path().unwrap();
        assert_eq!(log.file_name().and_then(|n| n.to_str()), Some("gottem.log"));
    }

    #[test]
    fn test_config_and_data_dirs_differ() {
        assert_ne!(get_config_dir().unwrap(), get_data_dir().unwrap());
    }
}
