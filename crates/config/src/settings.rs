//! Configuration structures for gottem settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General application settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Editor settings
    #[serde(default)]
    pub editor: EditorSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Transcript storage settings
    #[serde(default)]
    pub storage: StorageSettings,
}

/// General application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Selected theme name
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Shortcut of the provider selected at startup (first provider if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<String>,
}

/// Editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Soft wrap width in columns (0 follows the terminal width)
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,

    /// Tab size (number of spaces)
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// Persist the transcript after every successful query
    #[serde(default = "default_save_after_query")]
    pub save_after_query: bool,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,

    /// Entries kept in memory
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

/// Transcript storage settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Transcript directory override (defaults to the XDG data dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcripts_dir: Option<String>,
}

impl EditorSettings {
    /// Wrap width to use on a terminal `terminal_cols` wide, never wider
    /// than the terminal
    pub fn effective_wrap_width(&self, terminal_cols: usize) -> usize {
        if self.wrap_width == 0 {
            terminal_cols
        } else {
            self.wrap_width.min(terminal_cols)
        }
    }
}

// Default value functions for serde
fn default_theme_name() -> String {
    defaults::THEME_NAME.to_string()
}

fn default_wrap_width() -> usize {
    defaults::WRAP_WIDTH
}

fn default_tab_size() -> usize {
    defaults::TAB_SIZE
}

fn default_save_after_query() -> bool {
    defaults::SAVE_AFTER_QUERY
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

fn default_max_entries() -> usize {
    defaults::MAX_LOG_ENTRIES
}

// Default implementations
impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            default_provider: None,
        }
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            wrap_width: default_wrap_width(),
            tab_size: default_tab_size(),
            save_after_query: default_save_after_query(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
            max_entries: default_max_entries(),
        }
    }
}
