//! Theme system for gottem.
//!
//! Built-in themes are embedded TOML; user themes are read from the
//! themes directory and take precedence over built-ins with the same name.

mod colors;
mod loader;

pub use colors::Theme;
pub use loader::{load_theme, load_theme_from_str};

use std::path::Path;
use std::sync::OnceLock;

// Embed theme files at compile time
const BUILTIN_THEMES: &[(&str, &str)] = &[
    ("default", include_str!("../themes/default.toml")),
    ("dracula", include_str!("../themes/dracula.toml")),
    ("nord", include_str!("../themes/nord.toml")),
    ("solarized-light", include_str!("../themes/solarized-light.toml")),
];

static BUILTIN: OnceLock<Vec<Theme>> = OnceLock::new();

/// Load theme from embedded TOML content.
fn load_builtin(content: &str, name: &str) -> Theme {
    match load_theme_from_str(content) {
        Ok(mut theme) => {
            theme.name = name.to_string();
            theme
        }
        Err(e) => {
            eprintln!(
                "Failed to parse built-in theme '{}': {}. Using fallback theme.",
                name, e
            );
            Theme::fallback(name)
        }
    }
}

fn builtin_themes() -> &'static [Theme] {
    BUILTIN.get_or_init(|| {
        BUILTIN_THEMES
            .iter()
            .map(|(name, content)| load_builtin(content, name))
            .collect()
    })
}

impl Theme {
    /// Get theme by name.
    ///
    /// First tries `<themes_dir>/<name>.toml`, then the built-in themes,
    /// then the built-in default.
    pub fn get_by_name(name: &str, themes_dir: Option<&Path>) -> Theme {
        if let Some(dir) = themes_dir {
            let path = dir.join(format!("{}.toml", name));
            if path.exists() {
                if let Ok(theme) = load_theme(&path) {
                    return theme;
                }
            }
        }

        let themes = builtin_themes();
        themes
            .iter()
            .find(|theme| theme.name == name)
            .or_else(|| themes.iter().find(|theme| theme.name == "default"))
            .cloned()
            .unwrap_or_else(|| Theme::fallback("default"))
    }

}
