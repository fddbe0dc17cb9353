//! Settings-file location resolution.

use std::env;
use std::path::PathBuf;

/// Resolve the settings file path.
///
/// Precedence: `$TLX_SETTINGS_FILE` → `$XDG_CONFIG_HOME/nasa-tlx/settings.toml`
/// → `$HOME/.config/nasa-tlx/settings.toml` → `./nasa-tlx-settings.toml` as a
/// last resort when no home directory is available.
#[must_use]
pub fn settings_file() -> PathBuf {
    if let Some(explicit) = env::var_os("TLX_SETTINGS_FILE") {
        return PathBuf::from(explicit);
    }

    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        let base = PathBuf::from(xdg);
        if base.is_absolute() {
            return base.join("nasa-tlx").join("settings.toml");
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join("nasa-tlx")
            .join("settings.toml");
    }

    PathBuf::from("nasa-tlx-settings.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_file_has_toml_extension() {
        let path = settings_file();
        assert_eq!(
            path.extension().and_then(|e| e.to_str()),
            Some("toml"),
            "settings path should be a .toml file: {}",
            path.display()
        );
    }
}
