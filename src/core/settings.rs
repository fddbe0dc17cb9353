//! Persisted application settings: TOML file + env var overrides + defaults.
//!
//! The settings store is a process-wide collaborator; the assessment core
//! never reads it. Callers resolve concrete values (output path, fullscreen
//! flag) here and hand them to the exporter or front-end by value.
//!
//! Load errors fall back to compiled defaults rather than aborting a
//! session; save errors are surfaced to the operator. Persistence is atomic:
//! serialize → temp file → rename over target, so readers never observe a
//! partial settings file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, TlxError};

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "nasa-tlx-output.csv";

/// Persisted settings model.
///
/// Every field carries `#[serde(default)]` so files written by older
/// versions keep loading after additive schema changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// CSV file session rows are appended to.
    pub output_file: PathBuf,
    /// Whether a graphical host should open the wizard fullscreen.
    pub fullscreen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            fullscreen: true,
        }
    }
}

impl Settings {
    /// Load settings from `path`, apply env overrides, fall back to defaults.
    ///
    /// A missing file is not an error — first runs start from defaults. A
    /// malformed file is reported so the operator can repair or clear it.
    pub fn load(path: &Path) -> Result<Self> {
        let mut settings = if path.is_file() {
            let raw = fs::read_to_string(path).map_err(|e| TlxError::io(path, e))?;
            toml::from_str(&raw)?
        } else {
            Self::default()
        };
        settings.apply_env_overrides();
        Ok(settings)
    }

    /// Persist settings atomically: write a sibling temp file, then rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| TlxError::io(parent, e))?;
        }

        let serialized = toml::to_string_pretty(self)?;
        let tmp = path.with_extension("toml.tmp");
        fs::write(&tmp, serialized).map_err(|e| TlxError::io(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| TlxError::io(path, e))?;
        Ok(())
    }

    /// Remove the persisted file entirely, restoring defaults on next load.
    pub fn clear_all(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TlxError::io(path, e)),
        }
    }

    /// Env vars win over the persisted file: `TLX_OUTPUT_FILE`,
    /// `TLX_FULLSCREEN` (`1`/`true`/`yes` → on, anything else → off).
    fn apply_env_overrides(&mut self) {
        if let Some(output) = env::var_os("TLX_OUTPUT_FILE")
            && !output.is_empty()
        {
            self.output_file = PathBuf::from(output);
        }
        if let Ok(flag) = env::var("TLX_FULLSCREEN") {
            self.fullscreen = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }
    }
}
