//! TLX-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::protocol::factors::Factor;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, TlxError>;

/// Top-level error type for the NASA-TLX assessor.
#[derive(Debug, Error)]
pub enum TlxError {
    #[error("[TLX-1001] invalid settings: {details}")]
    InvalidSettings { details: String },

    #[error("[TLX-1002] settings parse failure in {context}: {details}")]
    SettingsParse {
        context: &'static str,
        details: String,
    },

    #[error("[TLX-2001] rating {value} for {factor} outside 0-100 step-5 domain")]
    OutOfRangeRating { factor: Factor, value: u8 },

    #[error("[TLX-2002] {winner} is not a member of comparison pair {pair_index}")]
    InvalidChoice { pair_index: usize, winner: Factor },

    #[error("[TLX-2003] comparison pair index {pair_index} outside agenda of {agenda_len}")]
    InvalidPair { pair_index: usize, agenda_len: usize },

    #[error("[TLX-2004] session incomplete: {details}")]
    IncompleteSession { details: String },

    #[error("[TLX-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[TLX-3001] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TlxError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidSettings { .. } => "TLX-1001",
            Self::SettingsParse { .. } => "TLX-1002",
            Self::OutOfRangeRating { .. } => "TLX-2001",
            Self::InvalidChoice { .. } => "TLX-2002",
            Self::InvalidPair { .. } => "TLX-2003",
            Self::IncompleteSession { .. } => "TLX-2004",
            Self::Serialization { .. } => "TLX-2101",
            Self::Io { .. } => "TLX-3001",
        }
    }

    /// Whether the error is a local programming-contract violation.
    ///
    /// Contract violations indicate a bug in the caller (a UI offering an
    /// out-of-pair winner, a save action that bypassed gating); they are
    /// never retried. Everything else is an external failure surfaced to
    /// the operator.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::OutOfRangeRating { .. }
                | Self::InvalidChoice { .. }
                | Self::InvalidPair { .. }
                | Self::IncompleteSession { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for TlxError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for TlxError {
    fn from(value: toml::de::Error) -> Self {
        Self::SettingsParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

impl From<toml::ser::Error> for TlxError {
    fn from(value: toml::ser::Error) -> Self {
        Self::Serialization {
            context: "toml",
            details: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_errors() -> Vec<TlxError> {
        vec![
            TlxError::InvalidSettings {
                details: String::new(),
            },
            TlxError::SettingsParse {
                context: "",
                details: String::new(),
            },
            TlxError::OutOfRangeRating {
                factor: Factor::MentalDemand,
                value: 101,
            },
            TlxError::InvalidChoice {
                pair_index: 0,
                winner: Factor::Effort,
            },
            TlxError::InvalidPair {
                pair_index: 15,
                agenda_len: 15,
            },
            TlxError::IncompleteSession {
                details: String::new(),
            },
            TlxError::Serialization {
                context: "",
                details: String::new(),
            },
            TlxError::Io {
                path: PathBuf::new(),
                source: std::io::Error::other("test"),
            },
        ]
    }

    #[test]
    fn error_codes_are_unique() {
        let errors = sample_errors();
        let codes: Vec<&str> = errors.iter().map(TlxError::code).collect();
        let unique: std::collections::HashSet<&&str> = codes.iter().collect();
        assert_eq!(
            codes.len(),
            unique.len(),
            "error codes must be unique: {codes:?}"
        );
    }

    #[test]
    fn error_codes_have_tlx_prefix() {
        for err in &sample_errors() {
            assert!(
                err.code().starts_with("TLX-"),
                "code {} must start with TLX-",
                err.code()
            );
        }
    }

    #[test]
    fn error_display_includes_code() {
        let err = TlxError::OutOfRangeRating {
            factor: Factor::Performance,
            value: 37,
        };
        let msg = err.to_string();
        assert!(
            msg.contains("TLX-2001"),
            "display should contain error code: {msg}"
        );
        assert!(
            msg.contains("Performance"),
            "display should name the factor: {msg}"
        );
    }

    #[test]
    fn contract_violations_are_classified() {
        // Contract violations: caller bugs, never retried.
        assert!(
            TlxError::InvalidChoice {
                pair_index: 3,
                winner: Factor::Frustration,
            }
            .is_contract_violation()
        );
        assert!(
            TlxError::IncompleteSession {
                details: String::new(),
            }
            .is_contract_violation()
        );
        assert!(
            TlxError::OutOfRangeRating {
                factor: Factor::MentalDemand,
                value: 3,
            }
            .is_contract_violation()
        );
        assert!(
            TlxError::InvalidPair {
                pair_index: 99,
                agenda_len: 15,
            }
            .is_contract_violation()
        );

        // External failures.
        assert!(
            !TlxError::Io {
                path: PathBuf::new(),
                source: std::io::Error::other("disk full"),
            }
            .is_contract_violation()
        );
        assert!(
            !TlxError::InvalidSettings {
                details: String::new(),
            }
            .is_contract_violation()
        );
    }

    #[test]
    fn io_convenience_constructor() {
        let err = TlxError::io(
            "/tmp/output.csv",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.code(), "TLX-3001");
        assert!(err.to_string().contains("/tmp/output.csv"));
    }

    #[test]
    fn from_toml_error() {
        let toml_err = toml::from_str::<toml::Value>("= invalid").unwrap_err();
        let err: TlxError = toml_err.into();
        assert_eq!(err.code(), "TLX-1002");
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: TlxError = json_err.into();
        assert_eq!(err.code(), "TLX-2101");
    }
}
