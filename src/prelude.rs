//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use nasa_tlx::prelude::*;
//! ```

// Core
pub use crate::core::errors::{Result, TlxError};
pub use crate::core::settings::Settings;

// Protocol
pub use crate::protocol::comparisons::{ComparisonAgenda, ComparisonPair, PAIR_COUNT};
pub use crate::protocol::factors::{ALL_FACTORS, FACTOR_COUNT, Factor};
pub use crate::protocol::scoring::ScoringEngine;
pub use crate::protocol::session::{FactorScore, SessionRecord};

// Wizard
pub use crate::wizard::model::{PageBody, PageView, SessionModel, WizardPage};
pub use crate::wizard::update::{SessionCmd, SessionMsg, update};

// Export
pub use crate::export::csv::CsvExporter;
