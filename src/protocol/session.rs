//! The finalized session record consumed by the exporter.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::protocol::factors::{FACTOR_COUNT, Factor};

/// One factor's final result triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FactorScore {
    /// Which workload dimension this row describes.
    pub factor: Factor,
    /// Self-rated magnitude, 0–100 in steps of 5.
    pub raw: u8,
    /// Pairwise comparisons won, 0–5.
    pub tally: u8,
    /// `raw * tally / 15`, truncated.
    pub weighted: u8,
}

/// Immutable outcome of one completed session.
///
/// Produced exactly once, at the Final page's save action; the exporter
/// appends it as a single CSV row and the session terminates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    /// Participant identifier as entered — may be empty, may contain commas.
    pub participant_id: String,
    /// Stamped the instant the participant first left the opening page.
    pub start_time: DateTime<Utc>,
    /// Stamped at save.
    pub end_time: DateTime<Utc>,
    /// Per-factor results in catalog order.
    pub scores: [FactorScore; FACTOR_COUNT],
}

impl SessionRecord {
    /// The result triple for one factor.
    #[must_use]
    pub fn score(&self, factor: Factor) -> &FactorScore {
        &self.scores[factor.index()]
    }

    /// The canonical overall workload index: sum of weighted scores, 0–100.
    ///
    /// Derived convenience value; the CSV row carries only the per-factor
    /// columns it is computed from.
    #[must_use]
    pub fn overall_workload(&self) -> u8 {
        self.scores.iter().map(|s| s.weighted).sum()
    }
}
