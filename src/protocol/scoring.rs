//! Scoring engine: rating storage, tie-free comparison tallying, and
//! weighted-score derivation.
//!
//! The engine owns the session's comparison agenda and every mutable piece
//! of protocol state. Ratings may be revised freely before finalization;
//! comparison choices may be revised too, moving one win between the two
//! factors involved. Σ tallies always equals the number of resolved pairs,
//! and no factor can exceed 5 wins because it appears in exactly 5 pairs.

#![allow(clippy::cast_possible_truncation)]

use chrono::{DateTime, Utc};

use crate::core::errors::{Result, TlxError};
use crate::protocol::comparisons::{ComparisonAgenda, ComparisonPair, PAIR_COUNT};
use crate::protocol::factors::{ALL_FACTORS, FACTOR_COUNT, Factor, is_valid_rating};
use crate::protocol::session::{FactorScore, SessionRecord};

/// Derive one factor's weighted score from its raw rating and win tally.
///
/// Truncating integer division reproduces the legacy per-factor formula
/// byte-for-byte in the output file; the protocol literature divides the
/// summed products once instead, so this is a recorded compatibility choice.
#[must_use]
pub const fn weighted_score(raw: u8, tally: u8) -> u8 {
    ((raw as u16 * tally as u16) / PAIR_COUNT as u16) as u8
}

/// Mutable protocol state for one session.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    agenda: ComparisonAgenda,
    ratings: [Option<u8>; FACTOR_COUNT],
    resolutions: [Option<Factor>; PAIR_COUNT],
}

impl ScoringEngine {
    /// Build an engine around a generated agenda.
    #[must_use]
    pub fn new(agenda: ComparisonAgenda) -> Self {
        Self {
            agenda,
            ratings: [None; FACTOR_COUNT],
            resolutions: [None; PAIR_COUNT],
        }
    }

    /// The session's comparison agenda, in presentation order.
    #[must_use]
    pub fn agenda(&self) -> &ComparisonAgenda {
        &self.agenda
    }

    /// Set a factor's raw rating. Later calls overwrite earlier ones.
    pub fn record_rating(&mut self, factor: Factor, value: u8) -> Result<()> {
        if !is_valid_rating(value) {
            return Err(TlxError::OutOfRangeRating { factor, value });
        }
        self.ratings[factor.index()] = Some(value);
        Ok(())
    }

    /// The factor's current raw rating, if any.
    #[must_use]
    pub fn rating(&self, factor: Factor) -> Option<u8> {
        self.ratings[factor.index()]
    }

    /// Resolve a comparison in favor of `winner`.
    ///
    /// Re-selection replaces the previous resolution, so the previous
    /// winner's tally drops by one while the new winner's rises by one.
    pub fn record_choice(&mut self, pair_index: usize, winner: Factor) -> Result<()> {
        let pair = self.pair(pair_index)?;
        if !pair.contains(winner) {
            return Err(TlxError::InvalidChoice { pair_index, winner });
        }
        self.resolutions[pair_index] = Some(winner);
        Ok(())
    }

    /// The winner chosen for `pair_index`, if resolved.
    pub fn resolution(&self, pair_index: usize) -> Result<Option<Factor>> {
        self.pair(pair_index)?;
        Ok(self.resolutions[pair_index])
    }

    /// Count of comparisons this factor has won so far, `0..=5`.
    #[must_use]
    pub fn win_tally(&self, factor: Factor) -> u8 {
        let wins = self
            .resolutions
            .iter()
            .filter(|r| **r == Some(factor))
            .count();
        // A factor appears in exactly FACTOR_COUNT-1 pairs.
        debug_assert!(wins < FACTOR_COUNT);
        wins as u8
    }

    /// Number of pairs resolved so far.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.resolutions.iter().filter(|r| r.is_some()).count()
    }

    /// True iff all 15 pairs have a resolution.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.resolutions.iter().all(Option::is_some)
    }

    /// True iff every factor has a raw rating.
    #[must_use]
    pub fn is_fully_rated(&self) -> bool {
        self.ratings.iter().all(Option::is_some)
    }

    /// Produce the immutable session record.
    ///
    /// Fails with `IncompleteSession` while any comparison or rating is
    /// still missing. The wizard's gating makes that unreachable through
    /// normal navigation, so hitting it indicates a caller bug.
    pub fn finalize(
        &self,
        participant_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<SessionRecord> {
        if !self.is_complete() {
            return Err(TlxError::IncompleteSession {
                details: format!(
                    "{} of {PAIR_COUNT} comparisons resolved",
                    self.resolved_count()
                ),
            });
        }
        if let Some(unrated) = ALL_FACTORS.iter().find(|f| self.rating(**f).is_none()) {
            return Err(TlxError::IncompleteSession {
                details: format!("no rating recorded for {unrated}"),
            });
        }

        let scores = ALL_FACTORS.map(|factor| {
            let raw = self.ratings[factor.index()].unwrap_or(0);
            let tally = self.win_tally(factor);
            FactorScore {
                factor,
                raw,
                tally,
                weighted: weighted_score(raw, tally),
            }
        });

        Ok(SessionRecord {
            participant_id: participant_id.to_string(),
            start_time,
            end_time,
            scores,
        })
    }

    fn pair(&self, pair_index: usize) -> Result<ComparisonPair> {
        self.agenda
            .pair(pair_index)
            .ok_or(TlxError::InvalidPair {
                pair_index,
                agenda_len: self.agenda.len(),
            })
    }
}
