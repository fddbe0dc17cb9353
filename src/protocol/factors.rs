//! The six NASA-TLX workload factors and the rating scale they share.

#![allow(missing_docs)]

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of workload factors in the protocol.
pub const FACTOR_COUNT: usize = 6;

/// Step between adjacent rating scale positions.
pub const RATING_STEP: u8 = 5;

/// Upper bound of the rating scale.
pub const RATING_MAX: u8 = 100;

/// Scale midpoint — where the original rating sliders rest before input.
pub const RATING_MIDPOINT: u8 = 50;

/// One of the six NASA-TLX workload dimensions.
///
/// Declaration order is the canonical catalog and export-column order; it
/// never changes between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    MentalDemand,
    PhysicalDemand,
    TemporalDemand,
    Performance,
    Frustration,
    Effort,
}

/// All factors in catalog order.
pub const ALL_FACTORS: [Factor; FACTOR_COUNT] = [
    Factor::MentalDemand,
    Factor::PhysicalDemand,
    Factor::TemporalDemand,
    Factor::Performance,
    Factor::Frustration,
    Factor::Effort,
];

impl Factor {
    /// Display name, unique within the catalog.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MentalDemand => "Mental Demand",
            Self::PhysicalDemand => "Physical Demand",
            Self::TemporalDemand => "Temporal Demand",
            Self::Performance => "Performance",
            Self::Frustration => "Frustration",
            Self::Effort => "Effort",
        }
    }

    /// Descriptive text shown alongside the rating scale and as comparison
    /// help. Wording follows the protocol's rating-sheet definitions.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::MentalDemand => {
                "How much mental and perceptual activity was required? \
                 Was the task easy or demanding, simple or complex?"
            }
            Self::PhysicalDemand => {
                "How much physical activity was required? \
                 Was the task easy or demanding, slack or strenuous?"
            }
            Self::TemporalDemand => {
                "How much time pressure did you feel due to the pace at which \
                 the tasks or task elements occurred? Was the pace slow or rapid?"
            }
            Self::Performance => {
                "How successful were you in performing the task? \
                 How satisfied were you with your performance?"
            }
            Self::Frustration => {
                "How irritated, stressed, and annoyed versus \
                 content, relaxed, and complacent did you feel during the task?"
            }
            Self::Effort => {
                "How hard did you have to work (mentally and physically) \
                 to accomplish your level of performance?"
            }
        }
    }

    /// Position in catalog order, `0..FACTOR_COUNT`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::MentalDemand => 0,
            Self::PhysicalDemand => 1,
            Self::TemporalDemand => 2,
            Self::Performance => 3,
            Self::Frustration => 4,
            Self::Effort => 5,
        }
    }

    /// Resolve a catalog index back to a factor. Returns `None` out of range.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::MentalDemand),
            1 => Some(Self::PhysicalDemand),
            2 => Some(Self::TemporalDemand),
            3 => Some(Self::Performance),
            4 => Some(Self::Frustration),
            5 => Some(Self::Effort),
            _ => None,
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether `value` is a legal raw rating: 0..=100 in steps of 5.
#[must_use]
pub const fn is_valid_rating(value: u8) -> bool {
    value <= RATING_MAX && value % RATING_STEP == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_six_factors_in_fixed_order() {
        assert_eq!(ALL_FACTORS.len(), FACTOR_COUNT);
        assert_eq!(ALL_FACTORS[0], Factor::MentalDemand);
        assert_eq!(ALL_FACTORS[5], Factor::Effort);
        for (i, factor) in ALL_FACTORS.iter().enumerate() {
            assert_eq!(factor.index(), i);
            assert_eq!(Factor::from_index(i), Some(*factor));
        }
        assert_eq!(Factor::from_index(FACTOR_COUNT), None);
    }

    #[test]
    fn factor_names_are_unique() {
        let names: std::collections::HashSet<&str> =
            ALL_FACTORS.iter().map(|f| f.name()).collect();
        assert_eq!(names.len(), FACTOR_COUNT);
    }

    #[test]
    fn descriptions_are_nonempty_prose() {
        for factor in ALL_FACTORS {
            assert!(
                factor.description().ends_with('?'),
                "{factor} description should be the protocol's question form"
            );
        }
    }

    #[test]
    fn rating_domain_is_zero_to_hundred_step_five() {
        let valid: Vec<u8> = (0..=RATING_MAX).filter(|v| is_valid_rating(*v)).collect();
        assert_eq!(valid.len(), 21);
        assert_eq!(valid[0], 0);
        assert_eq!(valid[10], RATING_MIDPOINT);
        assert_eq!(valid[20], RATING_MAX);

        assert!(!is_valid_rating(3));
        assert!(!is_valid_rating(101));
        assert!(!is_valid_rating(52));
    }
}
