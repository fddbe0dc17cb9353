//! Comparison agenda generation: all C(6,2)=15 unordered factor pairs,
//! presented once each in randomized order with randomized left/right layout.
//!
//! Membership is deterministic; only presentation order and display swap
//! depend on the RNG. The generator takes an injected `rand::Rng` so tests
//! can drive it with a seeded `StdRng`.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::protocol::factors::{ALL_FACTORS, Factor};

/// Number of unordered pairs over the six factors.
pub const PAIR_COUNT: usize = 15;

/// One unordered two-factor matchup.
///
/// `first`/`second` are in canonical catalog order (`first.index() <
/// second.index()`); `swapped` records the one-time 50/50 draw that decides
/// which member is shown on the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonPair {
    first: Factor,
    second: Factor,
    swapped: bool,
}

impl ComparisonPair {
    /// Canonical members, catalog order.
    #[must_use]
    pub const fn members(self) -> (Factor, Factor) {
        (self.first, self.second)
    }

    /// Members in display order, honoring the swap draw.
    #[must_use]
    pub const fn display_order(self) -> (Factor, Factor) {
        if self.swapped {
            (self.second, self.first)
        } else {
            (self.first, self.second)
        }
    }

    /// Whether display order flips the canonical order.
    #[must_use]
    pub const fn is_swapped(self) -> bool {
        self.swapped
    }

    /// Whether `factor` is one of the two members.
    #[must_use]
    pub fn contains(self, factor: Factor) -> bool {
        self.first == factor || self.second == factor
    }

    /// The member that is not `winner`, if `winner` is a member at all.
    #[must_use]
    pub fn other(self, winner: Factor) -> Option<Factor> {
        if winner == self.first {
            Some(self.second)
        } else if winner == self.second {
            Some(self.first)
        } else {
            None
        }
    }
}

/// The full comparison agenda for one session: 15 pairs in presentation
/// order. Immutable after generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonAgenda {
    pairs: Vec<ComparisonPair>,
}

impl ComparisonAgenda {
    /// Generate the session agenda.
    ///
    /// Enumerates all i<j pairs over the catalog, draws an independent
    /// 50/50 display swap for each, then shuffles the presentation order.
    /// Every unordered pair appears exactly once regardless of RNG outcome.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut pairs = Vec::with_capacity(PAIR_COUNT);
        for (i, first) in ALL_FACTORS.iter().enumerate() {
            for second in &ALL_FACTORS[i + 1..] {
                pairs.push(ComparisonPair {
                    first: *first,
                    second: *second,
                    swapped: rng.random_bool(0.5),
                });
            }
        }
        pairs.shuffle(rng);
        Self { pairs }
    }

    /// Pairs in presentation order.
    #[must_use]
    pub fn pairs(&self) -> &[ComparisonPair] {
        &self.pairs
    }

    /// Pair at `index`, if within the agenda.
    #[must_use]
    pub fn pair(&self, index: usize) -> Option<ComparisonPair> {
        self.pairs.get(index).copied()
    }

    /// Number of pairs (always [`PAIR_COUNT`]).
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Never true for a generated agenda; present for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::protocol::factors::FACTOR_COUNT;

    fn canonical_keys(agenda: &ComparisonAgenda) -> HashSet<(usize, usize)> {
        agenda
            .pairs()
            .iter()
            .map(|p| {
                let (a, b) = p.members();
                (a.index(), b.index())
            })
            .collect()
    }

    #[test]
    fn agenda_covers_all_pairs_exactly_once() {
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let agenda = ComparisonAgenda::generate(&mut rng);

            assert_eq!(agenda.len(), PAIR_COUNT, "seed {seed}");
            let keys = canonical_keys(&agenda);
            assert_eq!(keys.len(), PAIR_COUNT, "duplicate pair under seed {seed}");
            for i in 0..FACTOR_COUNT {
                for j in (i + 1)..FACTOR_COUNT {
                    assert!(keys.contains(&(i, j)), "missing pair ({i},{j}) seed {seed}");
                }
            }
        }
    }

    #[test]
    fn members_are_canonical_regardless_of_swap() {
        let mut rng = StdRng::seed_from_u64(7);
        let agenda = ComparisonAgenda::generate(&mut rng);
        for pair in agenda.pairs() {
            let (a, b) = pair.members();
            assert!(a.index() < b.index());

            let (left, right) = pair.display_order();
            if pair.is_swapped() {
                assert_eq!((left, right), (b, a));
            } else {
                assert_eq!((left, right), (a, b));
            }
        }
    }

    #[test]
    fn same_seed_reproduces_same_agenda() {
        let a = ComparisonAgenda::generate(&mut StdRng::seed_from_u64(42));
        let b = ComparisonAgenda::generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_vary_presentation_not_membership() {
        let a = ComparisonAgenda::generate(&mut StdRng::seed_from_u64(1));
        let b = ComparisonAgenda::generate(&mut StdRng::seed_from_u64(2));
        assert_eq!(canonical_keys(&a), canonical_keys(&b));
    }

    #[test]
    fn other_member_lookup() {
        let mut rng = StdRng::seed_from_u64(3);
        let agenda = ComparisonAgenda::generate(&mut rng);
        let pair = agenda.pair(0).unwrap();
        let (a, b) = pair.members();

        assert_eq!(pair.other(a), Some(b));
        assert_eq!(pair.other(b), Some(a));

        let outsider = ALL_FACTORS
            .into_iter()
            .find(|f| !pair.contains(*f))
            .unwrap();
        assert_eq!(pair.other(outsider), None);
    }

    #[test]
    fn out_of_range_index_is_none() {
        let mut rng = StdRng::seed_from_u64(9);
        let agenda = ComparisonAgenda::generate(&mut rng);
        assert!(agenda.pair(PAIR_COUNT).is_none());
    }
}
