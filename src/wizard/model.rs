//! Wizard state model: fixed page sequence, gated cursor, per-page validity.
//!
//! All session state lives in [`SessionModel`]. Input events arrive as
//! [`SessionMsg`](super::update::SessionMsg) values handled by the update
//! function; this module owns the navigation rules themselves.
//!
//! **Design invariant:** the model performs no I/O. Navigation calls outside
//! their gates are silent no-ops, never errors — hosts consult
//! [`SessionModel::can_advance`] / [`SessionModel::can_retreat`] to disable
//! affordances instead of handling failures.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::core::errors::Result;
use crate::protocol::comparisons::{ComparisonAgenda, PAIR_COUNT};
use crate::protocol::factors::{ALL_FACTORS, Factor};
use crate::protocol::scoring::ScoringEngine;
use crate::protocol::session::SessionRecord;

// ──────────────────── pages ────────────────────

/// Instruction interludes in the canonical page sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionsKind {
    /// Shown before the rating page.
    RatingIntro,
    /// Shown before the comparison block.
    ComparisonIntro,
}

impl InstructionsKind {
    /// The instruction text for this interlude.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::RatingIntro => {
                "Rate the task you just performed on each of the six workload \
                 scales below. For every scale, pick the point between Low and \
                 High that best reflects your experience. Consider each scale \
                 on its own."
            }
            Self::ComparisonIntro => {
                "Select the Scale Title that represents the more important \
                 contributor to workload for the specific task you performed \
                 in this experiment."
            }
        }
    }
}

/// One page of the wizard.
///
/// The sequence is fixed and constructed once per session:
/// ParticipantInfo → Instructions(rating) → Rating → Instructions(comparison)
/// → 15×Comparison → Final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPage {
    /// Participant identifier entry. A blank id is legal.
    ParticipantInfo,
    /// Instruction interlude.
    Instructions(InstructionsKind),
    /// All six rating scales on one page.
    Rating,
    /// One pairwise comparison, by agenda index.
    Comparison(usize),
    /// Review and save. Exits via the save action, not page advance.
    Final,
}

/// Total page count of the canonical sequence.
pub const PAGE_COUNT: usize = PAIR_COUNT + 5;

fn page_sequence() -> Vec<WizardPage> {
    let mut pages = Vec::with_capacity(PAGE_COUNT);
    pages.push(WizardPage::ParticipantInfo);
    pages.push(WizardPage::Instructions(InstructionsKind::RatingIntro));
    pages.push(WizardPage::Rating);
    pages.push(WizardPage::Instructions(InstructionsKind::ComparisonIntro));
    pages.extend((0..PAIR_COUNT).map(WizardPage::Comparison));
    pages.push(WizardPage::Final);
    pages
}

// ──────────────────── render descriptions ────────────────────

/// One rating scale's display data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingEntry {
    /// The factor being rated.
    pub factor: Factor,
    /// Scale description shown alongside the slider.
    pub description: &'static str,
    /// Current raw rating, if entered.
    pub rating: Option<u8>,
}

/// Page content, sufficient for a host to render without reaching into the
/// model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageBody {
    /// Participant id entry with the current value.
    ParticipantInfo {
        /// Id as entered so far.
        current_id: String,
    },
    /// Instruction interlude text.
    Instructions {
        /// The full instruction paragraph.
        text: &'static str,
    },
    /// The six rating scales.
    Rating {
        /// Scales in catalog order.
        entries: [RatingEntry; 6],
    },
    /// One comparison matchup in display order.
    Comparison {
        /// Agenda index, `0..15`.
        pair_index: usize,
        /// Left option as laid out for this session.
        left: Factor,
        /// Right option as laid out for this session.
        right: Factor,
        /// Current resolution, if any.
        chosen: Option<Factor>,
    },
    /// The closing page.
    Final {
        /// Whether every rating and comparison is in place.
        complete: bool,
    },
}

/// Everything a host needs to draw one page and its navigation chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Cursor position of this page.
    pub index: usize,
    /// Total page count.
    pub total: usize,
    /// Short page title ("Mental Demand vs Effort" for comparisons).
    pub title: String,
    /// Page content.
    pub body: PageBody,
    /// Whether this page's completion predicate currently passes.
    pub valid: bool,
}

// ──────────────────── session model ────────────────────

/// The running wizard: page sequence, cursor, and protocol state.
#[derive(Debug, Clone)]
pub struct SessionModel {
    participant_id: String,
    engine: ScoringEngine,
    pages: Vec<WizardPage>,
    cursor: usize,
    start_time: Option<DateTime<Utc>>,
}

impl SessionModel {
    /// Build a session around an already-generated agenda.
    #[must_use]
    pub fn new(agenda: ComparisonAgenda) -> Self {
        Self {
            participant_id: String::new(),
            engine: ScoringEngine::new(agenda),
            pages: page_sequence(),
            cursor: 0,
            start_time: None,
        }
    }

    /// Build a session, generating the agenda from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(ComparisonAgenda::generate(rng))
    }

    /// Participant id as entered so far.
    #[must_use]
    pub fn participant_id(&self) -> &str {
        &self.participant_id
    }

    /// Replace the participant id. Blank is legal.
    pub fn set_participant_id(&mut self, id: impl Into<String>) {
        self.participant_id = id.into();
    }

    /// Read access to the protocol state.
    #[must_use]
    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Record a rating (any page; later calls overwrite).
    pub fn rate(&mut self, factor: Factor, value: u8) -> Result<()> {
        self.engine.record_rating(factor, value)
    }

    /// Resolve a comparison in favor of `winner`.
    pub fn choose(&mut self, pair_index: usize, winner: Factor) -> Result<()> {
        self.engine.record_choice(pair_index, winner)
    }

    /// Current cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The page under the cursor.
    #[must_use]
    pub fn current_page(&self) -> WizardPage {
        self.pages[self.cursor]
    }

    /// Whether the cursor rests on the Final page.
    #[must_use]
    pub fn is_at_final(&self) -> bool {
        matches!(self.current_page(), WizardPage::Final)
    }

    /// Start timestamp, recorded the first time the participant left page 0.
    #[must_use]
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// Whether `next` is currently enabled: a following page exists and the
    /// current page's completion predicate passes.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.cursor + 1 < self.pages.len() && self.page_valid(self.current_page())
    }

    /// Whether `previous` is currently enabled.
    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.cursor > 0
    }

    /// Move forward one page if the gate allows it.
    ///
    /// Silent no-op (returns `false`) when the current page fails validation
    /// or the cursor is already on the last page. Leaving the opening page
    /// for the first time stamps the session start time.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        if self.cursor == 0 && self.start_time.is_none() {
            self.start_time = Some(Utc::now());
        }
        self.cursor += 1;
        true
    }

    /// Move back one page. Silent no-op (returns `false`) at the first page.
    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Finalize the session into its record, stamping the end time.
    ///
    /// Completeness is enforced by the engine; the wizard's gating makes an
    /// incomplete finalize unreachable through normal navigation.
    pub fn finalize(&self) -> Result<SessionRecord> {
        let end = Utc::now();
        // Final is only reachable after leaving page 0, so the start stamp
        // exists on every gated path.
        let start = self.start_time.unwrap_or(end);
        self.engine.finalize(&self.participant_id, start, end)
    }

    /// Render description for the page at `index`.
    #[must_use]
    pub fn page_view(&self, index: usize) -> Option<PageView> {
        let page = *self.pages.get(index)?;
        Some(self.view_of(index, page))
    }

    /// Render description for the page under the cursor.
    #[must_use]
    pub fn current_view(&self) -> PageView {
        self.view_of(self.cursor, self.current_page())
    }

    fn view_of(&self, index: usize, page: WizardPage) -> PageView {
        PageView {
            index,
            total: self.pages.len(),
            title: self.page_title(page),
            body: self.page_body(page),
            valid: self.page_valid(page),
        }
    }

    fn page_valid(&self, page: WizardPage) -> bool {
        match page {
            WizardPage::ParticipantInfo
            | WizardPage::Instructions(_)
            | WizardPage::Rating
            | WizardPage::Final => true,
            WizardPage::Comparison(i) => {
                self.engine.resolution(i).ok().flatten().is_some()
            }
        }
    }

    fn page_title(&self, page: WizardPage) -> String {
        match page {
            WizardPage::ParticipantInfo => "Participant Info".to_string(),
            WizardPage::Instructions(_) => "Instructions".to_string(),
            WizardPage::Rating => "Factors".to_string(),
            WizardPage::Comparison(i) => self.engine.agenda().pair(i).map_or_else(
                || "Comparison".to_string(),
                |pair| {
                    let (left, right) = pair.display_order();
                    format!("{left} vs {right}")
                },
            ),
            WizardPage::Final => "Finish".to_string(),
        }
    }

    fn page_body(&self, page: WizardPage) -> PageBody {
        match page {
            WizardPage::ParticipantInfo => PageBody::ParticipantInfo {
                current_id: self.participant_id.clone(),
            },
            WizardPage::Instructions(kind) => PageBody::Instructions { text: kind.text() },
            WizardPage::Rating => PageBody::Rating {
                entries: ALL_FACTORS.map(|factor| RatingEntry {
                    factor,
                    description: factor.description(),
                    rating: self.engine.rating(factor),
                }),
            },
            WizardPage::Comparison(i) => {
                let (left, right) = self.engine.agenda().pair(i).map_or(
                    (Factor::MentalDemand, Factor::PhysicalDemand),
                    |pair| pair.display_order(),
                );
                PageBody::Comparison {
                    pair_index: i,
                    left,
                    right,
                    chosen: self.engine.resolution(i).ok().flatten(),
                }
            }
            WizardPage::Final => PageBody::Final {
                complete: self.engine.is_complete() && self.engine.is_fully_rated(),
            },
        }
    }
}
