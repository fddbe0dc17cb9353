//! Pure update function for the wizard session.
//!
//! `update()` takes the session model and one discrete input event, mutates
//! the model, and returns a command describing any side effect the host
//! should execute. Every state transition goes through this function, which
//! keeps the session deterministic and testable.
//!
//! **Design invariant:** zero I/O here. The CSV append happens in the host,
//! driven by [`SessionCmd::Export`].

use crate::core::errors::Result;
use crate::protocol::factors::Factor;
use crate::protocol::session::SessionRecord;
use crate::wizard::model::SessionModel;

/// Discrete input events from the host UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMsg {
    /// Participant id field changed.
    SetParticipant(String),
    /// A rating scale was set.
    Rate {
        /// Factor being rated.
        factor: Factor,
        /// Raw value, 0–100 step 5.
        value: u8,
    },
    /// A comparison option was picked.
    Choose {
        /// Agenda index of the pair.
        pair_index: usize,
        /// The option picked as more important.
        winner: Factor,
    },
    /// Next-button press.
    Next,
    /// Previous-button press.
    Previous,
    /// Save action on the Final page.
    Save,
}

/// Side effects requested from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCmd {
    /// Nothing to do.
    None,
    /// A page transition completed: clear input focus and redraw. Fires on
    /// every completed transition and never on a rejected one.
    Refresh,
    /// The session finalized: append the record to the output file and
    /// terminate the wizard.
    Export(SessionRecord),
}

/// Apply one input event to the model.
///
/// Gated navigation that does not fire (`Next` on an unresolved comparison,
/// `Previous` at the opening page, `Save` away from the Final page) is a
/// silent no-op returning [`SessionCmd::None`]. Contract violations in event
/// payloads (out-of-range rating, out-of-pair winner) surface as errors and
/// leave the model unchanged.
pub fn update(model: &mut SessionModel, msg: SessionMsg) -> Result<SessionCmd> {
    match msg {
        SessionMsg::SetParticipant(id) => {
            model.set_participant_id(id);
            Ok(SessionCmd::None)
        }

        SessionMsg::Rate { factor, value } => {
            model.rate(factor, value)?;
            Ok(SessionCmd::None)
        }

        SessionMsg::Choose { pair_index, winner } => {
            model.choose(pair_index, winner)?;
            Ok(SessionCmd::None)
        }

        SessionMsg::Next => {
            if model.advance() {
                Ok(SessionCmd::Refresh)
            } else {
                Ok(SessionCmd::None)
            }
        }

        SessionMsg::Previous => {
            if model.retreat() {
                Ok(SessionCmd::Refresh)
            } else {
                Ok(SessionCmd::None)
            }
        }

        SessionMsg::Save => {
            if model.is_at_final() {
                Ok(SessionCmd::Export(model.finalize()?))
            } else {
                Ok(SessionCmd::None)
            }
        }
    }
}
