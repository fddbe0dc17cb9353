//! Interactive terminal administration of one assessment session.
//!
//! Renders each wizard page as text, maps line input onto session messages,
//! and drives the update loop until the participant saves or cancels.
//! Parameterized over I/O for testability: the whole flow runs against
//! string buffers in tests.
//!
//! Cancelling (quit command or end of input) discards the in-memory session
//! entirely — no partial persistence, matching the windowed original where
//! closing the window before the final page saved nothing.

use std::io::{self, BufRead, Write};

use rand::Rng;

use crate::protocol::factors::{ALL_FACTORS, Factor, RATING_MIDPOINT, is_valid_rating};
use crate::protocol::session::SessionRecord;
use crate::wizard::model::{PageBody, PageView, SessionModel};
use crate::wizard::update::{SessionCmd, SessionMsg, update};

/// Outcome of an interactive run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The participant saved; the record is ready for export.
    Saved(SessionRecord),
    /// The participant quit (or input ended) before saving.
    Cancelled,
}

/// Administer one session, reading commands from `reader` and writing
/// prompts to `writer`.
///
/// `participant` pre-fills the id page; the agenda is generated from `rng`.
pub fn run_session<R: BufRead, W: Write, G: Rng + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    rng: &mut G,
    participant: Option<&str>,
) -> io::Result<SessionOutcome> {
    let mut model = SessionModel::with_rng(rng);
    if let Some(id) = participant {
        model.set_participant_id(id);
    }

    writeln!(writer, "\n  NASA TLX — Workload Assessment\n")?;

    loop {
        let view = model.current_view();
        let step = match view.body {
            PageBody::ParticipantInfo { .. } => step_participant(reader, writer, &view)?,
            PageBody::Instructions { .. } => step_instructions(reader, writer, &view)?,
            PageBody::Rating { .. } => step_ratings(reader, writer, &view)?,
            PageBody::Comparison { .. } => step_comparison(reader, writer, &view)?,
            PageBody::Final { .. } => step_final(reader, writer, &view, &model)?,
        };

        let msgs = match step {
            Step::Cancel => return Ok(SessionOutcome::Cancelled),
            Step::Apply(msgs) => msgs,
        };

        for msg in msgs {
            match update(&mut model, msg) {
                Ok(SessionCmd::Export(record)) => {
                    return Ok(SessionOutcome::Saved(record));
                }
                Ok(_) => {}
                Err(e) => {
                    // Prompt validation keeps contract violations out of the
                    // message stream; anything that slips through is shown
                    // and the page re-renders.
                    writeln!(writer, "  ! {e}")?;
                }
            }
        }
    }
}

/// What one page interaction produced.
enum Step {
    /// Feed these messages to the update loop, in order.
    Apply(Vec<SessionMsg>),
    /// Discard the session.
    Cancel,
}

fn step_participant<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    view: &PageView,
) -> io::Result<Step> {
    let PageBody::ParticipantInfo { current_id } = &view.body else {
        return Ok(Step::Apply(vec![]));
    };

    write_banner(writer, view)?;
    writeln!(writer, "  A blank ID is allowed.")?;
    if current_id.is_empty() {
        write!(writer, "  Participant ID: ")?;
    } else {
        write!(writer, "  Participant ID [{current_id}]: ")?;
    }
    writer.flush()?;

    match read_line(reader)? {
        None => Ok(Step::Cancel),
        Some(input) if input.is_empty() => Ok(Step::Apply(vec![SessionMsg::Next])),
        Some(input) => Ok(Step::Apply(vec![
            SessionMsg::SetParticipant(input),
            SessionMsg::Next,
        ])),
    }
}

fn step_instructions<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    view: &PageView,
) -> io::Result<Step> {
    let PageBody::Instructions { text } = view.body else {
        return Ok(Step::Apply(vec![]));
    };

    write_banner(writer, view)?;
    for line in wrap_text(text, 64) {
        writeln!(writer, "  {line}")?;
    }
    write!(writer, "\n  [Enter] continue, [p] previous, [q] quit: ")?;
    writer.flush()?;

    match read_line(reader)? {
        None => Ok(Step::Cancel),
        Some(input) => match input.as_str() {
            "q" => Ok(Step::Cancel),
            "p" => Ok(Step::Apply(vec![SessionMsg::Previous])),
            _ => Ok(Step::Apply(vec![SessionMsg::Next])),
        },
    }
}

fn step_ratings<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    view: &PageView,
) -> io::Result<Step> {
    let PageBody::Rating { entries } = &view.body else {
        return Ok(Step::Apply(vec![]));
    };

    write_banner(writer, view)?;
    writeln!(
        writer,
        "  Enter 0-100 in steps of 5. Enter alone keeps the shown value."
    )?;

    let mut msgs = Vec::new();
    for entry in entries {
        writeln!(writer)?;
        writeln!(writer, "  {}", entry.factor)?;
        for line in wrap_text(entry.description, 60) {
            writeln!(writer, "    {line}")?;
        }
        let value = match prompt_rating(reader, writer, entry.factor, entry.rating)? {
            None => return Ok(Step::Cancel),
            Some(PromptedRating::Previous) => {
                // Back out of the page; already-entered values stay recorded.
                msgs.push(SessionMsg::Previous);
                return Ok(Step::Apply(msgs));
            }
            Some(PromptedRating::Value(v)) => v,
        };
        msgs.push(SessionMsg::Rate {
            factor: entry.factor,
            value,
        });
    }
    msgs.push(SessionMsg::Next);
    Ok(Step::Apply(msgs))
}

enum PromptedRating {
    Value(u8),
    Previous,
}

fn prompt_rating<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    factor: Factor,
    current: Option<u8>,
) -> io::Result<Option<PromptedRating>> {
    let default = current.unwrap_or(RATING_MIDPOINT);
    loop {
        write!(writer, "    Low 0 ─── 100 High [{default}]: ")?;
        writer.flush()?;

        let Some(input) = read_line(reader)? else {
            return Ok(None);
        };
        match input.as_str() {
            "" => return Ok(Some(PromptedRating::Value(default))),
            "q" => return Ok(None),
            "p" => return Ok(Some(PromptedRating::Previous)),
            raw => match raw.parse::<u8>() {
                Ok(value) if is_valid_rating(value) => {
                    return Ok(Some(PromptedRating::Value(value)));
                }
                _ => {
                    writeln!(
                        writer,
                        "    {factor} needs a multiple of 5 between 0 and 100."
                    )?;
                }
            },
        }
    }
}

fn step_comparison<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    view: &PageView,
) -> io::Result<Step> {
    let PageBody::Comparison {
        pair_index,
        left,
        right,
        chosen,
    } = view.body
    else {
        return Ok(Step::Apply(vec![]));
    };

    write_banner(writer, view)?;
    writeln!(writer, "  Which contributed more to workload?")?;
    writeln!(writer)?;
    for (key, option) in [(1, left), (2, right)] {
        let marker = if chosen == Some(option) { "*" } else { " " };
        writeln!(writer, "   {marker}[{key}] {option}")?;
        for line in wrap_text(option.description(), 56) {
            writeln!(writer, "        {line}")?;
        }
    }
    write!(writer, "\n  [1/2] choose, [p] previous, [q] quit: ")?;
    writer.flush()?;

    match read_line(reader)? {
        None => Ok(Step::Cancel),
        Some(input) => match input.as_str() {
            "q" => Ok(Step::Cancel),
            "p" => Ok(Step::Apply(vec![SessionMsg::Previous])),
            "1" | "2" => {
                let winner = if input == "1" { left } else { right };
                // Choosing advances immediately, like the original's
                // click-through comparison pages.
                Ok(Step::Apply(vec![
                    SessionMsg::Choose { pair_index, winner },
                    SessionMsg::Next,
                ]))
            }
            _ if chosen.is_some() => Ok(Step::Apply(vec![SessionMsg::Next])),
            _ => Ok(Step::Apply(vec![])),
        },
    }
}

fn step_final<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    view: &PageView,
    model: &SessionModel,
) -> io::Result<Step> {
    write_banner(writer, view)?;

    let id = model.participant_id();
    writeln!(
        writer,
        "  Participant: {}",
        if id.is_empty() { "(blank)" } else { id }
    )?;
    writeln!(writer)?;
    for factor in ALL_FACTORS {
        let rating = model
            .engine()
            .rating(factor)
            .map_or_else(|| "--".to_string(), |r| r.to_string());
        writeln!(
            writer,
            "    {:<16} rating {:>3}   wins {}",
            factor.name(),
            rating,
            model.engine().win_tally(factor)
        )?;
    }
    write!(writer, "\n  [Enter] save and finish, [p] previous, [q] quit: ")?;
    writer.flush()?;

    match read_line(reader)? {
        None => Ok(Step::Cancel),
        Some(input) => match input.as_str() {
            "q" => Ok(Step::Cancel),
            "p" => Ok(Step::Apply(vec![SessionMsg::Previous])),
            _ => Ok(Step::Apply(vec![SessionMsg::Save])),
        },
    }
}

fn write_banner<W: Write>(writer: &mut W, view: &PageView) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "  ── {} ({}/{}) ──",
        view.title,
        view.index + 1,
        view.total
    )
}

/// Read one trimmed line. `None` means input ended (treated as cancel).
fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    let n = reader.read_line(&mut line)?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Greedy word wrap for instruction prose.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
