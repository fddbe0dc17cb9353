//! End-to-end session scenarios: message-driven wizard runs flowing into
//! CSV files on disk, plus the interactive front-end against scripted input.

use std::io::Write as _;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

use nasa_tlx::cli::administer::{SessionOutcome, run_session};
use nasa_tlx::export::csv::header_line;
use nasa_tlx::prelude::*;

/// Drive one complete session through the update loop and return the record.
fn complete_session(seed: u64, participant: &str, rating: u8) -> SessionRecord {
    let mut model = SessionModel::with_rng(&mut StdRng::seed_from_u64(seed));

    let send = |model: &mut SessionModel, msg: SessionMsg| -> SessionCmd {
        update(model, msg).expect("scripted session messages are all valid")
    };

    send(&mut model, SessionMsg::SetParticipant(participant.to_string()));
    send(&mut model, SessionMsg::Next); // leave participant page
    send(&mut model, SessionMsg::Next); // leave rating intro
    for factor in ALL_FACTORS {
        send(&mut model, SessionMsg::Rate { factor, value: rating });
    }
    send(&mut model, SessionMsg::Next); // leave rating page
    send(&mut model, SessionMsg::Next); // leave comparison intro

    for i in 0..PAIR_COUNT {
        let (first, _) = model.engine().agenda().pair(i).unwrap().members();
        send(
            &mut model,
            SessionMsg::Choose {
                pair_index: i,
                winner: first,
            },
        );
        send(&mut model, SessionMsg::Next);
    }

    assert!(model.is_at_final());
    match send(&mut model, SessionMsg::Save) {
        SessionCmd::Export(record) => record,
        other => panic!("save should export, got {other:?}"),
    }
}

#[test]
fn two_sessions_append_one_header_two_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    let exporter = CsvExporter::new(&path);

    exporter.append(&complete_session(1, "first", 40)).unwrap();
    exporter.append(&complete_session(2, "second", 80)).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();

    assert_eq!(lines.len(), 3, "one header plus two data rows");
    assert_eq!(lines[0], header_line());
    assert!(lines[1].starts_with("first,"));
    assert!(lines[2].starts_with("second,"));

    // Every line carries exactly the header's 21 fields, in order.
    for line in &lines {
        assert_eq!(line.split(',').count(), 21, "bad field count in {line:?}");
    }

    // Raw block of the second row reflects its ratings.
    let fields: Vec<&str> = lines[2].split(',').collect();
    for raw in &fields[3..9] {
        assert_eq!(*raw, "80");
    }
    // Count block sums to 15.
    let counts: u32 = fields[9..15].iter().map(|f| f.parse::<u32>().unwrap()).sum();
    assert_eq!(counts, 15);
}

#[test]
fn record_row_matches_engine_arithmetic() {
    let record = complete_session(3, "arith", 65);
    for score in &record.scores {
        assert_eq!(
            u16::from(score.weighted),
            u16::from(score.raw) * u16::from(score.tally) / 15
        );
    }
    assert!(record.overall_workload() <= 100);
}

#[test]
fn cancelled_interactive_session_touches_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");

    // Participant answers the id prompt, then input ends mid-wizard.
    let mut input: &[u8] = b"walkaway\n\n";
    let mut output = Vec::new();
    let mut rng = StdRng::seed_from_u64(9);

    let outcome = run_session(&mut input, &mut output, &mut rng, None).unwrap();
    assert_eq!(outcome, SessionOutcome::Cancelled);

    // Discarded sessions never reach the exporter: the file was not created.
    assert!(!path.exists());
}

#[test]
fn interactive_session_flows_into_csv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("study.csv");

    let mut script = Vec::new();
    writeln!(script, "p-042").unwrap(); // participant id
    writeln!(script).unwrap(); // rating intro
    for value in [0, 5, 50, 95, 100, 20] {
        writeln!(script, "{value}").unwrap();
    }
    writeln!(script).unwrap(); // comparison intro
    for _ in 0..PAIR_COUNT {
        writeln!(script, "2").unwrap();
    }
    writeln!(script).unwrap(); // save

    let mut input: &[u8] = &script;
    let mut output = Vec::new();
    let mut rng = StdRng::seed_from_u64(21);

    let outcome = run_session(&mut input, &mut output, &mut rng, None).unwrap();
    let SessionOutcome::Saved(record) = outcome else {
        panic!("scripted run should save");
    };

    CsvExporter::new(&path).append(&record).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("p-042,"));

    let fields: Vec<&str> = lines[1].split(',').collect();
    // Ratings land in catalog order regardless of presentation order.
    assert_eq!(&fields[3..9], &["0", "5", "50", "95", "100", "20"]);

    // Start/stop are integer epoch seconds, start <= stop.
    let start: i64 = fields[1].parse().unwrap();
    let stop: i64 = fields[2].parse().unwrap();
    assert!(start <= stop);
}

#[test]
fn seeded_sessions_share_an_agenda() {
    let a = SessionModel::with_rng(&mut StdRng::seed_from_u64(123));
    let b = SessionModel::with_rng(&mut StdRng::seed_from_u64(123));
    let pairs_a: Vec<_> = a.engine().agenda().pairs().to_vec();
    let pairs_b: Vec<_> = b.engine().agenda().pairs().to_vec();
    assert_eq!(pairs_a, pairs_b);
}

#[test]
fn finalize_before_comparisons_is_rejected() {
    let mut model = SessionModel::with_rng(&mut StdRng::seed_from_u64(5));
    for factor in ALL_FACTORS {
        update(&mut model, SessionMsg::Rate { factor, value: 50 }).unwrap();
    }
    let err = model.finalize().unwrap_err();
    assert_eq!(err.code(), "TLX-2004");
    assert!(err.is_contract_violation());
}
