//! CSV session exporter: append-only, header-if-absent, atomic row writes.
//!
//! Each session becomes exactly one row. The header and every row are
//! assembled in memory and written with a single `write_all`, so a failed
//! write never leaves a partial line for downstream tooling to trip over.
//!
//! Column order is fixed by the factor catalog: participant id, start/stop
//! epoch seconds, six raw scores, six win-tally counts, six weighted scores
//! (21 fields). The participant id is written raw — unescaped, exactly as
//! entered — to stay byte-compatible with files produced by the legacy tool.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::errors::{Result, TlxError};
use crate::protocol::factors::ALL_FACTORS;
use crate::protocol::session::SessionRecord;

/// Build the fixed 21-column header line.
#[must_use]
pub fn header_line() -> String {
    let mut header = String::from("ParticipantID,Start time,Stop time");
    for factor in ALL_FACTORS {
        header.push(',');
        header.push_str(factor.name());
        header.push_str(" raw");
    }
    for factor in ALL_FACTORS {
        header.push(',');
        header.push_str(factor.name());
        header.push_str(" count");
    }
    for factor in ALL_FACTORS {
        header.push(',');
        header.push_str(factor.name());
        header.push_str(" weighted");
    }
    header
}

/// Render one session as its CSV row (no trailing newline).
#[must_use]
pub fn record_line(record: &SessionRecord) -> String {
    let mut line = String::new();
    line.push_str(&record.participant_id);
    line.push_str(&format!(
        ",{},{}",
        record.start_time.timestamp(),
        record.end_time.timestamp()
    ));
    for score in &record.scores {
        line.push_str(&format!(",{}", score.raw));
    }
    for score in &record.scores {
        line.push_str(&format!(",{}", score.tally));
    }
    for score in &record.scores {
        line.push_str(&format!(",{}", score.weighted));
    }
    line
}

/// Append-only session exporter bound to one output path.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    /// Bind an exporter to `path`. Nothing is touched until the first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The bound output path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one session row, writing the header first when the file does
    /// not exist yet.
    ///
    /// The write is atomic at row granularity: header (if due) and row go
    /// out as one buffer. IO failures propagate unrecoverably — there is no
    /// fallback location for study data.
    pub fn append(&self, record: &SessionRecord) -> Result<()> {
        let needs_header = !self.path.exists();

        let mut buffer = String::new();
        if needs_header {
            buffer.push_str(&header_line());
            buffer.push('\n');
        }
        buffer.push_str(&record_line(record));
        buffer.push('\n');

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| TlxError::io(parent, e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| TlxError::io(&self.path, e))?;
        file.write_all(buffer.as_bytes())
            .map_err(|e| TlxError::io(&self.path, e))?;
        file.flush().map_err(|e| TlxError::io(&self.path, e))?;
        Ok(())
    }
}
