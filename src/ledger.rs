// FILE: src/ledger.rs | version: 2026-10-18.rc1
//
// Append-only, human-readable results file. One block per finished round:
//
//   Round #3 - Winner: Ana
//   Scores: Ana: 2 Bo: 1
//   Rabbits: 0, Cats: 0
//   <blank line>
//
// Informational only; nothing reads it back.

use std::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::LedgerError;
use crate::session::RoundSummary;

pub fn format_entry(s: &RoundSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Round #{} - Winner: {}", s.round_id, s.winner);
    out.push_str("Scores:");
    for (name, wins) in s.scores.iter() {
        let _ = write!(out, " {name}: {wins}");
    }
    out.push('\n');
    if s.rabbit {
        let _ = writeln!(out, "Rabbit scored by {}", s.winner);
    }
    if s.cat {
        out.push_str("Cat: nobody played\n");
    }
    let _ = writeln!(out, "Rabbits: {}, Cats: {}", s.rabbits, s.cats);
    out.push('\n');
    out
}

#[derive(Clone, Debug)]
pub struct LedgerWriter {
    path: PathBuf,
}

impl LedgerWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, summary: &RoundSummary) -> Result<(), LedgerError> {
        let io_err = |source: std::io::Error| LedgerError::Io { path: self.path.display().to_string(), source };

        let f: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        let mut w = BufWriter::new(f);
        w.write_all(format_entry(summary).as_bytes()).map_err(io_err)?;
        w.flush().map_err(io_err)?;
        Ok(())
    }
}
