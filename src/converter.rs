//! High-level API for converting an export into an Anki import.
//!
//! `Converter` wires the pieces together: parse the export, group occurrences into a deck,
//! then hand the deck to the exporter with a TSV encoder sized for the widest card.
//!
//! The media directory is validated when the converter is built, so a run that cannot
//! write its media fails before any input is read.

use std::io::{BufWriter, Read, Write};

use tracing::info;

use crate::Result;
use crate::card_encoder::CardEncoder;
use crate::deck::Deck;
use crate::exporter::{ExportSummary, Exporter};
use crate::opts::Opts;
use crate::record::read_export;
use crate::tsv_encoder::TsvEncoder;

pub struct Converter {
    exporter: Exporter,
}

impl Converter {
    /// Create a converter for the given options.
    pub fn new(opts: &Opts) -> Result<Self> {
        Ok(Self {
            exporter: Exporter::new(opts)?,
        })
    }

    /// Read an export from `r`, write TSV rows to `w` and verbose dumps to `log`.
    ///
    /// The whole export is grouped before any output is produced, so a malformed record
    /// or inconsistent merge aborts the run without writing rows or media.
    pub fn convert<R, W, L>(&self, r: R, w: W, log: &mut L) -> Result<ExportSummary>
    where
        R: Read,
        W: Write,
        L: Write,
    {
        let occurrences = read_export(r)?;
        info!(occurrences = occurrences.len(), "read export");

        let mut deck = Deck::new();
        deck.ingest_all(&occurrences)?;

        let mut encoder = TsvEncoder::new(BufWriter::new(w), deck.max_words());
        let run_res = self.exporter.export(deck.into_entries(), &mut encoder, log);
        merge_run_and_close(run_res, encoder.close())
    }
}

/// Prefer the run's error; otherwise surface a failure to flush.
fn merge_run_and_close<T>(run_res: Result<T>, close_res: Result<()>) -> Result<T> {
    match (run_res, close_res) {
        (Err(e), _) => Err(e),
        (Ok(v), Ok(())) => Ok(v),
        (Ok(_), Err(e)) => Err(e),
    }
}
