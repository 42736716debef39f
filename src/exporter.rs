//! Write a finished deck: media into the media directory, rows into an encoder.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::Result;
use crate::card::Card;
use crate::card_encoder::CardEncoder;
use crate::deck::DeckEntry;
use crate::media::MediaFile;
use crate::media_dir::ensure_media_dir;
use crate::opts::Opts;

/// Counters accumulated over one export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Rows written (one per merged card).
    pub notes: usize,
    /// Word entries across all rows; each becomes one Anki card.
    pub words: usize,
    pub files: usize,
    pub bytes: u64,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "exported {} notes with {} cards", self.notes, self.words)?;
        write!(
            f,
            "wrote {} bytes of media to {} files",
            self.bytes, self.files
        )
    }
}

pub struct Exporter {
    media_dir: PathBuf,
    verbose: bool,
}

impl Exporter {
    /// Create an exporter, failing fast if the media directory does not exist.
    pub fn new(opts: &Opts) -> Result<Self> {
        ensure_media_dir(&opts.media_dir)?;
        Ok(Self {
            media_dir: opts.media_dir.clone(),
            verbose: opts.verbose,
        })
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    /// Write one file into the media directory, replacing any file of the same name.
    pub fn write_media(&self, file: &MediaFile) -> Result<u64> {
        let path = self.media_dir.join(&file.name);
        fs::write(&path, &file.data)?;
        debug!(path = %path.display(), bytes = file.data.len(), "wrote media");
        Ok(file.data.len() as u64)
    }

    /// Write every entry's media and row, in order.
    ///
    /// Media files are written once per distinct filename. When verbose, each card's index and
    /// fields are dumped to `log`.
    pub fn export<E, L>(
        &self,
        entries: Vec<DeckEntry>,
        encoder: &mut E,
        log: &mut L,
    ) -> Result<ExportSummary>
    where
        E: CardEncoder + ?Sized,
        L: Write,
    {
        let mut summary = ExportSummary::default();
        let mut written: HashSet<String> = HashSet::new();

        for (i, entry) in entries.into_iter().enumerate() {
            for file in &entry.media {
                if !written.insert(file.name.clone()) {
                    continue;
                }
                summary.bytes += self.write_media(file)?;
                summary.files += 1;
            }

            encoder.write_card(&entry.card)?;
            summary.notes += 1;
            summary.words += entry.card.words.len();

            if self.verbose {
                dump_card(log, i + 1, &entry.card)?;
            }
        }

        encoder.close()?;
        info!(
            notes = summary.notes,
            words = summary.words,
            files = summary.files,
            bytes = summary.bytes,
            "export finished"
        );
        Ok(summary)
    }
}

fn dump_card<L: Write>(log: &mut L, index: usize, card: &Card) -> Result<()> {
    writeln!(log, "{index}")?;
    for (label, value) in card.labelled_fields() {
        writeln!(log, "{label}: {value}")?;
    }
    writeln!(log)?;
    Ok(())
}
