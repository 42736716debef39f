use std::io::Write;

use crate::card::{Card, SHARED_FIELD_COUNT, WORD_FIELD_COUNT};
use crate::card_encoder::CardEncoder;
use crate::{Error, Result};

/// A `CardEncoder` that writes one tab-separated line per card, ready for Anki's text import.
///
/// Design:
/// - Every row has `SHARED_FIELD_COUNT + WORD_FIELD_COUNT * max_words` fields. Cards with
///   fewer words are right-padded with empty fields, since the importer maps columns by
///   position.
/// - Fields are written verbatim. Upstream text is whitespace-collapsed, so tabs and
///   newlines do not occur inside fields.
pub struct TsvEncoder<W: Write> {
    /// The underlying writer we stream rows into.
    w: W,

    /// Widest card in the deck; decides how much padding each row gets.
    max_words: usize,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> TsvEncoder<W> {
    /// Create a new TSV encoder padding rows to `max_words` word entries.
    pub fn new(w: W, max_words: usize) -> Self {
        Self {
            w,
            max_words,
            closed: false,
        }
    }

    /// Number of fields in every row this encoder writes.
    pub fn field_count(&self) -> usize {
        SHARED_FIELD_COUNT + WORD_FIELD_COUNT * self.max_words
    }
}

/// Render `card` as a single row without the trailing newline.
pub fn render_row(card: &Card, max_words: usize) -> String {
    let shared = card.shared_fields();
    let mut fields: Vec<&str> = shared.iter().map(String::as_str).collect();
    for word in &card.words {
        fields.extend(word.fields());
    }

    let padding = WORD_FIELD_COUNT * max_words.saturating_sub(card.words.len());
    fields.extend(std::iter::repeat_n("", padding));

    fields.join("\t")
}

impl<W: Write> CardEncoder for TsvEncoder<W> {
    fn write_card(&mut self, card: &Card) -> Result<()> {
        if self.closed {
            return Err(Error::Io(std::io::Error::other(
                "cannot write card: encoder is already closed",
            )));
        }

        writeln!(&mut self.w, "{}", render_row(card, self.max_words))?;
        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;
        Ok(())
    }
}
