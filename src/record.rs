//! Serde model of a vocabulary export.
//!
//! An export is a JSON array of [`VocabularyOccurrence`] objects. Only the fields the card
//! builder reads are modelled; everything else in the export is ignored.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::Result;

/// Key of the token group and translation treated as the primary sentence.
pub const PRIMARY_GROUP: &str = "1";

/// One word observed within one subtitle phrase of one movie.
#[derive(Debug, Clone, Deserialize)]
pub struct VocabularyOccurrence {
    pub word: Word,

    #[serde(rename = "wordTranslationsArr", default)]
    pub translations: Vec<String>,

    pub context: Context,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Word {
    pub text: String,

    /// Phonetic transcription, one entry per syllable.
    #[serde(rename = "pinyin", default)]
    pub phonetics: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Context {
    pub phrase: Phrase,
}

/// The subtitle phrase a word occurs in, with its tokenization and embedded media.
#[derive(Debug, Clone, Deserialize)]
pub struct Phrase {
    pub reference: Reference,

    /// Token groups keyed by group number (`"1"` is the primary sentence), in export order.
    #[serde(rename = "subtitleTokens", default)]
    pub token_groups: IndexMap<String, Vec<SubtitleToken>>,

    /// Human translations keyed like `token_groups`.
    #[serde(rename = "hTranslations", default)]
    pub translations: BTreeMap<String, String>,

    pub audio: MediaPayload,
    pub thumb_prev: MediaPayload,
    pub thumb_next: MediaPayload,
}

impl Phrase {
    /// Iterate every token of every group, groups in the order the export lists them.
    pub fn all_tokens(&self) -> impl Iterator<Item = &SubtitleToken> {
        self.token_groups.values().flatten()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub movie_id: MovieId,
    pub subtitle_index: u64,
    pub title: String,
}

/// Movie identifiers appear both as numbers and as strings in exports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
    Number(u64),
    Text(String),
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovieId::Number(n) => write!(f, "{n}"),
            MovieId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubtitleToken {
    pub form: Form,
    pub pos: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Form {
    pub text: String,

    #[serde(rename = "pinyin", default)]
    pub phonetics: Option<Vec<String>>,
}

/// An embedded media blob, stored as a `data:` URL.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaPayload {
    #[serde(rename = "dataURL")]
    pub data_url: String,
}

/// Open an export for reading: a buffered file, or standard input for `None` and `-`.
///
/// `serde_json::from_reader` pulls a byte at a time, so files always get a `BufReader`.
pub fn open_export(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(p) if p.as_os_str() != "-" => Ok(Box::new(BufReader::new(File::open(p)?))),
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// Parse a whole export from a reader.
pub fn read_export<R: Read>(r: R) -> Result<Vec<VocabularyOccurrence>> {
    Ok(serde_json::from_reader(r)?)
}
