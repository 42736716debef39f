use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-wide error type.
///
/// Every variant is fatal for a run: the converter performs no local recovery, so callers
/// get the first failure together with the card key or value that triggered it.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured media directory is missing or is not a directory.
    #[error("media directory not found: '{}'", .0.display())]
    MediaDirectoryNotFound(PathBuf),

    /// A media payload declared a content type we have no file extension for.
    #[error("unsupported media type '{content_type}' for card {key}")]
    UnsupportedMediaType { key: String, content_type: String },

    /// A media payload is not a `data:` URL or its base64 body does not decode.
    #[error("malformed media payload for card {key}: {reason}")]
    MalformedPayload { key: String, reason: String },

    /// The occurrence's word does not appear in any token of its context.
    #[error("word '{word}' not found in the tokens of card {key}")]
    WordNotFound { key: String, word: String },

    /// A token carries a part-of-speech tag outside the known set.
    #[error("unknown part of speech '{tag}' for word '{word}' in card {key}")]
    UnknownPartOfSpeech {
        key: String,
        word: String,
        tag: String,
    },

    /// Two occurrences share a card key but derive different sentence fields.
    #[error("inconsistent merge for card {key}: {field} differs ('{existing}' vs '{incoming}')")]
    InconsistentMerge {
        key: String,
        field: &'static str,
        existing: String,
        incoming: String,
    },

    /// The record parsed as JSON but lacks a part the card builder requires.
    #[error("malformed record for card {key}: {reason}")]
    MalformedRecord { key: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid export JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed_payload(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_record(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
