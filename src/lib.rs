//! `lln-anki` — turn Language Learning with Netflix vocabulary exports into Anki imports.
//!
//! This crate provides:
//! - A serde model of the export (`record`)
//! - Media decoding and deterministic media filenames (`media`)
//! - Card building and grouping of words that share a subtitle (`card`, `deck`)
//! - A padded TSV encoder and an exporter that writes media files (`tsv_encoder`, `exporter`)
//!
//! Most consumers should start with `converter::Converter`.

// High-level API.
pub mod converter;
pub mod opts;

// Input model.
pub mod record;

// Closed vocabularies.
pub mod media_type;
pub mod part_of_speech;

// Card construction and grouping.
pub mod card;
pub mod deck;
pub mod media;

// Output encoders and export.
pub mod card_encoder;
pub mod exporter;
pub mod media_dir;
pub mod tsv_encoder;

// Logging configuration.
#[cfg(feature = "logging")]
pub mod logging;

mod error;

pub use error::{Error, Result};
