//! Decode embedded media payloads and derive their filenames.
//!
//! Payloads arrive as `data:<content-type>[;params],<base64>` URLs. Filenames are a pure
//! function of the subtitle reference, the payload's role and its content type, so
//! re-exporting the same data overwrites the same files.

use std::sync::LazyLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;

use crate::media_type::MediaType;
use crate::record::{MediaPayload, Reference};
use crate::{Error, Result};

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").expect("valid regex"));

/// Which of a context's three embedded assets a payload is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaRole {
    Audio,
    PreviousThumbnail,
    NextThumbnail,
}

impl MediaRole {
    pub fn suffix(self) -> &'static str {
        match self {
            MediaRole::Audio => "",
            MediaRole::PreviousThumbnail => "_prev",
            MediaRole::NextThumbnail => "_next",
        }
    }

    /// Card markup that plays or displays the file.
    pub fn reference(self, filename: &str) -> String {
        match self {
            MediaRole::Audio => format!("[sound:{filename}]"),
            MediaRole::PreviousThumbnail | MediaRole::NextThumbnail => {
                format!("<img src=\"{filename}\"/>")
            }
        }
    }
}

/// A decoded payload ready to be written into the media directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub name: String,
    pub data: Vec<u8>,
}

/// Build the filename for a payload.
///
/// `"{title}_{subtitle_index}"` has every run of non-word characters replaced by `_` and is
/// lowercased before the role suffix and extension are appended.
pub fn media_filename(
    title: &str,
    subtitle_index: u64,
    role: MediaRole,
    media_type: MediaType,
) -> String {
    let stem = format!("{title}_{subtitle_index}");
    let stem = NON_WORD.replace_all(&stem, "_").to_lowercase();
    format!("{stem}{}{}", role.suffix(), media_type.extension())
}

/// Split a `data:` URL into its content type and encoded body.
fn split_data_url(url: &str) -> std::result::Result<(&str, &str), &'static str> {
    let (header, body) = url.split_once(',').ok_or("missing ',' separator")?;
    let header = header
        .strip_prefix("data:")
        .ok_or("header does not start with 'data:'")?;
    let content_type = header.split(';').next().unwrap_or_default();
    Ok((content_type, body))
}

/// Decode one payload of the context identified by `reference`.
///
/// `key` only labels errors.
pub fn decode_media(
    payload: &MediaPayload,
    reference: &Reference,
    role: MediaRole,
    key: &str,
) -> Result<MediaFile> {
    let (content_type, body) =
        split_data_url(&payload.data_url).map_err(|reason| Error::malformed_payload(key, reason))?;

    let media_type: MediaType = content_type
        .parse()
        .map_err(|()| Error::UnsupportedMediaType {
            key: key.to_owned(),
            content_type: content_type.to_owned(),
        })?;

    let data = STANDARD
        .decode(body)
        .map_err(|e| Error::malformed_payload(key, format!("invalid base64: {e}")))?;

    Ok(MediaFile {
        name: media_filename(
            &reference.title,
            reference.subtitle_index,
            role,
            media_type,
        ),
        data,
    })
}
