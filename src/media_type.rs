use std::str::FromStr;

/// The media content types we know how to store in the media directory.
///
/// Each variant maps to exactly one file extension; anything else in an export is rejected
/// rather than written under a guessed name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    /// `audio/mpeg`, stored as `.mp3`.
    Mpeg,

    /// `image/jpeg`, stored as `.jpeg`.
    Jpeg,
}

impl MediaType {
    /// File extension including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            MediaType::Mpeg => ".mp3",
            MediaType::Jpeg => ".jpeg",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            MediaType::Mpeg => "audio/mpeg",
            MediaType::Jpeg => "image/jpeg",
        }
    }
}

impl FromStr for MediaType {
    type Err = ();

    fn from_str(content_type: &str) -> Result<Self, Self::Err> {
        match content_type {
            "audio/mpeg" => Ok(MediaType::Mpeg),
            "image/jpeg" => Ok(MediaType::Jpeg),
            _ => Err(()),
        }
    }
}
