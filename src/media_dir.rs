//! Locate and validate the Anki media directory.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Profile Anki creates on first launch.
pub const DEFAULT_PROFILE: &str = "User 1";

/// Default media directory of an Anki desktop profile, relative to the home directory.
pub fn profile_media_dir(home: &Path, profile: &str) -> PathBuf {
    home.join(".local")
        .join("share")
        .join("Anki2")
        .join(profile)
        .join("collection.media")
}

/// Resolve the media directory: an explicit path wins, otherwise the profile default.
pub fn resolve_media_dir(explicit: Option<&Path>, profile: &str) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    let home = dirs::home_dir()
        .ok_or_else(|| Error::MediaDirectoryNotFound(PathBuf::from("~").join(profile)))?;
    Ok(profile_media_dir(&home, profile))
}

/// Fail with `MediaDirectoryNotFound` unless `dir` exists and is a directory.
pub fn ensure_media_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(Error::MediaDirectoryNotFound(dir.to_path_buf()))
    }
}
