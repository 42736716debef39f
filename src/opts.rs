use std::path::PathBuf;

/// Options that control a conversion run.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI is responsible for resolving user input (flags, environment, profile defaults)
/// into this type so other frontends and tests can construct it programmatically.
#[derive(Debug, Clone)]
pub struct Opts {
    /// Directory decoded media files are written into. Must already exist.
    pub media_dir: PathBuf,

    /// Whether to write a per-card dump to the diagnostics writer.
    pub verbose: bool,
}
