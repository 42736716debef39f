use anyhow::{Context, Result};
use clap::Parser;

use std::io;
use std::path::{Path, PathBuf};

use lln_anki::converter::Converter;
use lln_anki::media_dir::{DEFAULT_PROFILE, resolve_media_dir};
use lln_anki::opts::Opts;
use lln_anki::record::open_export;

fn main() -> Result<()> {
    lln_anki::logging::init();
    let params = Params::parse();

    let media_dir = resolve_media_dir(params.media_dir.as_deref(), &params.profile)?;
    let opts = Opts {
        media_dir,
        verbose: params.verbose,
    };

    // Validates the media directory before the input is touched.
    let converter = Converter::new(&opts)?;

    let input = open_export(params.input.as_deref()).with_context(|| {
        let name = params.input.as_deref().unwrap_or(Path::new("-"));
        format!("failed to open '{}'", name.display())
    })?;
    let stdout = io::stdout();
    let mut stderr = io::stderr().lock();
    let summary = converter.convert(input, stdout.lock(), &mut stderr)?;

    eprintln!("{summary}");
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "lln-anki")]
#[command(about = "Convert a Language Learning with Netflix export into an Anki TSV import")]
struct Params {
    /// Exported JSON file; omit or pass `-` to read standard input.
    #[arg(value_name = "LLN_JSON")]
    input: Option<PathBuf>,

    /// Dump every card's fields to stderr.
    #[arg(short = 'v', long = "verbose", default_value_t = false)]
    verbose: bool,

    /// Write media here instead of the Anki profile's collection.media.
    #[arg(long = "media-dir", env = "LLN_ANKI_MEDIA_DIR")]
    media_dir: Option<PathBuf>,

    /// Anki profile whose media directory is used by default.
    #[arg(long = "profile", env = "LLN_ANKI_PROFILE", default_value = DEFAULT_PROFILE)]
    profile: String,
}
