mod app;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "flashcards", about = "Interactive flashcard trainer", version)]
struct Cli {
    /// Load cards from this file before the session starts
    #[arg(long, value_name = "FILE")]
    import: Option<PathBuf>,

    /// Save cards to this file when the session ends
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Configuration file (default: <config dir>/flashcards/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for the quiz's random card picks
    #[arg(long)]
    seed: Option<u64>,

    /// Skip malformed lines when importing instead of rejecting the file
    #[arg(long)]
    skip_malformed: bool,
}

/// Accept the single-dash `-import`/`-export` spellings as well
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-import") => OsString::from("--import"),
            Some("-export") => OsString::from("--export"),
            _ => arg,
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    let app = app::App::new(&cli)?;
    app.run()
}
