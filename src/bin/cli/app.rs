use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use flashcards_lib::{MalformedLines, Session, TrainerConfig};

use crate::Cli;

/// Resolved settings for one trainer run
pub struct App {
    pub import: Option<PathBuf>,
    pub export: Option<PathBuf>,
    pub seed: Option<u64>,
    pub malformed: MalformedLines,
}

impl App {
    /// Merge the config file with command-line flags (flags win)
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = TrainerConfig::resolve(cli.config.as_deref())
            .context("Failed to load configuration")?;

        let malformed = if cli.skip_malformed {
            MalformedLines::Skip
        } else {
            config.malformed_lines()
        };

        Ok(Self {
            import: cli.import.clone().or(config.import),
            export: cli.export.clone().or(config.export),
            seed: cli.seed.or(config.seed),
            malformed,
        })
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => {
                log::info!("Using fixed quiz seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        }
    }

    /// Run against the terminal
    pub fn run(&self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Import, run the interactive loop, then export
    pub fn run_with<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<()> {
        let mut session =
            Session::new(input, output, self.rng()).with_malformed_lines(self.malformed);

        if let Some(path) = &self.import {
            session
                .import_file(path)
                .context("Failed to report startup import")?;
        }

        session.run().context("Session aborted")?;

        if let Some(path) = &self.export {
            session
                .export_file(path)
                .context("Failed to report shutdown export")?;
        }

        Ok(())
    }
}
