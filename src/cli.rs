// SPDX-License-Identifier: Apache-2.0

//! Drives the command-line program.

use crate::classify::Classifier;
use crate::clock::SystemClock;
use crate::reddit::{self, Fetcher, InvalidUrl};
use crate::report;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use log::info;
use std::path::PathBuf;
use std::process;
use thiserror::Error;

pub fn die(error_code: i32, message: &str) {
    eprintln!("{}", message);
    process::exit(error_code);
}

/// Program configuration.
#[derive(Debug, Parser)]
#[command(version)]
#[command(about = "Sketches a cited persona of a Redditor from their public posting history", long_about = None)]
pub struct Config {
    /// Reddit user profile URL (e.g., https://www.reddit.com/user/spez)
    profile_url: String,

    /// Output file path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Maximum number of posts and comments to analyze
    #[arg(short, long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,

    #[command(flatten)]
    verbosity: Verbosity,
}

impl Config {
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn profile_url(&self) -> &str {
        &self.profile_url
    }

    pub fn limit(&self) -> usize {
        self.limit as usize
    }

    /// The output path, defaulting to `<username>_persona.txt` in the
    /// current directory.
    pub fn output(&self, username: &str) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{username}_persona.txt")))
    }
}

/// An error anywhere in the fetch, classify, render, write pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidUrl(#[from] InvalidUrl),

    #[error(transparent)]
    Fetch(#[from] reddit::client::Error),

    #[error(transparent)]
    Report(#[from] report::Error),
}

/// Runs the command-line program.
pub fn run(config: Config) {
    env_logger::Builder::new()
        .filter_level(config.verbosity().log_level_filter())
        .init();

    match Runner::new(config).and_then(|runner| runner.run()) {
        Ok(path) => println!("Report written to {}", path.display()),
        Err(err) => die(1, &format!("Error: {err}")),
    }
}

/// Runs the pipeline for one profile URL.
#[derive(Debug)]
pub struct Runner {
    config: Config,
    username: String,
}

impl Runner {
    /// Creates a new program runner using the given `config`.
    ///
    /// Fails if a username cannot be extracted from the profile URL.
    pub fn new(config: Config) -> Result<Runner, Error> {
        let username = reddit::extract_username(config.profile_url())?;
        Ok(Self { config, username })
    }

    /// Fetches, classifies, renders, and writes; returns the path the
    /// report was written to.
    ///
    /// If any step fails, no report file is produced.
    pub fn run(&self) -> Result<PathBuf, Error> {
        info!("analyzing u/{}", self.username);

        let items = Fetcher::new().fetch(&self.username, self.config.limit())?;
        info!("fetched {} items", items.len());

        let persona = Classifier::new().classify(&self.username, &items);

        let text = report::render(&persona, self.config.profile_url(), &SystemClock);
        let path = self.config.output(&self.username);
        report::write(&path, &text)?;

        Ok(path)
    }
}
