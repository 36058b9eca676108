use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI definition for the `touchkit` boilerplate generators.
#[derive(Parser, Debug)]
#[command(
    name = "touchkit",
    version,
    propagate_version = true,
    about = "Boilerplate file generators and a meme player"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate templated C header files with include guards.
    Header(TouchArgs),
    /// Generate a templated GNU Makefile for a C project.
    Makefile(TouchArgs),
    /// Touch templated Python files into existence.
    Py(TouchArgs),
    /// Create a templated C project folder with src, lib and include.
    Project(TouchArgs),
    /// Play a random video from a directory.
    Meme(MemeArgs),
}

/// Shared argument shape for the file-touching subcommands.
#[derive(Args, Debug)]
pub struct TouchArgs {
    /// Enumerate every created file in the final summary.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Names of the files or projects to create.
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,
}

#[derive(Args, Debug)]
pub struct MemeArgs {
    /// Use a specific video player instead of the first one found.
    #[arg(short = 'p', long = "player")]
    pub player: Option<String>,

    /// Replay the most recently played video.
    #[arg(short = 'r', long = "replay")]
    pub replay: bool,

    /// Directory to pull videos from (default: ~/Videos/memes).
    #[arg(value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

/// Helper entry point so `main` can stay minimal.
pub fn parse() -> Cli {
    Cli::parse()
}
