use std::path::PathBuf;

use clap::{Parser, Subcommand};
use listening_survey::TestKind;

#[derive(Parser, Debug)]
#[command(name = "listening-survey")]
#[command(about = "Take and review listening-test questionnaires in the terminal")]
pub struct Cli {
    /// Configuration file (defaults to ./survey.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Stay on the page after submitting and show the recorded answers
    #[arg(long, global = true)]
    pub no_redirect: bool,

    /// Plain prompts without colors
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Take a stored test and save the response
    Take {
        /// Test kind (ab-test or acr-test)
        kind: TestKind,
        /// Test id
        id: String,
    },
    /// Walk through a submitted response without changing it
    Review {
        /// Response file written by `take`
        file: PathBuf,
    },
    /// Validate every item of a stored test as if it were submitted
    Check {
        /// Test kind (ab-test or acr-test)
        kind: TestKind,
        /// Test id
        id: String,
    },
}
