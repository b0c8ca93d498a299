use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Validate the project and attempt to enter the running state.
    Check(CheckArgs),
    /// Write default validation settings.
    Init,
    /// Print the validation and monitor settings in effect.
    Settings,
}

/// What to do when validation fails or settings are missing.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum FailurePolicy {
    /// Ask on stdin.
    Prompt,
    Abort,
    Continue,
}

#[derive(Clone, Debug, Args)]
pub struct CheckArgs {
    #[arg(long, value_enum, default_value = "prompt")]
    pub on_failure: FailurePolicy,

    /// Scene file (defaults to .vigil/scene.json)
    #[arg(long)]
    pub scene: Option<PathBuf>,
}
