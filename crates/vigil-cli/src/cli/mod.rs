use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `vigil` binary.
#[derive(Debug, Parser)]
#[command(name = "vigil", version, about = "Vigil - invariant validation gate")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root path (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub project: Option<String>,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            project: self.project.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat};
    use crate::cli::root_commands::FailurePolicy;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn check_defaults_to_prompting() {
        let cli = Cli::try_parse_from(["vigil", "check"]).expect("cli should parse");
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.on_failure, FailurePolicy::Prompt);
        assert!(args.scene.is_none());
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "vigil",
            "check",
            "--on-failure",
            "continue",
            "--format",
            "raw",
            "--project",
            "/tmp/demo",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert_eq!(cli.global_flags().project.as_deref(), Some("/tmp/demo"));
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.on_failure, FailurePolicy::Continue);
    }

    #[test]
    fn unknown_failure_policy_is_rejected() {
        assert!(Cli::try_parse_from(["vigil", "check", "--on-failure", "retry"]).is_err());
    }
}
