use clap::{Parser, Subcommand};

use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(
    propagate_version = true,
    infer_long_args = true,
    infer_subcommands = true,
    flatten_help = true
)]
#[command(help_template = HELP_TEMPLATE)]
pub struct Options {
    // `run` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
    #[command(flatten)]
    pub common: CommonOptions,
}

#[derive(Clone, Debug, Parser)]
pub struct CommonOptions {
    /// Path to settings file
    ///
    /// Environment variables prefixed with `EXPIRE_` override values from
    /// this file.
    #[arg(global = true, short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log level (will be overridden by --log-level).
    #[arg(global = true, short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log level of this program.
    #[arg(global = true, long, value_name = "LEVEL")]
    pub log_level: Option<log::LevelFilter>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    Run(RunOptions),
    /// Validate and print the configuration
    Validate,
    /// Print an example configuration file
    ExampleConfig,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run(RunOptions::default())
    }
}

#[derive(Clone, Debug, Default, Parser)]
#[command(about = "Prune expired files and empty directories periodically")]
pub struct RunOptions {
    /// Run a single cycle and exit.
    #[arg(long)]
    pub once: bool,

    /// Do not output statistic data after each cycle.
    #[arg(long)]
    pub no_statistic: bool,

    /// Do not remove anything.
    #[arg(long)]
    pub dry_run: bool,
}
