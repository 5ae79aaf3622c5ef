//! Validates builder options before a build runs.
//! Option files come from editor settings, project files or the command
//! line and routinely carry keys a given builder does not know about.
//! Those are dropped, the rest is checked against the builder's rules,
//! and only the options that pass are written to its configuration.
use anyhow::Result;
use clap::{Parser, Subcommand};
use option_engine::builders::reporter::ReportFormat;
use option_engine::core::config::OptionsFormat;
use option_engine::utils::{self, SourceArgs, Target};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "option-engine")]
#[command(about = "Validate builder options and apply them to a configuration model")]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an options file against a target's rules
    Check {
        /// Options file (.json, .yaml, .yml or .toml)
        file: PathBuf,
        #[arg(short, long, value_enum)]
        target: Target,
        #[command(flatten)]
        source: SourceArgs,
        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
    /// List the options a target accepts
    Rules {
        #[arg(short, long, value_enum)]
        target: Target,
    },
    /// Apply an options file and print the resulting configuration
    Show {
        file: PathBuf,
        #[arg(short, long, value_enum)]
        target: Target,
        #[command(flatten)]
        source: SourceArgs,
        /// Output format of the configuration
        #[arg(long, value_enum, default_value_t = OptionsFormat::Json)]
        export: OptionsFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);

    match cli.command {
        Commands::Check {
            file,
            target,
            source,
            format,
        } => utils::check_options(file, target, source, format, cli.verbose),
        Commands::Rules { target } => utils::list_rules(target),
        Commands::Show {
            file,
            target,
            source,
            export,
        } => utils::show_config(file, target, source, export),
    }
}
