use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::builders::reporter::ReportFormat;
use crate::builders::typescript::TypescriptConfig;
use crate::builders::webpack::WebpackConfig;
use crate::core::config::{
    ConfigProvider, OptionsFile, OptionsFormat, export_config, merge_overrides,
};
use crate::core::engine::{OptionEngine, OptionSchema, SetOptionsReport, SetterOutcome};
use crate::core::option::{OptionRuleSet, RawOptions, ValidationMode};

/// The conventional setter name for an option: `outDir` becomes `setOutDir`.
pub fn setter_name(option: &str) -> String {
    let mut chars = option.chars();
    match chars.next() {
        Some(first) => format!("set{}{}", first.to_uppercase(), chars.as_str()),
        None => "set".to_string(),
    }
}

/// Calls `set` with the string inside `value`, or reports the type mismatch.
pub fn set_string(value: &Value, set: impl FnOnce(String)) -> SetterOutcome {
    match value.as_str() {
        Some(s) => {
            set(s.to_string());
            SetterOutcome::Applied
        }
        None => SetterOutcome::Incompatible { expected: "string" },
    }
}

/// Calls `set` with the boolean inside `value`, or reports the type mismatch.
pub fn set_bool(value: &Value, set: impl FnOnce(bool)) -> SetterOutcome {
    match value.as_bool() {
        Some(b) => {
            set(b);
            SetterOutcome::Applied
        }
        None => SetterOutcome::Incompatible { expected: "boolean" },
    }
}

/// Installs the global log subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// The configuration models the command line knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Target {
    Typescript,
    Webpack,
}

impl Target {
    pub fn name(self) -> &'static str {
        match self {
            Target::Typescript => "typescript",
            Target::Webpack => "webpack",
        }
    }

    pub fn rules(self) -> OptionRuleSet {
        match self {
            Target::Typescript => TypescriptConfig::option_rules(),
            Target::Webpack => WebpackConfig::option_rules(),
        }
    }
}

/// Where options come from and how they are validated.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SourceArgs {
    /// Read options from this top-level section of the file
    #[arg(short, long)]
    pub section: Option<String>,

    /// Override an option, e.g. `--set outDir=dist` (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Only validate the options that are present
    #[arg(long)]
    pub patch: bool,
}

impl SourceArgs {
    pub fn mode(&self) -> ValidationMode {
        ValidationMode::from_patch(self.patch)
    }
}

/// Reads `file` and layers the command-line overrides over it.
pub fn load_input(file: &Path, source: &SourceArgs) -> Result<RawOptions> {
    let mut options_file = OptionsFile::new(file);
    if let Some(section) = &source.section {
        options_file = options_file.with_section(section);
    }

    let mut options = options_file
        .load_options()
        .with_context(|| format!("Failed to load options from {}", file.display()))?;
    merge_overrides(&mut options, &source.overrides).context("Failed to apply overrides")?;
    Ok(options)
}

/// Runs the engine for model `M` over `input`.
pub fn process<M: OptionSchema>(
    input: &RawOptions,
    mode: ValidationMode,
) -> (SetOptionsReport, M) {
    let mut engine = OptionEngine::<M>::from_schema();
    let report = engine.set_options_report(input, mode);
    (report, engine.into_config())
}

fn report_for(target: Target, input: &RawOptions, mode: ValidationMode) -> SetOptionsReport {
    match target {
        Target::Typescript => process::<TypescriptConfig>(input, mode).0,
        Target::Webpack => process::<WebpackConfig>(input, mode).0,
    }
}

/// `check`: validate a file and print the report. Fails when any option has errors.
pub fn check_options(
    file: PathBuf,
    target: Target,
    source: SourceArgs,
    format: ReportFormat,
    verbose: bool,
) -> Result<()> {
    let input = load_input(&file, &source)?;
    let report = report_for(target, &input, source.mode());

    let rendered = format.reporter(verbose).render(target.name(), &report)?;
    println!("{rendered}");

    if report.has_errors() {
        anyhow::bail!("Option validation failed.");
    }
    info!(model = target.name(), "options are valid");
    Ok(())
}

/// `rules`: print the rule set of a target.
pub fn list_rules(target: Target) -> Result<()> {
    let rules = target.rules();
    println!("📜 Rules for {} ({} options)", target.name(), rules.len());
    for rule in rules.describe() {
        let requirement = if rule.required { "required" } else { "optional" };
        let validators = if rule.validators.is_empty() {
            "-".to_string()
        } else {
            rule.validators.join(", ")
        };
        println!("  {:<16} {:<9} {}", rule.name, requirement, validators);
    }
    Ok(())
}

/// `show`: apply a file to a fresh model and print the resulting configuration.
pub fn show_config(
    file: PathBuf,
    target: Target,
    source: SourceArgs,
    export: OptionsFormat,
) -> Result<()> {
    let input = load_input(&file, &source)?;
    let mode = source.mode();

    let (report, content) = match target {
        Target::Typescript => {
            let (report, config) = process::<TypescriptConfig>(&input, mode);
            (report, export_config(&config, export)?)
        }
        Target::Webpack => {
            let (report, config) = process::<WebpackConfig>(&input, mode);
            (report, export_config(&config, export)?)
        }
    };

    for result in report.results.iter().filter(|r| !r.is_ok()) {
        eprintln!("⚠️  {}: {}", result.name, result.errors.join("; "));
    }
    println!("{content}");
    Ok(())
}
