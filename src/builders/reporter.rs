use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::engine::{ApplyOutcome, SetOptionsReport};
use crate::core::option::OptionResult;

/// Output format for option reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Renders the outcome of one `set_options` call for a user.
pub trait ResultReporter {
    fn render(&self, target: &str, report: &SetOptionsReport) -> Result<String>;
}

/// Human-readable report with one line per option and a summary.
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Formats the status line for a single option.
    ///
    /// 🔴 option failed validation, 🟢 option was applied, ⚪ option was
    /// accepted without a value, 🟡 option was accepted but the model did not
    /// take the value.
    pub fn format_result(&self, result: &OptionResult, outcome: Option<ApplyOutcome>) -> String {
        if !result.is_ok() {
            let mut line = format!("🔴 {}", result.name);
            for error in &result.errors {
                line.push_str(&format!("\n  └─ {error}"));
            }
            return line;
        }

        match outcome {
            Some(ApplyOutcome::Applied) => format!("🟢 {}", result.name),
            Some(ApplyOutcome::SetterAbsent) => {
                format!("🟡 {} (accepted, no setter on model)", result.name)
            }
            Some(ApplyOutcome::Incompatible { expected }) => {
                format!("🟡 {} (accepted, model expects a {expected})", result.name)
            }
            Some(ApplyOutcome::NotSupplied) | None => format!("⚪ {} (not set)", result.name),
            Some(ApplyOutcome::Skipped) => format!("🔴 {}", result.name),
        }
    }
}

impl ResultReporter for ConsoleReporter {
    fn render(&self, target: &str, report: &SetOptionsReport) -> Result<String> {
        let title = format!("📋 Option Report: {target}");
        let mut lines = vec![title.clone(), "=".repeat(title.chars().count())];

        if report.results.is_empty() {
            lines.push("No options evaluated.".to_string());
        }

        for result in &report.results {
            let outcome = report.outcome(&result.name);
            if !self.verbose && result.is_ok() && outcome == Some(ApplyOutcome::NotSupplied) {
                continue;
            }
            lines.push(self.format_result(result, outcome));
        }

        if !report.dropped.is_empty() {
            lines.push(format!(
                "\n⚠️  Ignored unknown options: {}",
                report.dropped.join(", ")
            ));
        }

        let failed = report.results.iter().filter(|r| !r.is_ok()).count();
        let applied = report
            .applied
            .iter()
            .filter(|a| a.outcome == ApplyOutcome::Applied)
            .count();

        lines.push("\n📈 Summary:".to_string());
        lines.push(format!("  Options evaluated: {}", report.results.len()));
        lines.push(format!("  Options applied: {applied}"));
        lines.push(format!("  Options failed: {failed}"));

        Ok(lines.join("\n"))
    }
}

/// Machine-readable report: the full `SetOptionsReport` as pretty JSON.
pub struct JsonReporter;

#[derive(Serialize)]
struct JsonReport<'a> {
    target: &'a str,
    ok: bool,
    #[serde(flatten)]
    report: &'a SetOptionsReport,
}

impl ResultReporter for JsonReporter {
    fn render(&self, target: &str, report: &SetOptionsReport) -> Result<String> {
        let document = JsonReport {
            target,
            ok: !report.has_errors(),
            report,
        };
        serde_json::to_string_pretty(&document).context("Failed to serialize option report")
    }
}

impl ReportFormat {
    pub fn reporter(self, verbose: bool) -> Box<dyn ResultReporter> {
        match self {
            ReportFormat::Text => Box::new(ConsoleReporter::new(verbose)),
            ReportFormat::Json => Box::new(JsonReporter),
        }
    }
}
