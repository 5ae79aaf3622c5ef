use serde::Serialize;
use serde_json::Value;

use crate::builders::validator::Validator;
use crate::core::engine::{ConfigModel, OptionSchema, SetterOutcome};
use crate::core::option::{OptionRule, OptionRuleSet};
use crate::utils::set_string;

/// Settings for bundling an extension with webpack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebpackConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    loader_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    out_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    out_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tsconfig: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    config_root: Option<String>,
}

impl WebpackConfig {
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn set_context(&mut self, context: impl Into<String>) {
        self.context = Some(context.into());
    }

    pub fn entry(&self) -> Option<&str> {
        self.entry.as_deref()
    }

    pub fn set_entry(&mut self, entry: impl Into<String>) {
        self.entry = Some(entry.into());
    }

    pub fn loader_context(&self) -> Option<&str> {
        self.loader_context.as_deref()
    }

    pub fn set_loader_context(&mut self, loader_context: impl Into<String>) {
        self.loader_context = Some(loader_context.into());
    }

    pub fn out_dir(&self) -> Option<&str> {
        self.out_dir.as_deref()
    }

    pub fn set_out_dir(&mut self, out_dir: impl Into<String>) {
        self.out_dir = Some(out_dir.into());
    }

    pub fn out_file(&self) -> Option<&str> {
        self.out_file.as_deref()
    }

    pub fn set_out_file(&mut self, out_file: impl Into<String>) {
        self.out_file = Some(out_file.into());
    }

    pub fn tsconfig(&self) -> Option<&str> {
        self.tsconfig.as_deref()
    }

    pub fn set_tsconfig(&mut self, tsconfig: impl Into<String>) {
        self.tsconfig = Some(tsconfig.into());
    }

    pub fn config_root(&self) -> Option<&str> {
        self.config_root.as_deref()
    }

    pub fn set_config_root(&mut self, config_root: impl Into<String>) {
        self.config_root = Some(config_root.into());
    }
}

impl ConfigModel for WebpackConfig {
    fn set_option(&mut self, option: &str, value: &Value) -> SetterOutcome {
        match option {
            "context" => set_string(value, |v| self.set_context(v)),
            "entry" => set_string(value, |v| self.set_entry(v)),
            "loaderContext" => set_string(value, |v| self.set_loader_context(v)),
            "outDir" => set_string(value, |v| self.set_out_dir(v)),
            "outFile" => set_string(value, |v| self.set_out_file(v)),
            "tsconfig" => set_string(value, |v| self.set_tsconfig(v)),
            "configRoot" => set_string(value, |v| self.set_config_root(v)),
            _ => SetterOutcome::SetterAbsent,
        }
    }
}

impl OptionSchema for WebpackConfig {
    fn option_rules() -> OptionRuleSet {
        let path = || OptionRule::optional().with(Validator::IsString);
        let required_path = || {
            OptionRule::required()
                .with(Validator::IsString)
                .with(Validator::NotEmpty)
        };

        OptionRuleSet::new()
            .rule("context", path())
            .rule("entry", required_path())
            .rule("loaderContext", path())
            .rule("outDir", required_path())
            .rule("outFile", path().with(Validator::NotEmpty))
            .rule("tsconfig", path())
            .rule("configRoot", path())
    }

    fn initial() -> Self {
        Self::default()
    }
}
