use serde::Serialize;
use serde_json::Value;

use crate::builders::validator::Validator;
use crate::core::engine::{ConfigModel, OptionSchema, SetterOutcome};
use crate::core::option::{OptionRule, OptionRuleSet};
use crate::utils::{set_bool, set_string};

/// Settings for a TypeScript compile run.
///
/// `project_source` and `node_package_ts` are not options: the owning builder
/// fills them in from its own environment through `OptionEngine::config_mut`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypescriptConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    out_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tsconfig: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    watch: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    node_package_ts: Option<String>,
}

impl TypescriptConfig {
    pub fn out_dir(&self) -> Option<&str> {
        self.out_dir.as_deref()
    }

    pub fn set_out_dir(&mut self, out_dir: impl Into<String>) {
        self.out_dir = Some(out_dir.into());
    }

    pub fn tsconfig(&self) -> Option<&str> {
        self.tsconfig.as_deref()
    }

    pub fn set_tsconfig(&mut self, tsconfig: impl Into<String>) {
        self.tsconfig = Some(tsconfig.into());
    }

    pub fn source_root(&self) -> Option<&str> {
        self.source_root.as_deref()
    }

    pub fn set_source_root(&mut self, source_root: impl Into<String>) {
        self.source_root = Some(source_root.into());
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn set_target(&mut self, target: impl Into<String>) {
        self.target = Some(target.into());
    }

    pub fn watch(&self) -> bool {
        self.watch
    }

    pub fn set_watch(&mut self, watch: bool) {
        self.watch = watch;
    }

    pub fn project_source(&self) -> Option<&str> {
        self.project_source.as_deref()
    }

    pub fn set_project_source(&mut self, project_source: impl Into<String>) {
        self.project_source = Some(project_source.into());
    }

    pub fn node_package_ts(&self) -> Option<&str> {
        self.node_package_ts.as_deref()
    }

    pub fn set_node_package_ts(&mut self, node_package_ts: impl Into<String>) {
        self.node_package_ts = Some(node_package_ts.into());
    }
}

impl ConfigModel for TypescriptConfig {
    fn set_option(&mut self, option: &str, value: &Value) -> SetterOutcome {
        match option {
            "outDir" => set_string(value, |v| self.set_out_dir(v)),
            "tsconfig" => set_string(value, |v| self.set_tsconfig(v)),
            "sourceRoot" => set_string(value, |v| self.set_source_root(v)),
            "target" => set_string(value, |v| self.set_target(v)),
            "watch" => set_bool(value, |v| self.set_watch(v)),
            _ => SetterOutcome::SetterAbsent,
        }
    }
}

impl OptionSchema for TypescriptConfig {
    fn option_rules() -> OptionRuleSet {
        OptionRuleSet::new()
            .rule(
                "outDir",
                OptionRule::required()
                    .with(Validator::IsString)
                    .with(Validator::NotEmpty),
            )
            .rule("tsconfig", OptionRule::optional().with(Validator::IsString))
            .rule("sourceRoot", OptionRule::optional().with(Validator::IsString))
            .rule(
                "target",
                OptionRule::optional().with(Validator::one_of([
                    "es5", "es2015", "es2017", "es2020", "esnext",
                ])),
            )
            .rule("watch", OptionRule::optional().with(Validator::IsBool))
    }

    fn initial() -> Self {
        Self::default()
    }
}
