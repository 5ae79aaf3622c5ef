// This file is the module declaration file for the `core` module.
// It declares the submodules that make up the option engine itself and
// exposes them to the rest of the crate.

// `option` module:
// The data model of the engine: `OptionRule` and `OptionRuleSet` describe which
// options a configuration model accepts, `ValidationResult` and `OptionResult`
// carry validation outcomes, and `RawOptions` is the untyped input.
pub mod option;

// `engine` module:
// The clean -> validate -> apply pipeline. It defines the `ConfigModel` trait
// that configuration models implement to expose their setters, the
// `OptionSchema` factory trait, and `OptionEngine`, which owns one rule set and
// one model for its whole lifetime.
pub mod engine;

// `config` module:
// Loading raw options from JSON, YAML or TOML files (`ConfigProvider`,
// `OptionsFile`), `KEY=VALUE` overrides from the command line, and exporting a
// configured model back to one of those formats.
pub mod config;
