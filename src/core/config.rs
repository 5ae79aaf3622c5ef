use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::builders::validator::kind;
use crate::core::option::RawOptions;

/// Errors raised while reading options or exporting a model.
///
/// The engine itself never fails; these only come from the file layer.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read options file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported options file extension: {0}")]
    UnsupportedFormat(String),

    #[error("failed to parse {format} options: {message}")]
    Parse {
        format: OptionsFormat,
        message: String,
    },

    #[error("section `{0}` not found in options file")]
    MissingSection(String),

    #[error("options must be a mapping, found {0}")]
    NotAMapping(&'static str),

    #[error("invalid override `{0}`, expected KEY=VALUE")]
    InvalidOverride(String),

    #[error("failed to export configuration as {format}: {message}")]
    Export {
        format: OptionsFormat,
        message: String,
    },
}

/// Serialization formats accepted for options files and model export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OptionsFormat {
    Json,
    Yaml,
    Toml,
}

impl OptionsFormat {
    /// Picks the format from a file extension (`json`, `yaml`/`yml`, `toml`).
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "json" => Ok(OptionsFormat::Json),
            "yaml" | "yml" => Ok(OptionsFormat::Yaml),
            "toml" => Ok(OptionsFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn parse(self, content: &str) -> Result<Value, ConfigError> {
        let parsed: Result<Value, String> = match self {
            OptionsFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            OptionsFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            OptionsFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| ConfigError::Parse {
            format: self,
            message,
        })
    }
}

impl fmt::Display for OptionsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsFormat::Json => write!(f, "json"),
            OptionsFormat::Yaml => write!(f, "yaml"),
            OptionsFormat::Toml => write!(f, "toml"),
        }
    }
}

/// A source of raw, unvalidated options.
pub trait ConfigProvider {
    fn load_options(&self) -> Result<RawOptions, ConfigError>;
}

/// Options read from a JSON, YAML or TOML file, optionally from one
/// top-level section of it.
#[derive(Debug, Clone)]
pub struct OptionsFile {
    path: PathBuf,
    section: Option<String>,
    format: Option<OptionsFormat>,
}

impl OptionsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            section: None,
            format: None,
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Overrides the format otherwise taken from the file extension.
    pub fn with_format(mut self, format: OptionsFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigProvider for OptionsFile {
    fn load_options(&self) -> Result<RawOptions, ConfigError> {
        let format = match self.format {
            Some(format) => format,
            None => OptionsFormat::from_path(&self.path)?,
        };
        debug!(path = %self.path.display(), %format, section = ?self.section, "loading options");

        let content = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        let document = format.parse(&content)?;
        let document = match &self.section {
            Some(section) => match document {
                Value::Object(mut map) => map
                    .remove(section)
                    .ok_or_else(|| ConfigError::MissingSection(section.clone()))?,
                _ => return Err(ConfigError::MissingSection(section.clone())),
            },
            None => document,
        };

        into_raw_options(document)
    }
}

/// Turns a parsed document into raw options. An empty document is no options.
pub fn into_raw_options(document: Value) -> Result<RawOptions, ConfigError> {
    match document {
        Value::Object(map) => Ok(map.into_iter().collect()),
        Value::Null => Ok(RawOptions::new()),
        other => Err(ConfigError::NotAMapping(kind(&other))),
    }
}

/// Parses a `KEY=VALUE` override.
///
/// The value is read as JSON when it parses as JSON (`true`, `3`, `["a"]`),
/// otherwise it is kept as a plain string.
pub fn parse_override(assignment: &str) -> Result<(String, Value), ConfigError> {
    let (key, raw) = assignment
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidOverride(assignment.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ConfigError::InvalidOverride(assignment.to_string()));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Applies `KEY=VALUE` overrides on top of `options`; later entries win.
pub fn merge_overrides<S: AsRef<str>>(
    options: &mut RawOptions,
    overrides: &[S],
) -> Result<(), ConfigError> {
    for assignment in overrides {
        let (key, value) = parse_override(assignment.as_ref())?;
        options.insert(key, value);
    }
    Ok(())
}

/// Serializes a configuration model in the requested format.
pub fn export_config<T: Serialize>(
    config: &T,
    format: OptionsFormat,
) -> Result<String, ConfigError> {
    let exported = match format {
        OptionsFormat::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
        OptionsFormat::Yaml => serde_yaml::to_string(config).map_err(|e| e.to_string()),
        OptionsFormat::Toml => toml::to_string_pretty(config).map_err(|e| e.to_string()),
    };
    exported.map_err(|message| ConfigError::Export { format, message })
}
