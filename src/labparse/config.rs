//! Configuration
//!
//! Settings come in three layers, later ones winning:
//! 1. `defaults/labparse.default.toml`, compiled into the library
//! 2. a TOML file (`--config`, or `labparse.toml` in the working directory)
//! 3. single keys set from command-line flags
//!
//! [`Loader`] stacks the layers and deserializes the result into [`LabparseConfig`].

use crate::labparse::formats::OutputFormat;
use crate::labparse::language::Language;
use crate::labparse::lexing::LineCounting;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/labparse.default.toml");

/// Which language to analyze and how to print the result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LabparseConfig {
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

/// Language selection and position counting for the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalysisConfig {
    pub language: Language,
    pub line_counting: LineCounting,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub show_tokens: bool,
}

/// Stacks configuration layers on top of the compiled-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// A loader holding only the compiled-in layer.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Stack a TOML file that must exist; `build` fails otherwise.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Stack a TOML file if it exists.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Set one dotted key, e.g. `analysis.language`, above every file layer.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers. Unknown languages or formats are rejected here.
    pub fn build(self) -> Result<LabparseConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The compiled-in settings alone.
pub fn load_defaults() -> Result<LabparseConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.analysis.language, Language::Imperative);
        assert_eq!(config.analysis.line_counting, LineCounting::NonBlank);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.show_tokens);
    }

    #[test]
    fn test_supports_overrides() {
        let config = Loader::new()
            .set_override("analysis.language", "boolean")
            .expect("override to apply")
            .set_override("output.show_tokens", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.analysis.language, Language::Boolean);
        assert!(!config.output.show_tokens);
    }

    #[test]
    fn test_rejects_unknown_language() {
        let result = Loader::new()
            .set_override("analysis.language", "pascal")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/labparse.toml")
            .build()
            .expect("config to build");
        assert_eq!(config, load_defaults().unwrap());
    }

    #[test]
    fn test_file_layer_overrides_defaults_and_flags_override_file() {
        let path = std::env::temp_dir().join(format!("labparse-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[analysis]\nlanguage = \"boolean\"\n\n[output]\nformat = \"json\"\n")
            .unwrap();
        let config = Loader::new()
            .with_file(&path)
            .set_override("output.format", "yaml")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.analysis.language, Language::Boolean);
        assert_eq!(config.analysis.line_counting, LineCounting::NonBlank);
        assert_eq!(config.output.format, OutputFormat::Yaml);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_required_file_fails() {
        let result = Loader::new()
            .with_file("/nonexistent/labparse.toml")
            .build();
        assert!(result.is_err());
    }
}
