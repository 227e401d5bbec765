//! Shared configuration loader for groovy-fmt.
//!
//! `defaults/groovy-fmt.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. Callers layer project files and command-line values
//! on top of those defaults via [`Loader`] before deserializing into [`FmtConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use groovy_printer::FormatOptions;
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/groovy-fmt.default.toml");

/// Name of the project file looked up in the working directory.
pub const PROJECT_FILE: &str = "groovy-fmt.toml";

/// Top-level configuration consumed by groovy-fmt.
#[derive(Debug, Clone, Deserialize)]
pub struct FmtConfig {
    pub format: FormatSection,
    pub files: FilesSection,
}

/// Layout knobs, forwarded to the renderer untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatSection {
    pub print_width: usize,
    pub indent_width: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilesSection {
    pub extensions: Vec<String>,
}

impl FmtConfig {
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            print_width: self.format.print_width,
            indent_width: self.format.indent_width,
        }
    }

    /// True if `path` has one of the configured extensions (case-insensitive).
    pub fn matches_extension(&self, path: &Path) -> bool {
        let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };
        self.files
            .extensions
            .iter()
            .any(|claimed| claimed.eq_ignore_ascii_case(extension))
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for command-line settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<FmtConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<FmtConfig, ConfigError> {
    Loader::new().build()
}
