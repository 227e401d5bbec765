//! Format registry for format discovery and selection
//!
//! Formats are registered under their name and can be looked up by name or by the
//! extension of the file being formatted.

use crate::error::FormatError;
use crate::format::Format;
use crate::render::FormatOptions;
use std::collections::HashMap;
use std::path::Path;

/// Registry of source formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::with_defaults();
///
/// let format = registry.for_path(Path::new("build.gradle"))?;
/// let output = format.format("apply plugin: 'java'", &FormatOptions::default())?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Find the format claiming the extension of `path`. Extensions compare case-insensitively.
    pub fn for_path(&self, path: &Path) -> Result<&dyn Format, FormatError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        let mut names: Vec<_> = self.formats.keys().collect();
        names.sort();
        names
            .into_iter()
            .filter_map(|name| self.formats.get(name))
            .find(|format| {
                format
                    .extensions()
                    .iter()
                    .any(|claimed| claimed.eq_ignore_ascii_case(extension))
            })
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::UnsupportedExtension(extension.to_string()))
    }

    /// Format source text using the specified format
    pub fn format(
        &self,
        source: &str,
        format: &str,
        options: &FormatOptions,
    ) -> Result<String, FormatError> {
        self.get(format)?.format(source, options)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(crate::formats::groovy::GroovyFormat);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
