//! Stylesheet system for reusable attribute presets
//!
//! A stylesheet maps preset names to attribute tables, loaded from TOML.
//! Presets keep recurring style attributes (stroke, fill, fonts) out of
//! call sites: resolve a preset to an [`Attrs`] set and pass it as the
//! extras of any shape call.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::attrs::Attrs;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("failed to read stylesheet file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse stylesheet TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A collection of named attribute presets.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    styles: BTreeMap<String, BTreeMap<String, toml::Value>>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStyleSheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    styles: BTreeMap<String, BTreeMap<String, toml::Value>>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

impl StyleSheet {
    /// Load a stylesheet from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a stylesheet from a TOML string
    ///
    /// ```
    /// use svg_scribe::StyleSheet;
    ///
    /// let sheet = StyleSheet::from_str(r##"
    /// [styles.axis]
    /// stroke = "#333"
    /// stroke_width = 1.5
    /// "##).unwrap();
    /// let attrs = sheet.attrs("axis").unwrap();
    /// assert_eq!(attrs.get("stroke-width"), Some("1.5"));
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStyleSheet = toml::from_str(content)?;

        Ok(StyleSheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            styles: parsed.styles,
        })
    }

    /// Resolve a preset to an attribute set.
    ///
    /// Keys go through the usual underscore-to-hyphen normalization, in
    /// alphabetical key order. Returns None if the preset is not defined.
    pub fn attrs(&self, preset: &str) -> Option<Attrs> {
        self.styles.get(preset).map(|table| {
            let mut attrs = Attrs::new();
            for (key, value) in table {
                match value {
                    toml::Value::String(s) => attrs.insert(key, s),
                    other => attrs.insert(key, other),
                }
            }
            attrs
        })
    }

    /// Names of all presets in this stylesheet.
    pub fn preset_names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(|k| k.as_str())
    }
}
