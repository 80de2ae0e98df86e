//! Parser and printer configuration.
//!
//! ```
//! use qop_asm::{AccessorStyle, AsmConfig};
//!
//! let config = AsmConfig::from_json(r#"{ "accessor_style": "spaced" }"#).unwrap();
//! assert_eq!(config.namespace, "qop");
//! assert_eq!(config.accessor_style, AccessorStyle::Spaced);
//!
//! let custom = AsmConfig::new().with_namespace("quantum");
//! assert_eq!(custom.op_name("cx"), "quantum.cx");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid operation namespace '{0}'")]
    InvalidNamespace(String),
}

/// How accessor lists are separated when printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorStyle {
    /// `%r[2,4]`
    #[default]
    Compact,
    /// `%r[2, 4]`
    Spaced,
}

impl AccessorStyle {
    pub(crate) fn separator(self) -> &'static str {
        match self {
            AccessorStyle::Compact => ",",
            AccessorStyle::Spaced => ", ",
        }
    }
}

/// Settings shared by [`Parser`](crate::Parser) and [`Printer`](crate::Printer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsmConfig {
    /// Prefix of every operation name, e.g. `qop` in `qop.cx`.
    pub namespace: String,
    /// Separator style inside printed accessor lists. Parsing accepts both.
    pub accessor_style: AccessorStyle,
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            namespace: "qop".into(),
            accessor_style: AccessorStyle::default(),
        }
    }
}

impl AsmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the namespace is a single bare identifier.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut chars = self.namespace.chars();
        let valid = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        if valid {
            Ok(())
        } else {
            Err(ConfigError::InvalidNamespace(self.namespace.clone()))
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn with_accessor_style(mut self, style: AccessorStyle) -> Self {
        self.accessor_style = style;
        self
    }

    /// Fully qualified operation name for a mnemonic.
    pub fn op_name(&self, mnemonic: &str) -> String {
        format!("{}.{mnemonic}", self.namespace)
    }

    /// Strip the namespace from a qualified operation name.
    pub(crate) fn mnemonic<'n>(&self, name: &'n str) -> Option<&'n str> {
        name.strip_prefix(self.namespace.as_str())?.strip_prefix('.')
    }
}
