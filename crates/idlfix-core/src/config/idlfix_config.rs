//! Configuration file structure
//!
//! ## Example Configuration (.idlfixrc.toml)
//!
//! ```toml
//! dialect = "gecko"
//!
//! [files]
//! extension = "webidl"
//!
//! [linter]
//! enabled = true
//!
//! [linter.rules]
//! no-duplicate = "error"
//! no-nointerfaceobject = "off"
//!
//! [autofix]
//! rules = ["replace-void", "dict-arg-default"]
//! exclude = ["require-exposed"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::diagnostics::Severity;
use crate::syntax::Dialect;

/// Rules whose fixes are applied when no `autofix.rules` is configured
pub const DEFAULT_AUTOFIX_RULES: &[&str] = &["replace-void"];

/// Allowlist entry matching every fixable rule
pub const ALL_RULES: &str = "*";

/// Top-level configuration with section-based structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IdlfixConfig {
    /// Grammar dialect; `gecko` when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,

    /// Which files in a directory are processed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<FilesConfiguration>,

    /// Rule severities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linter: Option<LinterConfiguration>,

    /// Which rules may rewrite files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autofix: Option<AutofixConfiguration>,
}

/// File selection configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilesConfiguration {
    /// File extension without the dot
    pub extension: Option<String>,
}

/// Linter configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinterConfiguration {
    /// Enable/disable all rules
    pub enabled: Option<bool>,

    /// Per-rule severity overrides, keyed by rule name
    pub rules: Option<HashMap<String, RuleSeverity>>,
}

/// Autofix policy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AutofixConfiguration {
    /// Rules whose fixes are applied; `"*"` allows every rule
    pub rules: Option<Vec<String>>,

    /// Rules never fixed, even when allowed by `rules`
    pub exclude: Option<Vec<String>>,
}

/// Rule severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    /// Disable the rule
    Off,
    /// Informational message
    Info,
    /// Warning
    Warn,
    /// Error
    Error,
}

impl RuleSeverity {
    /// Diagnostic severity, or `None` for a disabled rule
    pub fn to_severity(self) -> Option<Severity> {
        match self {
            RuleSeverity::Off => None,
            RuleSeverity::Info => Some(Severity::Info),
            RuleSeverity::Warn => Some(Severity::Warning),
            RuleSeverity::Error => Some(Severity::Error),
        }
    }
}

impl IdlfixConfig {
    /// Load configuration from file
    ///
    /// The format follows the extension: `.toml`, `.json`, `.yaml` or `.yml`.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Err("Unsupported file extension (expected .toml, .yaml, .yml, or .json)".into()),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect.unwrap_or_default()
    }

    /// Get files configuration with defaults
    pub fn files_config(&self) -> FilesConfiguration {
        self.files.clone().unwrap_or_default()
    }

    /// Get linter configuration with defaults
    pub fn linter_config(&self) -> LinterConfiguration {
        self.linter.clone().unwrap_or_default()
    }

    /// Get autofix configuration with defaults
    pub fn autofix_config(&self) -> AutofixConfiguration {
        self.autofix.clone().unwrap_or_default()
    }
}

impl Default for FilesConfiguration {
    fn default() -> Self {
        Self {
            extension: Some("webidl".to_string()),
        }
    }
}

impl FilesConfiguration {
    /// Extension to match, without a leading dot
    pub fn extension(&self) -> &str {
        self.extension
            .as_deref()
            .map(|ext| ext.trim_start_matches('.'))
            .unwrap_or("webidl")
    }
}

impl Default for LinterConfiguration {
    fn default() -> Self {
        Self {
            enabled: Some(true),
            rules: None,
        }
    }
}

impl LinterConfiguration {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Configured severity for `rule`, if overridden
    pub fn rule_severity(&self, rule: &str) -> Option<RuleSeverity> {
        self.rules.as_ref().and_then(|rules| rules.get(rule).copied())
    }
}

impl Default for AutofixConfiguration {
    fn default() -> Self {
        Self {
            rules: Some(DEFAULT_AUTOFIX_RULES.iter().map(|r| r.to_string()).collect()),
            exclude: None,
        }
    }
}

impl AutofixConfiguration {
    /// Whether fixes reported by `rule` may be applied
    pub fn allows(&self, rule: &str) -> bool {
        let excluded = self
            .exclude
            .as_ref()
            .is_some_and(|exclude| exclude.iter().any(|r| r == rule));
        if excluded {
            return false;
        }
        match &self.rules {
            Some(rules) => rules.iter().any(|r| r == rule || r == ALL_RULES),
            None => DEFAULT_AUTOFIX_RULES.contains(&rule),
        }
    }
}
