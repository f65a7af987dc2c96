//! Diagnostics reported by validation rules

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::autofix::Autofix;
use crate::syntax::TokenId;

/// A problem found in one parsed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Name of the rule that reported it, e.g. `replace-void`
    pub rule_name: String,
    pub severity: Severity,
    pub message: String,
    pub source_name: String,
    /// 1-based line
    pub line: u32,
    /// Token the diagnostic points at
    pub token: Option<TokenId>,
    /// Tree mutation that resolves the problem; informational when absent
    pub autofix: Option<Autofix>,
}

/// Severity levels for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational messages
    Info,
    /// Warnings that should be addressed
    Warning,
    /// Errors that must be fixed
    Error,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(
        rule_name: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        source_name: impl Into<String>,
        line: u32,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            severity,
            message: message.into(),
            source_name: source_name.into(),
            line,
            token: None,
            autofix: None,
        }
    }

    pub fn with_token(mut self, token: Option<TokenId>) -> Self {
        self.token = token;
        self
    }

    pub fn with_autofix(mut self, autofix: Autofix) -> Self {
        self.autofix = Some(autofix);
        self
    }

    pub fn is_fixable(&self) -> bool {
        self.autofix.is_some()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}[{}] {}",
            self.source_name, self.line, self.severity, self.rule_name, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::new(
            "no-duplicate",
            Severity::Error,
            "The name \"Foo\" of type \"interface\" was already seen",
            "Foo.webidl",
            12,
        );
        assert_eq!(
            diagnostic.to_string(),
            "Foo.webidl:12: error[no-duplicate] The name \"Foo\" of type \"interface\" was already seen"
        );
        assert!(!diagnostic.is_fixable());
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }
}
