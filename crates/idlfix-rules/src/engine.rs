//! Rule engine implementation

use idlfix_core::{
    ALL_RULES, AutofixConfiguration, Diagnostic, IdlfixConfig, IdlfixError, LinterConfiguration,
    Result, Root, Severity,
};
use tracing::{debug, info, warn};

use crate::builtin::{BUILTIN_RULES, BuiltinRule, find_rule};

/// Runs the built-in rules over parsed files
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    config: LinterConfiguration,
}

impl RuleEngine {
    /// Create an engine with every rule at its default severity
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LinterConfiguration) -> Self {
        Self { config }
    }

    /// Build an engine from a loaded config, rejecting unknown rule names
    pub fn from_config(config: &IdlfixConfig) -> Result<Self> {
        let linter = config.linter_config();
        let autofix = config.autofix_config();

        let configured = linter.rules.iter().flat_map(|rules| rules.keys());
        let fixable = autofix
            .rules
            .iter()
            .chain(autofix.exclude.iter())
            .flatten()
            .filter(|name| name.as_str() != ALL_RULES);
        for name in configured.chain(fixable) {
            if find_rule(name).is_none() {
                return Err(IdlfixError::rule_error(name, "no such rule"));
            }
        }

        Ok(Self::with_config(linter))
    }

    /// Enabled rules paired with the severity they report at
    pub fn active_rules(&self) -> Vec<(&'static BuiltinRule, Severity)> {
        if !self.config.is_enabled() {
            return Vec::new();
        }
        BUILTIN_RULES
            .iter()
            .filter_map(|rule| {
                let severity = match self.config.rule_severity(rule.name) {
                    Some(configured) => configured.to_severity()?,
                    None => rule.default_severity,
                };
                Some((rule, severity))
            })
            .collect()
    }

    /// Run every enabled rule over `root`
    ///
    /// Diagnostics are grouped by rule, in rule order, and in source order
    /// within each rule.
    pub fn validate(&self, root: &Root) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for (rule, severity) in self.active_rules() {
            let found = rule.run(root, severity);
            if !found.is_empty() {
                debug!(
                    rule = rule.name,
                    source = %root.source_name,
                    count = found.len(),
                    "rule reported"
                );
            }
            diagnostics.extend(found);
        }
        diagnostics
    }
}

/// Apply every fixable diagnostic that `policy` allows
///
/// Returns the number of fixes applied. A fix whose target has gone is
/// skipped with a warning; the tree is left as it was for that fix.
pub fn apply_fixes(root: &mut Root, diagnostics: &[Diagnostic], policy: &AutofixConfiguration) -> usize {
    let mut applied = 0;

    for diagnostic in diagnostics {
        let Some(autofix) = &diagnostic.autofix else {
            continue;
        };
        if !policy.allows(&diagnostic.rule_name) {
            debug!(rule = %diagnostic.rule_name, line = diagnostic.line, "fix not allowed");
            continue;
        }

        match autofix.apply(root) {
            Ok(()) => {
                applied += 1;
                info!(
                    rule = %diagnostic.rule_name,
                    source = %diagnostic.source_name,
                    line = diagnostic.line,
                    "{}",
                    autofix.description()
                );
            }
            Err(err) => warn!(
                rule = %diagnostic.rule_name,
                source = %diagnostic.source_name,
                line = diagnostic.line,
                "fix refused: {err}"
            ),
        }
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use idlfix_core::{RuleSeverity, parse, write};
    use std::collections::HashMap;

    const SOURCE: &str = "[LegacyNoInterfaceObject]\n\
                          interface A {\n\
                          \x20 void f();\n\
                          };\n\
                          interface B {};\n";

    fn linter(rules: &[(&str, RuleSeverity)]) -> LinterConfiguration {
        LinterConfiguration {
            enabled: Some(true),
            rules: Some(
                rules
                    .iter()
                    .map(|(name, severity)| (name.to_string(), *severity))
                    .collect::<HashMap<_, _>>(),
            ),
        }
    }

    #[test]
    fn test_validate_orders_by_rule() {
        let root = parse(SOURCE, "A.webidl").unwrap();
        let rules: Vec<_> = RuleEngine::new()
            .validate(&root)
            .into_iter()
            .map(|d| d.rule_name)
            .collect();
        assert_eq!(rules, vec!["require-exposed", "no-nointerfaceobject", "replace-void"]);
    }

    #[test]
    fn test_off_rules_are_skipped_and_severity_overridden() {
        let root = parse(SOURCE, "A.webidl").unwrap();
        let engine = RuleEngine::with_config(linter(&[
            ("require-exposed", RuleSeverity::Off),
            ("replace-void", RuleSeverity::Info),
        ]));
        let diagnostics = engine.validate(&root);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(diagnostics[1].rule_name, "replace-void");
        assert_eq!(diagnostics[1].severity, Severity::Info);
    }

    #[test]
    fn test_from_config_rejects_unknown_rules() {
        let mut config = IdlfixConfig::default();
        assert!(RuleEngine::from_config(&config).is_ok());

        config.autofix = Some(AutofixConfiguration {
            rules: Some(vec!["*".to_string()]),
            exclude: Some(vec!["require-exposed".to_string()]),
        });
        assert!(RuleEngine::from_config(&config).is_ok());

        config.linter = Some(linter(&[("no-such-rule", RuleSeverity::Warn)]));
        let err = RuleEngine::from_config(&config).unwrap_err();
        assert_eq!(err.to_string(), "Rule error in 'no-such-rule': no such rule");
    }

    #[test]
    fn test_disabled_linter_reports_nothing() {
        let root = parse(SOURCE, "A.webidl").unwrap();
        let engine = RuleEngine::with_config(LinterConfiguration {
            enabled: Some(false),
            rules: None,
        });
        assert!(engine.validate(&root).is_empty());
    }

    #[test]
    fn test_default_policy_only_replaces_void() {
        let mut root = parse(SOURCE, "A.webidl").unwrap();
        let diagnostics = RuleEngine::new().validate(&root);
        let applied = apply_fixes(&mut root, &diagnostics, &AutofixConfiguration::default());
        assert_eq!(applied, 1);
        assert_eq!(write(&root), SOURCE.replace("void", "undefined"));
    }

    #[test]
    fn test_wildcard_policy_with_exclusion() {
        let mut root = parse(SOURCE, "A.webidl").unwrap();
        let diagnostics = RuleEngine::new().validate(&root);
        let everything = AutofixConfiguration {
            rules: Some(vec!["*".to_string()]),
            exclude: None,
        };
        assert_eq!(apply_fixes(&mut root.clone(), &diagnostics, &everything), 2);

        let no_exposure = AutofixConfiguration {
            rules: Some(vec!["*".to_string()]),
            exclude: Some(vec!["require-exposed".to_string()]),
        };
        assert_eq!(apply_fixes(&mut root, &diagnostics, &no_exposure), 1);
    }

    #[test]
    fn test_stale_fix_is_refused() {
        let mut root = parse(SOURCE, "A.webidl").unwrap();
        let diagnostics = RuleEngine::new().validate(&root);
        let policy = AutofixConfiguration::default();
        assert_eq!(apply_fixes(&mut root, &diagnostics, &policy), 1);
        // Replacing a token twice still finds it; the text is simply rewritten
        assert_eq!(apply_fixes(&mut root, &diagnostics, &policy), 1);

        let everything = AutofixConfiguration {
            rules: Some(vec!["*".to_string()]),
            exclude: None,
        };
        let mut other = parse("interface C {};", "C.webidl").unwrap();
        assert_eq!(apply_fixes(&mut other, &diagnostics, &everything), 0);
    }
}
