//! Built-in rules
//!
//! Each rule is a plain function over a parsed [`Root`]. It returns its
//! diagnostics in source order at the severity the engine hands it.

use idlfix_core::{Diagnostic, Root, Severity};

pub mod dictionary_args;
pub mod duplicates;
pub mod exposed;
pub mod void;

pub use dictionary_args::{DICT_ARG_DEFAULT, DICT_ARG_OPTIONAL};
pub use duplicates::NO_DUPLICATE;
pub use exposed::{NO_NOINTERFACEOBJECT, REQUIRE_EXPOSED};
pub use void::REPLACE_VOID;

/// Signature shared by every rule check
pub type CheckFn = fn(&Root, Severity) -> Vec<Diagnostic>;

/// A named rule with its default severity
#[derive(Debug, Clone, Copy)]
pub struct BuiltinRule {
    pub name: &'static str,
    pub default_severity: Severity,
    pub check: CheckFn,
}

impl BuiltinRule {
    pub fn run(&self, root: &Root, severity: Severity) -> Vec<Diagnostic> {
        (self.check)(root, severity)
    }
}

/// Every built-in rule, in the order the engine runs them
pub const BUILTIN_RULES: &[BuiltinRule] = &[
    BuiltinRule {
        name: NO_DUPLICATE,
        default_severity: Severity::Error,
        check: duplicates::check_duplicates,
    },
    BuiltinRule {
        name: REQUIRE_EXPOSED,
        default_severity: Severity::Error,
        check: exposed::check_exposed,
    },
    BuiltinRule {
        name: NO_NOINTERFACEOBJECT,
        default_severity: Severity::Warning,
        check: exposed::check_no_interface_object,
    },
    BuiltinRule {
        name: DICT_ARG_OPTIONAL,
        default_severity: Severity::Error,
        check: dictionary_args::check_optional_dictionary_args,
    },
    BuiltinRule {
        name: DICT_ARG_DEFAULT,
        default_severity: Severity::Error,
        check: dictionary_args::check_dictionary_arg_defaults,
    },
    BuiltinRule {
        name: REPLACE_VOID,
        default_severity: Severity::Error,
        check: void::check_void,
    },
];

/// Look up a built-in rule by name
pub fn find_rule(name: &str) -> Option<&'static BuiltinRule> {
    BUILTIN_RULES.iter().find(|rule| rule.name == name)
}
