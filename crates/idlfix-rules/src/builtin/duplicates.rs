//! Duplicate definition detection
//!
//! Definitions share one namespace per file. Partial definitions, `includes`
//! statements and bodyless forward declarations never define a name.

use idlfix_core::{Definition, Diagnostic, Root, Severity};
use std::collections::HashMap;

pub const NO_DUPLICATE: &str = "no-duplicate";

pub fn check_duplicates(root: &Root, severity: Severity) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    // name -> kind of the first definition
    let mut seen: HashMap<&str, &'static str> = HashMap::new();

    for item in &root.definitions {
        if !defines_name(&item.node) {
            continue;
        }
        let Some(name) = item.node.name() else {
            continue;
        };

        if let Some(first_kind) = seen.get(name) {
            let token = item.node.name_token();
            diagnostics.push(
                Diagnostic::new(
                    NO_DUPLICATE,
                    severity,
                    format!("The name \"{name}\" of type \"{first_kind}\" was already seen"),
                    &root.source_name,
                    token.line,
                )
                .with_token(token.id),
            );
        } else {
            seen.insert(name, item.node.kind());
        }
    }

    diagnostics
}

fn defines_name(definition: &Definition) -> bool {
    !definition.is_partial()
        && !matches!(
            definition,
            Definition::Includes(_) | Definition::BodylessInterface(_)
        )
}
