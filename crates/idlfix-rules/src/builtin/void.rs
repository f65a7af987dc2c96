//! `void` → `undefined`

use idlfix_core::{Autofix, Diagnostic, Root, Severity, Syntax};

pub const REPLACE_VOID: &str = "replace-void";

/// Report every `void` type; the fix rewrites the keyword in place
pub fn check_void(root: &Root, severity: Severity) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    root.visit_tokens(&mut |token| {
        if !token.is("void") {
            return;
        }
        let Some(id) = token.id else {
            return;
        };
        diagnostics.push(
            Diagnostic::new(
                REPLACE_VOID,
                severity,
                "`void` is now replaced by `undefined`.",
                &root.source_name,
                token.line,
            )
            .with_token(Some(id))
            .with_autofix(Autofix::ReplaceToken {
                token: id,
                text: "undefined".to_string(),
            }),
        );
    });

    diagnostics
}
