//! Exposure rules for interfaces and namespaces
//!
//! - `require-exposed`: a non-partial interface or namespace must say where it
//!   is exposed, unless it has no interface object at all
//! - `no-nointerfaceobject`: `[LegacyNoInterfaceObject]` is discouraged

use idlfix_core::{Autofix, Definition, Diagnostic, Root, Severity};

pub const REQUIRE_EXPOSED: &str = "require-exposed";
pub const NO_NOINTERFACEOBJECT: &str = "no-nointerfaceobject";

const LEGACY_NO_INTERFACE_OBJECT: &str = "LegacyNoInterfaceObject";

/// Attribute added by the `require-exposed` fix
pub const DEFAULT_EXPOSURE: &str = "Exposed=Window";

pub fn check_exposed(root: &Root, severity: Severity) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (index, item) in root.definitions.iter().enumerate() {
        let label = match &item.node {
            Definition::Interface(_) => "Interfaces",
            Definition::Namespace(_) => "Namespaces",
            _ => continue,
        };
        if item.node.is_partial()
            || item.has_ext_attr("Exposed")
            || item.has_ext_attr(LEGACY_NO_INTERFACE_OBJECT)
        {
            continue;
        }

        let name = item.node.name_token();
        diagnostics.push(
            Diagnostic::new(
                REQUIRE_EXPOSED,
                severity,
                format!(
                    "{label} must have `[Exposed]` extended attribute. \
                     To fix, add, for example, `[{DEFAULT_EXPOSURE}]`."
                ),
                &root.source_name,
                name.line,
            )
            .with_token(name.id)
            .with_autofix(Autofix::AddExtendedAttribute {
                definition: index,
                attribute: DEFAULT_EXPOSURE.to_string(),
            }),
        );
    }

    diagnostics
}

pub fn check_no_interface_object(root: &Root, severity: Severity) -> Vec<Diagnostic> {
    root.definitions
        .iter()
        .filter(|item| matches!(item.node, Definition::Interface(_)))
        .filter_map(|item| item.ext_attrs.as_ref()?.get(LEGACY_NO_INTERFACE_OBJECT))
        .map(|attr| {
            Diagnostic::new(
                NO_NOINTERFACEOBJECT,
                severity,
                format!(
                    "`[{LEGACY_NO_INTERFACE_OBJECT}]` extended attribute is an undesirable \
                     feature that may be removed from Web IDL in the future."
                ),
                &root.source_name,
                attr.name.line,
            )
            .with_token(attr.name.id)
        })
        .collect()
}
