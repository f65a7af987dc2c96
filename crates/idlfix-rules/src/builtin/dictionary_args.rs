//! Dictionary argument rules
//!
//! An argument typed as a dictionary of the same file (directly, through a
//! typedef, or as a union member) is checked two ways:
//!
//! - `dict-arg-optional`: a required trailing argument whose dictionary has
//!   no required members could be omitted, so it must be `optional`
//! - `dict-arg-default`: an optional dictionary argument needs `= {}`
//!
//! Nullable arguments are skipped, as are dictionaries defined in another
//! file: those only seen as `partial dictionary` here, or inheriting from a
//! parent outside the file.

use idlfix_core::syntax::ast::{Argument, Member, Type};
use idlfix_core::{Autofix, Definition, Diagnostic, Root, Severity};
use std::collections::{HashMap, HashSet};

pub const DICT_ARG_OPTIONAL: &str = "dict-arg-optional";
pub const DICT_ARG_DEFAULT: &str = "dict-arg-default";

/// Default value added by both fixes
const EMPTY_DICTIONARY: &str = " = {}";

pub fn check_optional_dictionary_args(root: &Root, severity: Severity) -> Vec<Diagnostic> {
    let index = DictionaryIndex::build(root);
    let mut diagnostics = Vec::new();

    for arguments in root.argument_lists() {
        for (position, argument) in arguments.iter().enumerate() {
            if argument.is_optional() || argument.is_variadic() {
                continue;
            }
            let Some(dictionary) = index.argument_dictionary(argument) else {
                continue;
            };
            let trailing = arguments[position + 1..].iter().all(Argument::is_optional);
            if !trailing || index.has_required_member(dictionary) != Some(false) {
                continue;
            }
            let Some(id) = argument.name.id else {
                continue;
            };
            diagnostics.push(
                Diagnostic::new(
                    DICT_ARG_OPTIONAL,
                    severity,
                    "Dictionary argument must be optional if it has no required fields",
                    &root.source_name,
                    argument.name.line,
                )
                .with_token(Some(id))
                .with_autofix(Autofix::MakeArgumentOptional {
                    argument: id,
                    default: EMPTY_DICTIONARY.to_string(),
                }),
            );
        }
    }

    diagnostics
}

pub fn check_dictionary_arg_defaults(root: &Root, severity: Severity) -> Vec<Diagnostic> {
    let index = DictionaryIndex::build(root);
    let mut diagnostics = Vec::new();

    for argument in root.argument_lists().into_iter().flatten() {
        if !argument.is_optional() || argument.default.is_some() {
            continue;
        }
        if index.argument_dictionary(argument).is_none() {
            continue;
        }
        let Some(id) = argument.name.id else {
            continue;
        };
        diagnostics.push(
            Diagnostic::new(
                DICT_ARG_DEFAULT,
                severity,
                "Optional dictionary arguments must have a default value of `{}`.",
                &root.source_name,
                argument.name.line,
            )
            .with_token(Some(id))
            .with_autofix(Autofix::AddDefault {
                argument: id,
                default: EMPTY_DICTIONARY.to_string(),
            }),
        );
    }

    diagnostics
}

#[derive(Debug, Default)]
struct DictionaryShape<'a> {
    /// A non-partial definition is in this file
    defined: bool,
    parent: Option<&'a str>,
    has_required: bool,
}

/// Dictionaries and typedefs defined in one file
#[derive(Debug, Default)]
struct DictionaryIndex<'a> {
    dictionaries: HashMap<&'a str, DictionaryShape<'a>>,
    typedefs: HashMap<&'a str, &'a Type>,
}

impl<'a> DictionaryIndex<'a> {
    fn build(root: &'a Root) -> Self {
        let mut index = Self::default();

        for item in &root.definitions {
            match &item.node {
                Definition::Dictionary(dictionary) => {
                    let body = &dictionary.body;
                    let shape = index.dictionaries.entry(body.name.value()).or_default();
                    if dictionary.partial.is_none() {
                        shape.defined = true;
                        shape.parent = body.inheritance.as_ref().map(|i| i.name.value());
                    }
                    shape.has_required |= body.members.iter().any(|m| is_required(&m.node));
                }
                Definition::Typedef(typedef) => {
                    index.typedefs.insert(typedef.name.value(), &typedef.idl_type);
                }
                _ => {}
            }
        }

        index
    }

    /// Dictionary an argument's type refers to, if any
    fn argument_dictionary(&self, argument: &'a Argument) -> Option<&'a str> {
        if argument.idl_type.is_nullable() {
            return None;
        }
        self.type_dictionary(&argument.idl_type, &mut HashSet::new())
    }

    fn type_dictionary(&self, idl_type: &'a Type, visited: &mut HashSet<&'a str>) -> Option<&'a str> {
        if let Some(found) = idl_type
            .union_members()
            .find_map(|member| self.type_dictionary(member, visited))
        {
            return Some(found);
        }

        let name = idl_type.reference_name()?;
        if let Some(shape) = self.dictionaries.get(name) {
            return shape.defined.then_some(name);
        }
        let aliased = *self.typedefs.get(name)?;
        if !visited.insert(name) {
            return None;
        }
        self.type_dictionary(aliased, visited)
    }

    /// Whether `name` or one of its ancestors has a required member
    ///
    /// `None` when the answer depends on a dictionary outside the file.
    fn has_required_member(&self, name: &str) -> Option<bool> {
        let mut visited = HashSet::new();
        let mut current = name;
        loop {
            if !visited.insert(current) {
                return Some(false);
            }
            let shape = self.dictionaries.get(current).filter(|shape| shape.defined)?;
            if shape.has_required {
                return Some(true);
            }
            match shape.parent {
                Some(parent) => current = parent,
                None => return Some(false),
            }
        }
    }
}

fn is_required(member: &Member) -> bool {
    match member {
        Member::Field(field) => field.required.is_some(),
        Member::Utf8StringField(field) => field.required.is_some(),
        _ => false,
    }
}
