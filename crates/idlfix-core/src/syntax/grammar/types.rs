//! Type grammar
//!
//! Grammar:
//!   Type        := ExtAttrs? (SingleType | UnionType)
//!   SingleType  := (Generic | Primitive | StringType | Identifier) `?`?
//!   UnionType   := `(` Type (`or` Type)+ `)` `?`?
//!   ReturnType  := Type | `void`

use super::extended::extended_attributes;
use crate::syntax::ast::{Separated, Type, TypeBody};
use crate::syntax::error::{PResult, ProductionError};
use crate::syntax::lexer::STRING_TYPES;
use crate::syntax::token::{Token, TokenKind};
use crate::syntax::tokeniser::Tokeniser;

const GENERIC_TYPES: &[&str] = &["FrozenArray", "ObservableArray", "Promise", "record", "sequence"];

/// A type optionally preceded by extended attributes
pub(crate) fn idl_type(t: &mut Tokeniser<'_>) -> PResult<Type> {
    let start = t.position();
    let ext_attrs = extended_attributes(t)?;
    let ty = match single_type(t)? {
        Some(ty) => Some(ty),
        None => union_type(t)?,
    };
    match ty {
        Some(mut ty) => {
            ty.ext_attrs = ext_attrs;
            Ok(Some(ty))
        }
        None => {
            t.unconsume(start);
            Ok(None)
        }
    }
}

/// A type, or `void` where a return type is expected
pub(crate) fn return_type(t: &mut Tokeniser<'_>) -> PResult<Type> {
    if let Some(ty) = idl_type(t)? {
        return Ok(Some(ty));
    }
    Ok(t.consume(&["void"]).map(|base| Type {
        ext_attrs: None,
        body: TypeBody::Single {
            prefix: None,
            base,
            postfix: None,
        },
        nullable: None,
    }))
}

/// Built-in numeric and scalar types, without nullable suffix
pub(crate) fn primitive_type(t: &mut Tokeniser<'_>) -> PResult<TypeBody> {
    if let Some(body) = integer_type(t)? {
        return Ok(Some(body));
    }
    if let Some(body) = decimal_type(t)? {
        return Ok(Some(body));
    }
    Ok(t
        .consume(&["bigint", "boolean", "byte", "octet", "undefined"])
        .map(|base| TypeBody::Single {
            prefix: None,
            base,
            postfix: None,
        }))
}

fn integer_type(t: &mut Tokeniser<'_>) -> PResult<TypeBody> {
    let prefix = t.consume(&["unsigned"]);
    let Some(base) = t.consume(&["short", "long"]) else {
        if prefix.is_some() {
            return Err(t.error("Failed to parse integer type"));
        }
        return Ok(None);
    };
    let postfix = if base.is("long") {
        t.consume(&["long"])
    } else {
        None
    };
    Ok(Some(TypeBody::Single {
        prefix,
        base,
        postfix,
    }))
}

fn decimal_type(t: &mut Tokeniser<'_>) -> PResult<TypeBody> {
    let prefix = t.consume(&["unrestricted"]);
    let Some(base) = t.consume(&["float", "double"]) else {
        if prefix.is_some() {
            return Err(t.error("Failed to parse float type"));
        }
        return Ok(None);
    };
    Ok(Some(TypeBody::Single {
        prefix,
        base,
        postfix: None,
    }))
}

fn single_type(t: &mut Tokeniser<'_>) -> PResult<Type> {
    // Dialect types first, so they win over the generic they resemble.
    for production in &t.extensions().types {
        if let Some(ty) = production(t)? {
            return Ok(Some(ty));
        }
    }

    let body = match generic_type(t)? {
        Some(body) => body,
        None => match primitive_type(t)? {
            Some(body) => body,
            None => {
                let Some(base) = t
                    .consume_kind(TokenKind::Identifier)
                    .or_else(|| t.consume(STRING_TYPES))
                else {
                    return Ok(None);
                };
                if t.probe("<") {
                    return Err(t.error(format!("Unsupported generic type {}", base.value())));
                }
                TypeBody::Single {
                    prefix: None,
                    base,
                    postfix: None,
                }
            }
        },
    };

    let is_promise = matches!(&body, TypeBody::Generic { base, .. } if base.is("Promise"));
    if is_promise && t.probe("?") {
        return Err(t.error("Promise type cannot be nullable"));
    }
    let nullable = type_suffix(t)?;
    let is_any = matches!(&body, TypeBody::Single { base, .. } if base.value() == "any");
    if nullable.is_some() && is_any {
        return Err(t.error("Type `any` cannot be made nullable"));
    }

    Ok(Some(Type {
        ext_attrs: None,
        body,
        nullable,
    }))
}

fn generic_type(t: &mut Tokeniser<'_>) -> PResult<TypeBody> {
    let Some(base) = t.consume(GENERIC_TYPES) else {
        return Ok(None);
    };
    let name = base.raw.clone();
    let open = t
        .consume(&["<"])
        .ok_or_else(|| t.error(format!("No opening bracket after {name}")))?;

    let mut subtypes = Vec::new();
    match name.as_str() {
        "Promise" => {
            if t.probe("[") {
                return Err(t.error("Promise type cannot have extended attribute"));
            }
            let subtype = return_type(t)?.ok_or_else(|| t.error("Missing Promise subtype"))?;
            subtypes.push(Separated {
                item: subtype,
                separator: None,
            });
        }
        "record" => {
            if t.probe("[") {
                return Err(t.error("Record key cannot have extended attribute"));
            }
            let key = t.consume(STRING_TYPES).ok_or_else(|| {
                t.error(format!("Record key must be one of: {}", STRING_TYPES.join(", ")))
            })?;
            let comma = t
                .consume(&[","])
                .ok_or_else(|| t.error("Missing comma after record key type"))?;
            subtypes.push(Separated {
                item: Type {
                    ext_attrs: None,
                    body: TypeBody::Single {
                        prefix: None,
                        base: key,
                        postfix: None,
                    },
                    nullable: None,
                },
                separator: Some(comma),
            });
            let value =
                idl_type(t)?.ok_or_else(|| t.error("Error parsing generic type record"))?;
            subtypes.push(Separated {
                item: value,
                separator: None,
            });
        }
        _ => {
            let subtype =
                idl_type(t)?.ok_or_else(|| t.error(format!("Missing {name} subtype")))?;
            subtypes.push(Separated {
                item: subtype,
                separator: None,
            });
        }
    }

    let close = t
        .consume(&[">"])
        .ok_or_else(|| t.error(format!("Missing closing bracket after {name}")))?;
    Ok(Some(TypeBody::Generic {
        base,
        open,
        subtypes,
        close,
    }))
}

fn union_type(t: &mut Tokeniser<'_>) -> PResult<Type> {
    let Some(open) = t.consume(&["("]) else {
        return Ok(None);
    };

    let mut subtypes = Vec::new();
    loop {
        let ty = idl_type(t)?
            .ok_or_else(|| t.error("No type after open parenthesis or 'or' in union type"))?;
        match &ty.body {
            TypeBody::Single { base, .. } if base.value() == "any" => {
                return Err(t.error("Type `any` cannot be included in a union type"));
            }
            TypeBody::Generic { base, .. } if base.is("Promise") => {
                return Err(t.error("Type `Promise` cannot be included in a union type"));
            }
            _ => {}
        }
        let separator = t.consume(&["or"]);
        let more = separator.is_some();
        subtypes.push(Separated {
            item: ty,
            separator,
        });
        if !more {
            break;
        }
    }

    if subtypes.len() < 2 {
        return Err(t.error(
            "At least two types are expected in a union type but found less",
        ));
    }
    let close = t
        .consume(&[")"])
        .ok_or_else(|| t.error("Unterminated union type"))?;
    let nullable = type_suffix(t)?;

    Ok(Some(Type {
        ext_attrs: None,
        body: TypeBody::Union {
            open,
            subtypes,
            close,
        },
        nullable,
    }))
}

/// Optional `?`, rejecting a second one
pub(crate) fn type_suffix(t: &mut Tokeniser<'_>) -> Result<Option<Token>, ProductionError> {
    let nullable = t.consume(&["?"]);
    if t.probe("?") {
        return Err(t.error("Can't nullable more than once"));
    }
    Ok(nullable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::grammar::test_support::{round_trip, run};

    #[test]
    fn test_primitive_types() {
        for source in [
            "long",
            "unsigned long long",
            "unrestricted double",
            "boolean?",
            "undefined",
            "bigint",
        ] {
            round_trip(source, idl_type);
        }
    }

    #[test]
    fn test_generic_and_union_types() {
        let ty = round_trip("sequence<(DOMString or [Clamp] long)>?", idl_type);
        assert!(ty.is_nullable());
        assert_eq!(ty.base_name(), Some("sequence"));
        round_trip("record<ByteString, Foo>", idl_type);
        round_trip("Promise<void>", idl_type);
    }

    #[test]
    fn test_identifier_reference() {
        let ty = round_trip("_Dict", idl_type);
        assert_eq!(ty.reference_name(), Some("Dict"));
    }

    #[test]
    fn test_void_only_as_return_type() {
        assert_eq!(run("void", idl_type).unwrap(), None);
        round_trip("void", return_type);
    }

    #[test]
    fn test_type_errors() {
        assert_eq!(
            run("record<UTF8String, long>", idl_type).unwrap_err(),
            "Record key must be one of: ByteString, DOMString, USVString"
        );
        assert_eq!(
            run("(long)", idl_type).unwrap_err(),
            "At least two types are expected in a union type but found less"
        );
        assert_eq!(run("long??", idl_type).unwrap_err(), "Can't nullable more than once");
        assert_eq!(run("any?", idl_type).unwrap_err(), "Type `any` cannot be made nullable");
        assert_eq!(run("unsigned float", idl_type).unwrap_err(), "Failed to parse integer type");
    }

    #[test]
    fn test_stray_extended_attributes_do_not_match() {
        assert_eq!(run("[Clamp] ;", idl_type).unwrap(), None);
    }
}
