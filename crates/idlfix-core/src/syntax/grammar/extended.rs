//! Extended attribute lists
//!
//! Grammar:
//!   ExtAttrs := `[` ExtAttr (`,` ExtAttr)* `]`
//!   ExtAttr  := Identifier (`=` (`*` | Value))? (`(` Params `)`)?

use super::arguments::argument_list;
use super::separated_list;
use crate::syntax::ast::{ExtendedAttribute, ExtendedAttributeParams, ExtendedAttributes};
use crate::syntax::error::{PResult, ProductionError};
use crate::syntax::token::{Token, TokenKind};
use crate::syntax::tokeniser::Tokeniser;

const VALUE_KINDS: &[TokenKind] = &[
    TokenKind::Identifier,
    TokenKind::Decimal,
    TokenKind::Integer,
    TokenKind::String,
];

/// An extended attribute list, if one starts here
pub(crate) fn extended_attributes(t: &mut Tokeniser<'_>) -> PResult<ExtendedAttributes> {
    let Some(open) = t.consume(&["["]) else {
        return Ok(None);
    };
    let items = separated_list(t, extended_attribute, false, "extended attribute")?;
    if items.is_empty() {
        return Err(t.error("An extended attribute list must not be empty"));
    }
    let close = t.consume(&["]"]).ok_or_else(|| {
        t.error("Expected a closing token for the extended attribute list")
    })?;
    if t.probe("[") {
        return Err(t.error(
            "Illegal double extended attribute lists, consider merging them",
        ));
    }
    Ok(Some(ExtendedAttributes { open, items, close }))
}

pub(crate) fn extended_attribute(t: &mut Tokeniser<'_>) -> PResult<ExtendedAttribute> {
    let Some(name) = t.consume_kind(TokenKind::Identifier) else {
        return Ok(None);
    };

    let assign = t.consume(&["="]);
    let mut rhs = None;
    if assign.is_some() {
        if let Some(asterisk) = t.consume(&["*"]) {
            return Ok(Some(ExtendedAttribute {
                name,
                assign,
                rhs: Some(asterisk),
                params: None,
            }));
        }
        rhs = t.consume_kinds(VALUE_KINDS);
    }

    let params = match t.consume(&["("]) {
        Some(open) => {
            let params = if assign.is_some() && rhs.is_none() {
                let items = separated_list(t, value_token, false, "identifier list")?;
                let close = closing_paren(t)?;
                ExtendedAttributeParams::List { open, items, close }
            } else {
                let arguments = argument_list(t)?;
                let close = closing_paren(t)?;
                ExtendedAttributeParams::Arguments {
                    open,
                    arguments,
                    close,
                }
            };
            Some(params)
        }
        None => {
            if assign.is_some() && rhs.is_none() {
                return Err(t.error("No right hand side to extended attribute assignment"));
            }
            None
        }
    };

    Ok(Some(ExtendedAttribute {
        name,
        assign,
        rhs,
        params,
    }))
}

fn value_token(t: &mut Tokeniser<'_>) -> PResult<Token> {
    Ok(t.consume_kinds(VALUE_KINDS))
}

fn closing_paren(t: &mut Tokeniser<'_>) -> Result<Token, ProductionError> {
    t.consume(&[")"])
        .ok_or_else(|| t.error("Unexpected token in extended attribute argument list"))
}
