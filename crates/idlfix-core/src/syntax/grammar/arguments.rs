//! Arguments and default values
//!
//! Grammar:
//!   Argument := ExtAttrs? `optional`? Type `...`? ArgumentName Default?
//!   Default  := `=` (Const | String | `null` | `[` `]` | `{` `}`)

use super::extended::extended_attributes;
use super::separated_list;
use super::types::idl_type;
use crate::syntax::ast::{Argument, DefaultValue};
use crate::syntax::error::{PResult, ProductionError};
use crate::syntax::lexer::ARGUMENT_NAME_KEYWORDS;
use crate::syntax::token::{Token, TokenKind};
use crate::syntax::tokeniser::Tokeniser;

/// Comma-separated arguments; empty when none start here
pub(crate) fn argument_list(t: &mut Tokeniser<'_>) -> Result<Vec<Argument>, ProductionError> {
    let arguments = separated_list(t, argument, false, "arguments list")?
        .into_iter()
        .map(|s| Argument {
            separator: s.separator,
            ..s.item
        })
        .collect();
    Ok(arguments)
}

pub(crate) fn argument(t: &mut Tokeniser<'_>) -> PResult<Argument> {
    let start = t.position();
    let ext_attrs = extended_attributes(t)?;
    let optional = t.consume(&["optional"]);
    let Some(idl_type) = idl_type(t)? else {
        t.unconsume(start);
        return Ok(None);
    };
    let variadic = if optional.is_none() {
        t.consume(&["..."])
    } else {
        None
    };
    let Some(name) = t
        .consume_kind(TokenKind::Identifier)
        .or_else(|| t.consume(ARGUMENT_NAME_KEYWORDS))
    else {
        t.unconsume(start);
        return Ok(None);
    };
    let default = if optional.is_some() {
        default_value(t)?
    } else {
        None
    };

    Ok(Some(Argument {
        ext_attrs,
        optional,
        idl_type,
        variadic,
        name,
        default,
        separator: None,
    }))
}

pub(crate) fn default_value(t: &mut Tokeniser<'_>) -> PResult<DefaultValue> {
    let Some(assign) = t.consume(&["="]) else {
        return Ok(None);
    };
    let value = const_value(t)
        .or_else(|| t.consume_kind(TokenKind::String))
        .or_else(|| t.consume(&["null", "[", "{"]))
        .ok_or_else(|| t.error("No value for default"))?;

    let close = if value.is("[") {
        Some(
            t.consume(&["]"])
                .ok_or_else(|| t.error("Default sequence value must be empty"))?,
        )
    } else if value.is("{") {
        Some(
            t.consume(&["}"])
                .ok_or_else(|| t.error("Default dictionary value must be empty"))?,
        )
    } else {
        None
    };

    Ok(Some(DefaultValue {
        assign,
        value,
        close,
    }))
}

/// `true`, `false`, `Infinity`, `-Infinity`, `NaN`, or a number
pub(crate) fn const_value(t: &mut Tokeniser<'_>) -> Option<Token> {
    t.consume(&["true", "false", "Infinity", "-Infinity", "NaN"])
        .or_else(|| t.consume_kinds(&[TokenKind::Decimal, TokenKind::Integer]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::grammar::test_support::{round_trip, run};

    #[test]
    fn test_argument_shapes() {
        let arg = round_trip("[Clamp] optional unsigned long x = 0", argument);
        assert!(arg.is_optional());
        assert!(arg.default.is_some());

        let arg = round_trip("DOMString... rest", argument);
        assert!(arg.is_variadic());

        let arg = round_trip("optional Options options = {}", argument);
        assert!(arg.default.as_ref().and_then(|d| d.close.as_ref()).is_some());

        // Keywords may name arguments
        round_trip("any callback", argument);
    }

    #[test]
    fn test_argument_list_keeps_separators() {
        fn list(t: &mut Tokeniser<'_>) -> PResult<Vec<Argument>> {
            argument_list(t).map(Some)
        }
        let args = round_trip("long a, optional long b = 2", list);
        assert_eq!(args.len(), 2);
        assert!(args[0].separator.is_some());
        assert!(args[1].separator.is_none());
    }

    #[test]
    fn test_trailing_comma_is_rejected() {
        fn list(t: &mut Tokeniser<'_>) -> PResult<Vec<Argument>> {
            argument_list(t).map(Some)
        }
        assert_eq!(run("long a, ", list).unwrap_err(), "Trailing comma in arguments list");
    }

    #[test]
    fn test_default_errors() {
        assert_eq!(run("= [1]", default_value).unwrap_err(), "Default sequence value must be empty");
        assert_eq!(run("= ;", default_value).unwrap_err(), "No value for default");
    }
}
