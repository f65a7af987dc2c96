//! Trivia-preserving WebIDL lexer
//!
//! Whitespace and comments are never dropped: they are attached as leading
//! trivia to the next token, and whatever trails the last token is carried by
//! the final `Eof` token. Concatenating `trivia + raw` over the returned
//! tokens gives back the input unchanged.

use regex::Regex;
use std::sync::LazyLock;

use super::token::{Token, TokenId, TokenKind};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\t\n\r ]+").unwrap());
static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?://.*|/\*(?s:.*?)\*/)").unwrap());
static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^-?(?:(?:[0-9]+\.[0-9]*|[0-9]*\.[0-9]+)(?:[Ee][-+]?[0-9]+)?|[0-9]+[Ee][-+]?[0-9]+)",
    )
    .unwrap()
});
static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:0(?:[Xx][0-9A-Fa-f]+|[0-7]*)|[1-9][0-9]*)").unwrap());
static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_-]?[A-Za-z][0-9A-Z_a-z-]*").unwrap());
static STRING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^"[^"]*""#).unwrap());

/// Punctuation, longest first
const PUNCTUATION: &[&str] = &[
    "...", "(", ")", ",", ":", ";", "<", "=", ">", "?", "*", "[", "]", "{", "}",
];

/// String types, usable as record keys
pub const STRING_TYPES: &[&str] = &["ByteString", "DOMString", "USVString"];

/// Keywords that may still name an argument
pub const ARGUMENT_NAME_KEYWORDS: &[&str] = &[
    "async",
    "attribute",
    "callback",
    "const",
    "constructor",
    "deleter",
    "dictionary",
    "enum",
    "getter",
    "includes",
    "inherit",
    "interface",
    "iterable",
    "maplike",
    "namespace",
    "partial",
    "required",
    "setlike",
    "setter",
    "static",
    "stringifier",
    "typedef",
    "unrestricted",
];

const RESERVED_TERMINALS: &[&str] = &[
    "-Infinity",
    "FrozenArray",
    "Infinity",
    "NaN",
    "ObservableArray",
    "Promise",
    "bigint",
    "boolean",
    "byte",
    "double",
    "false",
    "float",
    "long",
    "mixin",
    "null",
    "octet",
    "optional",
    "or",
    "readonly",
    "record",
    "sequence",
    "short",
    "true",
    "undefined",
    "unsigned",
    "void",
];

/// Whether an identifier-shaped word lexes as a keyword
pub fn is_keyword(word: &str) -> bool {
    RESERVED_TERMINALS.contains(&word)
        || ARGUMENT_NAME_KEYWORDS.contains(&word)
        || STRING_TYPES.contains(&word)
}

/// Split `input` into tokens, the last of which is `Eof`
///
/// Lexing never fails: characters that fit no other class become `Other`
/// tokens and are left for the grammar to reject.
pub fn tokenise(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut trivia = String::new();
    let mut line: u32 = 1;
    let mut pos = 0usize;

    while pos < input.len() {
        let rest = &input[pos..];

        if let Some(m) = WHITESPACE.find(rest).or_else(|| COMMENT.find(rest)) {
            trivia.push_str(m.as_str());
            pos += m.end();
            continue;
        }

        let Some((kind, len)) = match_token(rest) else {
            // Unreachable in practice: the `Other` class accepts any char.
            break;
        };

        let raw = &rest[..len];
        line += count_newlines(&trivia);
        let id = TokenId(tokens.len());
        tokens.push(Token::new(kind, raw, std::mem::take(&mut trivia), line, id));
        line += count_newlines(raw);
        pos += len;
    }

    line += count_newlines(&trivia);
    let id = TokenId(tokens.len());
    tokens.push(Token::new(TokenKind::Eof, "", trivia, line, id));
    tokens
}

fn match_token(rest: &str) -> Option<(TokenKind, usize)> {
    let first = rest.chars().next()?;

    if first == '-' || first == '.' || first == '_' || first.is_ascii_alphanumeric() {
        if let Some(m) = DECIMAL.find(rest) {
            return Some((TokenKind::Decimal, m.end()));
        }
        if let Some(m) = INTEGER.find(rest) {
            return Some((TokenKind::Integer, m.end()));
        }
        if let Some(m) = IDENTIFIER.find(rest) {
            let kind = if is_keyword(m.as_str()) {
                TokenKind::Inline
            } else {
                TokenKind::Identifier
            };
            return Some((kind, m.end()));
        }
    } else if first == '"'
        && let Some(m) = STRING.find(rest)
    {
        return Some((TokenKind::String, m.end()));
    }

    if let Some(punctuation) = PUNCTUATION.iter().find(|p| rest.starts_with(**p)) {
        return Some((TokenKind::Inline, punctuation.len()));
    }

    Some((TokenKind::Other, first.len_utf8()))
}

fn count_newlines(text: &str) -> u32 {
    text.bytes().filter(|b| *b == b'\n').count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<(TokenKind, String)> {
        tokenise(input)
            .into_iter()
            .map(|t| (t.kind, t.raw))
            .collect()
    }

    fn rebuild(tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(|t| format!("{}{}", t.trivia, t.raw))
            .collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let tokens = kinds("interface Foo");
        assert_eq!(tokens[0], (TokenKind::Inline, "interface".to_string()));
        assert_eq!(tokens[1], (TokenKind::Identifier, "Foo".to_string()));
        assert_eq!(tokens[2], (TokenKind::Eof, String::new()));
    }

    #[test]
    fn test_numbers() {
        let tokens = kinds("0x1F -3 1.5e3 .5 -Infinity");
        assert_eq!(tokens[0].0, TokenKind::Integer);
        assert_eq!(tokens[1], (TokenKind::Integer, "-3".to_string()));
        assert_eq!(tokens[2], (TokenKind::Decimal, "1.5e3".to_string()));
        assert_eq!(tokens[3], (TokenKind::Decimal, ".5".to_string()));
        assert_eq!(tokens[4], (TokenKind::Inline, "-Infinity".to_string()));
    }

    #[test]
    fn test_ellipsis_is_single_token() {
        let tokens = kinds("long... args");
        assert_eq!(tokens[1], (TokenKind::Inline, "...".to_string()));
    }

    #[test]
    fn test_trivia_is_attached_to_next_token() {
        let tokens = tokenise("// header\n/* block */ enum");
        assert_eq!(tokens[0].trivia, "// header\n/* block */ ");
        assert_eq!(tokens[0].raw, "enum");
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn test_trailing_trivia_lands_on_eof() {
        let tokens = tokenise("a;\n\n// end\n");
        let eof = tokens.last().unwrap();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.trivia, "\n\n// end\n");
        assert_eq!(eof.line, 4);
    }

    #[test]
    fn test_lossless_for_arbitrary_text() {
        let input = "[Exposed=(Window,Worker)]\r\ninterface _Foo : Bar {\n  \"s\" # @ é;\n};";
        assert_eq!(rebuild(&tokenise(input)), input);
    }

    #[test]
    fn test_unknown_characters_become_other() {
        let tokens = kinds("@");
        assert_eq!(tokens[0], (TokenKind::Other, "@".to_string()));
    }

    #[test]
    fn test_ids_follow_stream_order() {
        let tokens = tokenise("a b c");
        let ids: Vec<_> = tokens.iter().map(|t| t.id.unwrap().0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }
}
