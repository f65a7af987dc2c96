//! Parse failures and the production result type

use thiserror::Error;

/// A committed syntax error
///
/// Carries enough context to point a user at the offending line: the source
/// name, the 1-based line of the token the parser stopped at, and the source
/// text of the few tokens before it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error at line {line} in {source_name}, since `{context}`:\n{message}")]
pub struct ParseError {
    pub source_name: String,
    pub line: u32,
    pub message: String,
    pub context: String,
}

impl ParseError {
    pub fn new(
        source_name: impl Into<String>,
        line: u32,
        message: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            line,
            message: message.into(),
            context: context.into(),
        }
    }
}

/// Shape a production discovered after committing, which a later production
/// may be able to parse instead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum WrongVariant {
    /// `interface Name` not followed by a body
    Bodyless,
}

/// Failure of a production after its commit point
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductionError {
    #[error(transparent)]
    Syntax(ParseError),

    /// Malformed for this production, but possibly well-formed for another.
    /// Treated as `Syntax` unless the registry has a fallback for the tag.
    #[error("{1}")]
    WrongVariant(WrongVariant, ParseError),
}

impl ProductionError {
    pub fn parse_error(&self) -> &ParseError {
        match self {
            ProductionError::Syntax(err) | ProductionError::WrongVariant(_, err) => err,
        }
    }

    pub fn into_parse_error(self) -> ParseError {
        match self {
            ProductionError::Syntax(err) | ProductionError::WrongVariant(_, err) => err,
        }
    }

    /// The wrong-variant tag, if any
    pub fn variant(&self) -> Option<WrongVariant> {
        match self {
            ProductionError::Syntax(_) => None,
            ProductionError::WrongVariant(tag, _) => Some(*tag),
        }
    }
}

impl From<ProductionError> for ParseError {
    fn from(err: ProductionError) -> Self {
        err.into_parse_error()
    }
}

/// `Ok(None)` means the production did not match and consumed nothing
pub type PResult<T> = Result<Option<T>, ProductionError>;
