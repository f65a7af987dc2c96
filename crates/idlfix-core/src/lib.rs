//! idlfix core
//!
//! Lossless, extensible WebIDL parsing for the Gecko and Servo dialects.
//! A parsed [`Root`] keeps every token with its leading whitespace and
//! comments, so [`write`] reproduces the input exactly; [`Autofix`]es mutate
//! the tree in place before it is written back.

pub mod autofix;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod mask;
pub mod parser;
pub mod result;
pub mod syntax;

pub use autofix::Autofix;
pub use config::{
    ALL_RULES, AutofixConfiguration, ConfigLoader, DEFAULT_AUTOFIX_RULES, FilesConfiguration,
    IdlfixConfig, LinterConfiguration, RuleSeverity,
};
pub use diagnostics::{Diagnostic, Severity};
pub use error::{ErrorKind, IdlfixError};
pub use mask::{mask, unmask};
pub use parser::{parse, parse_with, write};
pub use result::Result;
pub use syntax::{
    Definition, Dialect, Item, Member, ParseError, ProductionRegistry, Root, Syntax, Token,
    TokenId, TokenKind, write_node,
};

/// Initialize the tracing subscriber for logging
///
/// Logs go to stderr; `RUST_LOG` overrides the default `warn` filter.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
