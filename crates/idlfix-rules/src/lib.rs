//! idlfix rules
//!
//! Built-in validation rules for parsed WebIDL and the engine that runs them
//! and applies their autofixes.

pub mod builtin;
pub mod engine;

pub use builtin::{BUILTIN_RULES, BuiltinRule};
pub use engine::{RuleEngine, apply_fixes};
