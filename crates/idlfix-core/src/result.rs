//! Result type alias for idlfix operations

use crate::error::IdlfixError;

/// Standard Result type for idlfix operations
pub type Result<T> = std::result::Result<T, IdlfixError>;

