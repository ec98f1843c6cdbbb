use crate::error::Error;

/// Result type returned by every fallible operation in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
