//! Error types for the permission engine

use thiserror::Error;

use crate::grammar::MAX_PART_LENGTH;

/// Grammar violations raised while parsing a permission string.
///
/// This is the only error kind the crate produces. Every variant indicates a
/// caller bug (malformed grant configuration or malformed request), never a
/// transient condition, so there is no retryable class here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionFormatError {
    /// Empty input string
    #[error("permission must be a non-empty string")]
    Empty,

    /// Too many colon-delimited parts
    #[error("permission must have between 1 and {max} parts, got {actual}")]
    TooManyParts { max: usize, actual: usize },

    /// Leading, trailing, or doubled colon
    #[error("empty permission parts are not allowed")]
    EmptyPart,

    /// A bare `*` grants everything and is rejected outright
    #[error("a single wildcard permission is not allowed")]
    BareWildcard,

    /// Part longer than [`MAX_PART_LENGTH`] characters
    #[error("permission part \"{part}\" exceeds maximum length of {MAX_PART_LENGTH}")]
    PartTooLong { part: String },

    /// Part contains characters outside `[A-Za-z0-9_,*-]`
    #[error("invalid characters in permission part \"{part}\"")]
    InvalidCharacters { part: String },

    /// Leading, trailing, or doubled comma within a part
    #[error("empty subparts are not allowed in part \"{part}\"")]
    EmptySubpart { part: String },

    /// `*` listed alongside other subparts in the same part
    #[error("wildcard cannot be mixed with other subparts in \"{part}\"")]
    MixedWildcard { part: String },

    /// Subpart token contains `*` or other characters outside `[A-Za-z0-9_-]`
    #[error("invalid characters in subpart \"{subpart}\"")]
    InvalidSubpart { subpart: String },
}

/// Result type for permission operations
pub type Result<T> = std::result::Result<T, PermissionFormatError>;
