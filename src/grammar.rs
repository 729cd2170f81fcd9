//! Permission string grammar and validation
//!
//! A permission is a colon-separated sequence of parts, each part either a
//! standalone wildcard `*` or a comma-separated set of tokens:
//!
//! - `printer:print` — domain and action
//! - `printer:print,scan:office-1` — multiple actions, one instance
//! - `printer:*:office-1` — any action on one instance
//!
//! Validation is strict: malformed strings never reach the grant trie. The
//! rules below are applied in order and the first failure wins.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{PermissionFormatError, Result};

/// Maximum number of colon-delimited parts in a granted permission.
pub const MAX_PARTS: usize = 3;

/// Maximum length of a single part, measured before subpart splitting.
pub const MAX_PART_LENGTH: usize = 50;

/// The standalone wildcard token.
pub const WILDCARD: &str = "*";

/// Separator between parts.
pub const PART_SEPARATOR: char = ':';

/// Separator between subpart tokens within a part.
pub const SUBPART_SEPARATOR: char = ',';

/// One parsed part of a permission.
///
/// A part is either the wildcard or a non-empty, deduplicated set of tokens.
/// The grammar guarantees the two never mix within a single part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// Standalone `*`, matching any value at this position.
    Wildcard,
    /// Deduplicated token set, e.g. `read,write`.
    Subparts(BTreeSet<String>),
}

impl Part {
    /// Returns `true` if this part is the wildcard.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Part::Wildcard)
    }

    /// Returns the token set, or `None` for a wildcard part.
    pub fn subparts(&self) -> Option<&BTreeSet<String>> {
        match self {
            Part::Wildcard => None,
            Part::Subparts(tokens) => Some(tokens),
        }
    }

    /// Whether a granted `self` covers every token of a requested `other`.
    ///
    /// A wildcard covers anything; a requested wildcard is covered only by a
    /// granted wildcard; otherwise every requested token must be granted.
    pub fn contains_all(&self, other: &Part) -> bool {
        match (self, other) {
            (Part::Wildcard, _) => true,
            (_, Part::Wildcard) => false,
            (Part::Subparts(granted), Part::Subparts(requested)) => {
                requested.is_subset(granted)
            }
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Wildcard => f.write_str(WILDCARD),
            Part::Subparts(tokens) => {
                let mut first = true;
                for token in tokens {
                    if !first {
                        f.write_str(",")?;
                    }
                    f.write_str(token)?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

/// Valid part characters: `[A-Za-z0-9_,*-]`
fn is_valid_part_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | SUBPART_SEPARATOR | '*' | '-')
}

/// Valid subpart token characters: `[A-Za-z0-9_-]` (no embedded wildcard)
fn is_valid_subpart_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-')
}

/// Validates a permission string against the grant grammar and splits it
/// into parsed parts.
///
/// Uses the grant-oriented [`MAX_PARTS`] limit. Callers that need the
/// permissive single-permission limit go through [`validate_with_limit`].
pub fn validate(raw: &str) -> Result<Vec<Part>> {
    validate_with_limit(raw, MAX_PARTS)
}

/// Validates a permission string with an explicit part-count limit.
///
/// Pure and side-effect free; safe to call repeatedly and concurrently.
pub(crate) fn validate_with_limit(raw: &str, max_parts: usize) -> Result<Vec<Part>> {
    if raw.is_empty() {
        return Err(PermissionFormatError::Empty);
    }

    let parts: Vec<&str> = raw.split(PART_SEPARATOR).collect();

    if parts.len() > max_parts {
        return Err(PermissionFormatError::TooManyParts {
            max: max_parts,
            actual: parts.len(),
        });
    }

    if parts.iter().any(|part| part.is_empty()) {
        return Err(PermissionFormatError::EmptyPart);
    }

    // A bare `*` would grant everything and must stay inexpressible.
    if parts.len() == 1 && parts[0] == WILDCARD {
        return Err(PermissionFormatError::BareWildcard);
    }

    parts.into_iter().map(parse_part).collect()
}

fn parse_part(part: &str) -> Result<Part> {
    // Length is measured on the raw part, before splitting on commas.
    if part.chars().count() > MAX_PART_LENGTH {
        return Err(PermissionFormatError::PartTooLong {
            part: part.to_string(),
        });
    }

    if !part.chars().all(is_valid_part_char) {
        return Err(PermissionFormatError::InvalidCharacters {
            part: part.to_string(),
        });
    }

    let tokens: Vec<&str> = part.split(SUBPART_SEPARATOR).collect();

    if tokens.iter().any(|token| token.is_empty()) {
        return Err(PermissionFormatError::EmptySubpart {
            part: part.to_string(),
        });
    }

    if tokens.contains(&WILDCARD) {
        if tokens.len() > 1 {
            return Err(PermissionFormatError::MixedWildcard {
                part: part.to_string(),
            });
        }
        return Ok(Part::Wildcard);
    }

    let mut subparts = BTreeSet::new();
    for token in tokens {
        // The part-level class admits `*` and `,`; tokens admit neither, so
        // partial wildcards like `pre*fix` are rejected here.
        if !token.chars().all(is_valid_subpart_char) {
            return Err(PermissionFormatError::InvalidSubpart {
                subpart: token.to_string(),
            });
        }
        subparts.insert(token.to_string());
    }

    Ok(Part::Subparts(subparts))
}
