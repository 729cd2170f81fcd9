//! Single parsed permissions
//!
//! [`Permission`] re-exposes one permission string as parsed parts, for
//! displaying or comparing two permissions in isolation. It is not the
//! set-based lookup path; granted sets belong in
//! [`PermissionEngine`](crate::PermissionEngine). Unlike the grant grammar
//! it accepts up to ten parts and preserves case.

use std::fmt;
use std::str::FromStr;

use crate::error::{PermissionFormatError, Result};
use crate::grammar::{self, Part, PART_SEPARATOR};

/// One parsed permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permission {
    parts: Vec<Part>,
}

impl Permission {
    /// Maximum part count for a standalone permission. More permissive than
    /// the grant-oriented limit, which stays at [`grammar::MAX_PARTS`].
    pub const MAX_PARTS: usize = 10;

    /// Parses a permission string.
    ///
    /// Case is preserved; `Permission` comparison is always exact-case.
    pub fn new(permission: &str) -> Result<Self> {
        let parts = grammar::validate_with_limit(permission, Self::MAX_PARTS)?;
        Ok(Self { parts })
    }

    /// The parsed parts in order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Whether any part is a wildcard.
    pub fn has_wildcard(&self) -> bool {
        self.parts.iter().any(Part::is_wildcard)
    }

    /// Whether this permission implies `other`.
    ///
    /// Part counts must match exactly; at every position the granted part
    /// must cover all of the requested part's tokens, with a wildcard
    /// covering anything.
    pub fn implies(&self, other: &Permission) -> bool {
        self.parts.len() == other.parts.len()
            && self
                .parts
                .iter()
                .zip(&other.parts)
                .all(|(granted, requested)| granted.contains_all(requested))
    }
}

impl FromStr for Permission {
    type Err = PermissionFormatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Permission {
    /// Canonical form: subparts deduplicated and sorted, separators rejoined.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in &self.parts {
            if !first {
                write!(f, "{PART_SEPARATOR}")?;
            }
            write!(f, "{part}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perm(s: &str) -> Permission {
        Permission::new(s).unwrap()
    }

    #[test]
    fn parses_up_to_ten_parts() {
        assert_eq!(perm("a:b:c:d:e:f:g:h:i:j").parts().len(), 10);
        assert!(matches!(
            Permission::new("a:b:c:d:e:f:g:h:i:j:k"),
            Err(PermissionFormatError::TooManyParts { max: 10, actual: 11 })
        ));
    }

    #[test]
    fn rejects_bare_wildcard() {
        assert_eq!(
            Permission::new("*"),
            Err(PermissionFormatError::BareWildcard)
        );
    }

    #[test]
    fn implies_requires_equal_part_count() {
        assert!(!perm("printer:print").implies(&perm("printer:print:1")));
        assert!(!perm("printer:print:1").implies(&perm("printer:print")));
        assert!(perm("printer:print").implies(&perm("printer:print")));
    }

    #[test]
    fn wildcard_part_covers_anything() {
        assert!(perm("printer:*").implies(&perm("printer:print")));
        assert!(perm("printer:*").implies(&perm("printer:scan,print")));
        assert!(perm("*:print").implies(&perm("scanner:print")));
        assert!(!perm("printer:print").implies(&perm("printer:*")));
    }

    #[test]
    fn subpart_coverage() {
        assert!(perm("printer:print,scan").implies(&perm("printer:print")));
        assert!(perm("printer:print,scan").implies(&perm("printer:scan,print")));
        assert!(!perm("printer:print").implies(&perm("printer:print,scan")));
    }

    #[test]
    fn comparison_is_case_exact() {
        assert!(!perm("Printer:Print").implies(&perm("printer:print")));
        assert!(perm("Printer:Print").implies(&perm("Printer:Print")));
    }

    #[test]
    fn displays_canonical_form() {
        assert_eq!(perm("printer:scan,print,scan:*").to_string(), "printer:print,scan:*");
        assert_eq!(perm("a:b").to_string(), "a:b");
    }

    #[test]
    fn canonical_form_reparses() {
        let p = perm("printer:scan,print:office-1,lab_2");
        let reparsed = perm(&p.to_string());
        assert_eq!(p, reparsed);
    }
}
