//! # Wildcard Permissions
//!
//! Hierarchical, wildcard-aware permission matching in the Apache Shiro
//! `WildcardPermission` style. Grant a set of permission strings to a
//! subject, then ask whether the set implies a requested permission.
//!
//! ## Features
//!
//! - **Strict grammar** — up to three colon-separated parts, comma-separated
//!   subpart sets, standalone `*` wildcards, `[A-Za-z0-9_-]` tokens; every
//!   malformed string is rejected before it reaches the granted set
//! - **Trie-backed matching** — grants are stored as a compressed tree keyed
//!   by part position, so a decision walks at most one short path
//! - **Exact part counts** — a 2-part grant never implies a 3-part request,
//!   wildcards included
//! - **Bounded decision cache** — up to 10,000 normalized results, dropped in
//!   full on every grant or clear so a stale decision is never served
//! - **Case folding** — permissions are lowercased by default; opt into
//!   exact-case matching at construction
//!
//! ## Example
//!
//! ```
//! use wildcard_permissions::{PermissionEngine, PermissionFormatError};
//!
//! fn main() -> Result<(), PermissionFormatError> {
//!     let mut engine = PermissionEngine::new();
//!     engine.grant_permissions([
//!         "system:*:*",
//!         "department:hr:view,edit",
//!     ])?;
//!
//!     assert!(engine.is_permitted("system:admin:delete")?);
//!     assert!(engine.is_permitted("department:hr:view")?);
//!     assert!(!engine.is_permitted("department:hr:delete")?);
//!     assert!(!engine.is_permitted("department:finance:view")?);
//!
//!     Ok(())
//! }
//! ```
//!
//! Deciding a malformed request is an error rather than a silent denial, so
//! a caller bug stays distinguishable from a legitimate `false`.

pub mod engine;
pub mod error;
pub mod grammar;
pub mod permission;

// Re-export commonly used types
pub use engine::{EngineConfig, PermissionEngine, CACHE_MAX_SIZE};
pub use error::{PermissionFormatError, Result};
pub use grammar::{Part, MAX_PARTS, MAX_PART_LENGTH};
pub use permission::Permission;
