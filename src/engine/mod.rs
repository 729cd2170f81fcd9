//! Permission matching engine
//!
//! Owns the granted permission set as a compressed tree plus a bounded cache
//! of normalized query results. Grants are batch-atomic: a single malformed
//! entry rejects the whole batch and leaves the engine untouched.
//!
//! The engine itself is synchronous and free of I/O. `is_permitted` takes
//! `&self` so read-mostly embedders can share the engine behind a `RwLock`
//! where `grant_permissions` and `clear` take the write side; the cache sits
//! behind its own mutex so concurrent reads stay safe.

pub mod cache;
mod trie;

pub use cache::CACHE_MAX_SIZE;

use std::borrow::Cow;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::Result;
use crate::grammar;

use cache::DecisionCache;
use trie::PermissionNode;

/// Engine construction options.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Match permissions with exact case instead of folding to lowercase.
    pub case_sensitive: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
        }
    }
}

/// Trie-backed wildcard permission matcher.
///
/// # Example
///
/// ```
/// use wildcard_permissions::PermissionEngine;
///
/// let mut engine = PermissionEngine::new();
/// engine.grant_permissions(["system:*:*", "department:hr:view,edit"])?;
///
/// assert!(engine.is_permitted("system:admin:delete")?);
/// assert!(engine.is_permitted("department:hr:view")?);
/// assert!(!engine.is_permitted("department:finance:view")?);
/// # Ok::<(), wildcard_permissions::PermissionFormatError>(())
/// ```
#[derive(Debug, Default)]
pub struct PermissionEngine {
    root: PermissionNode,
    cache: Mutex<DecisionCache>,
    case_sensitive: bool,
}

impl PermissionEngine {
    /// Creates an empty, case-insensitive engine.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an empty engine with the given options.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            root: PermissionNode::default(),
            cache: Mutex::new(DecisionCache::default()),
            case_sensitive: config.case_sensitive,
        }
    }

    /// Whether this engine matches with exact case.
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    fn normalize<'a>(&self, permission: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(permission)
        } else {
            Cow::Owned(permission.to_lowercase())
        }
    }

    /// Grants a batch of permissions.
    ///
    /// The batch is atomic: every entry is normalized and validated before
    /// any entry is inserted, so a malformed permission leaves the granted
    /// set and the cache exactly as they were. On success the cache is
    /// dropped in full; proving which cached denials a new grant flips would
    /// cost more than re-deciding them.
    pub fn grant_permissions<I, S>(&mut self, permissions: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = permissions
            .into_iter()
            .map(|permission| grammar::validate(&self.normalize(permission.as_ref())))
            .collect::<Result<Vec<_>>>()?;

        for parts in &parsed {
            self.root.insert(parts);
        }
        self.cache.lock().clear();

        debug!(count = parsed.len(), "granted permissions");
        Ok(())
    }

    /// Decides whether the granted set implies one requested permission.
    ///
    /// A malformed request is an `Err`, not a cached `false`: a syntax error
    /// is a caller bug and stays distinguishable from a legitimate denial.
    /// Callers that want fail-closed behavior can map the error to a denial
    /// themselves. Well-formed decisions are cached under the normalized
    /// request string until the next grant or clear.
    pub fn is_permitted(&self, permission: &str) -> Result<bool> {
        let normalized = self.normalize(permission);

        if let Some(allowed) = self.cache.lock().get(&normalized) {
            trace!(permission = %normalized, allowed, "cache hit");
            return Ok(allowed);
        }

        let parts = grammar::validate(&normalized)?;
        let allowed = self.root.implies(&parts);

        self.cache.lock().insert(normalized.into_owned(), allowed);
        trace!(permission, allowed, "permission decided");
        Ok(allowed)
    }

    /// Resets the engine to its freshly constructed state.
    pub fn clear(&mut self) {
        self.root = PermissionNode::default();
        self.cache.lock().clear();
        debug!("cleared granted permissions");
    }

    /// Number of decisions currently cached.
    pub fn cached_decisions(&self) -> usize {
        self.cache.lock().len()
    }
}
