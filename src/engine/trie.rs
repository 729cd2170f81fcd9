//! Compressed grant tree
//!
//! Each node corresponds to one part position reached by a specific sequence
//! of prior subpart choices (or by a wildcard). Inserting a grant of length N
//! touches exactly one path of N node levels from the root; grants that agree
//! on a prefix share nodes.
//!
//! Part-count exactness is the load-bearing invariant here: a 2-part grant
//! never implies a 3-part request or vice versa, wildcards included. Because
//! grants of different lengths can share a node, every token grant and every
//! wildcard grant records the total part-count of the grant that produced it,
//! and the query only honors entries whose recorded length matches the
//! request. Merging lengths into a single per-node flag would quietly permit
//! e.g. `a:x` after granting only `a:*:c` and `a:b`.

use std::collections::{HashMap, HashSet};

use crate::grammar::Part;

/// One level of the grant tree.
#[derive(Debug, Default)]
pub(crate) struct PermissionNode {
    /// Token grants at this position, each with the total part-counts of the
    /// grants that placed it here. Empty on pure wildcard nodes.
    subparts: HashMap<String, HashSet<usize>>,
    /// Total part-counts of grants whose part at this position was `*`.
    wildcard_lengths: HashSet<usize>,
    /// Continuations keyed by subpart token.
    children: HashMap<String, PermissionNode>,
    /// Continuation beneath a non-final wildcard.
    wildcard_child: Option<Box<PermissionNode>>,
    /// Total part-counts of every grant passing through this node.
    grant_lengths: HashSet<usize>,
}

impl PermissionNode {
    /// Inserts one validated permission into the tree.
    pub fn insert(&mut self, parts: &[Part]) {
        self.insert_at(parts, 0);
    }

    fn insert_at(&mut self, parts: &[Part], index: usize) {
        self.grant_lengths.insert(parts.len());

        let descend = index + 1 < parts.len();
        match &parts[index] {
            Part::Wildcard => {
                self.wildcard_lengths.insert(parts.len());
                if descend {
                    self.wildcard_child
                        .get_or_insert_with(Default::default)
                        .insert_at(parts, index + 1);
                }
            }
            Part::Subparts(tokens) => {
                // A multi-token part fans out into one branch per token; all
                // branches carry the same remaining parts.
                for token in tokens {
                    self.subparts
                        .entry(token.clone())
                        .or_default()
                        .insert(parts.len());
                    if descend {
                        self.children
                            .entry(token.clone())
                            .or_default()
                            .insert_at(parts, index + 1);
                    }
                }
            }
        }
    }

    /// Whether the granted set implies a validated request.
    pub fn implies(&self, parts: &[Part]) -> bool {
        self.implies_at(parts, 0)
    }

    fn implies_at(&self, parts: &[Part], index: usize) -> bool {
        // No grant of this exact length passes through here.
        if !self.grant_lengths.contains(&parts.len()) {
            return false;
        }

        let last = index + 1 == parts.len();

        if self.wildcard_lengths.contains(&parts.len()) {
            if last {
                return true;
            }
            if let Some(child) = &self.wildcard_child {
                if child.implies_at(parts, index + 1) {
                    return true;
                }
            }
            // A node can hold a wildcard grant and sibling token grants at
            // once (`a:*:x` plus `a:b:y`). When the wildcard subtree fails,
            // the token branches still get their turn.
        }

        let Part::Subparts(requested) = &parts[index] else {
            // A requested `*` is satisfied only by a granted wildcard.
            return false;
        };

        // Covering requirement, not set equality: every requested token must
        // be granted at this position by a grant of the request's length.
        let covered = requested.iter().all(|token| {
            self.subparts
                .get(token)
                .is_some_and(|lengths| lengths.contains(&parts.len()))
        });
        if !covered {
            return false;
        }

        if last {
            return true;
        }

        requested.iter().any(|token| {
            self.children
                .get(token)
                .is_some_and(|child| child.implies_at(parts, index + 1))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::validate;

    fn tree(grants: &[&str]) -> PermissionNode {
        let mut root = PermissionNode::default();
        for grant in grants {
            root.insert(&validate(grant).unwrap());
        }
        root
    }

    fn implied(root: &PermissionNode, request: &str) -> bool {
        root.implies(&validate(request).unwrap())
    }

    #[test]
    fn empty_tree_implies_nothing() {
        let root = PermissionNode::default();
        assert!(!implied(&root, "printer:print"));
    }

    #[test]
    fn exact_match() {
        let root = tree(&["printer:print"]);
        assert!(implied(&root, "printer:print"));
        assert!(!implied(&root, "printer:scan"));
        assert!(!implied(&root, "scanner:print"));
    }

    #[test]
    fn part_count_is_exact() {
        let root = tree(&["printer:print:office"]);
        assert!(implied(&root, "printer:print:office"));
        assert!(!implied(&root, "printer:print"));
        assert!(!implied(&root, "printer"));

        let root = tree(&["printer:*"]);
        assert!(implied(&root, "printer:print"));
        assert!(!implied(&root, "printer:print:office"));
    }

    #[test]
    fn wildcard_in_middle_position() {
        let root = tree(&["printer:*:office"]);
        assert!(implied(&root, "printer:print:office"));
        assert!(implied(&root, "printer:scan:office"));
        assert!(!implied(&root, "printer:print:lobby"));
        assert!(!implied(&root, "printer:print"));
    }

    #[test]
    fn fan_out_insertion_shares_suffix() {
        let root = tree(&["printer:print,scan:office"]);
        assert!(implied(&root, "printer:print:office"));
        assert!(implied(&root, "printer:scan:office"));
        assert!(!implied(&root, "printer:copy:office"));
    }

    #[test]
    fn requested_comma_list_is_a_covering_check() {
        let root = tree(&["doc:read,write"]);
        assert!(implied(&root, "doc:read"));
        assert!(implied(&root, "doc:read,write"));
        assert!(!implied(&root, "doc:read,delete"));
    }

    #[test]
    fn requested_wildcard_needs_granted_wildcard() {
        let root = tree(&["printer:print"]);
        assert!(!implied(&root, "printer:*"));

        let root = tree(&["printer:*"]);
        assert!(implied(&root, "printer:*"));
    }

    #[test]
    fn wildcard_branch_falls_back_to_token_branch() {
        // The wildcard subtree under `a:*:x` does not cover `a:b:y`, but the
        // sibling token grant does.
        let root = tree(&["a:*:x", "a:b:y"]);
        assert!(implied(&root, "a:b:y"));
        assert!(implied(&root, "a:b:x"));
        assert!(implied(&root, "a:zzz:x"));
        assert!(!implied(&root, "a:zzz:y"));
    }

    #[test]
    fn shared_nodes_do_not_bridge_lengths() {
        // `a:*:c` is a 3-part grant and `a:b` a 2-part grant; neither implies
        // the 2-part request `a:x` even though both pass through node `a`.
        let root = tree(&["a:*:c", "a:b"]);
        assert!(!implied(&root, "a:x"));
        assert!(implied(&root, "a:b"));
        assert!(implied(&root, "a:x:c"));

        // Same conflation on the token side.
        let root = tree(&["a:b:c", "a:x"]);
        assert!(!implied(&root, "a:b"));
        assert!(implied(&root, "a:x"));
        assert!(implied(&root, "a:b:c"));
    }

    #[test]
    fn wildcard_never_bridges_lengths() {
        let root = tree(&["a:*", "a:b:c"]);
        assert!(implied(&root, "a:anything"));
        assert!(implied(&root, "a:b:c"));
        assert!(!implied(&root, "a:anything:c"));
    }

    #[test]
    fn single_part_grants() {
        let root = tree(&["admin"]);
        assert!(implied(&root, "admin"));
        assert!(!implied(&root, "admin:anything"));
    }
}
