use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::entry::{format_entry, split_path, PermissionEntry};
use super::errors::PermissionResult;
use super::value_objects::{PermissionCheck, PermissionType};

// =============================================================================
// PERMISSION NODE: one segment of a dotted permission path
// =============================================================================

/// Name given to the synthesised root node.
pub const ROOT_NAME: &str = "ROOT";

/// A node in the permission tree.
///
/// Each node exclusively owns its children, keyed by segment. A full key such
/// as `Admin.Player.Read` is walked from the root one segment at a time.
/// Nodes created only to reach a deeper path carry `PermissionType::Inherit`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermissionNode {
    name: String,
    kind: PermissionType,
    children: BTreeMap<String, PermissionNode>,
}

impl PermissionNode {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: PermissionType::Inherit,
            children: BTreeMap::new(),
        }
    }

    /// Create an empty tree.
    pub fn root() -> Self {
        Self::new(ROOT_NAME)
    }

    /// Build a tree from serialized entries.
    ///
    /// Bare entries take `fallback`. Stops at the first malformed entry.
    pub fn from_entries<I, S>(entries: I, fallback: PermissionType) -> PermissionResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut root = Self::root();
        for entry in entries {
            root.add_permission(entry.as_ref(), fallback)?;
        }
        Ok(root)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PermissionType {
        self.kind
    }

    /// Direct child by segment.
    pub fn child(&self, segment: &str) -> Option<&PermissionNode> {
        self.children.get(segment)
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Add a permission entry.
    ///
    /// `entry` is a dotted path, optionally followed by a type token which
    /// takes precedence over `kind`. Missing intermediate nodes are created
    /// as INHERIT; the terminal node's type is overwritten. On error the
    /// tree is left untouched.
    pub fn add_permission(&mut self, entry: &str, kind: PermissionType) -> PermissionResult<()> {
        let entry = PermissionEntry::parse(entry)?;
        let kind = entry.kind_or(kind);
        self.set_permission(&entry.path, kind)
    }

    /// Set the type of a bare dotted path, creating nodes as needed.
    pub fn set_permission(&mut self, path: &str, kind: PermissionType) -> PermissionResult<()> {
        let segments = split_path(path)?;

        let mut node = self;
        for segment in segments {
            node = node
                .children
                .entry(segment.to_string())
                .or_insert_with(|| PermissionNode::new(segment));
        }
        node.kind = kind;
        Ok(())
    }

    /// Remove a path and everything beneath it.
    ///
    /// Returns true if a node was removed. Malformed paths remove nothing.
    pub fn remove_permission(&mut self, path: &str) -> bool {
        let Ok(segments) = split_path(path) else {
            return false;
        };
        let Some((last, parents)) = segments.split_last() else {
            return false;
        };

        let mut node = self;
        for segment in parents {
            match node.children.get_mut(*segment) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.children.remove(*last).is_some()
    }

    /// Resolve a path against this tree.
    ///
    /// Walks from the root. Any DISALLOW on the way halts with a deny, so a
    /// coarse deny beats a finer grant. Otherwise the deepest ALLOW seen
    /// decides; with none, the result is INHERIT and the caller should
    /// consult roles. Malformed paths resolve to INHERIT.
    pub fn has_permission(&self, path: &str) -> PermissionCheck {
        let Ok(segments) = split_path(path) else {
            return PermissionCheck::UNDECIDED;
        };

        let mut resolved = PermissionType::Inherit;
        let mut node = self;
        for segment in segments {
            let Some(child) = node.children.get(segment) else {
                break;
            };
            match child.kind {
                PermissionType::Disallow => return PermissionCheck::DENIED,
                PermissionType::Allow => resolved = PermissionType::Allow,
                PermissionType::Inherit => {}
            }
            node = child;
        }

        if resolved == PermissionType::Allow {
            PermissionCheck::ALLOWED
        } else {
            PermissionCheck::UNDECIDED
        }
    }

    /// Flatten the tree to entry lines, depth-first in segment order.
    ///
    /// INHERIT nodes carry no information and are omitted; adding every
    /// line back into an empty tree gives an equivalent tree.
    pub fn serialize(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_entries("", &mut out);
        out
    }

    fn collect_entries(&self, prefix: &str, out: &mut Vec<String>) {
        for (segment, child) in &self.children {
            let path = if prefix.is_empty() {
                segment.clone()
            } else {
                format!("{}.{}", prefix, segment)
            };
            if child.kind.is_explicit() {
                out.push(format_entry(&path, child.kind));
            }
            child.collect_entries(&path, out);
        }
    }

    /// Drop every child.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Indented dump of the tree for diagnostics.
    pub fn debug_print(&self, indent: usize) -> String {
        let mut out = String::new();
        self.write_debug(indent, &mut out);
        out
    }

    fn write_debug(&self, indent: usize, out: &mut String) {
        let _ = writeln!(out, "{:indent$}{} {}", "", self.name, self.kind);
        for child in self.children.values() {
            child.write_debug(indent + 2, out);
        }
    }
}

impl Default for PermissionNode {
    fn default() -> Self {
        Self::root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PermissionError;

    fn tree(entries: &[&str]) -> PermissionNode {
        PermissionNode::from_entries(entries.iter(), PermissionType::Inherit).unwrap()
    }

    // =========================================================================
    // ADD / QUERY
    // =========================================================================

    #[test]
    fn test_allow_then_check() {
        let mut root = PermissionNode::root();
        root.add_permission("Admin.Player.Read", PermissionType::Allow)
            .unwrap();

        assert_eq!(
            root.has_permission("Admin.Player.Read"),
            PermissionCheck::ALLOWED
        );
    }

    #[test]
    fn test_disallow_then_check() {
        let mut root = PermissionNode::root();
        root.add_permission("Admin.Player.Read", PermissionType::Disallow)
            .unwrap();

        assert_eq!(
            root.has_permission("Admin.Player.Read"),
            PermissionCheck::DENIED
        );
    }

    #[test]
    fn test_intermediate_nodes_inherit() {
        let root = tree(&["Admin.Player.Read ALLOW"]);
        let admin = root.child("Admin").unwrap();
        assert_eq!(admin.kind(), PermissionType::Inherit);
        assert_eq!(
            admin.child("Player").unwrap().kind(),
            PermissionType::Inherit
        );
        assert_eq!(root.has_permission("Admin"), PermissionCheck::UNDECIDED);
    }

    #[test]
    fn test_coarse_disallow_beats_fine_allow() {
        let root = tree(&["Admin.Player.Read ALLOW", "Admin DISALLOW"]);
        assert_eq!(
            root.has_permission("Admin.Player.Read"),
            PermissionCheck::DENIED
        );
    }

    #[test]
    fn test_fine_disallow_beats_coarse_allow() {
        let root = tree(&["Admin ALLOW", "Admin.Player DISALLOW"]);
        assert_eq!(root.has_permission("Admin.Roles"), PermissionCheck::ALLOWED);
        assert_eq!(
            root.has_permission("Admin.Player.Read"),
            PermissionCheck::DENIED
        );
    }

    #[test]
    fn test_ancestor_allow_covers_missing_children() {
        let root = tree(&["Admin ALLOW"]);
        assert_eq!(
            root.has_permission("Admin.Player.Read"),
            PermissionCheck::ALLOWED
        );
    }

    #[test]
    fn test_unknown_path_is_inherit() {
        let root = tree(&["Admin ALLOW"]);
        assert_eq!(root.has_permission("Teleport"), PermissionCheck::UNDECIDED);
    }

    #[test]
    fn test_deeper_disallow_does_not_affect_parent() {
        let root = tree(&["Admin ALLOW", "Admin.Player.Delete DISALLOW"]);
        assert_eq!(root.has_permission("Admin.Player"), PermissionCheck::ALLOWED);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut once = PermissionNode::root();
        once.add_permission("A.B", PermissionType::Allow).unwrap();
        let mut twice = once.clone();
        twice.add_permission("A.B", PermissionType::Allow).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_inline_type_overrides_argument() {
        let mut root = PermissionNode::root();
        root.add_permission("A.B DISALLOW", PermissionType::Allow)
            .unwrap();
        assert!(root.has_permission("A.B").is_denied());
    }

    #[test]
    fn test_readd_changes_type() {
        let mut root = tree(&["A ALLOW"]);
        root.add_permission("A", PermissionType::Disallow).unwrap();
        assert!(root.has_permission("A").is_denied());
    }

    // =========================================================================
    // MALFORMED INPUT
    // =========================================================================

    #[test]
    fn test_empty_segment_rejected_without_change() {
        let mut root = tree(&["Admin ALLOW"]);
        let before = root.clone();

        let err = root
            .add_permission("Admin..Read", PermissionType::Allow)
            .unwrap_err();

        assert!(matches!(err, PermissionError::EmptySegment { .. }));
        assert_eq!(root, before);
    }

    #[test]
    fn test_whitespace_segment_rejected_without_change() {
        let mut root = tree(&["Admin ALLOW"]);
        let before = root.clone();

        let err = root
            .set_permission("Admin.Player Read", PermissionType::Allow)
            .unwrap_err();

        assert!(matches!(
            err,
            PermissionError::WhitespaceInSegment { position: 1, .. }
        ));
        assert_eq!(root, before);
        assert_eq!(
            root.has_permission("Admin.Player Read"),
            PermissionCheck::UNDECIDED
        );
        assert_eq!(root.serialize(), vec!["Admin ALLOW".to_string()]);
    }

    #[test]
    fn test_empty_path_rejected() {
        let mut root = PermissionNode::root();
        assert_eq!(
            root.add_permission("", PermissionType::Allow),
            Err(PermissionError::EmptyPath)
        );
        assert!(root.is_leaf());
    }

    #[test]
    fn test_malformed_query_is_undecided() {
        let root = tree(&["Admin DISALLOW"]);
        assert_eq!(root.has_permission("Admin..X"), PermissionCheck::UNDECIDED);
        assert_eq!(root.has_permission(""), PermissionCheck::UNDECIDED);
    }

    // =========================================================================
    // REMOVE / CLEAR
    // =========================================================================

    #[test]
    fn test_remove_drops_subtree() {
        let mut root = tree(&["Admin.Player.Read ALLOW", "Admin.Roles ALLOW"]);
        assert!(root.remove_permission("Admin.Player"));
        assert_eq!(
            root.has_permission("Admin.Player.Read"),
            PermissionCheck::UNDECIDED
        );
        assert_eq!(root.has_permission("Admin.Roles"), PermissionCheck::ALLOWED);
    }

    #[test]
    fn test_remove_missing() {
        let mut root = tree(&["Admin ALLOW"]);
        assert!(!root.remove_permission("Admin.Player"));
        assert!(!root.remove_permission("Nope.Deep"));
        assert!(!root.remove_permission("Admin..X"));
    }

    #[test]
    fn test_clear() {
        let mut root = tree(&["Admin ALLOW", "Teleport ALLOW"]);
        root.clear();
        assert!(root.is_leaf());
        assert!(root.serialize().is_empty());
    }

    // =========================================================================
    // SERIALIZE / DEBUG
    // =========================================================================

    #[test]
    fn test_serialize_depth_first_skips_inherit() {
        let root = tree(&[
            "Teleport ALLOW",
            "Admin.Player.Read ALLOW",
            "Admin DISALLOW",
            "Admin.Roles INHERIT",
        ]);

        assert_eq!(
            root.serialize(),
            vec![
                "Admin DISALLOW".to_string(),
                "Admin.Player.Read ALLOW".to_string(),
                "Teleport ALLOW".to_string(),
            ]
        );
    }

    #[test]
    fn test_serialize_roundtrip_agrees() {
        let original = tree(&["A ALLOW", "A.B DISALLOW", "C.D.E ALLOW", "F INHERIT"]);
        let rebuilt = tree(
            &original
                .serialize()
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>(),
        );

        for path in ["A", "A.B", "A.B.C", "A.X", "C", "C.D", "C.D.E", "F", "G"] {
            assert_eq!(
                original.has_permission(path),
                rebuilt.has_permission(path),
                "path {path}"
            );
        }
    }

    #[test]
    fn test_debug_print_indents() {
        let root = tree(&["Admin.Read ALLOW"]);
        let dump = root.debug_print(2);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines[0], "  ROOT INHERIT");
        assert_eq!(lines[1], "    Admin INHERIT");
        assert_eq!(lines[2], "      Read ALLOW");
    }
}
