//! Indexed view over a fixture's flat component list.
//!
//! Rows stay in their original order; the index maps each `Level` to its row
//! and precomputes, once, the strict descendants of every row so explosion can
//! walk the list without rescanning it per node. Rows that explosion zeroes
//! are flagged, so later stages can tell a suppressed row from one whose
//! stored quantity happens to be zero.

use std::collections::HashMap;

use picklist_models::{level_depth, parent_level, Component};

#[derive(Debug, Clone)]
pub struct BomTree {
    components: Vec<Component>,
    by_level: HashMap<String, usize>,
    descendants: Vec<Vec<usize>>,
    family_sizes: Vec<usize>,
    suppressed: Vec<bool>,
}

impl BomTree {
    pub fn new(components: Vec<Component>) -> Self {
        let mut by_level = HashMap::with_capacity(components.len());
        for (idx, component) in components.iter().enumerate() {
            // First row wins if a level is ever duplicated.
            by_level.entry(component.level.clone()).or_insert(idx);
        }

        let mut descendants = vec![Vec::new(); components.len()];
        for (idx, component) in components.iter().enumerate() {
            let mut ancestor = parent_level(&component.level);
            while let Some(level) = ancestor {
                if let Some(&owner) = by_level.get(level) {
                    descendants[owner].push(idx);
                }
                ancestor = parent_level(level);
            }
        }

        // Level strings never change during explosion, so family sizes are
        // fixed for the life of the tree.
        let family_sizes = components
            .iter()
            .map(|owner| {
                let depth = level_depth(&owner.level);
                components
                    .iter()
                    .filter(|c| c.level.contains(owner.level.as_str()) && level_depth(&c.level) >= depth)
                    .count()
            })
            .collect();

        let suppressed = vec![false; components.len()];

        Self {
            components,
            by_level,
            descendants,
            family_sizes,
            suppressed,
        }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, idx: usize) -> &Component {
        &self.components[idx]
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Strict descendants: deeper rows whose level starts with `level + "."`,
    /// in list order.
    pub fn children(&self, idx: usize) -> &[usize] {
        &self.descendants[idx]
    }

    /// Number of rows whose level contains this row's level and are at least
    /// as deep. Looser than [`children`](Self::children): it counts the row
    /// itself and substring matches such as `"11.2"` for `"1.2"`.
    pub fn family_size(&self, idx: usize) -> usize {
        self.family_sizes[idx]
    }

    /// Direct ancestor row, found by dropping the last level segment.
    pub fn parent(&self, idx: usize) -> Option<&Component> {
        parent_level(&self.components[idx].level)
            .and_then(|level| self.by_level.get(level))
            .map(|&i| &self.components[i])
    }

    pub fn quantity(&self, idx: usize) -> f64 {
        self.components[idx].quantity
    }

    /// Zeroes a row's demand and remembers that explosion did it.
    pub fn suppress(&mut self, idx: usize) {
        self.components[idx].quantity = 0.0;
        self.suppressed[idx] = true;
    }

    pub fn is_suppressed(&self, idx: usize) -> bool {
        self.suppressed[idx]
    }

    pub fn any_child_nonzero(&self, idx: usize) -> bool {
        self.descendants[idx]
            .iter()
            .any(|&child| self.components[child].quantity != 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(level: &str) -> Component {
        Component::part(level, &format!("P-{}", level), "Hardware", 1.0)
    }

    #[test]
    fn test_children_are_strict_descendants() {
        let tree = BomTree::new(vec![part("1"), part("1.1"), part("1.1.1"), part("1.2"), part("2")]);

        assert_eq!(tree.children(0), &[1, 2, 3]);
        assert_eq!(tree.children(1), &[2]);
        assert!(tree.children(4).is_empty());
    }

    #[test]
    fn test_children_skip_missing_intermediate_levels() {
        // "3.1" is absent, but "3.1.4" still starts with "3."
        let tree = BomTree::new(vec![part("3"), part("3.1.4")]);
        assert_eq!(tree.children(0), &[1]);
    }

    #[test]
    fn test_family_uses_substring_containment() {
        let tree = BomTree::new(vec![part("1.2"), part("1.2.1"), part("11.2"), part("1")]);

        assert_eq!(tree.family_size(0), 3);
        assert_eq!(tree.children(0), &[1]);
        assert_eq!(tree.family_size(1), 1);
    }

    #[test]
    fn test_suppress_flags_row() {
        let mut tree = BomTree::new(vec![part("1"), part("1.1")]);
        assert!(!tree.is_suppressed(1));

        tree.suppress(1);

        assert!(tree.is_suppressed(1));
        assert_eq!(tree.quantity(1), 0.0);
        assert!(!tree.is_suppressed(0));
        assert!(!tree.any_child_nonzero(0));
    }

    #[test]
    fn test_parent_lookup() {
        let tree = BomTree::new(vec![part("1"), part("1.1"), part("2.5")]);

        assert_eq!(tree.parent(1).map(|c| c.tdgpn.as_str()), Some("P-1"));
        assert!(tree.parent(0).is_none());
        // "2" is not in the list, so "2.5" is treated as root-level.
        assert!(tree.parent(2).is_none());
    }

    #[test]
    fn test_no_false_ancestor_across_numeric_prefix() {
        let tree = BomTree::new(vec![part("1"), part("10"), part("10.1")]);
        assert_eq!(tree.children(0), &[] as &[usize]);
        assert_eq!(tree.children(1), &[2]);
    }
}
