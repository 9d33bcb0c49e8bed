//! Symmetry resolver.
//!
//! Nodes at the same phase within each wave period share a symmetry group.
//! Editing one node fans out to every member of its group so the shape keeps
//! its rotational symmetry.

use crate::model::Node;
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Node indices belonging to one symmetry group. A group has one member per
/// wave period, so it rarely spills past the inline capacity.
pub type SiblingSet = SmallVec<[usize; 16]>;

/// Every index sharing `index`'s symmetry group, itself included, ascending.
/// An out-of-range index gives an empty set.
pub fn siblings_of(index: usize, nodes: &[Node]) -> SiblingSet {
    let Some(group) = nodes.get(index).map(|n| n.symmetry_group) else {
        return SiblingSet::new();
    };
    nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| n.symmetry_group == group)
        .map(|(i, _)| i)
        .collect()
}

/// Partition the ring into its symmetry groups, keyed by group tag.
pub fn partition(nodes: &[Node]) -> BTreeMap<usize, SiblingSet> {
    let mut groups: BTreeMap<usize, SiblingSet> = BTreeMap::new();
    for (i, n) in nodes.iter().enumerate() {
        groups.entry(n.symmetry_group).or_default().push(i);
    }
    groups
}

// ─── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::compute_nodes;
    use crate::params::Params;

    #[test]
    fn siblings_share_group_and_include_self() {
        let nodes = compute_nodes(&Params::default());
        for index in 0..nodes.len() {
            let siblings = siblings_of(index, &nodes);
            assert!(siblings.contains(&index));
            assert_eq!(siblings.len(), 5);
            let group = nodes[index].symmetry_group;
            assert!(siblings.iter().all(|&i| nodes[i].symmetry_group == group));
        }
    }

    #[test]
    fn siblings_are_one_period_apart() {
        let nodes = compute_nodes(&Params::default());
        let siblings = siblings_of(1, &nodes);
        assert_eq!(siblings.as_slice(), &[1, 5, 9, 13, 17]);
    }

    #[test]
    fn out_of_range_index_has_no_siblings() {
        let nodes = compute_nodes(&Params::default());
        assert!(siblings_of(nodes.len(), &nodes).is_empty());
        assert!(siblings_of(0, &[]).is_empty());
    }

    #[test]
    fn partition_covers_every_node_once() {
        let params = Params {
            frequency: 4,
            resolution: 3,
            ..Params::default()
        };
        let nodes = compute_nodes(&params);
        let groups = partition(&nodes);
        assert_eq!(groups.len(), 3);
        let total: usize = groups.values().map(|g| g.len()).sum();
        assert_eq!(total, nodes.len());
    }
}
