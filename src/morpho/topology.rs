use std::collections::HashMap;

use thiserror::Error;

use crate::morpho::store::ParentIndex;
use crate::swc::NodeNum;

/// Maximum children a single parent may be named by.
const MAX_CHILDREN: usize = 2;

/// Corrupt-topology failures. Any of these aborts the whole run; no
/// partial statistics are ever produced past one.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// A parent value occurring more than twice in the parent array.
    #[error("corrupt trace: more than two children for a single parent (node {parent} has {count})")]
    ExcessChildren {
        /// The over-referenced parent node.
        parent: NodeNum,
        /// How many children name it.
        count: usize,
    },

    /// A parent reference that resolves to no stored node.
    #[error("corrupt trace: node {node} references missing parent {parent}")]
    DanglingParent {
        /// Node carrying the reference.
        node: NodeNum,
        /// The unresolvable parent value.
        parent: NodeNum,
    },

    /// An interior node whose child link cannot be resolved mid-walk.
    ///
    /// Unreachable for input that passed classification.
    #[error("corrupt trace: interior node {node} has no resolvable child link")]
    UnlinkedInterior {
        /// Node whose outgoing link is missing.
        node: NodeNum,
    },

    /// A node number with no backing record in the store.
    ///
    /// Walk-time counterpart of `DanglingParent`.
    #[error("corrupt trace: node {node} has no stored record")]
    MissingNode {
        /// The unresolvable node number.
        node: NodeNum,
    },
}

/// Derived classification of every node in a trace.
///
/// Computed once per run from the [`ParentIndex`] and read-only afterward.
/// Every node falls in exactly one of root / interior / branch / terminal,
/// except that an isolated point is both root and terminal.
#[derive(Debug, Clone)]
pub struct Topology {
    roots: Vec<NodeNum>,
    terminals: Vec<NodeNum>,
    branches: Vec<NodeNum>,
    children: HashMap<NodeNum, Vec<NodeNum>>,
}

impl Topology {
    /// Classify all nodes from the parent array.
    ///
    /// Branch detection runs the duplicate scan over a private working
    /// copy: at each position the remaining occurrences of its parent
    /// value are counted, a double occurrence records a branch with its
    /// children in scan order, and the matched entries are neutralized so
    /// no position is ever attributed twice. More than two occurrences is
    /// corruption. The canonical parent array is left untouched for the
    /// traversal that follows.
    pub fn classify(parents: &ParentIndex) -> Result<Self, TopologyError> {
        let n = parents.len();

        for (idx, &entry) in parents.entries().iter().enumerate() {
            if let Some(parent) = entry {
                if parent < 1 || parent > n {
                    return Err(TopologyError::DanglingParent {
                        node: idx + 1,
                        parent,
                    });
                }
            }
        }

        let roots: Vec<NodeNum> = parents
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_none())
            .map(|(idx, _)| idx + 1)
            .collect();

        // A terminal is a node that never occurs as a parent; each id is
        // tested against the full canonical array.
        let terminals: Vec<NodeNum> = (1..=n).filter(|&id| !parents.has_children(id)).collect();

        let mut work: Vec<Option<NodeNum>> = parents.entries().to_vec();
        let mut branches: Vec<NodeNum> = Vec::new();
        let mut children: HashMap<NodeNum, Vec<NodeNum>> = HashMap::new();

        for i in 0..work.len() {
            let value = match work[i] {
                Some(value) => value,
                None => continue,
            };

            let positions: Vec<usize> = work
                .iter()
                .enumerate()
                .filter(|&(_, &entry)| entry == Some(value))
                .map(|(pos, _)| pos)
                .collect();

            if positions.len() > MAX_CHILDREN {
                return Err(TopologyError::ExcessChildren {
                    parent: value,
                    count: positions.len(),
                });
            }

            if positions.len() == MAX_CHILDREN {
                let kids: Vec<NodeNum> = positions.iter().map(|&pos| pos + 1).collect();
                for &pos in &positions {
                    work[pos] = None;
                }
                branches.push(value);
                children.insert(value, kids);
            }
        }

        debug_assert!(
            branches.iter().all(|branch| !terminals.contains(branch)),
            "a branch cannot also be a terminal"
        );

        tracing::debug!(
            "classified topology: {} roots, {} branches, {} terminals over {} nodes",
            roots.len(),
            branches.len(),
            terminals.len(),
            n
        );

        Ok(Self {
            roots,
            terminals,
            branches,
            children,
        })
    }

    /// Root nodes in node order.
    pub fn roots(&self) -> &[NodeNum] {
        &self.roots
    }

    /// Terminal nodes in node order.
    pub fn terminals(&self) -> &[NodeNum] {
        &self.terminals
    }

    /// Branch nodes in first-encounter scan order.
    pub fn branches(&self) -> &[NodeNum] {
        &self.branches
    }

    /// Children of a branch node, in scan order; empty for non-branches.
    pub fn children_of(&self, branch: NodeNum) -> &[NodeNum] {
        self.children
            .get(&branch)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the node has no parent.
    pub fn is_root(&self, id: NodeNum) -> bool {
        self.roots.contains(&id)
    }

    /// Whether the node has two children.
    pub fn is_branch(&self, id: NodeNum) -> bool {
        self.branches.contains(&id)
    }

    /// Whether the node has no children.
    pub fn is_terminal(&self, id: NodeNum) -> bool {
        self.terminals.contains(&id)
    }

    /// Whether the node bounds a segment run (branch or terminal).
    pub fn is_event(&self, id: NodeNum) -> bool {
        self.is_branch(id) || self.is_terminal(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parents(entries: &[Option<NodeNum>]) -> ParentIndex {
        ParentIndex::new(entries.to_vec())
    }

    #[test]
    fn classifies_branching_chain() {
        // 1 is a branching root; 2 dead-ends; 3-4-5 runs to a terminal.
        let topo =
            Topology::classify(&parents(&[None, Some(1), Some(1), Some(3), Some(4)])).unwrap();

        assert_eq!(topo.roots(), &[1]);
        assert_eq!(topo.branches(), &[1]);
        assert_eq!(topo.terminals(), &[2, 5]);
        assert_eq!(topo.children_of(1), &[2, 3]);
    }

    #[test]
    fn single_child_node_is_plain_interior() {
        let topo = Topology::classify(&parents(&[None, Some(1), Some(2)])).unwrap();
        assert!(!topo.is_branch(2));
        assert!(!topo.is_terminal(2));
        assert!(!topo.is_root(2));
        assert!(!topo.is_event(2));
    }

    #[test]
    fn isolated_point_is_both_root_and_terminal() {
        let topo = Topology::classify(&parents(&[None])).unwrap();
        assert!(topo.is_root(1));
        assert!(topo.is_terminal(1));
        assert!(topo.branches().is_empty());
    }

    #[test]
    fn children_keep_scan_order() {
        // Parent 2's children appear at positions 3 and 5 (nodes 4, 6).
        let topo = Topology::classify(&parents(&[
            None,
            Some(1),
            Some(1),
            Some(2),
            None,
            Some(2),
        ]))
        .unwrap();
        assert_eq!(topo.children_of(2), &[4, 6]);
        assert_eq!(topo.children_of(1), &[2, 3]);
        assert_eq!(topo.branches(), &[1, 2]);
    }

    #[test]
    fn three_children_is_corrupt() {
        let err =
            Topology::classify(&parents(&[None, Some(1), Some(1), Some(1)])).unwrap_err();
        assert!(matches!(
            err,
            TopologyError::ExcessChildren { parent: 1, count: 3 }
        ));
    }

    #[test]
    fn dangling_parent_is_corrupt() {
        let err = Topology::classify(&parents(&[None, Some(9)])).unwrap_err();
        assert!(matches!(
            err,
            TopologyError::DanglingParent { node: 2, parent: 9 }
        ));
    }

    #[test]
    fn empty_index_classifies_to_nothing() {
        let topo = Topology::classify(&parents(&[])).unwrap();
        assert!(topo.roots().is_empty());
        assert!(topo.terminals().is_empty());
        assert!(topo.branches().is_empty());
    }

    #[test]
    fn forest_keeps_trees_independent() {
        // Two disjoint two-node trees.
        let topo = Topology::classify(&parents(&[None, Some(1), None, Some(3)])).unwrap();
        assert_eq!(topo.roots(), &[1, 3]);
        assert_eq!(topo.terminals(), &[2, 4]);
        assert!(topo.branches().is_empty());
    }
}
