use crate::swc::{NodeNum, TraceBlock, TraceNode};

/// Owner of the parsed, ordered node sequence for one analysis run.
///
/// Node numbers are 1-based and positional (node `i + 1` sits at index
/// `i`), which the reader guarantees at parse time. The store is never
/// mutated after construction.
#[derive(Debug, Clone)]
pub struct NodeStore {
    nodes: Vec<TraceNode>,
}

impl NodeStore {
    /// Build a store from an ordered node list.
    pub fn new(nodes: Vec<TraceNode>) -> Self {
        Self { nodes }
    }

    /// Build a store from a parsed trace block, discarding header metadata.
    pub fn from_block(block: TraceBlock) -> Self {
        Self::new(block.nodes)
    }

    /// Number of nodes held.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by its 1-based number.
    pub fn get(&self, id: NodeNum) -> Option<&TraceNode> {
        if id == 0 {
            return None;
        }
        self.nodes.get(id - 1)
    }

    /// All nodes in file order.
    pub fn nodes(&self) -> &[TraceNode] {
        &self.nodes
    }

    /// Derive the canonical parent array for topology analysis.
    pub fn parent_index(&self) -> ParentIndex {
        ParentIndex::new(self.nodes.iter().map(|node| node.parent).collect())
    }
}

/// The flat parent array topology algorithms operate on.
///
/// Entry `i` holds node `i + 1`'s parent (`None` for a root). This is a
/// derived structure, separate from the node records. The canonical copy
/// handed to the traversal is never mutated; the classifier clones its
/// own working copy for the destructive duplicate scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentIndex {
    entries: Vec<Option<NodeNum>>,
}

impl ParentIndex {
    /// Wrap a raw parent array.
    pub fn new(entries: Vec<Option<NodeNum>>) -> Self {
        Self { entries }
    }

    /// Number of entries (equals the node count).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the array is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw entries, index `i` belonging to node `i + 1`.
    pub fn entries(&self) -> &[Option<NodeNum>] {
        &self.entries
    }

    /// Parent of the given node, or `None` for roots.
    pub fn parent_of(&self, id: NodeNum) -> Option<NodeNum> {
        debug_assert!(id >= 1 && id <= self.entries.len(), "node {id} out of range");
        self.entries.get(id.wrapping_sub(1)).copied().flatten()
    }

    /// First position (as a node number) that names `id` as its parent.
    ///
    /// For an interior pass-through node this resolves its unique child.
    pub fn first_child_of(&self, id: NodeNum) -> Option<NodeNum> {
        self.entries
            .iter()
            .position(|&parent| parent == Some(id))
            .map(|idx| idx + 1)
    }

    /// Whether any node names `id` as its parent.
    pub fn has_children(&self, id: NodeNum) -> bool {
        self.entries.contains(&Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swc::{NodeKind, Point3};

    fn node(id: NodeNum, parent: Option<NodeNum>) -> TraceNode {
        TraceNode::new(
            id,
            NodeKind::Undefined,
            Point3::new(id as f64, 0.0, 0.0),
            1.0,
            parent,
        )
    }

    #[test]
    fn lookup_is_one_based() {
        let store = NodeStore::new(vec![node(1, None), node(2, Some(1))]);
        assert_eq!(store.get(1).map(|n| n.id), Some(1));
        assert_eq!(store.get(2).map(|n| n.id), Some(2));
        assert!(store.get(0).is_none());
        assert!(store.get(3).is_none());
    }

    #[test]
    fn parent_index_aligns_with_node_order() {
        let store = NodeStore::new(vec![node(1, None), node(2, Some(1)), node(3, Some(1))]);
        let parents = store.parent_index();
        assert_eq!(parents.entries(), &[None, Some(1), Some(1)]);
        assert_eq!(parents.parent_of(1), None);
        assert_eq!(parents.parent_of(3), Some(1));
    }

    #[test]
    fn first_child_resolves_in_scan_order() {
        let parents = ParentIndex::new(vec![None, Some(1), Some(1), Some(3)]);
        assert_eq!(parents.first_child_of(1), Some(2));
        assert_eq!(parents.first_child_of(3), Some(4));
        assert_eq!(parents.first_child_of(4), None);
    }

    #[test]
    fn has_children_matches_membership() {
        let parents = ParentIndex::new(vec![None, Some(1), Some(2)]);
        assert!(parents.has_children(1));
        assert!(parents.has_children(2));
        assert!(!parents.has_children(3));
    }
}
