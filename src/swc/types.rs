use std::fmt;

/// 1-based node identity within a trace.
///
/// Node numbers double as array positions (`id - 1`), so the reader
/// guarantees they run exactly `1..=N` in file order.
pub type NodeNum = usize;

/// SWC structure type codes (column two of a data row).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Code 0: unspecified structure.
    Undefined,
    /// Code 1: soma / cell body.
    Soma,
    /// Code 2: axon.
    Axon,
    /// Code 3: (basal) dendrite.
    Dendrite,
    /// Code 4: apical dendrite.
    ApicalDendrite,
    /// Code 5: fork point annotation.
    ForkPoint,
    /// Code 6: end point annotation.
    EndPoint,
    /// Code 7: custom / application-defined.
    Custom,
}

impl NodeKind {
    /// Decode an SWC type code. Codes outside 0–7 are not representable.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(NodeKind::Undefined),
            1 => Some(NodeKind::Soma),
            2 => Some(NodeKind::Axon),
            3 => Some(NodeKind::Dendrite),
            4 => Some(NodeKind::ApicalDendrite),
            5 => Some(NodeKind::ForkPoint),
            6 => Some(NodeKind::EndPoint),
            7 => Some(NodeKind::Custom),
            _ => None,
        }
    }

    /// The integer code this kind is written as in SWC files.
    pub fn code(&self) -> u8 {
        match self {
            NodeKind::Undefined => 0,
            NodeKind::Soma => 1,
            NodeKind::Axon => 2,
            NodeKind::Dendrite => 3,
            NodeKind::ApicalDendrite => 4,
            NodeKind::ForkPoint => 5,
            NodeKind::EndPoint => 6,
            NodeKind::Custom => 7,
        }
    }

    /// Lowercase label used in rendered reports.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Undefined => "undefined",
            NodeKind::Soma => "soma",
            NodeKind::Axon => "axon",
            NodeKind::Dendrite => "dendrite",
            NodeKind::ApicalDendrite => "apical dendrite",
            NodeKind::ForkPoint => "fork point",
            NodeKind::EndPoint => "end point",
            NodeKind::Custom => "custom",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A point in the trace coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Point3 {
    /// Construct a point from its coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Straight-line Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// One parsed trace point.
///
/// Nodes are immutable once parsed and owned by the store for the lifetime
/// of an analysis run. The wire-format parent sentinel `-1` is already
/// mapped to `None` here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceNode {
    /// 1-based node number (unique, sequential in file order).
    pub id: NodeNum,
    /// SWC structure type.
    pub kind: NodeKind,
    /// Position of the point.
    pub pos: Point3,
    /// Cross-section radius at the point; non-negative.
    pub radius: f64,
    /// Parent node number, or `None` for a root.
    pub parent: Option<NodeNum>,
}

impl TraceNode {
    /// Construct a node record.
    pub fn new(
        id: NodeNum,
        kind: NodeKind,
        pos: Point3,
        radius: f64,
        parent: Option<NodeNum>,
    ) -> Self {
        Self {
            id,
            kind,
            pos,
            radius,
            parent,
        }
    }

    /// Whether this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Voxel dimensions of the source image stack, from the `#XYZ` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockDims {
    /// Extent along X.
    pub x: u32,
    /// Extent along Y.
    pub y: u32,
    /// Extent along Z.
    pub z: u32,
}

impl BlockDims {
    /// Construct block dimensions.
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

/// A complete parsed trace: the ordered node list plus optional header
/// metadata describing the source volume.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceBlock {
    /// Source volume dimensions, when the file carried an `#XYZ` header.
    pub dims: Option<BlockDims>,
    /// Nodes in file order; node `i + 1` lives at index `i`.
    pub nodes: Vec<TraceNode>,
}

impl TraceBlock {
    /// Wrap an ordered node list with no header metadata.
    pub fn new(nodes: Vec<TraceNode>) -> Self {
        Self { dims: None, nodes }
    }

    /// Number of nodes in the trace.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the trace holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
