//! Morphometry core: topology classification, segment traversal, and
//! frustum geometry over a parsed trace.
//!
//! The pipeline is strictly staged: [`NodeStore`] owns the parsed nodes,
//! [`ParentIndex`] is derived once and never mutated, [`Topology`]
//! classifies every node, and [`SegmentWalker`] folds per-edge
//! [`SegmentGeometry`] into an [`AggregateReport`]. Each stage takes its
//! inputs as explicit values; nothing is shared or ambient.

mod geometry;
mod report;
mod store;
mod topology;
mod walker;

pub use geometry::{frustum_between, SegmentGeometry};
pub use report::AggregateReport;
pub use store::{NodeStore, ParentIndex};
pub use topology::{Topology, TopologyError};
pub use walker::SegmentWalker;
