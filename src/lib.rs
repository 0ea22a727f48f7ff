//! # SWC trace morphometry
//!
//! This library ingests tree-structured point traces in the SWC text
//! format (vessel or neurite reconstructions: one labeled point per row
//! with a 3D position, radius, and parent reference) and derives
//! structural metrics from them.
//!
//! ## Pipeline
//!
//! 1. **Parse**: [`swc`] reads the file into an ordered [`TraceBlock`]
//! 2. **Classify**: [`Topology`] derives root/branch/terminal sets and the
//!    branch child-map from the flat parent array
//! 3. **Walk**: [`SegmentWalker`] traverses every edge of the induced
//!    forest exactly once, in two passes (root runs, then branch runs)
//! 4. **Score**: each edge is modeled as a conical frustum and folded
//!    into an [`AggregateReport`] of totals, extrema, and counts
//!
//! ## Usage example
//!
//! ```
//! use cajal::TraceAnalyzer;
//!
//! let trace = "\
//! 1 1 0.0 0.0 0.0 1.0 -1
//! 2 3 5.0 0.0 0.0 1.0 1
//! ";
//! let block = cajal::swc::parse_trace(std::io::Cursor::new(trace))?;
//! let morphometry = TraceAnalyzer::new(block).run()?;
//! assert_eq!(morphometry.report.segment_count, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod morpho; // Topology classification, traversal, geometry
pub mod swc; // SWC format reading

// Re-exports for convenience
pub use morpho::{
    frustum_between, AggregateReport, NodeStore, ParentIndex, SegmentGeometry, SegmentWalker,
    Topology, TopologyError,
};
pub use swc::{
    parse_trace, read_trace_file, BlockDims, NodeKind, NodeNum, Point3, SwcError, TraceBlock,
    TraceNode,
};

/// Whole-trace analysis orchestrator.
///
/// Owns the parsed trace for one run and executes the pipeline to
/// completion: derive the parent array, classify, traverse, aggregate.
/// The run is single-threaded and produces either a complete
/// [`TraceMorphometry`] or a [`TopologyError`] with no partial results.
#[derive(Debug)]
pub struct TraceAnalyzer {
    store: NodeStore,
    dims: Option<BlockDims>,
}

/// Result of one completed analysis run.
#[derive(Debug, Clone)]
pub struct TraceMorphometry {
    /// Aggregated segment statistics and classification counts.
    pub report: AggregateReport,
    /// The derived classification sets, for callers that render them.
    pub topology: Topology,
}

impl TraceAnalyzer {
    /// Take ownership of a parsed trace block.
    pub fn new(block: TraceBlock) -> Self {
        Self {
            dims: block.dims,
            store: NodeStore::from_block(block),
        }
    }

    /// The node store backing this run.
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// Source volume dimensions, when the trace header carried them.
    pub fn dims(&self) -> Option<BlockDims> {
        self.dims
    }

    /// Run classification and both traversal passes.
    pub fn run(&self) -> Result<TraceMorphometry, TopologyError> {
        let parents = self.store.parent_index();
        let topology = Topology::classify(&parents)?;
        let report = SegmentWalker::new(&self.store, &parents, &topology).traverse()?;
        Ok(TraceMorphometry { report, topology })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swc::Point3;

    fn block(entries: &[(f64, Option<NodeNum>)]) -> TraceBlock {
        let nodes = entries
            .iter()
            .enumerate()
            .map(|(idx, &(x, parent))| {
                TraceNode::new(idx + 1, NodeKind::Axon, Point3::new(x, 0.0, 0.0), 1.0, parent)
            })
            .collect();
        TraceBlock::new(nodes)
    }

    #[test]
    fn analyzer_runs_pipeline_to_completion() {
        let morphometry = TraceAnalyzer::new(block(&[
            (0.0, None),
            (2.0, Some(1)),
            (5.0, Some(2)),
        ]))
        .run()
        .expect("clean trace analyzes");

        assert_eq!(morphometry.report.segment_count, 2);
        assert_eq!(morphometry.report.root_count, 1);
        assert_eq!(morphometry.topology.terminals(), &[3]);
        assert!((morphometry.report.total_length - 5.0).abs() < 1e-12);
    }

    #[test]
    fn corrupt_trace_produces_no_report() {
        let result = TraceAnalyzer::new(block(&[
            (0.0, None),
            (1.0, Some(1)),
            (2.0, Some(1)),
            (3.0, Some(1)),
        ]))
        .run();

        assert!(matches!(
            result,
            Err(TopologyError::ExcessChildren { parent: 1, count: 3 })
        ));
    }
}
