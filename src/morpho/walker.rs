use crate::morpho::geometry::frustum_between;
use crate::morpho::report::AggregateReport;
use crate::morpho::store::{NodeStore, ParentIndex};
use crate::morpho::topology::{Topology, TopologyError};
use crate::swc::NodeNum;

/// Two-pass segment traversal over a classified trace.
///
/// Pass 1 walks each root's run down to the first branch or terminal;
/// pass 2 walks every branch child's run down to its bounding event.
/// Together the passes visit every edge of the induced forest exactly
/// once, folding each edge's frustum metrics into the report as it goes.
/// Segments are never materialized.
#[derive(Debug)]
pub struct SegmentWalker<'a> {
    store: &'a NodeStore,
    parents: &'a ParentIndex,
    topology: &'a Topology,
}

impl<'a> SegmentWalker<'a> {
    /// Borrow the inputs for one traversal.
    ///
    /// `parents` must be the canonical array derived from `store`; the
    /// walker never mutates either.
    pub fn new(store: &'a NodeStore, parents: &'a ParentIndex, topology: &'a Topology) -> Self {
        debug_assert_eq!(store.len(), parents.len(), "store/parent array misaligned");
        Self {
            store,
            parents,
            topology,
        }
    }

    /// Run both passes and return the folded statistics.
    pub fn traverse(&self) -> Result<AggregateReport, TopologyError> {
        let mut report = AggregateReport::for_topology(self.topology);

        // Pass 1: root runs. A root that is itself a branch or terminal
        // bounds a zero-length run and contributes nothing here.
        for &root in self.topology.roots() {
            if self.topology.is_event(root) {
                continue;
            }
            self.walk_run(root, &mut report)?;
        }

        // Pass 2: one run per branch child, entered through the
        // branch-to-child edge. A child that is itself an event makes the
        // entry edge the whole run.
        for &branch in self.topology.branches() {
            for &child in self.topology.children_of(branch) {
                self.fold_edge(branch, child, &mut report)?;
                self.walk_run(child, &mut report)?;
            }
        }

        tracing::debug!(
            "traversal complete: {} segments over {} nodes",
            report.segment_count,
            self.store.len()
        );
        Ok(report)
    }

    /// Follow interior links from `start` until the next event node,
    /// folding one segment per hop. No-op when `start` is an event.
    fn walk_run(&self, start: NodeNum, report: &mut AggregateReport) -> Result<(), TopologyError> {
        let mut current = start;
        while !self.topology.is_event(current) {
            // A non-event node has exactly one child: the position that
            // names it as parent in the canonical array.
            let next = self
                .parents
                .first_child_of(current)
                .ok_or(TopologyError::UnlinkedInterior { node: current })?;
            self.fold_edge(current, next, report)?;
            current = next;
        }
        Ok(())
    }

    fn fold_edge(
        &self,
        near: NodeNum,
        far: NodeNum,
        report: &mut AggregateReport,
    ) -> Result<(), TopologyError> {
        let near_node = self
            .store
            .get(near)
            .ok_or(TopologyError::MissingNode { node: near })?;
        let far_node = self
            .store
            .get(far)
            .ok_or(TopologyError::MissingNode { node: far })?;
        report.observe(&frustum_between(near_node, far_node));
        Ok(())
    }
}
