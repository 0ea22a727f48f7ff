use crate::morpho::geometry::SegmentGeometry;
use crate::morpho::topology::Topology;

/// Whole-structure statistics accumulated over one traversal.
///
/// Classification counts are seeded when the walk starts; the per-segment
/// accumulators are mutated only by [`AggregateReport::observe`] and the
/// report is read-only once the walk completes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregateReport {
    /// Sum of segment frustum volumes.
    pub total_volume: f64,
    /// Sum of segment lateral surface areas.
    pub total_surface_area: f64,
    /// Sum of segment lengths.
    pub total_length: f64,
    /// Longest single segment seen.
    pub max_length: f64,
    /// Shortest single segment seen; +INFINITY until the first fold, use
    /// [`AggregateReport::min_length`] for rendering.
    min_length: f64,
    /// Number of segments folded.
    pub segment_count: usize,
    /// Number of branch nodes.
    pub branch_count: usize,
    /// Number of root nodes.
    pub root_count: usize,
    /// Number of terminal nodes.
    pub terminal_count: usize,
}

impl AggregateReport {
    /// Fresh report seeded with a trace's classification counts.
    pub fn for_topology(topology: &Topology) -> Self {
        Self {
            total_volume: 0.0,
            total_surface_area: 0.0,
            total_length: 0.0,
            max_length: 0.0,
            min_length: f64::INFINITY,
            segment_count: 0,
            branch_count: topology.branches().len(),
            root_count: topology.roots().len(),
            terminal_count: topology.terminals().len(),
        }
    }

    /// Fold one segment's metrics into the running totals.
    pub fn observe(&mut self, segment: &SegmentGeometry) {
        self.total_volume += segment.volume;
        self.total_surface_area += segment.lateral_area;
        self.total_length += segment.length;
        self.segment_count += 1;
        self.max_length = self.max_length.max(segment.length);
        self.min_length = self.min_length.min(segment.length);
    }

    /// Shortest segment length, 0.0 when nothing was traversed.
    pub fn min_length(&self) -> f64 {
        if self.segment_count == 0 {
            0.0
        } else {
            self.min_length
        }
    }

    /// Mean segment length, 0.0 when nothing was traversed.
    pub fn average_length(&self) -> f64 {
        if self.segment_count == 0 {
            0.0
        } else {
            self.total_length / self.segment_count as f64
        }
    }
}
