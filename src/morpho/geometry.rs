use std::f64::consts::PI;

use crate::swc::TraceNode;

/// Geometric quantities for one traversed edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentGeometry {
    /// Straight-line length of the edge.
    pub length: f64,
    /// Lateral surface area of the frustum (slant-height form).
    pub lateral_area: f64,
    /// Volume of the frustum.
    pub volume: f64,
}

/// Score the edge between two adjacent nodes as a frustum of a cone.
///
/// The two cross-sections take the endpoint radii; `h` is the Euclidean
/// distance between the endpoint positions. Volume is
/// `π·h/3·(r1² + r2² + r1·r2)` and the lateral surface area is
/// `π·(r1 + r2)·√(h² + (r1 − r2)²)`. Both are symmetric in the endpoints,
/// and equal radii reduce them to the cylinder forms `π·h·r²` and
/// `2π·r·h`.
pub fn frustum_between(near: &TraceNode, far: &TraceNode) -> SegmentGeometry {
    let h = near.pos.distance_to(&far.pos);
    let r1 = near.radius;
    let r2 = far.radius;

    let volume = PI * h / 3.0 * (r1 * r1 + r2 * r2 + r1 * r2);
    let slant = (h * h + (r1 - r2) * (r1 - r2)).sqrt();
    let lateral_area = PI * (r1 + r2) * slant;

    SegmentGeometry {
        length: h,
        lateral_area,
        volume,
    }
}
