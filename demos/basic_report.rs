//! Minimal example: analyze a bundled vessel trace and print its report.

use std::io::Cursor;

use cajal::TraceAnalyzer;

fn main() -> anyhow::Result<()> {
    // Small two-bifurcation vessel reconstruction shipped with the repo.
    let block = cajal::parse_trace(Cursor::new(include_str!("data/sample.swc")))?;

    let analyzer = TraceAnalyzer::new(block);
    let morphometry = analyzer.run()?;
    let report = &morphometry.report;

    println!(
        "{} nodes: {} roots, {} branches, {} terminals",
        analyzer.store().len(),
        report.root_count,
        report.branch_count,
        report.terminal_count
    );
    println!(
        "{} segments: length {:.2}, lateral area {:.2}, volume {:.2}",
        report.segment_count,
        report.total_length,
        report.total_surface_area,
        report.total_volume
    );
    for &branch in morphometry.topology.branches() {
        println!(
            "bifurcation at node {branch} toward {:?}",
            morphometry.topology.children_of(branch)
        );
    }

    Ok(())
}
