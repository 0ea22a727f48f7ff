use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::swc::types::{BlockDims, NodeKind, Point3, TraceBlock, TraceNode};

/// Number of mandatory whitespace-separated fields in a data row.
const ROW_FIELDS: usize = 7;

/// Comment token introducing the source-volume dimensions header.
const DIMS_HEADER: &str = "#XYZ";

/// Errors raised while reading an SWC trace file.
///
/// Every variant except `Io` carries the 1-based line number of the
/// offending input line.
#[derive(Debug, Error)]
pub enum SwcError {
    /// Underlying I/O failure while opening or reading the file.
    #[error("I/O error reading trace: {0}")]
    Io(#[from] std::io::Error),

    /// A data row with fewer than the seven required fields.
    #[error("line {line}: malformed row ({found} of {ROW_FIELDS} required fields)")]
    MalformedRow {
        /// Source line number.
        line: usize,
        /// Number of fields actually present.
        found: usize,
    },

    /// A field that failed to parse or holds an unrepresentable value.
    #[error("line {line}: invalid {field} '{value}'")]
    InvalidField {
        /// Source line number.
        line: usize,
        /// Which field was rejected.
        field: &'static str,
        /// Raw token as it appeared in the file.
        value: String,
    },

    /// A node radius below zero.
    #[error("line {line}: negative radius {radius}")]
    NegativeRadius {
        /// Source line number.
        line: usize,
        /// Rejected radius value.
        radius: f64,
    },

    /// A node number that breaks the sequential 1..=N numbering contract.
    #[error("line {line}: node number {found} out of sequence (expected {expected})")]
    OutOfSequence {
        /// Source line number.
        line: usize,
        /// Node number found in the file.
        found: usize,
        /// Node number required at this position.
        expected: usize,
    },

    /// An `#XYZ` header without three parseable dimensions.
    #[error("line {line}: malformed {DIMS_HEADER} header")]
    MalformedHeader {
        /// Source line number.
        line: usize,
    },
}

/// Read and parse an SWC trace file from disk.
pub fn read_trace_file<P: AsRef<Path>>(path: P) -> Result<TraceBlock, SwcError> {
    let file = File::open(path)?;
    parse_trace(BufReader::new(file))
}

/// Parse an SWC trace from any buffered source.
///
/// Blank lines are skipped, `#`-prefixed lines are comments, and the
/// special `#XYZ <x> <y> <z>` comment records the source volume
/// dimensions. Data rows carry, in order: node number, type code (0–7),
/// x, y, z, radius, parent (`-1` for a root). Fields past the seventh are
/// ignored.
pub fn parse_trace<R: BufRead>(input: R) -> Result<TraceBlock, SwcError> {
    let mut nodes: Vec<TraceNode> = Vec::new();
    let mut dims: Option<BlockDims> = None;

    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();

        // The emptiness check must come before any first-character
        // inspection; lines are not guaranteed non-empty.
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with('#') {
            if let Some(header) = parse_dims_header(trimmed, line_no)? {
                dims = Some(header);
            }
            continue;
        }

        let node = parse_row(trimmed, line_no, nodes.len() + 1)?;
        nodes.push(node);
    }

    tracing::info!("parsed SWC trace: {} nodes", nodes.len());
    Ok(TraceBlock { dims, nodes })
}

/// Parse the `#XYZ` dimensions header; returns `None` for ordinary comments.
fn parse_dims_header(line: &str, line_no: usize) -> Result<Option<BlockDims>, SwcError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields[0] != DIMS_HEADER {
        return Ok(None);
    }
    if fields.len() < 4 {
        return Err(SwcError::MalformedHeader { line: line_no });
    }

    let x = fields[1]
        .parse::<u32>()
        .map_err(|_| SwcError::MalformedHeader { line: line_no })?;
    let y = fields[2]
        .parse::<u32>()
        .map_err(|_| SwcError::MalformedHeader { line: line_no })?;
    let z = fields[3]
        .parse::<u32>()
        .map_err(|_| SwcError::MalformedHeader { line: line_no })?;

    Ok(Some(BlockDims::new(x, y, z)))
}

/// Parse one data row into a node record.
fn parse_row(line: &str, line_no: usize, expected_id: usize) -> Result<TraceNode, SwcError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < ROW_FIELDS {
        return Err(SwcError::MalformedRow {
            line: line_no,
            found: fields.len(),
        });
    }

    let id: usize = parse_field(fields[0], "node number", line_no)?;
    if id != expected_id {
        return Err(SwcError::OutOfSequence {
            line: line_no,
            found: id,
            expected: expected_id,
        });
    }

    let code: u8 = parse_field(fields[1], "type code", line_no)?;
    let kind = NodeKind::from_code(code).ok_or_else(|| SwcError::InvalidField {
        line: line_no,
        field: "type code",
        value: fields[1].to_string(),
    })?;

    let x: f64 = parse_field(fields[2], "x coordinate", line_no)?;
    let y: f64 = parse_field(fields[3], "y coordinate", line_no)?;
    let z: f64 = parse_field(fields[4], "z coordinate", line_no)?;

    let radius: f64 = parse_field(fields[5], "radius", line_no)?;
    if radius < 0.0 {
        return Err(SwcError::NegativeRadius {
            line: line_no,
            radius,
        });
    }

    let parent_raw: i64 = parse_field(fields[6], "parent reference", line_no)?;
    let parent = match parent_raw {
        -1 => None,
        p if p >= 1 => Some(p as usize),
        _ => {
            return Err(SwcError::InvalidField {
                line: line_no,
                field: "parent reference",
                value: fields[6].to_string(),
            })
        }
    };

    Ok(TraceNode::new(
        id,
        kind,
        Point3::new(x, y, z),
        radius,
        parent,
    ))
}

fn parse_field<T: FromStr>(token: &str, field: &'static str, line: usize) -> Result<T, SwcError> {
    token.parse::<T>().map_err(|_| SwcError::InvalidField {
        line,
        field,
        value: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Result<TraceBlock, SwcError> {
        parse_trace(Cursor::new(text))
    }

    #[test]
    fn parses_rows_comments_and_blanks() {
        let input = "\
# generated by tracer v2

1 1 0.0 0.0 0.0 2.5 -1
2 3 1.0 0.0 0.0 1.0 1

# trailing comment
";
        let block = parse(input).expect("valid trace");
        assert_eq!(block.len(), 2);
        assert_eq!(block.dims, None);

        let first = &block.nodes[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.kind, NodeKind::Soma);
        assert_eq!(first.parent, None);
        assert!((first.radius - 2.5).abs() < 1e-12);

        let second = &block.nodes[1];
        assert_eq!(second.parent, Some(1));
        assert_eq!(second.kind, NodeKind::Dendrite);
    }

    #[test]
    fn reads_dimensions_header() {
        let input = "#XYZ 512 512 128\n1 2 0 0 0 1 -1\n";
        let block = parse(input).expect("valid trace");
        assert_eq!(block.dims, Some(BlockDims::new(512, 512, 128)));
    }

    #[test]
    fn later_dimensions_header_wins() {
        let input = "#XYZ 1 1 1\n#XYZ 64 64 32\n1 0 0 0 0 1 -1\n";
        let block = parse(input).expect("valid trace");
        assert_eq!(block.dims, Some(BlockDims::new(64, 64, 32)));
    }

    #[test]
    fn rejects_short_rows() {
        let err = parse("1 2 0.0 0.0 0.0 1.0\n").unwrap_err();
        assert!(matches!(err, SwcError::MalformedRow { line: 1, found: 6 }));
    }

    #[test]
    fn rejects_unknown_type_codes() {
        let err = parse("1 9 0 0 0 1 -1\n").unwrap_err();
        assert!(matches!(
            err,
            SwcError::InvalidField {
                field: "type code",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_radius() {
        let err = parse("1 2 0 0 0 -0.5 -1\n").unwrap_err();
        assert!(matches!(err, SwcError::NegativeRadius { line: 1, .. }));
    }

    #[test]
    fn rejects_out_of_sequence_numbering() {
        let err = parse("1 2 0 0 0 1 -1\n3 2 1 0 0 1 1\n").unwrap_err();
        assert!(matches!(
            err,
            SwcError::OutOfSequence {
                line: 2,
                found: 3,
                expected: 2,
            }
        ));
    }

    #[test]
    fn rejects_zero_parent_reference() {
        let err = parse("1 2 0 0 0 1 0\n").unwrap_err();
        assert!(matches!(
            err,
            SwcError::InvalidField {
                field: "parent reference",
                ..
            }
        ));
    }

    #[test]
    fn rejects_truncated_dimensions_header() {
        let err = parse("#XYZ 512 512\n").unwrap_err();
        assert!(matches!(err, SwcError::MalformedHeader { line: 1 }));
    }

    #[test]
    fn ignores_fields_past_the_seventh() {
        let block = parse("1 2 0 0 0 1 -1 extra tokens here\n").expect("valid trace");
        assert_eq!(block.len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_block() {
        let block = parse("").expect("empty trace is valid");
        assert!(block.is_empty());
    }
}
