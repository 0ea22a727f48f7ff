//! SWC trace format support.
//!
//! This module is the input collaborator for the morphometry core: it reads
//! the text format (one labeled point per row, `#` comments, optional
//! `#XYZ` volume-dimensions header) and hands the core an ordered,
//! validated sequence of [`TraceNode`] records. The core never touches raw
//! file text.

mod reader;
mod types;

pub use reader::{parse_trace, read_trace_file, SwcError};
pub use types::{BlockDims, NodeKind, NodeNum, Point3, TraceBlock, TraceNode};
