//! Pattern graph model, loading, and validation for the strand compiler.
//!
//! A lighting pattern is described as a small dataflow graph: generator
//! nodes produce a base signal, transform nodes reshape it, and sink nodes
//! write the final colors to the strip. This crate owns the graph data
//! model, the JSON loader (single-file and directory modes), the
//! architectural compliance rules, and the emission ordering. Code
//! generation lives in `strand-codegen`.
//!
//! # Example
//!
//! ```
//! use strand_graph::{check_compliance, emission_order, Graph};
//!
//! let graph: Graph = serde_json::from_str(
//!     r#"{
//!         "name": "Pulse",
//!         "nodes": [
//!             { "id": "paint", "type": "palette_interpolate", "inputs": ["pos"] },
//!             { "id": "pos", "type": "position_gradient" },
//!             { "id": "out", "type": "output" }
//!         ],
//!         "wires": [],
//!         "palette_data": [[0, 255, 0, 0], [255, 0, 0, 255]]
//!     }"#,
//! )
//! .unwrap();
//!
//! assert!(check_compliance(&graph).unwrap().is_empty());
//! assert_eq!(emission_order(&graph)[0].id, "pos");
//! ```

mod error;
mod model;

/// Architectural compliance rules.
pub mod compliance;

/// Graph file loading.
pub mod loader;

/// Emission ordering.
pub mod order;

pub use compliance::{ComplianceWarning, check_compliance};
pub use error::GraphError;
pub use loader::{load_graph, load_graph_dir};
pub use model::{Graph, Node, NodeType, PaletteKeyframe, ParamValue, Wire};
pub use order::emission_order;
