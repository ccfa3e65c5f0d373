//! Architectural compliance rules.
//!
//! Exactly two rules, applied per node, order-independent: the legacy
//! `gradient` generator is forbidden (it composes only into edge-to-edge
//! hue sweeps the target visual system treats as a defect class), and the
//! legacy `hsv_to_rgb` converter is allowed with a warning, since it is the
//! usual companion of the forbidden sweep pattern. The validator never
//! rewrites the graph.

use crate::{Graph, GraphError, NodeType};
use std::fmt;

/// A non-fatal finding from [`check_compliance`].
///
/// Warnings are returned as values so the caller decides presentation (the
/// CLI logs them, and can promote them to errors).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplianceWarning {
    /// A node uses the legacy direct HSV-to-RGB converter.
    LegacyHsvToRgb {
        /// Id of the node.
        id: String,
    },
}

impl fmt::Display for ComplianceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceWarning::LegacyHsvToRgb { id } => write!(
                f,
                "node '{id}' uses the legacy hsv_to_rgb converter; \
                 prefer palette_interpolate driven by position_gradient"
            ),
        }
    }
}

/// Check a graph against the compliance rules.
///
/// Returns the non-fatal warnings on success.
///
/// # Errors
///
/// Returns [`GraphError::ForbiddenNode`] naming the first node of the
/// forbidden `gradient` type.
pub fn check_compliance(graph: &Graph) -> Result<Vec<ComplianceWarning>, GraphError> {
    let mut warnings = Vec::new();

    for node in &graph.nodes {
        match node.kind {
            NodeType::Gradient => {
                return Err(GraphError::ForbiddenNode {
                    id: node.id.clone(),
                });
            }
            NodeType::HsvToRgb => warnings.push(ComplianceWarning::LegacyHsvToRgb {
                id: node.id.clone(),
            }),
            _ => {}
        }
    }

    Ok(warnings)
}
