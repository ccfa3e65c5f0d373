//! Shared helpers used across compile commands.

use crate::config::Config;
use strand_graph::{Graph, check_compliance};

/// Run the compliance rules over a batch of graphs, logging warnings.
///
/// Fatal policy violations propagate as errors; non-fatal warnings are
/// logged, and promoted to an error when the config sets `deny_warnings`.
pub fn enforce_compliance(graphs: &[Graph], config: &Config) -> anyhow::Result<()> {
    let mut count = 0;
    for graph in graphs {
        let warnings = check_compliance(graph)?;
        for warning in &warnings {
            tracing::warn!("{warning}");
        }
        count += warnings.len();
    }

    if config.compile.deny_warnings && count > 0 {
        anyhow::bail!("{count} compliance warning(s) promoted to errors (deny_warnings)");
    }
    Ok(())
}
