//! Graph file loading.
//!
//! Single mode reads one JSON file; directory mode reads every `*.json`
//! file in a directory, sorted lexicographically by filename so registry
//! order is a pure function of filenames rather than filesystem iteration
//! order. Each file parses independently, but one malformed file fails the
//! whole batch.

use crate::{Graph, GraphError};
use std::fs;
use std::path::{Path, PathBuf};

/// Load a single graph from a JSON file.
///
/// # Errors
///
/// Returns [`GraphError::ReadFile`] if the file cannot be read and
/// [`GraphError::Parse`] if it is not a valid graph description.
pub fn load_graph(path: &Path) -> Result<Graph, GraphError> {
    let text = fs::read_to_string(path).map_err(|e| GraphError::read_file(path, e))?;
    let graph: Graph = serde_json::from_str(&text).map_err(|e| GraphError::parse(path, e))?;
    tracing::debug!(
        "loaded '{}' ({} nodes) from {}",
        graph.name.as_deref().unwrap_or("unnamed"),
        graph.nodes.len(),
        path.display()
    );
    Ok(graph)
}

/// Load every `*.json` graph in a directory, in lexicographic filename
/// order.
///
/// # Errors
///
/// Returns [`GraphError::NoInputs`] when no graph files match, and fails
/// the whole batch on the first unreadable or malformed file.
pub fn load_graph_dir(dir: &Path) -> Result<Vec<Graph>, GraphError> {
    let entries = fs::read_dir(dir).map_err(|e| GraphError::read_dir(dir, e))?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| GraphError::read_dir(dir, e))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }

    // Registry order must not depend on readdir order.
    files.sort();

    if files.is_empty() {
        return Err(GraphError::NoInputs {
            path: dir.to_path_buf(),
        });
    }

    tracing::debug!("loading {} graph file(s) from {}", files.len(), dir.display());
    files.iter().map(|path| load_graph(path)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"{
        "name": "Minimal",
        "nodes": [
            { "id": "pos", "type": "position_gradient" },
            { "id": "out", "type": "output" }
        ],
        "wires": []
    }"#;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    // --- single mode ---

    #[test]
    fn load_graph_reads_one_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "minimal.json", MINIMAL);

        let graph = load_graph(&path).unwrap();
        assert_eq!(graph.name.as_deref(), Some("Minimal"));
        assert_eq!(graph.nodes.len(), 2);
    }

    #[test]
    fn load_graph_missing_file_is_read_error() {
        let err = load_graph(Path::new("/nonexistent/graph.json")).unwrap_err();
        assert!(matches!(err, GraphError::ReadFile { .. }));
    }

    #[test]
    fn load_graph_malformed_json_is_parse_error_naming_path() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "broken.json", "{ not json");

        let err = load_graph(&path).unwrap_err();
        assert!(matches!(err, GraphError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"), "got: {err}");
    }

    // --- directory mode ---

    #[test]
    fn load_graph_dir_sorts_by_filename() {
        let dir = TempDir::new().unwrap();
        // Written out of order on purpose.
        write(&dir, "c_third.json", &MINIMAL.replace("Minimal", "Third"));
        write(&dir, "a_first.json", &MINIMAL.replace("Minimal", "First"));
        write(&dir, "b_second.json", &MINIMAL.replace("Minimal", "Second"));

        let graphs = load_graph_dir(dir.path()).unwrap();
        let names: Vec<_> = graphs.iter().map(|g| g.name.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn load_graph_dir_ignores_non_json_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "pattern.json", MINIMAL);
        write(&dir, "notes.txt", "not a graph");

        let graphs = load_graph_dir(dir.path()).unwrap();
        assert_eq!(graphs.len(), 1);
    }

    #[test]
    fn load_graph_dir_empty_is_no_inputs() {
        let dir = TempDir::new().unwrap();
        write(&dir, "readme.md", "nothing to compile");

        let err = load_graph_dir(dir.path()).unwrap_err();
        assert!(matches!(err, GraphError::NoInputs { .. }));
    }

    #[test]
    fn load_graph_dir_one_bad_file_fails_whole_batch() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a_good.json", MINIMAL);
        write(&dir, "b_bad.json", "{{{");
        write(&dir, "c_good.json", MINIMAL);

        let err = load_graph_dir(dir.path()).unwrap_err();
        assert!(matches!(err, GraphError::Parse { .. }));
        assert!(err.to_string().contains("b_bad.json"), "got: {err}");
    }
}
