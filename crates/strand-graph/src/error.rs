//! Error types for graph loading and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading or validating pattern graphs.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Failed to read a graph file
    #[error("failed to read graph file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to list a graph directory
    #[error("failed to read graph directory '{path}': {source}")]
    ReadDir {
        /// Path of the directory that could not be listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Graph JSON did not parse
    #[error("failed to parse graph file '{path}': {source}")]
    Parse {
        /// Path of the malformed file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Directory mode found nothing to compile
    #[error("no graph files (*.json) found in '{path}'")]
    NoInputs {
        /// The directory that was scanned.
        path: PathBuf,
    },

    /// A node uses the forbidden legacy linear-gradient generator
    #[error(
        "node '{id}' uses the forbidden gradient type: edge-to-edge linear sweeps \
         violate the center-origin policy (use position_gradient with palette_interpolate)"
    )]
    ForbiddenNode {
        /// Id of the offending node.
        id: String,
    },
}

impl GraphError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GraphError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a read directory error.
    pub fn read_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GraphError::ReadDir {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error.
    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        GraphError::Parse {
            path: path.into(),
            source,
        }
    }
}
