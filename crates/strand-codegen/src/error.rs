//! Error types for code generation.

use strand_graph::GraphError;
use thiserror::Error;

/// Errors from compiling a pattern graph to source text.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// A node is missing one or more required inputs
    #[error("{kind} node '{node}' requires {required} input(s), found {found}")]
    MissingInput {
        /// Id of the node missing inputs.
        node: String,
        /// Operator type name.
        kind: &'static str,
        /// Number of inputs the operator requires.
        required: usize,
        /// Number of inputs the node declared.
        found: usize,
    },

    /// A node references an input id that does not exist in the graph
    #[error("node '{node}' references missing input node '{missing}'")]
    DanglingInput {
        /// Id of the referencing node.
        node: String,
        /// The input id that did not resolve.
        missing: String,
    },

    /// The input graph contains a cycle
    #[error("cyclic graph: node '{node}' is reached again while its own inputs are being compiled")]
    CyclicGraph {
        /// Id of the first node revisited.
        node: String,
    },

    /// A sink operator is used as another node's input
    #[error("{kind} node '{node}' is a sink and cannot be used as an input")]
    SinkAsInput {
        /// Id of the sink node.
        node: String,
        /// Operator type name.
        kind: &'static str,
    },

    /// A numeric parameter is outside its documented range
    #[error("node '{node}': parameter '{param}' = {value} out of range [{min}, {max}]")]
    ParamRange {
        /// Id of the node.
        node: String,
        /// Parameter name.
        param: String,
        /// The offending value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// A custom spectrum range is empty or inverted
    #[error("node '{node}': invalid bin range [{start}, {end}] (start_bin must be less than end_bin)")]
    InvertedRange {
        /// Id of the node.
        node: String,
        /// Range start.
        start: i64,
        /// Range end.
        end: i64,
    },

    /// `palette_interpolate` used without palette keyframes
    #[error("palette_interpolate node '{node}' requires non-empty palette_data in the graph")]
    MissingPaletteData {
        /// Id of the node.
        node: String,
    },

    /// Audio-reactive patterns were emitted without any audio guard
    #[error(
        "emission self-check failed: {patterns} audio-reactive pattern(s) \
         but no PATTERN_AUDIO_START() call sites in the output"
    )]
    AudioGuardMissing {
        /// Number of audio-reactive patterns.
        patterns: usize,
    },

    /// A pattern inside a registry batch failed to compile
    #[error("pattern '{name}': {source}")]
    Pattern {
        /// Display name of the failing pattern.
        name: String,
        /// The underlying failure.
        #[source]
        source: Box<CodegenError>,
    },

    /// Graph loading or validation error
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl CodegenError {
    /// Wrap an error with the display name of the pattern it came from.
    pub fn pattern(name: impl Into<String>, source: CodegenError) -> Self {
        CodegenError::Pattern {
            name: name.into(),
            source: Box::new(source),
        }
    }
}
