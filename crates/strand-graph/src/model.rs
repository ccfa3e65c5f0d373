//! Graph data model.
//!
//! Deserialized from JSON and immutable once loaded. Node lookup is a
//! linear scan of the graph's node sequence; no index is built or cached.

use serde::Deserialize;
use std::collections::BTreeMap;

/// The closed set of operator types.
///
/// Unknown type strings are rejected during deserialization, so compilation
/// only ever dispatches over this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// Legacy edge-to-edge hue ramp (forbidden by the compliance rules).
    Gradient,
    /// Legacy HSV-to-RGB conversion (allowed with a warning).
    HsvToRgb,
    /// Structural end of the graph; emits nothing itself.
    Output,
    /// Distance from the strip center, 0.0 at center to 1.0 at the edges.
    PositionGradient,
    /// Keyframe palette lookup writing the color buffer.
    PaletteInterpolate,
    /// Animation clock scaled by the runtime speed parameter.
    Time,
    /// Sine of the input, rescaled to [0, 1].
    Sin,
    /// Sum of two inputs, clamped to 1.0.
    Add,
    /// Product of two inputs, unclamped.
    Multiply,
    /// A literal value.
    Constant,
    /// Input bounded to a [min, max] range.
    Clamp,
    /// Input modulo a divisor.
    Modulo,
    /// Input times a factor.
    Scale,
    /// One frequency bin of the audio spectrum.
    SpectrumBin,
    /// Per-pixel spectrum lookup across a bin range.
    SpectrumInterpolate,
    /// Mean energy of a frequency band.
    SpectrumRange,
    /// Overall VU level.
    AudioLevel,
    /// Beat confidence or per-tempo-bin magnitude, times sensitivity.
    Beat,
    /// Raw magnitude of one tempo bin.
    TempoMagnitude,
    /// Energy of one pitch class.
    Chromagram,
}

impl NodeType {
    /// Every operator type, in declaration order.
    pub const ALL: [NodeType; 20] = [
        NodeType::Gradient,
        NodeType::HsvToRgb,
        NodeType::Output,
        NodeType::PositionGradient,
        NodeType::PaletteInterpolate,
        NodeType::Time,
        NodeType::Sin,
        NodeType::Add,
        NodeType::Multiply,
        NodeType::Constant,
        NodeType::Clamp,
        NodeType::Modulo,
        NodeType::Scale,
        NodeType::SpectrumBin,
        NodeType::SpectrumInterpolate,
        NodeType::SpectrumRange,
        NodeType::AudioLevel,
        NodeType::Beat,
        NodeType::TempoMagnitude,
        NodeType::Chromagram,
    ];

    /// The wire-format name of this operator type.
    pub fn name(self) -> &'static str {
        match self {
            NodeType::Gradient => "gradient",
            NodeType::HsvToRgb => "hsv_to_rgb",
            NodeType::Output => "output",
            NodeType::PositionGradient => "position_gradient",
            NodeType::PaletteInterpolate => "palette_interpolate",
            NodeType::Time => "time",
            NodeType::Sin => "sin",
            NodeType::Add => "add",
            NodeType::Multiply => "multiply",
            NodeType::Constant => "constant",
            NodeType::Clamp => "clamp",
            NodeType::Modulo => "modulo",
            NodeType::Scale => "scale",
            NodeType::SpectrumBin => "spectrum_bin",
            NodeType::SpectrumInterpolate => "spectrum_interpolate",
            NodeType::SpectrumRange => "spectrum_range",
            NodeType::AudioLevel => "audio_level",
            NodeType::Beat => "beat",
            NodeType::TempoMagnitude => "tempo_magnitude",
            NodeType::Chromagram => "chromagram",
        }
    }

    /// Generator operators precede everything else in emission order.
    pub fn is_generator(self) -> bool {
        matches!(
            self,
            NodeType::PositionGradient | NodeType::Gradient | NodeType::Constant
        )
    }

    /// Sink operators compile to buffer-writing statement blocks and are
    /// never usable as another node's input.
    pub fn is_sink(self) -> bool {
        matches!(
            self,
            NodeType::Gradient
                | NodeType::HsvToRgb
                | NodeType::PaletteInterpolate
                | NodeType::Output
        )
    }

    /// Audio operators make a pattern audio-reactive.
    pub fn is_audio(self) -> bool {
        matches!(
            self,
            NodeType::SpectrumBin
                | NodeType::SpectrumInterpolate
                | NodeType::SpectrumRange
                | NodeType::AudioLevel
                | NodeType::Beat
                | NodeType::TempoMagnitude
                | NodeType::Chromagram
        )
    }
}

/// A node parameter value: a number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Numeric parameter (bin indices, factors, hues, ...).
    Number(f64),
    /// Text parameter (band names, palette names, ...).
    Text(String),
}

/// One operator instance in a pattern graph.
#[derive(Debug, Clone, Deserialize)]
pub struct Node {
    /// Identifier, unique within the graph.
    pub id: String,
    /// Operator type.
    #[serde(rename = "type")]
    pub kind: NodeType,
    /// Named parameters. Missing entries fall back to per-operator defaults.
    #[serde(default)]
    pub parameters: BTreeMap<String, ParamValue>,
    /// Positional operand node ids.
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Free-form author note.
    #[serde(default)]
    pub description: Option<String>,
}

impl Node {
    /// Look up a numeric parameter.
    ///
    /// Text values that parse as numbers are accepted; anything else counts
    /// as absent so the caller's documented default applies.
    pub fn number_param(&self, name: &str) -> Option<f64> {
        match self.parameters.get(name)? {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Text(s) => s.parse().ok(),
        }
    }

    /// Look up a text parameter.
    pub fn text_param(&self, name: &str) -> Option<&str> {
        match self.parameters.get(name)? {
            ParamValue::Text(s) => Some(s),
            ParamValue::Number(_) => None,
        }
    }
}

/// A documentation edge between two nodes.
///
/// Parsed for round-tripping by external tooling (visual editors), never
/// consulted by compilation: dependency resolution is driven by each node's
/// own input list.
#[derive(Debug, Clone, Deserialize)]
pub struct Wire {
    /// Source node id.
    pub from: String,
    /// Destination node id.
    pub to: String,
    /// Free-form author note.
    #[serde(default)]
    pub description: Option<String>,
}

/// One palette keyframe: a strip position and an 8-bit color.
///
/// Accepted in both the positional `[pos, r, g, b]` and the named
/// `{ "position": .., "r": .., "g": .., "b": .. }` wire forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "KeyframeRepr")]
pub struct PaletteKeyframe {
    /// Position along the palette, 0-255.
    pub position: u8,
    /// Red, 0-255.
    pub r: u8,
    /// Green, 0-255.
    pub g: u8,
    /// Blue, 0-255.
    pub b: u8,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KeyframeRepr {
    Positional(u8, u8, u8, u8),
    Named { position: u8, r: u8, g: u8, b: u8 },
}

impl From<KeyframeRepr> for PaletteKeyframe {
    fn from(repr: KeyframeRepr) -> Self {
        match repr {
            KeyframeRepr::Positional(position, r, g, b)
            | KeyframeRepr::Named { position, r, g, b } => PaletteKeyframe { position, r, g, b },
        }
    }
}

/// A complete pattern graph as loaded from one input file.
#[derive(Debug, Clone, Deserialize)]
pub struct Graph {
    /// Display name of the pattern.
    #[serde(default)]
    pub name: Option<String>,
    /// Free-form pattern description.
    #[serde(default)]
    pub description: Option<String>,
    /// Operator nodes, in file order.
    pub nodes: Vec<Node>,
    /// Documentation edges (pass-through metadata).
    #[serde(default)]
    pub wires: Vec<Wire>,
    /// Palette name, if any.
    #[serde(default)]
    pub palette: Option<String>,
    /// Palette keyframes consumed by `palette_interpolate`.
    #[serde(default)]
    pub palette_data: Vec<PaletteKeyframe>,
}

impl Graph {
    /// Find a node by id with a linear scan of the node sequence.
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
