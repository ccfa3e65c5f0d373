//! Expression compilation.
//!
//! The recursive core of the compiler. Each operator compiles to either an
//! inline C expression (pure operators, composed recursively from resolved
//! inputs) or a whole-strip statement block (sink operators). Shared
//! subexpressions are recompiled and re-inlined at every use; flat
//! generated code is preferred over shared intermediates, so there is no
//! memoization. A "currently compiling" id stack threaded through the
//! recursion turns input cycles into errors instead of unbounded recursion.

use crate::error::CodegenError;
use crate::palette;
use strand_graph::{Graph, Node, NodeType};

/// Spectrum bins span 0-63.
const MAX_BIN: f64 = 63.0;
/// Chromagram pitch classes span 0-11 (C through B).
const MAX_PITCH: f64 = 11.0;

/// Distance from the strip center: 0.0 at the center, 1.0 at both edges.
/// Deliberately not an edge-to-edge sweep.
pub(crate) const POSITION_EXPR: &str =
    "(abs(float(i) - STRIP_CENTER_POINT) / STRIP_HALF_LENGTH)";

/// Compile a node as a top-level emission step.
///
/// Sink operators produce a statement block; pure operators produce
/// `None` (they are inlined into their consumers), as does `output`
/// (structural; the sinks write the strip directly).
pub(crate) fn compile_step(node: &Node, graph: &Graph) -> Result<Option<String>, CodegenError> {
    match node.kind {
        NodeType::Gradient => Ok(Some(gradient_block(node))),
        NodeType::HsvToRgb => Ok(Some(hsv_to_rgb_block(node))),
        NodeType::PaletteInterpolate => palette::interpolation_block(node, graph).map(Some),
        _ => Ok(None),
    }
}

/// Compile a node to an inline expression, recursively compiling its
/// inputs.
///
/// `active` holds the ids currently being compiled on this recursion path;
/// revisiting one means the graph is cyclic.
pub(crate) fn compile_expr<'g>(
    node: &'g Node,
    graph: &'g Graph,
    active: &mut Vec<&'g str>,
) -> Result<String, CodegenError> {
    if node.kind.is_sink() {
        return Err(CodegenError::SinkAsInput {
            node: node.id.clone(),
            kind: node.kind.name(),
        });
    }
    if active.contains(&node.id.as_str()) {
        return Err(CodegenError::CyclicGraph {
            node: node.id.clone(),
        });
    }

    active.push(node.id.as_str());
    let expr = compile_pure(node, graph, active)?;
    active.pop();
    Ok(expr)
}

fn compile_pure<'g>(
    node: &'g Node,
    graph: &'g Graph,
    active: &mut Vec<&'g str>,
) -> Result<String, CodegenError> {
    match node.kind {
        NodeType::PositionGradient => Ok(POSITION_EXPR.to_string()),

        NodeType::Time => Ok("(time * params.speed)".to_string()),

        NodeType::Sin => {
            let input = input_expr(node, graph, 0, 1, active)?;
            Ok(format!("(sinf({input} * 6.28318f) * 0.5f + 0.5f)"))
        }

        NodeType::Add => {
            let a = input_expr(node, graph, 0, 2, active)?;
            let b = input_expr(node, graph, 1, 2, active)?;
            Ok(format!("fmin(1.0f, {a} + {b})"))
        }

        NodeType::Multiply => {
            let a = input_expr(node, graph, 0, 2, active)?;
            let b = input_expr(node, graph, 1, 2, active)?;
            Ok(format!("({a} * {b})"))
        }

        NodeType::Constant => {
            let value = node.number_param("value").unwrap_or(1.0);
            Ok(format!("{}f", fmt_float(value)))
        }

        NodeType::Clamp => {
            let min = node.number_param("min").unwrap_or(0.0);
            let max = node.number_param("max").unwrap_or(1.0);
            let input = input_expr(node, graph, 0, 1, active)?;
            Ok(format!(
                "fmax({}f, fmin({}f, {input}))",
                fmt_float(min),
                fmt_float(max)
            ))
        }

        NodeType::Modulo => {
            let divisor = node.number_param("divisor").unwrap_or(1.0);
            let input = input_expr(node, graph, 0, 1, active)?;
            Ok(format!("fmod({input}, {}f)", fmt_float(divisor)))
        }

        NodeType::Scale => {
            let factor = node.number_param("factor").unwrap_or(1.0);
            let input = input_expr(node, graph, 0, 1, active)?;
            Ok(format!("({input} * {}f)", fmt_float(factor)))
        }

        NodeType::SpectrumBin => {
            let bin = index_param(node, "bin", MAX_BIN, 0.0)?;
            Ok(format!("AUDIO_SPECTRUM[{bin}]"))
        }

        NodeType::SpectrumInterpolate => {
            let start = index_param(node, "start_bin", MAX_BIN, 0.0)?;
            let end = index_param(node, "end_bin", MAX_BIN, 63.0)?;
            Ok(format!(
                "AUDIO_SPECTRUM[{start} + int((float(i) / float(NUM_LEDS - 1)) * {})]",
                end - start
            ))
        }

        NodeType::SpectrumRange => spectrum_range_expr(node),

        NodeType::AudioLevel => Ok("AUDIO_VU".to_string()),

        NodeType::Beat => {
            let bin = node.number_param("tempo_bin").unwrap_or(-1.0);
            // -1 is the auto sentinel: use the aggregate beat confidence.
            if bin == -1.0 {
                Ok("fmin(1.0f, AUDIO_TEMPO_CONFIDENCE * params.beat_sensitivity)".to_string())
            } else {
                let bin = check_range(node, "tempo_bin", bin, 0.0, MAX_BIN)?;
                Ok(format!(
                    "fmin(1.0f, audio.tempo_magnitude[{bin}] * params.beat_sensitivity)"
                ))
            }
        }

        NodeType::TempoMagnitude => {
            let bin = index_param(node, "tempo_bin", MAX_BIN, 0.0)?;
            Ok(format!("audio.tempo_magnitude[{bin}]"))
        }

        NodeType::Chromagram => {
            let pitch = index_param(node, "pitch", MAX_PITCH, 0.0)?;
            Ok(format!("AUDIO_CHROMAGRAM[{pitch}]"))
        }

        NodeType::Gradient
        | NodeType::HsvToRgb
        | NodeType::PaletteInterpolate
        | NodeType::Output => {
            unreachable!("sink operators are rejected by compile_expr")
        }
    }
}

/// Resolve and compile one positional input of `node`.
pub(crate) fn input_expr<'g>(
    node: &'g Node,
    graph: &'g Graph,
    index: usize,
    required: usize,
    active: &mut Vec<&'g str>,
) -> Result<String, CodegenError> {
    let Some(id) = node.inputs.get(index) else {
        return Err(CodegenError::MissingInput {
            node: node.id.clone(),
            kind: node.kind.name(),
            required,
            found: node.inputs.len(),
        });
    };
    let input = graph.find_node(id).ok_or_else(|| CodegenError::DanglingInput {
        node: node.id.clone(),
        missing: id.clone(),
    })?;
    compile_expr(input, graph, active)
}

/// Read an index-valued parameter, check its inclusive `[0, max]` range,
/// and truncate to an integer for emission.
fn index_param(node: &Node, name: &str, max: f64, default: f64) -> Result<i64, CodegenError> {
    let value = node.number_param(name).unwrap_or(default);
    check_range(node, name, value, 0.0, max)
}

fn check_range(
    node: &Node,
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<i64, CodegenError> {
    if value < min || value > max {
        return Err(CodegenError::ParamRange {
            node: node.id.clone(),
            param: name.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(value as i64)
}

fn spectrum_range_expr(node: &Node) -> Result<String, CodegenError> {
    match node.text_param("band") {
        Some("low") => Ok(band_expr(0, 20, "spectrum_low")),
        Some("mid") => Ok(band_expr(20, 42, "spectrum_mid")),
        Some("high") => Ok(band_expr(42, 63, "spectrum_high")),
        _ => {
            // Custom mode: explicit inclusive bin range, averaged, with no
            // sensitivity factor and no clamp.
            let start = index_param(node, "start_bin", MAX_BIN, 0.0)?;
            let end = index_param(node, "end_bin", MAX_BIN, 10.0)?;
            if start >= end {
                return Err(CodegenError::InvertedRange {
                    node: node.id.clone(),
                    start,
                    end,
                });
            }
            Ok(format!("({} / {}.0f)", bin_sum(start, end), end - start + 1))
        }
    }
}

/// Mean of an inclusive bin range, clamped to [0, 1], scaled by a runtime
/// sensitivity parameter.
fn band_expr(start: i64, end: i64, sensitivity: &str) -> String {
    format!(
        "(fmin(1.0f, fmax(0.0f, {} / {}.0f)) * params.{sensitivity})",
        bin_sum(start, end),
        end - start + 1
    )
}

fn bin_sum(start: i64, end: i64) -> String {
    let terms: Vec<String> = (start..=end)
        .map(|b| format!("AUDIO_SPECTRUM[{b}]"))
        .collect();
    format!("({})", terms.join(" + "))
}

/// Format a float as a C literal fragment, always with a decimal point so
/// the `f` suffix attaches to a valid floating literal.
pub(crate) fn fmt_float(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn gradient_block(node: &Node) -> String {
    let start = node.number_param("start_hue").unwrap_or(0.0);
    let end = node.number_param("end_hue").unwrap_or(1.0);
    let range = end - start;
    format!(
        r"    // Node: {id} (gradient)
    for (int i = 0; i < NUM_LEDS; i++) {{
        float t = (float)i / (NUM_LEDS - 1);
        field_buffer[i] = {start}f + ({range}f) * t;
    }}",
        id = node.id,
        start = fmt_float(start),
        range = fmt_float(range)
    )
}

fn hsv_to_rgb_block(node: &Node) -> String {
    let brightness = node.number_param("brightness").unwrap_or(1.0);
    format!(
        r"    // Node: {id} (hsv_to_rgb)
    for (int i = 0; i < NUM_LEDS; i++) {{
        float h = field_buffer[i];
        float s = 1.0f;
        float v = {brightness}f;

        float c = v * s;
        float x = c * (1.0f - fabs(fmod(h * 6.0f, 2.0f) - 1.0f));
        float m = v - c;

        float r, g, b;
        switch ((int)(h * 6.0f) % 6) {{
            case 0: r = c; g = x; b = 0; break;
            case 1: r = x; g = c; b = 0; break;
            case 2: r = 0; g = c; b = x; break;
            case 3: r = 0; g = x; b = c; break;
            case 4: r = x; g = 0; b = c; break;
            case 5: r = c; g = 0; b = x; break;
            default: r = 0; g = 0; b = 0; break;
        }}

        color_buffer[i].r = r + m;
        color_buffer[i].g = g + m;
        color_buffer[i].b = b + m;
    }}",
        id = node.id,
        brightness = fmt_float(brightness)
    )
}
