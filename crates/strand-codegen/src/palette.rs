//! Palette keyframe encoding.
//!
//! Turns a graph's keyframe table into a constant color array plus a
//! per-pixel interpolation loop. The position driving the lookup defaults
//! to the center-origin distance formula; a declared input overrides it,
//! wrapped to [0, 1) with fmod.

use crate::error::CodegenError;
use crate::expr;
use strand_graph::{Graph, Node};

pub(crate) fn interpolation_block<'g>(
    node: &'g Node,
    graph: &'g Graph,
) -> Result<String, CodegenError> {
    if graph.palette_data.is_empty() {
        return Err(CodegenError::MissingPaletteData {
            node: node.id.clone(),
        });
    }

    let position = match node.inputs.first() {
        Some(id) => {
            let input = graph
                .find_node(id)
                .ok_or_else(|| CodegenError::DanglingInput {
                    node: node.id.clone(),
                    missing: id.clone(),
                })?;
            let mut active = vec![node.id.as_str()];
            let code = expr::compile_expr(input, graph, &mut active)?;
            format!("fmod({code}, 1.0f)")
        }
        None => expr::POSITION_EXPR.to_string(),
    };

    let colors: Vec<String> = graph
        .palette_data
        .iter()
        .map(|kf| {
            format!(
                "CRGBF({:.2}f, {:.2}f, {:.2}f)",
                f64::from(kf.r) / 255.0,
                f64::from(kf.g) / 255.0,
                f64::from(kf.b) / 255.0
            )
        })
        .collect();

    let palette = node.text_param("palette").unwrap_or("default");
    let colors = colors.join(", ");
    let size = graph.palette_data.len();

    Ok(format!(
        r"    // {palette} palette - position to color interpolation
    const CRGBF palette_colors[] = {{ {colors} }};
    const int palette_size = {size};

    for (int i = 0; i < NUM_LEDS; i++) {{
        float position = {position};
        int palette_index = int(position * (palette_size - 1));
        float interpolation_factor = (position * (palette_size - 1)) - palette_index;

        if (palette_index >= palette_size - 1) {{
            leds[i] = palette_colors[palette_size - 1];
        }} else {{
            const CRGBF& color1 = palette_colors[palette_index];
            const CRGBF& color2 = palette_colors[palette_index + 1];

            leds[i].r = color1.r + (color2.r - color1.r) * interpolation_factor;
            leds[i].g = color1.g + (color2.g - color1.g) * interpolation_factor;
            leds[i].b = color1.b + (color2.b - color1.b) * interpolation_factor;
        }}

        leds[i].r *= params.brightness;
        leds[i].g *= params.brightness;
        leds[i].b *= params.brightness;
    }}"
    ))
}
