//! Pattern emission.
//!
//! Renders compiled patterns into C++ source text: one render function in
//! single mode, or one guarded render function per pattern plus a static
//! registry table in registry mode. Rendering is direct string building;
//! generated symbol names are a fixed contract with the firmware runtime.

use crate::error::CodegenError;
use crate::expr;
use chrono::{SecondsFormat, Utc};
use std::collections::HashSet;
use strand_graph::{Graph, emission_order};

/// One pattern prepared for registry emission.
struct CompiledPattern {
    name: String,
    description: String,
    safe_id: String,
    is_audio_reactive: bool,
    steps: Vec<String>,
}

/// Compile a graph's emission steps: one statement block per sink node, in
/// emission order.
pub fn compile_steps(graph: &Graph) -> Result<Vec<String>, CodegenError> {
    // Referential integrity first: every declared input must resolve,
    // consumed or not.
    for node in &graph.nodes {
        for id in &node.inputs {
            if graph.find_node(id).is_none() {
                return Err(CodegenError::DanglingInput {
                    node: node.id.clone(),
                    missing: id.clone(),
                });
            }
        }
    }

    let mut steps = Vec::new();
    for node in emission_order(graph) {
        if let Some(block) = expr::compile_step(node, graph)? {
            steps.push(block);
        }
    }
    Ok(steps)
}

/// True iff the graph contains at least one audio operator.
pub fn is_audio_reactive(graph: &Graph) -> bool {
    graph.nodes.iter().any(|n| n.kind.is_audio())
}

/// Derive an identifier-safe id from a pattern display name.
///
/// Lowercases, collapses runs of non-alphanumerics to one underscore, and
/// trims leading/trailing underscores. A name that normalizes to nothing
/// falls back to `pattern`.
pub fn safe_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            id.push(ch.to_ascii_lowercase());
        } else if !id.is_empty() && !id.ends_with('_') {
            id.push('_');
        }
    }
    let id = id.trim_end_matches('_');
    if id.is_empty() {
        "pattern".to_string()
    } else {
        id.to_string()
    }
}

fn unique_safe_id(base: &str, used: &HashSet<String>) -> String {
    if !used.contains(base) {
        return base.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}_{n}");
        if !used.contains(&candidate) {
            tracing::warn!("safe id collision: '{base}' disambiguated to '{candidate}'");
            return candidate;
        }
        n += 1;
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render one graph as a minimal single-pattern source unit.
pub fn render_single(graph: &Graph) -> Result<String, CodegenError> {
    render_single_at(graph, &timestamp())
}

pub(crate) fn render_single_at(graph: &Graph, timestamp: &str) -> Result<String, CodegenError> {
    let steps = compile_steps(graph)?;
    let name = graph.name.as_deref().unwrap_or("Generated Effect");

    let mut out = String::new();
    out.push_str("// AUTO-GENERATED CODE - DO NOT EDIT\n");
    out.push_str(&format!("// Generated at: {timestamp}\n"));
    out.push_str(&format!("// Graph: {name}\n\n"));
    out.push_str("#pragma once\n\n");
    out.push_str("extern CRGBF leds[NUM_LEDS];\n\n");
    out.push_str("void draw_generated_effect(float time, const PatternParameters& params) {\n");
    out.push_str(&steps.join("\n\n"));
    out.push_str("\n}\n");

    tracing::debug!("rendered single pattern '{}' ({} step(s))", name, steps.len());
    Ok(out)
}

/// Render a batch of graphs as a multi-pattern registry source unit.
pub fn render_registry(graphs: &[Graph]) -> Result<String, CodegenError> {
    render_registry_at(graphs, &timestamp())
}

pub(crate) fn render_registry_at(
    graphs: &[Graph],
    timestamp: &str,
) -> Result<String, CodegenError> {
    let mut used = HashSet::new();
    let mut patterns = Vec::with_capacity(graphs.len());

    for graph in graphs {
        let name = graph.name.as_deref().unwrap_or("Unnamed Pattern").to_string();
        let steps = compile_steps(graph).map_err(|e| CodegenError::pattern(&name, e))?;
        let audio = is_audio_reactive(graph);
        let id = unique_safe_id(
            &safe_id(graph.name.as_deref().unwrap_or("unnamed")),
            &used,
        );
        used.insert(id.clone());

        tracing::debug!("compiled pattern '{name}' (audio_reactive: {audio})");
        patterns.push(CompiledPattern {
            name,
            description: graph
                .description
                .clone()
                .unwrap_or_else(|| "No description".to_string()),
            safe_id: id,
            is_audio_reactive: audio,
            steps,
        });
    }

    let names: Vec<&str> = patterns.iter().map(|p| p.name.as_str()).collect();

    let mut out = String::new();
    out.push_str("// AUTO-GENERATED MULTI-PATTERN CODE - DO NOT EDIT\n");
    out.push_str(&format!("// Generated at: {timestamp}\n"));
    out.push_str(&format!("// Patterns: {}\n\n", names.join(", ")));
    out.push_str("#pragma once\n\n");
    out.push_str("#include \"pattern_registry.h\"\n");
    out.push_str("#include \"pattern_audio_interface.h\"\n\n");
    out.push_str("extern CRGBF leds[NUM_LEDS];\n\n");

    for p in &patterns {
        out.push_str(&format!("// Pattern: {}\n// {}\n", p.name, p.description));
        out.push_str(&format!(
            "void draw_{}(float time, const PatternParameters& params) {{\n",
            p.safe_id
        ));
        if p.is_audio_reactive {
            // Thread-safe snapshot, then render at most once per fresh
            // audio update.
            out.push_str("    PATTERN_AUDIO_START();\n\n");
            out.push_str("    if (!AUDIO_IS_FRESH()) {\n        return;\n    }\n\n");
        }
        out.push_str(&p.steps.join("\n\n"));
        out.push_str("\n}\n\n");
    }

    out.push_str("// Pattern registry array\n");
    out.push_str("const PatternInfo g_pattern_registry[] = {\n");
    for (i, p) in patterns.iter().enumerate() {
        let comma = if i + 1 == patterns.len() { "" } else { "," };
        out.push_str(&format!(
            "    {{ \"{}\", \"{}\", \"{}\", draw_{}, {} }}{}\n",
            p.name, p.safe_id, p.description, p.safe_id, p.is_audio_reactive, comma
        ));
    }
    out.push_str("};\n\n");
    out.push_str(&format!("const uint8_t g_num_patterns = {};\n", patterns.len()));

    let audio_count = patterns.iter().filter(|p| p.is_audio_reactive).count();
    verify_audio_call_sites(&out, audio_count)?;

    tracing::debug!(
        "rendered registry: {} pattern(s), {} audio-reactive",
        patterns.len(),
        audio_count
    );
    Ok(out)
}

/// Post-emission self-check: an audio-reactive pattern count above zero
/// requires at least one snapshot call site in the rendered text.
pub(crate) fn verify_audio_call_sites(
    code: &str,
    audio_count: usize,
) -> Result<(), CodegenError> {
    let call_sites = code.matches("PATTERN_AUDIO_START()").count();

    if audio_count > 0 && call_sites == 0 {
        return Err(CodegenError::AudioGuardMissing {
            patterns: audio_count,
        });
    }
    if audio_count != call_sites {
        tracing::warn!(
            "audio call-site mismatch: {audio_count} audio-reactive pattern(s), \
             {call_sites} PATTERN_AUDIO_START() call site(s)"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(json: &str) -> Graph {
        serde_json::from_str(json).unwrap()
    }

    const PALETTE_PATTERN: &str = r#"{
        "name": "Ember",
        "description": "Warm center glow",
        "nodes": [
            { "id": "paint", "type": "palette_interpolate" },
            { "id": "out", "type": "output" }
        ],
        "palette_data": [[0, 0, 0, 0], [255, 255, 64, 0]]
    }"#;

    const AUDIO_PATTERN: &str = r#"{
        "name": "Bass Bloom",
        "description": "Low band pulse",
        "nodes": [
            { "id": "bass", "type": "spectrum_range", "parameters": { "band": "low" } },
            { "id": "paint", "type": "palette_interpolate", "inputs": ["bass"] },
            { "id": "out", "type": "output" }
        ],
        "palette_data": [[0, 0, 0, 32], [255, 0, 128, 255]]
    }"#;

    // --- safe ids ---

    #[test]
    fn safe_id_normalizes_display_names() {
        assert_eq!(safe_id("Lava Beat"), "lava_beat");
        assert_eq!(safe_id("  --Fire!! Storm--  "), "fire_storm");
        assert_eq!(safe_id("already_safe"), "already_safe");
        assert_eq!(safe_id("MiXeD CaSe 99"), "mixed_case_99");
    }

    #[test]
    fn safe_id_falls_back_when_nothing_survives() {
        assert_eq!(safe_id("???"), "pattern");
        assert_eq!(safe_id(""), "pattern");
    }

    #[test]
    fn colliding_names_get_numeric_suffixes() {
        let a = graph(&PALETTE_PATTERN.replace("Ember", "Glow"));
        let b = graph(&PALETTE_PATTERN.replace("Ember", "glow"));
        let c = graph(&PALETTE_PATTERN.replace("Ember", "Glow!"));
        let code = render_registry_at(&[a, b, c], "T").unwrap();
        assert!(code.contains("void draw_glow(float"), "got: {code}");
        assert!(code.contains("void draw_glow_2(float"), "got: {code}");
        assert!(code.contains("void draw_glow_3(float"), "got: {code}");
    }

    // --- audio detection ---

    #[test]
    fn audio_reactive_iff_audio_operator_present() {
        assert!(!is_audio_reactive(&graph(PALETTE_PATTERN)));
        assert!(is_audio_reactive(&graph(AUDIO_PATTERN)));
    }

    // --- single mode ---

    #[test]
    fn single_mode_renders_one_entry_point() {
        let code = render_single_at(&graph(PALETTE_PATTERN), "2026-01-01T00:00:00Z").unwrap();
        assert!(code.starts_with("// AUTO-GENERATED CODE - DO NOT EDIT\n"), "got: {code}");
        assert!(code.contains("// Generated at: 2026-01-01T00:00:00Z"), "got: {code}");
        assert!(code.contains("// Graph: Ember"), "got: {code}");
        assert!(code.contains("#pragma once"), "got: {code}");
        assert!(code.contains("extern CRGBF leds[NUM_LEDS];"), "got: {code}");
        assert!(
            code.contains("void draw_generated_effect(float time, const PatternParameters& params) {"),
            "got: {code}"
        );
    }

    #[test]
    fn single_mode_is_deterministic_up_to_timestamp() {
        let g = graph(PALETTE_PATTERN);
        let a = render_single_at(&g, "T").unwrap();
        let b = render_single_at(&g, "T").unwrap();
        assert_eq!(a, b);
    }

    // --- registry mode ---

    #[test]
    fn registry_emits_entry_per_pattern_in_input_order() {
        let a = graph(&PALETTE_PATTERN.replace("Ember", "Alpha"));
        let b = graph(&PALETTE_PATTERN.replace("Ember", "Beta"));
        let code = render_registry_at(&[a, b], "T").unwrap();

        assert!(code.contains("// Patterns: Alpha, Beta"), "got: {code}");
        assert!(code.contains("const uint8_t g_num_patterns = 2;"), "got: {code}");

        let alpha = code.find("{ \"Alpha\", \"alpha\",").unwrap();
        let beta = code.find("{ \"Beta\", \"beta\",").unwrap();
        assert!(alpha < beta, "registry rows out of order: {code}");
    }

    #[test]
    fn audio_pattern_gets_snapshot_guard_and_flag() {
        let code = render_registry_at(&[graph(AUDIO_PATTERN)], "T").unwrap();
        assert!(code.contains("PATTERN_AUDIO_START();"), "got: {code}");
        assert!(code.contains("if (!AUDIO_IS_FRESH()) {"), "got: {code}");
        assert!(
            code.contains("{ \"Bass Bloom\", \"bass_bloom\", \"Low band pulse\", draw_bass_bloom, true }"),
            "got: {code}"
        );
    }

    #[test]
    fn non_audio_pattern_has_no_guard() {
        let code = render_registry_at(&[graph(PALETTE_PATTERN)], "T").unwrap();
        assert!(!code.contains("PATTERN_AUDIO_START"), "got: {code}");
        assert!(code.contains("draw_ember, false }"), "got: {code}");
    }

    #[test]
    fn registry_failure_names_the_pattern() {
        let bad = graph(
            r#"{
                "name": "Broken",
                "nodes": [
                    { "id": "paint", "type": "palette_interpolate", "inputs": ["ghost"] }
                ],
                "palette_data": [[0, 0, 0, 0]]
            }"#,
        );
        let err = render_registry_at(&[graph(PALETTE_PATTERN), bad], "T").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("pattern 'Broken'"), "got: {msg}");
        assert!(msg.contains("'ghost'"), "got: {msg}");
    }

    #[test]
    fn unnamed_graphs_use_placeholder_metadata() {
        let g = graph(
            r#"{
                "nodes": [{ "id": "paint", "type": "palette_interpolate" }],
                "palette_data": [[0, 9, 9, 9]]
            }"#,
        );
        let code = render_registry_at(&[g], "T").unwrap();
        assert!(code.contains("\"Unnamed Pattern\""), "got: {code}");
        assert!(code.contains("\"No description\""), "got: {code}");
        assert!(code.contains("void draw_unnamed(float"), "got: {code}");
    }

    // --- emission self-check ---

    #[test]
    fn self_check_passes_when_counts_match() {
        assert!(verify_audio_call_sites("PATTERN_AUDIO_START();", 1).is_ok());
        assert!(verify_audio_call_sites("no audio here", 0).is_ok());
    }

    #[test]
    fn self_check_fails_when_audio_patterns_have_no_call_sites() {
        let err = verify_audio_call_sites("nothing guarded", 3).unwrap_err();
        assert!(
            matches!(err, CodegenError::AudioGuardMissing { patterns: 3 }),
            "got: {err}"
        );
    }

    #[test]
    fn self_check_tolerates_nonzero_mismatch() {
        // More call sites than audio patterns is only a warning.
        let text = "PATTERN_AUDIO_START(); PATTERN_AUDIO_START();";
        assert!(verify_audio_call_sites(text, 1).is_ok());
    }

    // --- compile_steps ---

    #[test]
    fn unconsumed_dangling_reference_still_fails() {
        // The resolution invariant holds for every declared input, not just
        // the ones a sink happens to pull on.
        let g = graph(
            r#"{
                "nodes": [
                    { "id": "paint", "type": "palette_interpolate" },
                    { "id": "out", "type": "output", "inputs": ["ghost"] }
                ],
                "palette_data": [[0, 0, 0, 0]]
            }"#,
        );
        let err = compile_steps(&g).unwrap_err();
        assert!(
            matches!(err, CodegenError::DanglingInput { ref missing, .. } if missing == "ghost"),
            "got: {err}"
        );
    }

    #[test]
    fn steps_cover_every_sink_in_emission_order() {
        let g = graph(
            r#"{
                "name": "Legacy",
                "nodes": [
                    { "id": "out", "type": "output" },
                    { "id": "conv", "type": "hsv_to_rgb" },
                    { "id": "paint", "type": "palette_interpolate" }
                ],
                "palette_data": [[0, 1, 1, 1]]
            }"#,
        );
        let steps = compile_steps(&g).unwrap();
        assert_eq!(steps.len(), 2);
        assert!(steps[0].contains("hsv_to_rgb"), "got: {}", steps[0]);
        assert!(steps[1].contains("palette"), "got: {}", steps[1]);
    }
}

#[cfg(test)]
mod proptests {
    use super::safe_id;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn safe_id_is_always_a_valid_identifier(name in ".{0,64}") {
            let id = safe_id(&name);
            prop_assert!(!id.is_empty());
            prop_assert!(!id.starts_with('_'));
            prop_assert!(!id.ends_with('_'));
            prop_assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
            prop_assert!(!id.contains("__"));
        }

        #[test]
        fn safe_id_is_idempotent(name in "[a-zA-Z0-9 _-]{0,64}") {
            let once = safe_id(&name);
            prop_assert_eq!(safe_id(&once), once);
        }
    }
}
