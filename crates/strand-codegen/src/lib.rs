//! Inline C++ code generation for strand pattern graphs.
//!
//! Turns validated pattern graphs into flat, allocation-free rendering code
//! for the strip firmware. Pure operators compile to inline expressions,
//! composed recursively from their resolved inputs; sink operators compile
//! to whole-strip statement blocks. The emitter renders one pattern
//! (single mode) or a whole registry of guarded render functions
//! (registry mode).
//!
//! Generated symbol names (`leds`, `NUM_LEDS`, `AUDIO_SPECTRUM`,
//! `PatternParameters`, ...) are a fixed contract with the firmware runtime
//! and are treated as opaque literals throughout.
//!
//! # Example
//!
//! ```
//! use strand_codegen::render_single;
//! use strand_graph::Graph;
//!
//! let graph: Graph = serde_json::from_str(
//!     r#"{
//!         "name": "Ember",
//!         "nodes": [
//!             { "id": "paint", "type": "palette_interpolate" },
//!             { "id": "out", "type": "output" }
//!         ],
//!         "palette_data": [[0, 0, 0, 0], [255, 255, 64, 0]]
//!     }"#,
//! )
//! .unwrap();
//!
//! let code = render_single(&graph).unwrap();
//! assert!(code.contains("void draw_generated_effect"));
//! ```

mod emit;
mod error;
mod expr;
mod palette;

pub use emit::{
    compile_steps, is_audio_reactive, render_registry, render_single, safe_id,
};
pub use error::CodegenError;
