//! Node type listing and information command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;

#[derive(Args)]
pub struct NodesArgs {
    /// Show details for a specific node type
    #[arg(value_name = "NODE_TYPE")]
    node_type: Option<String>,
}

struct ParamDoc {
    name: &'static str,
    description: &'static str,
    default: &'static str,
    range: &'static str,
}

struct NodeDoc {
    name: &'static str,
    description: &'static str,
    inputs: &'static str,
    parameters: &'static [ParamDoc],
}

const NODE_DOCS: &[NodeDoc] = &[
    NodeDoc {
        name: "position_gradient",
        description: "Distance from strip center (0 at center, 1 at the edges)",
        inputs: "none",
        parameters: &[],
    },
    NodeDoc {
        name: "constant",
        description: "A literal value",
        inputs: "none",
        parameters: &[ParamDoc {
            name: "value",
            description: "The literal",
            default: "1.0",
            range: "any",
        }],
    },
    NodeDoc {
        name: "time",
        description: "Animation clock scaled by the runtime speed parameter",
        inputs: "none",
        parameters: &[],
    },
    NodeDoc {
        name: "sin",
        description: "Sine of input x 2 pi, rescaled to [0, 1]",
        inputs: "1 (signal)",
        parameters: &[],
    },
    NodeDoc {
        name: "add",
        description: "Sum of two inputs, clamped to 1.0",
        inputs: "2 (operands)",
        parameters: &[],
    },
    NodeDoc {
        name: "multiply",
        description: "Product of two inputs, unclamped",
        inputs: "2 (operands)",
        parameters: &[],
    },
    NodeDoc {
        name: "clamp",
        description: "Bound input to [min, max]",
        inputs: "1 (signal)",
        parameters: &[
            ParamDoc {
                name: "min",
                description: "Lower bound",
                default: "0.0",
                range: "any",
            },
            ParamDoc {
                name: "max",
                description: "Upper bound",
                default: "1.0",
                range: "any",
            },
        ],
    },
    NodeDoc {
        name: "modulo",
        description: "Input modulo a divisor",
        inputs: "1 (signal)",
        parameters: &[ParamDoc {
            name: "divisor",
            description: "Wrap point",
            default: "1.0",
            range: "any",
        }],
    },
    NodeDoc {
        name: "scale",
        description: "Input times a factor",
        inputs: "1 (signal)",
        parameters: &[ParamDoc {
            name: "factor",
            description: "Multiplier",
            default: "1.0",
            range: "any",
        }],
    },
    NodeDoc {
        name: "spectrum_bin",
        description: "One frequency bin of the audio spectrum",
        inputs: "none",
        parameters: &[ParamDoc {
            name: "bin",
            description: "Spectrum bin index",
            default: "0",
            range: "0-63",
        }],
    },
    NodeDoc {
        name: "spectrum_interpolate",
        description: "Per-pixel spectrum lookup across a bin range",
        inputs: "none",
        parameters: &[
            ParamDoc {
                name: "start_bin",
                description: "First bin",
                default: "0",
                range: "0-63",
            },
            ParamDoc {
                name: "end_bin",
                description: "Last bin",
                default: "63",
                range: "0-63",
            },
        ],
    },
    NodeDoc {
        name: "spectrum_range",
        description: "Mean energy of a frequency band",
        inputs: "none",
        parameters: &[
            ParamDoc {
                name: "band",
                description: "low, mid, high, or custom",
                default: "custom",
                range: "-",
            },
            ParamDoc {
                name: "start_bin",
                description: "First bin (custom band)",
                default: "0",
                range: "0-63",
            },
            ParamDoc {
                name: "end_bin",
                description: "Last bin (custom band, must exceed start_bin)",
                default: "10",
                range: "0-63",
            },
        ],
    },
    NodeDoc {
        name: "audio_level",
        description: "Overall VU level",
        inputs: "none",
        parameters: &[],
    },
    NodeDoc {
        name: "beat",
        description: "Beat confidence (or one tempo bin) times beat sensitivity",
        inputs: "none",
        parameters: &[ParamDoc {
            name: "tempo_bin",
            description: "Tempo bin, -1 for aggregate confidence",
            default: "-1",
            range: "-1, 0-63",
        }],
    },
    NodeDoc {
        name: "tempo_magnitude",
        description: "Raw magnitude of one tempo bin",
        inputs: "none",
        parameters: &[ParamDoc {
            name: "tempo_bin",
            description: "Tempo bin index",
            default: "0",
            range: "0-63",
        }],
    },
    NodeDoc {
        name: "chromagram",
        description: "Energy of one pitch class (C through B)",
        inputs: "none",
        parameters: &[ParamDoc {
            name: "pitch",
            description: "Pitch class index",
            default: "0",
            range: "0-11",
        }],
    },
    NodeDoc {
        name: "palette_interpolate",
        description: "Keyframe palette lookup writing the strip (sink)",
        inputs: "0-1 (optional position)",
        parameters: &[ParamDoc {
            name: "palette",
            description: "Palette label for the generated comment",
            default: "default",
            range: "-",
        }],
    },
    NodeDoc {
        name: "hsv_to_rgb",
        description: "Legacy HSV conversion reading the field buffer (sink, warns)",
        inputs: "none",
        parameters: &[ParamDoc {
            name: "brightness",
            description: "HSV value channel",
            default: "1.0",
            range: "0-1",
        }],
    },
    NodeDoc {
        name: "gradient",
        description: "Legacy edge-to-edge hue ramp (forbidden)",
        inputs: "none",
        parameters: &[
            ParamDoc {
                name: "start_hue",
                description: "Hue at the first pixel",
                default: "0.0",
                range: "0-1",
            },
            ParamDoc {
                name: "end_hue",
                description: "Hue at the last pixel",
                default: "1.0",
                range: "0-1",
            },
        ],
    },
    NodeDoc {
        name: "output",
        description: "Structural end of the graph",
        inputs: "1 (color source)",
        parameters: &[],
    },
];

pub fn run(args: NodesArgs) -> anyhow::Result<()> {
    if let Some(name) = &args.node_type {
        let doc = NODE_DOCS
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("Unknown node type: {}", name))?;

        println!("{}", doc.name);
        println!("{}", "=".repeat(doc.name.len()));
        println!();
        println!("{}", doc.description);
        println!("Inputs: {}", doc.inputs);
        println!();

        if doc.parameters.is_empty() {
            println!("No parameters.");
        } else {
            println!("Parameters:");
            println!();
            println!("  {:12}  {:44}  {:8}  {}", "Name", "Description", "Default", "Range");
            println!("  {:12}  {:44}  {:8}  {}", "----", "-----------", "-------", "-----");
            for param in doc.parameters {
                println!(
                    "  {:12}  {:44}  {:8}  {}",
                    param.name, param.description, param.default, param.range
                );
            }
        }
    } else {
        println!("Supported Node Types");
        println!("====================");
        println!();

        for doc in NODE_DOCS {
            println!("  {:22} - {}", doc.name, doc.description);
        }

        println!();
        println!("Use 'strandc nodes <type>' for detailed parameter info.");
    }

    Ok(())
}
