//! Compiler configuration.
//!
//! An optional `strandc.toml` next to the invocation adjusts compilation
//! behavior. The file is looked up at `--config <path>` when given, else
//! `./strandc.toml`; absence of the default file is not an error.
//!
//! ```toml
//! [compile]
//! deny_warnings = true
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// Top-level `strandc.toml` contents.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Compilation behavior.
    #[serde(default)]
    pub compile: CompileConfig,
}

/// The `[compile]` section.
#[derive(Debug, Default, Deserialize)]
pub struct CompileConfig {
    /// Promote compliance warnings to errors.
    #[serde(default)]
    pub deny_warnings: bool,
}

impl Config {
    /// Default config filename, looked up in the working directory.
    pub const DEFAULT_FILE: &'static str = "strandc.toml";

    /// Load configuration from an explicit path or the default location.
    ///
    /// An explicit path must exist and parse; the default file applies only
    /// when present.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => path,
            None => {
                let default = Path::new(Self::DEFAULT_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config: Config = toml::from_str(&text)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }
}
