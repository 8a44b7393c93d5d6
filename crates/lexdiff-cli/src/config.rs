use std::path::Path;

use anyhow::Context;
use lexdiff_extract::ExtractConfig;
use lexdiff_replay::ReplayConfig;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexdiffConfig {
    pub extract: ExtractConfig,
    pub replay: ReplayConfig,
}

impl LexdiffConfig {
    /// Read the config file at `path`, or the defaults when none is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
