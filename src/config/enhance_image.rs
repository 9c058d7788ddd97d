use super::EnhancerConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `enhance_image` tool.
#[derive(Debug, Deserialize)]
pub struct EnhanceImageConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    pub enhancer: EnhancerConfig,
    pub output: EnhanceImageOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceImageOutputConfig {
    /// Channel 0 of the enhanced map, clamped to [0, 1].
    #[serde(rename = "enhanced_image")]
    pub enhanced_image: PathBuf,
    /// Absolute boundary response of channel 0, normalised by its maximum.
    #[serde(rename = "boundary_image")]
    pub boundary_image: Option<PathBuf>,
    #[serde(rename = "report_json")]
    pub report_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<EnhanceImageConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
