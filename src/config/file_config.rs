use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub cache_dir: Option<String>,
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub ttl_hours: Option<u64>,
    pub cache_size_cap: Option<usize>,
    pub enabled: Option<bool>,
    pub request_timeout_secs: Option<u64>,
    pub call_budget_ms: Option<u64>,
    pub max_concurrent_selections: Option<usize>,
    pub min_catalog_fonts: Option<usize>,

    // Feature configs
    pub refiner: Option<RefinerFileConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct RefinerFileConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
