mod file_config;

pub use file_config::{FileConfig, RefinerFileConfig};

use crate::remote::DEFAULT_ENDPOINT;
use anyhow::{bail, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TTL_HOURS: u64 = 24;
pub const DEFAULT_CACHE_SIZE_CAP: usize = 1500;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CALL_BUDGET_MS: u64 = 12_000;
pub const DEFAULT_MAX_CONCURRENT_SELECTIONS: usize = 8;
pub const DEFAULT_MIN_CATALOG_FONTS: usize = 10;
pub const DEFAULT_REFINER_TIMEOUT_SECS: u64 = 20;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub cache_dir: Option<PathBuf>,
    pub api_key: Option<String>,
    pub ttl_hours: u64,
    pub request_timeout_secs: u64,
    pub call_budget_ms: u64,
    pub offline: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            api_key: None,
            ttl_hours: DEFAULT_TTL_HOURS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            call_budget_ms: DEFAULT_CALL_BUDGET_MS,
            offline: false,
        }
    }
}

/// Everything the selection engine needs to run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    // Core settings
    pub cache_dir: PathBuf,
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub ttl_hours: u64,
    pub cache_size_cap: usize,
    /// False disables the live tier entirely (offline mode).
    pub enabled: bool,
    pub request_timeout_secs: u64,
    pub call_budget_ms: u64,
    pub max_concurrent_selections: usize,
    pub min_catalog_fonts: usize,

    // Feature configs (with defaults)
    pub refiner: Option<RefinerSettings>,
}

#[derive(Debug, Clone)]
pub struct RefinerSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl EngineConfig {
    /// Defaults for everything except the cache directory, which has no
    /// sensible universal default.
    pub fn for_cache_dir(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            api_key: None,
            api_base_url: DEFAULT_ENDPOINT.to_string(),
            ttl_hours: DEFAULT_TTL_HOURS,
            cache_size_cap: DEFAULT_CACHE_SIZE_CAP,
            enabled: true,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            call_budget_ms: DEFAULT_CALL_BUDGET_MS,
            max_concurrent_selections: DEFAULT_MAX_CONCURRENT_SELECTIONS,
            min_catalog_fonts: DEFAULT_MIN_CATALOG_FONTS,
            refiner: None,
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours * 3600)
    }

    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        // TOML overrides CLI for each field
        let cache_dir = file
            .cache_dir
            .map(PathBuf::from)
            .or_else(|| cli.cache_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("cache_dir must be specified via --cache-dir or in config file")
            })?;

        // The store creates the directory on open, but an existing
        // non-directory path is a configuration mistake.
        if cache_dir.exists() && !cache_dir.is_dir() {
            bail!("cache_dir is not a directory: {:?}", cache_dir);
        }

        let api_key = file.api_key.or_else(|| cli.api_key.clone());
        let api_base_url = file
            .api_base_url
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let ttl_hours = file.ttl_hours.unwrap_or(cli.ttl_hours);
        if ttl_hours == 0 {
            bail!("ttl_hours must be at least 1");
        }

        let cache_size_cap = file.cache_size_cap.unwrap_or(DEFAULT_CACHE_SIZE_CAP);
        if cache_size_cap == 0 {
            bail!("cache_size_cap must be at least 1");
        }

        let enabled = file.enabled.unwrap_or(!cli.offline);
        let request_timeout_secs = file
            .request_timeout_secs
            .unwrap_or(cli.request_timeout_secs);
        let call_budget_ms = file.call_budget_ms.unwrap_or(cli.call_budget_ms);
        let max_concurrent_selections = file
            .max_concurrent_selections
            .unwrap_or(DEFAULT_MAX_CONCURRENT_SELECTIONS);
        let min_catalog_fonts = file
            .min_catalog_fonts
            .unwrap_or(DEFAULT_MIN_CATALOG_FONTS);

        // Refiner settings - the [refiner] section must be complete to count
        let refiner = match file.refiner {
            Some(refiner_file) => {
                let base_url = match refiner_file.base_url {
                    Some(url) => url,
                    None => bail!("refiner.base_url is required when [refiner] is configured"),
                };
                let model = match refiner_file.model {
                    Some(model) => model,
                    None => bail!("refiner.model is required when [refiner] is configured"),
                };
                Some(RefinerSettings {
                    base_url,
                    model,
                    api_key: refiner_file.api_key,
                    timeout_secs: refiner_file
                        .timeout_secs
                        .unwrap_or(DEFAULT_REFINER_TIMEOUT_SECS),
                })
            }
            None => None,
        };

        Ok(Self {
            cache_dir,
            api_key,
            api_base_url,
            ttl_hours,
            cache_size_cap,
            enabled,
            request_timeout_secs,
            call_budget_ms,
            max_concurrent_selections,
            min_catalog_fonts,
            refiner,
        })
    }
}
