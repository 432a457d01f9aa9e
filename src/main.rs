use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fontmatch::config::{
    CliConfig, EngineConfig, FileConfig, DEFAULT_CALL_BUDGET_MS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_TTL_HOURS,
};
use fontmatch::selection::{EnhancementLevel, SelectionCriteria, SelectionEngine};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(name = "fontmatch", version = VERSION, about = "Select brand typography from personality traits")]
struct CliArgs {
    /// Personality trait to match; repeat for multiple traits.
    #[clap(short = 't', long = "trait", value_name = "TRAIT")]
    pub traits: Vec<String>,

    /// Description of the target audience, passed to the refiner.
    #[clap(long)]
    pub audience: Option<String>,

    /// How much of the typography system to populate.
    #[clap(long, value_enum, default_value_t = EnhancementLevel::Moderate)]
    pub level: EnhancementLevel,

    /// Path to a TOML config file. TOML values override CLI flags.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory for the persisted catalog cache.
    #[clap(long, value_parser = parse_path)]
    pub cache_dir: Option<PathBuf>,

    /// Webfonts API key. Falls back to the FONTMATCH_API_KEY env var.
    #[clap(long)]
    pub api_key: Option<String>,

    /// Catalog cache TTL in hours.
    #[clap(long, default_value_t = DEFAULT_TTL_HOURS)]
    pub ttl_hours: u64,

    /// Timeout in seconds for each remote catalog request.
    #[clap(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Overall time budget in milliseconds for one selection call.
    #[clap(long, default_value_t = DEFAULT_CALL_BUDGET_MS)]
    pub budget_ms: u64,

    /// Never touch the network; serve from cache or builtin defaults.
    #[clap(long)]
    pub offline: bool,

    /// Force a catalog refresh and exit.
    #[clap(long)]
    pub refresh: bool,

    /// Print cache diagnostics as JSON and exit.
    #[clap(long)]
    pub cache_status: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        cache_dir: cli_args.cache_dir.clone(),
        api_key: cli_args
            .api_key
            .clone()
            .or_else(|| std::env::var("FONTMATCH_API_KEY").ok()),
        ttl_hours: cli_args.ttl_hours,
        request_timeout_secs: cli_args.timeout_secs,
        call_budget_ms: cli_args.budget_ms,
        offline: cli_args.offline,
    };
    let config = EngineConfig::resolve(&cli_config, file_config)?;

    let engine =
        SelectionEngine::new(config).context("Failed to initialize the selection engine")?;

    if cli_args.cache_status {
        println!("{}", serde_json::to_string_pretty(&engine.cache_status())?);
        return Ok(());
    }

    if cli_args.refresh {
        let snapshot = engine.refresh_catalog().await;
        info!(
            source = %snapshot.source,
            fonts = snapshot.len(),
            "Catalog refresh finished"
        );
        return Ok(());
    }

    let criteria = SelectionCriteria {
        personality_traits: cli_args.traits,
        target_audience: cli_args.audience,
        existing_colors: vec![],
        enhancement_level: cli_args.level,
    };
    let budget = Duration::from_millis(cli_args.budget_ms);
    let response = engine.select(criteria, None, Some(budget)).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
