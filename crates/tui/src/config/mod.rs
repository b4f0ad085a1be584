use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Directory holding the persisted session.
    pub state_dir: PathBuf,
    pub log_file: PathBuf,
    pub log_level: String,
    pub transactions_limit: u32,
    pub dashboard_transactions_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: client::DEFAULT_BASE_URL.to_string(),
            state_dir: PathBuf::from("config"),
            log_file: PathBuf::from("fintrack.log"),
            log_level: "info".to_string(),
            transactions_limit: client::controller::transactions::DEFAULT_LIMIT,
            dashboard_transactions_limit:
                client::controller::dashboard::DEFAULT_TRANSACTIONS_LIMIT,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "fintrack_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:8000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the directory where the session is stored.
    #[arg(long)]
    state_dir: Option<PathBuf>,
    /// Override the log file path.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FINTRACK_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(state_dir) = args.state_dir {
        settings.state_dir = state_dir;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.transactions_limit, 100);
        assert_eq!(config.dashboard_transactions_limit, 20);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_sources_keep_defaults() {
        let settings: AppConfig = config::Config::builder()
            .set_override("base_url", "http://example.com")
            .unwrap()
            .set_override("transactions_limit", 50)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.base_url, "http://example.com");
        assert_eq!(settings.transactions_limit, 50);
        assert_eq!(settings.state_dir, PathBuf::from("config"));
    }
}
