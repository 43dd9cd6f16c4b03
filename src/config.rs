use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::cli::Cli;
use crate::paths::database_file_path;

pub const DEFAULT_CATALOG_URL: &str = "https://wolongzyw.com/api.php/provide/vod";
pub const ROW_LIMIT: usize = 12;

const MAX_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub catalog_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub row_limit: usize,
    pub announcement: Option<String>,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let database_path = match &cli.db {
            Some(path) => path.clone(),
            None => database_file_path()?,
        };
        let timeout_secs = cli.timeout_secs.max(1);
        Ok(Self {
            database_path,
            catalog_url: cli
                .catalog_url
                .clone()
                .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
            connect_timeout: Duration::from_secs(timeout_secs.min(MAX_CONNECT_TIMEOUT_SECS)),
            read_timeout: Duration::from_secs(timeout_secs),
            row_limit: ROW_LIMIT,
            announcement: cli
                .announcement
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn explicit_flags_override_defaults() {
        let cli = Cli::parse_from([
            "vodhome",
            "--db",
            "/tmp/vodhome-test.db",
            "--catalog-url",
            "http://127.0.0.1:9/vod",
            "--timeout-secs",
            "30",
            "favorites",
        ]);
        let config = Config::from_cli(&cli).expect("config should resolve");
        assert_eq!(config.database_path, PathBuf::from("/tmp/vodhome-test.db"));
        assert_eq!(config.catalog_url, "http://127.0.0.1:9/vod");
        assert_eq!(config.read_timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.row_limit, ROW_LIMIT);
    }

    #[test]
    fn blank_announcement_is_treated_as_absent() {
        let cli = Cli::parse_from(["vodhome", "--db", "/tmp/x.db", "--announcement", "   "]);
        let config = Config::from_cli(&cli).expect("config should resolve");
        assert_eq!(config.announcement, None);
        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
    }
}
