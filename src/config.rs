use serde::Deserialize;
use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;

pub const DEFAULT_SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/123o-txQsbM9gf1aOG8sjlTb7M5WAdkptky4ulO4ixHo/export?format=xlsx";

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database_path: String,
    pub max_file_size: usize,
    pub default_sheet_url: String,
    pub fetch_timeout_secs: u64,
    /// Appended to the built-in fixed expense keywords.
    pub fixed_expense_keywords: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: default_bind_addr(),
            database_path: "finance.db".to_string(),
            max_file_size: default_max_file_size(),
            default_sheet_url: DEFAULT_SHEET_URL.to_string(),
            fetch_timeout_secs: 30,
            fixed_expense_keywords: Vec::new(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        let defaults = Config::default();

        let bind_addr = match std::env::var("BIND_ADDR") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid BIND_ADDR: {}", raw))?,
            Err(_) => defaults.bind_addr,
        };

        let max_file_size = match std::env::var("MAX_FILE_SIZE") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid MAX_FILE_SIZE: {}", raw))?,
            Err(_) => defaults.max_file_size,
        };

        let fetch_timeout_secs = match std::env::var("FETCH_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid FETCH_TIMEOUT_SECS: {}", raw))?,
            Err(_) => defaults.fetch_timeout_secs,
        };

        let fixed_expense_keywords = std::env::var("FIXED_EXPENSE_KEYWORDS")
            .map(|raw| parse_keyword_list(&raw))
            .unwrap_or_default();

        Ok(Config {
            bind_addr,
            database_path: std::env::var("DATABASE_PATH").unwrap_or(defaults.database_path),
            max_file_size,
            default_sheet_url: std::env::var("DEFAULT_SHEET_URL")
                .unwrap_or(defaults.default_sheet_url),
            fetch_timeout_secs,
            fixed_expense_keywords,
        })
    }
}

pub fn load_config() -> Result<Config> {
    Config::new()
}

fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|k| k.trim().to_uppercase())
        .filter(|k| !k.is_empty())
        .collect()
}
