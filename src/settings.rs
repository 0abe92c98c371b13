use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, Result};

pub const DB_FILE: &str = "fintrack.db";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_advice_model")]
    pub advice_model: String,
    #[serde(default = "default_advice_endpoint")]
    pub advice_endpoint: String,
    #[serde(default = "default_advice_max_length")]
    pub advice_max_length: u32,
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_advice_model() -> String {
    "gpt2".to_string()
}

fn default_advice_endpoint() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

fn default_advice_max_length() -> u32 {
    100
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            currency_symbol: default_currency_symbol(),
            advice_model: default_advice_model(),
            advice_endpoint: default_advice_endpoint(),
            advice_max_length: default_advice_max_length(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("fintrack")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("fintrack")
}

fn parse_settings(content: &str) -> Settings {
    serde_json::from_str(content).unwrap_or_default()
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    let mut settings = if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        parse_settings(&content)
    } else {
        Settings::default()
    };
    if let Ok(dir) = std::env::var("FINTRACK_DATA_DIR") {
        if !dir.trim().is_empty() {
            settings.data_dir = dir;
        }
    }
    settings
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| FinanceError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn get_data_dir() -> PathBuf {
    PathBuf::from(&load_settings().data_dir)
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
