use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// ストレージキーのプレフィックス（`{prefix}_favorites` など）
    pub key_prefix: String,
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// サーバーが空リストを返したときにキャッシュを保持するか
    pub keep_cache_on_empty_response: bool,
    pub refresh_once_per_session: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                key_prefix: "metravel".to_string(),
                data_dir: "./data".to_string(),
            },
            sync: SyncConfig {
                keep_cache_on_empty_response: true,
                refresh_once_per_session: true,
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("METRAVEL_STORAGE_KEY_PREFIX") {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                cfg.storage.key_prefix = trimmed.to_string();
            }
        }
        if let Ok(v) = std::env::var("METRAVEL_DATA_DIR") {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                cfg.storage.data_dir = trimmed.to_string();
            }
        }
        if let Ok(v) = std::env::var("METRAVEL_KEEP_CACHE_ON_EMPTY") {
            cfg.sync.keep_cache_on_empty_response =
                parse_bool(&v, cfg.sync.keep_cache_on_empty_response);
        }
        if let Ok(v) = std::env::var("METRAVEL_REFRESH_ONCE_PER_SESSION") {
            cfg.sync.refresh_once_per_session =
                parse_bool(&v, cfg.sync.refresh_once_per_session);
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.storage.key_prefix.is_empty() {
            return Err("Storage key_prefix must not be empty".to_string());
        }
        if self
            .storage
            .key_prefix
            .chars()
            .any(|c| !c.is_ascii_alphanumeric() && c != '_' && c != '-')
        {
            return Err("Storage key_prefix must be alphanumeric".to_string());
        }
        Ok(())
    }
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}
