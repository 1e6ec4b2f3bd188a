use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::{DatastoreConfig, RuntimeConfig};

use super::validation::{validate_http_url, validate_table_name};

pub const CONFIG_ENV: &str = "SALES_AUDIT_CONFIG";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub supabase_url: String,
    pub supabase_key: Option<String>,
    pub sales_table: String,
    pub alert_webhook_url: Option<String>,
    pub ledger_path: String,
    pub refresh_interval_seconds: u64,
    pub request_timeout_seconds: u64,
    pub max_body_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3234".to_string(),
            api_token: None,
            supabase_url: String::new(),
            supabase_key: None,
            sales_table: "sales".to_string(),
            alert_webhook_url: None,
            ledger_path: "./sent_alert_webhooks.json".to_string(),
            refresh_interval_seconds: 60,
            request_timeout_seconds: 15,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_ENV).unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            toml::from_str(&content)?
        } else {
            warn!("{} not found, using defaults", path);
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(file_path.parent());
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        self.api_token = blank_to_none(self.api_token.take());
        self.supabase_key = blank_to_none(self.supabase_key.take());
        self.alert_webhook_url = blank_to_none(self.alert_webhook_url.take());
        self.supabase_url = self.supabase_url.trim().to_string();
        self.sales_table = self.sales_table.trim().to_string();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.ledger_path = resolve_path(base, &self.ledger_path);
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        validate_http_url("supabase_url", &self.supabase_url)?;
        validate_table_name(&self.sales_table)?;
        if let Some(url) = &self.alert_webhook_url {
            validate_http_url("alert_webhook_url", url)?;
        }
        if self.ledger_path.trim().is_empty() {
            return Err(anyhow!("ledger_path must not be empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            alert_webhook_url: self.alert_webhook_url.clone(),
            ledger_path: self.ledger_path.clone(),
            refresh_interval_seconds: self.refresh_interval_seconds,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    pub fn to_datastore_config(&self) -> DatastoreConfig {
        DatastoreConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_key: self.supabase_key.clone(),
            sales_table: self.sales_table.clone(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("SALES_AUDIT_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("SALES_AUDIT_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("SALES_AUDIT_SUPABASE_URL") {
            self.supabase_url = value;
        }
        if let Ok(value) = env::var("SALES_AUDIT_SUPABASE_KEY") {
            self.supabase_key = Some(value);
        }
        if let Ok(value) = env::var("SALES_AUDIT_SALES_TABLE") {
            self.sales_table = value;
        }
        if let Ok(value) = env::var("SALES_AUDIT_ALERT_WEBHOOK_URL") {
            self.alert_webhook_url = Some(value);
        }
        if let Ok(value) = env::var("SALES_AUDIT_LEDGER_PATH") {
            self.ledger_path = value;
        }
        if let Ok(value) = env::var("SALES_AUDIT_REFRESH_INTERVAL_SECONDS") {
            self.refresh_interval_seconds = value.parse().unwrap_or(self.refresh_interval_seconds);
        }
        if let Ok(value) = env::var("SALES_AUDIT_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("SALES_AUDIT_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
