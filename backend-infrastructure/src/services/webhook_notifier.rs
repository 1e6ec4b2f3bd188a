use anyhow::{bail, Result};
use async_trait::async_trait;
use reqwest::Client;

use backend_domain::ports::AlertNotifier;
use backend_domain::AlertWebhookPayload;

use crate::utils::http_client;

/// Posts alert payloads as JSON to the configured webhook.
pub struct HttpAlertNotifier {
    client: Client,
    url: Option<String>,
}

impl HttpAlertNotifier {
    pub fn new(url: Option<String>, connect_timeout_seconds: u64) -> Result<Self> {
        Ok(Self {
            client: http_client(connect_timeout_seconds)?,
            url,
        })
    }

    fn resolve_url(&self) -> Result<&str> {
        match self.url.as_deref() {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => bail!("alert webhook url not configured"),
        }
    }
}

#[async_trait]
impl AlertNotifier for HttpAlertNotifier {
    async fn send_alert(&self, payload: &AlertWebhookPayload) -> Result<()> {
        let url = self.resolve_url()?;
        let response = self.client.post(url).json(payload).send().await?;
        if !response.status().is_success() {
            bail!("alert webhook responded {}", response.status());
        }
        Ok(())
    }

    /// Any answer below 500 counts as reachable: webhook receivers commonly
    /// reject a bare GET while still being up.
    async fn check_alert_target(&self) -> Result<()> {
        let url = self.resolve_url()?;
        let response = self.client.get(url).send().await?;
        if response.status().is_server_error() {
            bail!("alert webhook responded {}", response.status());
        }
        Ok(())
    }
}
