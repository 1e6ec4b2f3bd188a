use async_trait::async_trait;

use crate::entities::AlertWebhookPayload;

#[async_trait]
pub trait AlertNotifier: Send + Sync {
    /// Fails on transport errors and on any non-success response.
    async fn send_alert(&self, payload: &AlertWebhookPayload) -> anyhow::Result<()>;
    async fn check_alert_target(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait HealthCheckService: Send + Sync {
    async fn check_datastore(&self) -> anyhow::Result<bool>;
    async fn check_alert_target(&self) -> anyhow::Result<bool>;
}
