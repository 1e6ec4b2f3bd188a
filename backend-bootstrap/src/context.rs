use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use backend_application::{AlertDispatcher, AppState, Metrics};
use backend_infrastructure::{
    AppConfig, DefaultHealthService, FileSentAlertLedger, HttpAlertNotifier,
    SupabaseSaleRepository,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        Self::from_config(&config)
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();
        let datastore_config = config.to_datastore_config();

        let sale_repo = Arc::new(SupabaseSaleRepository::new(
            datastore_config,
            runtime_config.request_timeout_seconds,
        )?);
        let notifier = Arc::new(HttpAlertNotifier::new(
            runtime_config.alert_webhook_url.clone(),
            runtime_config.request_timeout_seconds,
        )?);
        let ledger = Arc::new(FileSentAlertLedger::new(&runtime_config.ledger_path));
        info!("alert ledger at {}", ledger.path().display());

        let state = AppState {
            config: runtime_config,
            sale_repo: sale_repo.clone(),
            health: Arc::new(DefaultHealthService::new(sale_repo, notifier.clone())),
            dispatcher: Arc::new(AlertDispatcher::new(ledger, notifier)),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wires_state_from_config() {
        let config = AppConfig {
            supabase_url: "http://127.0.0.1:1".to_string(),
            alert_webhook_url: Some("http://127.0.0.1:1/alert".to_string()),
            ledger_path: "/tmp/sales-audit-ledger.json".to_string(),
            refresh_interval_seconds: 0,
            ..AppConfig::default()
        };
        let context = AppContext::from_config(&config).expect("context");
        assert_eq!(context.state.config.ledger_path, "/tmp/sales-audit-ledger.json");
        assert!(context.state.dispatcher.last_delivery().await.is_none());
        assert!(context.state.health.check_datastore().await.is_err());
    }
}
