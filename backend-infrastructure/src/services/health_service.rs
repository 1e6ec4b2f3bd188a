use std::sync::Arc;

use async_trait::async_trait;
use backend_domain::ports::{AlertNotifier, HealthCheckService, SaleRepository};

pub struct DefaultHealthService {
    sale_repo: Arc<dyn SaleRepository>,
    notifier: Arc<dyn AlertNotifier>,
}

impl DefaultHealthService {
    pub fn new(sale_repo: Arc<dyn SaleRepository>, notifier: Arc<dyn AlertNotifier>) -> Self {
        Self {
            sale_repo,
            notifier,
        }
    }
}

#[async_trait]
impl HealthCheckService for DefaultHealthService {
    async fn check_datastore(&self) -> anyhow::Result<bool> {
        self.sale_repo.ping().await.map(|_| true)
    }

    async fn check_alert_target(&self) -> anyhow::Result<bool> {
        self.notifier.check_alert_target().await.map(|_| true)
    }
}
