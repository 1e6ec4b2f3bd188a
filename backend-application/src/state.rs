use std::sync::Arc;

use backend_domain::ports::{HealthCheckService, SaleRepository};
use backend_domain::RuntimeConfig;

use crate::{AlertDispatcher, Metrics};

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub sale_repo: Arc<dyn SaleRepository>,
    pub health: Arc<dyn HealthCheckService>,
    pub dispatcher: Arc<AlertDispatcher>,
    pub metrics: Arc<Metrics>,
}
