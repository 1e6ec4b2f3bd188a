use axum::routing::{get, post};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{alert_handlers, ops_handlers, sales_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v2/sales", get(sales_handlers::list_sales))
        .route("/v2/sales/options", get(sales_handlers::list_filter_options))
        .route("/v2/sales/refresh", post(sales_handlers::refresh_sales))
        .route("/v2/sales/:id", get(sales_handlers::get_sale))
        .route(
            "/v2/alerts/deliveries",
            get(alert_handlers::list_alert_deliveries),
        )
        .route(
            "/v2/alerts/deliveries/last",
            get(alert_handlers::get_last_alert_delivery),
        )
        .route(
            "/v2/ops/alert-target/check",
            get(ops_handlers::alert_target_check),
        )
        .route("/v2/ops/health/live", get(ops_handlers::health_live))
        .route("/v2/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/v2/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
