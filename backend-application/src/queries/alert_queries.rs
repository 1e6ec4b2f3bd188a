use crate::AppState;
use backend_domain::AlertDeliveryRecord;

pub async fn list_alert_deliveries(state: &AppState, limit: Option<usize>) -> Vec<AlertDeliveryRecord> {
    let limit = limit.unwrap_or(50).clamp(1, 200);
    state.dispatcher.list_deliveries(limit).await
}

pub async fn last_alert_delivery(state: &AppState) -> Option<AlertDeliveryRecord> {
    state.dispatcher.last_delivery().await
}
