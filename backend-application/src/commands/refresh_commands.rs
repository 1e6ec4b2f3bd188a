use anyhow::anyhow;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::info;

use crate::queries::sales_queries;
use crate::{AppError, AppState, DispatchSummary};
use backend_domain::{iso_timestamp, Sale};

#[derive(Debug, Clone, Serialize)]
pub struct RefreshReport {
    pub sales_fetched: usize,
    pub dispatch: DispatchSummary,
    pub refreshed_at: String,
}

/// Manual refresh: fetch and reconcile, waiting for every dispatch of the pass.
/// The pass runs in its own task, so dropping this future (request timeout,
/// client disconnect) never cuts a delivery short before it is ledgered.
pub async fn refresh_sales(state: &AppState) -> Result<RefreshReport, AppError> {
    let sales = sales_queries::fetch_sales(state).await?;
    let sales_fetched = sales.len();
    let dispatch = spawn_reconciliation(state, sales)
        .await
        .map_err(|err| AppError::Internal(anyhow!("reconciliation task failed: {}", err)))?;
    info!(
        "refresh complete: {} sales, {} alert(s) delivered",
        sales_fetched, dispatch.delivered
    );
    Ok(RefreshReport {
        sales_fetched,
        dispatch,
        refreshed_at: iso_timestamp(),
    })
}

pub async fn reconcile(state: &AppState, sales: &[Sale]) -> DispatchSummary {
    let summary = state.dispatcher.process_alerts_for_sales(sales).await;
    state.metrics.record_reconciliation(&summary);
    summary
}

pub fn spawn_reconciliation(state: &AppState, sales: Vec<Sale>) -> JoinHandle<DispatchSummary> {
    let state = state.clone();
    tokio::spawn(async move { reconcile(&state, &sales).await })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::test_support::{
        alerted_sale, clean_sale, test_state, GatedNotifier, MemoryLedger, RecordingNotifier,
        StaticSaleRepository,
    };

    #[tokio::test]
    async fn refresh_reconciles_the_fetched_list() {
        let ledger = Arc::new(MemoryLedger::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let state = test_state(
            StaticSaleRepository::with_sales(vec![alerted_sale("s1", 10), clean_sale("s2", 11)]),
            ledger.clone(),
            notifier.clone(),
        );

        let report = refresh_sales(&state).await.expect("refresh");
        assert_eq!(report.sales_fetched, 2);
        assert_eq!(report.dispatch.delivered, 1);
        assert!(ledger.contains("s1"));

        let again = refresh_sales(&state).await.expect("refresh");
        assert_eq!(again.dispatch.delivered, 0);
        assert_eq!(again.dispatch.already_sent, 1);
        assert_eq!(notifier.calls(), 1);
        assert!(state
            .metrics
            .render_prometheus()
            .contains("sales_audit_alerts_delivered_total 1"));
    }

    #[tokio::test]
    async fn refresh_fails_when_datastore_is_down() {
        let state = test_state(
            StaticSaleRepository::unavailable(),
            Arc::new(MemoryLedger::default()),
            Arc::new(RecordingNotifier::default()),
        );
        assert!(matches!(refresh_sales(&state).await, Err(AppError::Datastore(_))));
    }

    #[tokio::test]
    async fn dropped_refresh_still_ledgers_the_delivery() {
        let ledger = Arc::new(MemoryLedger::default());
        let notifier = Arc::new(GatedNotifier::default());
        let state = test_state(
            StaticSaleRepository::with_sales(vec![alerted_sale("s1", 10)]),
            ledger.clone(),
            notifier.clone(),
        );

        let cut_short =
            tokio::time::timeout(Duration::from_millis(50), refresh_sales(&state)).await;
        assert!(cut_short.is_err());
        assert_eq!(notifier.calls(), 1);

        notifier.release.notify_one();
        for _ in 0..100 {
            if ledger.contains("s1") {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(ledger.contains("s1"));

        let again = refresh_sales(&state).await.expect("refresh");
        assert_eq!(again.dispatch.already_sent, 1);
        assert_eq!(notifier.calls(), 1);
    }
}
