use tracing::error;

use crate::commands::refresh_commands;
use crate::{AppError, AppState};
use backend_domain::{
    compute_metrics, filter_options, filter_sales, local_today, sale_detail, total_items,
    FilterOptions, Sale, SaleDetail, SalesFilterQuery, SalesView,
};

/// Full, unfiltered retrieval. Filtering always happens here, never in the
/// datastore.
pub async fn fetch_sales(state: &AppState) -> Result<Vec<Sale>, AppError> {
    let sales = state.sale_repo.fetch_sales().await.map_err(|err| {
        state.metrics.record_fetch_error();
        error!("failed to fetch sales: {}", err);
        AppError::Datastore(err)
    })?;
    state.metrics.record_fetch(sales.len());
    Ok(sales)
}

/// Dashboard load: every fresh list also starts a background
/// reconciliation pass over the unfiltered sales.
pub async fn list_sales(state: &AppState, query: SalesFilterQuery) -> Result<SalesView, AppError> {
    let sales = fetch_sales(state).await?;
    let filter = query.resolve(local_today());
    let filtered = filter_sales(&sales, &filter);
    let metrics = compute_metrics(&filtered);
    let total_itens = total_items(&filtered);

    // Detached: the response does not wait on webhook delivery.
    let _ = refresh_commands::spawn_reconciliation(state, sales);

    Ok(SalesView {
        sales: filtered,
        metrics,
        total_itens,
    })
}

pub async fn list_filter_options(state: &AppState) -> Result<FilterOptions, AppError> {
    let sales = fetch_sales(state).await?;
    Ok(filter_options(&sales))
}

pub async fn get_sale_detail(state: &AppState, sale_id: &str) -> Result<SaleDetail, AppError> {
    let sales = fetch_sales(state).await?;
    sales
        .iter()
        .find(|sale| sale.id == sale_id)
        .map(sale_detail)
        .ok_or_else(|| AppError::NotFound(format!("sale '{}'", sale_id)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{
        alerted_sale, clean_sale, test_state, MemoryLedger, RecordingNotifier,
        StaticSaleRepository,
    };
    use backend_domain::AlertStatusFilter;
    use rust_decimal_macros::dec;

    fn interval_query() -> SalesFilterQuery {
        SalesFilterQuery {
            period: Some("intervalo".to_string()),
            ..SalesFilterQuery::default()
        }
    }

    #[tokio::test]
    async fn list_sales_filters_and_summarizes() {
        let mut first = alerted_sale("s1", 10);
        first.vlr_liquido = Some(dec!(100));
        let mut second = clean_sale("s2", 10);
        second.vlr_liquido = Some(dec!(20));
        let third = clean_sale("s3", 11);
        let state = test_state(
            StaticSaleRepository::with_sales(vec![first, second, third]),
            Arc::new(MemoryLedger::default()),
            Arc::new(RecordingNotifier::default()),
        );

        let view = list_sales(&state, interval_query()).await.expect("view");
        assert_eq!(view.sales.len(), 3);
        assert_eq!(view.metrics.total_vendas, 2);
        assert_eq!(view.metrics.vendas_com_alerta, 1);
        assert_eq!(view.metrics.total_faturamento, dec!(120));
        assert_eq!(view.total_itens, 3);

        let mut only_alerts = interval_query();
        only_alerts.alerta_status = Some(AlertStatusFilter::ALERTA.as_str().to_string());
        let view = list_sales(&state, only_alerts).await.expect("view");
        assert_eq!(view.sales.len(), 1);
        assert_eq!(view.sales[0].id, "s1");
    }

    #[tokio::test]
    async fn datastore_failure_is_surfaced() {
        let state = test_state(
            StaticSaleRepository::unavailable(),
            Arc::new(MemoryLedger::default()),
            Arc::new(RecordingNotifier::default()),
        );
        let err = list_sales(&state, interval_query()).await.expect_err("fetch fails");
        assert!(matches!(err, AppError::Datastore(_)));
        assert!(state
            .metrics
            .render_prometheus()
            .contains("sales_audit_fetch_errors_total 1"));
    }

    #[tokio::test]
    async fn sale_detail_is_found_by_id() {
        let state = test_state(
            StaticSaleRepository::with_sales(vec![alerted_sale("s1", 10)]),
            Arc::new(MemoryLedger::default()),
            Arc::new(RecordingNotifier::default()),
        );
        let detail = get_sale_detail(&state, "s1").await.expect("detail");
        assert!(detail.alerted);
        assert_eq!(detail.alert_reasons.len(), 1);

        let missing = get_sale_detail(&state, "nope").await.expect_err("missing");
        assert!(matches!(missing, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn options_come_from_the_full_list() {
        let mut sale = alerted_sale("s1", 10);
        sale.nome_filial = Some("LOJA 01".to_string());
        let state = test_state(
            StaticSaleRepository::with_sales(vec![sale]),
            Arc::new(MemoryLedger::default()),
            Arc::new(RecordingNotifier::default()),
        );
        let options = list_filter_options(&state).await.expect("options");
        assert_eq!(options.filiais, vec!["LOJA 01".to_string()]);
        assert_eq!(options.tabelas, vec!["VAREJO".to_string()]);
    }
}
