use std::sync::atomic::{AtomicU64, Ordering};

use crate::DispatchSummary;

#[derive(Debug, Default)]
pub struct Metrics {
    sales_fetches: AtomicU64,
    sales_fetch_errors: AtomicU64,
    sales_last_fetched: AtomicU64,
    reconciliations: AtomicU64,
    alerts_delivered: AtomicU64,
    alerts_failed: AtomicU64,
}

impl Metrics {
    pub fn record_fetch(&self, sale_count: usize) {
        self.sales_fetches.fetch_add(1, Ordering::Relaxed);
        self.sales_last_fetched
            .store(sale_count as u64, Ordering::Relaxed);
    }

    pub fn record_fetch_error(&self) {
        self.sales_fetch_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reconciliation(&self, summary: &DispatchSummary) {
        self.reconciliations.fetch_add(1, Ordering::Relaxed);
        self.alerts_delivered
            .fetch_add(summary.delivered as u64, Ordering::Relaxed);
        self.alerts_failed
            .fetch_add(summary.failed as u64, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let fetches = self.sales_fetches.load(Ordering::Relaxed);
        let fetch_errors = self.sales_fetch_errors.load(Ordering::Relaxed);
        let last_fetched = self.sales_last_fetched.load(Ordering::Relaxed);
        let reconciliations = self.reconciliations.load(Ordering::Relaxed);
        let delivered = self.alerts_delivered.load(Ordering::Relaxed);
        let failed = self.alerts_failed.load(Ordering::Relaxed);

        format!(
            "# TYPE sales_audit_fetches_total counter\n\
sales_audit_fetches_total {}\n\
# TYPE sales_audit_fetch_errors_total counter\n\
sales_audit_fetch_errors_total {}\n\
# TYPE sales_audit_sales_last_fetched gauge\n\
sales_audit_sales_last_fetched {}\n\
# TYPE sales_audit_reconciliations_total counter\n\
sales_audit_reconciliations_total {}\n\
# TYPE sales_audit_alerts_delivered_total counter\n\
sales_audit_alerts_delivered_total {}\n\
# TYPE sales_audit_alerts_failed_total counter\n\
sales_audit_alerts_failed_total {}\n",
            fetches, fetch_errors, last_fetched, reconciliations, delivered, failed
        )
    }
}
