//! At-most-once alert webhook dispatch.
//!
//! A sale is reported once its audit classification finds at least one
//! alerted item. The durable ledger suppresses repeats across restarts and
//! the in-flight set suppresses overlapping dispatches of the same sale
//! inside this process. A failed delivery is logged and left unrecorded,
//! so the next reconciliation pass retries it.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use futures_util::future::join_all;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use backend_domain::ports::{AlertNotifier, SentAlertLedger};
use backend_domain::{
    alert_reasons, alerted_items, current_millis, iso_timestamp, AlertDeliveryRecord,
    AlertWebhookPayload, Sale, SaleSummary,
};

const DELIVERY_LOG_CAPACITY: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    InFlight,
    AlreadySent,
    NotAlerted,
    Delivered,
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    pub delivered: usize,
    pub failed: usize,
    pub in_flight: usize,
    pub already_sent: usize,
    pub not_alerted: usize,
}

impl DispatchSummary {
    fn record(&mut self, outcome: DispatchOutcome) {
        match outcome {
            DispatchOutcome::InFlight => self.in_flight += 1,
            DispatchOutcome::AlreadySent => self.already_sent += 1,
            DispatchOutcome::NotAlerted => self.not_alerted += 1,
            DispatchOutcome::Delivered => self.delivered += 1,
            DispatchOutcome::Failed => self.failed += 1,
        }
    }
}

pub struct AlertDispatcher {
    ledger: Arc<dyn SentAlertLedger>,
    notifier: Arc<dyn AlertNotifier>,
    in_flight: Mutex<HashSet<String>>,
    deliveries: RwLock<VecDeque<AlertDeliveryRecord>>,
}

impl AlertDispatcher {
    pub fn new(ledger: Arc<dyn SentAlertLedger>, notifier: Arc<dyn AlertNotifier>) -> Self {
        Self {
            ledger,
            notifier,
            in_flight: Mutex::new(HashSet::new()),
            deliveries: RwLock::new(VecDeque::with_capacity(DELIVERY_LOG_CAPACITY)),
        }
    }

    /// One reconciliation pass. Dispatches for distinct sales run
    /// concurrently; order of the input does not matter.
    pub async fn process_alerts_for_sales(&self, sales: &[Sale]) -> DispatchSummary {
        let mut summary = DispatchSummary::default();
        let mut pending = Vec::new();
        for sale in sales {
            // Classification is pure, so it runs before touching the ledger.
            if alert_reasons(sale).is_empty() {
                summary.record(DispatchOutcome::NotAlerted);
                continue;
            }
            if self.ledger.has_been_sent(&sale.id).await {
                summary.record(DispatchOutcome::AlreadySent);
                continue;
            }
            pending.push(self.send_alert_webhook(sale));
        }

        for outcome in join_all(pending).await {
            summary.record(outcome);
        }
        if summary.delivered > 0 || summary.failed > 0 {
            info!(
                "alert reconciliation: delivered={}, failed={}, in_flight={}",
                summary.delivered, summary.failed, summary.in_flight
            );
        }
        summary
    }

    /// Never returns an error: delivery failures are logged and reported
    /// through the outcome only.
    pub async fn send_alert_webhook(&self, sale: &Sale) -> DispatchOutcome {
        // Claimed before any await so two callers cannot both pass the check.
        let Some(_claim) = InFlightClaim::acquire(&self.in_flight, &sale.id) else {
            debug!("alert webhook for sale #{} already in flight", sale.numero_lancamento);
            return DispatchOutcome::InFlight;
        };

        if self.ledger.has_been_sent(&sale.id).await {
            return DispatchOutcome::AlreadySent;
        }
        let alertas = alert_reasons(sale);
        if alertas.is_empty() {
            return DispatchOutcome::NotAlerted;
        }

        let alert_count = alertas.len();
        let payload = AlertWebhookPayload {
            venda: SaleSummary::from(sale),
            alertas,
            itens_com_alerta: alerted_items(sale),
            timestamp: iso_timestamp(),
        };

        info!(
            "sending alert webhook for sale #{} with {} alert(s)",
            sale.numero_lancamento, alert_count
        );
        match self.notifier.send_alert(&payload).await {
            Ok(()) => {
                info!("alert webhook sent for sale #{}", sale.numero_lancamento);
                if let Err(err) = self.ledger.mark_sent(&sale.id).await {
                    warn!(
                        "alert for sale #{} delivered but ledger update failed: {}",
                        sale.numero_lancamento, err
                    );
                }
                self.record_delivery(sale, "delivered", alert_count, None).await;
                DispatchOutcome::Delivered
            }
            Err(err) => {
                warn!(
                    "alert webhook failed for sale #{}: {}",
                    sale.numero_lancamento, err
                );
                self.record_delivery(sale, "failed", alert_count, Some(err.to_string()))
                    .await;
                DispatchOutcome::Failed
            }
        }
    }

    pub async fn list_deliveries(&self, limit: usize) -> Vec<AlertDeliveryRecord> {
        let deliveries = self.deliveries.read().await;
        deliveries.iter().rev().take(limit).cloned().collect()
    }

    pub async fn last_delivery(&self) -> Option<AlertDeliveryRecord> {
        self.deliveries.read().await.back().cloned()
    }

    async fn record_delivery(
        &self,
        sale: &Sale,
        status: &str,
        alert_count: usize,
        error: Option<String>,
    ) {
        let mut deliveries = self.deliveries.write().await;
        if deliveries.len() == DELIVERY_LOG_CAPACITY {
            deliveries.pop_front();
        }
        deliveries.push_back(AlertDeliveryRecord {
            timestamp_ms: current_millis(),
            sale_id: sale.id.clone(),
            numero_lancamento: sale.numero_lancamento,
            status: status.to_string(),
            alert_count,
            error,
        });
    }
}

/// Membership in the in-flight set, released on drop.
struct InFlightClaim<'a> {
    set: &'a Mutex<HashSet<String>>,
    sale_id: String,
}

impl<'a> InFlightClaim<'a> {
    fn acquire(set: &'a Mutex<HashSet<String>>, sale_id: &str) -> Option<Self> {
        let mut in_flight = set.lock().unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(sale_id.to_string()) {
            return None;
        }
        Some(Self {
            set,
            sale_id: sale_id.to_string(),
        })
    }
}

impl Drop for InFlightClaim<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.sale_id);
    }
}
