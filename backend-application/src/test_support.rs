// In-memory fakes for the domain ports

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::sync::Notify;

use backend_domain::ports::{AlertNotifier, HealthCheckService, SaleRepository, SentAlertLedger};
use backend_domain::{AlertWebhookPayload, RuntimeConfig, Sale, SaleItem};

use crate::{AlertDispatcher, AppState, Metrics};

pub fn clean_sale(id: &str, numero: i64) -> Sale {
    let mut sale: Sale = serde_json::from_value(serde_json::json!({
        "id": id,
        "numero_lancamento": numero,
        "data_emissao": "2025-01-15T10:00:00",
    }))
    .expect("sale row");
    sale.items = Some(vec![SaleItem {
        produto: "Mesa".to_string(),
        alerta_auditoria: Some("OK".to_string()),
        ..SaleItem::default()
    }]);
    sale
}

pub fn alerted_sale(id: &str, numero: i64) -> Sale {
    let mut sale = clean_sale(id, numero);
    sale.items = Some(vec![SaleItem {
        produto: "Cadeira".to_string(),
        tabela_usada: Some("VAREJO".to_string()),
        alerta_auditoria: Some("ALERTA: desconto excessivo".to_string()),
        ..SaleItem::default()
    }]);
    sale
}

#[derive(Default)]
pub struct MemoryLedger {
    sent: Mutex<HashSet<String>>,
}

impl MemoryLedger {
    pub fn contains(&self, sale_id: &str) -> bool {
        self.sent.lock().expect("ledger lock").contains(sale_id)
    }
}

#[async_trait]
impl SentAlertLedger for MemoryLedger {
    async fn has_been_sent(&self, sale_id: &str) -> bool {
        self.contains(sale_id)
    }

    async fn mark_sent(&self, sale_id: &str) -> anyhow::Result<()> {
        self.sent.lock().expect("ledger lock").insert(sale_id.to_string());
        Ok(())
    }
}

/// Never remembers anything: reads report "not sent", writes fail.
pub struct BrokenLedger;

#[async_trait]
impl SentAlertLedger for BrokenLedger {
    async fn has_been_sent(&self, _sale_id: &str) -> bool {
        false
    }

    async fn mark_sent(&self, _sale_id: &str) -> anyhow::Result<()> {
        Err(anyhow!("disk full"))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    calls: AtomicUsize,
    failing: AtomicBool,
    last: Mutex<Option<AlertWebhookPayload>>,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.set_failing(true);
        notifier
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_payload(&self) -> Option<AlertWebhookPayload> {
        self.last.lock().expect("payload lock").clone()
    }
}

#[async_trait]
impl AlertNotifier for RecordingNotifier {
    async fn send_alert(&self, payload: &AlertWebhookPayload) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().expect("payload lock") = Some(payload.clone());
        if self.failing.load(Ordering::SeqCst) {
            return Err(anyhow!("webhook responded 500"));
        }
        Ok(())
    }

    async fn check_alert_target(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Blocks inside `send_alert` until `release` is notified.
#[derive(Default)]
pub struct GatedNotifier {
    calls: AtomicUsize,
    pub started: Notify,
    pub release: Notify,
}

impl GatedNotifier {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AlertNotifier for GatedNotifier {
    async fn send_alert(&self, _payload: &AlertWebhookPayload) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.release.notified().await;
        Ok(())
    }

    async fn check_alert_target(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct StaticSaleRepository {
    sales: Option<Vec<Sale>>,
}

impl StaticSaleRepository {
    pub fn with_sales(sales: Vec<Sale>) -> Self {
        Self { sales: Some(sales) }
    }

    pub fn unavailable() -> Self {
        Self { sales: None }
    }
}

#[async_trait]
impl SaleRepository for StaticSaleRepository {
    async fn fetch_sales(&self) -> anyhow::Result<Vec<Sale>> {
        self.sales
            .clone()
            .ok_or_else(|| anyhow!("connection refused"))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.sales.as_ref().map(|_| ()).ok_or_else(|| anyhow!("connection refused"))
    }
}

struct AlwaysHealthy;

#[async_trait]
impl HealthCheckService for AlwaysHealthy {
    async fn check_datastore(&self) -> anyhow::Result<bool> {
        Ok(true)
    }

    async fn check_alert_target(&self) -> anyhow::Result<bool> {
        Ok(true)
    }
}

pub fn test_config() -> RuntimeConfig {
    RuntimeConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        api_token: None,
        alert_webhook_url: None,
        ledger_path: "./sent_alert_webhooks.json".to_string(),
        refresh_interval_seconds: 0,
        max_body_bytes: 1024 * 1024,
        request_timeout_seconds: 5,
    }
}

pub fn test_state(
    repo: StaticSaleRepository,
    ledger: Arc<dyn SentAlertLedger>,
    notifier: Arc<dyn AlertNotifier>,
) -> AppState {
    AppState {
        config: test_config(),
        sale_repo: Arc::new(repo),
        health: Arc::new(AlwaysHealthy),
        dispatcher: Arc::new(AlertDispatcher::new(ledger, notifier)),
        metrics: Arc::new(Metrics::default()),
    }
}
