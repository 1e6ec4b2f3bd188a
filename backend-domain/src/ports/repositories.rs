use async_trait::async_trait;

use crate::entities::Sale;

/// Read-only access to the sales datastore.
#[async_trait]
pub trait SaleRepository: Send + Sync {
    /// All sales, newest `data_emissao` first.
    async fn fetch_sales(&self) -> anyhow::Result<Vec<Sale>>;
    async fn ping(&self) -> anyhow::Result<()>;
}

/// Durable set of sale ids whose alert webhook has already been delivered.
#[async_trait]
pub trait SentAlertLedger: Send + Sync {
    /// Must report `false` rather than fail when the stored state is
    /// unreadable.
    async fn has_been_sent(&self, sale_id: &str) -> bool;
    /// Idempotent; the id is persisted before this returns.
    async fn mark_sent(&self, sale_id: &str) -> anyhow::Result<()>;
}
