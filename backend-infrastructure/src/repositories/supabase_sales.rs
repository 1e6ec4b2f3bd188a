use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};

use backend_domain::{DatastoreConfig, Sale, SaleRepository};

use crate::utils::{http_client, trim_trailing_slash};

/// Reads the sales table through the Supabase PostgREST endpoint.
pub struct SupabaseSaleRepository {
    client: Client,
    config: DatastoreConfig,
}

impl SupabaseSaleRepository {
    pub fn new(config: DatastoreConfig, connect_timeout_seconds: u64) -> Result<Self> {
        Ok(Self {
            client: http_client(connect_timeout_seconds)?,
            config,
        })
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            trim_trailing_slash(&self.config.supabase_url),
            self.config.sales_table
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.supabase_key {
            Some(key) => request
                .header("apikey", key)
                .header(AUTHORIZATION, format!("Bearer {}", key)),
            None => request,
        }
    }

    async fn select(&self, limit: Option<usize>) -> Result<Vec<Sale>> {
        let mut query = vec![
            ("select", "*".to_string()),
            ("order", "data_emissao.desc".to_string()),
        ];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        let response = self
            .authorized(self.client.get(self.table_url()).query(&query))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("datastore responded {}: {}", status, body));
        }
        let sales = response.json::<Vec<Sale>>().await?;
        Ok(sales)
    }
}

#[async_trait]
impl SaleRepository for SupabaseSaleRepository {
    async fn fetch_sales(&self) -> Result<Vec<Sale>> {
        self.select(None).await
    }

    async fn ping(&self) -> Result<()> {
        self.select(Some(1)).await.map(|_| ())
    }
}
