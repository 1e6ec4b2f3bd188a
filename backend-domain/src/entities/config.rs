// Runtime configuration handed to the application layer

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub alert_webhook_url: Option<String>,
    pub ledger_path: String,
    pub refresh_interval_seconds: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct DatastoreConfig {
    pub supabase_url: String,
    pub supabase_key: Option<String>,
    pub sales_table: String,
}
