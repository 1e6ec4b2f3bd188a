use std::time::Duration;

use anyhow::Result;
use reqwest::Client;

/// Outbound client shared by the datastore and webhook adapters.
/// Only connecting is bounded: once a request is on the wire it runs to
/// completion, so a slow webhook is never reported as failed after it
/// has already accepted the alert.
pub fn http_client(connect_timeout_seconds: u64) -> Result<Client> {
    let client = Client::builder()
        .connect_timeout(Duration::from_secs(connect_timeout_seconds.max(3)))
        .build()?;
    Ok(client)
}

pub fn trim_trailing_slash(url: &str) -> &str {
    url.trim_end_matches('/')
}
