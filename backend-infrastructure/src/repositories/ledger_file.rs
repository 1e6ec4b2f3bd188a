use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

use backend_domain::SentAlertLedger;

/// Sale ids whose alert was delivered, kept as one JSON array in a file.
pub struct FileSentAlertLedger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSentAlertLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_ids(&self) -> Result<Vec<String>> {
        if !fs::try_exists(&self.path).await? {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<String> = serde_json::from_str(&content)?;
        Ok(ids)
    }

    async fn write_ids(&self, ids: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_vec(ids)?;
        let tmp_path = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(&content).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SentAlertLedger for FileSentAlertLedger {
    async fn has_been_sent(&self, sale_id: &str) -> bool {
        match self.read_ids().await {
            Ok(ids) => ids.iter().any(|id| id == sale_id),
            Err(err) => {
                warn!("alert ledger unreadable at {}: {}", self.path.display(), err);
                false
            }
        }
    }

    async fn mark_sent(&self, sale_id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut ids = match self.read_ids().await {
            Ok(ids) => ids,
            Err(err) => {
                warn!(
                    "alert ledger unreadable at {}, starting over: {}",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        };
        if ids.iter().any(|id| id == sale_id) {
            return Ok(());
        }
        ids.push(sale_id.to_string());
        self.write_ids(&ids).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn ledger_in(dir: &tempfile::TempDir) -> FileSentAlertLedger {
        FileSentAlertLedger::new(dir.path().join("sent_alert_webhooks.json"))
    }

    #[tokio::test]
    async fn missing_file_means_nothing_sent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ledger = ledger_in(&dir);
        assert!(!ledger.has_been_sent("s1").await);
    }

    #[tokio::test]
    async fn marks_persist_across_instances() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ledger = ledger_in(&dir);
        ledger.mark_sent("s1").await.expect("mark");
        ledger.mark_sent("s1").await.expect("mark again");
        ledger.mark_sent("s2").await.expect("mark");

        let reopened = ledger_in(&dir);
        assert!(reopened.has_been_sent("s1").await);
        assert!(reopened.has_been_sent("s2").await);
        assert!(!reopened.has_been_sent("s3").await);

        let raw = std::fs::read_to_string(reopened.path()).expect("ledger file");
        let ids: Vec<String> = serde_json::from_str(&raw).expect("json array");
        assert_eq!(ids, vec!["s1".to_string(), "s2".to_string()]);
    }

    #[tokio::test]
    async fn corrupt_file_reads_as_not_sent_and_is_replaced() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ledger = ledger_in(&dir);
        std::fs::write(ledger.path(), "{not json").expect("write garbage");

        assert!(!ledger.has_been_sent("s1").await);
        ledger.mark_sent("s1").await.expect("mark");
        assert!(ledger.has_been_sent("s1").await);
    }

    #[tokio::test]
    async fn concurrent_marks_are_not_lost() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ledger = Arc::new(ledger_in(&dir));
        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let ledger = ledger.clone();
                tokio::spawn(async move { ledger.mark_sent(&format!("s{}", i)).await })
            })
            .collect();
        for task in tasks {
            task.await.expect("join").expect("mark");
        }
        for i in 0..16 {
            assert!(ledger.has_been_sent(&format!("s{}", i)).await);
        }
    }
}
