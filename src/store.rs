use serde_json::Value;
use std::path::{Path, PathBuf};

/// File-backed channel list. The file is the only source of truth: every
/// operation reads or writes it in full, nothing is cached in memory.
pub struct ChannelStore {
    path: PathBuf,
}

impl ChannelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the whole backing file. A missing file, unreadable
    /// file, or anything that does not parse as a JSON array degrades to an
    /// empty list; the failure is logged, never surfaced.
    pub async fn load(&self) -> Vec<Value> {
        match tokio::fs::read(&self.path).await {
            Ok(raw) => match serde_json::from_slice::<Vec<Value>>(&raw) {
                Ok(channels) => channels,
                Err(e) => {
                    tracing::error!("Error parsing {} - {e}", self.path.display());
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::error!("Error reading {} - {e}", self.path.display());
                Vec::new()
            }
        }
    }

    /// First entry whose `id` field equals `id`.
    pub async fn find(&self, id: i64) -> Option<Value> {
        self.load()
            .await
            .into_iter()
            .find(|channel| channel.get("id").and_then(Value::as_i64) == Some(id))
    }

    /// Overwrites the backing file with `payload`, two-space indented. The
    /// write is a single plain overwrite with no temp-file rename or lock,
    /// so a concurrent `load` may observe a partially written file.
    pub async fn replace(&self, payload: &Value) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(payload)?;
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "io error: {e}"),
            StoreError::Serialize(e) => write!(f, "serialize error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ChannelStore {
        ChannelStore::new(dir.path().join("channels.json"))
    }

    #[tokio::test]
    async fn replace_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let payload = json!([
            {"id": 1, "name": "News", "url": "http://example.com/news.m3u8"},
            {"id": 2, "name": "Sports"}
        ]);

        store.replace(&payload).await.unwrap();

        assert_eq!(store.load().await, payload.as_array().unwrap().clone());
    }

    #[tokio::test]
    async fn load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).load().await.is_empty());
    }

    #[tokio::test]
    async fn load_corrupt_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        tokio::fs::write(store.path(), b"{not json").await.unwrap();

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn load_non_array_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        tokio::fs::write(store.path(), br#"{"id": 1}"#).await.unwrap();

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn find_returns_first_match() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .replace(&json!([
                {"id": 7, "name": "First"},
                {"id": 7, "name": "Second"}
            ]))
            .await
            .unwrap();

        let found = store.find(7).await.unwrap();
        assert_eq!(found["name"], "First");
        assert!(store.find(99).await.is_none());
    }

    #[tokio::test]
    async fn replace_writes_two_space_indentation() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .replace(&json!([{"id": 1, "name": "News"}]))
            .await
            .unwrap();

        let on_disk = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert!(on_disk.starts_with("[\n  {\n    \""));
    }
}
