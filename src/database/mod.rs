use crate::models::UserRecord;
use crate::utils::AppError;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// JSON file holding the whole user collection.
///
/// Every read loads the full array and every write replaces the full file.
/// Writers go through [`CredentialStore::update`], which serializes the
/// read-modify-write cycle so concurrent signups cannot drop each other's
/// records.
pub struct CredentialStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every record in file order.
    ///
    /// A missing file is an empty collection. So is a malformed one, but that
    /// case is logged since the next write will replace whatever was there.
    pub async fn load(&self) -> Result<Vec<UserRecord>, AppError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("📂 {} not found, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            // Includes non-UTF-8 content: that surfaces as a storage error,
            // not as an empty collection.
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Vec<UserRecord>>(&contents) {
            Ok(records) => Ok(records),
            Err(e) => {
                log::warn!(
                    "⚠️  {} is malformed, treating as empty: {}",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Overwrites the file with `records`, indented by four spaces.
    ///
    /// Not crash safe: the file is truncated before the new content lands.
    pub async fn save(&self, records: &[UserRecord]) -> Result<(), AppError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut serializer)?;

        tokio::fs::write(&self.path, buf).await?;
        log::debug!("💾 Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Runs `f` against the current collection and persists the result
    /// when `f` asks for it, all under the store's write lock.
    pub async fn update<F, R>(&self, f: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut Vec<UserRecord>) -> (bool, R),
    {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?;
        let (dirty, result) = f(&mut records);
        if dirty {
            self.save(&records).await?;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempdir::TempDir;

    fn store_in(dir: &TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().join("credentials.json"))
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = TempDir::new("store").unwrap();
        let store = store_in(&dir);

        assert!(store.load().await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_malformed_file_loads_empty() {
        let dir = TempDir::new("store").unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json [").unwrap();

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_shape_loads_empty() {
        let dir = TempDir::new("store").unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"name": "alice"}"#).unwrap();

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_utf8_file_is_a_storage_error() {
        let dir = TempDir::new("store").unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), [0xff, 0xfe, 0x00, 0x5b]).unwrap();

        assert!(matches!(store.load().await, Err(AppError::StorageError(_))));
    }

    #[tokio::test]
    async fn test_save_then_load_keeps_order_and_fields() {
        let dir = TempDir::new("store").unwrap();
        let store = store_in(&dir);
        let records = vec![
            UserRecord::new("carol", "c", "maths"),
            UserRecord::new("alice", "p1", "cs"),
            UserRecord::new("bob", "hunter2", "history of art"),
        ];

        store.save(&records).await.unwrap();

        assert_eq!(store.load().await.unwrap(), records);
    }

    #[tokio::test]
    async fn test_save_is_pretty_printed() {
        let dir = TempDir::new("store").unwrap();
        let store = store_in(&dir);

        store.save(&[UserRecord::new("alice", "p1", "cs")]).await.unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("[\n    {\n        \"name\": \"alice\""));
    }

    #[tokio::test]
    async fn test_save_overwrites_whole_file() {
        let dir = TempDir::new("store").unwrap();
        let store = store_in(&dir);

        store
            .save(&[UserRecord::new("a", "1", "x"), UserRecord::new("b", "2", "y")])
            .await
            .unwrap();
        store.save(&[UserRecord::new("c", "3", "z")]).await.unwrap();

        let records = store.load().await.unwrap();
        assert_eq!(records, vec![UserRecord::new("c", "3", "z")]);
    }

    #[tokio::test]
    async fn test_update_skips_write_when_clean() {
        let dir = TempDir::new("store").unwrap();
        let store = store_in(&dir);

        let count = store.update(|records| (false, records.len())).await.unwrap();

        assert_eq!(count, 0);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new("store").unwrap();
        let store = CredentialStore::new(dir.path().join("nope").join("credentials.json"));

        let result = store.save(&[UserRecord::new("a", "1", "x")]).await;
        assert!(matches!(result, Err(AppError::StorageError(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_are_not_lost() {
        let dir = TempDir::new("store").unwrap();
        let store = Arc::new(store_in(&dir));

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .update(move |records| {
                        records.push(UserRecord::new(format!("user{}", i), "pw", "s"));
                        (true, ())
                    })
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.load().await.unwrap().len(), 16);
    }
}
