//! Object storage backends for the uploaded artifacts.

pub mod http;
pub mod local;
pub mod sqlite;

use tracing::info;

use crate::error::{StorageError, StorageResult};
use crate::settings::{Backend, Settings};

pub use http::HttpStore;
pub use local::LocalStore;
pub use sqlite::SqliteStore;

/// A flat key → bytes namespace inside one bucket.
pub trait ObjectStore {
    fn bucket(&self) -> &str;

    fn put_object(&self, key: &str, body: &[u8], content_type: &str) -> StorageResult<()>;

    fn get_object(&self, key: &str) -> StorageResult<Vec<u8>>;
}

/// Open the backend named in `settings`.
pub fn connect(settings: &Settings) -> StorageResult<Box<dyn ObjectStore>> {
    info!(backend = ?settings.backend, bucket = %settings.bucket, "connecting to object store");
    let store: Box<dyn ObjectStore> = match settings.backend {
        Backend::Local => Box::new(LocalStore::open(&settings.root_dir, &settings.bucket)?),
        Backend::Sqlite => Box::new(SqliteStore::open(&settings.db_path, &settings.bucket)?),
        Backend::Http => {
            let endpoint = settings.endpoint.as_deref().ok_or_else(|| {
                StorageError::configuration("http backend requires an endpoint")
            })?;
            Box::new(HttpStore::new(
                endpoint,
                &settings.bucket,
                settings.timeout_secs,
            )?)
        }
    };
    Ok(store)
}

/// Reject keys that would escape the bucket or be empty.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty()
        || key.starts_with('/')
        || key.split('/').any(|part| part.is_empty() || part == "." || part == "..")
    {
        return Err(StorageError::configuration(format!("invalid object key {:?}", key)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys() {
        assert!(validate_key("abc.csv").is_ok());
        assert!(validate_key("reports/abc.csv").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("/abs.csv").is_err());
        assert!(validate_key("../up.csv").is_err());
        assert!(validate_key("a//b").is_err());
    }

    #[test]
    fn http_without_endpoint() {
        let settings = Settings {
            backend: Backend::Http,
            ..Settings::default()
        };
        match connect(&settings) {
            Err(StorageError::Configuration(msg)) => assert!(msg.contains("endpoint")),
            Err(e) => panic!("unexpected error {}", e),
            Ok(_) => panic!("connected without endpoint"),
        }
    }

    #[test]
    fn connect_local() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            root_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };
        let store = connect(&settings).unwrap();
        assert_eq!(store.bucket(), "bucket-text-analysis");
        store.put_object("x.json", b"{}", "application/json").unwrap();
        assert_eq!(store.get_object("x.json").unwrap(), b"{}");
    }
}
