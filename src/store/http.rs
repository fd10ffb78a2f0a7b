use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

use super::{validate_key, ObjectStore};
use crate::error::{StorageError, StorageResult};

/// Path-style object endpoint: `PUT/GET {endpoint}/{bucket}/{key}`.
pub struct HttpStore {
    client: Client,
    endpoint: String,
    bucket: String,
}

impl HttpStore {
    pub fn new(endpoint: &str, bucket: &str, timeout_secs: u64) -> StorageResult<Self> {
        validate_key(bucket)?;
        let endpoint = endpoint.trim_end_matches('/');
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(StorageError::configuration(format!(
                "endpoint must be an http(s) URL, got {:?}",
                endpoint
            )));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(HttpStore {
            client,
            endpoint: endpoint.to_string(),
            bucket: bucket.to_string(),
        })
    }

    pub fn url_for(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }
}

impl ObjectStore for HttpStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn put_object(&self, key: &str, body: &[u8], content_type: &str) -> StorageResult<()> {
        validate_key(key)?;
        let url = self.url_for(key);
        let resp = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, content_type)
            .body(body.to_vec())
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(StorageError::http(format!("PUT {} returned {}", url, status)));
        }
        debug!(%url, bytes = body.len(), "uploaded object");
        Ok(())
    }

    fn get_object(&self, key: &str) -> StorageResult<Vec<u8>> {
        validate_key(key)?;
        let url = self.url_for(key);
        let resp = self.client.get(&url).send()?;
        match resp.status() {
            StatusCode::NOT_FOUND => Err(StorageError::NotFound(format!("{}/{}", self.bucket, key))),
            s if s.is_success() => Ok(resp.bytes()?.to_vec()),
            s => Err(StorageError::http(format!("GET {} returned {}", url, s))),
        }
    }
}
