use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{validate_key, ObjectStore};
use crate::error::{StorageError, StorageResult};

/// Objects stored as files under `<root>/<bucket>/<key>`.
pub struct LocalStore {
    bucket: String,
    dir: PathBuf,
}

impl LocalStore {
    pub fn open(root: &Path, bucket: &str) -> StorageResult<Self> {
        validate_key(bucket)?;
        let dir = root.join(bucket);
        fs::create_dir_all(&dir)?;
        Ok(LocalStore {
            bucket: bucket.to_string(),
            dir,
        })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl ObjectStore for LocalStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn put_object(&self, key: &str, body: &[u8], _content_type: &str) -> StorageResult<()> {
        validate_key(key)?;
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        // write-then-rename so readers never see a partial object
        let tmp = self.path_for(&format!("{}.part", key));
        if let Err(e) = fs::write(&tmp, body).and_then(|_| fs::rename(&tmp, &path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!(path = %path.display(), bytes = body.len(), "wrote object");
        Ok(())
    }

    fn get_object(&self, key: &str) -> StorageResult<Vec<u8>> {
        validate_key(key)?;
        fs::read(self.path_for(key)).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(format!("{}/{}", self.bucket, key)),
            _ => StorageError::Io(e),
        })
    }
}
