//! On-disk cache of raw introspection responses.
//!
//! One file per endpoint, named by the SHA-1 of the endpoint URL. Entries never
//! expire; delete the file to force a fresh introspection.
use std::path::PathBuf;

use serde_json::Value;
use sha1::{Digest, Sha1};

use crate::error::CacheError;

pub const CACHE_DIR_NAME: &str = ".countersync";

#[derive(Debug, Clone)]
pub struct SchemaCache {
    dir: PathBuf,
}

impl SchemaCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$HOME/.countersync`
    pub fn in_home() -> Result<Self, CacheError> {
        dirs::home_dir()
            .map(|home| Self::new(home.join(CACHE_DIR_NAME)))
            .ok_or(CacheError::NoHome)
    }

    pub fn path_for(&self, endpoint: &str) -> PathBuf {
        self.dir.join(format!("{}.json", endpoint_key(endpoint)))
    }

    pub fn load(&self, endpoint: &str) -> Result<Option<Value>, CacheError> {
        let path = self.path_for(endpoint);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "schema cache miss");
            return Ok(None);
        }
        let source = std::fs::read_to_string(&path).map_err(|source| CacheError::Io { path: path.clone(), source })?;
        let value = crate::path_de::from_str_with_path::<Value>(&source)
            .map_err(|reason| CacheError::Corrupt { path: path.clone(), reason })?;
        tracing::debug!(path = %path.display(), "schema cache hit");
        Ok(Some(value))
    }

    pub fn store(&self, endpoint: &str, response: &Value) -> Result<PathBuf, CacheError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| CacheError::Io { path: self.dir.clone(), source })?;
        let path = self.path_for(endpoint);
        std::fs::write(&path, response.to_string()).map_err(|source| CacheError::Io { path: path.clone(), source })?;
        tracing::debug!(path = %path.display(), "schema cached");
        Ok(path)
    }
}

pub fn endpoint_key(endpoint: &str) -> String {
    hex::encode(Sha1::digest(endpoint.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ENDPOINT: &str = "https://abc.appsync-api.us-east-1.amazonaws.com/graphql";

    #[test]
    fn key_is_sha1_hex() {
        assert_eq!(endpoint_key("abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn miss_then_hit() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = SchemaCache::new(tmp.path().join("nested"));
        assert_eq!(cache.load(ENDPOINT).unwrap(), None);

        let response = json!({ "data": { "__schema": { "types": [] } } });
        let path = cache.store(ENDPOINT, &response).unwrap();
        assert_eq!(path, cache.path_for(ENDPOINT));
        assert!(path.file_name().unwrap().to_string_lossy().ends_with(".json"));
        assert_eq!(cache.load(ENDPOINT).unwrap(), Some(response));
    }

    #[test]
    fn endpoints_do_not_share_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = SchemaCache::new(tmp.path());
        cache.store(ENDPOINT, &json!({ "a": 1 })).unwrap();
        assert_eq!(cache.load("https://other.example/graphql").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = SchemaCache::new(tmp.path());
        std::fs::write(cache.path_for(ENDPOINT), "{ not json").unwrap();
        assert!(matches!(cache.load(ENDPOINT), Err(CacheError::Corrupt { .. })));
    }
}
