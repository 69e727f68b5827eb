use crate::cache::ItemCache;
use async_channel::Sender;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;
use tokio::task::JoinHandle;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct SourceKey(String);

crate::impl_string_newtype!(SourceKey);

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Source reported failure")]
    Unsuccessful,
}

/// Response envelope every item endpoint returns.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FetchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl FetchResponse {
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
        }
    }

    pub fn failed() -> Self {
        Self::default()
    }

    /// Non-array `data` reads as an empty list; array elements that do not
    /// match `T` are skipped.
    pub fn into_items<T: DeserializeOwned>(self) -> Result<Vec<T>, SourceError> {
        if !self.success {
            return Err(SourceError::Unsuccessful);
        }

        let serde_json::Value::Array(values) = self.data else {
            log::debug!("Response data is not a list, treating as empty");
            return Ok(Vec::new());
        };

        Ok(values
            .into_iter()
            .enumerate()
            .filter_map(|(i, value)| match serde_json::from_value(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    log::warn!("Skipping malformed item #{}: {}", i, e);
                    None
                }
            })
            .collect())
    }
}

pub trait ItemSource: Send + Sync {
    fn key(&self) -> SourceKey;

    fn fetch(&self) -> impl Future<Output = Result<FetchResponse, SourceError>> + Send;
}

/// Reads a response envelope from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    key: SourceKey,
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(key: SourceKey, path: impl Into<PathBuf>) -> Self {
        Self {
            key,
            path: path.into(),
        }
    }
}

impl ItemSource for JsonFileSource {
    fn key(&self) -> SourceKey {
        self.key.clone()
    }

    async fn fetch(&self) -> Result<FetchResponse, SourceError> {
        let body = fs_err::tokio::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Serves a fixed response.
#[derive(Debug, Clone)]
pub struct StaticSource {
    key: SourceKey,
    response: FetchResponse,
}

impl StaticSource {
    pub fn new(key: SourceKey, response: FetchResponse) -> Self {
        Self { key, response }
    }
}

impl ItemSource for StaticSource {
    fn key(&self) -> SourceKey {
        self.key.clone()
    }

    async fn fetch(&self) -> Result<FetchResponse, SourceError> {
        Ok(self.response.clone())
    }
}

/// Fetches items, falling back to `fallback` when the source fails or comes
/// back empty. Errors stop here.
pub async fn load_items<T, S>(source: &S, fallback: &[T], cache: &ItemCache<T>) -> Vec<T>
where
    T: DeserializeOwned + Clone,
    S: ItemSource,
{
    let key = source.key();
    if let Some(items) = cache.get(&key) {
        log::debug!("Serving '{}' from cache ({} items)", key, items.len());
        return items;
    }

    match source.fetch().await.and_then(FetchResponse::into_items::<T>) {
        Ok(items) if !items.is_empty() => {
            log::debug!("Loaded {} items from '{}'", items.len(), key);
            cache.insert(key, items.clone());
            items
        }
        Ok(_) => {
            log::warn!("Source '{}' returned no items, using defaults", key);
            fallback.to_vec()
        }
        Err(e) => {
            log::warn!("Failed to load '{}': {}, using defaults", key, e);
            fallback.to_vec()
        }
    }
}

/// In-flight load tied to its owner's lifetime. Dropping it aborts the fetch,
/// so no result is delivered after teardown.
#[derive(Debug)]
pub struct LoadTask {
    handle: JoinHandle<()>,
}

impl LoadTask {
    pub fn spawn<T, S, M, F>(
        source: S,
        fallback: Vec<T>,
        cache: ItemCache<T>,
        tx: Sender<M>,
        wrap: F,
    ) -> Self
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
        S: ItemSource + 'static,
        M: Send + 'static,
        F: FnOnce(Vec<T>) -> M + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let items = load_items(&source, &fallback, &cache).await;
            if tx.send(wrap(items)).await.is_err() {
                log::debug!("Load for '{}' finished after receiver closed", source.key());
            }
        });
        Self { handle }
    }

    pub fn abort(&self) {
        self.handle.abort();
    }
}

impl Drop for LoadTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
