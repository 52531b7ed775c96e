//! Latest-fetched snapshot for presentation layers
//!
//! A [`RefreshCache`] holds the most recent successfully fetched value (the
//! mod list, the command catalogue, ...). Readers get an `Arc` to an
//! immutable snapshot, and a refresh swaps in a new snapshot wholesale, so a
//! reader never observes a half-updated value.

use mcmanager_core::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Atomically replaced snapshot of a fetched value
#[derive(Debug, Default)]
pub struct RefreshCache<T> {
    current: RwLock<Arc<T>>,
}

impl<T> RefreshCache<T> {
    /// Create a cache holding `initial`
    pub fn new(initial: T) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// The current snapshot
    pub async fn snapshot(&self) -> Arc<T> {
        self.current.read().await.clone()
    }

    /// Swap in `value`, returning the snapshot it replaced
    pub async fn replace(&self, value: T) -> Arc<T> {
        let mut current = self.current.write().await;
        std::mem::replace(&mut *current, Arc::new(value))
    }

    /// Await `fetch` and swap in its value on success
    ///
    /// On failure the previous snapshot stays in place and the error is
    /// returned.
    pub async fn refresh<F>(&self, fetch: F) -> Result<Arc<T>>
    where
        F: Future<Output = Result<T>>,
    {
        match fetch.await {
            Ok(value) => {
                let fresh = Arc::new(value);
                *self.current.write().await = fresh.clone();
                Ok(fresh)
            }
            Err(error) => {
                tracing::warn!(error = %error, "Refresh failed, keeping previous snapshot");
                Err(error)
            }
        }
    }
}
