//! Speculative fetching of upcoming images ahead of display need.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::source::ImageSource;

/// Warms the backend cache for images the cursor is about to reach.
///
/// Requests are fire-and-forget: callers never await completion, because
/// warming only hides latency and a later display attempt surfaces any
/// failure through the presenter. Successful fetches are recorded so they
/// are not requested again within the session.
#[derive(Debug)]
pub struct Preloader<S> {
    source: Arc<S>,
    cache: Arc<Mutex<HashSet<String>>>,
}

impl<S: ImageSource> Preloader<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            cache: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Whether `url` is already known to be loaded.
    #[must_use]
    pub fn is_warm(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    /// Number of URLs known to be loaded.
    #[must_use]
    pub fn warmed(&self) -> usize {
        self.lock().len()
    }

    /// Record a URL that just displayed successfully.
    pub fn record(&self, url: &str) {
        self.lock().insert(url.to_string());
    }

    /// Forget everything; called when the session ends.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Warm `count` consecutive selection entries starting at `start`,
    /// wrapping past the end of `urls`.
    ///
    /// Already-warm URLs are skipped. Failures are logged and left
    /// unrecorded so a later pass can retry. `cancel` is the session token:
    /// a fetch that completes after the session ended must not repopulate a
    /// cleared cache.
    pub fn warm(&self, urls: &[String], start: usize, count: usize, cancel: &CancellationToken) {
        if urls.is_empty() {
            return;
        }
        for k in 0..count.min(urls.len()) {
            let url = urls[(start + k) % urls.len()].clone();
            if self.is_warm(&url) {
                continue;
            }
            let source = Arc::clone(&self.source);
            let cache = Arc::clone(&self.cache);
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::select! {
                    _ = cancel.cancelled() => {}
                    res = source.fetch(&url) => match res {
                        Ok(()) if !cancel.is_cancelled() => {
                            debug!(url = %url, "preloaded");
                            cache
                                .lock()
                                .unwrap_or_else(PoisonError::into_inner)
                                .insert(url);
                        }
                        Ok(()) => {}
                        Err(err) => debug!(url = %url, error = %err, "preload failed"),
                    }
                }
            });
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
