//! Asynchronous image fetching, abstracted away from any particular backend.

use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};

/// Fetches image data by URL.
///
/// A fetch resolves once the image is known to be displayable; the decoded
/// pixels stay wherever the backend caches them. Failures are per-image and
/// recoverable: the presenter substitutes a placeholder and the preloader
/// simply leaves the URL unrecorded.
pub trait ImageSource: Send + Sync + 'static {
    /// Fetch `url` far enough to know it would render.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Filesystem-backed source used by the demo binary and tests.
///
/// Relative URLs resolve against `root`; `file://` prefixes are stripped;
/// `data:` URLs are self-contained and always succeed.
#[derive(Debug, Clone)]
pub struct FsImageSource {
    root: PathBuf,
}

impl FsImageSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, url: &str) -> PathBuf {
        let path = url.strip_prefix("file://").unwrap_or(url);
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl ImageSource for FsImageSource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<()>> + Send {
        let inline = url.starts_with("data:");
        let path = self.resolve(url);
        async move {
            if inline {
                return Ok(());
            }
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            ensure!(!bytes.is_empty(), "empty image file {}", path.display());
            Ok(())
        }
    }
}
