// src/ui/images.rs
// =============================================================================
// Loads and caches owner avatars.
//
// The cache is handed to the view as a trait object instead of living in a
// global, so tests (and other front ends) can swap it out.
//
// Clearing is an explicit operation. Nothing clears the cache while rows are
// being rendered.
//
// Rust concepts:
// - Arc<Mutex<...>>: Shared state touched from several tokio tasks
// - BoxFuture: Async trait methods without extra crates
// =============================================================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use futures::future::BoxFuture;
use log::{debug, info};
use reqwest::Client;
use url::Url;

/// Raw image bytes, shared between the cache and whoever asked for them
pub type ImageBytes = Arc<Vec<u8>>;

/// An avatar loader with a cache in front of it.
pub trait ImageCache: Send + Sync {
    /// Returns the image at `url`, downloading it on the first request
    fn load<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<ImageBytes>>;

    /// Forgets every cached image
    fn clear(&self);
}

/// Keeps downloaded avatars in memory for the lifetime of the process.
#[derive(Debug)]
pub struct MemoryImageCache {
    http: Client,
    images: Mutex<HashMap<String, ImageBytes>>,
}

impl MemoryImageCache {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            images: Mutex::new(HashMap::new()),
        }
    }

    pub fn cached_count(&self) -> usize {
        self.lock().len()
    }

    // A poisoned lock only means another task panicked mid-insert; the map
    // itself is still usable
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, ImageBytes>> {
        self.images.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn fetch(&self, url: &str) -> Result<ImageBytes> {
        let cached = self.lock().get(url).cloned();
        if let Some(image) = cached {
            debug!("avatar cache hit: {}", url);
            return Ok(image);
        }

        let parsed = Url::parse(url).map_err(|e| anyhow!("invalid image URL '{}': {}", url, e))?;
        let response = self.http.get(parsed).send().await?.error_for_status()?;
        let image: ImageBytes = Arc::new(response.bytes().await?.to_vec());

        debug!("avatar loaded: {} ({} bytes)", url, image.len());
        self.lock().insert(url.to_string(), Arc::clone(&image));
        Ok(image)
    }
}

impl ImageCache for MemoryImageCache {
    fn load<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<ImageBytes>> {
        Box::pin(self.fetch(url))
    }

    fn clear(&self) {
        info!("clearing {} cached avatar(s)", self.cached_count());
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> MemoryImageCache {
        let cache = MemoryImageCache::new(Client::new());
        cache
            .lock()
            .insert("http://x/a.png".to_string(), Arc::new(vec![1, 2, 3]));
        cache
    }

    #[tokio::test]
    async fn test_cached_image_is_served_without_network() {
        let cache = seeded();
        let image = cache.load("http://x/a.png").await.unwrap();
        assert_eq!(*image, vec![1, 2, 3]);
    }

    #[test]
    fn test_clear_empties_cache() {
        let cache = seeded();
        assert_eq!(cache.cached_count(), 1);
        cache.clear();
        assert_eq!(cache.cached_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_url_is_an_error() {
        let cache = MemoryImageCache::new(Client::new());
        assert!(cache.load("").await.is_err());
        assert_eq!(cache.cached_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let cache = MemoryImageCache::new(Client::new());
        assert!(cache.load("http://127.0.0.1:1/avatar.png").await.is_err());
        assert_eq!(cache.cached_count(), 0);
    }
}
