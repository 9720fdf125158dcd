//! HTTP client for fetching OpenCTM meshes by name.

use std::sync::Arc;

use openctm_decode::Mesh;

use crate::cache::{Cache, MemoryCache, NoCache};
use crate::error::{Error, Result};

/// Base URL used by [`Client::new`]: a `models/` directory on a local server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/models";

/// Fetches `.ctm` files from `<base_url>/<name>.ctm` and decodes them.
///
/// Raw file bytes are cached by name, so repeated fetches of the same mesh
/// only hit the network once (with [`MemoryCache`]).
#[derive(Debug)]
pub struct Client<C = MemoryCache> {
    http: reqwest::Client,
    base_url: String,
    cache: C,
}

impl Client<MemoryCache> {
    /// Client for [`DEFAULT_BASE_URL`] with an in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_cache(MemoryCache::new())
    }
}

impl Default for Client<MemoryCache> {
    fn default() -> Self {
        Self::new()
    }
}

impl Client<NoCache> {
    /// Client for [`DEFAULT_BASE_URL`] that never caches.
    #[must_use]
    pub fn uncached() -> Self {
        Self::with_cache(NoCache)
    }
}

impl<C: Cache> Client<C> {
    #[must_use]
    pub fn with_cache(cache: C) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            cache,
        }
    }

    /// Fetch from a different server or directory. Trailing slashes are ignored.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// URL of the mesh file called `name`.
    #[must_use]
    pub fn model_url(&self, name: &str) -> String {
        format!("{}/{name}.ctm", self.base_url)
    }

    /// Fetch raw bytes from a URL, bypassing the cache.
    pub async fn fetch_bytes_from_url(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url, "fetching");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status,
                url: url.to_owned(),
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!(url, len = bytes.len(), "fetched");
        Ok(bytes.to_vec())
    }

    /// Fetch the raw bytes of the mesh called `name`, consulting the cache first.
    pub async fn fetch_bytes(&self, name: &str) -> Result<Arc<[u8]>> {
        if let Some(data) = self.cache.get(name) {
            tracing::debug!(name, "cache hit");
            return Ok(data);
        }

        let url = self.model_url(name);
        tracing::info!(name, %url, "loading mesh");
        let data: Arc<[u8]> = self.fetch_bytes_from_url(&url).await?.into();
        self.cache.insert(name, Arc::clone(&data));
        Ok(data)
    }

    /// Fetch and decode the mesh called `name`.
    pub async fn fetch_mesh(&self, name: &str) -> Result<Mesh> {
        let data = self.fetch_bytes(name).await?;
        let mesh = openctm_decode::decode(&data)?;
        tracing::info!(
            name,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "decoded mesh"
        );
        Ok(mesh)
    }
}
