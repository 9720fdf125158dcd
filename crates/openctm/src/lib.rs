//! Fetch, cache and decode OpenCTM meshes.
//!
//! This crate wraps [`openctm_decode`] with an async HTTP client. Meshes are
//! addressed by name and resolved to `<base_url>/<name>.ctm`; raw file bytes
//! are cached so a mesh is downloaded at most once per cache.
//!
//! # Example
//!
//! ```no_run
//! # async fn example() -> openctm::Result<()> {
//! use openctm::{Client, MemoryCache};
//!
//! let client = Client::with_cache(MemoryCache::new())
//!     .with_base_url("https://example.com/models");
//! let mesh = client.fetch_mesh("bunny").await?;
//! println!("{} triangles", mesh.triangle_count());
//! # Ok(())
//! # }
//! ```

mod cache;
mod client;
mod error;

pub use cache::{Cache, MemoryCache, NoCache};
pub use client::{Client, DEFAULT_BASE_URL};
pub use error::{Error, Result};

pub use openctm_decode::{
    AttributeMap, DecodeError, Decompressor, Lzma, Mesh, Stored, UvMap, decode, decode_with,
};
