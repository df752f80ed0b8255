//! Content-loading abstraction for guidegen.
//!
//! A [`ContentLoader`] resolves corpus-relative keys to lazily-parsed
//! [`ContentDocument`]s and lists documents by glob pattern. Two loaders are
//! provided: [`FsLoader`] over a content directory on disk, and
//! [`MemoryLoader`] over an in-memory corpus for tests and embedding.
//!
//! Loaders own all caching. A document's config is parsed at most once per
//! loader, no matter how many times it is fetched or awaited; consumers must
//! not memoize documents themselves.

pub mod fs;
pub mod memory;
mod parse;

pub use fs::{FsDocument, FsLoader};
pub use memory::{MemDocument, MemoryLoader};

use std::future::Future;

use guidegen_shared::{DocConfig, Result};

/// One content item resolved at a corpus-relative key.
///
/// Handles are owned by their loader; consumers only read them. `config` and
/// `body` suspend on first access while the underlying content is read and
/// parsed, and are cheap afterwards.
pub trait ContentDocument: Send + Sync {
    /// File basename without extension (`en/path/learn.md` → `learn`).
    fn name(&self) -> &str;

    /// Containing directory key (`en/path/learn/guides.yaml` → `en/path/learn`).
    fn dir(&self) -> &str;

    /// The document's structured metadata, parsed lazily at most once.
    fn config(&self) -> impl Future<Output = Result<&DocConfig>> + Send;

    /// The raw markdown body. Empty for pure-config (`.yaml`) documents.
    fn body(&self) -> impl Future<Output = Result<String>> + Send;
}

/// Async key → document resolution plus glob-based listing.
pub trait ContentLoader: Send + Sync {
    type Doc: ContentDocument;

    /// Resolve a single document by key. Absence is `Ok(None)`, never an error.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Self::Doc>>> + Send;

    /// List documents whose keys match a glob pattern, sorted by key so
    /// listing order is deterministic across filesystems.
    fn contents(&self, pattern: &str) -> impl Future<Output = Result<Vec<Self::Doc>>> + Send;
}
