//! In-memory content loader for tests and embedding.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::OnceCell;

use guidegen_shared::{DocConfig, Result};

use crate::fs::compile_glob;
use crate::parse::{key_parts, parse_document};
use crate::{ContentDocument, ContentLoader};

/// A lazily-parsed handle to one document in a [`MemoryLoader`] corpus.
#[derive(Debug, Clone)]
pub struct MemDocument {
    inner: Arc<MemDocInner>,
}

#[derive(Debug)]
struct MemDocInner {
    key: String,
    dir: String,
    name: String,
    raw: String,
    parsed: OnceCell<(DocConfig, String)>,
}

impl MemDocument {
    fn new(key: String, raw: String) -> Self {
        let (dir, name) = key_parts(&key);
        Self {
            inner: Arc::new(MemDocInner {
                key,
                dir,
                name,
                raw,
                parsed: OnceCell::new(),
            }),
        }
    }

    async fn parsed(&self) -> Result<&(DocConfig, String)> {
        self.inner
            .parsed
            .get_or_try_init(|| async { parse_document(&self.inner.key, &self.inner.raw) })
            .await
    }
}

impl ContentDocument for MemDocument {
    fn name(&self) -> &str {
        &self.inner.name
    }

    fn dir(&self) -> &str {
        &self.inner.dir
    }

    async fn config(&self) -> Result<&DocConfig> {
        Ok(&self.parsed().await?.0)
    }

    async fn body(&self) -> Result<String> {
        Ok(self.parsed().await?.1.clone())
    }
}

/// In-memory [`ContentLoader`] over a key → raw-content map, with the same
/// lazy parsing semantics as [`crate::FsLoader`].
#[derive(Debug, Default)]
pub struct MemoryLoader {
    docs: BTreeMap<String, MemDocument>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document at `key` with the given raw content. Replaces any
    /// previous document at the same key.
    pub fn insert(&mut self, key: impl Into<String>, raw: impl Into<String>) -> &mut Self {
        let key = key.into();
        let doc = MemDocument::new(key.clone(), raw.into());
        self.docs.insert(key, doc);
        self
    }
}

impl ContentLoader for MemoryLoader {
    type Doc = MemDocument;

    async fn get(&self, key: &str) -> Result<Option<MemDocument>> {
        Ok(self.docs.get(key).cloned())
    }

    async fn contents(&self, pattern: &str) -> Result<Vec<MemDocument>> {
        let matcher = compile_glob(pattern)?;
        // BTreeMap iteration is already key-sorted.
        Ok(self
            .docs
            .iter()
            .filter(|(key, _)| matcher.is_match(key))
            .map(|(_, doc)| doc.clone())
            .collect())
    }
}
