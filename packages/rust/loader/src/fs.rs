//! Filesystem-backed content loader.
//!
//! [`FsLoader`] is rooted at a corpus directory; every key is a
//! forward-slash path relative to that root. Existence is checked on `get`
//! without reading the file; content is read and parsed on first
//! `config`/`body` access, at most once per document.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use globset::{GlobBuilder, GlobMatcher};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, trace};

use guidegen_shared::{DocConfig, GuidegenError, Result};

use crate::parse::{key_parts, parse_document};
use crate::{ContentDocument, ContentLoader};

// ---------------------------------------------------------------------------
// FsDocument
// ---------------------------------------------------------------------------

/// A lazily-parsed handle to one document in an [`FsLoader`] corpus.
///
/// Handles are cheap to clone and share their parse state, so repeated `get`
/// calls for the same key never re-read the file.
#[derive(Debug, Clone)]
pub struct FsDocument {
    inner: Arc<FsDocInner>,
}

#[derive(Debug)]
struct FsDocInner {
    key: String,
    dir: String,
    name: String,
    abs_path: PathBuf,
    parsed: OnceCell<(DocConfig, String)>,
}

impl FsDocument {
    fn new(key: String, abs_path: PathBuf) -> Self {
        let (dir, name) = key_parts(&key);
        Self {
            inner: Arc::new(FsDocInner {
                key,
                dir,
                name,
                abs_path,
                parsed: OnceCell::new(),
            }),
        }
    }

    /// Corpus-relative key this document was resolved at.
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    async fn parsed(&self) -> Result<&(DocConfig, String)> {
        self.inner
            .parsed
            .get_or_try_init(|| async {
                trace!(key = %self.inner.key, "reading document");
                let raw = tokio::fs::read_to_string(&self.inner.abs_path)
                    .await
                    .map_err(|e| GuidegenError::io(&self.inner.abs_path, e))?;
                parse_document(&self.inner.key, &raw)
            })
            .await
    }
}

impl ContentDocument for FsDocument {
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

// ---------------------------------------------------------------------------
// FsLoader
// ---------------------------------------------------------------------------

/// Filesystem-backed [`ContentLoader`] rooted at a content directory.
pub struct FsLoader {
    root: PathBuf,
    cache: Mutex<HashMap<String, FsDocument>>,
}

impl FsLoader {
    /// Create a loader rooted at `root`. The directory does not need to
    /// exist yet; lookups against a missing root simply resolve to nothing.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The corpus root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn lookup(&self, key: &str) -> Result<Option<FsDocument>> {
        {
            let cache = self.cache.lock().await;
            if let Some(doc) = cache.get(key) {
                return Ok(Some(doc.clone()));
            }
        }

        let abs_path = self.root.join(key);
        match tokio::fs::metadata(&abs_path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!(key, "document not found");
                return Ok(None);
            }
            Err(e) => return Err(GuidegenError::io(&abs_path, e)),
        }

        let doc = FsDocument::new(key.to_string(), abs_path);
        let mut cache = self.cache.lock().await;
        Ok(Some(cache.entry(key.to_string()).or_insert(doc).clone()))
    }

    /// Walk the corpus once, collecting every file key relative to the root.
    async fn walk_keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut stack = vec![self.root.clone()];

        while let Some(dir) = stack.pop() {
            let mut entries = match tokio::fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(GuidegenError::io(&dir, e)),
            };

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| GuidegenError::io(&dir, e))?
            {
                let path = entry.path();
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|e| GuidegenError::io(&path, e))?;

                if file_type.is_dir() {
                    stack.push(path);
                } else if let Ok(rel) = path.strip_prefix(&self.root) {
                    keys.push(rel.to_string_lossy().replace('\\', "/"));
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}

impl ContentLoader for FsLoader {
    type Doc = FsDocument;

    async fn get(&self, key: &str) -> Result<Option<FsDocument>> {
        self.lookup(key).await
    }

    async fn contents(&self, pattern: &str) -> Result<Vec<FsDocument>> {
        let matcher = compile_glob(pattern)?;
        let mut docs = Vec::new();

        for key in self.walk_keys().await? {
            if !matcher.is_match(&key) {
                continue;
            }
            if let Some(doc) = self.lookup(&key).await? {
                docs.push(doc);
            }
        }

        debug!(pattern, count = docs.len(), "glob listing");
        Ok(docs)
    }
}

/// Compile a glob pattern where `*` does not cross directory separators
/// (use `**` to recurse).
pub(crate) fn compile_glob(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| GuidegenError::parse(format!("invalid glob pattern `{pattern}`: {e}")))
}
