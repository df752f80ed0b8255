//! Search-index collection for guidegen.
//!
//! An independent sub-pipeline with no loader or renderer dependency: it
//! filters an already-materialized document collection down to publishable,
//! tagged, titled, URL-bearing items and maps each into a flat
//! [`SearchRecord`] ready for an external indexing sink.

pub mod live;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use guidegen_shared::DocConfig;

/// Tags that qualify a document for the search index.
pub const ALLOWED_TAGS: [&str; 2] = ["post", "pathItem"];

// ---------------------------------------------------------------------------
// SearchDocument
// ---------------------------------------------------------------------------

/// One materialized document in the input collection.
#[derive(Debug, Clone, Default)]
pub struct SearchDocument {
    /// Resolved page URL, when the document has one.
    pub url: Option<String>,
    /// Display title.
    pub title: Option<String>,
    /// Short description.
    pub description: Option<String>,
    /// Tags, empty when the source field was absent or not a string list.
    pub tags: BTreeSet<String>,
    /// Raw markdown body.
    pub body: String,
    /// Publish date.
    pub date: Option<NaiveDate>,
    /// Draft flag.
    pub draft: bool,
}

impl SearchDocument {
    /// Build a document from its config and raw body, with `fallback_url`
    /// used when the config carries no explicit URL.
    pub fn from_parts(
        fallback_url: Option<String>,
        config: &DocConfig,
        body: impl Into<String>,
    ) -> Self {
        Self {
            url: config
                .url
                .clone()
                .or(fallback_url)
                .filter(|u| !u.is_empty()),
            title: config.title.clone(),
            description: config.description.clone(),
            tags: config.tag_set(),
            body: body.into(),
            date: config.date,
            draft: config.draft,
        }
    }

    fn has_allowed_tag(&self) -> bool {
        self.tags
            .iter()
            .any(|tag| ALLOWED_TAGS.contains(&tag.as_str()))
    }
}

// ---------------------------------------------------------------------------
// SearchRecord
// ---------------------------------------------------------------------------

/// Flat, fulltext-searchable record for one live document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRecord {
    /// Unique record id: `{url}#{lang}`.
    #[serde(rename = "objectID")]
    pub object_id: String,
    /// Record language.
    pub lang: String,
    /// Document title.
    pub title: String,
    /// Short description, omitted when the document has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Markdown-stripped body content.
    pub fulltext: String,
    /// Document tags.
    pub tags: Vec<String>,
}

// ---------------------------------------------------------------------------
// Collector
// ---------------------------------------------------------------------------

/// Convert a document collection into search records.
///
/// A record is emitted only for documents that simultaneously: carry at
/// least one of [`ALLOWED_TAGS`], have a non-empty title and URL, and pass
/// the supplied liveness predicate. Everything else is silently excluded.
pub fn build_search_index<F>(
    documents: &[SearchDocument],
    is_live: F,
    lang: &str,
) -> Vec<SearchRecord>
where
    F: Fn(&SearchDocument) -> bool,
{
    let records: Vec<SearchRecord> = documents
        .iter()
        .filter(|doc| doc.has_allowed_tag())
        .filter(|doc| doc.title.as_deref().is_some_and(|t| !t.is_empty()))
        .filter(|doc| doc.url.as_deref().is_some_and(|u| !u.is_empty()))
        .filter(|doc| is_live(doc))
        .filter_map(|doc| to_record(doc, lang))
        .collect();

    debug!(
        input = documents.len(),
        indexed = records.len(),
        "search collection built"
    );
    records
}

fn to_record(doc: &SearchDocument, lang: &str) -> Option<SearchRecord> {
    let title = doc.title.clone().filter(|t| !t.is_empty())?;
    let url = doc.url.as_deref().filter(|u| !u.is_empty())?;

    Some(SearchRecord {
        object_id: format!("{url}#{lang}"),
        lang: lang.to_string(),
        title,
        description: doc.description.clone(),
        fulltext: guidegen_markdown::strip(&doc.body),
        tags: doc.tags.iter().cloned().collect(),
    })
}
