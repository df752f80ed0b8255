//! Core domain types for guidegen builds.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DocConfig
// ---------------------------------------------------------------------------

/// Structured metadata attached to a content document.
///
/// For `.md` documents this is the YAML front matter; for `.yaml` documents
/// (such as a path's `guides.yaml`) it is the whole file. Unknown keys are
/// ignored, and a document without front matter gets the empty default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocConfig {
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Short description, used by the search index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordered topic groupings (only meaningful on a `guides.yaml`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<TopicConfig>,

    /// Identifiers tying a guide to automated audit checks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lighthouse_ids: Vec<String>,

    /// Raw tags value. Kept loosely typed on purpose: authors sometimes write
    /// a scalar here, and a non-list value must degrade to "no tags" instead
    /// of failing the whole parse. Use [`DocConfig::tag_set`] to read it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<serde_yaml::Value>,

    /// Publish date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Draft flag; drafts never go live.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub draft: bool,

    /// Explicit page URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl DocConfig {
    /// The document's tags as a set, or empty when the `tags` field is
    /// absent or not a list of strings.
    pub fn tag_set(&self) -> BTreeSet<String> {
        match &self.tags {
            Some(serde_yaml::Value::Sequence(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_owned))
                .collect(),
            _ => BTreeSet::new(),
        }
    }
}

/// One `topics:` entry inside a path's `guides.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicConfig {
    /// Topic display title.
    pub title: String,
    /// Ordered guide ids belonging to this topic.
    #[serde(default)]
    pub guides: Vec<String>,
}

// ---------------------------------------------------------------------------
// Guide tree
// ---------------------------------------------------------------------------

/// One resolved guide inside a topic.
#[derive(Debug, Clone, Serialize)]
pub struct GuideEntry {
    /// Guide id (the directory name the guide lives in).
    pub id: String,
    /// Display title, falling back to the id when the config has none.
    pub title: String,
    /// The guide's own config, passed through for downstream consumers.
    pub config: DocConfig,
}

/// One surviving topic in a path's guide tree.
///
/// `num` is a 1-based counter over surviving topics only: topics whose guides
/// all failed to resolve are dropped and never consume a number.
#[derive(Debug, Clone, Serialize)]
pub struct TopicEntry {
    /// Topic display title.
    pub title: String,
    /// Guides that resolved, in config order.
    pub guides: Vec<GuideEntry>,
    /// 1-based position among surviving topics.
    pub num: usize,
}

/// The per-path output of guide-tree resolution: surviving topics in
/// config order.
pub type GuideTree = Vec<TopicEntry>;

// ---------------------------------------------------------------------------
// AuditRecord
// ---------------------------------------------------------------------------

/// Flattened, denormalized row describing one guide's full position in the
/// path → category → guide hierarchy plus its lighthouse metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecord {
    /// Guide id.
    pub id: String,
    /// Synthesized address: `path/{pathId}/{guideId}`.
    pub url: String,
    /// Owning path's display title.
    pub path: String,
    /// Owning topic's display title.
    pub category: String,
    /// Guide display title.
    pub title: String,
    /// Lighthouse audit ids, empty when the guide's config has none.
    pub lighthouse: Vec<String>,
}

// ---------------------------------------------------------------------------
// BuildContext
// ---------------------------------------------------------------------------

/// The "current file" context a generator runs under: the directory key of
/// the document that triggered the build, relative to the corpus root.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Directory key, e.g. `en` for the audit report or `en/path/learn` for
    /// a single path's index.
    pub dir: String,
}

impl BuildContext {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: dir.into() }
    }

    /// Final segment of the directory key.
    pub fn basename(&self) -> &str {
        self.dir.rsplit('/').next().unwrap_or(&self.dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_config_tolerates_unknown_keys() {
        let yaml = r#"
title: Fast load times
web_lighthouse: N/A
hero: hero.jpg
"#;
        let config: DocConfig = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(config.title.as_deref(), Some("Fast load times"));
        assert!(config.topics.is_empty());
    }

    #[test]
    fn tag_set_requires_a_string_list() {
        let listed: DocConfig = serde_yaml::from_str("tags:\n  - post\n  - perf\n").unwrap();
        let tags = listed.tag_set();
        assert!(tags.contains("post"));
        assert!(tags.contains("perf"));

        let scalar: DocConfig = serde_yaml::from_str("tags: post\n").unwrap();
        assert!(scalar.tag_set().is_empty());

        let absent = DocConfig::default();
        assert!(absent.tag_set().is_empty());
    }

    #[test]
    fn topics_parse_in_order() {
        let yaml = r#"
topics:
  - title: Basics
    guides:
      - intro
      - setup
  - title: Going deeper
    guides:
      - metrics
"#;
        let config: DocConfig = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(config.topics.len(), 2);
        assert_eq!(config.topics[0].title, "Basics");
        assert_eq!(config.topics[0].guides, vec!["intro", "setup"]);
        assert_eq!(config.topics[1].guides, vec!["metrics"]);
    }

    #[test]
    fn date_and_draft_parse() {
        let yaml = "title: Post\ndate: 2019-06-24\ndraft: true\n";
        let config: DocConfig = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(
            config.date,
            Some(NaiveDate::from_ymd_opt(2019, 6, 24).unwrap())
        );
        assert!(config.draft);
    }

    #[test]
    fn build_context_basename() {
        assert_eq!(BuildContext::new("en/path/learn").basename(), "learn");
        assert_eq!(BuildContext::new("en").basename(), "en");
    }
}
