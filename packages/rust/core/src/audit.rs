//! Corpus-wide guide audit: every path's guide tree, flattened into one
//! denormalized record list and rendered as a single report.

use tracing::{info, instrument};

use guidegen_loader::{ContentDocument, ContentLoader};
use guidegen_render::TemplateRenderer;
use guidegen_shared::{AuditRecord, BuildContext, Result};

use crate::resolver::resolve_guide_tree;

/// Template the audit report renders through.
pub const AUDIT_TEMPLATE: &str = "auditguides.md";

/// Rendered audit report plus the flattened records behind it.
#[derive(Debug)]
pub struct AuditReport {
    /// Rendered markdown.
    pub content: String,
    /// One record per resolved guide, in path → topic → guide order.
    pub records: Vec<AuditRecord>,
}

/// Build the audit report covering every path under `{cf.dir}/path/`.
///
/// Flattening preserves cardinality: each resolved guide contributes exactly
/// one record, and no cross-path deduplication is performed. A glob with
/// zero matches yields an empty (but still rendered) report.
#[instrument(skip_all, fields(dir = %cf.dir, locale))]
pub async fn build_audit<L, R>(
    loader: &L,
    renderer: &R,
    cf: &BuildContext,
    locale: &str,
) -> Result<AuditReport>
where
    L: ContentLoader,
    R: TemplateRenderer,
{
    // pathId → pathTitle, in listing order.
    let pattern = format!("{}/path/*.md", cf.dir);
    let mut paths: Vec<(String, String)> = Vec::new();
    for doc in loader.contents(&pattern).await? {
        let title = doc
            .config()
            .await?
            .title
            .clone()
            .unwrap_or_else(|| doc.name().to_string());
        paths.push((doc.name().to_string(), title));
    }

    let mut records = Vec::new();
    for (path_id, path_title) in &paths {
        let tree = resolve_guide_tree(loader, locale, path_id).await?;
        for topic in &tree {
            for guide in &topic.guides {
                records.push(AuditRecord {
                    id: guide.id.clone(),
                    url: format!("path/{path_id}/{}", guide.id),
                    path: path_title.clone(),
                    category: topic.title.clone(),
                    title: guide.title.clone(),
                    lighthouse: guide.config.lighthouse_ids.clone(),
                });
            }
        }
    }

    let content = renderer.render(AUDIT_TEMPLATE, serde_json::json!({ "guides": &records }))?;

    info!(
        paths = paths.len(),
        guides = records.len(),
        "audit report built"
    );
    Ok(AuditReport { content, records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidegen_loader::MemoryLoader;
    use guidegen_render::JinjaRenderer;

    fn corpus() -> MemoryLoader {
        let mut loader = MemoryLoader::new();
        loader
            .insert("en/path/learn.md", "---\ntitle: Learn\n---\n")
            .insert("en/path/measure.md", "---\ntitle: Measure\n---\n")
            .insert(
                "en/path/learn/guides.yaml",
                "topics:\n  - title: Basics\n    guides:\n      - intro\n",
            )
            .insert(
                "en/path/learn/intro/index.md",
                "---\ntitle: Introduction\nlighthouse_ids:\n  - first-contentful-paint\n---\n",
            )
            .insert(
                "en/path/measure/guides.yaml",
                "topics:\n  - title: Get started\n    guides:\n      - first-audit\n",
            )
            .insert(
                "en/path/measure/first-audit/index.md",
                "---\ntitle: Your first audit\n---\n",
            );
        loader
    }

    #[tokio::test]
    async fn flattens_every_path_into_records() {
        let loader = corpus();
        let renderer = JinjaRenderer::new();
        let cf = BuildContext::new("en");

        let report = build_audit(&loader, &renderer, &cf, "en").await.unwrap();

        assert_eq!(report.records.len(), 2);
        let urls: Vec<&str> = report.records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["path/learn/intro", "path/measure/first-audit"]);

        let first = &report.records[0];
        assert_eq!(first.path, "Learn");
        assert_eq!(first.category, "Basics");
        assert_eq!(first.title, "Introduction");
        assert_eq!(first.lighthouse, vec!["first-contentful-paint"]);

        assert!(report.content.contains("[Introduction](/path/learn/intro)"));
        assert!(report.content.contains("[Your first audit](/path/measure/first-audit)"));
    }

    #[tokio::test]
    async fn lighthouse_defaults_to_empty() {
        let loader = corpus();
        let renderer = JinjaRenderer::new();
        let cf = BuildContext::new("en");

        let report = build_audit(&loader, &renderer, &cf, "en").await.unwrap();
        let measure = report
            .records
            .iter()
            .find(|r| r.id == "first-audit")
            .unwrap();
        assert!(measure.lighthouse.is_empty());
    }

    #[tokio::test]
    async fn flattening_preserves_cardinality() {
        let mut loader = corpus();
        // A second topic under learn with two more guides.
        loader.insert(
            "en/path/learn/guides.yaml",
            r#"
topics:
  - title: Basics
    guides:
      - intro
  - title: Performance
    guides:
      - metrics
      - budgets
"#,
        );
        loader.insert("en/path/learn/metrics/index.md", "---\ntitle: Metrics\n---\n");
        loader.insert("en/path/learn/budgets/index.md", "---\ntitle: Budgets\n---\n");

        let renderer = JinjaRenderer::new();
        let cf = BuildContext::new("en");
        let report = build_audit(&loader, &renderer, &cf, "en").await.unwrap();

        // 3 guides under learn + 1 under measure.
        assert_eq!(report.records.len(), 4);
    }

    #[tokio::test]
    async fn path_without_guides_yaml_contributes_nothing() {
        let mut loader = corpus();
        loader.insert("en/path/accessible.md", "---\ntitle: Accessible\n---\n");

        let renderer = JinjaRenderer::new();
        let cf = BuildContext::new("en");
        let report = build_audit(&loader, &renderer, &cf, "en").await.unwrap();

        assert_eq!(report.records.len(), 2);
        assert!(!report.records.iter().any(|r| r.path == "Accessible"));
    }

    #[tokio::test]
    async fn empty_corpus_renders_an_empty_report() {
        let loader = MemoryLoader::new();
        let renderer = JinjaRenderer::new();
        let cf = BuildContext::new("en");

        let report = build_audit(&loader, &renderer, &cf, "en").await.unwrap();
        assert!(report.records.is_empty());
        assert!(report.content.contains("0 guides"));
    }

    #[tokio::test]
    async fn path_title_falls_back_to_its_id() {
        let mut loader = MemoryLoader::new();
        loader
            .insert("en/path/untitled.md", "# No front matter\n")
            .insert(
                "en/path/untitled/guides.yaml",
                "topics:\n  - title: Only\n    guides:\n      - g\n",
            )
            .insert("en/path/untitled/g/index.md", "---\ntitle: G\n---\n");

        let renderer = JinjaRenderer::new();
        let cf = BuildContext::new("en");
        let report = build_audit(&loader, &renderer, &cf, "en").await.unwrap();

        assert_eq!(report.records[0].path, "untitled");
    }
}
