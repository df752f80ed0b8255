//! Per-path guide listing: one path's guide tree, rendered with its topic
//! grouping intact (unlike the audit report's fully flat form).

use tracing::{info, instrument};

use guidegen_loader::ContentLoader;
use guidegen_render::TemplateRenderer;
use guidegen_shared::{BuildContext, GuideTree, Result};

use crate::resolver::resolve_guide_tree;

/// Template the path listing renders through.
pub const PATH_INDEX_TEMPLATE: &str = "path-guidelist.md";

/// Rendered listing for one path.
#[derive(Debug)]
pub struct PathIndexReport {
    /// The path id the listing was built for.
    pub path_id: String,
    /// Rendered markdown.
    pub content: String,
    /// The resolved guide tree, grouping preserved.
    pub categories: GuideTree,
}

/// Build the guide listing for the single path named by `basename(cf.dir)`.
#[instrument(skip_all, fields(dir = %cf.dir, locale))]
pub async fn build_path_index<L, R>(
    loader: &L,
    renderer: &R,
    cf: &BuildContext,
    locale: &str,
) -> Result<PathIndexReport>
where
    L: ContentLoader,
    R: TemplateRenderer,
{
    let path_id = cf.basename().to_string();
    let categories = resolve_guide_tree(loader, locale, &path_id).await?;

    let content = renderer.render(
        PATH_INDEX_TEMPLATE,
        serde_json::json!({ "categories": &categories }),
    )?;

    info!(path_id, topics = categories.len(), "path index built");
    Ok(PathIndexReport {
        path_id,
        content,
        categories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidegen_loader::MemoryLoader;
    use guidegen_render::JinjaRenderer;

    #[tokio::test]
    async fn renders_grouped_listing_for_one_path() {
        let mut loader = MemoryLoader::new();
        loader
            .insert(
                "en/path/learn/guides.yaml",
                r#"
topics:
  - title: Basics
    guides:
      - intro
  - title: Performance
    guides:
      - metrics
"#,
            )
            .insert("en/path/learn/intro/index.md", "---\ntitle: Introduction\n---\n")
            .insert("en/path/learn/metrics/index.md", "---\ntitle: Metrics\n---\n");

        let renderer = JinjaRenderer::new();
        let cf = BuildContext::new("en/path/learn");

        let report = build_path_index(&loader, &renderer, &cf, "en")
            .await
            .unwrap();

        assert_eq!(report.path_id, "learn");
        assert_eq!(report.categories.len(), 2);
        assert!(report.content.contains("## 1. Basics"));
        assert!(report.content.contains("## 2. Performance"));
        assert!(report.content.contains("[Introduction](./intro/)"));
        assert!(report.content.contains("[Metrics](./metrics/)"));
    }

    #[tokio::test]
    async fn unknown_path_renders_an_empty_listing() {
        let loader = MemoryLoader::new();
        let renderer = JinjaRenderer::new();
        let cf = BuildContext::new("en/path/ghost");

        let report = build_path_index(&loader, &renderer, &cf, "en")
            .await
            .unwrap();

        assert_eq!(report.path_id, "ghost");
        assert!(report.categories.is_empty());
        assert!(report.content.trim().is_empty());
    }
}
