//! Guide-tree resolution: one path id → ordered topics → resolved guides.
//!
//! This is the shared heart of both generators. Resolution is lazy and
//! tolerant of partial availability: missing documents shrink the tree, they
//! never fail the build.

use futures::future;
use tracing::{debug, instrument};

use guidegen_loader::{ContentDocument, ContentLoader};
use guidegen_shared::{GuideEntry, GuideTree, Result, TopicEntry};

/// Resolve the ordered guide tree for one path.
///
/// Fetches `{locale}/path/{path_id}/guides.yaml` and, for each topic in
/// config order, every listed guide at `{dir}/{guide_id}/index.md`. Guide
/// fetches within a topic run concurrently but land in fixed-order slots
/// matching config order, so the output never depends on completion order.
///
/// Missing content is not an error: no `guides.yaml` yields an empty tree,
/// an unresolvable guide is dropped from its topic, and a topic with no
/// surviving guides is dropped without consuming a number. Only broken
/// loader calls (I/O failures, invalid YAML) propagate.
#[instrument(skip_all, fields(locale, path_id))]
pub async fn resolve_guide_tree<L: ContentLoader>(
    loader: &L,
    locale: &str,
    path_id: &str,
) -> Result<GuideTree> {
    let key = format!("{locale}/path/{path_id}/guides.yaml");
    let Some(guides_yaml) = loader.get(&key).await? else {
        debug!(path_id, "no guides.yaml, empty tree");
        return Ok(Vec::new());
    };

    let config = guides_yaml.config().await?;
    let dir = guides_yaml.dir();

    let mut tree: GuideTree = Vec::new();
    let mut count = 0;

    for topic in &config.topics {
        let fetches = topic.guides.iter().map(|guide_id| async move {
            let guide_key = format!("{dir}/{guide_id}/index.md");
            let Some(doc) = loader.get(&guide_key).await? else {
                debug!(guide = %guide_id, "guide missing, skipping");
                return Ok(None);
            };

            let config = doc.config().await?.clone();
            let title = config.title.clone().unwrap_or_else(|| guide_id.clone());
            Ok(Some(GuideEntry {
                id: guide_id.clone(),
                title,
                config,
            }))
        });

        // Fixed-order slots: join_all preserves config order; unresolved
        // guides are filtered only after the whole level settles.
        let guides: Vec<GuideEntry> = future::join_all(fetches)
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect();

        if !guides.is_empty() {
            count += 1;
            tree.push(TopicEntry {
                title: topic.title.clone(),
                guides,
                num: count,
            });
        }
    }

    debug!(path_id, topics = tree.len(), "guide tree resolved");
    Ok(tree)
}
