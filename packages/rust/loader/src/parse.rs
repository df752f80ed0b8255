//! Document parsing: key decomposition, front-matter splitting, and config
//! deserialization shared by every loader implementation.

use guidegen_shared::{DocConfig, GuidegenError, Result};

/// Derive `(dir, name)` from a corpus-relative key.
///
/// `en/path/learn/intro/index.md` → (`en/path/learn/intro`, `index`).
pub(crate) fn key_parts(key: &str) -> (String, String) {
    let (dir, file) = match key.rsplit_once('/') {
        Some((dir, file)) => (dir, file),
        None => ("", key),
    };
    let name = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
    (dir.to_string(), name.to_string())
}

/// Parse raw document content into `(config, body)`.
///
/// `.yaml`/`.yml` keys parse whole-file as config with an empty body. Other
/// keys split an optional `---`-delimited front-matter block from the body;
/// a document without front matter gets the default (empty) config. Only
/// syntactically-invalid YAML is an error.
pub(crate) fn parse_document(key: &str, raw: &str) -> Result<(DocConfig, String)> {
    if key.ends_with(".yaml") || key.ends_with(".yml") {
        if raw.trim().is_empty() {
            return Ok((DocConfig::default(), String::new()));
        }
        let config = serde_yaml::from_str(raw)
            .map_err(|e| GuidegenError::parse(format!("{key}: {e}")))?;
        return Ok((config, String::new()));
    }

    match split_front_matter(raw) {
        Some((front, body)) => {
            let config = if front.trim().is_empty() {
                DocConfig::default()
            } else {
                serde_yaml::from_str(front)
                    .map_err(|e| GuidegenError::parse(format!("{key}: {e}")))?
            };
            Ok((config, body.to_string()))
        }
        None => Ok((DocConfig::default(), raw.to_string())),
    }
}

/// Split `---`-delimited front matter from a markdown document.
/// Returns `None` when the document has no front-matter block.
fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix("---\n")?;
    if let Some(body) = rest.strip_prefix("---\n") {
        return Some(("", body));
    }
    if let Some(end) = rest.find("\n---\n") {
        return Some((&rest[..end], &rest[end + 5..]));
    }
    // Closing delimiter at end of file without a trailing newline.
    rest.strip_suffix("\n---").map(|front| (front, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_parts_splits_dir_and_stem() {
        assert_eq!(
            key_parts("en/path/learn/intro/index.md"),
            ("en/path/learn/intro".to_string(), "index".to_string())
        );
        assert_eq!(
            key_parts("en/path/learn.md"),
            ("en/path".to_string(), "learn".to_string())
        );
        assert_eq!(key_parts("README.md"), (String::new(), "README".to_string()));
    }

    #[test]
    fn markdown_with_front_matter() {
        let raw = "---\ntitle: Intro\n---\n\n# Intro\n\nBody text.\n";
        let (config, body) = parse_document("en/intro.md", raw).expect("parse");
        assert_eq!(config.title.as_deref(), Some("Intro"));
        assert!(body.contains("# Intro"));
        assert!(!body.contains("title:"));
    }

    #[test]
    fn markdown_without_front_matter_gets_default_config() {
        let raw = "# Plain\n\nNo metadata here.\n";
        let (config, body) = parse_document("en/plain.md", raw).expect("parse");
        assert_eq!(config, DocConfig::default());
        assert_eq!(body, raw);
    }

    #[test]
    fn empty_front_matter_block() {
        let raw = "---\n---\nBody only.\n";
        let (config, body) = parse_document("en/empty.md", raw).expect("parse");
        assert_eq!(config, DocConfig::default());
        assert_eq!(body, "Body only.\n");
    }

    #[test]
    fn unterminated_front_matter_is_treated_as_body() {
        let raw = "---\ntitle: Broken\n\nNo closing delimiter.\n";
        let (config, body) = parse_document("en/broken.md", raw).expect("parse");
        assert_eq!(config, DocConfig::default());
        assert_eq!(body, raw);
    }

    #[test]
    fn yaml_document_parses_whole_file() {
        let raw = "topics:\n  - title: Basics\n    guides:\n      - intro\n";
        let (config, body) = parse_document("en/path/learn/guides.yaml", raw).expect("parse");
        assert_eq!(config.topics.len(), 1);
        assert_eq!(config.topics[0].guides, vec!["intro"]);
        assert!(body.is_empty());
    }

    #[test]
    fn empty_yaml_document_is_default_config() {
        let (config, body) = parse_document("en/empty.yaml", "").expect("parse");
        assert_eq!(config, DocConfig::default());
        assert!(body.is_empty());
    }

    #[test]
    fn invalid_yaml_front_matter_is_an_error() {
        let raw = "---\ntitle: [unclosed\n---\nBody.\n";
        let err = parse_document("en/bad.md", raw).unwrap_err();
        assert!(err.to_string().contains("en/bad.md"));
    }
}
