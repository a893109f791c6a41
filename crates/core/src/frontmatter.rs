//! YAML frontmatter helpers for workspace markdown files.
//!
//! Skill descriptors, tool descriptors, people and meeting notes all start
//! with an optional `---` fenced YAML block.

use serde::de::DeserializeOwned;

/// Split a document into its frontmatter block (without fences) and body.
///
/// Returns `None` when the document has no leading `---` fence or the fence
/// is never closed.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let rest = content
        .strip_prefix("---\r\n")
        .or_else(|| content.strip_prefix("---\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml.trim_end_matches(['\r', '\n']), body));
        }
        offset += line.len();
    }
    None
}

/// Parse the frontmatter of `content` into `T`.
///
/// Returns `Ok(None)` when there is no frontmatter, and the YAML error
/// message when the block does not deserialize.
pub fn parse<T: DeserializeOwned>(content: &str) -> Result<Option<T>, String> {
    match split(content) {
        None => Ok(None),
        Some((yaml, _)) if yaml.trim().is_empty() => Ok(None),
        Some((yaml, _)) => serde_yaml::from_str(yaml).map(Some).map_err(|e| e.to_string()),
    }
}

/// The document with any frontmatter removed.
pub fn body(content: &str) -> &str {
    split(content).map(|(_, body)| body).unwrap_or(content)
}
