//! Title resolution over untyped rich-text content
//!
//! Task and photo records bury their human-readable text in deeply nested,
//! optionally HTML-bearing content trees whose shape differs by dialect and
//! by task kind. `resolve_title` folds whatever it is given into a plain
//! display string: it is total (never empty for a node with an identifier),
//! idempotent, and bounded so cyclic or pathological nesting terminates.

use crate::constants::richtext::{MAX_CONTENT_DEPTH, UNKNOWN_TASK_TITLE};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Resolve a display title for a task-like node.
///
/// Candidate fields in priority order: the short-form `intro` string, the
/// recursive `content` tree, the long-form `introLong`/`title`/`text`/
/// `question` fields, the node's own `id`, and finally the literal
/// "Unknown task" fallback.
pub fn resolve_title(node: &Value) -> String {
    if let Some(title) = field_as_text(node, "intro") {
        return title;
    }
    if let Some(content) = node.get("content")
        && let Some(title) = fold_content(content, 0)
    {
        return title;
    }
    for field in ["introLong", "title", "text", "question"] {
        if let Some(title) = field_as_text(node, field) {
            return title;
        }
    }
    if let Some(id) = node.get("id") {
        let id_text = match id {
            Value::String(s) => clean_text(s),
            other => clean_text(&other.to_string()),
        };
        if let Some(text) = id_text {
            return text;
        }
    }
    UNKNOWN_TASK_TITLE.to_string()
}

/// Resolve free-standing rich-text content (an intro/outro blob, a caption)
/// without the task-field priority walk. Returns None when nothing readable
/// remains.
pub fn resolve_text(node: &Value) -> Option<String> {
    fold_content(node, 0)
}

/// Pull a field off the node and clean it, accepting either a plain string
/// or a nested content shape.
fn field_as_text(node: &Value, field: &str) -> Option<String> {
    fold_content(node.get(field)?, 0)
}

/// Structural fold over a content tree: strings are cleaned leaves, objects
/// defer to their nested `text`/`title`/`content`, lists join their resolved
/// children with single spaces. Depth is bounded; anything past the limit
/// resolves to nothing instead of recursing further.
fn fold_content(node: &Value, depth: usize) -> Option<String> {
    if depth >= MAX_CONTENT_DEPTH {
        return None;
    }
    match node {
        Value::String(s) => clean_text(s),
        Value::Object(map) => {
            for key in ["text", "title", "content"] {
                if let Some(child) = map.get(key)
                    && let Some(text) = fold_content(child, depth + 1)
                {
                    return Some(text);
                }
            }
            None
        }
        Value::Array(children) => {
            let parts: Vec<String> = children
                .iter()
                .filter_map(|child| fold_content(child, depth + 1))
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(" "))
            }
        }
        _ => None,
    }
}

/// Strip markup tags and collapse whitespace; returns None when nothing
/// readable remains.
fn clean_text(raw: &str) -> Option<String> {
    let stripped = TAG_RE.replace_all(raw, " ");
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}
