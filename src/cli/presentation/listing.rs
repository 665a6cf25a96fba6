//! Listing presentation: diff records, one directory, and the expanded tree.

use super::shared::{format_section_heading, status_code};
use crate::diff::{summarize, DiffStatus};
use crate::error::ApiError;
use crate::fs::FileType;
use crate::tree::{path, PathTrie};
use crate::view::merge::locale_compare;
use crate::view::TreeItem;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde::Serialize;
use serde_json::json;
use std::path::Path;

/// An item with its expanded children
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    #[serde(flatten)]
    pub item: TreeItem,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

/// One change, renames reported once under their new path
#[derive(Debug, Serialize)]
struct ChangeRow {
    path: String,
    status: DiffStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<String>,
}

fn change_rows(trie: &PathTrie, left_root: &Path, right_root: &Path) -> Vec<ChangeRow> {
    let left_prefix = path::path_to_posix(left_root);
    let right_prefix = path::path_to_posix(right_root);
    let mut rows: Vec<ChangeRow> = trie
        .records()
        .into_iter()
        .filter_map(|(key, record)| match record.status() {
            DiffStatus::Unchanged => None,
            DiffStatus::Renamed => {
                let new_key = record
                    .right_path()
                    .and_then(|p| path::strip_prefix(p, &right_prefix));
                if new_key.as_deref() != Some(key.as_str()) {
                    return None;
                }
                let from = record
                    .left_path()
                    .and_then(|p| path::strip_prefix(p, &left_prefix));
                Some(ChangeRow {
                    path: key,
                    status: DiffStatus::Renamed,
                    from,
                })
            }
            status => Some(ChangeRow {
                path: key,
                status,
                from: None,
            }),
        })
        .collect();
    rows.sort_by(|a, b| locale_compare(&a.path, &b.path));
    rows
}

pub fn format_diff_text(
    trie: &PathTrie,
    left_root: &Path,
    right_root: &Path,
    color: bool,
) -> String {
    let rows = change_rows(trie, left_root, right_root);
    if rows.is_empty() {
        return "No differences".to_string();
    }
    let summary = summarize(trie);

    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Changes", color)));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Status", "Path", "From"]);
    for row in &rows {
        table.add_row(vec![
            row.status.code().to_string(),
            row.path.clone(),
            row.from.clone().unwrap_or_default(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!(
        "{} added, {} deleted, {} modified, {} renamed",
        summary.added, summary.deleted, summary.modified, summary.renamed
    ));
    out
}

pub fn format_diff_json(
    trie: &PathTrie,
    left_root: &Path,
    right_root: &Path,
) -> Result<String, ApiError> {
    let out = json!({
        "left": left_root,
        "right": right_root,
        "summary": summarize(trie),
        "changes": change_rows(trie, left_root, right_root),
    });
    Ok(serde_json::to_string_pretty(&out)?)
}

fn item_line(item: &TreeItem, color: bool) -> String {
    let suffix = if item.file_type == FileType::Directory {
        "/"
    } else {
        ""
    };
    format!("{} {}{}", status_code(item.status, color), item.label, suffix)
}

pub fn format_listing_text(items: &[TreeItem], color: bool) -> String {
    if items.is_empty() {
        return "(empty)".to_string();
    }
    items
        .iter()
        .map(|item| item_line(item, color))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_listing_json(dir: &str, items: &[TreeItem]) -> Result<String, ApiError> {
    let out = json!({ "dir": dir, "entries": items });
    Ok(serde_json::to_string_pretty(&out)?)
}

pub fn format_tree_text(nodes: &[TreeNode], color: bool) -> String {
    let mut out = String::from(".");
    push_tree_lines(&mut out, nodes, 1, color);
    out
}

fn push_tree_lines(out: &mut String, nodes: &[TreeNode], depth: usize, color: bool) {
    for node in nodes {
        out.push('\n');
        out.push_str(&"  ".repeat(depth));
        out.push_str(&item_line(&node.item, color));
        push_tree_lines(out, &node.children, depth + 1, color);
    }
}

pub fn format_tree_json(nodes: &[TreeNode]) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(nodes)?)
}
