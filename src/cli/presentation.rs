//! CLI presentation: text and json formatters per command family.

mod listing;
mod shared;
mod show;

pub use listing::{
    format_diff_json, format_diff_text, format_listing_json, format_listing_text,
    format_tree_json, format_tree_text, TreeNode,
};
pub use show::format_show_output;
pub use shared::use_color;
