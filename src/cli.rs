//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; a single route table dispatches to the session.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_diff_json, format_diff_text, format_listing_json, format_listing_text,
    format_show_output, format_tree_json, format_tree_text, use_color, TreeNode,
};
pub use route::RunContext;
