//! Show presentation: the content an entry opens.

use std::path::PathBuf;

/// Content of each opened side under a `==> path <==` banner
pub fn format_show_output(title: Option<&str>, sides: &[(PathBuf, Vec<u8>)]) -> String {
    let mut parts = Vec::new();
    if let Some(title) = title {
        parts.push(title.to_string());
    }
    for (path, content) in sides {
        let text = String::from_utf8_lossy(content);
        parts.push(format!("==> {} <==\n{}", path.display(), text.trim_end_matches('\n')));
    }
    parts.join("\n\n")
}
