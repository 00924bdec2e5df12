use std::path::Path;

/// Flatten extracted text onto one line
///
/// Line feeds become spaces, carriage returns are dropped and the leading
/// indentation is removed. Extraction output keeps hard breaks at every
/// visual line, which would otherwise glue words across lines.
pub fn remove_breaks_and_dedent(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push(' '),
            '\r' => {}
            '\t' => out.push_str("        "),
            _ => out.push(c),
        }
    }
    let trimmed = out.trim_start();
    if trimmed.len() == out.len() {
        out
    } else {
        trimmed.to_string()
    }
}

/// Strip line feeds without inserting separators
/// Matches how stored proposal texts are read back before ranking.
pub fn strip_line_feeds(text: &str) -> String {
    text.replace('\n', "")
}

/// File or blob name without directory and last extension
pub fn file_stem(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
}

/// `<stem>.<ext>` for a file or blob name
pub fn with_extension(name: &str, ext: &str) -> String {
    format!("{}.{}", file_stem(name), ext)
}
