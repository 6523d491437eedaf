use regex::Regex;
use std::sync::LazyLock;

static RESERVED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/*?:"<>|]"#).expect("valid regex"));

/// Replace characters that are not allowed in file names on common
/// platforms with `_`. Everything else, including spaces and non-ASCII text,
/// is left alone.
pub fn sanitize_filename(name: &str) -> String {
    RESERVED.replace_all(name, "_").into_owned()
}

/// `"{index:02}_{sanitized title}.pdf"`
pub fn section_filename(index: usize, title: &str) -> String {
    format!("{:02}_{}.pdf", index, sanitize_filename(title))
}
