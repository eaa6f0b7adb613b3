use crate::error::{Error, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Windows reserved filenames that cannot be used
const WINDOWS_RESERVED: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Extension used when neither the suggestion nor the source has one.
const FALLBACK_EXTENSION: &str = "mp4";

/// Longest stem kept, in bytes. Leaves room under the common 255-byte name
/// limit for a `-N` suffix and the extension.
pub const MAX_STEM_BYTES: usize = 200;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/\\<>:"|?*\x00-\x1f\x7f]"#).expect("valid regex"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Turn a model suggestion into a single safe file name for `source`.
///
/// Keeps the first non-empty line, strips quoting, replaces separators and
/// characters that are invalid on common filesystems, and appends the
/// source's extension if the suggestion has none.
pub fn sanitize_suggestion(suggestion: &str, source: &Path) -> Result<String> {
    let line = suggestion
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();

    let unquoted = line
        .trim_matches(|c| matches!(c, '"' | '\'' | '`' | '\u{201c}' | '\u{201d}'))
        .trim();
    let collapsed = WHITESPACE.replace_all(unquoted, " ");
    let replaced = UNSAFE_CHARS.replace_all(&collapsed, "-");
    let name = replaced.trim_matches(['.', ' ']);

    if name.chars().all(|c| c == '-' || c == '.') {
        return Err(Error::EmptySuggestion(suggestion.to_string()));
    }

    let (stem, ext) = split_extension(name).unwrap_or_else(|| {
        let ext = source
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or(FALLBACK_EXTENSION);
        (name, ext)
    });

    Ok(avoid_reserved(format!("{}.{ext}", truncate_stem(stem))))
}

/// Cut `stem` to at most [`MAX_STEM_BYTES`] on a char boundary.
fn truncate_stem(stem: &str) -> &str {
    if stem.len() <= MAX_STEM_BYTES {
        return stem;
    }
    let mut end = MAX_STEM_BYTES;
    while !stem.is_char_boundary(end) {
        end -= 1;
    }
    stem[..end].trim_end_matches(['.', ' '])
}

/// Split `name` into stem and a plausible extension (short, alphanumeric).
fn split_extension(name: &str) -> Option<(&str, &str)> {
    let (stem, ext) = name.rsplit_once('.')?;
    let plausible = !stem.is_empty()
        && (1..=5).contains(&ext.len())
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    plausible.then_some((stem, ext))
}

/// Check if a filename is a Windows reserved name
/// Always checks regardless of platform to ensure cross-platform compatibility
pub fn is_windows_reserved(name: &str) -> bool {
    let base = name.split('.').next().unwrap_or(name).trim().to_uppercase();
    WINDOWS_RESERVED.contains(&base.as_str())
}

fn avoid_reserved(name: String) -> String {
    if !is_windows_reserved(&name) {
        return name;
    }
    match name.split_once('.') {
        Some((stem, rest)) => format!("{stem}_.{rest}"),
        None => format!("{name}_"),
    }
}
