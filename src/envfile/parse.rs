//! Line parsing policies
//!
//! Two deliberately separate policies live here. The merge parser
//! (`parse_assignment`) is strict: no whitespace around `=`, no inline
//! comment stripping, quote pairs must use the same character. The validator
//! parser (`parse_lookup`) is lenient: whitespace around `=` is accepted, an
//! unquoted trailing `#...` comment is dropped, and mixed quote pairs are
//! stripped. Their differences are load-bearing; do not unify them.

use once_cell::sync::Lazy;
use regex::Regex;

use super::FileStyle;

/// A recognized `KEY=VALUE` line under the merge policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Key exactly as written.
    pub key: String,
    /// Quote-stripped value, used only to decide whether the key is set.
    pub value: String,
    /// Normalized output line: optional `export ` prefix, key, `=`, and the
    /// raw (possibly quoted) value text.
    pub rendered: String,
}

impl Assignment {
    /// Whether the value is non-empty after quote stripping.
    pub fn is_set(&self) -> bool {
        !self.value.is_empty()
    }
}

/// Parse a line under the merge policy.
///
/// Returns `None` for blank lines, comments, and anything that does not match
/// `KEY=VALUE` with the key flush against the `=`. In `Export` style a leading
/// `export ` prefix is stripped before matching and re-attached to `rendered`.
pub fn parse_assignment(line: &str, style: FileStyle) -> Option<Assignment> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (prefix, content) = if style == FileStyle::Export && line.starts_with("export ") {
        ("export ", line["export ".len()..].trim())
    } else {
        ("", line)
    };

    let eq = content.find('=')?;
    let key = &content[..eq];
    if !is_key(key) {
        return None;
    }

    let raw_value = content[eq + 1..].trim();
    Some(Assignment {
        key: key.to_string(),
        value: strip_matching_quotes(raw_value).to_string(),
        rendered: format!("{prefix}{key}={raw_value}"),
    })
}

static LOOKUP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^\s*(?:export\s+)?([A-Z_][A-Z0-9_]*)\s*=\s*((?:".*?"|'.*?'|[^#\n]*)?)\s*(?:#.*)?$"#)
        .expect("valid regex")
});

/// Parse a line under the validator policy.
///
/// Returns the key exactly as written (lookups stay case-sensitive even
/// though the pattern itself is case-insensitive) and the trimmed,
/// quote-stripped value.
pub fn parse_lookup(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let caps = LOOKUP_RE.captures(line)?;
    let key = caps.get(1).map(|m| m.as_str())?.to_string();
    let raw_value = caps.get(2).map(|m| m.as_str()).unwrap_or("").trim();
    Some((key, strip_any_quotes(raw_value).trim().to_string()))
}

fn is_key(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Merge-policy quote stripping: both ends must carry the same quote
/// character. A value that is a lone quote character strips to empty.
fn strip_matching_quotes(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if raw.starts_with(quote) && raw.ends_with(quote) {
            return if raw.len() >= 2 { &raw[1..raw.len() - 1] } else { "" };
        }
    }
    raw
}

/// Validator-policy quote stripping: any leading quote paired with any
/// trailing quote is removed, mixed pairs included.
fn strip_any_quotes(raw: &str) -> &str {
    let starts = raw.starts_with('"') || raw.starts_with('\'');
    let ends = raw.ends_with('"') || raw.ends_with('\'');
    if starts && ends {
        if raw.len() >= 2 { &raw[1..raw.len() - 1] } else { "" }
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_basic() {
        let a = parse_assignment("FOO=bar", FileStyle::Plain).expect("recognized");
        assert_eq!(a.key, "FOO");
        assert_eq!(a.value, "bar");
        assert_eq!(a.rendered, "FOO=bar");
        assert!(a.is_set());
    }

    #[test]
    fn assignment_blank_and_comment_unrecognized() {
        assert!(parse_assignment("", FileStyle::Plain).is_none());
        assert!(parse_assignment("   ", FileStyle::Plain).is_none());
        assert!(parse_assignment("# FOO=bar", FileStyle::Plain).is_none());
        assert!(parse_assignment("  # indented comment", FileStyle::Plain).is_none());
    }

    #[test]
    fn assignment_rejects_spaces_around_equals() {
        assert!(parse_assignment("FOO = bar", FileStyle::Plain).is_none());
        assert!(parse_assignment("FOO =bar", FileStyle::Plain).is_none());
    }

    #[test]
    fn assignment_rejects_bad_keys() {
        assert!(parse_assignment("1FOO=bar", FileStyle::Plain).is_none());
        assert!(parse_assignment("FOO.BAR=bar", FileStyle::Plain).is_none());
        assert!(parse_assignment("=bar", FileStyle::Plain).is_none());
        assert!(parse_assignment("no equals sign here", FileStyle::Plain).is_none());
    }

    #[test]
    fn assignment_export_prefix_stripped_and_rendered() {
        let a = parse_assignment("export DB_URL=postgres://x", FileStyle::Export)
            .expect("recognized");
        assert_eq!(a.key, "DB_URL");
        assert_eq!(a.value, "postgres://x");
        assert_eq!(a.rendered, "export DB_URL=postgres://x");
    }

    #[test]
    fn assignment_export_prefix_extra_spaces() {
        let a = parse_assignment("export   DB_URL=x", FileStyle::Export).expect("recognized");
        assert_eq!(a.rendered, "export DB_URL=x");
    }

    #[test]
    fn assignment_export_line_unrecognized_in_plain_style() {
        assert!(parse_assignment("export FOO=bar", FileStyle::Plain).is_none());
    }

    #[test]
    fn assignment_without_prefix_ok_in_export_style() {
        let a = parse_assignment("FOO=bar", FileStyle::Export).expect("recognized");
        assert_eq!(a.rendered, "FOO=bar");
    }

    #[test]
    fn assignment_quoted_values_checked_unquoted_kept_raw() {
        let a = parse_assignment(r#"MSG="hello world""#, FileStyle::Plain).expect("recognized");
        assert_eq!(a.value, "hello world");
        assert_eq!(a.rendered, r#"MSG="hello world""#);
        assert!(a.is_set());

        let a = parse_assignment("MSG='hi'", FileStyle::Plain).expect("recognized");
        assert_eq!(a.value, "hi");
        assert_eq!(a.rendered, "MSG='hi'");
    }

    #[test]
    fn assignment_empty_quotes_are_empty() {
        assert!(!parse_assignment(r#"A="""#, FileStyle::Plain).unwrap().is_set());
        assert!(!parse_assignment("A=''", FileStyle::Plain).unwrap().is_set());
        // a lone quote character strips to empty too
        assert!(!parse_assignment(r#"A=""#, FileStyle::Plain).unwrap().is_set());
    }

    #[test]
    fn assignment_keeps_inline_comment_in_value() {
        // no comment stripping under the merge policy
        let a = parse_assignment("A=b # note", FileStyle::Plain).expect("recognized");
        assert_eq!(a.value, "b # note");
    }

    #[test]
    fn assignment_value_may_contain_equals() {
        let a = parse_assignment("A=b=c", FileStyle::Plain).expect("recognized");
        assert_eq!(a.key, "A");
        assert_eq!(a.value, "b=c");
    }

    #[test]
    fn lookup_accepts_spaces_around_equals() {
        let (key, value) = parse_lookup("FOO = bar").expect("recognized");
        assert_eq!(key, "FOO");
        assert_eq!(value, "bar");
    }

    #[test]
    fn lookup_strips_trailing_comment() {
        let (_, value) = parse_lookup("FOO=bar # comment").expect("recognized");
        assert_eq!(value, "bar");
    }

    #[test]
    fn lookup_keeps_hash_inside_quotes() {
        let (_, value) = parse_lookup(r#"FOO="bar # not a comment""#).expect("recognized");
        assert_eq!(value, "bar # not a comment");
    }

    #[test]
    fn lookup_preserves_key_case() {
        let (key, _) = parse_lookup("lower_case=1").expect("recognized");
        assert_eq!(key, "lower_case");
    }

    #[test]
    fn lookup_accepts_export_prefix() {
        let (key, value) = parse_lookup("export FOO=bar").expect("recognized");
        assert_eq!(key, "FOO");
        assert_eq!(value, "bar");
    }

    #[test]
    fn lookup_strips_mixed_quote_pairs() {
        let (_, value) = parse_lookup(r#"FOO="bar'"#).expect("recognized");
        assert_eq!(value, "bar");
    }

    #[test]
    fn lookup_skips_comments_and_blanks() {
        assert!(parse_lookup("# FOO=bar").is_none());
        assert!(parse_lookup("   ").is_none());
    }

    #[test]
    fn lookup_empty_value() {
        let (_, value) = parse_lookup("FOO=").expect("recognized");
        assert_eq!(value, "");
    }
}
