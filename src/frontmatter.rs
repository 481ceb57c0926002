//! Frontmatter rendering.
//!
//! Every record becomes a YAML frontmatter block followed by the raw body:
//!
//! ```text
//! ---
//! title: "Hi"
//! slug: "hello-world"
//! date: 2023-01-02T03:04:00Z
//! description: "d"
//! keywords: ["k1"]
//! tags: ["t1","t2"]
//! draft: false
//! toc: true
//! ---
//! Body text.
//! ```
//!
//! Key order is fixed. The body is appended verbatim, without escaping.
//!
//! ## Styles
//!
//! [`RenderStyle::Hugo`] escapes quoted strings and writes proper list
//! literals. [`RenderStyle::Legacy`] reproduces the older exporter byte for
//! byte: strings are not escaped, empty lists come out as `[""]`, and tags are
//! joined with a bare comma inside a single pair of quotes (`["t1,t2"]`), so
//! Hugo sees one tag instead of several.

use crate::config::RenderStyle;
use crate::types::Record;
use chrono::SecondsFormat;

/// Frontmatter fence line.
pub const DELIMITER: &str = "---";

/// Render a record as frontmatter plus body.
pub fn render(record: &Record, style: RenderStyle) -> String {
    let (title, slug, description, keywords, tags) = match style {
        RenderStyle::Hugo => (
            quote(&record.title),
            quote(&record.slug),
            quote(&record.description),
            list(&record.keywords),
            list(&record.tags),
        ),
        RenderStyle::Legacy => (
            format!("\"{}\"", record.title),
            format!("\"{}\"", record.slug),
            format!("\"{}\"", record.description),
            format!("[\"{}\"]", record.keywords.join("\",\"")),
            format!("[\"{}\"]", record.tags.join(",")),
        ),
    };

    let lines = [
        DELIMITER.to_string(),
        format!("title: {title}"),
        format!("slug: {slug}"),
        format!("date: {}", format_date(record)),
        format!("description: {description}"),
        format!("keywords: {keywords}"),
        format!("tags: {tags}"),
        format!("draft: {}", record.draft),
        format!("toc: {}", record.toc),
        DELIMITER.to_string(),
    ];

    let mut out = lines.join("\n");
    out.push('\n');
    out.push_str(&record.body);
    out
}

/// RFC 3339 with second precision; a zero offset is written as `Z`.
fn format_date(record: &Record) -> String {
    record.date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// YAML double-quoted scalar.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => out.push_str(&format!("\\x{:02X}", c as u32)),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Flow sequence of quoted strings: `["a","b"]`, or `[]` when empty.
fn list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| quote(item)).collect();
    format!("[{}]", quoted.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{parse_frontmatter, sample_record};

    #[test]
    fn renders_sample_record() {
        let out = render(&sample_record(), RenderStyle::Hugo);
        assert_eq!(
            out,
            "---\n\
             title: \"Hi\"\n\
             slug: \"hello-world\"\n\
             date: 2023-01-02T03:04:00Z\n\
             description: \"d\"\n\
             keywords: [\"k1\"]\n\
             tags: [\"t1\",\"t2\"]\n\
             draft: false\n\
             toc: true\n\
             ---\n\
             Body text."
        );
    }

    #[test]
    fn legacy_collapses_tags_into_one_string() {
        let out = render(&sample_record(), RenderStyle::Legacy);
        assert!(out.contains("keywords: [\"k1\"]\n"));
        assert!(out.contains("tags: [\"t1,t2\"]\n"));
    }

    #[test]
    fn legacy_joins_keywords_with_quoted_commas() {
        let mut record = sample_record();
        record.keywords = vec!["a".into(), "b".into(), "c".into()];
        let out = render(&record, RenderStyle::Legacy);
        assert!(out.contains("keywords: [\"a\",\"b\",\"c\"]\n"));
    }

    #[test]
    fn empty_lists() {
        let mut record = sample_record();
        record.keywords.clear();
        record.tags.clear();

        let hugo = render(&record, RenderStyle::Hugo);
        assert!(hugo.contains("keywords: []\n"));
        assert!(hugo.contains("tags: []\n"));

        let legacy = render(&record, RenderStyle::Legacy);
        assert!(legacy.contains("keywords: [\"\"]\n"));
        assert!(legacy.contains("tags: [\"\"]\n"));
    }

    #[test]
    fn hugo_escapes_quotes_and_backslashes() {
        let mut record = sample_record();
        record.title = r#"Say "hi" \o/"#.to_string();
        let out = render(&record, RenderStyle::Hugo);
        assert!(out.contains(r#"title: "Say \"hi\" \\o/""#));
    }

    #[test]
    fn legacy_does_not_escape() {
        let mut record = sample_record();
        record.title = r#"Say "hi""#.to_string();
        let out = render(&record, RenderStyle::Legacy);
        assert!(out.contains(r#"title: "Say "hi"""#));
    }

    #[test]
    fn multiline_description_stays_on_one_line() {
        let mut record = sample_record();
        record.description = "line one\nline two".to_string();
        let out = render(&record, RenderStyle::Hugo);
        assert!(out.contains("description: \"line one\\nline two\"\n"));
    }

    #[test]
    fn control_characters_are_hex_escaped() {
        let mut record = sample_record();
        record.title = "bell\u{7}esc\u{1b}del\u{7f}".to_string();
        let out = render(&record, RenderStyle::Hugo);
        assert!(out.contains("title: \"bell\\x07esc\\x1Bdel\\x7F\"\n"));
    }

    #[test]
    fn body_is_verbatim() {
        let mut record = sample_record();
        record.body = "# Heading\n\n---\n\"quoted\" <b>html</b>\n".to_string();
        let out = render(&record, RenderStyle::Hugo);
        assert!(out.ends_with("---\n# Heading\n\n---\n\"quoted\" <b>html</b>\n"));
    }

    #[test]
    fn keeps_keyword_and_tag_order() {
        let mut record = sample_record();
        record.keywords = vec!["z".into(), "a".into(), "m".into()];
        record.tags = vec!["3".into(), "1".into(), "2".into()];
        let out = render(&record, RenderStyle::Hugo);
        assert!(out.contains("keywords: [\"z\",\"a\",\"m\"]\n"));
        assert!(out.contains("tags: [\"3\",\"1\",\"2\"]\n"));
    }

    #[test]
    fn non_utc_offset_is_kept() {
        let mut record = sample_record();
        record.date = chrono::DateTime::parse_from_rfc3339("2023-01-02T03:04:00+09:00").unwrap();
        let out = render(&record, RenderStyle::Hugo);
        assert!(out.contains("date: 2023-01-02T03:04:00+09:00\n"));
    }

    #[test]
    fn frontmatter_round_trips() {
        let mut record = sample_record();
        record.title = "A \"quoted\" title".to_string();
        record.description = r"back\slash".to_string();
        record.draft = true;
        record.toc = false;

        let (fields, body) = parse_frontmatter(&render(&record, RenderStyle::Hugo));
        assert_eq!(fields["title"], record.title);
        assert_eq!(fields["slug"], record.slug);
        assert_eq!(fields["description"], record.description);
        assert_eq!(fields["draft"], "true");
        assert_eq!(fields["toc"], "false");
        assert_eq!(body, record.body);
    }
}
