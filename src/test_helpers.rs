//! Shared test utilities.
//!
//! Story JSON builders, a canonical sample record, offline config setup, and a
//! small frontmatter parser for round-trip assertions.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let config = offline_config(tmp.path(), &stories_json(&[SAMPLE_STORY]));
//! let records = sync::fetch_records(&config, Mode::Offline, None, &NoNetwork).unwrap();
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use chrono::DateTime;

use crate::config::SyncConfig;
use crate::types::Record;

// =========================================================================
// Story JSON
// =========================================================================

/// The reference story: one keyword, two tags, toc on, draft off.
pub const SAMPLE_STORY: &str = r#"{
    "id": 1,
    "name": "a",
    "slug": "hello-world",
    "content": {
        "title": "Hi",
        "description": "d",
        "date": "2023-01-02 03:04",
        "draft": false,
        "toc": true,
        "keywords": [{"text": "k1"}],
        "tags": [{"text": "t1"}, {"text": "t2"}],
        "body": "Body text."
    }
}"#;

/// Wrap story objects in a `{"stories": [...]}` document.
pub fn stories_json(stories: &[&str]) -> String {
    format!("{{\"stories\": [{}]}}", stories.join(","))
}

/// The record [`SAMPLE_STORY`] decodes to under UTC.
pub fn sample_record() -> Record {
    Record {
        id: 1,
        name: "a".to_string(),
        slug: "hello-world".to_string(),
        title: "Hi".to_string(),
        description: "d".to_string(),
        date: DateTime::parse_from_rfc3339("2023-01-02T03:04:00Z").unwrap(),
        draft: false,
        toc: true,
        keywords: vec!["k1".to_string()],
        tags: vec!["t1".to_string(), "t2".to_string()],
        body: "Body text.".to_string(),
    }
}

// =========================================================================
// Config
// =========================================================================

/// Write `json` as a fixture under `dir` and return a config pointing at it.
pub fn offline_config(dir: &Path, json: &str) -> SyncConfig {
    let fixture = dir.join("stories.json");
    std::fs::write(&fixture, json).unwrap();
    let mut config = SyncConfig::default();
    config.source.fixture = fixture.to_string_lossy().into_owned();
    config
}

// =========================================================================
// Frontmatter parsing
// =========================================================================

/// Split rendered output into frontmatter fields and body.
///
/// Values have one layer of double quotes removed and `\"`, `\\`, `\n`
/// unescaped. Panics if the fences are missing.
pub fn parse_frontmatter(text: &str) -> (BTreeMap<String, String>, String) {
    let rest = text
        .strip_prefix("---\n")
        .unwrap_or_else(|| panic!("no opening fence in {text:?}"));
    let (block, body) = rest
        .split_once("\n---\n")
        .unwrap_or_else(|| panic!("no closing fence in {text:?}"));

    let fields = block
        .lines()
        .map(|line| {
            let (key, value) = line
                .split_once(": ")
                .unwrap_or_else(|| panic!("not a key/value line: {line:?}"));
            (key.to_string(), unquote(value))
        })
        .collect();
    (fields, body.to_string())
}

fn unquote(value: &str) -> String {
    let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) else {
        return value.to_string();
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
