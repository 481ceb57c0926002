//! The normalized record shared by the decode and render stages.
//!
//! A [`Record`] is built once per story by [`crate::stories::decode`], handed
//! to [`crate::frontmatter::render`] and then dropped. Nothing here outlives a
//! single run.

use chrono::{DateTime, FixedOffset};

/// One story, flattened out of the CDN response.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: i64,
    /// Internal story name (not rendered, shown by `check`)
    pub name: String,
    /// URL slug, also the output filename stem
    pub slug: String,

    pub title: String,
    pub description: String,
    /// Publication date, already resolved to a concrete offset
    pub date: DateTime<FixedOffset>,

    pub draft: bool,
    /// Whether Hugo should render a table of contents
    pub toc: bool,

    pub keywords: Vec<String>,
    pub tags: Vec<String>,

    /// Raw body, copied verbatim after the frontmatter
    pub body: String,
}
