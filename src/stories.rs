//! Decoder: stage 2 of the sync pipeline.
//!
//! Turns the CDN response into [`Record`]s. The wire types mirror the subset of
//! Storyblok's `stories` payload the exporter uses:
//!
//! ```json
//! {
//!   "stories": [{
//!     "id": 1, "name": "Hello", "slug": "hello-world",
//!     "content": {
//!       "title": "Hi", "description": "d", "date": "2023-01-02 03:04",
//!       "draft": false, "toc": true,
//!       "keywords": [{"text": "k1"}], "tags": [{"text": "t1"}],
//!       "body": "Body text."
//!     }
//!   }]
//! }
//! ```
//!
//! Members the exporter does not read are ignored. `description`, `body`,
//! `draft`, `toc`, `keywords` and `tags` default to empty/false when absent or
//! `null`;
//! everything else is required and a wrong type fails the whole decode.
//!
//! Dates have no offset in the source. They are read as `YYYY-MM-DD HH:MM` and
//! pinned to the configured [`Timezone`]. The first bad date aborts decoding,
//! so a run with one broken story writes nothing.

use crate::config::Timezone;
use crate::types::Record;
use chrono::{DateTime, FixedOffset, Local, LocalResult, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Layout of `content.date` in the CDN payload.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("story {slug:?}: invalid date {value:?}: {reason}")]
    Date {
        slug: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Deserialize)]
struct StoriesResponse {
    stories: Vec<Story>,
}

#[derive(Debug, Deserialize)]
struct Story {
    id: i64,
    name: String,
    slug: String,
    content: StoryContent,
}

#[derive(Debug, Deserialize)]
struct StoryContent {
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    draft: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    toc: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    keywords: Vec<TextItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    tags: Vec<TextItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    body: String,
}

/// Storyblok sends `null` for cleared fields; read it like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Storyblok wraps list entries in `{ "text": ... }` blocks.
#[derive(Debug, Deserialize)]
struct TextItem {
    text: String,
}

fn texts(items: Vec<TextItem>) -> Vec<String> {
    items.into_iter().map(|item| item.text).collect()
}

/// True when `value` is exactly `DDDD-DD-DD DD:DD`.
///
/// chrono accepts unpadded fields (`2023-1-2`), so the shape is checked first.
fn has_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 16
        && bytes.iter().enumerate().all(|(i, &b)| match i {
            4 | 7 => b == b'-',
            10 => b == b' ',
            13 => b == b':',
            _ => b.is_ascii_digit(),
        })
}

/// Parse a story date and resolve it in `tz`.
pub fn parse_date(value: &str, tz: Timezone) -> Result<DateTime<FixedOffset>, String> {
    if !has_date_shape(value) {
        return Err("expected YYYY-MM-DD HH:MM".to_string());
    }
    let naive = NaiveDateTime::parse_from_str(value, DATE_FORMAT).map_err(|e| e.to_string())?;
    match tz {
        Timezone::Utc => Ok(Utc.from_utc_datetime(&naive).fixed_offset()),
        Timezone::Local => match Local.from_local_datetime(&naive) {
            LocalResult::Single(dt) => Ok(dt.fixed_offset()),
            LocalResult::Ambiguous(..) => Err("ambiguous local time".to_string()),
            LocalResult::None => Err("nonexistent local time".to_string()),
        },
    }
}

impl Story {
    fn into_record(self, tz: Timezone) -> Result<Record, DecodeError> {
        let content = self.content;
        let date = parse_date(&content.date, tz).map_err(|reason| DecodeError::Date {
            slug: self.slug.clone(),
            value: content.date.clone(),
            reason,
        })?;

        Ok(Record {
            id: self.id,
            name: self.name,
            slug: self.slug,
            title: content.title,
            description: content.description,
            date,
            draft: content.draft,
            toc: content.toc,
            keywords: texts(content.keywords),
            tags: texts(content.tags),
            body: content.body,
        })
    }
}

/// Decode a stories document into records, in source order.
pub fn decode(bytes: &[u8], tz: Timezone) -> Result<Vec<Record>, DecodeError> {
    let response: StoriesResponse = serde_json::from_slice(bytes)?;
    response
        .stories
        .into_iter()
        .map(|story| story.into_record(tz))
        .collect()
}
