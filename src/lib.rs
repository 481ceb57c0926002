//! # storyblok-hugo
//!
//! Exports Storyblok stories as Hugo content files. Each story becomes one
//! `<slug>.md` file: a YAML frontmatter block followed by the story body.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Source   CDN or fixture  →  JSON bytes
//! 2. Decode   JSON bytes      →  Vec<Record>
//! 3. Write    Record          →  <dir>/<slug>.md
//! ```
//!
//! The stages run once, in order, on a single thread. Any error ends the run:
//! there are no retries and nothing is skipped.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`source`] | Stage 1 — offline fixture or online CDN fetch, behind a `Transport` trait |
//! | [`stories`] | Stage 2 — typed decode of the stories payload, date parsing |
//! | [`frontmatter`] | Stage 3 — record → frontmatter + body text |
//! | [`write`] | Stage 3 — slug validation and file output |
//! | [`sync`] | Runs the stages and reports progress |
//! | [`config`] | Optional TOML config merged over stock defaults |
//! | [`types`] | The shared [`types::Record`] |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Decode Everything Before Writing
//!
//! The whole payload is decoded, dates included, before the first file is
//! touched. A broken story therefore fails the run with the output directory
//! unchanged, instead of leaving half a section behind.
//!
//! ## UTC Dates
//!
//! Story dates carry no offset. They are read as UTC unless the config asks
//! for the local zone, so the same payload renders the same files on every
//! machine.
//!
//! ## Two Frontmatter Styles
//!
//! The default `hugo` style escapes strings and writes real YAML lists. The
//! `legacy` style keeps the older exporter's exact bytes, including its
//! one-string `tags` list, for sites that diff generated content.
//!
//! ## Strict HTTP Status
//!
//! A non-2xx response is an error by default rather than being fed to the
//! decoder. `source.fail_on_status = false` turns that off.

pub mod config;
pub mod frontmatter;
pub mod output;
pub mod source;
pub mod stories;
pub mod sync;
pub mod types;
pub mod write;

#[cfg(test)]
pub(crate) mod test_helpers;
