//! Writer: stage 3 of the sync pipeline.
//!
//! Each record lands at `<dir>/<slug>.md`, the layout Hugo expects under a
//! content section. The output directory is never created; pointing `--dir`
//! at a missing path fails before anything is written.
//!
//! Slugs come straight from the CMS, so they are checked before a path is
//! built from them: a slug must be a single, non-empty path segment.

use crate::config::RenderStyle;
use crate::frontmatter;
use crate::types::Record;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("output directory does not exist: {}", .0.display())]
    MissingDir(PathBuf),
    #[error("unsafe slug {0:?}: must be a single non-empty path segment")]
    UnsafeSlug(String),
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Reject slugs that would escape or miss the output directory.
pub fn validate_slug(slug: &str) -> Result<(), WriteError> {
    let unsafe_slug = slug.is_empty()
        || slug == "."
        || slug == ".."
        || slug.contains(['/', '\\', '\0']);
    if unsafe_slug {
        return Err(WriteError::UnsafeSlug(slug.to_string()));
    }
    Ok(())
}

/// `<dir>/<slug>.md`, after validating the slug.
pub fn output_path(dir: &Path, slug: &str) -> Result<PathBuf, WriteError> {
    validate_slug(slug)?;
    Ok(dir.join(format!("{slug}.md")))
}

/// Fail unless `dir` is an existing directory.
pub fn ensure_dir(dir: &Path) -> Result<(), WriteError> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(WriteError::MissingDir(dir.to_path_buf()))
    }
}

/// Render `record` and write it into `dir`, replacing any existing file.
///
/// Returns the path written.
pub fn write_record(
    dir: &Path,
    record: &Record,
    style: RenderStyle,
) -> Result<PathBuf, WriteError> {
    let path = output_path(dir, &record.slug)?;
    let content = frontmatter::render(record, style);
    fs::write(&path, content).map_err(|source| WriteError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
