//! Pipeline orchestration: source → decode → write.
//!
//! [`fetch_records`] covers the first two stages and is shared by `check`.
//! [`sync`] runs the whole pipeline and reports progress through a callback so
//! the CLI can print as it goes.
//!
//! Every error is fatal. Records are decoded in full before the first write,
//! so a bad date or malformed payload leaves the output directory untouched.
//! A write failure stops the run immediately; files already written stay.

use crate::config::{ConfigError, SyncConfig};
use crate::source::{self, Mode, SourceError, Transport};
use crate::stories::{self, DecodeError};
use crate::types::Record;
use crate::write::{self, WriteError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Progress notifications emitted by [`sync`].
#[derive(Debug)]
pub enum SyncEvent<'a> {
    /// Decoding finished with this many records.
    Found { count: usize },
    /// A record was written to `path`.
    Written { record: &'a Record, path: &'a Path },
}

/// Read and decode the story source.
pub fn fetch_records(
    config: &SyncConfig,
    mode: Mode,
    token: Option<&str>,
    transport: &dyn Transport,
) -> Result<Vec<Record>, SyncError> {
    let bytes = source::read_source(mode, &config.source, token, transport)?;
    let records = stories::decode(&bytes, config.render.timezone)?;
    debug!(count = records.len(), "decoded stories");
    Ok(records)
}

/// Run the full pipeline, writing one markdown file per story into `dir`.
///
/// Returns the written paths in story order.
pub fn sync(
    config: &SyncConfig,
    mode: Mode,
    token: Option<&str>,
    dir: &Path,
    transport: &dyn Transport,
    on_event: &mut dyn FnMut(SyncEvent<'_>),
) -> Result<Vec<PathBuf>, SyncError> {
    write::ensure_dir(dir)?;

    let records = fetch_records(config, mode, token, transport)?;
    on_event(SyncEvent::Found {
        count: records.len(),
    });

    let mut written = Vec::with_capacity(records.len());
    for record in &records {
        let path = write::write_record(dir, record, config.render.style)?;
        debug!(id = record.id, path = %path.display(), "wrote story");
        on_event(SyncEvent::Written {
            record,
            path: &path,
        });
        written.push(path);
    }
    Ok(written)
}
