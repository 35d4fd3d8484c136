//! # Resource localization module
//!
//! The generator never performs I/O itself; everything that touches the
//! network or the filesystem goes through the [`ResourceLocalizer`]
//! contract. The production implementation is [`FileStore`]; tests drive
//! the generator with an in-memory fake.

use std::path::PathBuf;

use crate::core::SnapshotError;
use crate::utils::url::is_url_and_has_protocol;

pub mod store;

// Re-export commonly used items for convenience
pub use store::FileStore;

/// The outcome of materializing one resource locally
///
/// Created per localization call and consumed immediately by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResource {
    /// Opaque stored identifier, later mapped to a servable URL via
    /// [`ResourceLocalizer::get_url_for_file`]
    pub identifier: String,
    /// Where the resource bytes were written; used for secondary scanning
    /// of stylesheet content
    pub local_path: PathBuf,
}

/// Capability set the snapshot generator consumes for all fetch/store
/// decisions
///
/// A skipped resource is a first-class outcome distinct from failure:
/// `save_url_file` answers `Ok(None)` when a resource cannot or should not
/// be downloaded (unsupported scheme, already local), and callers must
/// leave the original reference untouched in that case.
pub trait ResourceLocalizer {
    /// Removes all previously generated output; idempotent and safe to
    /// call when nothing was ever written
    fn cleanup(&mut self) -> Result<(), SnapshotError>;

    /// Ensures the output asset directory exists
    fn create_resources_path(&mut self) -> Result<(), SnapshotError>;

    /// Fetches and stores the resource behind `url`, unless it is already
    /// cached or not worth downloading (`Ok(None)`)
    fn save_url_file(&mut self, url: &str) -> Result<Option<StoredResource>, SnapshotError>;

    /// Maps a stored identifier to the URL the static page should
    /// reference
    fn get_url_for_file(&self, identifier: &str) -> String;

    /// Persists the rewritten markup as the servable entry point
    fn save_template_file(&mut self, html: &str) -> Result<(), SnapshotError>;

    /// Combined save-and-map for opaque assets (images, icons); degrades
    /// gracefully by returning the original URL on skip or failure
    fn generate_file_url(&mut self, url: &str) -> String {
        match self.save_url_file(url) {
            Ok(Some(stored)) => self.get_url_for_file(&stored.identifier),
            Ok(None) | Err(_) => url.to_string(),
        }
    }

    /// True iff the string is a fully qualified URL rather than a relative
    /// path
    fn is_url(&self, value: &str) -> bool {
        is_url_and_has_protocol(value)
    }
}
