// Shared helpers for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use pagefreeze::core::SnapshotError;
use pagefreeze::localizer::{ResourceLocalizer, StoredResource};

/// In-memory localizer fake
///
/// Answers `save_url_file` from a preconfigured URL map and records every
/// interaction so tests can assert on the exact protocol the generator
/// follows. Assets registered with a body are written into the fake's
/// root directory so stylesheet scanning has a real file to work on.
pub struct RecordingLocalizer {
    root: PathBuf,
    assets: HashMap<String, (String, Option<String>)>,
    pub saved_urls: Vec<String>,
    pub cleanup_calls: usize,
    pub created_resources_path: bool,
    pub template: Option<String>,
}

impl RecordingLocalizer {
    pub fn new(root: PathBuf) -> Self {
        RecordingLocalizer {
            root,
            assets: HashMap::new(),
            saved_urls: Vec::new(),
            cleanup_calls: 0,
            created_resources_path: false,
            template: None,
        }
    }

    /// Registers a URL the fake is willing to localize; `body` makes the
    /// stored copy exist on disk (needed for stylesheets)
    pub fn with_asset(mut self, url: &str, identifier: &str, body: Option<&str>) -> Self {
        self.assets.insert(
            url.to_string(),
            (identifier.to_string(), body.map(|b| b.to_string())),
        );
        self
    }

    pub fn local_path_of(&self, identifier: &str) -> PathBuf {
        self.root.join(identifier)
    }
}

impl ResourceLocalizer for RecordingLocalizer {
    fn cleanup(&mut self) -> Result<(), SnapshotError> {
        self.cleanup_calls += 1;
        self.template = None;
        Ok(())
    }

    fn create_resources_path(&mut self) -> Result<(), SnapshotError> {
        self.created_resources_path = true;
        Ok(())
    }

    fn save_url_file(&mut self, url: &str) -> Result<Option<StoredResource>, SnapshotError> {
        self.saved_urls.push(url.to_string());

        match self.assets.get(url) {
            Some((identifier, body)) => {
                let local_path = self.root.join(identifier);
                if let Some(body) = body {
                    fs::write(&local_path, body)?;
                }
                Ok(Some(StoredResource {
                    identifier: identifier.clone(),
                    local_path,
                }))
            }
            None => Ok(None),
        }
    }

    fn get_url_for_file(&self, identifier: &str) -> String {
        format!("/static/{identifier}")
    }

    fn save_template_file(&mut self, html: &str) -> Result<(), SnapshotError> {
        self.template = Some(html.to_string());
        Ok(())
    }
}
