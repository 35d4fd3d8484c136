use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::core::{parse_content_type, SnapshotError, SnapshotOptions};
use crate::localizer::{ResourceLocalizer, StoredResource};
use crate::utils::url::{resolve_url, url_file_name, Url};

/// Default name of the asset subdirectory inside the output directory
pub const DEFAULT_RESOURCES_DIR: &str = "resources";

/// File name of the servable entry point
pub const TEMPLATE_FILE_NAME: &str = "index.html";

/// Network- and filesystem-backed resource localizer
///
/// Downloads resources over HTTP(S) and lays them out under
/// `<output>/<resources>/` with names that are stable across runs: the
/// identifier is a SHA-256 prefix of the resolved URL joined with the
/// URL's sanitized file name, so re-running a snapshot reproduces the same
/// layout and two distinct URLs can never collide. Already-localized URLs
/// are answered from an in-memory map without refetching, which also
/// breaks reference cycles during recursive stylesheet scanning.
pub struct FileStore {
    base_url: Url,
    output_dir: PathBuf,
    resources_dir: String,
    client: Client,
    saved: HashMap<String, StoredResource>,
}

impl FileStore {
    pub fn new(
        base_url: Url,
        output_dir: PathBuf,
        options: &SnapshotOptions,
    ) -> Result<Self, SnapshotError> {
        let mut builder = Client::builder().danger_accept_invalid_certs(options.insecure);
        if options.timeout > 0 {
            builder = builder.timeout(Duration::from_secs(options.timeout));
        }
        if let Some(user_agent) = &options.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let client = builder.build().map_err(SnapshotError::Client)?;

        Ok(FileStore {
            base_url,
            output_dir,
            resources_dir: options
                .resources_dir
                .clone()
                .unwrap_or_else(|| DEFAULT_RESOURCES_DIR.to_string()),
            client,
            saved: HashMap::new(),
        })
    }

    /// Path of the servable entry point inside the output directory
    pub fn template_path(&self) -> PathBuf {
        self.output_dir.join(TEMPLATE_FILE_NAME)
    }

    fn resources_path(&self) -> PathBuf {
        self.output_dir.join(&self.resources_dir)
    }

    /// Derives the stable stored identifier for a resolved URL
    pub fn file_identifier(url: &Url) -> String {
        let digest = format!("{:x}", Sha256::digest(url.as_str().as_bytes()));
        format!("{}-{}", &digest[..10], url_file_name(url))
    }

    /// Fetches the snapshot source document itself, returning its bytes
    /// and the charset announced in the Content-Type header, if any
    pub fn retrieve_document(
        &self,
        url: &Url,
    ) -> Result<(Vec<u8>, Option<String>), SnapshotError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .map_err(|source| SnapshotError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SnapshotError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(parse_content_type)
            .map(|(_media_type, charset)| charset)
            .filter(|charset| !charset.is_empty());

        let bytes = response.bytes().map_err(|source| SnapshotError::Fetch {
            url: url.to_string(),
            source,
        })?;

        Ok((bytes.to_vec(), charset))
    }

    fn fetch(&self, url: &Url) -> Result<Vec<u8>, SnapshotError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .map_err(|source| SnapshotError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SnapshotError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let bytes = response.bytes().map_err(|source| SnapshotError::Fetch {
            url: url.to_string(),
            source,
        })?;

        Ok(bytes.to_vec())
    }
}

impl ResourceLocalizer for FileStore {
    fn cleanup(&mut self) -> Result<(), SnapshotError> {
        self.saved.clear();

        match fs::remove_dir_all(self.resources_path()) {
            Ok(()) => {}
            Err(error) if error.kind() == ErrorKind::NotFound => {}
            Err(error) => return Err(error.into()),
        }

        match fs::remove_file(self.template_path()) {
            Ok(()) => {}
            Err(error) if error.kind() == ErrorKind::NotFound => {}
            Err(error) => return Err(error.into()),
        }

        Ok(())
    }

    fn create_resources_path(&mut self) -> Result<(), SnapshotError> {
        fs::create_dir_all(self.resources_path())?;
        Ok(())
    }

    fn save_url_file(&mut self, url: &str) -> Result<Option<StoredResource>, SnapshotError> {
        // References that already point into the snapshot need no work
        if url.starts_with(&format!("/{}/", self.resources_dir)) {
            return Ok(None);
        }

        let resolved = resolve_url(&self.base_url, url);
        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            debug!(url, "skipping resource with unsupported scheme");
            return Ok(None);
        }

        if let Some(existing) = self.saved.get(resolved.as_str()) {
            return Ok(Some(existing.clone()));
        }

        let data = self.fetch(&resolved)?;
        let identifier = Self::file_identifier(&resolved);
        let local_path = self.resources_path().join(&identifier);
        fs::write(&local_path, &data)?;
        debug!(url = %resolved, file = %identifier, bytes = data.len(), "stored resource");

        let stored = StoredResource {
            identifier,
            local_path,
        };
        self.saved.insert(resolved.to_string(), stored.clone());

        Ok(Some(stored))
    }

    fn get_url_for_file(&self, identifier: &str) -> String {
        // Root-relative so the reference works from the template and from
        // inside stored stylesheets alike
        format!("/{}/{}", self.resources_dir, identifier)
    }

    fn save_template_file(&mut self, html: &str) -> Result<(), SnapshotError> {
        fs::create_dir_all(&self.output_dir)?;
        fs::write(self.template_path(), html)?;
        Ok(())
    }
}
