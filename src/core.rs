use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use thiserror::Error;
use tracing::info;

use crate::generator::SnapshotGenerator;
use crate::localizer::FileStore;
use crate::parsers::html::{get_charset, html_to_dom};
use crate::utils::url::{url_origin, Url};

/// Represents errors that can occur while producing a static snapshot
///
/// The variants mirror the failure taxonomy of the generation pipeline:
/// `EmptyDocument` is an internal invariant violation (the DOM passes
/// corrupted the tree), the network and filesystem variants are
/// localization failures that abort the remaining passes, and `InvalidUrl`
/// rejects unusable input at the pipeline boundary. A skipped resource is
/// not an error; the localizer reports it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The processed document serialized to empty or all-whitespace markup.
    /// This signals a defect in the rewrite passes, never a normal runtime
    /// condition, and must not be caught and retried.
    #[error("document serialized to empty markup")]
    EmptyDocument,

    /// The snapshot target or base URL could not be used
    #[error("invalid target: {0}")]
    InvalidUrl(String),

    /// A network request failed while localizing a resource
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        source: reqwest::Error,
    },

    /// A resource request completed with a non-success status code
    #[error("failed to fetch {url}: HTTP {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    /// A filesystem operation failed while persisting the snapshot
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Configuration options for snapshot generation
///
/// This struct contains the options that control how the source document is
/// fetched and where the rewritten markup and its localized assets end up.
#[derive(Default, Clone)]
pub struct SnapshotOptions {
    /// Overrides the site root used to resolve relative references;
    /// defaults to the origin of the snapshot target. Required when the
    /// source document is read from a local file.
    pub base_url: Option<String>,
    pub insecure: bool,
    pub no_metadata: bool,
    /// Name of the asset subdirectory inside the output directory
    pub resources_dir: Option<String>,
    pub silent: bool,
    /// Network timeout in seconds; 0 disables the timeout
    pub timeout: u64,
    pub user_agent: Option<String>,
}

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";

/// Parses a Content-Type header value into media type and charset
pub fn parse_content_type(content_type: &str) -> (String, String) {
    let mut media_type = String::new();
    let mut charset = String::new();

    let parts: Vec<&str> = content_type.split(';').collect();

    if !parts.is_empty() {
        media_type = parts[0].trim().to_lowercase();
    }

    for part in parts.iter().skip(1) {
        let part = part.trim();
        if let Some(value) = part.strip_prefix("charset=") {
            charset = value.trim_matches('"').to_string();
        }
    }

    (media_type, charset)
}

/// Produces a static snapshot of the given target
///
/// The target may be an `http(s)` URL or a path to a local HTML file (the
/// latter requires `options.base_url` so relative references can still be
/// resolved). The document is fetched, rewritten and persisted together
/// with its localized assets under `output_dir`; the returned path is the
/// servable entry point.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use pagefreeze::core::{create_static_snapshot, SnapshotOptions};
///
/// let options = SnapshotOptions::default();
/// let entry_point =
///     create_static_snapshot(options, "https://example.com", Path::new("snapshot"));
/// ```
pub fn create_static_snapshot(
    options: SnapshotOptions,
    target: &str,
    output_dir: &Path,
) -> Result<PathBuf, SnapshotError> {
    let target_url: Option<Url> = if target.starts_with("http://") || target.starts_with("https://")
    {
        Some(
            Url::parse(target)
                .map_err(|e| SnapshotError::InvalidUrl(format!("{target}: {e}")))?,
        )
    } else {
        None
    };

    // Every relative reference in the document resolves against this URL
    let base_url: Url = match (&options.base_url, &target_url) {
        (Some(custom), _) => Url::parse(custom)
            .map_err(|e| SnapshotError::InvalidUrl(format!("{custom}: {e}")))?,
        (None, Some(url)) => url.clone(),
        (None, None) => {
            return Err(SnapshotError::InvalidUrl(
                "a base URL is required when reading the document from a file".to_string(),
            ));
        }
    };

    let store = FileStore::new(base_url.clone(), output_dir.to_path_buf(), &options)?;
    let template_path = store.template_path();

    let (input_data, charset_hint) = match &target_url {
        Some(url) => store.retrieve_document(url)?,
        None => {
            let path = Path::new(target);
            if !path.exists() {
                return Err(SnapshotError::InvalidUrl(format!("file not found: {target}")));
            }
            (fs::read(path)?, None)
        }
    };

    // Initial parse, then re-parse if the markup declares its own charset
    let mut dom = html_to_dom(
        &input_data,
        charset_hint.unwrap_or_else(|| "utf-8".to_string()),
    );
    if let Some(html_charset) = get_charset(&dom.document) {
        if !html_charset.is_empty() {
            if let Some(charset) = Encoding::for_label_no_replacement(html_charset.as_bytes()) {
                dom = html_to_dom(&input_data, charset.name().to_string());
            }
        }
    }

    let site_root = url_origin(&base_url);
    let source_url = if options.no_metadata {
        None
    } else {
        target_url.clone()
    };

    let mut generator = SnapshotGenerator::new(Some(dom), store, &site_root, source_url);
    generator.generate()?;

    info!(target, output = %template_path.display(), "snapshot complete");

    Ok(template_path)
}

/// Prints an error message to stderr
pub fn print_error_message(msg: &str) {
    eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
}

/// Prints an info message to stdout
pub fn print_info_message(msg: &str) {
    println!("{msg}");
}
