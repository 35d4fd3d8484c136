//! # Utility module
//!
//! URL classification, resolution and file-name derivation helpers shared
//! by the generator and the resource localizer.

pub mod url;

// Re-export commonly used items for convenience
pub use url::{is_url_and_has_protocol, resolve_url, url_file_name, url_origin, Url};
