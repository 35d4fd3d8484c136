//! CSS reference localization
//!
//! A freshly downloaded stylesheet may itself reference further resources
//! (background images, fonts, icons) through `url(...)` tokens. This module
//! extracts those literals, resolves them against the stylesheet's base
//! reference, asks the resource localizer to materialize them, and rewrites
//! the stylesheet text in place. Only literal `url(...)` tokens are
//! handled; this is deliberately not a CSS parser, and `@import` chains are
//! not followed — localization goes exactly one level deep.

use std::fs;
use std::path::Path;

use encoding_rs::UTF_8;
use regex::Regex;
use tracing::debug;

use crate::core::SnapshotError;
use crate::localizer::ResourceLocalizer;
use crate::utils::url::is_url_and_has_protocol;

/// Matches `url(...)` occurrences in any quoting style; the capture group
/// holds the inner literal without quotes
const CSS_URL_PATTERN: &str = r#"url\(\s*['"]?([^'")]+?)['"]?\s*\)"#;

/// Extracts every distinct `url(...)` literal from CSS text
///
/// Single-quoted, double-quoted and unquoted forms are treated identically.
/// Order of first occurrence is preserved; repeats collapse into one entry
/// since replacement is global anyway.
pub fn extract_css_urls(css: &str) -> Vec<String> {
    let css_url_regex = Regex::new(CSS_URL_PATTERN).unwrap();

    let mut found: Vec<String> = Vec::new();
    for captures in css_url_regex.captures_iter(css) {
        let literal = captures[1].to_string();
        if !found.contains(&literal) {
            found.push(literal);
        }
    }

    found
}

/// Returns the directory part of a stylesheet reference
///
/// `"/theme/css/app.css"` yields `"/theme/css/"`; a reference without any
/// slash yields an empty base.
pub fn base_reference(stylesheet_href: &str) -> String {
    match stylesheet_href.rfind('/') {
        Some(position) => stylesheet_href[..=position].to_string(),
        None => String::new(),
    }
}

/// Resolves a `url(...)` literal found inside a stylesheet
///
/// Absolute URLs pass through untouched; site-root-relative literals are
/// concatenated onto the site root; everything else is concatenated onto
/// the stylesheet's base reference. No `.`/`..` normalization happens here
/// — the localizer receives the raw concatenation and has to tolerate
/// redundant path segments.
///
/// A protocol-relative literal (`//cdn.example.com/a.css`) carries no
/// scheme, so it falls under the leading-slash rule and gets concatenated
/// onto the site root like any other rooted path. The resulting double
/// slash is pinned behavior.
pub fn resolve_css_reference(site_root: &str, base_reference: &str, literal: &str) -> String {
    if is_url_and_has_protocol(literal) {
        literal.to_string()
    } else if literal.starts_with('/') {
        format!("{}{}", site_root.trim_end_matches('/'), literal)
    } else {
        format!("{base_reference}{literal}")
    }
}

/// Localizes every `url(...)` reference inside a stored stylesheet
///
/// Reads the stylesheet from `local_path`, localizes each resolvable
/// reference, replaces every textual occurrence of the original literal
/// with the localized URL and writes the result back in place. A skipped
/// resource leaves its literal untouched so the page can still reach the
/// live copy. Replacement is a global substring substitution across the
/// whole file, mirroring the rewrite the stylesheet's markup gets.
///
/// Stylesheets are not guaranteed to be UTF-8; the content is decoded
/// lossily before scanning, and the file is only rewritten when at least
/// one reference was actually localized, so a stylesheet with nothing to
/// rewrite keeps its original bytes.
pub fn localize_nested_urls<L: ResourceLocalizer>(
    localizer: &mut L,
    site_root: &str,
    base_reference: &str,
    local_path: &Path,
) -> Result<(), SnapshotError> {
    let bytes = fs::read(local_path)?;
    let (decoded, _, _) = UTF_8.decode(&bytes);
    let mut content = decoded.into_owned();

    let mut modified = false;
    for literal in extract_css_urls(&content) {
        let resolved = resolve_css_reference(site_root, base_reference, &literal);

        match localizer.save_url_file(&resolved)? {
            Some(stored) => {
                let local_url = localizer.get_url_for_file(&stored.identifier);
                content = content.replace(&literal, &local_url);
                modified = true;
            }
            None => {
                debug!(url = %resolved, "stylesheet reference left as-is");
            }
        }
    }

    if modified {
        fs::write(local_path, content)?;
    }

    Ok(())
}
