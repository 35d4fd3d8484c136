use percent_encoding::percent_decode_str;

pub use url::Url;

/// Checks whether the given string is a fully qualified URL
///
/// Returns `true` only for inputs that parse as a URL and carry a scheme,
/// as opposed to site-root-relative (`/style.css`) or document-relative
/// (`img/logo.png`) references.
pub fn is_url_and_has_protocol(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => !url.scheme().is_empty(),
        Err(_) => false,
    }
}

/// Resolves a possibly relative reference against a base URL
///
/// Absolute inputs are returned as-is; anything else is joined onto `from`.
/// Inputs that cannot be resolved at all collapse to an empty data URL,
/// which downstream code treats as an unsupported scheme and skips.
pub fn resolve_url(from: &Url, to: &str) -> Url {
    match Url::parse(to) {
        Ok(parsed_url) => parsed_url,
        Err(_) => match from.join(to) {
            Ok(joined_url) => joined_url,
            Err(_) => Url::parse("data:,").unwrap(),
        },
    }
}

/// Returns the origin of a URL as a string (scheme + host + port)
///
/// Used as the site root for resolving site-root-relative references found
/// inside stylesheets.
pub fn url_origin(url: &Url) -> String {
    url.origin().ascii_serialization()
}

/// Derives a safe file name from the final path segment of a URL
///
/// The segment is percent-decoded and every character outside
/// `[A-Za-z0-9.-_]` is replaced with an underscore. URLs without a usable
/// segment (e.g. `https://example.com/`) fall back to `"resource"`.
pub fn url_file_name(url: &Url) -> String {
    let raw_segment = url
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or_default();
    let decoded = percent_decode_str(raw_segment).decode_utf8_lossy();

    let sanitized: String = decoded
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // Leading dots would produce hidden files on disk
    let file_name = sanitized.trim_start_matches('.');
    if file_name.is_empty() {
        "resource".to_string()
    } else {
        file_name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url_and_has_protocol() {
        assert!(is_url_and_has_protocol("https://example.com/style.css"));
        assert!(is_url_and_has_protocol("http://example.com"));
        assert!(is_url_and_has_protocol("data:text/html,hi"));
        assert!(is_url_and_has_protocol("mailto:someone@example.com"));
        assert!(!is_url_and_has_protocol("/style.css"));
        assert!(!is_url_and_has_protocol("img/logo.png"));
        assert!(!is_url_and_has_protocol(""));
    }

    #[test]
    fn test_resolve_url_absolute_passthrough() {
        let base = Url::parse("https://example.com/page/index.html").unwrap();
        let resolved = resolve_url(&base, "https://cdn.example.org/a.png");
        assert_eq!(resolved.as_str(), "https://cdn.example.org/a.png");
    }

    #[test]
    fn test_resolve_url_site_root_relative() {
        let base = Url::parse("https://example.com/page/index.html").unwrap();
        let resolved = resolve_url(&base, "/style.css");
        assert_eq!(resolved.as_str(), "https://example.com/style.css");
    }

    #[test]
    fn test_resolve_url_document_relative() {
        let base = Url::parse("https://example.com/page/index.html").unwrap();
        let resolved = resolve_url(&base, "img/logo.png");
        assert_eq!(resolved.as_str(), "https://example.com/page/img/logo.png");
    }

    #[test]
    fn test_url_origin() {
        let url = Url::parse("https://example.com/theme/css/app.css").unwrap();
        assert_eq!(url_origin(&url), "https://example.com");

        let url = Url::parse("http://example.com:8080/").unwrap();
        assert_eq!(url_origin(&url), "http://example.com:8080");
    }

    #[test]
    fn test_url_file_name_plain() {
        let url = Url::parse("https://example.com/theme/css/app.css").unwrap();
        assert_eq!(url_file_name(&url), "app.css");
    }

    #[test]
    fn test_url_file_name_percent_decoded_and_sanitized() {
        let url = Url::parse("https://example.com/files/my%20logo%20(1).png").unwrap();
        assert_eq!(url_file_name(&url), "my_logo__1_.png");
    }

    #[test]
    fn test_url_file_name_fallback() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(url_file_name(&url), "resource");
    }

    #[test]
    fn test_url_file_name_no_hidden_files() {
        let url = Url::parse("https://example.com/assets/.htaccess").unwrap();
        assert_eq!(url_file_name(&url), "htaccess");
    }
}
