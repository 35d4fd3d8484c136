//! Classification of `<link>` element `rel` attribute values.

/// `rel` values that mark a link as a favicon
pub const FAVICON_VALUES: &[&str] = &["icon", "shortcut icon"];

/// HTML link relation types relevant to snapshot generation
#[derive(Debug, PartialEq, Eq)]
pub enum LinkType {
    /// Site icon shown in tabs and bookmarks
    Favicon,
    /// Link to an external CSS file
    Stylesheet,
}

/// Checks whether a single `rel` value (or value list) denotes a favicon
pub fn is_favicon(attr_value: &str) -> bool {
    FAVICON_VALUES.contains(&attr_value.to_lowercase().as_str())
}

/// Parses the `rel` attribute of a `<link>` element
///
/// The attribute may hold several whitespace-separated values; matching is
/// case-insensitive and unsupported values are ignored. The multi-word
/// favicon form `shortcut icon` is recognized on the whole attribute value
/// since splitting would tear it apart.
pub fn parse_link_type(link_attr_rel_value: &str) -> Vec<LinkType> {
    let mut types: Vec<LinkType> = vec![];

    if is_favicon(link_attr_rel_value.trim()) {
        types.push(LinkType::Favicon);
        return types;
    }

    for link_attr_rel_type in link_attr_rel_value.split_whitespace() {
        if link_attr_rel_type.eq_ignore_ascii_case("stylesheet") {
            types.push(LinkType::Stylesheet);
        } else if is_favicon(link_attr_rel_type) {
            types.push(LinkType::Favicon);
        }
    }

    types
}
