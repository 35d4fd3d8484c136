//! # Parser module
//!
//! Parsers for the resource types a snapshot touches:
//!
//! - `html` - document parsing, DOM manipulation, metadata, serialization
//! - `css` - `url()` reference extraction and nested-resource localization

pub mod css;
pub mod html;

// Re-export commonly used items for convenience
pub use css::{base_reference, extract_css_urls, localize_nested_urls, resolve_css_reference};
pub use html::{
    create_metadata_tag, detach_node, find_nodes, get_charset, get_node_attr, get_node_name,
    html_to_dom, is_favicon, parse_link_type, serialize_document, set_node_attr, LinkType,
    FAVICON_VALUES,
};
