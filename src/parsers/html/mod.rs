//! HTML parsing and processing module
//!
//! - `dom`: parsing and basic DOM manipulation
//! - `parser`: `link[rel]` classification
//! - `metadata`: charset detection and the snapshot provenance comment
//! - `serializer`: serialization back to markup

pub mod dom;
pub mod metadata;
pub mod parser;
pub mod serializer;

// Re-export the public API
pub use dom::{
    detach_node, find_nodes, get_node_attr, get_node_name, html_to_dom, set_node_attr,
};
pub use metadata::{create_metadata_tag, get_charset};
pub use parser::{is_favicon, parse_link_type, LinkType, FAVICON_VALUES};
pub use serializer::serialize_document;
