//! Snapshot generator
//!
//! Owns the parsed document for the duration of one generation run and
//! rewrites it into statically servable markup: scripts are removed,
//! stylesheet/favicon/image references are localized through the
//! [`ResourceLocalizer`], and the result is serialized and handed back to
//! the localizer for persistence.

use markup5ever_rcdom::{Handle, RcDom};
use tracing::debug;

use crate::core::SnapshotError;
use crate::localizer::ResourceLocalizer;
use crate::parsers::css::{base_reference, localize_nested_urls};
use crate::parsers::html::{
    create_metadata_tag, detach_node, find_nodes, get_node_attr, parse_link_type,
    serialize_document, set_node_attr, LinkType,
};
use crate::utils::url::Url;

/// Rewrites one document into a static snapshot
///
/// Constructed with `None` when the upstream download produced no document;
/// [`generate`](SnapshotGenerator::generate) then only cleans up previous
/// output and returns without an artifact. All I/O is delegated to the
/// localizer — the generator itself only reads and mutates the tree.
pub struct SnapshotGenerator<L: ResourceLocalizer> {
    dom: Option<RcDom>,
    localizer: L,
    site_root: String,
    source_url: Option<Url>,
}

impl<L: ResourceLocalizer> SnapshotGenerator<L> {
    /// Creates a generator for one document
    ///
    /// `site_root` is the origin used to resolve site-root-relative
    /// references found inside stylesheets; `source_url`, when given, is
    /// recorded in a provenance comment at the top of the saved markup.
    pub fn new(
        dom: Option<RcDom>,
        localizer: L,
        site_root: &str,
        source_url: Option<Url>,
    ) -> Self {
        SnapshotGenerator {
            dom,
            localizer,
            site_root: site_root.to_string(),
            source_url,
        }
    }

    /// Borrow the localizer (mainly useful to inspect fakes in tests)
    pub fn localizer(&self) -> &L {
        &self.localizer
    }

    /// Consumes the generator, releasing its localizer
    pub fn into_localizer(self) -> L {
        self.localizer
    }

    /// Runs the full rewrite pipeline and persists the result
    ///
    /// The pass order is fixed: cleanup must precede all writes, and
    /// script removal must precede serialization so script references are
    /// never considered for localization. Localization failures propagate
    /// immediately and abort the remaining passes — partial output is
    /// acceptable because every run begins by wiping the previous one.
    pub fn generate(&mut self) -> Result<Option<String>, SnapshotError> {
        self.localizer.cleanup()?;

        let dom = match self.dom.as_ref() {
            Some(dom) => dom,
            None => {
                debug!("no document to rewrite; cleanup only");
                return Ok(None);
            }
        };

        self.localizer.create_resources_path()?;

        remove_script_nodes(&dom.document);
        rewrite_stylesheets(&mut self.localizer, &self.site_root, &dom.document)?;
        rewrite_favicons(&mut self.localizer, &dom.document);
        rewrite_images(&mut self.localizer, &dom.document);

        let mut html = serialize_document(dom);
        if html.trim().is_empty() {
            // Only reachable if a rewrite pass corrupted the tree
            return Err(SnapshotError::EmptyDocument);
        }

        if let Some(url) = &self.source_url {
            let mut metadata_comment = create_metadata_tag(url);
            metadata_comment.push('\n');
            html.insert_str(0, &metadata_comment);
        }
        if !html.ends_with('\n') {
            html.push('\n');
        }

        self.localizer.save_template_file(&html)?;

        Ok(Some(html))
    }
}

/// Deletes every `script` element from the tree
///
/// Nodes are collected first and detached afterwards; mutating the child
/// lists mid-traversal would invalidate the iteration.
fn remove_script_nodes(document: &Handle) {
    let script_nodes = find_nodes(document, "script");
    for script_node in script_nodes.iter() {
        detach_node(script_node);
    }
    debug!(count = script_nodes.len(), "removed script elements");
}

/// Localizes stylesheet links and the resources referenced inside them
///
/// A skipped stylesheet keeps its original `href` so the page still
/// renders from the live resource. A localized one has its stored copy
/// scanned for nested `url(...)` references before the `href` is pointed
/// at the local file.
fn rewrite_stylesheets<L: ResourceLocalizer>(
    localizer: &mut L,
    site_root: &str,
    document: &Handle,
) -> Result<(), SnapshotError> {
    for link_node in find_nodes(document, "link") {
        let rel = get_node_attr(&link_node, "rel").unwrap_or_default();
        if !parse_link_type(&rel).contains(&LinkType::Stylesheet) {
            continue;
        }

        let href = get_node_attr(&link_node, "href").unwrap_or_default();
        if href.is_empty() {
            continue;
        }

        match localizer.save_url_file(&href)? {
            Some(stored) => {
                localize_nested_urls(
                    localizer,
                    site_root,
                    &base_reference(&href),
                    &stored.local_path,
                )?;
                set_node_attr(
                    &link_node,
                    "href",
                    Some(localizer.get_url_for_file(&stored.identifier)),
                );
            }
            None => {
                debug!(href, "stylesheet skipped; keeping original reference");
            }
        }
    }

    Ok(())
}

/// Localizes favicon links as opaque assets
fn rewrite_favicons<L: ResourceLocalizer>(localizer: &mut L, document: &Handle) {
    for link_node in find_nodes(document, "link") {
        let rel = get_node_attr(&link_node, "rel").unwrap_or_default();
        if !parse_link_type(&rel).contains(&LinkType::Favicon) {
            continue;
        }

        let href = get_node_attr(&link_node, "href").unwrap_or_default();
        if href.is_empty() {
            continue;
        }

        set_node_attr(&link_node, "href", Some(localizer.generate_file_url(&href)));
    }
}

/// Localizes image sources as opaque assets
fn rewrite_images<L: ResourceLocalizer>(localizer: &mut L, document: &Handle) {
    for img_node in find_nodes(document, "img") {
        let src = get_node_attr(&img_node, "src").unwrap_or_default();
        if src.is_empty() {
            continue;
        }

        set_node_attr(&img_node, "src", Some(localizer.generate_file_url(&src)));
    }
}
