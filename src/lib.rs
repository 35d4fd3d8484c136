//! # Pagefreeze Library
//!
//! A library for turning a live, dynamically rendered web page into a
//! self-contained static snapshot: one that keeps rendering even while the
//! backing application is down for maintenance.
//!
//! ## Module organization
//!
//! - `core` - error type, options and the top-level snapshot pipeline
//! - `generator` - DOM rewriting passes and markup serialization
//! - `localizer` - resource localization contract and its filesystem backend
//! - `parsers` - resource parsers (HTML, CSS)
//! - `utils` - URL helpers

pub mod core;
pub mod generator;
pub mod localizer;
pub mod parsers;
pub mod utils;

// Re-export commonly used items for convenience
pub use crate::core::*;
pub use crate::generator::*;
pub use crate::localizer::*;
pub use crate::parsers::*;
pub use crate::utils::*;
