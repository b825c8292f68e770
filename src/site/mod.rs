//! Site content module
//!
//! Discovers the files of a static site and resolves the Content-Type
//! each one is published with.

pub mod files;
pub mod mime;

pub use files::{enumerate, SiteFile};
pub use mime::{resolve_content_type, DEFAULT_CONTENT_TYPE};
