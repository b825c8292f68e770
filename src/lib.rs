//! Static website planner
//!
//! Scans a directory of static site files and produces a declarative plan
//! for publishing it on Google Cloud Storage: one object per file with its
//! Content-Type, an optional CDN load balancer, and an optional custom
//! domain with a managed TLS certificate. Provisioning itself is left to
//! an external orchestration layer.

pub mod config;
pub mod domain;
pub mod error;
pub mod logger;
pub mod plan;
pub mod site;

pub use error::{Result, WebsiteError};
