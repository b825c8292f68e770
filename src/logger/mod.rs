//! Logger module
//!
//! Provides logging utilities for the plan generator:
//! - Leveled, timestamped text or JSON lines
//! - Lifecycle logging (config, scan, domain, plan)
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::{LogFormat, LogLevel, LogRecord};

use crate::config::{LoggingConfig, WebsiteConfig};
use crate::domain::CustomDomain;
use crate::error::Result;
use crate::plan::Plan;
use std::path::Path;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &LoggingConfig) -> Result<()> {
    writer::init(
        config.level,
        config.format,
        config.info_log_file.as_deref(),
        config.error_log_file.as_deref(),
    )
}

/// Write a line at `level`
///
/// Before `init()`, lines at info and above go to stderr as text.
fn write(level: LogLevel, message: &str) {
    if let Some(w) = writer::get() {
        w.write(level, message);
    } else if level.enabled(LogLevel::Info) {
        eprintln!("{}", LogRecord::new(level, message).format(LogFormat::Text));
    }
}

pub fn log_info(message: &str) {
    write(LogLevel::Info, message);
}

pub fn log_debug(message: &str) {
    write(LogLevel::Debug, message);
}

pub fn log_warning(message: &str) {
    write(LogLevel::Warn, message);
}

pub fn log_error(message: &str) {
    write(LogLevel::Error, message);
}

pub fn log_config_loaded(config_path: &str, config: &WebsiteConfig) {
    log_info(&format!("[Config] Loaded '{config_path}' for website '{}'", config.name));
    log_debug(&format!("[Config] Site root: {}", config.site.path));
    log_debug(&format!(
        "[Config] Index: {}, error: {}",
        config.site.index_document, config.site.error_document
    ));
    log_debug(&format!("[Config] CDN enabled: {}", config.cdn.enabled));
}

pub fn log_site_scanned(root: &str, file_count: usize) {
    log_info(&format!("[Site] Found {file_count} file(s) under '{root}'"));
}

pub fn log_skipped_entry(path: &Path, reason: &str) {
    log_debug(&format!("[Site] Skipped '{}': {reason}", path.display()));
}

pub fn log_domain_composed(domain: &CustomDomain) {
    log_info(&format!(
        "[Domain] {} (zone {}) -> {}",
        domain.composed.fqdn, domain.managed_zone, domain.composed.url
    ));
}

pub fn log_domain_ignored(domain: &str) {
    log_warning(&format!(
        "[Domain] Custom domain '{domain}' ignored: it requires cdn.enabled = true"
    ));
}

pub fn log_plan_built(plan: &Plan) {
    log_info(&format!(
        "[Plan] {} resource(s), {} object(s)",
        plan.resources.len(),
        plan.object_count()
    ));
    log_info(&format!("[Plan] Origin URL: {}", plan.outputs.origin_url));
    if let Some(ref url) = plan.outputs.cdn_url {
        log_info(&format!("[Plan] CDN URL: {url}"));
    }
    if let Some(ref url) = plan.outputs.custom_domain_url {
        log_info(&format!("[Plan] Custom domain URL: {url}"));
    }
}

pub fn log_plan_written(destination: Option<&str>) {
    log_info(&format!(
        "[Plan] Written to {}",
        destination.unwrap_or("stdout")
    ));
}
