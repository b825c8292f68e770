// Configuration types module
// Defines all configuration-related data structures

use crate::domain::DomainConfig;
use crate::logger::{LogFormat, LogLevel};
use crate::plan::OutputFormat;
use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "website";
pub const DEFAULT_INDEX_DOCUMENT: &str = "index.html";
pub const DEFAULT_ERROR_DOCUMENT: &str = "error.html";
pub const DEFAULT_LOCATION: &str = "US";

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WebsiteConfig {
    /// Component name, used in log lines and the rendered plan
    pub name: String,
    pub site: SiteConfig,
    pub storage: StorageConfig,
    pub cdn: CdnConfig,
    /// Custom domain (only wired when the CDN is enabled)
    #[serde(default)]
    pub domain: Option<DomainSettings>,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

impl WebsiteConfig {
    /// Configuration for `site_path` with every other value defaulted
    pub fn for_site(site_path: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            site: SiteConfig {
                path: site_path.into(),
                ..SiteConfig::default()
            },
            storage: StorageConfig::default(),
            cdn: CdnConfig::default(),
            domain: None,
            logging: LoggingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Site content configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Root directory holding the site's files
    #[serde(default)]
    pub path: String,
    /// Default document served for directory requests
    pub index_document: String,
    /// Document served for missing objects
    pub error_document: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            index_document: DEFAULT_INDEX_DOCUMENT.to_string(),
            error_document: DEFAULT_ERROR_DOCUMENT.to_string(),
        }
    }
}

/// Storage bucket configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Explicit bucket name; auto-named by the provider when unset
    #[serde(default)]
    pub bucket_name: Option<String>,
    pub location: String,
    /// Delete contained objects when the bucket is destroyed
    pub force_destroy: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket_name: None,
            location: DEFAULT_LOCATION.to_string(),
            force_destroy: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct CdnConfig {
    pub enabled: bool,
}

/// Custom domain settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DomainSettings {
    /// Domain of the managed zone, e.g. `example.com`
    pub name: String,
    #[serde(default)]
    pub subdomain: Option<String>,
}

impl DomainSettings {
    pub fn to_domain_config(&self) -> DomainConfig {
        DomainConfig::new(self.name.clone(), self.subdomain.clone())
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: LogLevel,
    #[serde(default)]
    pub format: LogFormat,
    /// Info log file path (optional, stderr if not set)
    #[serde(default)]
    pub info_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Text,
            info_log_file: None,
            error_log_file: None,
        }
    }
}

/// Rendered plan destination
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Output file path (optional, stdout if not set)
    #[serde(default)]
    pub file: Option<String>,
}
