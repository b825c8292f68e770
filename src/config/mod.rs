// Configuration module entry point
// Loads layered configuration (file, environment, defaults) and validates it

mod types;

pub use types::{
    CdnConfig, DomainSettings, LoggingConfig, OutputConfig, SiteConfig, StorageConfig,
    WebsiteConfig, DEFAULT_ERROR_DOCUMENT, DEFAULT_INDEX_DOCUMENT, DEFAULT_LOCATION, DEFAULT_NAME,
};

use crate::error::{Result, WebsiteError};

/// Environment variable prefix, e.g. `WEBSITE__SITE__PATH`
pub const ENV_PREFIX: &str = "WEBSITE";

/// `WEBSITE__<SECTION>__<KEY>` overrides, with scalar parsing
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

impl WebsiteConfig {
    /// Load configuration from specified file path (extension optional)
    /// Environment variables override the file; defaults fill the rest
    pub fn load_from(config_path: &str) -> Result<Self> {
        Self::load_with_env(config_path, environment())
    }

    fn load_with_env(config_path: &str, env: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(env)
            .set_default("name", DEFAULT_NAME)?
            .set_default("site.index_document", DEFAULT_INDEX_DOCUMENT)?
            .set_default("site.error_document", DEFAULT_ERROR_DOCUMENT)?
            .set_default("storage.location", DEFAULT_LOCATION)?
            .set_default("storage.force_destroy", true)?
            .set_default("cdn.enabled", false)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "text")?
            .set_default("output.format", "json")?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Reject empty or degenerate values before any work is done
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(WebsiteError::invalid("name must not be empty"));
        }
        if self.site.path.trim().is_empty() {
            return Err(WebsiteError::invalid("site.path is required"));
        }
        if self.site.index_document.trim().is_empty() {
            return Err(WebsiteError::invalid("site.index_document must not be empty"));
        }
        if self.site.error_document.trim().is_empty() {
            return Err(WebsiteError::invalid("site.error_document must not be empty"));
        }
        if let Some(ref bucket) = self.storage.bucket_name {
            if bucket.trim().is_empty() {
                return Err(WebsiteError::invalid("storage.bucket_name must not be empty"));
            }
        }
        if let Some(ref domain) = self.domain {
            if domain.name.trim().is_empty() {
                return Err(WebsiteError::invalid("domain.name must not be empty"));
            }
        }
        Ok(())
    }
}
