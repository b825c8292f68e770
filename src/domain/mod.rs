//! Custom domain composition
//!
//! Builds the fully-qualified domain name and HTTPS URL for a site served
//! under a managed DNS zone, optionally below a subdomain.

use crate::error::{Result, WebsiteError};
use serde::{Deserialize, Serialize};

/// Requested custom domain, as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DomainConfig {
    /// Base DNS zone name, e.g. `example.com` or `example.com.`
    pub base_zone_name: String,
    /// Optional label prepended to the zone name
    #[serde(default)]
    pub subdomain: Option<String>,
}

impl DomainConfig {
    pub fn new(base_zone_name: impl Into<String>, subdomain: Option<String>) -> Self {
        Self {
            base_zone_name: base_zone_name.into(),
            subdomain,
        }
    }

    pub fn compose(&self) -> Result<ComposedDomain> {
        compose_domain(&self.base_zone_name, self.subdomain.as_deref())
    }

    /// Compose the domain and derive the managed zone it lives in
    pub fn resolve(&self) -> Result<CustomDomain> {
        let composed = self.compose()?;
        Ok(CustomDomain {
            managed_zone: managed_zone_name(&self.base_zone_name),
            composed,
        })
    }
}

/// A composed domain together with its managed zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomDomain {
    pub managed_zone: String,
    pub composed: ComposedDomain,
}

/// FQDN and externally visible URL derived from a [`DomainConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedDomain {
    pub fqdn: String,
    pub url: String,
}

impl ComposedDomain {
    /// FQDN in absolute DNS form (trailing dot), as record sets expect
    pub fn dns_name(&self) -> String {
        format!("{}.", self.fqdn)
    }
}

/// Compose the FQDN and HTTPS URL for a zone and optional subdomain
///
/// Empty segments are dropped after splitting on `.`, which strips the
/// trailing dot of an absolute zone name. An empty subdomain counts as
/// absent.
///
/// # Examples
/// ```
/// use static_website::domain::compose_domain;
/// let d = compose_domain("example.com.", Some("www")).unwrap();
/// assert_eq!(d.fqdn, "www.example.com");
/// assert_eq!(d.url, "https://www.example.com");
/// ```
pub fn compose_domain(base_zone_name: &str, subdomain: Option<&str>) -> Result<ComposedDomain> {
    if base_zone_name.is_empty() {
        return Err(WebsiteError::invalid("base zone name is empty"));
    }

    let fqdn_raw = match subdomain.filter(|s| !s.is_empty()) {
        Some(sub) => format!("{sub}.{base_zone_name}"),
        None => base_zone_name.to_string(),
    };

    let fqdn = fqdn_raw
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".");

    if fqdn.is_empty() {
        return Err(WebsiteError::invalid(format!(
            "domain '{fqdn_raw}' has no labels"
        )));
    }

    let url = format!("https://{fqdn}");
    Ok(ComposedDomain { fqdn, url })
}

/// Managed zone name for a domain: Google replaces dots with dashes
///
/// Empty labels are dropped, as in [`compose_domain`].
pub fn managed_zone_name(domain: &str) -> String {
    domain
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
