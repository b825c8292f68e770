//! Resource plan module
//!
//! Turns a website configuration into a declarative, dependency-ordered
//! provisioning plan for the external orchestration layer.

mod builder;
mod render;
mod types;

pub use builder::{build_plan, object_resource_name, PlanBuilder};
pub use render::{write_plan, OutputFormat};
pub use types::{reference, BucketWebsite, Plan, PlanOutputs, Resource, ResourceSpec};

use crate::config::WebsiteConfig;
use crate::domain::CustomDomain;
use crate::error::Result;
use crate::logger;
use crate::site;

/// Validate `config`, scan the site, compose the domain and build the plan
pub fn plan_website(config: &WebsiteConfig) -> Result<Plan> {
    config.validate()?;

    let files = site::enumerate(&config.site.path)?;
    logger::log_site_scanned(&config.site.path, files.len());

    let domain = custom_domain(config)?;
    if let Some(ref d) = domain {
        logger::log_domain_composed(d);
    }

    let plan = build_plan(config, &files, domain.as_ref())?;
    logger::log_plan_built(&plan);
    Ok(plan)
}

/// Resolve the configured custom domain, if any
pub fn custom_domain(config: &WebsiteConfig) -> Result<Option<CustomDomain>> {
    config
        .domain
        .as_ref()
        .map(|d| d.to_domain_config().resolve())
        .transpose()
}
