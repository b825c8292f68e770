//! Resource plan builder
//!
//! Lays out the resources for a website in dependency order: the bucket and
//! its public-read binding, one object per site file, then optionally the
//! CDN load-balancer chain and the custom domain's DNS record and
//! certificate.

use super::types::{
    reference, BucketWebsite, Plan, PlanOutputs, Resource, ResourceSpec, ALL_USERS,
    DNS_RECORD_TTL, OBJECT_VIEWER_ROLE, STORAGE_ENDPOINT,
};
use crate::config::WebsiteConfig;
use crate::domain::CustomDomain;
use crate::error::{Result, WebsiteError};
use crate::logger;
use crate::site::SiteFile;
use std::collections::HashSet;

pub const BUCKET: &str = "bucket";
pub const BUCKET_IAM_BINDING: &str = "bucket-iam-binding";
pub const BACKEND_BUCKET: &str = "backend-bucket";
pub const ADDRESS: &str = "address";
pub const URL_MAP: &str = "url-map";
pub const HTTP_PROXY: &str = "http-proxy";
pub const HTTP_FORWARDING_RULE: &str = "http-forwarding-rule";
pub const RECORD_SET: &str = "record-set";
pub const CERT: &str = "cert";
pub const HTTPS_PROXY: &str = "https-proxy";
pub const HTTPS_FORWARDING_RULE: &str = "https-forwarding-rule";

/// Logical name of the object resource for a site file
///
/// The prefix keeps object names apart from the fixed resource names.
pub fn object_resource_name(relative_path: &str) -> String {
    format!("objects/{relative_path}")
}

/// Build the plan for `config` from enumerated files and an optional domain
pub fn build_plan(
    config: &WebsiteConfig,
    files: &[SiteFile],
    domain: Option<&CustomDomain>,
) -> Result<Plan> {
    PlanBuilder::new(config).build(files, domain)
}

/// Accumulates resources, enforcing unique names and backward dependencies
pub struct PlanBuilder<'a> {
    config: &'a WebsiteConfig,
    resources: Vec<Resource>,
    names: HashSet<String>,
}

impl<'a> PlanBuilder<'a> {
    pub fn new(config: &'a WebsiteConfig) -> Self {
        Self {
            config,
            resources: Vec::new(),
            names: HashSet::new(),
        }
    }

    pub fn build(mut self, files: &[SiteFile], domain: Option<&CustomDomain>) -> Result<Plan> {
        self.add_bucket()?;
        self.add_objects(files)?;

        let bucket = self.bucket_name();
        let origin_url = format!(
            "{STORAGE_ENDPOINT}/{bucket}/{}",
            self.config.site.index_document
        );

        let mut cdn_url = None;
        let mut custom_domain_url = None;

        if self.config.cdn.enabled {
            cdn_url = Some(self.add_cdn()?);
            if let Some(domain) = domain {
                custom_domain_url = Some(self.add_custom_domain(domain)?);
            }
        } else if let Some(domain) = domain {
            logger::log_domain_ignored(&domain.composed.fqdn);
        }

        Ok(Plan {
            name: self.config.name.clone(),
            outputs: PlanOutputs {
                origin_url,
                cdn_url,
                custom_domain_url,
            },
            resources: self.resources,
        })
    }

    fn push(&mut self, name: impl Into<String>, spec: ResourceSpec, depends_on: &[&str]) -> Result<()> {
        let name = name.into();

        if let Some(missing) = depends_on.iter().find(|dep| !self.names.contains(**dep)) {
            return Err(WebsiteError::invalid(format!(
                "resource '{name}' depends on unknown resource '{missing}'"
            )));
        }
        if !self.names.insert(name.clone()) {
            return Err(WebsiteError::invalid(format!(
                "duplicate resource name '{name}'"
            )));
        }

        self.resources.push(Resource {
            name,
            spec,
            depends_on: depends_on.iter().map(ToString::to_string).collect(),
        });
        Ok(())
    }

    /// Configured bucket name, or a reference to the provider-assigned one
    fn bucket_name(&self) -> String {
        self.config
            .storage
            .bucket_name
            .clone()
            .unwrap_or_else(|| reference(BUCKET, "name"))
    }

    fn add_bucket(&mut self) -> Result<()> {
        let storage = &self.config.storage;
        let site = &self.config.site;
        let bucket = ResourceSpec::Bucket {
            bucket_name: storage.bucket_name.clone(),
            location: storage.location.clone(),
            force_destroy: storage.force_destroy,
            website: BucketWebsite {
                main_page_suffix: site.index_document.clone(),
                not_found_page: site.error_document.clone(),
            },
        };
        self.push(BUCKET, bucket, &[])?;

        let binding = ResourceSpec::BucketIamBinding {
            bucket: self.bucket_name(),
            role: OBJECT_VIEWER_ROLE.to_string(),
            members: vec![ALL_USERS.to_string()],
        };
        self.push(BUCKET_IAM_BINDING, binding, &[BUCKET])
    }

    fn add_objects(&mut self, files: &[SiteFile]) -> Result<()> {
        let bucket = self.bucket_name();
        for file in files {
            let object = ResourceSpec::BucketObject {
                bucket: bucket.clone(),
                object_name: file.relative_path.clone(),
                source: file.absolute_path.to_string_lossy().into_owned(),
                content_type: file.content_type.clone(),
            };
            self.push(object_resource_name(&file.relative_path), object, &[BUCKET])?;
        }
        Ok(())
    }

    /// Backend bucket behind a global HTTP load balancer; returns the CDN URL
    fn add_cdn(&mut self) -> Result<String> {
        let backend = ResourceSpec::BackendBucket {
            bucket_name: self.bucket_name(),
            enable_cdn: true,
        };
        self.push(BACKEND_BUCKET, backend, &[BUCKET])?;

        self.push(ADDRESS, ResourceSpec::GlobalAddress, &[])?;

        let url_map = ResourceSpec::UrlMap {
            default_service: reference(BACKEND_BUCKET, "self_link"),
        };
        self.push(URL_MAP, url_map, &[BACKEND_BUCKET])?;

        let proxy = ResourceSpec::TargetHttpProxy {
            url_map: reference(URL_MAP, "self_link"),
        };
        self.push(HTTP_PROXY, proxy, &[URL_MAP])?;

        let rule = forwarding_rule("80", HTTP_PROXY);
        self.push(HTTP_FORWARDING_RULE, rule, &[ADDRESS, HTTP_PROXY])?;

        Ok(format!("http://{}", reference(ADDRESS, "address")))
    }

    /// DNS record, managed certificate and HTTPS listener; returns the URL
    fn add_custom_domain(&mut self, domain: &CustomDomain) -> Result<String> {
        let record = ResourceSpec::DnsRecordSet {
            dns_name: domain.composed.dns_name(),
            record_type: "A".to_string(),
            managed_zone: domain.managed_zone.clone(),
            ttl: DNS_RECORD_TTL,
            rrdatas: vec![reference(ADDRESS, "address")],
        };
        self.push(RECORD_SET, record, &[ADDRESS])?;

        let cert = ResourceSpec::ManagedSslCertificate {
            domains: vec![domain.composed.dns_name()],
        };
        self.push(CERT, cert, &[])?;

        let proxy = ResourceSpec::TargetHttpsProxy {
            url_map: reference(URL_MAP, "self_link"),
            ssl_certificates: vec![reference(CERT, "self_link")],
        };
        self.push(HTTPS_PROXY, proxy, &[URL_MAP, CERT])?;

        let rule = forwarding_rule("443", HTTPS_PROXY);
        self.push(HTTPS_FORWARDING_RULE, rule, &[ADDRESS, HTTPS_PROXY])?;

        Ok(domain.composed.url.clone())
    }
}

fn forwarding_rule(port: &str, proxy: &str) -> ResourceSpec {
    ResourceSpec::GlobalForwardingRule {
        ip_address: reference(ADDRESS, "address"),
        ip_protocol: "TCP".to_string(),
        port_range: port.to_string(),
        target: reference(proxy, "self_link"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DomainSettings;
    use std::path::PathBuf;

    fn site_files(paths: &[&str]) -> Vec<SiteFile> {
        let root = PathBuf::from("/srv/site");
        paths
            .iter()
            .map(|p| SiteFile::from_root(&root, root.join(p)).unwrap())
            .collect()
    }

    fn domain(name: &str, subdomain: Option<&str>) -> CustomDomain {
        DomainSettings {
            name: name.to_string(),
            subdomain: subdomain.map(ToString::to_string),
        }
        .to_domain_config()
        .resolve()
        .unwrap()
    }

    fn kinds(plan: &Plan) -> Vec<&'static str> {
        plan.resources.iter().map(|r| r.spec.kind()).collect()
    }

    fn assert_well_formed(plan: &Plan) {
        let mut seen = HashSet::new();
        for resource in &plan.resources {
            for dep in &resource.depends_on {
                assert!(seen.contains(dep), "{} depends on later {dep}", resource.name);
            }
            assert!(seen.insert(resource.name.clone()), "duplicate {}", resource.name);
        }
    }

    #[test]
    fn test_bucket_only() {
        let config = WebsiteConfig::for_site("/srv/site");
        let files = site_files(&["index.html", "css/site.css"]);

        let plan = build_plan(&config, &files, None).unwrap();
        assert_well_formed(&plan);
        assert_eq!(
            kinds(&plan),
            vec!["bucket", "bucket_iam_binding", "bucket_object", "bucket_object"]
        );
        assert_eq!(plan.object_count(), 2);
        assert_eq!(
            plan.outputs.origin_url,
            "https://storage.googleapis.com/${bucket.name}/index.html"
        );
        assert!(plan.outputs.cdn_url.is_none());
        assert!(plan.outputs.custom_domain_url.is_none());

        let Some(ResourceSpec::BucketObject {
            object_name,
            content_type,
            source,
            ..
        }) = plan.resource("objects/css/site.css").map(|r| &r.spec)
        else {
            panic!("missing css object");
        };
        assert_eq!(object_name, "css/site.css");
        assert_eq!(content_type, "text/css");
        assert!(source.ends_with("site.css"));
    }

    #[test]
    fn test_bucket_settings() {
        let mut config = WebsiteConfig::for_site("/srv/site");
        config.site.index_document = "home.html".to_string();
        config.site.error_document = "404.html".to_string();
        config.storage.bucket_name = Some("my-site".to_string());

        let plan = build_plan(&config, &[], None).unwrap();
        assert_eq!(
            plan.outputs.origin_url,
            "https://storage.googleapis.com/my-site/home.html"
        );

        let bucket = &plan.resource(BUCKET).unwrap().spec;
        assert_eq!(
            *bucket,
            ResourceSpec::Bucket {
                bucket_name: Some("my-site".to_string()),
                location: "US".to_string(),
                force_destroy: true,
                website: BucketWebsite {
                    main_page_suffix: "home.html".to_string(),
                    not_found_page: "404.html".to_string(),
                },
            }
        );

        let binding = &plan.resource(BUCKET_IAM_BINDING).unwrap().spec;
        assert_eq!(
            *binding,
            ResourceSpec::BucketIamBinding {
                bucket: "my-site".to_string(),
                role: "roles/storage.objectViewer".to_string(),
                members: vec!["allUsers".to_string()],
            }
        );
    }

    #[test]
    fn test_with_cdn() {
        let mut config = WebsiteConfig::for_site("/srv/site");
        config.cdn.enabled = true;

        let plan = build_plan(&config, &site_files(&["index.html"]), None).unwrap();
        assert_well_formed(&plan);
        assert_eq!(
            kinds(&plan),
            vec![
                "bucket",
                "bucket_iam_binding",
                "bucket_object",
                "backend_bucket",
                "global_address",
                "url_map",
                "target_http_proxy",
                "global_forwarding_rule",
            ]
        );
        assert_eq!(plan.outputs.cdn_url.as_deref(), Some("http://${address.address}"));
        assert!(plan.outputs.custom_domain_url.is_none());

        let rule = &plan.resource(HTTP_FORWARDING_RULE).unwrap().spec;
        assert_eq!(
            *rule,
            ResourceSpec::GlobalForwardingRule {
                ip_address: "${address.address}".to_string(),
                ip_protocol: "TCP".to_string(),
                port_range: "80".to_string(),
                target: "${http-proxy.self_link}".to_string(),
            }
        );
    }

    #[test]
    fn test_with_cdn_and_domain() {
        let mut config = WebsiteConfig::for_site("/srv/site");
        config.cdn.enabled = true;
        let custom = domain("example.com", Some("www"));

        let plan = build_plan(&config, &site_files(&["index.html"]), Some(&custom)).unwrap();
        assert_well_formed(&plan);
        assert_eq!(plan.resources.len(), 12);
        assert_eq!(
            plan.outputs.custom_domain_url.as_deref(),
            Some("https://www.example.com")
        );

        let record = &plan.resource(RECORD_SET).unwrap().spec;
        assert_eq!(
            *record,
            ResourceSpec::DnsRecordSet {
                dns_name: "www.example.com.".to_string(),
                record_type: "A".to_string(),
                managed_zone: "example-com".to_string(),
                ttl: 300,
                rrdatas: vec!["${address.address}".to_string()],
            }
        );

        let https = &plan.resource(HTTPS_FORWARDING_RULE).unwrap();
        assert_eq!(https.depends_on, vec![ADDRESS, HTTPS_PROXY]);
        assert!(matches!(
            &https.spec,
            ResourceSpec::GlobalForwardingRule { port_range, .. } if port_range == "443"
        ));
    }

    #[test]
    fn test_domain_without_cdn_is_ignored() {
        let config = WebsiteConfig::for_site("/srv/site");
        let custom = domain("example.com", None);

        let plan = build_plan(&config, &[], Some(&custom)).unwrap();
        assert_eq!(kinds(&plan), vec!["bucket", "bucket_iam_binding"]);
        assert!(plan.outputs.custom_domain_url.is_none());
    }

    #[test]
    fn test_object_names_do_not_collide_with_resources() {
        let mut config = WebsiteConfig::for_site("/srv/site");
        config.cdn.enabled = true;
        let files = site_files(&["address", "bucket", "url-map"]);

        let plan = build_plan(&config, &files, None).unwrap();
        assert_well_formed(&plan);
        assert_eq!(plan.object_count(), 3);
    }

    #[test]
    fn test_push_rejects_unknown_dependency_and_duplicates() {
        let config = WebsiteConfig::for_site("/srv/site");
        let mut builder = PlanBuilder::new(&config);

        assert!(builder
            .push(ADDRESS, ResourceSpec::GlobalAddress, &[URL_MAP])
            .is_err());
        builder.push(ADDRESS, ResourceSpec::GlobalAddress, &[]).unwrap();
        assert!(builder.push(ADDRESS, ResourceSpec::GlobalAddress, &[]).is_err());
    }

    #[test]
    fn test_deterministic() {
        let mut config = WebsiteConfig::for_site("/srv/site");
        config.cdn.enabled = true;
        let files = site_files(&["index.html", "error.html"]);
        let custom = domain("example.com.", None);

        assert_eq!(
            build_plan(&config, &files, Some(&custom)).unwrap(),
            build_plan(&config, &files, Some(&custom)).unwrap()
        );
    }
}
