//! Resource plan types
//!
//! A plan is an ordered list of declarative resource records. Values only
//! known once the provider has created a resource are written as
//! `${<resource>.<attribute>}` references.

use serde::Serialize;

pub const OBJECT_VIEWER_ROLE: &str = "roles/storage.objectViewer";
pub const ALL_USERS: &str = "allUsers";
pub const STORAGE_ENDPOINT: &str = "https://storage.googleapis.com";
pub const DNS_RECORD_TTL: u32 = 300;

/// Reference to an attribute of another resource in the plan
pub fn reference(resource: &str, attribute: &str) -> String {
    format!("${{{resource}.{attribute}}}")
}

/// Complete provisioning plan for one website
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// Component name
    pub name: String,
    pub outputs: PlanOutputs,
    pub resources: Vec<Resource>,
}

impl Plan {
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Number of bucket objects (one per site file)
    pub fn object_count(&self) -> usize {
        self.resources
            .iter()
            .filter(|r| matches!(r.spec, ResourceSpec::BucketObject { .. }))
            .count()
    }
}

/// User-facing outputs of the component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanOutputs {
    /// Index document served straight from the bucket
    pub origin_url: String,
    /// Load balancer endpoint, when the CDN is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn_url: Option<String>,
    /// HTTPS URL of the custom domain, when one is wired
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_domain_url: Option<String>,
}

/// A single resource record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    /// Logical name, unique within the plan
    pub name: String,
    #[serde(flatten)]
    pub spec: ResourceSpec,
    /// Names of resources that must exist first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

/// Bucket website settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketWebsite {
    pub main_page_suffix: String,
    pub not_found_page: String,
}

/// Resource kinds, one per cloud resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceSpec {
    Bucket {
        /// Provider auto-names the bucket when unset
        #[serde(skip_serializing_if = "Option::is_none")]
        bucket_name: Option<String>,
        location: String,
        force_destroy: bool,
        website: BucketWebsite,
    },
    BucketIamBinding {
        bucket: String,
        role: String,
        members: Vec<String>,
    },
    BucketObject {
        bucket: String,
        /// Object key
        object_name: String,
        /// Local file uploaded as the object's content
        source: String,
        content_type: String,
    },
    BackendBucket {
        bucket_name: String,
        enable_cdn: bool,
    },
    GlobalAddress,
    UrlMap {
        default_service: String,
    },
    TargetHttpProxy {
        url_map: String,
    },
    TargetHttpsProxy {
        url_map: String,
        ssl_certificates: Vec<String>,
    },
    GlobalForwardingRule {
        ip_address: String,
        ip_protocol: String,
        port_range: String,
        target: String,
    },
    DnsRecordSet {
        dns_name: String,
        #[serde(rename = "type")]
        record_type: String,
        managed_zone: String,
        ttl: u32,
        rrdatas: Vec<String>,
    },
    ManagedSslCertificate {
        domains: Vec<String>,
    },
}

impl ResourceSpec {
    /// Snake-case kind name, as serialized
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bucket { .. } => "bucket",
            Self::BucketIamBinding { .. } => "bucket_iam_binding",
            Self::BucketObject { .. } => "bucket_object",
            Self::BackendBucket { .. } => "backend_bucket",
            Self::GlobalAddress => "global_address",
            Self::UrlMap { .. } => "url_map",
            Self::TargetHttpProxy { .. } => "target_http_proxy",
            Self::TargetHttpsProxy { .. } => "target_https_proxy",
            Self::GlobalForwardingRule { .. } => "global_forwarding_rule",
            Self::DnsRecordSet { .. } => "dns_record_set",
            Self::ManagedSslCertificate { .. } => "managed_ssl_certificate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference() {
        assert_eq!(reference("address", "address"), "${address.address}");
        assert_eq!(reference("url-map", "self_link"), "${url-map.self_link}");
    }

    #[test]
    fn test_kind_matches_serialized_tag() {
        let specs = [
            ResourceSpec::GlobalAddress,
            ResourceSpec::UrlMap {
                default_service: reference("backend-bucket", "self_link"),
            },
            ResourceSpec::DnsRecordSet {
                dns_name: "www.example.com.".to_string(),
                record_type: "A".to_string(),
                managed_zone: "example-com".to_string(),
                ttl: DNS_RECORD_TTL,
                rrdatas: vec![reference("address", "address")],
            },
        ];

        for spec in specs {
            let value = serde_json::to_value(&spec).unwrap();
            assert_eq!(value["kind"], spec.kind());
        }
    }

    #[test]
    fn test_resource_flattens_spec() {
        let resource = Resource {
            name: "record-set".to_string(),
            spec: ResourceSpec::DnsRecordSet {
                dns_name: "example.com.".to_string(),
                record_type: "A".to_string(),
                managed_zone: "example-com".to_string(),
                ttl: DNS_RECORD_TTL,
                rrdatas: vec!["${address.address}".to_string()],
            },
            depends_on: vec!["address".to_string()],
        };

        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(value["name"], "record-set");
        assert_eq!(value["kind"], "dns_record_set");
        assert_eq!(value["type"], "A");
        assert_eq!(value["depends_on"][0], "address");
    }
}
