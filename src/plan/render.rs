//! Plan rendering
//!
//! Serializes a plan as pretty JSON or TOML and writes it to a file or
//! stdout.

use super::types::Plan;
use crate::error::{Result, WebsiteError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Toml,
}

impl Plan {
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| WebsiteError::Render(e.to_string()))
            }
            OutputFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| WebsiteError::Render(e.to_string()))
            }
        }
    }
}

/// Write rendered output to `file`, or stdout when unset
///
/// Parent directories of `file` are created as needed.
pub fn write_plan(rendered: &str, file: Option<&str>) -> Result<()> {
    match file {
        Some(path) => {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|e| WebsiteError::io(parent, e))?;
                }
            }
            fs::write(path, rendered).map_err(|e| WebsiteError::io(path, e))
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{rendered}").map_err(|e| WebsiteError::io("<stdout>", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WebsiteConfig;
    use crate::domain::DomainConfig;
    use crate::plan::build_plan;
    use crate::site::SiteFile;
    use std::path::PathBuf;

    fn sample_plan() -> Plan {
        let mut config = WebsiteConfig::for_site("/srv/site");
        config.cdn.enabled = true;
        let root = PathBuf::from("/srv/site");
        let files = vec![
            SiteFile::from_root(&root, root.join("index.html")).unwrap(),
            SiteFile::from_root(&root, root.join("img/logo.png")).unwrap(),
        ];
        let domain = DomainConfig::new("example.com", Some("www".to_string()))
            .resolve()
            .unwrap();
        build_plan(&config, &files, Some(&domain)).unwrap()
    }

    #[test]
    fn test_render_json() {
        let plan = sample_plan();
        let rendered = plan.render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["name"], "website");
        assert_eq!(value["outputs"]["custom_domain_url"], "https://www.example.com");
        assert_eq!(value["resources"][0]["kind"], "bucket");
        assert!(value["resources"][0].get("bucket_name").is_none());
        assert_eq!(
            value["resources"].as_array().unwrap().len(),
            plan.resources.len()
        );

        let logo = value["resources"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["name"] == "objects/img/logo.png")
            .unwrap();
        assert_eq!(logo["content_type"], "image/png");
        assert_eq!(logo["depends_on"][0], "bucket");
    }

    #[test]
    fn test_render_toml() {
        let plan = sample_plan();
        let rendered = plan.render(OutputFormat::Toml).unwrap();
        let value: toml::Value = toml::from_str(&rendered).unwrap();

        assert_eq!(value["name"].as_str(), Some("website"));
        assert_eq!(
            value["outputs"]["cdn_url"].as_str(),
            Some("http://${address.address}")
        );
        let resources = value["resources"].as_array().unwrap();
        assert_eq!(resources.len(), plan.resources.len());
        assert!(resources
            .iter()
            .any(|r| r["kind"].as_str() == Some("global_address")));
    }

    #[test]
    fn test_write_plan_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/plan.json");

        write_plan("{}", path.to_str()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
