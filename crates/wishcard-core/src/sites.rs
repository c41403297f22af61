use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Display metadata for one storefront: the badge shown on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
    /// Stable key stored on each product, e.g. `"musinsa"`.
    pub key: String,
    /// Badge label, e.g. `"MUSINSA"`.
    pub name: String,
    /// CSS class the presentation layer applies to the badge.
    pub badge: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(flatten)]
    pub info: SiteInfo,
    /// URL substrings that identify this site. Matched in file order.
    pub patterns: Vec<String>,
}

/// Ordered site lookup table plus the badge used for unrecognized URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteTable {
    pub sites: Vec<SiteConfig>,
    pub fallback: SiteInfo,
}

impl Default for SiteTable {
    fn default() -> Self {
        let site = |key: &str, name: &str, patterns: &[&str]| SiteConfig {
            info: SiteInfo {
                key: key.to_string(),
                name: name.to_string(),
                badge: format!("badge-{key}"),
            },
            patterns: patterns.iter().map(|p| (*p).to_string()).collect(),
        };

        Self {
            sites: vec![
                site("musinsa", "MUSINSA", &["musinsa"]),
                site("naver", "NAVER", &["naver", "smartstore"]),
            ],
            fallback: SiteInfo {
                key: "shop".to_string(),
                name: "SHOP".to_string(),
                badge: "badge-etc".to_string(),
            },
        }
    }
}

impl SiteTable {
    /// Returns the first site whose pattern occurs in `url`, or the fallback.
    #[must_use]
    pub fn resolve(&self, url: &str) -> &SiteInfo {
        let lower = url.to_lowercase();
        self.sites
            .iter()
            .find(|s| {
                s.patterns
                    .iter()
                    .any(|p| lower.contains(&p.to_lowercase()))
            })
            .map_or(&self.fallback, |s| &s.info)
    }

    /// Looks a site up by its stored key, falling back like [`Self::resolve`].
    #[must_use]
    pub fn by_key(&self, key: &str) -> &SiteInfo {
        self.sites
            .iter()
            .map(|s| &s.info)
            .find(|info| info.key == key)
            .unwrap_or(&self.fallback)
    }
}

/// Load and validate a site table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sites(path: &Path) -> Result<SiteTable, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SitesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_sites(&content)
}

/// Parse and validate a site table from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_sites(content: &str) -> Result<SiteTable, ConfigError> {
    let table: SiteTable = serde_yaml::from_str(content)?;
    validate_sites(&table)?;
    Ok(table)
}

fn validate_sites(table: &SiteTable) -> Result<(), ConfigError> {
    let mut seen_keys = HashSet::new();

    for site in &table.sites {
        validate_info(&site.info)?;

        if !seen_keys.insert(site.info.key.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate site key: '{}'",
                site.info.key
            )));
        }

        if site.patterns.iter().all(|p| p.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "site '{}' needs at least one non-empty URL pattern",
                site.info.key
            )));
        }
    }

    validate_info(&table.fallback)?;
    if seen_keys.contains(&table.fallback.key.to_lowercase()) {
        return Err(ConfigError::Validation(format!(
            "fallback key '{}' collides with a configured site",
            table.fallback.key
        )));
    }

    Ok(())
}

fn validate_info(info: &SiteInfo) -> Result<(), ConfigError> {
    if info.key.trim().is_empty() {
        return Err(ConfigError::Validation(
            "site key must be non-empty".to_string(),
        ));
    }
    if info.name.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "site '{}' has an empty badge name",
            info.key
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "sites_test.rs"]
mod tests;
