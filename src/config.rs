//! Runtime configuration: compiled-in defaults with environment overrides.

use anyhow::{Context, Result};
use std::str::FromStr;

pub const DEFAULT_EDUCATION_URL: &str = "https://cdn.freecodecamp.org/testable-projects-fcc/data/choropleth_map/for_user_education.json";
pub const DEFAULT_TOPOLOGY_URL: &str =
    "https://cdn.freecodecamp.org/testable-projects-fcc/data/choropleth_map/counties.json";

/// Canvas and data-source settings for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub education_url: String,
    pub topology_url: String,
    pub width: f64,
    pub height: f64,
    /// Number of color classes. The palette always has the same size.
    pub bucket_count: usize,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            education_url: DEFAULT_EDUCATION_URL.to_string(),
            topology_url: DEFAULT_TOPOLOGY_URL.to_string(),
            width: 960.0,
            height: 600.0,
            bucket_count: 9,
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl MapConfig {
    /// Builds a config from the process environment.
    ///
    /// Recognized variables: `EDUCATION_URL`, `TOPOLOGY_URL`, `MAP_WIDTH`,
    /// `MAP_HEIGHT`, `MAP_BUCKETS`, `FETCH_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults
    /// for keys that are absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("EDUCATION_URL") {
            config.education_url = url;
        }
        if let Some(url) = lookup("TOPOLOGY_URL") {
            config.topology_url = url;
        }
        if let Some(width) = parse_var(&lookup, "MAP_WIDTH")? {
            config.width = width;
        }
        if let Some(height) = parse_var(&lookup, "MAP_HEIGHT")? {
            config.height = height;
        }
        if let Some(buckets) = parse_var(&lookup, "MAP_BUCKETS")? {
            config.bucket_count = buckets;
        }
        if let Some(secs) = parse_var(&lookup, "FETCH_TIMEOUT_SECS")? {
            config.timeout_secs = secs;
        }

        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("invalid value for {key}: '{raw}'"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let config = MapConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, MapConfig::default());
        assert_eq!(config.bucket_count, 9);
        assert_eq!(config.width, 960.0);
    }

    #[test]
    fn test_overrides_applied() {
        let config = MapConfig::from_lookup(lookup_from(&[
            ("EDUCATION_URL", "edu.json"),
            ("MAP_WIDTH", "1200"),
            ("MAP_BUCKETS", " 5 "),
            ("FETCH_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.education_url, "edu.json");
        assert_eq!(config.topology_url, DEFAULT_TOPOLOGY_URL);
        assert_eq!(config.width, 1200.0);
        assert_eq!(config.bucket_count, 5);
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_invalid_value_names_variable() {
        let err = MapConfig::from_lookup(lookup_from(&[("MAP_HEIGHT", "tall")])).unwrap_err();
        assert!(err.to_string().contains("MAP_HEIGHT"));
    }
}
