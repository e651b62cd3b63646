//! Environment configuration for the export binaries.

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use aggregation::AccessToken;

/// Registries queried when `AZURE_ML_REGISTRY_NAMES` is not set.
///
/// This list is documentation-derived and not guaranteed accurate; a name
/// that turns out not to exist is reported as one unavailable source, not a
/// startup failure. Run `discover-registries` to curate it.
pub const DEFAULT_REGISTRY_NAMES: &str =
    "azureml,azureml-meta,azureml-cohere,azureml-mistral,azureml-xai,HuggingFace,azureml-nvidia";

/// Runtime configuration, loaded from the environment.
#[derive(Debug)]
pub struct Config {
    /// Azure subscription the catalog is listed under.
    pub subscription_id: String,

    /// Region for the catalog listing.
    pub location: String,

    /// Registries to query, in configured order.
    pub registry_names: Vec<String>,

    /// Pre-acquired bearer token, passed opaquely into the adapters.
    pub access_token: AccessToken,

    /// Report destination; a timestamped default is used when unset.
    pub output_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            subscription_id: env::var("AZURE_SUBSCRIPTION_ID")
                .context("AZURE_SUBSCRIPTION_ID must be set")?,
            location: env::var("AZURE_LOCATION").context("AZURE_LOCATION must be set")?,
            registry_names: parse_registry_names(
                &env::var("AZURE_ML_REGISTRY_NAMES")
                    .unwrap_or_else(|_| DEFAULT_REGISTRY_NAMES.to_string()),
            ),
            access_token: env::var("AZURE_ACCESS_TOKEN")
                .context("AZURE_ACCESS_TOKEN must be set")?
                .into(),
            output_path: env::var("OUTPUT_PATH").ok(),
        })
    }
}

/// Split a comma-separated registry list, trimming and dropping empties.
pub fn parse_registry_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_list_with_whitespace() {
        let names = parse_registry_names(" azureml , azureml-meta ,, HuggingFace ");
        assert_eq!(names, vec!["azureml", "azureml-meta", "HuggingFace"]);
    }

    #[test]
    fn empty_list_yields_no_registries() {
        assert!(parse_registry_names("").is_empty());
        assert!(parse_registry_names(" , ,").is_empty());
    }

    #[test]
    fn default_list_is_well_formed() {
        let names = parse_registry_names(DEFAULT_REGISTRY_NAMES);
        assert_eq!(names.len(), 7);
        assert_eq!(names[0], "azureml");
    }

    #[test]
    fn config_debug_never_leaks_the_token() {
        let config = Config {
            subscription_id: "sub".to_string(),
            location: "eastus".to_string(),
            registry_names: vec![],
            access_token: "very-secret".into(),
            output_path: None,
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("very-secret"));
    }
}
