// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::error::TaggerError;
use std::collections::HashMap;
use std::env;

const LABELS_AS_TAGS_ENV: &str = "DD_KUBERNETES_POD_LABELS_AS_TAGS";
const ANNOTATIONS_AS_TAGS_ENV: &str = "DD_KUBERNETES_POD_ANNOTATIONS_AS_TAGS";
const LOG_LEVEL_ENV: &str = "DD_LOG_LEVEL";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration of the kubelet tagger
#[derive(Debug, Clone)]
pub struct TaggerConfig {
    /// Lower-cased glob pattern on label names -> tag name template
    pub labels_as_tags: HashMap<String, String>,
    /// Lower-cased annotation name -> tag name
    pub annotations_as_tags: HashMap<String, String>,
    /// Log level (e.g., trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            labels_as_tags: HashMap::new(),
            annotations_as_tags: HashMap::new(),
            log_level: "info".to_string(),
        }
    }
}

impl TaggerConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, TaggerError> {
        let labels_as_tags = read_tag_mapping(LABELS_AS_TAGS_ENV)?;
        let annotations_as_tags = read_tag_mapping(ANNOTATIONS_AS_TAGS_ENV)?;
        let log_level = env::var(LOG_LEVEL_ENV)
            .map(|val| val.to_lowercase())
            .unwrap_or_else(|_| "info".to_string());

        let config = Self {
            labels_as_tags,
            annotations_as_tags,
            log_level,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), TaggerError> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(TaggerError::InvalidConfig(format!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        if let Some((name, _)) = self
            .labels_as_tags
            .iter()
            .chain(self.annotations_as_tags.iter())
            .find(|(_, tag)| tag.trim().is_empty())
        {
            return Err(TaggerError::InvalidConfig(format!(
                "Empty tag name configured for '{name}'"
            )));
        }

        Ok(())
    }
}

/// Reads a JSON object of `name -> tag` from `var`, lower-casing the names.
/// An unset or blank variable yields an empty mapping.
fn read_tag_mapping(var: &str) -> Result<HashMap<String, String>, TaggerError> {
    let raw = match env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(HashMap::new()),
    };

    let mapping: HashMap<String, String> = serde_json::from_str(&raw)
        .map_err(|e| TaggerError::InvalidConfig(format!("{var} is not a valid JSON map: {e}")))?;

    Ok(mapping
        .into_iter()
        .map(|(name, tag)| (name.to_lowercase(), tag))
        .collect())
}
