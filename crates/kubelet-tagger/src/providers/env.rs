// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::{ConfigProvider, IntegrationConfig, ENVIRONMENT_VARIABLE};
use crate::error::TaggerError;
use std::{env, fmt};
use tracing::debug;

const CUSTOM_CONFIGS_ENV: &str = "DD_LOGS_CONFIG_CUSTOM_CONFIGS";
const CUSTOM_CONFIGS_NAME: &str = "dd_logs_config_custom_configs";

/// Reads custom logs configurations from `DD_LOGS_CONFIG_CUSTOM_CONFIGS`.
///
/// Environment variables do not change while the agent runs, so this provider
/// is meant to be collected once at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvProvider;

impl EnvProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigProvider for EnvProvider {
    fn collect(&self) -> Result<Vec<IntegrationConfig>, TaggerError> {
        let custom_configs = env::var(CUSTOM_CONFIGS_ENV).unwrap_or_default();
        let custom_configs = custom_configs.trim();

        if custom_configs.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Found custom logs configs in {}", CUSTOM_CONFIGS_ENV);
        Ok(vec![IntegrationConfig {
            provider: ENVIRONMENT_VARIABLE.to_string(),
            name: CUSTOM_CONFIGS_NAME.to_string(),
            logs_config: custom_configs.as_bytes().to_vec(),
        }])
    }

    fn is_up_to_date(&self) -> Result<bool, TaggerError> {
        Ok(false)
    }
}

impl fmt::Display for EnvProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ENVIRONMENT_VARIABLE)
    }
}
