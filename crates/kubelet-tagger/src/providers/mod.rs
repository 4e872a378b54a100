// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Sources of integration configurations.

pub mod env;

use crate::error::TaggerError;
use std::fmt;

/// Provider name of configurations read from environment variables.
pub const ENVIRONMENT_VARIABLE: &str = "environment-variable";

/// Integration configuration produced by a [`ConfigProvider`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationConfig {
    pub provider: String,
    pub name: String,
    /// Raw logs configuration, left for the logs agent to parse.
    pub logs_config: Vec<u8>,
}

/// A source of integration configurations.
pub trait ConfigProvider: fmt::Display {
    /// Returns the configurations currently available from this source.
    fn collect(&self) -> Result<Vec<IntegrationConfig>, TaggerError>;

    /// Whether the configurations returned by the last [`collect`](Self::collect)
    /// are still current.
    fn is_up_to_date(&self) -> Result<bool, TaggerError>;
}
