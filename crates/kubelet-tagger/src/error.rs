// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// Errors that can occur while configuring the tagger or decoding kubelet payloads
#[derive(Debug, thiserror::Error)]
pub enum TaggerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to decode kubelet payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid image name: {0:?}")]
    InvalidImageName(String),
}
