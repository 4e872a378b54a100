// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Kubelet pod model.
//!
//! Mirrors the subset of the kubelet `/pods` payload needed for tagging. Every
//! field defaults to empty so that partially populated pods (pending pods,
//! pods without owners, containers not yet started) decode without error.

use crate::error::TaggerError;
use serde::Deserialize;
use std::collections::HashMap;

/// Prefix of pod entity identifiers.
pub const KUBE_POD_PREFIX: &str = "kubernetes_pod://";

const RUNTIME_SEPARATOR: &str = "://";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PodList {
    pub items: Vec<Pod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Pod {
    pub metadata: PodMetadata,
    pub spec: Spec,
    pub status: Status,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PodMetadata {
    pub name: String,
    pub namespace: String,
    pub uid: String,
    pub labels: HashMap<String, String>,
    pub annotations: HashMap<String, String>,
    pub owner_references: Vec<PodOwner>,
}

/// Controller reference of a pod.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PodOwner {
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Spec {
    pub containers: Vec<ContainerSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Status {
    pub container_statuses: Vec<ContainerStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerStatus {
    pub name: String,
    #[serde(rename = "containerID")]
    pub id: String,
}

impl Pod {
    pub fn owners(&self) -> &[PodOwner] {
        &self.metadata.owner_references
    }

    /// First spec entry whose name matches `container_name`.
    pub fn container_spec(&self, container_name: &str) -> Option<&ContainerSpec> {
        self.spec
            .containers
            .iter()
            .find(|spec| spec.name == container_name)
    }
}

/// Decodes a kubelet `/pods` payload.
pub fn parse_pod_list(payload: &[u8]) -> Result<Vec<Pod>, TaggerError> {
    let list: PodList = serde_json::from_slice(payload)?;
    Ok(list.items)
}

/// Builds the tagger entity name of a pod from its UID.
pub fn pod_uid_to_entity_name(uid: &str) -> String {
    if uid.is_empty() {
        return String::new();
    }
    format!("{KUBE_POD_PREFIX}{uid}")
}

/// Strips the `<runtime>://` prefix from a container id.
pub fn trim_runtime_from_cid(cid: &str) -> &str {
    match cid.find(RUNTIME_SEPARATOR) {
        Some(pos) => &cid[pos + RUNTIME_SEPARATOR.len()..],
        None => cid,
    }
}
