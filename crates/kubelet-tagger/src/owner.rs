// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Owner reference tagging.
//!
//! Maps the controller of a pod to its `kube_*` tag. ReplicaSets are special:
//! when the ReplicaSet name looks generated by a Deployment, the Deployment
//! name is recovered and tagged as well.

use crate::kubelet::PodOwner;
use crate::tag_list::TagList;
use tracing::debug;

/// Characters of the random suffix Kubernetes appends to generated names.
/// Vowels and look-alike characters are excluded upstream.
pub const KUBE_ALLOWED_ENCODE_STRING_ALPHA_NUMS: &str = "bcdfghjklmnpqrstvwxz2456789";

/// Characters of ReplicaSet hash suffixes on clusters older than 1.8.
pub const DIGITS: &str = "1234567890";

const MIN_SUFFIX_LEN: usize = 3;

pub const KUBE_DEPLOYMENT_TAG: &str = "kube_deployment";
pub const KUBE_DAEMON_SET_TAG: &str = "kube_daemon_set";
pub const KUBE_REPLICATION_CONTROLLER_TAG: &str = "kube_replication_controller";
pub const KUBE_STATEFUL_SET_TAG: &str = "kube_stateful_set";
pub const KUBE_JOB_TAG: &str = "kube_job";
pub const KUBE_REPLICA_SET_TAG: &str = "kube_replica_set";

/// Controller kinds the tagger knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind {
    None,
    Deployment,
    DaemonSet,
    ReplicationController,
    StatefulSet,
    Job,
    ReplicaSet,
    Unknown,
}

impl From<&str> for OwnerKind {
    fn from(kind: &str) -> Self {
        match kind {
            "" => OwnerKind::None,
            "Deployment" => OwnerKind::Deployment,
            "DaemonSet" => OwnerKind::DaemonSet,
            "ReplicationController" => OwnerKind::ReplicationController,
            "StatefulSet" => OwnerKind::StatefulSet,
            "Job" => OwnerKind::Job,
            "ReplicaSet" => OwnerKind::ReplicaSet,
            _ => OwnerKind::Unknown,
        }
    }
}

/// Adds the tags derived from one owner reference of `pod_name`.
pub fn add_owner_tags(tags: &mut TagList, owner: &PodOwner, pod_name: &str) {
    match OwnerKind::from(owner.kind.as_str()) {
        OwnerKind::None => {}
        OwnerKind::Deployment => tags.add_low(KUBE_DEPLOYMENT_TAG, &owner.name),
        OwnerKind::DaemonSet => tags.add_low(KUBE_DAEMON_SET_TAG, &owner.name),
        OwnerKind::ReplicationController => {
            tags.add_low(KUBE_REPLICATION_CONTROLLER_TAG, &owner.name)
        }
        OwnerKind::StatefulSet => tags.add_low(KUBE_STATEFUL_SET_TAG, &owner.name),
        // TODO: jobs spawned by a CronJob have a bounded name set and could be low cardinality
        OwnerKind::Job => tags.add_high(KUBE_JOB_TAG, &owner.name),
        OwnerKind::ReplicaSet => {
            let deployment = parse_deployment_for_replicaset(&owner.name);
            if deployment.is_empty() {
                tags.add_low(KUBE_REPLICA_SET_TAG, &owner.name);
            } else {
                tags.add_high(KUBE_REPLICA_SET_TAG, &owner.name);
                tags.add_low(KUBE_DEPLOYMENT_TAG, deployment);
            }
        }
        OwnerKind::Unknown => {
            debug!("unknown owner kind {} for pod {}", owner.kind, pod_name);
        }
    }
}

/// Returns the name of the Deployment that generated a ReplicaSet, or an
/// empty string if the name does not end with a generated suffix.
///
/// A suffix is considered generated when it has at least three characters,
/// all digits or all from [`KUBE_ALLOWED_ENCODE_STRING_ALPHA_NUMS`]. This is a
/// guess: a hand-named ReplicaSet such as `cache-777` is attributed to a
/// `cache` Deployment.
pub fn parse_deployment_for_replicaset(name: &str) -> &str {
    let Some(last_dash) = name.rfind('-') else {
        return "";
    };
    let suffix = &name[last_dash + 1..];
    if suffix.len() < MIN_SUFFIX_LEN {
        return "";
    }
    if !string_in_runeset(suffix, DIGITS)
        && !string_in_runeset(suffix, KUBE_ALLOWED_ENCODE_STRING_ALPHA_NUMS)
    {
        return "";
    }
    &name[..last_dash]
}

fn string_in_runeset(value: &str, runeset: &str) -> bool {
    value.chars().all(|c| runeset.contains(c))
}
