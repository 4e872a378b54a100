// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Pod and container tag extraction.
//!
//! [`KubeletCollector::parse_pods`] builds one [`TagInfo`] per pod with a UID
//! and one per container status. Container tags start from a copy of the pod
//! tags, so the pod record never sees container-level additions.
//!
//! Problems with a single field (a label no rule matches, an unknown owner
//! kind, an image that cannot be split) only drop the affected tags and are
//! reported at debug level.

use crate::config::TaggerConfig;
use crate::error::TaggerError;
use crate::image::split_image_name;
use crate::kubelet::{
    parse_pod_list, pod_uid_to_entity_name, trim_runtime_from_cid, ContainerStatus, Pod,
};
use crate::owner::add_owner_tags;
use crate::tag_list::TagList;
use glob::{MatchOptions, Pattern};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Source name of every record produced by this collector.
pub const KUBELET_COLLECTOR_NAME: &str = "kubelet";

const LABEL_TEMPLATE_VAR: &str = "%%label%%";
const DEFAULT_IMAGE_TAG: &str = "latest";

const OPENSHIFT_DEPLOYMENT_CONFIG_ANNOTATION: &str = "openshift.io/deployment-config.name";
const OPENSHIFT_DEPLOYMENT_ANNOTATION: &str = "openshift.io/deployment.name";

// `*` and `?` stop at `/`, so `*` does not match prefixed label names.
const LABEL_MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Tags of one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagInfo {
    pub source: String,
    pub entity: String,
    pub low_card_tags: Vec<String>,
    pub high_card_tags: Vec<String>,
}

impl TagInfo {
    fn new(entity: String, tags: &TagList) -> Self {
        let (low_card_tags, high_card_tags) = tags.compute();
        Self {
            source: KUBELET_COLLECTOR_NAME.to_string(),
            entity,
            low_card_tags,
            high_card_tags,
        }
    }
}

#[derive(Debug, Clone)]
struct LabelRule {
    pattern: Pattern,
    template: String,
}

/// Extracts tags from kubelet pod metadata.
#[derive(Debug, Clone, Default)]
pub struct KubeletCollector {
    labels_as_tags: Vec<LabelRule>,
    annotations_as_tags: HashMap<String, String>,
}

impl KubeletCollector {
    /// Builds a collector from the label and annotation mappings of `config`.
    /// Label patterns that are not valid globs are dropped.
    pub fn new(config: &TaggerConfig) -> Self {
        let mut labels_as_tags = Vec::with_capacity(config.labels_as_tags.len());
        for (pattern, template) in &config.labels_as_tags {
            let Some(translated) = translate_label_pattern(pattern) else {
                warn!("Ignoring invalid label pattern {pattern:?}: trailing escape");
                continue;
            };
            match Pattern::new(&translated) {
                Ok(pattern) => labels_as_tags.push(LabelRule {
                    pattern,
                    template: template.clone(),
                }),
                Err(e) => warn!("Ignoring invalid label pattern {pattern:?}: {e}"),
            }
        }

        Self {
            labels_as_tags,
            annotations_as_tags: config.annotations_as_tags.clone(),
        }
    }

    /// Decodes a kubelet `/pods` payload and extracts its tags.
    pub fn process_pod_list(&self, payload: &[u8]) -> Result<Vec<TagInfo>, TaggerError> {
        let pods = parse_pod_list(payload)?;
        Ok(self.parse_pods(&pods))
    }

    /// Extracts tag records for `pods`, pod record first, then its containers.
    pub fn parse_pods(&self, pods: &[Pod]) -> Vec<TagInfo> {
        let mut output = Vec::new();
        for pod in pods {
            let tags = self.pod_tags(pod);

            if !pod.metadata.uid.is_empty() {
                output.push(TagInfo::new(
                    pod_uid_to_entity_name(&pod.metadata.uid),
                    &tags,
                ));
            }

            for container in &pod.status.container_statuses {
                let container_tags = container_tags(pod, container, &tags);
                output.push(TagInfo::new(container.id.clone(), &container_tags));
            }
        }
        output
    }

    fn pod_tags(&self, pod: &Pod) -> TagList {
        let metadata = &pod.metadata;
        let mut tags = TagList::new();

        tags.add_high("pod_name", &metadata.name);
        tags.add_low("kube_namespace", &metadata.namespace);

        for (name, value) in &metadata.labels {
            let lower_name = name.to_lowercase();
            for rule in &self.labels_as_tags {
                if rule
                    .pattern
                    .matches_with(&lower_name, LABEL_MATCH_OPTIONS)
                {
                    tags.add_auto(&resolve_tag(&rule.template, name), value);
                }
            }
        }

        for (name, value) in &metadata.annotations {
            if let Some(tag_name) = self.annotations_as_tags.get(&name.to_lowercase()) {
                tags.add_auto(tag_name, value);
            }
        }

        if let Some(dc_name) = metadata
            .annotations
            .get(OPENSHIFT_DEPLOYMENT_CONFIG_ANNOTATION)
        {
            tags.add_low("oshift_deployment_config", dc_name);
        }
        if let Some(deploy_name) = metadata.annotations.get(OPENSHIFT_DEPLOYMENT_ANNOTATION) {
            tags.add_high("oshift_deployment", deploy_name);
        }

        for owner in pod.owners() {
            add_owner_tags(&mut tags, owner, &metadata.name);
        }

        tags
    }
}

fn container_tags(pod: &Pod, container: &ContainerStatus, pod_tags: &TagList) -> TagList {
    let pod_name = &pod.metadata.name;
    let mut tags = pod_tags.clone();

    tags.add_low("kube_container_name", &container.name);
    tags.add_high("container_id", trim_runtime_from_cid(&container.id));
    if !container.name.is_empty() && !pod_name.is_empty() {
        tags.add_high(
            "display_container_name",
            &format!("{}_{}", container.name, pod_name),
        );
    }

    if let Some(spec) = pod.container_spec(&container.name) {
        match split_image_name(&spec.image) {
            Ok(image) => {
                tags.add_low("image_name", image.long);
                tags.add_low("short_image", image.short);
                let image_tag = if image.tag.is_empty() {
                    DEFAULT_IMAGE_TAG
                } else {
                    image.tag
                };
                tags.add_low("image_tag", image_tag);
            }
            Err(e) => debug!("Cannot split {}: {}", spec.image, e),
        }
    }

    tags
}

/// Rewrites a path-style label pattern into `glob` syntax: `[^...]` becomes
/// `[!...]`, runs of `*` collapse to one, and `\c` outside a character class
/// matches `c` literally. Returns `None` for a pattern ending in a lone `\`.
fn translate_label_pattern(pattern: &str) -> Option<String> {
    let mut translated = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '[' if !in_class => {
                in_class = true;
                translated.push('[');
                if chars.next_if_eq(&'^').is_some() {
                    translated.push('!');
                }
            }
            ']' if in_class => {
                in_class = false;
                translated.push(']');
            }
            '*' if !in_class => {
                while chars.next_if_eq(&'*').is_some() {}
                translated.push('*');
            }
            '\\' if !in_class => match chars.next()? {
                escaped @ ('*' | '?' | '[' | ']') => {
                    translated.push('[');
                    translated.push(escaped);
                    translated.push(']');
                }
                escaped => translated.push(escaped),
            },
            _ => translated.push(c),
        }
    }

    Some(translated)
}

/// Substitutes the label name, as written on the pod, into a tag name template.
fn resolve_tag(template: &str, label: &str) -> String {
    template.replace(LABEL_TEMPLATE_VAR, label)
}
