// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Per-entity tag accumulator.
//!
//! A [`TagList`] collects tags for a single pod or container. Entries are kept
//! as a multiset: adding the same key twice records two entries, and
//! deduplication only happens in [`TagList::compute`]. Container tag lists are
//! derived from the pod's list with [`Clone`], so extending a container never
//! touches the pod's tags.

use std::collections::BTreeSet;

/// Prefix marking an auto-classified tag name as high cardinality.
const HIGH_CARD_PREFIX: char = '+';

/// Cardinality class of a single tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagCardinality {
    /// Bounded set of values, safe as a default aggregation dimension.
    Low,
    /// Effectively unbounded values (pod names, container ids).
    High,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Tag {
    name: String,
    value: String,
    cardinality: TagCardinality,
}

/// Tag accumulator for one entity.
#[derive(Debug, Clone, Default)]
pub struct TagList {
    tags: Vec<Tag>,
}

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a low cardinality tag. Empty names or values are skipped.
    pub fn add_low(&mut self, name: &str, value: &str) {
        self.add(name, value, TagCardinality::Low);
    }

    /// Adds a high cardinality tag. Empty names or values are skipped.
    pub fn add_high(&mut self, name: &str, value: &str) {
        self.add(name, value, TagCardinality::High);
    }

    /// Adds a tag whose cardinality comes from its name: a leading `+` marks
    /// it high cardinality (the prefix is stripped), anything else is low.
    pub fn add_auto(&mut self, name: &str, value: &str) {
        match name.strip_prefix(HIGH_CARD_PREFIX) {
            Some(stripped) => self.add_high(stripped, value),
            None => self.add_low(name, value),
        }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Returns the deduplicated low and high cardinality tags as sorted
    /// `key:value` strings.
    pub fn compute(&self) -> (Vec<String>, Vec<String>) {
        let mut low = BTreeSet::new();
        let mut high = BTreeSet::new();
        for tag in &self.tags {
            let serialized = format!("{}:{}", tag.name, tag.value);
            match tag.cardinality {
                TagCardinality::Low => low.insert(serialized),
                TagCardinality::High => high.insert(serialized),
            };
        }
        (low.into_iter().collect(), high.into_iter().collect())
    }

    fn add(&mut self, name: &str, value: &str, cardinality: TagCardinality) {
        if name.is_empty() || value.is_empty() {
            return;
        }
        self.tags.push(Tag {
            name: name.to_string(),
            value: value.to_string(),
            cardinality,
        });
    }
}
