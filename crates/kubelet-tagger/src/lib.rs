// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Tag extraction for Kubernetes pods and containers.
//!
//! The [`collector::KubeletCollector`] turns a snapshot of kubelet pod metadata
//! into one [`collector::TagInfo`] per pod and per container. Every tag is
//! classified as low or high cardinality so downstream aggregation can leave
//! unbounded dimensions (pod names, container ids) out of default contexts.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod collector;
pub mod config;
pub mod error;
pub mod image;
pub mod kubelet;
pub mod owner;
pub mod providers;
pub mod tag_list;

pub use collector::{KubeletCollector, TagInfo};
pub use config::TaggerConfig;
pub use error::TaggerError;
pub use tag_list::{TagCardinality, TagList};
