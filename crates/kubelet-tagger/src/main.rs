// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use std::io::{self, Read, Write};
use std::{env, fs, process};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use kubelet_tagger::providers::{env::EnvProvider, ConfigProvider};
use kubelet_tagger::{KubeletCollector, TaggerConfig};

/// Reads a kubelet pod list from the file named by the first argument, or from
/// stdin, and prints one JSON tag record per pod and container to stdout.
///
/// The environment provider is only polled to report its status in the logs.
/// Custom logs configs are consumed by the logs agent, not by the tagger, so
/// they are never written to stdout.
pub fn main() {
    let config = match TaggerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading kubelet tagger configuration: {e}");
            process::exit(1);
        }
    };

    #[allow(clippy::expect_used)]
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).expect("could not parse log level in configuration"),
        )
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .with_writer(io::stderr)
        .without_time()
        .finish();

    #[allow(clippy::expect_used)]
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    debug!("Logging subsystem enabled");

    let env_provider = EnvProvider::new();
    match env_provider.collect() {
        Ok(configs) => {
            info!(
                "{} provider: found {} custom logs config(s)",
                env_provider,
                configs.len()
            );
            for config in &configs {
                debug!(
                    "{} provider: config {} from {}",
                    env_provider, config.name, config.provider
                );
            }
        }
        Err(e) => error!("Error collecting configs from {env_provider}: {e}"),
    }

    let payload = match read_payload(env::args().nth(1)) {
        Ok(payload) => payload,
        Err(e) => {
            error!("Unable to read kubelet pod list: {e}");
            process::exit(1);
        }
    };

    let collector = KubeletCollector::new(&config);
    let infos = match collector.process_pod_list(&payload) {
        Ok(infos) => infos,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };
    info!("Extracted tags for {} entities", infos.len());

    let mut stdout = io::stdout().lock();
    for tag_info in &infos {
        let written = serde_json::to_string(tag_info)
            .map_err(io::Error::from)
            .and_then(|line| writeln!(stdout, "{line}"));
        if let Err(e) = written {
            error!("Unable to write tags for {}: {e}", tag_info.entity);
            process::exit(1);
        }
    }
}

/// Reads the pod list from `path`, or from stdin when no path is given.
fn read_payload(path: Option<String>) -> io::Result<Vec<u8>> {
    match path {
        Some(path) => {
            debug!("Reading pod list from {path}");
            fs::read(path)
        }
        None => {
            debug!("Reading pod list from stdin");
            let mut payload = Vec::new();
            io::stdin().read_to_end(&mut payload)?;
            Ok(payload)
        }
    }
}
