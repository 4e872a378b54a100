// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::error::TaggerError;

const DIGEST_SEPARATOR: &str = "@sha";

/// Components of a container image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageName<'a> {
    /// Image with registry and path, without tag or digest.
    pub long: &'a str,
    /// Last path segment of the image, without tag.
    pub short: &'a str,
    /// Image tag, empty if the reference has none.
    pub tag: &'a str,
}

/// Splits an image reference such as `registry:5000/org/app:1.2@sha256:...`
/// into its long name, short name and tag.
///
/// A colon only starts the tag when it comes after the last `/`, so registry
/// ports are kept in the long name.
pub fn split_image_name(image: &str) -> Result<ImageName<'_>, TaggerError> {
    if image.is_empty() {
        return Err(TaggerError::InvalidImageName(image.to_string()));
    }

    let mut long = image;
    if let Some(pos) = long.rfind(DIGEST_SEPARATOR).filter(|&pos| pos > 0) {
        long = &long[..pos];
    }

    let last_slash = long.rfind('/');
    let mut tag = "";
    if let Some(last_colon) = long.rfind(':') {
        if last_slash.map_or(true, |slash| last_colon > slash) {
            tag = &long[last_colon + 1..];
            long = &long[..last_colon];
        }
    }

    let short = match last_slash {
        Some(slash) => &long[slash + 1..],
        None => long,
    };

    Ok(ImageName { long, short, tag })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(image: &str) -> (&str, &str, &str) {
        let name = split_image_name(image).unwrap();
        (name.long, name.short, name.tag)
    }

    #[test]
    fn test_split_image_name() {
        assert_eq!(split("nginx"), ("nginx", "nginx", ""));
        assert_eq!(split("nginx:1.19"), ("nginx", "nginx", "1.19"));
        assert_eq!(
            split("datadog/docker-dd-agent:latest"),
            ("datadog/docker-dd-agent", "docker-dd-agent", "latest")
        );
        assert_eq!(
            split("gcr.io/google_containers/pause-amd64:3.0"),
            ("gcr.io/google_containers/pause-amd64", "pause-amd64", "3.0")
        );
    }

    #[test]
    fn test_split_image_name_with_registry_port() {
        assert_eq!(
            split("myregistry.local:5000/testing/test-image:version"),
            ("myregistry.local:5000/testing/test-image", "test-image", "version")
        );
        assert_eq!(
            split("myregistry.local:5000/testing/test-image"),
            ("myregistry.local:5000/testing/test-image", "test-image", "")
        );
    }

    #[test]
    fn test_split_image_name_strips_digest() {
        assert_eq!(
            split("redis@sha256:5bb4e3cf0ea5d4c5ea1bc8af3e1e4b9f0e5f2bd0b8c4c3b8f23f4f8f1f9ad5c5"),
            ("redis", "redis", "")
        );
        assert_eq!(
            split("docker.io/library/redis:7.0@sha256:abcdef"),
            ("docker.io/library/redis", "redis", "7.0")
        );
    }

    #[test]
    fn test_split_empty_image_name() {
        assert!(matches!(
            split_image_name(""),
            Err(TaggerError::InvalidImageName(_))
        ));
    }
}
