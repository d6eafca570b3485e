// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP connectivity probe against the backend health endpoint.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use agrisync_config::ApiConfig;
use agrisync_core::{AgrisyncError, ConnectivityProbe};

/// Probe timeout, deliberately shorter than the dispatch timeout so a dead
/// network fails the drain guard quickly.
const PROBE_TIMEOUT_SECS: u64 = 5;

/// Decides online/offline by reaching for the backend health endpoint.
///
/// Any HTTP response counts as online; only a transport-level failure
/// (DNS, refused connection, timeout) reports offline.
#[derive(Debug, Clone)]
pub struct HttpConnectivityProbe {
    client: reqwest::Client,
    health_url: String,
}

impl HttpConnectivityProbe {
    pub fn new(config: &ApiConfig) -> Result<Self, AgrisyncError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
            .build()
            .map_err(|e| AgrisyncError::Dispatch {
                message: format!("failed to build probe client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            health_url: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                config.health_path
            ),
        })
    }
}

#[async_trait]
impl ConnectivityProbe for HttpConnectivityProbe {
    async fn is_online(&self) -> bool {
        match self.client.get(&self.health_url).send().await {
            Ok(response) => {
                debug!(status = %response.status(), "connectivity probe reached backend");
                true
            }
            Err(e) => {
                debug!(error = %e, "connectivity probe failed");
                false
            }
        }
    }
}
