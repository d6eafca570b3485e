// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP dispatch adapter for the backend API.
//!
//! Each action kind maps to one remote operation with a fixed field shape;
//! the shape is the server's contract, not whatever the payload happens to
//! carry. Binary attachments go out as multipart parts, everything else as
//! JSON. One request per queued record.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::multipart;
use tracing::{debug, warn};

use agrisync_config::ApiConfig;
use agrisync_core::payload::{CommunityPost, EmergencyReport, MissionProof, SupportTicket};
use agrisync_core::{
    ActionPayload, AdapterType, AgrisyncError, Attachment, DispatchAdapter, DispatchOutcome,
    HealthStatus, PluginAdapter,
};

/// HTTP client translating decrypted actions into backend calls.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: reqwest::Client,
    base_url: String,
    health_path: String,
}

impl HttpDispatcher {
    /// Build a dispatcher for the configured backend.
    pub fn new(config: &ApiConfig) -> Result<Self, AgrisyncError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgrisyncError::Dispatch {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            health_path: config.health_path.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a JSON body and treat any non-success status as dispatch failure.
    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<(), AgrisyncError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| AgrisyncError::Dispatch {
                message: format!("request to {path} failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        Self::check_status(path, response).await
    }

    /// POST a multipart form and treat any non-success status as dispatch failure.
    async fn post_multipart(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> Result<(), AgrisyncError> {
        let response = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AgrisyncError::Dispatch {
                message: format!("request to {path} failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        Self::check_status(path, response).await
    }

    async fn check_status(path: &str, response: reqwest::Response) -> Result<(), AgrisyncError> {
        let status = response.status();
        if status.is_success() {
            debug!(path = %path, status = %status, "dispatch accepted");
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(AgrisyncError::Dispatch {
            message: format!("{path} returned {status}: {body}"),
            source: None,
        })
    }

    async fn send_emergency_report(&self, report: &EmergencyReport) -> Result<(), AgrisyncError> {
        // The disaster endpoint takes the photo inline as base64 text.
        let body = serde_json::json!({
            "type": report.category,
            "details": report.details,
            "photo": report.photo.as_ref().map(|a| STANDARD.encode(&a.bytes)),
            "gps": report.gps,
        });
        self.post_json("/disaster", &body).await
    }

    async fn send_mission_proof(&self, proof: &MissionProof) -> Result<(), AgrisyncError> {
        let mut form = multipart::Form::new();
        if let Some(notes) = &proof.notes {
            form = form.text("notes", notes.clone());
        }
        if let Some(image) = &proof.image {
            form = form.part("image", attachment_part(image)?);
        }
        let path = format!("/missions/{}/submit", proof.mission_id);
        self.post_multipart(&path, form).await
    }

    async fn send_support_ticket(&self, ticket: &SupportTicket) -> Result<(), AgrisyncError> {
        let body = serde_json::json!({
            "type": ticket.category,
            "description": ticket.description,
            "photo": ticket.photo.as_ref().map(|a| STANDARD.encode(&a.bytes)),
        });
        self.post_json("/tickets", &body).await
    }

    async fn send_community_post(&self, post: &CommunityPost) -> Result<(), AgrisyncError> {
        let mut form = multipart::Form::new().text("content", post.content.clone());
        if let Some(image) = &post.image {
            form = form.part("file", attachment_part(image)?);
        }
        self.post_multipart("/community/post", form).await
    }
}

/// Rebuild the binary form of an attachment as a multipart part.
fn attachment_part(attachment: &Attachment) -> Result<multipart::Part, AgrisyncError> {
    multipart::Part::bytes(attachment.bytes.clone())
        .file_name(attachment.file_name.clone())
        .mime_str(&attachment.content_type)
        .map_err(|e| AgrisyncError::Dispatch {
            message: format!(
                "invalid attachment content type `{}`: {e}",
                attachment.content_type
            ),
            source: Some(Box::new(e)),
        })
}

#[async_trait]
impl PluginAdapter for HttpDispatcher {
    fn name(&self) -> &str {
        "http"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Dispatch
    }

    async fn health_check(&self) -> Result<HealthStatus, AgrisyncError> {
        let url = self.url(&self.health_path);
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => Ok(HealthStatus::Healthy),
            Ok(response) => Ok(HealthStatus::Degraded(format!(
                "health endpoint returned {}",
                response.status()
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(format!("unreachable: {e}"))),
        }
    }

    async fn shutdown(&self) -> Result<(), AgrisyncError> {
        Ok(())
    }
}

#[async_trait]
impl DispatchAdapter for HttpDispatcher {
    async fn dispatch(&self, payload: &ActionPayload) -> Result<DispatchOutcome, AgrisyncError> {
        match payload {
            ActionPayload::EmergencyReport(report) => {
                self.send_emergency_report(report).await?;
                Ok(DispatchOutcome::Delivered)
            }
            ActionPayload::MissionProof(proof) => {
                self.send_mission_proof(proof).await?;
                Ok(DispatchOutcome::Delivered)
            }
            ActionPayload::SupportTicket(ticket) => {
                self.send_support_ticket(ticket).await?;
                Ok(DispatchOutcome::Delivered)
            }
            ActionPayload::CommunityPost(post) => {
                self.send_community_post(post).await?;
                Ok(DispatchOutcome::Delivered)
            }
            ActionPayload::Other { kind, .. } => {
                warn!(kind = %kind, "unknown action kind, skipping dispatch");
                Ok(DispatchOutcome::Skipped)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrisync_core::GeoPoint;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            health_path: "/health".to_string(),
        }
    }

    #[tokio::test]
    async fn emergency_report_posts_json_to_disaster_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/disaster"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = HttpDispatcher::new(&test_config(&server.uri())).unwrap();
        let payload = ActionPayload::EmergencyReport(EmergencyReport {
            category: "flood".into(),
            details: "river overflow".into(),
            photo: Some(Attachment::jpeg("scene.jpg", vec![1, 2, 3])),
            gps: Some(GeoPoint { lat: 23.81, lng: 90.41 }),
        });

        let outcome = dispatcher.dispatch(&payload).await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Delivered);

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["type"], "flood");
        assert_eq!(body["details"], "river overflow");
        assert_eq!(body["photo"], "AQID");
        assert_eq!(body["gps"]["lat"], 23.81);
    }

    #[tokio::test]
    async fn mission_proof_posts_multipart_with_binary_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/missions/m-42/submit"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = HttpDispatcher::new(&test_config(&server.uri())).unwrap();
        let image_bytes = vec![0xff, 0xd8, 0xff, 0xe0];
        let payload = ActionPayload::MissionProof(MissionProof {
            mission_id: "m-42".into(),
            notes: Some("done early".into()),
            image: Some(Attachment::jpeg("proof.jpg", image_bytes.clone())),
        });

        let outcome = dispatcher.dispatch(&payload).await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Delivered);

        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0]
            .headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("multipart/form-data"), "got: {content_type}");

        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"notes\""));
        assert!(body.contains("done early"));
        assert!(body.contains("name=\"image\""));
        assert!(body.contains("filename=\"proof.jpg\""));
        assert!(body.contains("image/jpeg"));
        // The image travels as raw bytes, not base64 text.
        let raw: &[u8] = &requests[0].body;
        assert!(raw.windows(4).any(|w| w == image_bytes.as_slice()));
    }

    #[tokio::test]
    async fn support_ticket_posts_json_to_tickets_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tickets"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = HttpDispatcher::new(&test_config(&server.uri())).unwrap();
        let payload = ActionPayload::SupportTicket(SupportTicket {
            category: "billing".into(),
            description: "credits missing".into(),
            photo: None,
        });

        let outcome = dispatcher.dispatch(&payload).await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Delivered);

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["type"], "billing");
        assert_eq!(body["description"], "credits missing");
        assert_eq!(body["photo"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn community_post_sends_content_and_file_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/community/post"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = HttpDispatcher::new(&test_config(&server.uri())).unwrap();
        let payload = ActionPayload::CommunityPost(CommunityPost {
            content: "first harvest of the season".into(),
            image: Some(Attachment::jpeg("post-image.jpg", vec![9, 9, 9])),
        });

        dispatcher.dispatch(&payload).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"content\""));
        assert!(body.contains("first harvest of the season"));
        assert!(body.contains("name=\"file\""));
        assert!(body.contains("filename=\"post-image.jpg\""));
    }

    #[tokio::test]
    async fn non_success_status_is_a_dispatch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tickets"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let dispatcher = HttpDispatcher::new(&test_config(&server.uri())).unwrap();
        let payload = ActionPayload::SupportTicket(SupportTicket {
            category: "other".into(),
            description: "x".into(),
            photo: None,
        });

        let err = dispatcher.dispatch(&payload).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("/tickets"), "got: {msg}");
        assert!(msg.contains("500"), "got: {msg}");
    }

    #[tokio::test]
    async fn unknown_kind_is_skipped_without_any_request() {
        let server = MockServer::start().await;

        let dispatcher = HttpDispatcher::new(&test_config(&server.uri())).unwrap();
        let payload = ActionPayload::Other {
            kind: "SOIL_SAMPLE_V2".into(),
            data: serde_json::json!({"ph": 6.8}),
        };

        let outcome = dispatcher.dispatch(&payload).await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Skipped);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn health_check_reflects_endpoint_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let dispatcher = HttpDispatcher::new(&test_config(&server.uri())).unwrap();
        assert_eq!(dispatcher.health_check().await.unwrap(), HealthStatus::Healthy);

        let unreachable =
            HttpDispatcher::new(&test_config("http://127.0.0.1:1")).unwrap();
        assert!(matches!(
            unreachable.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
    }
}
