// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed action payloads and the uniform binary attachment codec.
//!
//! Every queued action is a tagged union variant with a fixed field set,
//! checked at enqueue time instead of carried as loose JSON until dispatch.
//! Binary content travels through one [`Attachment`] shape whose bytes
//! serialize as base64, so persisted payloads are always text-safe and the
//! dispatcher reverses the encoding in exactly one place.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Tag identifying which dispatch behavior and payload shape applies.
///
/// The set is closed for this build; tags persisted by another app version
/// fall through to [`ActionKind::Other`] and survive round-trips verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    EmergencyReport,
    MissionProof,
    SupportTicket,
    CommunityPost,
    #[strum(default)]
    Other(String),
}

/// A binary attachment captured with an action.
///
/// `bytes` serialize as base64 text through [`base64_bytes`], keeping the
/// persisted form safe for JSON serialization and encryption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    #[serde(with = "base64_bytes")]
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// A JPEG attachment with the given file name.
    pub fn jpeg(file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: "image/jpeg".to_string(),
            bytes,
        }
    }
}

/// GPS coordinates captured with an emergency report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A critical safety report (disaster, crop emergency).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyReport {
    pub category: String,
    pub details: String,
    #[serde(default)]
    pub photo: Option<Attachment>,
    #[serde(default)]
    pub gps: Option<GeoPoint>,
}

/// Proof of a completed mission, submitted for credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionProof {
    pub mission_id: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub image: Option<Attachment>,
}

/// A support ticket raised to administrative staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportTicket {
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub photo: Option<Attachment>,
}

/// A post to the community feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityPost {
    pub content: String,
    #[serde(default)]
    pub image: Option<Attachment>,
}

/// The tagged union of everything the queue knows how to carry.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionPayload {
    EmergencyReport(EmergencyReport),
    MissionProof(MissionProof),
    SupportTicket(SupportTicket),
    CommunityPost(CommunityPost),
    /// An action whose tag this build does not recognize. The raw JSON is
    /// preserved so a future build can still deliver it.
    Other { kind: String, data: serde_json::Value },
}

impl ActionPayload {
    /// The tag stored alongside the encrypted payload.
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionPayload::EmergencyReport(_) => ActionKind::EmergencyReport,
            ActionPayload::MissionProof(_) => ActionKind::MissionProof,
            ActionPayload::SupportTicket(_) => ActionKind::SupportTicket,
            ActionPayload::CommunityPost(_) => ActionKind::CommunityPost,
            ActionPayload::Other { kind, .. } => ActionKind::Other(kind.clone()),
        }
    }

    /// Plaintext JSON form, hashed and then encrypted before persistence.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            ActionPayload::EmergencyReport(inner) => serde_json::to_value(inner),
            ActionPayload::MissionProof(inner) => serde_json::to_value(inner),
            ActionPayload::SupportTicket(inner) => serde_json::to_value(inner),
            ActionPayload::CommunityPost(inner) => serde_json::to_value(inner),
            ActionPayload::Other { data, .. } => Ok(data.clone()),
        }
    }

    /// Rebuild the typed payload from a decrypted plaintext value.
    ///
    /// The variant is selected by the record's stored tag, not by the shape
    /// of the JSON; an unrecognized tag keeps its value verbatim.
    pub fn from_value(
        kind: &ActionKind,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        match kind {
            ActionKind::EmergencyReport => {
                Ok(ActionPayload::EmergencyReport(serde_json::from_value(value)?))
            }
            ActionKind::MissionProof => {
                Ok(ActionPayload::MissionProof(serde_json::from_value(value)?))
            }
            ActionKind::SupportTicket => {
                Ok(ActionPayload::SupportTicket(serde_json::from_value(value)?))
            }
            ActionKind::CommunityPost => {
                Ok(ActionPayload::CommunityPost(serde_json::from_value(value)?))
            }
            ActionKind::Other(tag) => Ok(ActionPayload::Other {
                kind: tag.clone(),
                data: value,
            }),
        }
    }
}

/// Serde codec serializing byte buffers as standard base64 strings.
pub mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn action_kind_roundtrips_known_tags() {
        assert_eq!(ActionKind::EmergencyReport.to_string(), "EMERGENCY_REPORT");
        assert_eq!(ActionKind::MissionProof.to_string(), "MISSION_PROOF");
        assert_eq!(
            ActionKind::from_str("SUPPORT_TICKET").unwrap(),
            ActionKind::SupportTicket
        );
        assert_eq!(
            ActionKind::from_str("COMMUNITY_POST").unwrap(),
            ActionKind::CommunityPost
        );
    }

    #[test]
    fn unrecognized_tag_parses_as_other() {
        let kind = ActionKind::from_str("SOIL_SAMPLE_V2").unwrap();
        assert_eq!(kind, ActionKind::Other("SOIL_SAMPLE_V2".into()));
        assert_eq!(kind.to_string(), "SOIL_SAMPLE_V2");
    }

    #[test]
    fn attachment_bytes_serialize_as_base64_text() {
        let attachment = Attachment::jpeg("proof.jpg", vec![0xff, 0xd8, 0xff, 0xe0]);
        let json = serde_json::to_value(&attachment).unwrap();
        assert_eq!(json["bytes"], "/9j/4A==");

        let back: Attachment = serde_json::from_value(json).unwrap();
        assert_eq!(back, attachment);
    }

    #[test]
    fn payload_roundtrips_through_plaintext_value() {
        let payload = ActionPayload::MissionProof(MissionProof {
            mission_id: "m-42".into(),
            notes: Some("done before noon".into()),
            image: Some(Attachment::jpeg("proof.jpg", vec![1, 2, 3])),
        });

        let value = payload.to_value().unwrap();
        let back = ActionPayload::from_value(&payload.kind(), value).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn unknown_payload_preserves_raw_json() {
        let data = serde_json::json!({"reading": 7.3, "unit": "ph"});
        let payload = ActionPayload::Other {
            kind: "SOIL_SAMPLE_V2".into(),
            data: data.clone(),
        };

        let value = payload.to_value().unwrap();
        assert_eq!(value, data);

        let back = ActionPayload::from_value(&payload.kind(), value).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn malformed_plaintext_fails_typed_rebuild() {
        let value = serde_json::json!({"not": "a mission proof"});
        let result = ActionPayload::from_value(&ActionKind::MissionProof, value);
        assert!(result.is_err());
    }
}
