use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// File content as it arrives from a client: either raw bytes or an
/// already-encoded base64 string that may still carry a data-URL prefix
/// (`data:application/pdf;base64,...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePayload {
    Raw(Vec<u8>),
    Base64Encoded(String),
}

impl FilePayload {
    /// Produces the bare base64 body the relay expects. Stripping only
    /// happens when the `data:` marker is present, so re-applying this to
    /// an already-stripped payload leaves it untouched.
    pub fn into_base64_body(self) -> String {
        match self {
            FilePayload::Raw(bytes) => general_purpose::STANDARD.encode(bytes),
            FilePayload::Base64Encoded(data) => {
                if data.starts_with("data:") {
                    data.split_once(',')
                        .map(|(_, body)| body.to_string())
                        .unwrap_or_default()
                } else {
                    data
                }
            }
        }
    }
}

/// An uploaded course material as persisted in the material library.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Base64 payload as submitted (data-URL prefix allowed); normalized
    /// only when a generation request is built.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadMaterialRequest {
    #[validate(length(min = 1, message = "Material name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub size: Option<u64>,
    #[validate(length(min = 1, message = "Material data is required"))]
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_and_prefixed_payloads_normalize_to_the_same_body() {
        let bytes = b"hola mundo".to_vec();
        let encoded = general_purpose::STANDARD.encode(&bytes);
        let prefixed = format!("data:application/pdf;base64,{}", encoded);

        assert_eq!(FilePayload::Raw(bytes).into_base64_body(), encoded);
        assert_eq!(FilePayload::Base64Encoded(prefixed).into_base64_body(), encoded);
    }

    #[test]
    fn normalization_is_idempotent() {
        let encoded = general_purpose::STANDARD.encode(b"chapter one");
        let once = FilePayload::Base64Encoded(format!("data:text/plain;base64,{}", encoded))
            .into_base64_body();
        let twice = FilePayload::Base64Encoded(once.clone()).into_base64_body();
        assert_eq!(once, twice);
        assert_eq!(twice, encoded);
    }

    #[test]
    fn data_marker_without_body_yields_empty_payload() {
        assert_eq!(
            FilePayload::Base64Encoded("data:application/pdf;base64,".into()).into_base64_body(),
            ""
        );
        assert_eq!(
            FilePayload::Base64Encoded("data:garbage".into()).into_base64_body(),
            ""
        );
    }
}
