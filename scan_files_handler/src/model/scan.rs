use std::collections::BTreeMap;

use serde_json::Value;

/// Which part of the stored object is sent to the Scan Files API as the `file` part
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum PayloadMode {
    /// The bytes of the object
    #[default]
    Content,
    /// Only the declared `Content-Type` of the object
    ContentType,
}

/// An object retrieved from s3
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content: Vec<u8>,
    pub content_type: Option<String>,
}

/// The multipart `file` part sent to the Scan Files API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPayload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ScanPayload {
    pub fn from_object(object_key: &str, object: StoredObject) -> Self {
        Self {
            file_name: file_name(object_key),
            content_type: object.content_type,
            bytes: object.content,
        }
    }

    /// A payload made of nothing but the object's declared content type.
    /// An object without a content type produces an empty payload.
    pub fn from_content_type(object_key: &str, content_type: Option<String>) -> Self {
        Self {
            file_name: file_name(object_key),
            content_type: None,
            bytes: content_type.map(String::into_bytes).unwrap_or_default(),
        }
    }
}

/// The last segment of the key, or the whole key if it ends with a `/`
fn file_name(object_key: &str) -> String {
    object_key
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(object_key)
        .to_string()
}

/// The uninterpreted response of the Scan Files API
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResponse {
    pub status_code: u16,
    pub body: Value,
}

impl ScanResponse {
    /// The scan identifier from the response body, if there is a usable one
    pub fn scan_id(&self) -> Option<String> {
        match self.body.get("scan_id")? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

/// The value returned by the lambda. Mirrors the Scan Files API response
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanFilesResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
}

impl From<ScanResponse> for ScanFilesResponse {
    fn from(response: ScanResponse) -> Self {
        Self {
            status_code: response.status_code,
            headers: BTreeMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )]),
            body: response.body,
        }
    }
}
