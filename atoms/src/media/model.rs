use serde::{Deserialize, Serialize};

/// A picture attached to one risk note, as captured on the device.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    /// Device reference. Only inline `data:` URIs can be uploaded.
    pub uri: String,
    #[serde(default, rename = "isLandscape", alias = "is_landscape")]
    pub is_landscape: bool,
    /// Remote identifier, only present once an upload has been confirmed.
    /// Never read from incoming JSON.
    #[serde(default, rename = "blobName", skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub blob_name: Option<String>,
}

impl ImageAttachment {
    pub fn new(uri: impl Into<String>, is_landscape: bool) -> Self {
        Self {
            uri: uri.into(),
            is_landscape,
            blob_name: None,
        }
    }
}

/// Uploaded image as referenced from a submitted risk note.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ImageRef {
    #[serde(rename = "blobName")]
    pub blob_name: String,
    #[serde(rename = "isLandscape")]
    pub is_landscape: bool,
}

/// One file of a multipart upload.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UploadPart {
    pub name: String,
    pub file_name: String,
    pub content_type: String,
    pub uri: String,
}

/// All images of one draft section, sent in a single upload call.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UploadPayload {
    pub section_key: String,
    pub parts: Vec<UploadPart>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UploadResponse {
    #[serde(default)]
    pub urls: Vec<String>,
}
