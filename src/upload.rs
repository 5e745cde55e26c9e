use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    error::{IngestError, Result},
    types::FileEntry,
};

/// Upload collaborator
///
/// Implementors take a prepared batch of files and return opaque
/// server-assigned identifiers, one per file, in order. Retries, if any,
/// belong to the implementor; the intake pipeline never retries.
#[async_trait]
pub trait FileUploader: Send + Sync {
    /// Upload a batch of files
    ///
    /// Returns `IngestError::Upload` (or `Network`) on failure.
    async fn upload(&self, files: &[FileEntry]) -> Result<Vec<String>>;

    /// Get a human-readable identifier for this uploader (for logging/debugging)
    fn identifier(&self) -> String;
}

/// HTTP-backed uploader
///
/// Posts the batch as one JSON body with base64-encoded content and expects
/// `{"ids": [...]}` back.
#[derive(Clone)]
pub struct HttpUploader {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct UploadFilePayload<'a> {
    name: &'a str,
    path: &'a str,
    content_type: &'a str,
    content: String,
}

#[derive(Serialize)]
struct UploadRequest<'a> {
    files: Vec<UploadFilePayload<'a>>,
}

#[derive(Deserialize)]
struct UploadResponse {
    ids: Vec<String>,
}

impl HttpUploader {
    /// Create a new uploader posting to the given endpoint URL
    pub fn new(endpoint: String) -> Self {
        let client = Client::builder()
            .user_agent("file-intake/1.3")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, endpoint }
    }
}

#[async_trait]
impl FileUploader for HttpUploader {
    async fn upload(&self, files: &[FileEntry]) -> Result<Vec<String>> {
        let body = UploadRequest {
            files: files
                .iter()
                .map(|f| UploadFilePayload {
                    name: &f.name,
                    path: f.display_path(),
                    content_type: &f.content_type,
                    content: BASE64.encode(&f.content),
                })
                .collect(),
        };

        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        match response.status() {
            StatusCode::OK => {
                let parsed: UploadResponse = response.json().await?;
                if parsed.ids.len() != files.len() {
                    return Err(IngestError::Upload {
                        message: format!(
                            "Server returned {} ids for {} files",
                            parsed.ids.len(),
                            files.len()
                        ),
                    });
                }
                Ok(parsed.ids)
            }
            StatusCode::PAYLOAD_TOO_LARGE => Err(IngestError::Upload {
                message: "Upload batch exceeds the server size limit".to_string(),
            }),
            status => {
                let message = format!(
                    "Unexpected status {}: {}",
                    status,
                    response.text().await.unwrap_or_default()
                );
                Err(IngestError::Upload { message })
            }
        }
    }

    fn identifier(&self) -> String {
        format!("upload://{}", self.endpoint)
    }
}
