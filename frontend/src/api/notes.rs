use reqwest::multipart::{Form, Part};

use super::client::ApiClient;
use super::types::{ApiError, MessageResponse, NotePdfResponse, NoteResponse};

impl ApiClient {
    pub async fn list_notes(&self) -> Result<Vec<NoteResponse>, ApiError> {
        let headers = self.bearer_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .get(format!("{}/api/v1/notes", base_url))
                    .headers(headers),
            )
            .await?;

        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(|e| {
                ApiError::backend(status.as_u16(), format!("Failed to parse response: {}", e))
            })
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub async fn get_note(&self, note_id: &str) -> Result<NoteResponse, ApiError> {
        let headers = self.bearer_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .get(format!("{}/api/v1/notes/{}", base_url, note_id))
                    .headers(headers),
            )
            .await?;

        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(|e| {
                ApiError::backend(status.as_u16(), format!("Failed to parse response: {}", e))
            })
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub async fn delete_note(&self, note_id: &str) -> Result<MessageResponse, ApiError> {
        let headers = self.bearer_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .delete(format!("{}/api/v1/notes/{}", base_url, note_id))
                    .headers(headers),
            )
            .await?;

        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(|e| {
                ApiError::backend(status.as_u16(), format!("Failed to parse response: {}", e))
            })
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    /// Fetches a note rendered as PDF; the payload arrives base64-encoded.
    pub async fn get_note_pdf(&self, note_id: &str) -> Result<NotePdfResponse, ApiError> {
        let headers = self.bearer_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .get(format!("{}/api/v1/notes/{}/pdf", base_url, note_id))
                    .headers(headers),
            )
            .await?;

        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(|e| {
                ApiError::backend(status.as_u16(), format!("Failed to parse response: {}", e))
            })
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    /// Converts an audio upload into a note. The server deducts credits and
    /// is the sole judge of the balance.
    pub async fn create_note_from_media(
        &self,
        file_name: &str,
        media_type: &str,
        bytes: Vec<u8>,
    ) -> Result<NoteResponse, ApiError> {
        self.create_note_multipart("from-media", file_name, media_type, bytes)
            .await
    }

    /// Converts a document upload into a note.
    pub async fn create_note_from_document(
        &self,
        file_name: &str,
        media_type: &str,
        bytes: Vec<u8>,
    ) -> Result<NoteResponse, ApiError> {
        self.create_note_multipart("from-document", file_name, media_type, bytes)
            .await
    }

    async fn create_note_multipart(
        &self,
        endpoint: &str,
        file_name: &str,
        media_type: &str,
        bytes: Vec<u8>,
    ) -> Result<NoteResponse, ApiError> {
        let headers = self.bearer_headers()?;
        let base_url = self.resolved_base_url().await;

        // Single part named `file`; the boundary header is reqwest's job.
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(media_type)
            .map_err(|_| ApiError::validation("지원하지 않는 파일 형식입니다."))?;
        let form = Form::new().part("file", part);

        let response = self
            .send(
                self.http_client()
                    .post(format!("{}/api/v1/notes/{}", base_url, endpoint))
                    .headers(headers)
                    .multipart(form),
            )
            .await?;

        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(|e| {
                ApiError::backend(status.as_u16(), format!("Failed to parse response: {}", e))
            })
        } else {
            Err(Self::error_from_response(response).await)
        }
    }
}
