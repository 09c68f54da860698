use super::client::ApiClient;
use super::types::{AdminCreateUserRequest, ApiError, DetailResponse, MessageResponse, UserResponse};

// Admin endpoints authenticate with `X-Admin-API-Key` instead of the user's
// bearer token; the server validates the key on every call.
impl ApiClient {
    pub async fn admin_list_users(&self) -> Result<Vec<UserResponse>, ApiError> {
        let headers = self.admin_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .get(format!("{}/api/v1/admin/users", base_url))
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

    pub async fn admin_create_user(
        &self,
        request: AdminCreateUserRequest,
    ) -> Result<UserResponse, ApiError> {
        let headers = self.admin_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .post(format!("{}/api/v1/admin/users", base_url))
                    .headers(headers)
                    .json(&request),
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

    pub async fn admin_delete_user(&self, student_id: &str) -> Result<DetailResponse, ApiError> {
        let headers = self.admin_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .delete(format!("{}/api/v1/admin/users/{}", base_url, student_id))
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

    /// Resets every account's balance to the daily default.
    pub async fn admin_reset_credits(&self) -> Result<MessageResponse, ApiError> {
        let headers = self.admin_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .post(format!("{}/api/v1/admin/reset-credits", base_url))
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
}
