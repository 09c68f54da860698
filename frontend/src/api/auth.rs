use super::client::ApiClient;
use super::types::{ApiError, LoginRequest, TokenResponse, UserResponse};

impl ApiClient {
    /// Exchanges a student id and name for the account's API key. Storing the
    /// token is the session manager's job, not this call's.
    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .post(format!("{}/api/v1/login", base_url))
                    .json(&request),
            )
            .await?;

        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(|_| {
                ApiError::backend(
                    status.as_u16(),
                    "로그인에 실패했습니다. 응답 형식이 올바르지 않습니다.",
                )
            })
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    /// Fetches the user record behind the stored bearer token.
    pub async fn get_me(&self) -> Result<UserResponse, ApiError> {
        let headers = self.bearer_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .get(format!("{}/api/v1/users/me", base_url))
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
