use std::rc::Rc;

use reqwest::header::{HeaderMap, HeaderName, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};

use crate::api::types::*;
use crate::config;
use crate::utils::storage::{default_store, SessionStore, ADMIN_API_KEY_KEY, AUTH_TOKEN_KEY};

/// Header carrying the admin key on `/admin` endpoints.
pub const ADMIN_API_KEY_HEADER: &str = "x-admin-api-key";

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    store: Rc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            store: default_store(),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            store: default_store(),
        }
    }

    pub fn with_store(mut self, store: Rc<dyn SessionStore>) -> Self {
        self.store = store;
        self
    }

    /// Durable store shared with the session manager. Tokens written here are
    /// picked up by every subsequent authenticated request.
    pub fn session_store(&self) -> Rc<dyn SessionStore> {
        Rc::clone(&self.store)
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    pub(crate) fn bearer_headers(&self) -> Result<HeaderMap, ApiError> {
        let token = self
            .store
            .get(AUTH_TOKEN_KEY)
            .ok_or_else(|| ApiError::auth_required("로그인이 필요합니다."))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            format!("Bearer {}", token)
                .parse()
                .map_err(|_| ApiError::validation("토큰 형식이 올바르지 않습니다."))?,
        );
        Ok(headers)
    }

    pub(crate) fn admin_headers(&self) -> Result<HeaderMap, ApiError> {
        let key = self
            .store
            .get(ADMIN_API_KEY_KEY)
            .ok_or_else(|| ApiError::auth_required("관리자 인증이 필요합니다."))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(ADMIN_API_KEY_HEADER),
            key.parse()
                .map_err(|_| ApiError::validation("관리자 키 형식이 올바르지 않습니다."))?,
        );
        Ok(headers)
    }

    /// Sends a request, mapping transport failures to the fixed
    /// server-unreachable error. Test builds route requests aimed at a mock
    /// base through the in-process responder registry instead of the network.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        #[cfg(all(test, not(target_arch = "wasm32")))]
        {
            let request = builder.build().map_err(|_| ApiError::network())?;
            if let Some(mock) = mock_transport::try_respond(&request) {
                return Ok(mock);
            }
            self.client.execute(request).await.map_err(|e| {
                log::error!("Request failed: {}", e);
                ApiError::network()
            })
        }
        #[cfg(not(all(test, not(target_arch = "wasm32"))))]
        {
            builder.send().await.map_err(|e| {
                log::error!("Request failed: {}", e);
                ApiError::network()
            })
        }
    }

    /// Decodes a non-2xx response: the backend's `detail` field verbatim when
    /// present, a synthesized HTTP-status message otherwise.
    pub(crate) async fn error_from_response(response: Response) -> ApiError {
        let status = response.status().as_u16();
        match response.json::<DetailResponse>().await {
            Ok(DetailResponse {
                detail: Some(detail),
            }) => ApiError::backend(status, detail),
            _ => ApiError::backend_fallback(status),
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
pub use mock_transport::{register_mock, MockResponse, TestResponder};


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::utils::storage::MemorySessionStore;

    fn client_with_store(store: Rc<dyn SessionStore>) -> ApiClient {
        ApiClient::new_with_base_url("http://mock-client").with_store(store)
    }

    #[test]
    fn bearer_headers_require_a_stored_token() {
        let store: Rc<dyn SessionStore> = Rc::new(MemorySessionStore::new());
        let client = client_with_store(Rc::clone(&store));

        let missing = client.bearer_headers().unwrap_err();
        assert_eq!(missing.kind, ApiErrorKind::AuthRequired);

        store.set(AUTH_TOKEN_KEY, "tk_student").unwrap();
        let headers = client.bearer_headers().unwrap();
        assert_eq!(
            headers.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer tk_student"
        );
    }

    #[test]
    fn admin_headers_use_the_admin_key_not_the_session_token() {
        let store: Rc<dyn SessionStore> = Rc::new(MemorySessionStore::new());
        store.set(AUTH_TOKEN_KEY, "tk_student").unwrap();
        let client = client_with_store(Rc::clone(&store));

        let missing = client.admin_headers().unwrap_err();
        assert_eq!(missing.kind, ApiErrorKind::AuthRequired);

        store.set(ADMIN_API_KEY_KEY, "admin-secret").unwrap();
        let headers = client.admin_headers().unwrap();
        assert_eq!(
            headers
                .get(ADMIN_API_KEY_HEADER)
                .unwrap()
                .to_str()
                .unwrap(),
            "admin-secret"
        );
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn error_from_response_prefers_the_detail_field() {
        let response = reqwest::Response::from(
            http::Response::builder()
                .status(403)
                .body(r#"{"detail":"일일 사용량 한도를 초과했습니다. 내일 다시 시도해주세요."}"#.to_string())
                .unwrap(),
        );
        let error = ApiClient::error_from_response(response).await;
        assert_eq!(error.status(), Some(403));
        assert_eq!(
            error.message,
            "일일 사용량 한도를 초과했습니다. 내일 다시 시도해주세요."
        );
    }

    #[tokio::test]
    async fn error_from_response_falls_back_without_detail() {
        let response = reqwest::Response::from(
            http::Response::builder()
                .status(500)
                .body("upstream exploded".to_string())
                .unwrap(),
        );
        let error = ApiClient::error_from_response(response).await;
        assert_eq!(error.message, "HTTP 500: 요청 처리 중 오류가 발생했습니다.");
    }
}
