use std::rc::Rc;

use crate::api::{
    AdminCreateUserRequest, ApiClient, ApiError, DetailResponse, MessageResponse, UserResponse,
};

/// Data access for the admin panel. Every call carries the stored admin key;
/// a missing key fails before any network traffic.
#[derive(Clone)]
pub struct AdminRepository {
    client: Rc<ApiClient>,
}

impl Default for AdminRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminRepository {
    pub fn new() -> Self {
        Self::new_with_client(Rc::new(ApiClient::new()))
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch_users(&self) -> Result<Vec<UserResponse>, ApiError> {
        self.client.admin_list_users().await
    }

    pub async fn create_user(
        &self,
        request: AdminCreateUserRequest,
    ) -> Result<UserResponse, ApiError> {
        self.client.admin_create_user(request).await
    }

    pub async fn delete_user(&self, student_id: &str) -> Result<DetailResponse, ApiError> {
        self.client.admin_delete_user(student_id).await
    }

    pub async fn reset_credits(&self) -> Result<MessageResponse, ApiError> {
        self.client.admin_reset_credits().await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use std::rc::Rc;

    use super::*;
    use crate::api::test_support::mock::{MockServer, DELETE, GET, POST};
    use crate::api::ApiErrorKind;
    use crate::utils::storage::{MemorySessionStore, SessionStore, ADMIN_API_KEY_KEY};

    fn repository(server: &MockServer) -> AdminRepository {
        let store = Rc::new(MemorySessionStore::default());
        store.set(ADMIN_API_KEY_KEY, "admin-secret").expect("seed key");
        let client = ApiClient::new_with_base_url(server.url("")).with_store(store);
        AdminRepository::new_with_client(Rc::new(client))
    }

    fn user_json(student_id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": format!("u-{}", student_id),
            "student_id": student_id,
            "name": "김철수",
            "daily_credits": 10,
            "api_key": "tk_student"
        })
    }

    #[tokio::test]
    async fn fetch_users_lists_beta_testers_with_their_keys() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/admin/users");
            then.status(200)
                .json_body(serde_json::json!([user_json("20240001"), user_json("20240002")]));
        });

        let users = repository(&server).fetch_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].student_id, "20240001");
        assert_eq!(users[0].api_key.as_deref(), Some("tk_student"));
    }

    #[tokio::test]
    async fn create_and_delete_round_trip() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/admin/users");
            then.status(200).json_body(user_json("20240003"));
        });
        server.mock(|when, then| {
            when.method(DELETE).path("/api/v1/admin/users/20240003");
            then.status(200)
                .json_body(serde_json::json!({"detail": "사용자가 삭제되었습니다."}));
        });

        let repo = repository(&server);
        let created = repo
            .create_user(AdminCreateUserRequest {
                name: "김철수".into(),
                student_id: "20240003".into(),
            })
            .await
            .unwrap();
        assert_eq!(created.student_id, "20240003");

        let deleted = repo.delete_user("20240003").await.unwrap();
        assert_eq!(deleted.detail.as_deref(), Some("사용자가 삭제되었습니다."));
    }

    #[tokio::test]
    async fn reset_credits_returns_the_server_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/admin/reset-credits");
            then.status(200)
                .json_body(serde_json::json!({"message": "크레딧이 초기화되었습니다."}));
        });

        let message = repository(&server).reset_credits().await.unwrap();
        assert_eq!(message.message, "크레딧이 초기화되었습니다.");
    }

    #[tokio::test]
    async fn missing_admin_key_fails_before_the_network() {
        let server = MockServer::start();
        // No route registered: a dispatched request would fail as unmatched.
        let client = ApiClient::new_with_base_url(server.url(""))
            .with_store(Rc::new(MemorySessionStore::default()));
        let repo = AdminRepository::new_with_client(Rc::new(client));

        let error = repo.fetch_users().await.unwrap_err();
        assert_eq!(error.kind, ApiErrorKind::AuthRequired);
    }

    #[tokio::test]
    async fn rejected_key_surfaces_the_backend_detail() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/admin/users");
            then.status(403)
                .json_body(serde_json::json!({"detail": "관리자 권한이 없습니다."}));
        });

        let error = repository(&server).fetch_users().await.unwrap_err();
        assert_eq!(error.status(), Some(403));
        assert_eq!(error.message, "관리자 권한이 없습니다.");
    }
}
