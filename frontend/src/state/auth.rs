use leptos::*;

use crate::api::{ApiClient, ApiError, LoginRequest, UserResponse};
use crate::utils::storage::AUTH_TOKEN_KEY;

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

/// Single session object shared through context. Every mutation goes through
/// the functions in this module; components only read.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<UserResponse>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    /// Cached user record; never triggers a network call.
    pub fn current_user(&self) -> Option<&UserResponse> {
        self.user.as_ref()
    }

    pub fn daily_credits(&self) -> Option<i32> {
        self.user.as_ref().map(|user| user.daily_credits)
    }
}

fn create_auth_context() -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState::default());

    let api_client = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    if api_client.session_store().get(AUTH_TOKEN_KEY).is_none() {
        // Nothing to rehydrate; the session starts closed and settled.
        return (auth_state, set_auth_state);
    }

    set_auth_state.update(|state| state.loading = true);
    let set_auth_for_check = set_auth_state;
    spawn_local(async move {
        match check_auth_status(&api_client).await {
            Ok(user) => set_auth_for_check.update(|state| {
                state.user = Some(user);
                state.is_authenticated = true;
                state.loading = false;
            }),
            Err(_) => set_auth_for_check.update(|state| {
                state.user = None;
                state.is_authenticated = false;
                state.loading = false;
            }),
        }
    });

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

/// Validates the stored token against `/users/me`. A failure of any class
/// invalidates the token, so it is cleared before the error is returned.
async fn check_auth_status(api_client: &ApiClient) -> Result<UserResponse, ApiError> {
    match api_client.get_me().await {
        Ok(user) => Ok(user),
        Err(error) => {
            api_client.session_store().clear(AUTH_TOKEN_KEY);
            Err(error)
        }
    }
}

/// Exchanges credentials for a token, persists it, then loads the user
/// record. If the record cannot be loaded the token is discarded again and
/// the session stays closed.
pub async fn login_request(
    request: LoginRequest,
    api_client: &ApiClient,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    set_auth_state.update(|state| state.loading = true);

    let token = match api_client.login(request).await {
        Ok(token) => token,
        Err(error) => {
            set_auth_state.update(|state| state.loading = false);
            return Err(error);
        }
    };

    let store = api_client.session_store();
    if store.set(AUTH_TOKEN_KEY, &token.api_key).is_err() {
        set_auth_state.update(|state| state.loading = false);
        return Err(ApiError::session_invalid(
            "세션을 저장하지 못했습니다. 다시 로그인해주세요.",
        ));
    }

    match api_client.get_me().await {
        Ok(user) => {
            set_auth_state.update(|state| {
                state.user = Some(user);
                state.is_authenticated = true;
                state.loading = false;
            });
            Ok(())
        }
        Err(_) => {
            store.clear(AUTH_TOKEN_KEY);
            set_auth_state.update(|state| {
                state.user = None;
                state.is_authenticated = false;
                state.loading = false;
            });
            Err(ApiError::session_invalid(
                "사용자 정보를 불러오지 못했습니다. 다시 로그인해주세요.",
            ))
        }
    }
}

/// Clears the durable token and the in-memory session. There is no server
/// call to make, so this cannot fail and repeating it changes nothing.
pub fn logout(api_client: &ApiClient, set_auth_state: WriteSignal<AuthState>) {
    api_client.session_store().clear(AUTH_TOKEN_KEY);
    set_auth_state.update(|state| {
        state.user = None;
        state.is_authenticated = false;
        state.loading = false;
    });
}

pub fn use_login_action() -> Action<LoginRequest, Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move { login_request(payload, &api, set_auth).await }
    })
}

pub fn use_logout() -> impl Fn() + Clone {
    let (_auth, set_auth) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    move || logout(&api, set_auth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::create_runtime;

    fn with_runtime<T>(test: impl FnOnce() -> T) -> T {
        let runtime = create_runtime();
        let result = test();
        runtime.dispose();
        result
    }

    #[test]
    fn use_auth_returns_default_without_context() {
        with_runtime(|| {
            let (state, _set_state) = use_auth();
            let snapshot = state.get();
            assert!(!snapshot.is_authenticated);
            assert!(snapshot.user.is_none());
            assert!(!snapshot.loading);
        });
    }

    #[test]
    fn current_user_and_credits_read_the_cached_record() {
        let state = AuthState {
            user: Some(UserResponse {
                id: "u1".into(),
                student_id: "20240001".into(),
                name: "김철수".into(),
                daily_credits: 7,
                api_key: None,
            }),
            is_authenticated: true,
            loading: false,
        };
        assert_eq!(state.current_user().map(|user| user.name.as_str()), Some("김철수"));
        assert_eq!(state.daily_credits(), Some(7));
        assert_eq!(AuthState::default().daily_credits(), None);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use crate::utils::storage::{MemorySessionStore, SessionStore};
    use serde_json::json;
    use std::rc::Rc;

    fn user_body() -> serde_json::Value {
        json!({
            "id": "u1",
            "student_id": "20240001",
            "name": "김철수",
            "api_key": "tk_student",
            "daily_credits": 10,
            "notes": []
        })
    }

    fn client(server: &MockServer, store: Rc<dyn SessionStore>) -> ApiClient {
        ApiClient::new_with_base_url(server.url("")).with_store(store)
    }

    #[tokio::test]
    async fn login_persists_the_token_and_opens_the_session() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/login");
            then.status(200).json_body(json!({ "api_key": "tk_fresh" }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/users/me");
            then.status(200).json_body(user_body());
        });

        let runtime = create_runtime();
        let store: Rc<dyn SessionStore> = Rc::new(MemorySessionStore::new());
        let api = client(&server, Rc::clone(&store));
        let (state, set_state) = create_signal(AuthState::default());

        login_request(
            LoginRequest {
                student_id: "20240001".into(),
                name: "김철수".into(),
            },
            &api,
            set_state,
        )
        .await
        .unwrap();

        assert_eq!(store.get(AUTH_TOKEN_KEY).as_deref(), Some("tk_fresh"));
        let snapshot = state.get_untracked();
        assert!(snapshot.is_authenticated);
        assert!(!snapshot.loading);
        assert_eq!(snapshot.daily_credits(), Some(10));

        logout(&api, set_state);
        assert!(store.get(AUTH_TOKEN_KEY).is_none());
        let snapshot = state.get_untracked();
        assert!(!snapshot.is_authenticated);
        assert!(snapshot.user.is_none());

        // Logging out twice is a no-op.
        logout(&api, set_state);
        assert!(!state.get_untracked().is_authenticated);
        runtime.dispose();
    }

    #[tokio::test]
    async fn rejected_login_leaves_the_session_closed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/login");
            then.status(401)
                .json_body(json!({ "detail": "이름 또는 학번이 올바르지 않습니다." }));
        });

        let runtime = create_runtime();
        let store: Rc<dyn SessionStore> = Rc::new(MemorySessionStore::new());
        let api = client(&server, Rc::clone(&store));
        let (state, set_state) = create_signal(AuthState::default());

        let error = login_request(
            LoginRequest {
                student_id: "99999999".into(),
                name: "아무개".into(),
            },
            &api,
            set_state,
        )
        .await
        .unwrap_err();

        assert_eq!(error.message, "이름 또는 학번이 올바르지 않습니다.");
        assert!(store.get(AUTH_TOKEN_KEY).is_none());
        let snapshot = state.get_untracked();
        assert!(!snapshot.is_authenticated);
        assert!(!snapshot.loading);
        runtime.dispose();
    }

    #[tokio::test]
    async fn failing_user_fetch_discards_the_fresh_token() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/login");
            then.status(200).json_body(json!({ "api_key": "tk_fresh" }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/users/me");
            then.status(500).json_body(json!({ "detail": "서버 오류" }));
        });

        let runtime = create_runtime();
        let store: Rc<dyn SessionStore> = Rc::new(MemorySessionStore::new());
        let api = client(&server, Rc::clone(&store));
        let (state, set_state) = create_signal(AuthState::default());

        let error = login_request(
            LoginRequest {
                student_id: "20240001".into(),
                name: "김철수".into(),
            },
            &api,
            set_state,
        )
        .await
        .unwrap_err();

        assert_eq!(error.kind, crate::api::ApiErrorKind::SessionInvalid);
        assert!(store.get(AUTH_TOKEN_KEY).is_none());
        assert!(!state.get_untracked().is_authenticated);
        runtime.dispose();
    }

    #[tokio::test]
    async fn check_auth_status_clears_an_invalid_stored_token() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/users/me");
            then.status(401)
                .json_body(json!({ "detail": "유효하지 않은 인증 정보입니다." }));
        });

        let store: Rc<dyn SessionStore> = Rc::new(MemorySessionStore::new());
        store.set(AUTH_TOKEN_KEY, "tk_stale").unwrap();
        let api = client(&server, Rc::clone(&store));

        let error = check_auth_status(&api).await.unwrap_err();
        assert_eq!(error.status(), Some(401));
        assert!(store.get(AUTH_TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn check_auth_status_keeps_a_valid_session() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/users/me");
            then.status(200).json_body(user_body());
        });

        let store: Rc<dyn SessionStore> = Rc::new(MemorySessionStore::new());
        store.set(AUTH_TOKEN_KEY, "tk_student").unwrap();
        let api = client(&server, Rc::clone(&store));

        let user = check_auth_status(&api).await.unwrap();
        assert_eq!(user.student_id, "20240001");
        assert_eq!(store.get(AUTH_TOKEN_KEY).as_deref(), Some("tk_student"));
    }
}
