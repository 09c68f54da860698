use std::rc::Rc;

use leptos::*;

use crate::api::{
    AdminCreateUserRequest, ApiClient, ApiError, DetailResponse, MessageResponse, UserResponse,
};
use crate::state::toast::{toast_error, toast_success, use_toasts, Toast};
use crate::utils::storage::{SessionStore, ADMIN_API_KEY_KEY, ADMIN_SESSION_KEY};

use super::repository::AdminRepository;
use super::utils::{is_key_rejection, validate_admin_key, validate_new_user};

pub const TOAST_ADMIN_AUTH: &str = "관리자 인증 오류";
pub const TOAST_ADMIN_ERROR: &str = "관리자 작업 오류";
pub const TOAST_USER_CREATED: &str = "사용자 생성 완료";
pub const TOAST_USER_DELETED: &str = "사용자 삭제 완료";
pub const TOAST_CREDITS_RESET: &str = "크레딧 초기화 완료";
pub const KEY_REJECTED_MESSAGE: &str = "관리자 키가 유효하지 않습니다. 다시 입력해주세요.";

/// State behind the admin panel: the key gate, the beta-tester table and the
/// create/delete/reset actions. Any 401/403 from an admin endpoint clears
/// the stored key and re-locks the gate.
#[derive(Clone, Copy)]
pub struct AdminViewModel {
    pub unlocked: RwSignal<bool>,
    pub users_reload: RwSignal<u32>,
    pub users_resource: Resource<(bool, u32), Result<Vec<UserResponse>, ApiError>>,
    pub create_action: Action<AdminCreateUserRequest, Result<UserResponse, ApiError>>,
    pub delete_target: RwSignal<Option<UserResponse>>,
    pub delete_action: Action<String, Result<DetailResponse, ApiError>>,
    pub reset_confirm_open: RwSignal<bool>,
    pub reset_action: Action<(), Result<MessageResponse, ApiError>>,
    store: StoredValue<Rc<dyn SessionStore>>,
    set_toasts: WriteSignal<Vec<Toast>>,
}

impl AdminViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = AdminRepository::new_with_client(Rc::new(api.clone()));
        let (_toasts, set_toasts) = use_toasts();

        let session_store = api.session_store();
        // A reload keeps the gate open as long as both admin keys survived.
        let initially_unlocked = session_store.get(ADMIN_SESSION_KEY).is_some()
            && session_store.get(ADMIN_API_KEY_KEY).is_some();
        let store = store_value(session_store);

        let unlocked = create_rw_signal(initially_unlocked);
        let users_reload = create_rw_signal(0u32);

        let repo = repository.clone();
        let users_resource = create_resource(
            move || (unlocked.get(), users_reload.get()),
            move |(open, _reload)| {
                let repo = repo.clone();
                async move {
                    if !open {
                        return Ok(Vec::new());
                    }
                    repo.fetch_users().await
                }
            },
        );

        let repo = repository.clone();
        let create_action = create_action(move |request: &AdminCreateUserRequest| {
            let repo = repo.clone();
            let request = request.clone();
            async move { repo.create_user(request).await }
        });

        let delete_target = create_rw_signal(None::<UserResponse>);
        let repo = repository.clone();
        let delete_action = leptos::create_action(move |student_id: &String| {
            let repo = repo.clone();
            let student_id = student_id.clone();
            async move { repo.delete_user(&student_id).await }
        });

        let reset_confirm_open = create_rw_signal(false);
        let repo = repository.clone();
        let reset_action = leptos::create_action(move |_: &()| {
            let repo = repo.clone();
            async move { repo.reset_credits().await }
        });

        let vm = Self {
            unlocked,
            users_reload,
            users_resource,
            create_action,
            delete_target,
            delete_action,
            reset_confirm_open,
            reset_action,
            store,
            set_toasts,
        };

        create_effect(move |_| {
            if let Some(Err(err)) = vm.users_resource.get() {
                vm.handle_failure(TOAST_ADMIN_ERROR, err);
            }
        });

        create_effect(move |_| {
            if let Some(result) = vm.create_action.value().get() {
                match result {
                    Ok(user) => {
                        toast_success(
                            vm.set_toasts,
                            TOAST_USER_CREATED,
                            format!("'{}' 계정이 추가되었습니다.", user.name),
                        );
                        vm.reload_users();
                    }
                    Err(err) => vm.handle_failure(TOAST_ADMIN_ERROR, err),
                }
            }
        });

        create_effect(move |_| {
            if let Some(result) = vm.delete_action.value().get() {
                match result {
                    Ok(detail) => {
                        toast_success(
                            vm.set_toasts,
                            TOAST_USER_DELETED,
                            detail.detail.unwrap_or_default(),
                        );
                        vm.reload_users();
                    }
                    Err(err) => vm.handle_failure(TOAST_ADMIN_ERROR, err),
                }
                vm.delete_target.set(None);
            }
        });

        create_effect(move |_| {
            if let Some(result) = vm.reset_action.value().get() {
                match result {
                    Ok(message) => {
                        toast_success(vm.set_toasts, TOAST_CREDITS_RESET, message.message);
                        vm.reload_users();
                    }
                    Err(err) => vm.handle_failure(TOAST_ADMIN_ERROR, err),
                }
                vm.reset_confirm_open.set(false);
            }
        });

        vm
    }

    pub fn reload_users(&self) {
        self.users_reload.update(|value| *value = value.wrapping_add(1));
    }

    /// Stores the entered key and opens the gate. The key is only checked by
    /// the server; a bad one re-locks on the first rejected request.
    pub fn unlock(&self, key: &str) -> Result<(), ApiError> {
        let key = validate_admin_key(key)?;
        let store = self.store.get_value();
        store
            .set(ADMIN_API_KEY_KEY, &key)
            .map_err(|_| ApiError::validation("관리자 키를 저장하지 못했습니다."))?;
        let _ = store.set(ADMIN_SESSION_KEY, "true");
        self.unlocked.set(true);
        self.reload_users();
        Ok(())
    }

    /// Drops both admin keys and closes the gate; idempotent.
    pub fn lock(&self) {
        let store = self.store.get_value();
        store.clear(ADMIN_API_KEY_KEY);
        store.clear(ADMIN_SESSION_KEY);
        self.unlocked.set(false);
    }

    fn handle_failure(&self, title: &'static str, error: ApiError) {
        if is_key_rejection(&error) {
            self.lock();
            toast_error(self.set_toasts, TOAST_ADMIN_AUTH, KEY_REJECTED_MESSAGE);
        } else {
            toast_error(self.set_toasts, title, error.message);
        }
    }

    /// Validates and dispatches the create-user form.
    pub fn submit_new_user(&self, name: String, student_id: String) -> Result<(), ApiError> {
        if self.create_action.pending().get_untracked() {
            return Ok(());
        }
        validate_new_user(&name, &student_id)?;
        self.create_action.dispatch(AdminCreateUserRequest {
            name: name.trim().to_string(),
            student_id: student_id.trim().to_string(),
        });
        Ok(())
    }

    pub fn handle_request_delete(&self) -> impl Fn(UserResponse) {
        let delete_target = self.delete_target;
        move |user: UserResponse| delete_target.set(Some(user))
    }

    pub fn handle_confirm_delete(&self) -> impl Fn(()) {
        let delete_target = self.delete_target;
        let delete_action = self.delete_action;
        move |_| {
            if delete_action.pending().get_untracked() {
                return;
            }
            let Some(user) = delete_target.get_untracked() else {
                return;
            };
            delete_action.dispatch(user.student_id);
        }
    }

    pub fn handle_cancel_delete(&self) -> impl Fn(()) {
        let delete_target = self.delete_target;
        move |_| delete_target.set(None)
    }

    pub fn handle_confirm_reset(&self) -> impl Fn(()) {
        let reset_action = self.reset_action;
        move |_| {
            if reset_action.pending().get_untracked() {
                return;
            }
            reset_action.dispatch(());
        }
    }

    pub fn handle_cancel_reset(&self) -> impl Fn(()) {
        let reset_confirm_open = self.reset_confirm_open;
        move |_| reset_confirm_open.set(false)
    }
}

pub fn use_admin_view_model() -> AdminViewModel {
    match use_context::<AdminViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = AdminViewModel::new();
            provide_context(vm);
            vm
        }
    }
}
