use std::rc::Rc;

use leptos::*;

use crate::api::{
    ApiClient, ApiError, ApiErrorKind, MessageResponse, NoteKind, NoteResponse,
};
use crate::state::auth::{use_auth, AuthState};
use crate::state::toast::{toast_error, toast_success, use_toasts, Toast};
use crate::utils::download::trigger_pdf_download;

use super::repository::NotesRepository;
use super::upload::{self, PendingUpload, UploadFlow};

pub const TOAST_NOTE_DELETED: &str = "노트 삭제 완료";
pub const TOAST_DELETE_FAILED: &str = "삭제 오류";
pub const TOAST_DOWNLOAD_FAILED: &str = "다운로드 오류";
pub const TOAST_COMING_SOON: &str = "추후 업데이트 예정입니다!";
pub const DELETE_CONFIRM_MESSAGE: &str = "노트를 삭제하시겠습니까?";

#[derive(Clone)]
pub struct UploadPayload {
    pub kind: NoteKind,
    pub upload: PendingUpload,
}

/// Everything the dashboard page and its modals share: the note list
/// resource, one upload workflow per kind, the modal open flags and the
/// actions behind deletion and PDF export.
#[derive(Clone, Copy)]
pub struct DashboardViewModel {
    pub notes_reload: RwSignal<u32>,
    pub notes_resource: Resource<(bool, u32), Result<Vec<NoteResponse>, ApiError>>,
    pub login_open: RwSignal<bool>,
    pub profile_open: RwSignal<bool>,
    pub audio_open: RwSignal<bool>,
    pub document_open: RwSignal<bool>,
    pub audio_flow: RwSignal<UploadFlow>,
    pub document_flow: RwSignal<UploadFlow>,
    pub upload_action: Action<UploadPayload, Result<NoteResponse, ApiError>>,
    pub last_upload_kind: RwSignal<Option<NoteKind>>,
    pub selected_note_id: RwSignal<Option<String>>,
    pub note_detail: Resource<Option<String>, Option<Result<NoteResponse, ApiError>>>,
    pub pdf_action: Action<String, Result<(), ApiError>>,
    pub delete_target: RwSignal<Option<NoteResponse>>,
    pub delete_action: Action<String, Result<MessageResponse, ApiError>>,
    auth: ReadSignal<AuthState>,
    set_toasts: WriteSignal<Vec<Toast>>,
}

impl DashboardViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = NotesRepository::new_with_client(Rc::new(api));
        let (auth, _set_auth) = use_auth();
        let (_toasts, set_toasts) = use_toasts();

        let notes_reload = create_rw_signal(0u32);
        let repo = repository.clone();
        let notes_resource = create_resource(
            move || (auth.get().is_authenticated, notes_reload.get()),
            move |(authenticated, _reload)| {
                let repo = repo.clone();
                async move {
                    if !authenticated {
                        return Ok(Vec::new());
                    }
                    repo.fetch_notes().await
                }
            },
        );

        let login_open = create_rw_signal(false);
        let profile_open = create_rw_signal(false);
        let audio_open = create_rw_signal(false);
        let document_open = create_rw_signal(false);

        let audio_flow = create_rw_signal(UploadFlow::new(NoteKind::Audio));
        let document_flow = create_rw_signal(UploadFlow::new(NoteKind::Document));
        let last_upload_kind = create_rw_signal(None::<NoteKind>);

        let repo = repository.clone();
        let upload_action = create_action(move |payload: &UploadPayload| {
            let repo = repo.clone();
            let payload = payload.clone();
            let flow = match payload.kind {
                NoteKind::Audio => audio_flow,
                NoteKind::Document => document_flow,
            };
            async move {
                let result = repo.submit_upload(payload.kind, &payload.upload).await;
                match &result {
                    Ok(_) => flow.update(|flow| flow.complete_success()),
                    // Hand the file back so a document can be re-submitted.
                    Err(_) => flow.update(|flow| flow.complete_failure(payload.upload.clone())),
                }
                result
            }
        });

        {
            create_effect(move |_| {
                if let Some(result) = upload_action.value().get() {
                    let Some(kind) = last_upload_kind.get_untracked() else {
                        return;
                    };
                    match result {
                        Ok(_) => {
                            toast_success(
                                set_toasts,
                                upload::TOAST_NOTE_CREATED,
                                upload::success_body(kind),
                            );
                            let open = match kind {
                                NoteKind::Audio => audio_open,
                                NoteKind::Document => document_open,
                            };
                            if open.get_untracked() {
                                open.set(false);
                            }
                            // The new note may have landed after a forced
                            // close; refetch either way.
                            notes_reload.update(|value| *value = value.wrapping_add(1));
                        }
                        Err(err) => {
                            toast_error(
                                set_toasts,
                                upload::TOAST_PROCESSING_FAILED,
                                upload::failure_body(kind, &err),
                            );
                        }
                    }
                }
            });
        }

        let selected_note_id = create_rw_signal(None::<String>);
        let repo = repository.clone();
        let note_detail = create_resource(
            move || selected_note_id.get(),
            move |note_id| {
                let repo = repo.clone();
                async move {
                    match note_id {
                        Some(note_id) => Some(repo.fetch_note(&note_id).await),
                        None => None,
                    }
                }
            },
        );

        let repo = repository.clone();
        let pdf_action = create_action(move |note_id: &String| {
            let repo = repo.clone();
            let note_id = note_id.clone();
            async move {
                let pdf = repo.fetch_note_pdf(&note_id).await?;
                trigger_pdf_download(&pdf.filename, &pdf.content_type, &pdf.pdf_data)
                    .map_err(ApiError::validation)
            }
        });

        {
            create_effect(move |_| {
                if let Some(Err(err)) = pdf_action.value().get() {
                    toast_error(set_toasts, TOAST_DOWNLOAD_FAILED, err.message);
                }
            });
        }

        let delete_target = create_rw_signal(None::<NoteResponse>);
        let repo = repository.clone();
        let delete_action = create_action(move |note_id: &String| {
            let repo = repo.clone();
            let note_id = note_id.clone();
            async move { repo.delete_note(&note_id).await }
        });

        {
            create_effect(move |_| {
                if let Some(result) = delete_action.value().get() {
                    match result {
                        Ok(message) => {
                            toast_success(set_toasts, TOAST_NOTE_DELETED, message.message);
                            notes_reload.update(|value| *value = value.wrapping_add(1));
                        }
                        Err(err) => {
                            toast_error(set_toasts, TOAST_DELETE_FAILED, err.message);
                        }
                    }
                    delete_target.set(None);
                }
            });
        }

        Self {
            notes_reload,
            notes_resource,
            login_open,
            profile_open,
            audio_open,
            document_open,
            audio_flow,
            document_flow,
            upload_action,
            last_upload_kind,
            selected_note_id,
            note_detail,
            pdf_action,
            delete_target,
            delete_action,
            auth,
            set_toasts,
        }
    }

    pub fn flow_for(&self, kind: NoteKind) -> RwSignal<UploadFlow> {
        match kind {
            NoteKind::Audio => self.audio_flow,
            NoteKind::Document => self.document_flow,
        }
    }

    fn open_for(&self, kind: NoteKind) -> RwSignal<bool> {
        match kind {
            NoteKind::Audio => self.audio_open,
            NoteKind::Document => self.document_open,
        }
    }

    pub fn reload_notes(&self) {
        self.notes_reload.update(|value| *value = value.wrapping_add(1));
    }

    /// Validates and stores a picked, dropped or recorded file; a rejected
    /// file only produces a toast.
    pub fn select_upload(
        &self,
        kind: NoteKind,
        file_name: String,
        media_type: String,
        bytes: Vec<u8>,
    ) {
        let outcome = self
            .flow_for(kind)
            .try_update(|flow| flow.select(file_name, media_type, bytes));
        if let Some(Err(err)) = outcome {
            toast_error(self.set_toasts, upload::TOAST_UNSUPPORTED_FILE, err.message);
        }
    }

    /// Reads a browser file handle and feeds it into the workflow.
    #[cfg(target_arch = "wasm32")]
    pub fn select_browser_file(&self, kind: NoteKind, file: web_sys::File) {
        let vm = *self;
        spawn_local(async move {
            let file_name = file.name();
            let media_type = file.type_();
            match wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await {
                Ok(buffer) => {
                    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                    vm.select_upload(kind, file_name, media_type, bytes);
                }
                Err(_) => {
                    log::error!("could not read picked file {}", file_name);
                    toast_error(
                        vm.set_toasts,
                        upload::TOAST_UNSUPPORTED_FILE,
                        upload::invalid_file_message(kind),
                    );
                }
            }
        });
    }

    // Browser file handles never reach host builds; the signature stays so
    // the modals compile for server-side tests.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn select_browser_file(&self, _kind: NoteKind, _file: web_sys::File) {}

    /// Asks for the credit confirmation dialog. Refused without a session.
    pub fn request_confirm(&self, kind: NoteKind) {
        let authenticated = self.auth.get_untracked().is_authenticated;
        let outcome = self
            .flow_for(kind)
            .try_update(|flow| flow.request_confirm(authenticated));
        if let Some(Err(err)) = outcome {
            let title = match err.kind {
                ApiErrorKind::AuthRequired => upload::TOAST_LOGIN_NEEDED,
                _ => upload::TOAST_PROCESSING_FAILED,
            };
            toast_error(self.set_toasts, title, err.message);
        }
    }

    /// Dispatches the confirmed file. The workflow hands it over exactly
    /// once, so a stray second confirmation cannot double-submit.
    pub fn confirm_upload(&self, kind: NoteKind) {
        if self.upload_action.pending().get_untracked() {
            return;
        }
        let taken = self
            .flow_for(kind)
            .try_update(|flow| flow.take_confirmed())
            .flatten();
        let Some(pending) = taken else {
            return;
        };
        self.last_upload_kind.set(Some(kind));
        self.upload_action.dispatch(UploadPayload {
            kind,
            upload: pending,
        });
    }

    pub fn cancel_confirm(&self, kind: NoteKind) {
        self.flow_for(kind).update(|flow| flow.cancel_confirm());
    }

    /// Closes an upload modal. Every open → closed transition refetches the
    /// note list to reconcile out-of-band changes.
    pub fn close_upload(&self, kind: NoteKind) {
        let open = self.open_for(kind);
        if !open.get_untracked() {
            return;
        }
        open.set(false);
        self.flow_for(kind).update(|flow| flow.reset());
        self.reload_notes();
    }

    pub fn handle_open_upload(&self, kind: NoteKind) -> impl Fn(()) {
        let vm = *self;
        move |_| {
            // Reopening always starts from a fresh machine.
            vm.flow_for(kind).update(|flow| flow.reset());
            vm.open_for(kind).set(true);
        }
    }

    pub fn handle_close_upload(&self, kind: NoteKind) -> impl Fn(()) {
        let vm = *self;
        move |_| vm.close_upload(kind)
    }

    pub fn handle_youtube_placeholder(&self) -> impl Fn(()) {
        let set_toasts = self.set_toasts;
        move |_| {
            toast_success(set_toasts, TOAST_COMING_SOON, "");
        }
    }

    pub fn handle_open_login(&self) -> impl Fn(()) {
        let login_open = self.login_open;
        move |_| login_open.set(true)
    }

    pub fn handle_close_login(&self) -> impl Fn(()) {
        let login_open = self.login_open;
        move |_| login_open.set(false)
    }

    pub fn handle_open_profile(&self) -> impl Fn(()) {
        let profile_open = self.profile_open;
        move |_| profile_open.set(true)
    }

    pub fn handle_close_profile(&self) -> impl Fn(()) {
        let profile_open = self.profile_open;
        move |_| profile_open.set(false)
    }

    pub fn handle_select_note(&self) -> impl Fn(NoteResponse) {
        let selected_note_id = self.selected_note_id;
        move |note: NoteResponse| selected_note_id.set(Some(note.id))
    }

    pub fn handle_close_detail(&self) -> impl Fn(()) {
        let selected_note_id = self.selected_note_id;
        move |_| selected_note_id.set(None)
    }

    pub fn handle_download_pdf(&self) -> impl Fn(String) {
        let pdf_action = self.pdf_action;
        move |note_id: String| {
            if pdf_action.pending().get_untracked() {
                return;
            }
            pdf_action.dispatch(note_id);
        }
    }

    pub fn handle_request_delete(&self) -> impl Fn(NoteResponse) {
        let delete_target = self.delete_target;
        move |note: NoteResponse| delete_target.set(Some(note))
    }

    pub fn handle_confirm_delete(&self) -> impl Fn(()) {
        let delete_target = self.delete_target;
        let delete_action = self.delete_action;
        move |_| {
            if delete_action.pending().get_untracked() {
                return;
            }
            let Some(note) = delete_target.get_untracked() else {
                return;
            };
            delete_action.dispatch(note.id);
        }
    }

    pub fn handle_cancel_delete(&self) -> impl Fn(()) {
        let delete_target = self.delete_target;
        move |_| delete_target.set(None)
    }
}

pub fn use_dashboard_view_model() -> DashboardViewModel {
    match use_context::<DashboardViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = DashboardViewModel::new();
            provide_context(vm);
            vm
        }
    }
}
