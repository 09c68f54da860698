use leptos::*;

use crate::api::NoteKind;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::guard::RequireAuth;
use crate::components::layout::Layout;
use crate::pages::dashboard::components::{
    ActionCards, AudioUploadModal, DocumentUploadModal, LoginModal, NoteDetailModal, NoteList,
    ProfileModal,
};
use crate::state::auth::use_logout;

use super::view_model::{use_dashboard_view_model, DELETE_CONFIRM_MESSAGE};

/// The single page of the app: note creation entry points, the note list and
/// every modal the workflows open. The page owns the view model; modals and
/// cards reach it through context.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let vm = use_dashboard_view_model();
    let logout = use_logout();

    let detail_open = Signal::derive(move || vm.selected_note_id.get().is_some());
    let delete_open = Signal::derive(move || vm.delete_target.get().is_some());
    let download_pending = Signal::derive(move || vm.pdf_action.pending().get());
    let login_open = Signal::derive(move || vm.login_open.get());
    let profile_open = Signal::derive(move || vm.profile_open.get());

    let on_logout = {
        let logout = logout.clone();
        Callback::new(move |_| {
            logout();
            vm.profile_open.set(false);
            vm.selected_note_id.set(None);
        })
    };

    view! {
        <Layout
            on_login=Callback::new(vm.handle_open_login())
            on_profile=Callback::new(vm.handle_open_profile())
        >
            <div class="space-y-6">
                <div>
                    <h1 class="text-2xl font-bold text-gray-900">{"어떤 노트를 만들까요?"}</h1>
                    <p class="mt-1 text-sm text-gray-600">
                        {"강의 녹음과 문서를 AI가 요약 노트로 정리해드립니다"}
                    </p>
                </div>

                <ActionCards
                    on_audio=Callback::new(vm.handle_open_upload(NoteKind::Audio))
                    on_document=Callback::new(vm.handle_open_upload(NoteKind::Document))
                    on_youtube=Callback::new(vm.handle_youtube_placeholder())
                />

                <div>
                    <h2 class="text-lg font-semibold text-gray-900">{"내 노트"}</h2>
                    <div class="mt-3">
                        <RequireAuth fallback=move || {
                            view! {
                                <div class="bg-white shadow rounded-xl p-8 text-center space-y-3">
                                    <p class="text-sm text-gray-600">
                                        {"노트를 보려면 로그인해주세요."}
                                    </p>
                                    <button
                                        type="button"
                                        class="px-4 py-2 rounded-lg bg-purple-600 text-white text-sm font-medium hover:bg-purple-700"
                                        on:click=move |_| vm.login_open.set(true)
                                    >
                                        {"로그인"}
                                    </button>
                                </div>
                            }
                        }>
                            <NoteList
                                notes=vm.notes_resource
                                on_open=Callback::new(vm.handle_select_note())
                                on_delete=Callback::new(vm.handle_request_delete())
                            />
                        </RequireAuth>
                    </div>
                </div>
            </div>
        </Layout>

        <AudioUploadModal />
        <DocumentUploadModal />
        <LoginModal is_open=login_open on_close=Callback::new(vm.handle_close_login()) />
        <ProfileModal
            is_open=profile_open
            on_close=Callback::new(vm.handle_close_profile())
            on_logout=on_logout
        />
        <NoteDetailModal
            is_open=detail_open
            detail=vm.note_detail
            on_close=Callback::new(vm.handle_close_detail())
            on_download=Callback::new(vm.handle_download_pdf())
            download_pending=download_pending
        />
        <ConfirmDialog
            is_open=delete_open
            title="노트 삭제"
            message=DELETE_CONFIRM_MESSAGE
            confirm_label="삭제"
            destructive=true
            confirm_disabled=Signal::derive(move || vm.delete_action.pending().get())
            on_confirm=Callback::new(vm.handle_confirm_delete())
            on_cancel=Callback::new(vm.handle_cancel_delete())
        />
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use std::rc::Rc;

    use super::*;
    use crate::api::ApiClient;
    use crate::test_support::helpers::{provide_auth, student_user};
    use crate::test_support::ssr::render_to_string;
    use crate::utils::storage::MemorySessionStore;

    fn render_page(authenticated: bool) -> String {
        render_to_string(move || {
            provide_context(
                ApiClient::new_with_base_url("http://127.0.0.1:9")
                    .with_store(Rc::new(MemorySessionStore::default())),
            );
            provide_auth(authenticated.then(student_user));
            view! { <DashboardPage /> }
        })
    }

    #[test]
    fn logged_out_page_shows_cards_and_the_login_prompt() {
        let html = render_page(false);
        assert!(html.contains("어떤 노트를 만들까요?"));
        assert!(html.contains("오디오 노트"));
        assert!(html.contains("문서 노트"));
        assert!(html.contains("YouTube 노트"));
        assert!(html.contains("노트를 보려면 로그인해주세요."));
    }

    #[test]
    fn logged_in_page_shows_the_note_section_instead_of_the_prompt() {
        let html = render_page(true);
        assert!(html.contains("내 노트"));
        assert!(!html.contains("노트를 보려면 로그인해주세요."));
        assert!(html.contains("크레딧 10"));
    }
}
