use leptos::ev::{DragEvent, KeyboardEvent};
use leptos::*;
use web_sys::HtmlInputElement;

use crate::api::NoteKind;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::layout::LoadingSpinner;
use crate::pages::dashboard::components::credit_confirm_modal::CreditConfirmModal;
use crate::pages::dashboard::upload::{close_needs_confirmation, UploadStage};
use crate::pages::dashboard::view_model::use_dashboard_view_model;
use crate::utils::format::format_file_size;

/// Document conversion modal: pick or drop a file, confirm the credit cost,
/// wait for the server. A failed attempt keeps the file in the form.
#[component]
pub fn DocumentUploadModal() -> impl IntoView {
    let vm = use_dashboard_view_model();
    let is_open = vm.document_open;
    let flow = vm.document_flow;
    let force_close_open = create_rw_signal(false);

    let stage = Signal::derive(move || flow.get().stage());
    let processing = Signal::derive(move || flow.get().is_processing());
    let selection = Signal::derive(move || {
        flow.get()
            .pending()
            .map(|pending| (pending.file_name.clone(), pending.size()))
    });
    let confirm_open = Signal::derive(move || stage.get() == UploadStage::ConfirmPending);

    let request_close = move || {
        if close_needs_confirmation(stage.get_untracked(), false) {
            force_close_open.set(true);
        } else {
            vm.close_upload(NoteKind::Document);
        }
    };

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[50] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="닫기"
                    class="absolute inset-0 bg-black/50"
                    on:click=move |_| request_close()
                ></button>
                <div
                    class="relative z-[51] w-full max-w-lg rounded-lg bg-white shadow-xl border border-gray-200 p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            request_close();
                        }
                    }
                >
                    <div class="flex items-start justify-between gap-3">
                        <h2 class="text-lg font-semibold text-gray-900">{"문서로 노트 만들기"}</h2>
                        <button
                            type="button"
                            aria-label="닫기"
                            class="text-gray-400 hover:text-gray-600"
                            on:click=move |_| request_close()
                        >
                            {"✕"}
                        </button>
                    </div>

                    <label
                        for="document-file-input"
                        class="block cursor-pointer rounded-lg border-2 border-dashed border-gray-300 p-8 text-center hover:border-blue-400"
                        on:dragover=move |ev: DragEvent| ev.prevent_default()
                        on:drop=move |ev: DragEvent| {
                            ev.prevent_default();
                            if let Some(file) = ev
                                .data_transfer()
                                .and_then(|transfer| transfer.files())
                                .and_then(|files| files.get(0))
                            {
                                vm.select_browser_file(NoteKind::Document, file);
                            }
                        }
                    >
                        <i class="fa-solid fa-file-arrow-up text-2xl text-blue-600"></i>
                        <p class="mt-2 text-sm text-gray-700">
                            {"파일을 끌어다 놓거나 클릭하여 선택하세요"}
                        </p>
                        <p class="mt-1 text-xs text-gray-500">{"PDF, DOC, DOCX, PPT, PPTX, TXT"}</p>
                    </label>
                    <input
                        id="document-file-input"
                        type="file"
                        class="hidden"
                        accept=".pdf,.doc,.docx,.ppt,.pptx,.txt"
                        on:change=move |ev| {
                            let input = event_target::<HtmlInputElement>(&ev);
                            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                                vm.select_browser_file(NoteKind::Document, file);
                            }
                            // Picking the same file again must re-fire change.
                            input.set_value("");
                        }
                    />

                    <Show when=move || selection.get().is_some()>
                        <div class="flex items-center gap-2 rounded-md bg-blue-50 px-3 py-2 text-sm text-blue-800">
                            <i class="fa-solid fa-file"></i>
                            {move || selection.get().map(|(name, size)| {
                                format!("{} ({})", name, format_file_size(size))
                            })}
                        </div>
                    </Show>

                    <button
                        type="button"
                        class="w-full inline-flex items-center justify-center gap-2 rounded-md px-4 py-2 text-sm font-semibold bg-blue-600 text-white hover:bg-blue-700 disabled:opacity-50"
                        disabled=move || processing.get()
                        on:click=move |_| vm.request_confirm(NoteKind::Document)
                    >
                        <Show when=move || processing.get()>
                            <LoadingSpinner />
                        </Show>
                        {move || if processing.get() { "처리 중..." } else { "노트 생성하기" }}
                    </button>
                </div>
            </div>

            <CreditConfirmModal
                is_open=confirm_open
                kind=NoteKind::Document
                on_confirm=Callback::new(move |_| vm.confirm_upload(NoteKind::Document))
                on_cancel=Callback::new(move |_| vm.cancel_confirm(NoteKind::Document))
            />
            <ConfirmDialog
                is_open=force_close_open.into()
                title="작업 중단"
                message="파일을 처리하는 중입니다. 정말 닫으시겠습니까?"
                confirm_label="닫기"
                destructive=true
                on_confirm=Callback::new(move |_| {
                    force_close_open.set(false);
                    vm.close_upload(NoteKind::Document);
                })
                on_cancel=Callback::new(move |_| force_close_open.set(false))
            />
        </Show>
    }
}
