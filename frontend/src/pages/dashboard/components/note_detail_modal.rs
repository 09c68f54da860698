use leptos::ev::KeyboardEvent;
use leptos::*;

use crate::api::{ApiError, NoteResponse};
use crate::components::error::InlineErrorMessage;
use crate::components::layout::LoadingSpinner;
use crate::pages::dashboard::utils::{kind_accent, kind_icon, kind_label};
use crate::utils::format::format_created_on;

/// Full note view: summary, transcription and the PDF export button. The
/// note is fetched fresh whenever a card is opened.
#[component]
pub fn NoteDetailModal(
    is_open: Signal<bool>,
    detail: Resource<Option<String>, Option<Result<NoteResponse, ApiError>>>,
    on_close: Callback<()>,
    on_download: Callback<String>,
    download_pending: Signal<bool>,
) -> impl IntoView {
    let close_on_backdrop = on_close;
    let close_on_header_button = on_close;
    let close_on_esc = on_close;

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[60] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="닫기"
                    class="absolute inset-0 bg-black/50"
                    on:click=move |_| close_on_backdrop.call(())
                ></button>
                <div
                    class="relative z-[61] w-full max-w-3xl max-h-[85vh] overflow-y-auto rounded-lg bg-white shadow-xl border border-gray-200 p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            close_on_esc.call(());
                        }
                    }
                >
                    <div class="flex justify-end">
                        <button
                            type="button"
                            aria-label="닫기"
                            class="text-gray-400 hover:text-gray-600"
                            on:click=move |_| close_on_header_button.call(())
                        >
                            {"✕"}
                        </button>
                    </div>
                    {move || match detail.get() {
                        None | Some(None) => view! {
                            <div class="flex items-center gap-2 text-sm text-gray-500">
                                <LoadingSpinner />
                                <span>{"노트를 불러오는 중..."}</span>
                            </div>
                        }.into_view(),
                        Some(Some(Err(err))) => {
                            let error_signal = create_rw_signal(Some(err));
                            view! { <InlineErrorMessage error={error_signal.into()} /> }.into_view()
                        }
                        Some(Some(Ok(note))) => view! {
                            <NoteDetailBody
                                note=note
                                on_download=on_download
                                download_pending=download_pending
                            />
                        }.into_view(),
                    }}
                </div>
            </div>
        </Show>
    }
}

#[component]
pub fn NoteDetailBody(
    note: NoteResponse,
    on_download: Callback<String>,
    download_pending: Signal<bool>,
) -> impl IntoView {
    let kind = note.note_type;
    let created_label = format_created_on(note.created_at);
    let note_id = note.id.clone();

    view! {
        <div class="space-y-6">
            <div class="flex items-start justify-between gap-4">
                <div class="flex items-center gap-3 min-w-0">
                    <div class=format!(
                        "w-12 h-12 rounded-full {} flex items-center justify-center text-white shrink-0",
                        kind_accent(kind),
                    )>
                        <i class=kind_icon(kind)></i>
                    </div>
                    <div class="min-w-0">
                        <p class="text-xs text-gray-500">{kind_label(kind)}</p>
                        <h2 class="text-xl font-semibold text-gray-900">{note.title.clone()}</h2>
                        <p class="text-xs text-gray-500">{created_label}</p>
                    </div>
                </div>
                <button
                    type="button"
                    class="inline-flex items-center gap-2 rounded-md px-3 py-2 text-sm font-semibold bg-purple-600 text-white hover:bg-purple-700 disabled:opacity-50 shrink-0"
                    disabled=move || download_pending.get()
                    on:click=move |_| on_download.call(note_id.clone())
                >
                    <i class="fa-solid fa-download"></i>
                    {move || if download_pending.get() { "다운로드 중..." } else { "PDF 다운로드" }}
                </button>
            </div>
            <section>
                <h3 class="text-sm font-semibold text-gray-900 mb-2">{"요약"}</h3>
                <div class="rounded-md bg-purple-50 p-4 text-sm text-gray-800 whitespace-pre-wrap">
                    {note.summary.clone()}
                </div>
            </section>
            <section>
                <h3 class="text-sm font-semibold text-gray-900 mb-2">{"전체 전사"}</h3>
                <div class="rounded-md bg-gray-50 p-4 text-sm text-gray-700 whitespace-pre-wrap">
                    {note.original_transcription.clone()}
                </div>
            </section>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::NoteKind;
    use crate::test_support::helpers::sample_note;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn body_shows_summary_transcription_and_download_button() {
        let html = render_to_string(|| {
            let mut note = sample_note("n1", NoteKind::Audio);
            note.summary = "## 핵심 요약\n- 첫 번째".into();
            note.original_transcription = "전체 전사 내용입니다.".into();
            view! {
                <NoteDetailBody
                    note=note
                    on_download=Callback::new(|_: String| {})
                    download_pending=Signal::derive(|| false)
                />
            }
        });
        assert!(html.contains("강의 노트 n1"));
        assert!(html.contains("요약"));
        assert!(html.contains("핵심 요약"));
        assert!(html.contains("전체 전사"));
        assert!(html.contains("전체 전사 내용입니다."));
        assert!(html.contains("PDF 다운로드"));
    }

    #[test]
    fn unresolved_detail_shows_the_loading_row() {
        let html = render_to_string(|| {
            let detail = create_resource(
                || Some("n1".to_string()),
                |_| async { None::<Result<NoteResponse, ApiError>> },
            );
            view! {
                <NoteDetailModal
                    is_open=Signal::derive(|| true)
                    detail=detail
                    on_close=Callback::new(|_| {})
                    on_download=Callback::new(|_: String| {})
                    download_pending=Signal::derive(|| false)
                />
            }
        });
        assert!(html.contains("노트를 불러오는 중"));
    }
}
