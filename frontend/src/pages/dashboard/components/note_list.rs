use leptos::*;

use crate::api::{ApiError, NoteKind, NoteResponse};
use crate::components::error::InlineErrorMessage;
use crate::components::layout::LoadingSpinner;
use crate::pages::dashboard::utils::{kind_accent, kind_icon, kind_label};
use crate::utils::format::{format_clock, format_created_on};

#[component]
pub fn NoteList(
    notes: Resource<(bool, u32), Result<Vec<NoteResponse>, ApiError>>,
    on_open: Callback<NoteResponse>,
    on_delete: Callback<NoteResponse>,
) -> impl IntoView {
    view! {
        <div class="space-y-4">
            {move || match notes.get() {
                None => view! {
                    <div class="flex items-center gap-2 text-sm text-gray-500">
                        <LoadingSpinner />
                        <span>{"노트를 불러오는 중..."}</span>
                    </div>
                }.into_view(),
                Some(Err(err)) => {
                    let error_signal = create_rw_signal(Some(err));
                    view! { <InlineErrorMessage error={error_signal.into()} /> }.into_view()
                }
                Some(Ok(list)) if list.is_empty() => view! {
                    <div class="bg-white shadow rounded-xl p-8 text-center">
                        <p class="text-sm text-gray-500">
                            {"아직 생성된 노트가 없습니다. 첫 노트를 만들어보세요!"}
                        </p>
                    </div>
                }.into_view(),
                Some(Ok(list)) => view! {
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <For
                            each=move || list.clone()
                            key=|note| note.id.clone()
                            children=move |note: NoteResponse| {
                                view! {
                                    <NoteCard note=note on_open=on_open on_delete=on_delete />
                                }
                            }
                        />
                    </div>
                }.into_view(),
            }}
        </div>
    }
}

#[component]
pub fn NoteCard(
    note: NoteResponse,
    on_open: Callback<NoteResponse>,
    on_delete: Callback<NoteResponse>,
) -> impl IntoView {
    let kind = note.note_type;
    let created_label = format_created_on(note.created_at);
    let duration = (kind == NoteKind::Audio && note.media_duration_seconds > 0.0)
        .then(|| format_clock(note.media_duration_seconds.round() as u32));
    let open_note = note.clone();
    let delete_note = note.clone();

    view! {
        <div
            class="bg-white shadow rounded-xl p-5 cursor-pointer hover:shadow-md transition-shadow"
            on:click=move |_| on_open.call(open_note.clone())
        >
            <div class="flex items-start justify-between gap-3">
                <div class="flex items-center gap-3 min-w-0">
                    <div class=format!(
                        "w-10 h-10 rounded-full {} flex items-center justify-center text-white shrink-0",
                        kind_accent(kind),
                    )>
                        <i class=kind_icon(kind)></i>
                    </div>
                    <div class="min-w-0">
                        <p class="text-xs text-gray-500">{kind_label(kind)}</p>
                        <h3 class="text-base font-semibold text-gray-900 truncate">
                            {note.title.clone()}
                        </h3>
                    </div>
                </div>
                <button
                    type="button"
                    class="text-gray-400 hover:text-red-600"
                    aria-label="노트 삭제"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_delete.call(delete_note.clone());
                    }
                >
                    <i class="fa-solid fa-trash"></i>
                </button>
            </div>
            <div class="mt-3 flex items-center gap-3 text-xs text-gray-500">
                <span>{created_label}</span>
                {duration.map(|label| view! {
                    <span class="flex items-center gap-1">
                        <i class="fa-regular fa-clock"></i>
                        {label}
                    </span>
                })}
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::sample_note;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn card_shows_kind_title_and_creation_date() {
        let html = render_to_string(|| {
            let noop = Callback::new(|_: NoteResponse| {});
            let mut note = sample_note("n1", NoteKind::Audio);
            note.media_duration_seconds = 93.5;
            view! { <NoteCard note=note on_open=noop on_delete=noop /> }
        });
        assert!(html.contains("강의 노트 n1"));
        assert!(html.contains("오디오"));
        assert!(html.contains("fa-microphone"));
        assert!(html.contains("bg-purple-600"));
        assert!(html.contains("Created on Tuesday, June 3"));
        assert!(html.contains("01:34"));
        assert!(html.contains("노트 삭제"));
    }

    #[test]
    fn document_card_carries_its_own_accent() {
        let html = render_to_string(|| {
            let noop = Callback::new(|_: NoteResponse| {});
            view! { <NoteCard note=sample_note("n2", NoteKind::Document) on_open=noop on_delete=noop /> }
        });
        assert!(html.contains("문서"));
        assert!(html.contains("fa-file-lines"));
        assert!(html.contains("bg-blue-600"));
        // No recording, no duration chip.
        assert!(!html.contains("fa-regular fa-clock"));
    }

    #[test]
    fn unresolved_list_shows_the_loading_row() {
        let html = render_to_string(|| {
            let noop = Callback::new(|_: NoteResponse| {});
            let notes = create_resource(
                || (true, 0u32),
                |_| async { Ok(Vec::<NoteResponse>::new()) },
            );
            view! { <NoteList notes=notes on_open=noop on_delete=noop /> }
        });
        assert!(html.contains("노트를 불러오는 중"));
    }
}
