use leptos::*;

/// The three entry points for creating a note. YouTube is a placeholder; the
/// caller decides what clicking it does.
#[component]
pub fn ActionCards(
    on_audio: Callback<()>,
    on_document: Callback<()>,
    on_youtube: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            <button
                type="button"
                class="bg-white shadow rounded-xl p-6 text-left hover:shadow-md transition-shadow"
                on:click=move |_| on_audio.call(())
            >
                <div class="w-12 h-12 rounded-full bg-purple-600 flex items-center justify-center text-white">
                    <i class="fa-solid fa-microphone"></i>
                </div>
                <h3 class="mt-4 text-base font-semibold text-gray-900">{"오디오 노트"}</h3>
                <p class="mt-1 text-sm text-gray-600">
                    {"강의를 녹음하거나 오디오 파일을 업로드하세요"}
                </p>
            </button>
            <button
                type="button"
                class="bg-white shadow rounded-xl p-6 text-left hover:shadow-md transition-shadow"
                on:click=move |_| on_document.call(())
            >
                <div class="w-12 h-12 rounded-full bg-blue-600 flex items-center justify-center text-white">
                    <i class="fa-solid fa-file-lines"></i>
                </div>
                <h3 class="mt-4 text-base font-semibold text-gray-900">{"문서 노트"}</h3>
                <p class="mt-1 text-sm text-gray-600">
                    {"PDF, 워드, 발표자료로 노트를 만들어보세요"}
                </p>
            </button>
            <button
                type="button"
                class="bg-white shadow rounded-xl p-6 text-left hover:shadow-md transition-shadow"
                on:click=move |_| on_youtube.call(())
            >
                <div class="w-12 h-12 rounded-full bg-red-600 flex items-center justify-center text-white">
                    <i class="fa-brands fa-youtube"></i>
                </div>
                <h3 class="mt-4 text-base font-semibold text-gray-900">{"YouTube 노트"}</h3>
                <p class="mt-1 text-sm text-gray-600">
                    {"YouTube 영상으로 노트를 만들어보세요"}
                </p>
            </button>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_all_three_cards() {
        let html = render_to_string(|| {
            let noop = Callback::new(|_: ()| {});
            view! { <ActionCards on_audio=noop on_document=noop on_youtube=noop /> }
        });
        assert!(html.contains("오디오 노트"));
        assert!(html.contains("문서 노트"));
        assert!(html.contains("YouTube 노트"));
        assert!(html.contains("fa-microphone"));
        assert!(html.contains("fa-file-lines"));
        assert!(html.contains("fa-youtube"));
    }
}
