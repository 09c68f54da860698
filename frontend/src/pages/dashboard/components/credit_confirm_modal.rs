use leptos::*;

use crate::api::NoteKind;

/// Credit-cost confirmation shown before a conversion is dispatched. The
/// displayed cost is static per kind; the server keeps the real balance.
#[component]
pub fn CreditConfirmModal(
    is_open: Signal<bool>,
    kind: NoteKind,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let cost = kind.credit_cost();
    let cancel_on_backdrop = on_cancel;
    let cancel_on_button = on_cancel;

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[80] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="닫기"
                    class="absolute inset-0 bg-black/50"
                    on:click=move |_| cancel_on_backdrop.call(())
                ></button>
                <div
                    class="relative z-[81] w-full max-w-sm rounded-lg bg-white shadow-xl border border-gray-200 p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                >
                    <div class="flex items-center gap-3">
                        <div class="w-10 h-10 rounded-full bg-purple-100 text-purple-600 flex items-center justify-center">
                            <i class="fa-solid fa-coins"></i>
                        </div>
                        <h2 class="text-lg font-semibold text-gray-900">{"크레딧 사용 확인"}</h2>
                    </div>
                    <p class="text-sm text-gray-700">{format!("{} 크레딧이 차감됩니다", cost)}</p>
                    <div class="rounded-md bg-purple-50 px-3 py-2 text-xs text-purple-700">
                        {"크레딧은 매일 자정에 10으로 초기화됩니다."}
                    </div>
                    <div class="flex justify-end gap-2">
                        <button
                            type="button"
                            class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-gray-100 text-gray-700 hover:bg-gray-200"
                            on:click=move |_| cancel_on_button.call(())
                        >
                            {"취소"}
                        </button>
                        <button
                            type="button"
                            class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-purple-600 text-white hover:bg-purple-700"
                            on:click=move |_| on_confirm.call(())
                        >
                            {"확인"}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn shows_the_audio_cost_and_the_midnight_notice() {
        let html = render_to_string(|| {
            view! {
                <CreditConfirmModal
                    is_open=Signal::derive(|| true)
                    kind=NoteKind::Audio
                    on_confirm=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("크레딧 사용 확인"));
        assert!(html.contains("10 크레딧이 차감됩니다"));
        assert!(html.contains("크레딧은 매일 자정에 10으로 초기화됩니다."));
    }

    #[test]
    fn document_conversions_cost_five_credits() {
        let html = render_to_string(|| {
            view! {
                <CreditConfirmModal
                    is_open=Signal::derive(|| true)
                    kind=NoteKind::Document
                    on_confirm=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("5 크레딧이 차감됩니다"));
    }

    #[test]
    fn stays_hidden_while_closed() {
        let html = render_to_string(|| {
            view! {
                <CreditConfirmModal
                    is_open=Signal::derive(|| false)
                    kind=NoteKind::Audio
                    on_confirm=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert!(!html.contains("크레딧 사용 확인"));
    }
}
