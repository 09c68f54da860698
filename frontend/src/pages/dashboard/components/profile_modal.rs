use leptos::ev::KeyboardEvent;
use leptos::*;

use crate::state::auth::use_auth;

#[component]
pub fn ProfileModal(
    is_open: Signal<bool>,
    on_close: Callback<()>,
    on_logout: Callback<()>,
) -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let user_name = Signal::derive(move || {
        auth.get()
            .current_user()
            .map(|user| user.name.clone())
            .unwrap_or_default()
    });
    let student_id = Signal::derive(move || {
        auth.get()
            .current_user()
            .map(|user| user.student_id.clone())
            .unwrap_or_default()
    });
    let credits = Signal::derive(move || auth.get().daily_credits().unwrap_or_default());

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
                    class="relative z-[61] w-full max-w-sm rounded-lg bg-white shadow-xl border border-gray-200 p-6 space-y-4"
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
                    <div class="flex items-start justify-between gap-3">
                        <h2 class="text-lg font-semibold text-gray-900">{"내 프로필"}</h2>
                        <button
                            type="button"
                            aria-label="닫기"
                            class="text-gray-400 hover:text-gray-600"
                            on:click=move |_| close_on_header_button.call(())
                        >
                            {"✕"}
                        </button>
                    </div>
                    <div class="divide-y divide-gray-100 text-sm">
                        <div class="flex items-center justify-between py-2">
                            <span class="text-gray-500">{"이름"}</span>
                            <span class="font-medium text-gray-900">{move || user_name.get()}</span>
                        </div>
                        <div class="flex items-center justify-between py-2">
                            <span class="text-gray-500">{"학번"}</span>
                            <span class="font-medium text-gray-900">{move || student_id.get()}</span>
                        </div>
                        <div class="flex items-center justify-between py-2">
                            <span class="text-gray-500">{"남은 크레딧"}</span>
                            <span class="font-medium text-purple-600">
                                {move || format!("{} 크레딧", credits.get())}
                            </span>
                        </div>
                    </div>
                    <div class="rounded-md bg-purple-50 px-3 py-2 text-xs text-purple-700">
                        {"크레딧은 매일 자정에 10으로 초기화됩니다."}
                    </div>
                    <button
                        type="button"
                        class="w-full inline-flex items-center justify-center gap-2 rounded-md px-4 py-2 text-sm font-semibold bg-red-600 text-white hover:bg-red-700"
                        on:click=move |_| on_logout.call(())
                    >
                        <i class="fa-solid fa-right-from-bracket"></i>
                        {"로그아웃"}
                    </button>
                </div>
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{provide_auth, student_user};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn shows_the_current_user_and_the_credit_notice() {
        let html = render_to_string(|| {
            provide_auth(Some(student_user()));
            view! {
                <ProfileModal
                    is_open=Signal::derive(|| true)
                    on_close=Callback::new(|_| {})
                    on_logout=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("내 프로필"));
        assert!(html.contains("김철수"));
        assert!(html.contains("20240001"));
        assert!(html.contains("10 크레딧"));
        assert!(html.contains("크레딧은 매일 자정에 10으로 초기화됩니다."));
        assert!(html.contains("로그아웃"));
    }

    #[test]
    fn closed_modal_renders_nothing() {
        let html = render_to_string(|| {
            provide_auth(Some(student_user()));
            view! {
                <ProfileModal
                    is_open=Signal::derive(|| false)
                    on_close=Callback::new(|_| {})
                    on_logout=Callback::new(|_| {})
                />
            }
        });
        assert!(!html.contains("내 프로필"));
    }
}
