use leptos::ev::{KeyboardEvent, SubmitEvent};
use leptos::*;
use web_sys::HtmlInputElement;

use crate::api::{ApiError, LoginRequest};
use crate::components::error::InlineErrorMessage;
use crate::pages::dashboard::utils::validate_login;
use crate::state::auth::use_login_action;

/// Student login form. Field values survive a close so a failed attempt can
/// be corrected; the backend rejection detail is shown inline.
#[component]
pub fn LoginModal(is_open: Signal<bool>, on_close: Callback<()>) -> impl IntoView {
    let (student_id, set_student_id) = create_signal(String::new());
    let (name, set_name) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<ApiError>);

    let login_action = use_login_action();
    let pending = login_action.pending();

    let close_on_success = on_close;
    {
        create_effect(move |_| {
            if let Some(result) = login_action.value().get() {
                match result {
                    Ok(_) => {
                        set_error.set(None);
                        set_student_id.set(String::new());
                        set_name.set(String::new());
                        close_on_success.call(());
                    }
                    Err(err) => set_error.set(Some(err)),
                }
            }
        });
    }

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let student_id_value = student_id.get_untracked();
        let name_value = name.get_untracked();
        if let Err(err) = validate_login(&student_id_value, &name_value) {
            set_error.set(Some(err));
            return;
        }
        set_error.set(None);
        login_action.dispatch(LoginRequest {
            student_id: student_id_value,
            name: name_value,
        });
    };

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
                    class="relative z-[61] w-full max-w-md rounded-lg bg-white shadow-xl border border-gray-200 p-6 space-y-4"
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
                        <div>
                            <h2 class="text-lg font-semibold text-gray-900">{"로그인"}</h2>
                            <p class="mt-1 text-sm text-gray-600">
                                {"베타 테스터로 등록된 학번과 이름을 입력해주세요."}
                            </p>
                        </div>
                        <button
                            type="button"
                            aria-label="닫기"
                            class="text-gray-400 hover:text-gray-600"
                            on:click=move |_| close_on_header_button.call(())
                        >
                            {"✕"}
                        </button>
                    </div>
                    <form class="space-y-4" on:submit=handle_submit>
                        <div>
                            <label for="student_id" class="block text-sm font-medium text-gray-700">
                                {"학번"}
                            </label>
                            <input
                                id="student_id"
                                name="student_id"
                                type="text"
                                class="mt-1 block w-full rounded-md border border-gray-300 px-3 py-2 text-sm focus:outline-none focus:ring-purple-500 focus:border-purple-500"
                                placeholder="예: 20240001"
                                prop:value=student_id
                                on:input=move |ev| {
                                    let target = event_target::<HtmlInputElement>(&ev);
                                    set_student_id.set(target.value());
                                }
                            />
                        </div>
                        <div>
                            <label for="student_name" class="block text-sm font-medium text-gray-700">
                                {"이름"}
                            </label>
                            <input
                                id="student_name"
                                name="student_name"
                                type="text"
                                class="mt-1 block w-full rounded-md border border-gray-300 px-3 py-2 text-sm focus:outline-none focus:ring-purple-500 focus:border-purple-500"
                                placeholder="예: 김철수"
                                prop:value=name
                                on:input=move |ev| {
                                    let target = event_target::<HtmlInputElement>(&ev);
                                    set_name.set(target.value());
                                }
                            />
                        </div>
                        <InlineErrorMessage error={error.into()} />
                        <button
                            type="submit"
                            class="w-full inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-purple-600 text-white hover:bg-purple-700 disabled:opacity-50"
                            disabled=move || pending.get()
                        >
                            {move || if pending.get() { "로그인 중..." } else { "로그인" }}
                        </button>
                    </form>
                </div>
            </div>
        </Show>
    }
}
