use leptos::ev::SubmitEvent;
use leptos::*;
use web_sys::HtmlInputElement;

use crate::api::{ApiError, UserResponse};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::error::InlineErrorMessage;

use super::view_model::use_admin_view_model;

/// Beta-tester management behind a key gate. The key is stored and attached
/// to every admin request; the server is the only judge of its validity.
#[component]
pub fn AdminPage() -> impl IntoView {
    let vm = use_admin_view_model();
    let unlocked = vm.unlocked;

    view! {
        <div class="min-h-screen bg-gray-50">
            <header class="bg-white shadow-sm">
                <div class="max-w-5xl mx-auto px-4 py-4 flex items-center justify-between">
                    <h1 class="text-xl font-bold text-gray-900">{"관리자 패널"}</h1>
                    <Show when=move || unlocked.get()>
                        <button
                            type="button"
                            class="text-sm text-gray-500 hover:text-gray-700"
                            on:click=move |_| vm.lock()
                        >
                            {"잠그기"}
                        </button>
                    </Show>
                </div>
            </header>
            <main class="max-w-5xl mx-auto px-4 py-6">
                <Show when=move || unlocked.get() fallback=move || view! { <KeyGate /> }>
                    <AdminConsole />
                </Show>
            </main>
        </div>
    }
}

#[component]
fn KeyGate() -> impl IntoView {
    let vm = use_admin_view_model();
    let (key, set_key) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<ApiError>);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        match vm.unlock(&key.get_untracked()) {
            Ok(()) => {
                set_error.set(None);
                set_key.set(String::new());
            }
            Err(err) => set_error.set(Some(err)),
        }
    };

    view! {
        <div class="max-w-md mx-auto bg-white shadow rounded-xl p-6 space-y-4">
            <div>
                <h2 class="text-lg font-semibold text-gray-900">{"관리자 인증"}</h2>
                <p class="mt-1 text-sm text-gray-600">
                    {"관리자 API 키를 입력해주세요."}
                </p>
            </div>
            <form class="space-y-4" on:submit=handle_submit>
                <input
                    id="admin_api_key"
                    name="admin_api_key"
                    type="password"
                    class="block w-full rounded-md border border-gray-300 px-3 py-2 text-sm focus:outline-none focus:ring-purple-500 focus:border-purple-500"
                    placeholder="관리자 API 키"
                    prop:value=key
                    on:input=move |ev| {
                        let target = event_target::<HtmlInputElement>(&ev);
                        set_key.set(target.value());
                    }
                />
                <InlineErrorMessage error={error.into()} />
                <button
                    type="submit"
                    class="w-full inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-purple-600 text-white hover:bg-purple-700"
                >
                    {"확인"}
                </button>
            </form>
        </div>
    }
}

#[component]
fn AdminConsole() -> impl IntoView {
    let vm = use_admin_view_model();

    let delete_open = Signal::derive(move || vm.delete_target.get().is_some());
    let delete_message = Signal::derive(move || {
        vm.delete_target
            .get()
            .map(|user| format!("'{}' ({}) 계정을 삭제하시겠습니까?", user.name, user.student_id))
            .unwrap_or_default()
    });
    let reset_open = Signal::derive(move || vm.reset_confirm_open.get());

    view! {
        <div class="space-y-6">
            <CreateUserForm />
            <UserTable />
            <div class="flex justify-end">
                <button
                    type="button"
                    class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-red-600 text-white hover:bg-red-700"
                    on:click=move |_| vm.reset_confirm_open.set(true)
                >
                    {"전체 크레딧 초기화"}
                </button>
            </div>
        </div>

        <ConfirmDialog
            is_open=delete_open
            title="사용자 삭제"
            message=delete_message
            confirm_label="삭제"
            destructive=true
            confirm_disabled=Signal::derive(move || vm.delete_action.pending().get())
            on_confirm=Callback::new(vm.handle_confirm_delete())
            on_cancel=Callback::new(vm.handle_cancel_delete())
        />
        <ConfirmDialog
            is_open=reset_open
            title="크레딧 초기화"
            message="모든 사용자의 크레딧을 초기화하시겠습니까?"
            confirm_label="초기화"
            destructive=true
            confirm_disabled=Signal::derive(move || vm.reset_action.pending().get())
            on_confirm=Callback::new(vm.handle_confirm_reset())
            on_cancel=Callback::new(vm.handle_cancel_reset())
        />
    }
}

#[component]
fn CreateUserForm() -> impl IntoView {
    let vm = use_admin_view_model();
    let (name, set_name) = create_signal(String::new());
    let (student_id, set_student_id) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<ApiError>);
    let pending = vm.create_action.pending();

    // A successful create clears the form for the next entry.
    create_effect(move |_| {
        if let Some(Ok(_)) = vm.create_action.value().get() {
            set_name.set(String::new());
            set_student_id.set(String::new());
            set_error.set(None);
        }
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        match vm.submit_new_user(name.get_untracked(), student_id.get_untracked()) {
            Ok(()) => set_error.set(None),
            Err(err) => set_error.set(Some(err)),
        }
    };

    view! {
        <div class="bg-white shadow rounded-xl p-6 space-y-4">
            <h2 class="text-lg font-semibold text-gray-900">{"사용자 추가"}</h2>
            <form class="flex flex-wrap items-end gap-3" on:submit=handle_submit>
                <div class="flex-1 min-w-[10rem]">
                    <label for="new_user_name" class="block text-sm font-medium text-gray-700">
                        {"이름"}
                    </label>
                    <input
                        id="new_user_name"
                        name="new_user_name"
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
                <div class="flex-1 min-w-[10rem]">
                    <label for="new_user_student_id" class="block text-sm font-medium text-gray-700">
                        {"학번"}
                    </label>
                    <input
                        id="new_user_student_id"
                        name="new_user_student_id"
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
                <button
                    type="submit"
                    class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-purple-600 text-white hover:bg-purple-700 disabled:opacity-50"
                    disabled=move || pending.get()
                >
                    {move || if pending.get() { "추가 중..." } else { "추가" }}
                </button>
            </form>
            <InlineErrorMessage error={error.into()} />
        </div>
    }
}

#[component]
fn UserTable() -> impl IntoView {
    let vm = use_admin_view_model();
    let request_delete = vm.handle_request_delete();
    let request_delete = store_value(request_delete);

    view! {
        <div class="bg-white shadow rounded-xl overflow-hidden">
            <table class="min-w-full divide-y divide-gray-200 text-sm">
                <thead class="bg-gray-50 text-left text-xs font-medium text-gray-500 uppercase">
                    <tr>
                        <th class="px-4 py-3">{"이름"}</th>
                        <th class="px-4 py-3">{"학번"}</th>
                        <th class="px-4 py-3">{"크레딧"}</th>
                        <th class="px-4 py-3">{"API 키"}</th>
                        <th class="px-4 py-3"></th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-100">
                    <Suspense fallback=move || {
                        view! {
                            <tr>
                                <td class="px-4 py-6 text-center text-gray-500" colspan="5">
                                    {"불러오는 중..."}
                                </td>
                            </tr>
                        }
                    }>
                        {move || {
                            let users = vm
                                .users_resource
                                .get()
                                .and_then(Result::ok)
                                .unwrap_or_default();
                            if users.is_empty() {
                                view! {
                                    <tr>
                                        <td class="px-4 py-6 text-center text-gray-500" colspan="5">
                                            {"등록된 사용자가 없습니다."}
                                        </td>
                                    </tr>
                                }
                                .into_view()
                            } else {
                                users
                                    .into_iter()
                                    .map(|user| {
                                        view! { <UserRow user=user on_delete=request_delete /> }
                                    })
                                    .collect_view()
                            }
                        }}
                    </Suspense>
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn UserRow<F>(user: UserResponse, on_delete: StoredValue<F>) -> impl IntoView
where
    F: Fn(UserResponse) + 'static,
{
    let row_user = store_value(user.clone());

    view! {
        <tr>
            <td class="px-4 py-3 font-medium text-gray-900">{user.name.clone()}</td>
            <td class="px-4 py-3 text-gray-600">{user.student_id.clone()}</td>
            <td class="px-4 py-3 text-gray-600">{user.daily_credits}</td>
            <td class="px-4 py-3 font-mono text-xs text-gray-500">
                {user.api_key.clone().unwrap_or_else(|| "-".to_string())}
            </td>
            <td class="px-4 py-3 text-right">
                <button
                    type="button"
                    class="text-sm text-red-600 hover:text-red-700"
                    on:click=move |_| {
                        on_delete.with_value(|callback| callback(row_user.get_value()))
                    }
                >
                    {"삭제"}
                </button>
            </td>
        </tr>
    }
}
