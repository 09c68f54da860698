use leptos::*;

use crate::state::auth::use_auth;

/// App chrome: title on the left, session affordances on the right. The
/// login and profile buttons open modals owned by the page, so they arrive
/// as callbacks.
#[component]
pub fn Header(
    #[prop(optional_no_strip)] on_login: Option<Callback<()>>,
    #[prop(optional_no_strip)] on_profile: Option<Callback<()>>,
) -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let authenticated = move || auth.get().is_authenticated;
    let credit_label = move || {
        auth.get()
            .daily_credits()
            .map(|credits| format!("크레딧 {}", credits))
            .unwrap_or_default()
    };

    view! {
        <header class="bg-white shadow-sm border-b border-gray-200">
            <div class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center gap-2">
                        <i class="fas fa-graduation-cap text-purple-600 text-2xl"></i>
                        <h1 class="text-xl font-bold text-gray-900">"Tino"</h1>
                    </div>
                    <div class="flex items-center gap-3">
                        <Show
                            when=authenticated
                            fallback=move || {
                                view! {
                                    <button
                                        type="button"
                                        class="px-4 py-2 rounded-lg bg-purple-600 text-white text-sm font-medium hover:bg-purple-700"
                                        on:click=move |_| {
                                            if let Some(callback) = on_login {
                                                callback.call(());
                                            }
                                        }
                                    >
                                        "로그인"
                                    </button>
                                }
                            }
                        >
                            <span class="inline-flex items-center gap-1 px-3 py-1 rounded-full bg-purple-100 text-purple-700 text-sm font-medium">
                                <i class="fas fa-coins"></i>
                                {credit_label}
                            </span>
                            <button
                                type="button"
                                aria-label="프로필"
                                class="p-2 rounded-full text-gray-500 hover:text-gray-700 hover:bg-gray-100"
                                on:click=move |_| {
                                    if let Some(callback) = on_profile {
                                        callback.call(());
                                    }
                                }
                            >
                                <i class="fas fa-user-circle text-xl"></i>
                            </button>
                        </Show>
                    </div>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(
    #[prop(into, optional)] on_login: Option<Callback<()>>,
    #[prop(into, optional)] on_profile: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-50">
            <Header on_login=on_login on_profile=on_profile/>
            <main class="max-w-5xl mx-auto py-6 px-4 sm:px-6 lg:px-8">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-purple-600"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-exclamation-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn SuccessMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-green-50 border border-green-200 text-green-700 px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-check-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{provide_auth, student_with_credits};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn header_shows_credits_and_profile_when_authenticated() {
        let html = render_to_string(move || {
            provide_auth(Some(student_with_credits(7)));
            view! { <Header /> }
        });
        assert!(html.contains("크레딧 7"));
        assert!(html.contains("프로필"));
        assert!(!html.contains("로그인"));
    }

    #[test]
    fn header_shows_login_button_when_logged_out() {
        let html = render_to_string(move || {
            provide_auth(None);
            view! { <Header /> }
        });
        assert!(html.contains("로그인"));
        assert!(!html.contains("크레딧"));
    }

    #[test]
    fn layout_renders_children_under_the_header() {
        let html = render_to_string(move || {
            provide_auth(None);
            view! { <Layout><div>"child"</div></Layout> }
        });
        assert!(html.contains("Tino"));
        assert!(html.contains("child"));
    }

    #[test]
    fn renders_feedback_components() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <LoadingSpinner />
                    <ErrorMessage message="오류".into() />
                    <SuccessMessage message="완료".into() />
                </div>
            }
        });
        assert!(html.contains("animate-spin"));
        assert!(html.contains("오류"));
        assert!(html.contains("완료"));
    }
}
