use crate::api::ApiError;
use leptos::*;

/// Red inline box for errors that belong next to a form rather than in a
/// toast, e.g. a rejected login inside the login modal.
#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded my-2">
                <div class="flex items-start gap-2">
                    <i class="fas fa-exclamation-circle mt-0.5"></i>
                    <p class="text-sm">
                        {move || error.get().map(|e| e.message).unwrap_or_default()}
                    </p>
                </div>
            </div>
        </Show>
    }
}
