use leptos::*;

use crate::state::toast::{dismiss_toast, use_toasts, Toast, ToastLevel};

fn toast_classes(level: ToastLevel) -> (&'static str, &'static str) {
    match level {
        ToastLevel::Success => (
            "bg-green-50 border border-green-200 text-green-800 rounded-lg shadow px-4 py-3",
            "fas fa-check-circle mt-0.5",
        ),
        ToastLevel::Error => (
            "bg-red-50 border border-red-200 text-red-800 rounded-lg shadow px-4 py-3",
            "fas fa-exclamation-circle mt-0.5",
        ),
    }
}

/// Fixed stack in the top-right corner showing the toast queue. Each card
/// carries its own close button; the queue itself handles auto-dismiss.
#[component]
pub fn ToastHost() -> impl IntoView {
    let (toasts, set_toasts) = use_toasts();

    view! {
        <div class="fixed top-4 right-4 z-[90] flex flex-col gap-2 w-80">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    let (card_class, icon_class) = toast_classes(toast.level);
                    let body = (!toast.body.is_empty())
                        .then(|| view! { <p class="text-sm mt-0.5">{toast.body.clone()}</p> });
                    view! {
                        <div class=card_class>
                            <div class="flex items-start gap-2">
                                <i class=icon_class></i>
                                <div class="flex-1">
                                    <p class="font-semibold text-sm">{toast.title.clone()}</p>
                                    {body}
                                </div>
                                <button
                                    type="button"
                                    aria-label="닫기"
                                    class="opacity-60 hover:opacity-100"
                                    on:click=move |_| dismiss_toast(set_toasts, id)
                                >
                                    {"✕"}
                                </button>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_classes_distinguish_levels() {
        let (success_card, success_icon) = toast_classes(ToastLevel::Success);
        let (error_card, error_icon) = toast_classes(ToastLevel::Error);
        assert!(success_card.contains("green"));
        assert!(success_icon.contains("check"));
        assert!(error_card.contains("red"));
        assert!(error_icon.contains("exclamation"));
    }
}
