use leptos::*;
use uuid::Uuid;

#[cfg(target_arch = "wasm32")]
use gloo_timers::callback::Timeout;

type ToastContext = (ReadSignal<Vec<Toast>>, WriteSignal<Vec<Toast>>);

/// Toasts disappear on their own after this many milliseconds.
pub const TOAST_DISMISS_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub level: ToastLevel,
    pub title: String,
    pub body: String,
}

#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    provide_context::<ToastContext>(create_signal(Vec::new()));
    view! { <>{children()}</> }
}

pub fn use_toasts() -> ToastContext {
    use_context::<ToastContext>().unwrap_or_else(|| create_signal(Vec::new()))
}

pub fn toast_success(
    set_toasts: WriteSignal<Vec<Toast>>,
    title: impl Into<String>,
    body: impl Into<String>,
) -> Uuid {
    push_toast(set_toasts, ToastLevel::Success, title, body)
}

pub fn toast_error(
    set_toasts: WriteSignal<Vec<Toast>>,
    title: impl Into<String>,
    body: impl Into<String>,
) -> Uuid {
    push_toast(set_toasts, ToastLevel::Error, title, body)
}

fn push_toast(
    set_toasts: WriteSignal<Vec<Toast>>,
    level: ToastLevel,
    title: impl Into<String>,
    body: impl Into<String>,
) -> Uuid {
    let toast = Toast {
        id: Uuid::new_v4(),
        level,
        title: title.into(),
        body: body.into(),
    };
    let id = toast.id;
    set_toasts.update(|toasts| toasts.push(toast));
    schedule_dismiss(set_toasts, id);
    id
}

/// Removes one toast by id; unknown ids are ignored, so the auto-dismiss
/// timer and the close button cannot race each other into trouble.
pub fn dismiss_toast(set_toasts: WriteSignal<Vec<Toast>>, id: Uuid) {
    set_toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
}

#[cfg(target_arch = "wasm32")]
fn schedule_dismiss(set_toasts: WriteSignal<Vec<Toast>>, id: Uuid) {
    Timeout::new(TOAST_DISMISS_MS, move || dismiss_toast(set_toasts, id)).forget();
}

// Host builds have no event loop to run the timer on; tests dismiss by hand.
#[cfg(not(target_arch = "wasm32"))]
fn schedule_dismiss(_set_toasts: WriteSignal<Vec<Toast>>, _id: Uuid) {}
