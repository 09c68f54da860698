use leptos::*;

/// Runs a test body inside a disposable reactive runtime. Resource loading
/// is suppressed so signal updates never spawn fetch tasks on the host.
pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    leptos_reactive::suppress_resource_load(true);
    let runtime = leptos::create_runtime();
    let result = f();
    runtime.dispose();
    leptos_reactive::suppress_resource_load(false);
    result
}

/// Renders a component tree to HTML on the host. Resource loading is
/// suppressed so pages render their synchronous shell without hitting the
/// network; tests assert on the markup.
pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    leptos_reactive::suppress_resource_load(true);
    let html = with_runtime(|| view().into_view().render_to_string().to_string());
    leptos_reactive::suppress_resource_load(false);
    html
}
