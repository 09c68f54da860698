use leptos::*;
use leptos_router::*;

mod api;
mod components;
pub mod config;
mod pages;
mod state;
#[cfg(test)]
mod test_support;
pub mod utils;

use components::toast::ToastHost;
use pages::admin::AdminPage;
use pages::dashboard::DashboardPage;
use state::auth::AuthProvider;
use state::toast::ToastProvider;

#[component]
fn App() -> impl IntoView {
    provide_context(api::ApiClient::new());

    view! {
        <ToastProvider>
            <AuthProvider>
                <Router>
                    <Routes>
                        <Route path="/" view=DashboardPage/>
                        <Route path="/admin" view=AdminPage/>
                    </Routes>
                </Router>
                <ToastHost/>
            </AuthProvider>
        </ToastProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("starting tino-notes frontend");

    // Runtime config comes from ./config.json; window.__TINO_ENV (env.js)
    // takes precedence when present. Loading is non-blocking.
    leptos::spawn_local(async move {
        config::init().await;
        log::debug!("runtime config initialized");
    });

    mount_to_body(|| view! { <App/> });
}
