use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use web_sys::{Storage, Window};

/// Durable key for the bearer token (the user's API key).
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Durable flag marking an unlocked admin panel.
pub const ADMIN_SESSION_KEY: &str = "admin_auth";
/// Durable key for the admin API key sent as `X-Admin-API-Key`.
pub const ADMIN_API_KEY_KEY: &str = "admin_api_key";

pub fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "No window object".to_string())
}

pub fn local_storage() -> Result<Storage, String> {
    window()?
        .local_storage()
        .map_err(|_| "No localStorage".to_string())?
        .ok_or_else(|| "No localStorage".to_string())
}

/// Durable string-key store behind the session and admin state.
///
/// The browser implementation wraps `localStorage`; tests inject the
/// in-memory one.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn clear(&self, key: &str);
}

/// `localStorage`-backed store used in the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSessionStore;

impl SessionStore for WebSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        local_storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| format!("Failed to persist '{}'", key))
    }

    fn clear(&self, key: &str) {
        if let Ok(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory store for host-side tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Store for the current target: `localStorage` in the browser, in-memory
/// elsewhere (host-side test builds have no DOM).
pub fn default_store() -> Rc<dyn SessionStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(WebSessionStore)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Rc::new(MemorySessionStore::new())
    }
}
