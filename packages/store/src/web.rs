//! # Browser `localStorage` key-value store
//!
//! [`WebStore`] is the [`KeyValueStore`] implementation used on the **web platform**.
//! It persists values into the browser's `localStorage` via [`web_sys`], which is
//! exactly the durability the session needs: process-wide, surviving page reloads,
//! not shared across devices.
//!
//! ## Error handling
//!
//! All trait methods silently swallow errors (returning `None` for reads, doing
//! nothing for writes). A browser with storage disabled degrades to "no stored
//! session" rather than crashing; the user simply has to log in again.

use crate::session::KeyValueStore;

/// `localStorage`-backed KeyValueStore for the web platform.
#[derive(Clone, Debug, Default)]
pub struct WebStore;

impl WebStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for WebStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        let _ = storage.set_item(key, value);
    }

    fn remove(&self, key: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        let _ = storage.remove_item(key);
    }
}
