//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is a [`KeyValueStore`] implementation that persists each value
//! to its own file on the local filesystem. It is used on desktop platforms to
//! retain the session across app restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── memopad_access_token       # one file per key, raw string value
//! ├── memopad_token_expires_at
//! └── ...
//! ```
//!
//! ## Platform data directories
//!
//! Callers pick a platform-appropriate base directory, typically:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/memopad/` |
//! | Linux | `~/.local/share/memopad/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\memopad\` |

use std::path::PathBuf;

use crate::session::KeyValueStore;

/// Filesystem-backed KeyValueStore for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.value_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        let path = self.value_path(key);
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = std::fs::write(path, value);
    }

    fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.value_path(key));
    }
}
