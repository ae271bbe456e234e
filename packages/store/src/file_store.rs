//! # Filesystem-backed key/value store
//!
//! [`FileStore`] is the [`KeyValueStore`] used by native builds, where there is
//! no browser `localStorage`. Each key is a file under the base directory whose
//! content is the value:
//!
//! ```text
//! <base_dir>/
//! └── token        # the persisted credential
//! ```
//!
//! Use [`dirs::data_dir()`] to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/mdd/` |
//! | Linux | `~/.local/share/mdd/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\mdd\` |
//!
//! I/O errors are swallowed: a missing or unreadable file reads as `None`, and
//! failed writes or removals are logged. Removing a missing key is silent.

use std::path::PathBuf;

use crate::kv::KeyValueStore;

/// Filesystem-backed KeyValueStore for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        // Keys are plain identifiers; strip anything that could escape the base dir.
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base.join(name)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.entry_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            tracing::warn!("Failed to create {}: {}", self.base.display(), e);
            return;
        }
        if let Err(e) = std::fs::write(self.entry_path(key), value) {
            tracing::warn!("Failed to persist {}: {}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        let path = self.entry_path(key);
        if let Err(e) = std::fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to remove {}: {}", path.display(), e);
            }
        }
    }
}
