//! `localStorage`-backed preference storage.

use web_sys::{Storage, Window};

use crate::consent::{ConsentError, PreferenceStorage};

/// Browser `localStorage`. When storage is unavailable (privacy mode, sandboxed
/// iframe) reads see nothing and writes fail with [`ConsentError::Storage`].
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn from_window(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                log::warn!("localStorage unavailable: {err:?}");
                None
            }
        };
        Self { storage }
    }
}

impl PreferenceStorage for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, ConsentError> {
        let Some(storage) = &self.storage else {
            return Ok(None);
        };
        storage.get_item(key).map_err(|err| ConsentError::Storage(format!("{err:?}")))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), ConsentError> {
        let Some(storage) = &self.storage else {
            return Err(ConsentError::Storage("localStorage unavailable".to_owned()));
        };
        storage.set_item(key, value).map_err(|err| ConsentError::Storage(format!("{err:?}")))
    }
}
