// Persistence of the task tree.
//
// The whole tree is one JSON document (`{"root": [...]}`) stored under a
// single named slot of a string key-value store. In the browser that store
// is `localStorage`; tests and native hosts use `MemoryStore`.

use std::collections::HashMap;

use super::tree::TaskTree;
use super::types::{Importance, Priority, Task, TaskDocument};
use crate::error::Result;

/// Slot name used by every version of the app.
pub const STORAGE_SLOT: &str = "taskCloudData";

pub trait BlobStore {
    fn get(&self, slot: &str) -> Result<Option<String>>;
    fn set(&mut self, slot: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.slots.get(slot).cloned())
    }

    fn set(&mut self, slot: &str, value: &str) -> Result<()> {
        self.slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }
}

/// Load the tree, or the sample tasks if nothing was saved yet.
pub fn load_tree(store: &dyn BlobStore) -> Result<TaskTree> {
    match store.get(STORAGE_SLOT)? {
        Some(json) => {
            let doc: TaskDocument = serde_json::from_str(&json)?;
            TaskTree::from_document(&doc)
        }
        None => {
            log::debug!("no saved tasks under '{}', seeding samples", STORAGE_SLOT);
            TaskTree::from_document(&sample_document())
        }
    }
}

pub fn save_tree(store: &mut dyn BlobStore, tree: &TaskTree) -> Result<()> {
    let json = serde_json::to_string(&tree.to_document())?;
    store.set(STORAGE_SLOT, &json)
}

/// Sixteen tasks covering every (importance, urgency) pair.
pub fn sample_document() -> TaskDocument {
    const IMPACT: [&str; 4] = ["Life-Changing Impact", "Significant Impact", "Noticeable Impact", "No Impact"];
    const WHEN: [&str; 4] = ["Today", "in 7 days", "in 21 days", "1 month"];

    let mut root = Vec::with_capacity(16);
    for (impact, importance) in IMPACT.into_iter().zip(Importance::descending()) {
        for (when, priority) in WHEN.into_iter().zip(Priority::descending()) {
            root.push(Task::new(
                format!("task{}", root.len() + 1),
                format!("{impact}, {when}"),
                priority,
                importance,
            ));
        }
    }
    TaskDocument { root }
}

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::BlobStore;
    use crate::error::{Error, Result};

    /// `window.localStorage`.
    pub struct LocalStorageStore {
        storage: web_sys::Storage,
    }

    impl LocalStorageStore {
        pub fn new() -> Result<Self> {
            let window = web_sys::window().ok_or_else(|| Error::Storage("no window".to_string()))?;
            let storage = window
                .local_storage()
                .map_err(|e| Error::Storage(format!("{e:?}")))?
                .ok_or_else(|| Error::Storage("localStorage unavailable".to_string()))?;
            Ok(Self { storage })
        }
    }

    impl BlobStore for LocalStorageStore {
        fn get(&self, slot: &str) -> Result<Option<String>> {
            self.storage.get_item(slot).map_err(|e| Error::Storage(format!("{e:?}")))
        }

        fn set(&mut self, slot: &str, value: &str) -> Result<()> {
            self.storage.set_item(slot, value).map_err(|e| Error::Storage(format!("{e:?}")))
        }
    }
}
