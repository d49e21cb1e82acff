// Task model: the nested persisted document, its flat in-memory index,
// the navigation cursor and the blob-store persistence.

mod cursor;
mod store;
mod tree;
mod types;

pub use cursor::{Crumb, ViewCursor};
pub use store::{BlobStore, MemoryStore, STORAGE_SLOT, load_tree, sample_document, save_tree};
#[cfg(target_arch = "wasm32")]
pub use store::LocalStorageStore;
pub use tree::{TaskNode, TaskTree};
pub use types::{Importance, Priority, Task, TaskDocument, TaskDraft};
