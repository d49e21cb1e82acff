//! Task cloud layout engine and task model.
//!
//! Tasks are rated by urgency and importance and drawn as a word cloud: the
//! most urgent sit near the centre, less urgent ones on rings further out, and
//! font size grows with urgency. `layout` places one tier of tasks inside a
//! container; `task` holds the nested task tree, navigation and persistence.
//! On `wasm32` the `TaskCloud` class and `layout_tasks` are exported to JS.

mod cloud;
mod error;
pub mod layout;
mod output;
pub mod task;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use cloud::{CloudView, PlacedTask, TaskCloud};
pub use error::{Error, Result};
pub use layout::{Container, LayoutConfig, LayoutResult, LayoutWarning, Placement, TextMeasurer, layout_tasks};
pub use output::{ErrorInfo, LayoutOutput, ViewOutput, to_json};
