//! WASM bindings for taskcloud-core.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! Layout results are JSON strings; mutations reject with a JSON error string.

use wasm_bindgen::prelude::*;

use crate::cloud::TaskCloud;
use crate::error::{Error, Result};
use crate::layout::{CanvasMeasurer, Container, LayoutConfig, LayoutResult, layout_tasks};
use crate::output::{ErrorInfo, LayoutOutput, ViewOutput, to_json};
use crate::task::{LocalStorageStore, Task, TaskDraft};

#[wasm_bindgen(start)]
pub fn start() {
    wasm_logger::init(wasm_logger::Config::default());
}

/// Empty string means "all defaults".
fn parse_config(config_json: &str) -> Result<LayoutConfig> {
    if config_json.trim().is_empty() {
        return Ok(LayoutConfig::default());
    }
    Ok(serde_json::from_str(config_json)?)
}

fn to_js(e: Error) -> JsValue {
    log::error!("{e}");
    JsValue::from_str(&to_json(&ErrorInfo::from(&e)))
}

/// Stateless layout of one tier: `items_json` is an array of tasks.
#[wasm_bindgen(js_name = layout_tasks)]
pub fn layout_tasks_json(items_json: &str, width: f64, height: f64, config_json: &str) -> String {
    let result = (|| -> Result<LayoutResult> {
        let cfg = parse_config(config_json)?;
        let items: Vec<Task> = serde_json::from_str(items_json)?;
        let measurer = CanvasMeasurer::new()?;
        layout_tasks(&items, Container::new(width, height), &measurer, &cfg)
    })();
    if let Err(e) = &result {
        log::error!("layout failed: {e}");
    }
    to_json(&LayoutOutput::from(result))
}

/// The task cloud backed by `localStorage` and canvas measurement.
#[wasm_bindgen(js_name = TaskCloud)]
pub struct WasmTaskCloud {
    inner: TaskCloud<LocalStorageStore, CanvasMeasurer>,
}

#[wasm_bindgen(js_class = TaskCloud)]
impl WasmTaskCloud {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> std::result::Result<WasmTaskCloud, JsValue> {
        let open = || -> Result<TaskCloud<LocalStorageStore, CanvasMeasurer>> {
            let cfg = parse_config(config_json)?;
            TaskCloud::open(LocalStorageStore::new()?, CanvasMeasurer::new()?, cfg)
        };
        open().map(|inner| WasmTaskCloud { inner }).map_err(to_js)
    }

    /// Current tier laid out in a `width` x `height` container.
    pub fn layout(&self, width: f64, height: f64) -> String {
        to_json(&ViewOutput::from(self.inner.view(width, height)))
    }

    pub fn enter(&mut self, id: &str) -> std::result::Result<(), JsValue> {
        self.inner.enter(id).map_err(to_js)
    }

    pub fn back_to(&mut self, level: usize) -> std::result::Result<(), JsValue> {
        self.inner.back_to(level).map_err(to_js)
    }

    pub fn breadcrumbs(&self) -> String {
        to_json(&self.inner.cursor().trail())
    }

    /// Adds a task to the visible tier, returns its id.
    pub fn create_task(&mut self, draft_json: &str) -> std::result::Result<String, JsValue> {
        let draft: TaskDraft = serde_json::from_str(draft_json).map_err(|e| to_js(e.into()))?;
        self.inner.create(&draft).map_err(to_js)
    }

    pub fn update_task(&mut self, id: &str, draft_json: &str) -> std::result::Result<(), JsValue> {
        let draft: TaskDraft = serde_json::from_str(draft_json).map_err(|e| to_js(e.into()))?;
        self.inner.update(id, &draft).map_err(to_js)
    }

    /// Removes the task and its subtree, returns how many tasks were removed.
    pub fn delete_task(&mut self, id: &str) -> std::result::Result<usize, JsValue> {
        self.inner.delete(id).map_err(to_js)
    }

    /// `parent` of `undefined`/`null` moves the task to the top level.
    pub fn move_task(&mut self, id: &str, parent: Option<String>) -> std::result::Result<(), JsValue> {
        self.inner.move_task(id, parent.as_deref()).map_err(to_js)
    }

    pub fn export_document(&self) -> String {
        to_json(&self.inner.document())
    }
}
