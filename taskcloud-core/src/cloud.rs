//! The task cloud as one object: tree, cursor, storage and measurer.
//!
//! Every mutation is saved immediately and the cursor is re-resolved against
//! the new tree. Layout is recomputed from scratch by `view`, which the host
//! calls after any change or resize.

use serde::Serialize;

use crate::error::Result;
use crate::layout::{Container, LayoutConfig, LayoutWarning, TextMeasurer, layout_tasks};
use crate::task::{BlobStore, Crumb, TaskDocument, TaskDraft, TaskTree, ViewCursor, load_tree, save_tree};

/// A visible task with everything the renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedTask {
    pub id: String,
    pub title: String,
    pub urgency: u8,
    pub importance: u8,
    pub has_children: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudView {
    pub breadcrumbs: Vec<Crumb>,
    pub tasks: Vec<PlacedTask>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<LayoutWarning>,
}

pub struct TaskCloud<S: BlobStore, M: TextMeasurer> {
    tree: TaskTree,
    cursor: ViewCursor,
    store: S,
    measurer: M,
    cfg: LayoutConfig,
}

impl<S: BlobStore, M: TextMeasurer> TaskCloud<S, M> {
    pub fn open(store: S, measurer: M, cfg: LayoutConfig) -> Result<Self> {
        cfg.validate()?;
        let tree = load_tree(&store)?;
        Ok(Self { tree, cursor: ViewCursor::root(), store, measurer, cfg })
    }

    pub fn tree(&self) -> &TaskTree {
        &self.tree
    }

    pub fn cursor(&self) -> &ViewCursor {
        &self.cursor
    }

    /// Lay out the current tier for a container of the given size.
    pub fn view(&self, width: f64, height: f64) -> Result<CloudView> {
        let visible = self.cursor.visible(&self.tree)?;
        let result = layout_tasks(&visible, Container::new(width, height), &self.measurer, &self.cfg)?;
        let tasks = visible
            .iter()
            .zip(result.placements)
            .map(|(node, p)| PlacedTask {
                id: node.id.clone(),
                title: node.title.clone(),
                urgency: node.priority.get(),
                importance: node.importance.get(),
                has_children: node.has_children(),
                x: p.x,
                y: p.y,
                width: p.width,
                height: p.height,
            })
            .collect();
        Ok(CloudView { breadcrumbs: self.cursor.trail().to_vec(), tasks, warnings: result.warnings })
    }

    pub fn enter(&mut self, id: &str) -> Result<()> {
        self.cursor = self.cursor.enter(&self.tree, id)?;
        Ok(())
    }

    pub fn back_to(&mut self, level: usize) -> Result<()> {
        self.cursor = self.cursor.back_to(level)?;
        Ok(())
    }

    /// New task in the tier currently on screen.
    pub fn create(&mut self, draft: &TaskDraft) -> Result<String> {
        let parent = self.cursor.parent_id().map(str::to_string);
        self.mutate(|tree| tree.create(parent.as_deref(), draft))
    }

    pub fn update(&mut self, id: &str, draft: &TaskDraft) -> Result<()> {
        self.mutate(|tree| tree.update(id, draft))
    }

    pub fn delete(&mut self, id: &str) -> Result<usize> {
        self.mutate(|tree| tree.delete(id))
    }

    pub fn move_task(&mut self, id: &str, new_parent: Option<&str>) -> Result<()> {
        self.mutate(|tree| tree.move_to(id, new_parent))
    }

    pub fn document(&self) -> TaskDocument {
        self.tree.to_document()
    }

    /// Apply `edit` to a copy of the tree and adopt it only once it is saved.
    /// On any failure the tree and cursor stay as they were.
    fn mutate<T>(&mut self, edit: impl FnOnce(&mut TaskTree) -> Result<T>) -> Result<T> {
        let mut next = self.tree.clone();
        let out = edit(&mut next)?;
        save_tree(&mut self.store, &next)?;
        self.tree = next;
        self.cursor = self.cursor.refresh(&self.tree);
        Ok(out)
    }
}
