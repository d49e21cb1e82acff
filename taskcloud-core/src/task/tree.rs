// Indexed task tree.
//
// The persisted document nests children inline. Here it is flattened into a
// map keyed by task id, with each node holding its parent id as a
// back-reference and its children as an ordered id list. Lookups by id are
// O(1) regardless of depth; ordering of siblings is the document order.
//
// Invariants:
// - ids are unique across the whole tree, not just among siblings
// - every id in a `children` list (or in `root`) is a key of `nodes`
// - `node.parent` names the node whose `children` contains it (None => root)

use std::collections::HashMap;

use super::types::{Importance, Priority, Task, TaskDocument, TaskDraft};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct TaskNode {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub importance: Importance,
    pub description: String,
    pub parent: Option<String>,
    pub children: Vec<String>,
}

impl TaskNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskTree {
    nodes: HashMap<String, TaskNode>,
    root: Vec<String>,
}

impl TaskTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a nested document. Fails on the first id seen twice.
    pub fn from_document(doc: &TaskDocument) -> Result<Self> {
        let mut tree = TaskTree::new();
        for task in &doc.root {
            tree.root.push(task.id.clone());
            tree.index_task(task, None)?;
        }
        Ok(tree)
    }

    fn index_task(&mut self, task: &Task, parent: Option<&str>) -> Result<()> {
        if self.nodes.contains_key(&task.id) {
            return Err(Error::DuplicateTaskId(task.id.clone()));
        }
        self.nodes.insert(
            task.id.clone(),
            TaskNode {
                id: task.id.clone(),
                title: task.title.clone(),
                priority: task.priority,
                importance: task.importance,
                description: task.description.clone(),
                parent: parent.map(str::to_string),
                children: task.children.iter().map(|c| c.id.clone()).collect(),
            },
        );
        for child in &task.children {
            self.index_task(child, Some(&task.id))?;
        }
        Ok(())
    }

    /// Rebuild the nested document, preserving sibling order.
    pub fn to_document(&self) -> TaskDocument {
        TaskDocument {
            root: self.root.iter().filter_map(|id| self.build_task(id)).collect(),
        }
    }

    fn build_task(&self, id: &str) -> Option<Task> {
        let node = self.nodes.get(id)?;
        Some(Task {
            id: node.id.clone(),
            title: node.title.clone(),
            priority: node.priority,
            importance: node.importance,
            description: node.description.clone(),
            children: node.children.iter().filter_map(|c| self.build_task(c)).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&TaskNode> {
        self.nodes.get(id)
    }

    fn node(&self, id: &str) -> Result<&TaskNode> {
        self.nodes.get(id).ok_or_else(|| Error::TaskNotFound(id.to_string()))
    }

    /// The visible tier under `parent` (None => top level), in sibling order.
    pub fn children(&self, parent: Option<&str>) -> Result<Vec<&TaskNode>> {
        let ids = match parent {
            None => &self.root,
            Some(pid) => &self.node(pid)?.children,
        };
        Ok(ids.iter().filter_map(|id| self.nodes.get(id)).collect())
    }

    /// Nodes from the top level down to `id`, inclusive.
    pub fn path(&self, id: &str) -> Result<Vec<&TaskNode>> {
        let mut current = self.node(id)?;
        let mut out = vec![current];
        while let Some(pid) = current.parent.as_deref() {
            current = self.node(pid)?;
            out.push(current);
        }
        out.reverse();
        Ok(out)
    }

    fn siblings_mut(&mut self, parent: Option<&str>) -> Result<&mut Vec<String>> {
        match parent {
            None => Ok(&mut self.root),
            Some(pid) => self
                .nodes
                .get_mut(pid)
                .map(|n| &mut n.children)
                .ok_or_else(|| Error::TaskNotFound(pid.to_string())),
        }
    }

    /// Create a task at the end of `parent`'s children and return its new id.
    pub fn create(&mut self, parent: Option<&str>, draft: &TaskDraft) -> Result<String> {
        let mut id = new_task_id();
        while self.nodes.contains_key(&id) {
            id = new_task_id();
        }
        self.insert(parent, &id, draft)?;
        Ok(id)
    }

    /// Create a task with a caller-chosen id.
    pub fn insert(&mut self, parent: Option<&str>, id: &str, draft: &TaskDraft) -> Result<()> {
        let draft = draft.normalized()?;
        if self.nodes.contains_key(id) {
            return Err(Error::DuplicateTaskId(id.to_string()));
        }
        self.siblings_mut(parent)?.push(id.to_string());
        self.nodes.insert(
            id.to_string(),
            TaskNode {
                id: id.to_string(),
                title: draft.title,
                priority: draft.priority,
                importance: draft.importance,
                description: draft.description,
                parent: parent.map(str::to_string),
                children: Vec::new(),
            },
        );
        Ok(())
    }

    /// Overwrite the editable fields of a task. Position in the tree is untouched.
    pub fn update(&mut self, id: &str, draft: &TaskDraft) -> Result<()> {
        let draft = draft.normalized()?;
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        node.title = draft.title;
        node.priority = draft.priority;
        node.importance = draft.importance;
        node.description = draft.description;
        Ok(())
    }

    /// Delete a task together with its whole subtree. Returns how many nodes went.
    pub fn delete(&mut self, id: &str) -> Result<usize> {
        let parent = self.node(id)?.parent.clone();
        self.siblings_mut(parent.as_deref())?.retain(|c| c != id);

        let mut stack = vec![id.to_string()];
        let mut removed = 0;
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                removed += 1;
                stack.extend(node.children);
            }
        }
        Ok(removed)
    }

    /// Reparent a task (and its subtree) to the end of `new_parent`'s children.
    pub fn move_to(&mut self, id: &str, new_parent: Option<&str>) -> Result<()> {
        let old_parent = self.node(id)?.parent.clone();

        if let Some(target) = new_parent {
            // Walk up from the target; meeting `id` means the target is inside its subtree.
            let mut cursor = Some(self.node(target)?);
            while let Some(n) = cursor {
                if n.id == id {
                    return Err(Error::CycleDetected {
                        task: id.to_string(),
                        parent: target.to_string(),
                    });
                }
                cursor = n.parent.as_deref().and_then(|p| self.nodes.get(p));
            }
        }

        self.siblings_mut(old_parent.as_deref())?.retain(|c| c != id);
        self.siblings_mut(new_parent)?.push(id.to_string());
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = new_parent.map(str::to_string);
        }
        Ok(())
    }
}

fn new_task_id() -> String {
    format!("task_{}", uuid::Uuid::new_v4().simple())
}
