//! Navigation state as a value.
//!
//! A `ViewCursor` names the task whose children are on screen and the
//! breadcrumb trail leading to it. Navigation returns a new cursor instead of
//! mutating shared state, so the layout call only ever sees `(items, size)`.

use serde::{Deserialize, Serialize};

use super::tree::{TaskNode, TaskTree};
use crate::error::{Error, Result};

/// One breadcrumb entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCursor {
    trail: Vec<Crumb>,
}

impl ViewCursor {
    /// The top level.
    pub fn root() -> Self {
        Self::default()
    }

    /// Task whose children are visible; None at the top level.
    pub fn parent_id(&self) -> Option<&str> {
        self.trail.last().map(|c| c.id.as_str())
    }

    /// Breadcrumbs below the top level, outermost first.
    pub fn trail(&self) -> &[Crumb] {
        &self.trail
    }

    /// 0 at the top level.
    pub fn depth(&self) -> usize {
        self.trail.len()
    }

    /// Open a task's subtasks. Tasks without children cannot be opened.
    pub fn enter(&self, tree: &TaskTree, id: &str) -> Result<ViewCursor> {
        let path = tree.path(id)?;
        if !path[path.len() - 1].has_children() {
            return Err(Error::NoChildren(id.to_string()));
        }
        Ok(ViewCursor { trail: path.into_iter().map(crumb).collect() })
    }

    /// Jump back to breadcrumb `level` (0 = top level).
    pub fn back_to(&self, level: usize) -> Result<ViewCursor> {
        if level > self.trail.len() {
            return Err(Error::LevelOutOfRange { level, depth: self.trail.len() });
        }
        Ok(ViewCursor { trail: self.trail[..level].to_vec() })
    }

    /// The tier to lay out.
    pub fn visible<'t>(&self, tree: &'t TaskTree) -> Result<Vec<&'t TaskNode>> {
        tree.children(self.parent_id())
    }

    /// Re-resolve against a mutated tree: keeps the deepest crumb that still exists
    /// and picks up renamed titles and moved ancestors.
    pub fn refresh(&self, tree: &TaskTree) -> ViewCursor {
        let anchor = self.trail.iter().rev().find(|c| tree.contains(&c.id));
        match anchor.and_then(|c| tree.path(&c.id).ok()) {
            Some(path) => ViewCursor { trail: path.into_iter().map(crumb).collect() },
            None => ViewCursor::root(),
        }
    }
}

fn crumb(node: &TaskNode) -> Crumb {
    Crumb { id: node.id.clone(), title: node.title.clone() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Importance, Priority, TaskDraft};

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            priority: Priority::new(3).unwrap(),
            importance: Importance::new(3).unwrap(),
            description: String::new(),
        }
    }

    fn tree() -> TaskTree {
        let mut t = TaskTree::new();
        t.insert(None, "home", &draft("Home chores")).unwrap();
        t.insert(None, "work", &draft("Work")).unwrap();
        t.insert(Some("home"), "kitchen", &draft("Kitchen")).unwrap();
        t.insert(Some("kitchen"), "dishes", &draft("Dishes")).unwrap();
        t
    }

    #[test]
    fn test_enter_and_back() {
        let t = tree();
        let top = ViewCursor::root();
        assert_eq!(top.visible(&t).unwrap().len(), 2);

        let home = top.enter(&t, "home").unwrap();
        assert_eq!(home.parent_id(), Some("home"));
        let kitchen = home.enter(&t, "kitchen").unwrap();
        assert_eq!(kitchen.depth(), 2);
        assert_eq!(kitchen.trail()[1].title, "Kitchen");
        assert_eq!(kitchen.visible(&t).unwrap()[0].id, "dishes");

        let back = kitchen.back_to(1).unwrap();
        assert_eq!(back, home);
        assert_eq!(kitchen.back_to(0).unwrap(), top);
        assert!(matches!(kitchen.back_to(3), Err(Error::LevelOutOfRange { level: 3, depth: 2 })));
    }

    #[test]
    fn test_enter_leaf_is_refused() {
        let t = tree();
        assert!(matches!(ViewCursor::root().enter(&t, "work"), Err(Error::NoChildren(_))));
    }

    #[test]
    fn test_refresh_after_delete_and_rename() {
        let mut t = tree();
        let cursor = ViewCursor::root().enter(&t, "home").unwrap().enter(&t, "kitchen").unwrap();

        t.update("home", &draft("House")).unwrap();
        assert_eq!(cursor.refresh(&t).trail()[0].title, "House");

        t.delete("kitchen").unwrap();
        let refreshed = cursor.refresh(&t);
        assert_eq!(refreshed.parent_id(), Some("home"));

        t.delete("home").unwrap();
        assert_eq!(cursor.refresh(&t), ViewCursor::root());
    }
}
