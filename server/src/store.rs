//! In-memory todo collection.
//!
//! # Design
//! `TodoStore` performs no validation: callers hand it fully-formed records
//! and it reports outcomes through `Option`, `bool` and counts, never errors.
//! Records are kept in a `Vec` so iteration follows insertion order. The
//! server shares one instance as [`SharedStore`]; every store call runs
//! under a single lock acquisition.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::model::{Category, Todo, TodoPatch};

pub type SharedStore = Arc<RwLock<TodoStore>>;

#[derive(Debug, Default)]
pub struct TodoStore {
    todos: Vec<Todo>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// All records, or only those in `category`, in insertion order.
    pub fn list(&self, category: Option<Category>) -> Vec<Todo> {
        self.todos
            .iter()
            .filter(|t| category.map_or(true, |c| t.category == c))
            .cloned()
            .collect()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Todo> {
        self.todos.iter().find(|t| t.id == id).cloned()
    }

    /// Appends `todo` as given. Id uniqueness is the caller's concern.
    pub fn add(&mut self, todo: Todo) -> Todo {
        self.todos.push(todo.clone());
        todo
    }

    pub fn update(&mut self, id: &str, patch: TodoPatch) -> Option<Todo> {
        let todo = self.todos.iter_mut().find(|t| t.id == id)?;
        patch.apply(todo);
        Some(todo.clone())
    }

    /// Inverts `completed` on the matching record.
    pub fn toggle(&mut self, id: &str) -> Option<Todo> {
        let completed = self.get_by_id(id)?.completed;
        self.update(id, TodoPatch::completed(!completed))
    }

    pub fn remove(&mut self, id: &str) -> bool {
        match self.todos.iter().position(|t| t.id == id) {
            Some(index) => {
                self.todos.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drops every completed record in `category`, returning how many went.
    pub fn remove_completed(&mut self, category: Category) -> usize {
        let before = self.todos.len();
        self.todos.retain(|t| !(t.completed && t.category == category));
        before - self.todos.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: &str, completed: bool, category: Category) -> Todo {
        Todo {
            id: id.to_string(),
            text: format!("task {id}"),
            completed,
            category,
        }
    }

    fn seeded() -> TodoStore {
        let mut store = TodoStore::new();
        store.add(todo("1", true, Category::Personal));
        store.add(todo("2", false, Category::Personal));
        store.add(todo("3", true, Category::Professional));
        store.add(todo("4", true, Category::Personal));
        store.add(todo("5", false, Category::Professional));
        store
    }

    fn ids(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = seeded();
        assert_eq!(ids(&store.list(None)), ["1", "2", "3", "4", "5"]);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn list_filters_by_category() {
        let store = seeded();
        let all = store.list(None);
        for category in Category::ALL {
            let filtered = store.list(Some(category));
            assert!(filtered.iter().all(|t| t.category == category));
            assert!(filtered.iter().all(|t| all.contains(t)));
            assert_eq!(
                filtered.len(),
                all.iter().filter(|t| t.category == category).count()
            );
        }
        assert_eq!(ids(&store.list(Some(Category::Personal))), ["1", "2", "4"]);
    }

    #[test]
    fn list_on_empty_store_is_empty() {
        let store = TodoStore::new();
        assert!(store.is_empty());
        assert!(store.list(None).is_empty());
        assert!(store.list(Some(Category::Professional)).is_empty());
    }

    #[test]
    fn add_returns_record_unchanged_and_accepts_duplicate_ids() {
        let mut store = TodoStore::new();
        let first = todo("dup", false, Category::Personal);
        assert_eq!(store.add(first.clone()), first);
        store.add(todo("dup", true, Category::Professional));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_by_id("dup"), Some(first));
    }

    #[test]
    fn update_overwrites_only_given_fields() {
        let mut store = seeded();
        let before = store.get_by_id("2").unwrap();

        let updated = store.update("2", TodoPatch::completed(true)).unwrap();
        assert!(updated.completed);
        assert_eq!(updated.text, before.text);
        assert_eq!(updated.category, before.category);
        assert_eq!(store.get_by_id("2"), Some(updated));
    }

    #[test]
    fn update_missing_id_is_absent_and_does_not_mutate() {
        let mut store = seeded();
        let before = store.list(None);
        assert!(store.update("999", TodoPatch::completed(true)).is_none());
        assert_eq!(store.list(None), before);
    }

    #[test]
    fn toggle_twice_restores_original() {
        let mut store = seeded();
        let original = store.get_by_id("3").unwrap();
        let once = store.toggle("3").unwrap();
        assert_eq!(once.completed, !original.completed);
        let twice = store.toggle("3").unwrap();
        assert_eq!(twice, original);
        assert!(store.toggle("999").is_none());
    }

    #[test]
    fn remove_reports_whether_anything_was_deleted() {
        let mut store = seeded();
        assert!(store.remove("3"));
        assert!(!store.remove("3"));
        assert_eq!(ids(&store.list(None)), ["1", "2", "4", "5"]);
    }

    #[test]
    fn remove_completed_only_hits_completed_in_category() {
        let mut store = seeded();
        assert_eq!(store.remove_completed(Category::Personal), 2);
        assert_eq!(ids(&store.list(None)), ["2", "3", "5"]);

        assert_eq!(store.remove_completed(Category::Personal), 0);
        assert_eq!(store.remove_completed(Category::Professional), 1);
        assert_eq!(ids(&store.list(None)), ["2", "5"]);
    }
}
