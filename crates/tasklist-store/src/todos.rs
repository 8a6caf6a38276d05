use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::database::Database;
use crate::error::StoreError;

/// A single task record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub text: String,
    pub completed: bool,
}

/// Repository over the `todos` table.
///
/// Every mutation re-reads and returns the complete table so callers always
/// see the current full list. The mutation and the re-read run under the
/// same connection lock but not inside an explicit transaction.
#[derive(Clone)]
pub struct TodoRepo {
    db: Database,
}

impl TodoRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List all todos, ordered by id ascending.
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<Todo>, StoreError> {
        self.db.with_conn(list_all)
    }

    /// Insert a new todo with `completed = false`. The text is stored as
    /// given; callers are responsible for trimming and rejecting empty text.
    #[instrument(skip(self))]
    pub fn create(&self, text: &str) -> Result<Vec<Todo>, StoreError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO todos (text, completed) VALUES (?1, 0)",
                [text],
            )?;
            list_all(conn)
        })
    }

    /// Set both fields of the todo matching `id`. A non-matching id is a
    /// silent success: no row changes and the current list is returned.
    #[instrument(skip(self))]
    pub fn update(&self, id: i64, text: &str, completed: bool) -> Result<Vec<Todo>, StoreError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE todos SET text = ?1, completed = ?2 WHERE id = ?3",
                rusqlite::params![text, completed, id],
            )?;
            list_all(conn)
        })
    }

    /// Remove the todo matching `id`, if present. A non-matching id is a
    /// silent no-op.
    #[instrument(skip(self))]
    pub fn delete(&self, id: i64) -> Result<Vec<Todo>, StoreError> {
        self.db.with_conn(|conn| {
            conn.execute("DELETE FROM todos WHERE id = ?1", [id])?;
            list_all(conn)
        })
    }
}

fn list_all(conn: &Connection) -> Result<Vec<Todo>, StoreError> {
    let mut stmt = conn.prepare("SELECT id, text, completed FROM todos ORDER BY id ASC")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Todo {
                id: row.get(0)?,
                text: row.get(1)?,
                completed: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_repo() -> TodoRepo {
        TodoRepo::new(Database::in_memory().unwrap())
    }

    #[test]
    fn create_returns_full_list_with_new_todo() {
        let repo = test_repo();
        let todos = repo.create("buy milk").unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text, "buy milk");
        assert!(!todos[0].completed);
    }

    #[test]
    fn ids_are_monotonic() {
        let repo = test_repo();
        repo.create("first").unwrap();
        let todos = repo.create("second").unwrap();
        assert_eq!(todos.len(), 2);
        assert!(todos[0].id < todos[1].id);
        assert_eq!(todos[0].text, "first");
        assert_eq!(todos[1].text, "second");
    }

    #[test]
    fn list_empty() {
        let repo = test_repo();
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn list_is_idempotent() {
        let repo = test_repo();
        repo.create("a").unwrap();
        repo.create("b").unwrap();
        let first = repo.list().unwrap();
        let second = repo.list().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn update_sets_both_fields() {
        let repo = test_repo();
        let todos = repo.create("buy milk").unwrap();
        let id = todos[0].id;

        let todos = repo.update(id, "done", true).unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text, "done");
        assert!(todos[0].completed);
    }

    #[test]
    fn update_leaves_other_todos_unchanged() {
        let repo = test_repo();
        repo.create("a").unwrap();
        let todos = repo.create("b").unwrap();
        let b_id = todos[1].id;

        let todos = repo.update(b_id, "b2", true).unwrap();
        assert_eq!(todos[0].text, "a");
        assert!(!todos[0].completed);
        assert_eq!(todos[1].text, "b2");
        assert!(todos[1].completed);
    }

    #[test]
    fn update_nonexistent_id_is_silent_success() {
        let repo = test_repo();
        let before = repo.create("keep").unwrap();
        let after = repo.update(999_999, "ghost", true).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn update_accepts_empty_text() {
        // Unlike create, update does not reject empty text.
        let repo = test_repo();
        let todos = repo.create("soon gone").unwrap();
        let id = todos[0].id;
        let todos = repo.update(id, "", false).unwrap();
        assert_eq!(todos[0].text, "");
    }

    #[test]
    fn delete_removes_exactly_one() {
        let repo = test_repo();
        repo.create("a").unwrap();
        let todos = repo.create("b").unwrap();
        let a_id = todos[0].id;

        let todos = repo.delete(a_id).unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text, "b");
    }

    #[test]
    fn delete_nonexistent_id_is_noop() {
        let repo = test_repo();
        let before = repo.create("keep").unwrap();
        let after = repo.delete(999_999).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn mutation_list_matches_fresh_read() {
        let repo = test_repo();
        let from_create = repo.create("x").unwrap();
        assert_eq!(from_create, repo.list().unwrap());

        let id = from_create[0].id;
        let from_update = repo.update(id, "y", true).unwrap();
        assert_eq!(from_update, repo.list().unwrap());

        let from_delete = repo.delete(id).unwrap();
        assert_eq!(from_delete, repo.list().unwrap());
        assert!(from_delete.is_empty());
    }
}
