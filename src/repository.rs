//! The storage contract the rest of the crate is written against.
use std::collections::HashMap;

use log::trace;

use crate::{Note, Result};

/// Durable key-value store of notes, keyed by note id.
///
/// `put` is a full-document upsert. `delete` of an absent id succeeds. `list`
/// makes no ordering promise.
pub trait NoteRepository {
    fn get(&self, id: &str) -> Result<Option<Note>>;
    fn put(&mut self, note: &Note) -> Result<()>;
    fn delete(&mut self, id: &str) -> Result<()>;
    fn list(&self) -> Result<Vec<Note>>;
}

impl<T: NoteRepository + ?Sized> NoteRepository for Box<T> {
    fn get(&self, id: &str) -> Result<Option<Note>> {
        (**self).get(id)
    }

    fn put(&mut self, note: &Note) -> Result<()> {
        (**self).put(note)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        (**self).delete(id)
    }

    fn list(&self) -> Result<Vec<Note>> {
        (**self).list()
    }
}

/// Volatile store, used by tests and `--ephemeral` sessions
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    notes: HashMap<String, Note>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoteRepository for MemoryStore {
    fn get(&self, id: &str) -> Result<Option<Note>> {
        Ok(self.notes.get(id).cloned())
    }

    fn put(&mut self, note: &Note) -> Result<()> {
        trace!("Storing note {} in memory", note.id);
        self.notes.insert(note.id.clone(), note.clone());
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.notes.remove(id);
        Ok(())
    }

    fn list(&self) -> Result<Vec<Note>> {
        Ok(self.notes.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_replaces_and_delete_is_idempotent() {
        let mut store = MemoryStore::new();
        let mut note = Note {
            id: "n1".to_string(),
            title: "first".to_string(),
            ..Default::default()
        };
        store.put(&note).unwrap();
        note.title = "second".to_string();
        store.put(&note).unwrap();

        assert_eq!(store.list().unwrap().len(), 1);
        assert_eq!(store.get("n1").unwrap().unwrap().title, "second");

        store.delete("n1").unwrap();
        store.delete("n1").unwrap();
        assert!(store.get("n1").unwrap().is_none());
    }
}
