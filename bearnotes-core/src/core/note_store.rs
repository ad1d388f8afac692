//! In-memory note collection and all note-level mutations.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::core::note::{Note, NotePatch};
use crate::{BearnotesError, Result};

/// What a [`NoteStore::delete`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// ID of the note that was removed.
    pub removed_id: String,
    /// ID of the note created because the removed note was the last one.
    pub replacement_id: Option<String>,
}

/// Ordered collection of notes that is never empty once normalized.
///
/// Notes are held as `Arc<Note>`, so cloning the store is cheap and a mutation
/// only copies the note it touches. Earlier clones keep seeing the old notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteStore {
    notes: Vec<Arc<Note>>,
}

impl NoteStore {
    /// Creates a store holding a single fresh note.
    pub fn new() -> Self {
        Self { notes: vec![Arc::new(Note::new())] }
    }

    /// Builds a store from existing notes, adding a fresh note if `notes` is empty.
    pub fn from_notes(notes: Vec<Note>) -> Self {
        let mut store = Self { notes: notes.into_iter().map(Arc::new).collect() };
        store.ensure_not_empty();
        store
    }

    pub fn notes(&self) -> &[Arc<Note>] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, note_id: &str) -> Option<&Arc<Note>> {
        self.notes.iter().find(|n| n.id == note_id)
    }

    pub fn contains(&self, note_id: &str) -> bool {
        self.get(note_id).is_some()
    }

    pub fn first(&self) -> Option<&Arc<Note>> {
        self.notes.first()
    }

    /// Appends a fresh empty note and returns its ID. Never fails.
    pub fn create(&mut self) -> String {
        let note = Note::new();
        let id = note.id.clone();
        log::debug!("created note {id}");
        self.notes.push(Arc::new(note));
        id
    }

    /// Merges `patch` into the note `note_id` and returns the updated note.
    ///
    /// # Errors
    ///
    /// Returns [`BearnotesError::NoteNotFound`] if no note has that ID; the
    /// store is left untouched.
    pub fn update(&mut self, note_id: &str, patch: NotePatch) -> Result<&Note> {
        let note = self.note_mut(note_id)?;
        note.apply(patch);
        Ok(note)
    }

    /// Removes `note_id`; if that empties the store a fresh note replaces it.
    ///
    /// # Errors
    ///
    /// Returns [`BearnotesError::NoteNotFound`] if no note has that ID.
    pub fn delete(&mut self, note_id: &str) -> Result<DeleteOutcome> {
        let index = self
            .notes
            .iter()
            .position(|n| n.id == note_id)
            .ok_or_else(|| BearnotesError::NoteNotFound(note_id.to_string()))?;
        self.notes.remove(index);
        log::debug!("deleted note {note_id}");

        let replacement_id = if self.notes.is_empty() { Some(self.create()) } else { None };
        Ok(DeleteOutcome { removed_id: note_id.to_string(), replacement_id })
    }

    /// Adds `tag` to the note exactly as given. Returns `false` (and leaves
    /// the note untouched) if the tag is whitespace-only or already present.
    ///
    /// # Errors
    ///
    /// Returns [`BearnotesError::NoteNotFound`] if no note has that ID.
    pub fn add_tag(&mut self, note_id: &str, tag: &str) -> Result<bool> {
        let current = self
            .get(note_id)
            .ok_or_else(|| BearnotesError::NoteNotFound(note_id.to_string()))?;
        if tag.trim().is_empty() || current.has_tag(tag) {
            return Ok(false);
        }
        let note = self.note_mut(note_id)?;
        note.tags.push(tag.to_string());
        note.touch();
        Ok(true)
    }

    /// Removes `tag` from the note. Returns `false` if it was not present.
    ///
    /// # Errors
    ///
    /// Returns [`BearnotesError::NoteNotFound`] if no note has that ID.
    pub fn remove_tag(&mut self, note_id: &str, tag: &str) -> Result<bool> {
        let current = self
            .get(note_id)
            .ok_or_else(|| BearnotesError::NoteNotFound(note_id.to_string()))?;
        if !current.has_tag(tag) {
            return Ok(false);
        }
        let note = self.note_mut(note_id)?;
        note.tags.retain(|t| t != tag);
        note.touch();
        Ok(true)
    }

    /// Appends an already-built note, e.g. one imported from a file.
    pub fn insert(&mut self, note: Note) {
        self.notes.push(Arc::new(note));
    }

    /// Adds a fresh note if the store is empty. Returns the new note's ID.
    pub fn ensure_not_empty(&mut self) -> Option<String> {
        if self.notes.is_empty() {
            Some(self.create())
        } else {
            None
        }
    }

    /// Repairs notes whose `updated_at` precedes `created_at`. Returns how many were fixed.
    pub(crate) fn repair_timestamps(&mut self) -> usize {
        let mut repaired = 0;
        for note in &mut self.notes {
            if note.updated_at < note.created_at {
                let note = Arc::make_mut(note);
                note.updated_at = note.created_at;
                repaired += 1;
            }
        }
        repaired
    }

    /// Drops every note whose ID already appeared earlier in the store.
    /// Returns how many were dropped.
    pub(crate) fn dedupe_ids(&mut self) -> usize {
        let before = self.notes.len();
        let mut seen = HashSet::with_capacity(before);
        self.notes.retain(|n| seen.insert(n.id.clone()));
        before - self.notes.len()
    }

    fn note_mut(&mut self, note_id: &str) -> Result<&mut Note> {
        self.notes
            .iter_mut()
            .find(|n| n.id == note_id)
            .map(Arc::make_mut)
            .ok_or_else(|| BearnotesError::NoteNotFound(note_id.to_string()))
    }
}
