//! The application state aggregate and its persisted form.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::note::Note;
use crate::core::note_store::NoteStore;
use crate::core::settings::Settings;
use crate::core::tag::{default_tags, filter_by_tags, recompute_tag_counts, search_notes, Tag};
use crate::core::theme::Theme;
use crate::core::view::{EditorMode, SidebarBounds};

/// Everything the presentation layer renders, and the unit of persistence.
///
/// Held behind an `Arc` by [`AppController`](crate::AppController); every
/// operation produces a new value, so a snapshot handed out earlier never
/// changes underneath its holder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub theme: Theme,
    pub notes: NoteStore,
    /// Always names a note in `notes`.
    pub current_note_id: String,
    pub tags: Vec<Tag>,
    pub selected_tags: Vec<String>,
    pub editor_mode: EditorMode,
    pub sidebar_width: f64,
}

impl AppState {
    /// Fresh state: one empty note, the default tag registry and default layout.
    pub fn new(settings: &Settings) -> Self {
        let notes = NoteStore::new();
        let current_note_id = notes.first().map(|n| n.id.clone()).unwrap_or_default();
        let mut state = Self {
            theme: settings.default_theme,
            notes,
            current_note_id,
            tags: default_tags(),
            selected_tags: Vec::new(),
            editor_mode: EditorMode::default(),
            sidebar_width: settings.initial_sidebar_width(),
        };
        state.refresh_tags();
        state
    }

    /// Rebuilds a state from a persisted snapshot, repairing anything that
    /// would break an invariant.
    pub fn from_persisted(persisted: PersistedState, settings: &Settings) -> Self {
        let bounds = settings.sidebar_bounds();
        let current_note_id = persisted
            .current_note_id
            .or_else(|| persisted.current_note.map(|n| n.id))
            .unwrap_or_default();

        let mut state = Self {
            theme: persisted.theme.unwrap_or(settings.default_theme),
            notes: NoteStore::from_notes(persisted.notes),
            current_note_id,
            tags: persisted.tags.unwrap_or_else(default_tags),
            selected_tags: Vec::new(),
            editor_mode: persisted.editor_mode,
            sidebar_width: persisted
                .sidebar_width
                .and_then(|w| bounds.clamp(w))
                .unwrap_or_else(|| settings.initial_sidebar_width()),
        };
        state.set_selected_tags(persisted.selected_tags);

        let dropped = state.notes.dedupe_ids();
        if dropped > 0 {
            log::warn!("dropped {dropped} note(s) with a duplicate id");
        }
        let repaired = state.notes.repair_timestamps();
        if repaired > 0 {
            log::warn!("repaired {repaired} note(s) with updatedAt before createdAt");
        }
        state.ensure_selection();
        state.refresh_tags();
        state
    }

    /// The selected note. `None` only for a state that was never normalized.
    pub fn current_note(&self) -> Option<&Arc<Note>> {
        self.notes.get(&self.current_note_id)
    }

    /// Notes visible under the active tag filter (OR across selected tags).
    pub fn filtered_notes(&self) -> Vec<&Arc<Note>> {
        filter_by_tags(self.notes.notes(), &self.selected_tags)
    }

    /// Notes visible under the active tag filter whose title or content
    /// contains `query`, ignoring case.
    pub fn search_notes(&self, query: &str) -> Vec<&Arc<Note>> {
        search_notes(self.notes.notes(), &self.selected_tags, query)
    }

    pub(crate) fn refresh_tags(&mut self) {
        self.tags = recompute_tag_counts(self.notes.notes(), &self.tags);
    }

    /// Points the selection at the first note if it names nothing.
    pub(crate) fn ensure_selection(&mut self) {
        self.notes.ensure_not_empty();
        if !self.notes.contains(&self.current_note_id) {
            if let Some(first) = self.notes.first() {
                self.current_note_id = first.id.clone();
            }
        }
    }

    pub(crate) fn set_selected_tags(&mut self, tags: Vec<String>) {
        let mut unique: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            if !unique.contains(&tag) {
                unique.push(tag);
            }
        }
        self.selected_tags = unique;
    }

    pub(crate) fn clamp_sidebar(&mut self, bounds: SidebarBounds) {
        if let Some(width) = bounds.clamp(self.sidebar_width) {
            self.sidebar_width = width;
        }
    }
}

/// A snapshot as read back from storage, before normalization.
///
/// Every field is optional so that older or partial snapshots still load.
/// Snapshots that embed the whole selected note under `currentNote`, rather
/// than its ID, are accepted; only the embedded `id` is used.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub theme: Option<Theme>,
    pub notes: Vec<Note>,
    pub current_note_id: Option<String>,
    pub current_note: Option<NoteRef>,
    pub tags: Option<Vec<Tag>>,
    pub selected_tags: Vec<String>,
    pub editor_mode: EditorMode,
    pub sidebar_width: Option<f64>,
}

/// The only part of an embedded note a snapshot needs.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteRef {
    pub id: String,
}
