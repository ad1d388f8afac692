//! The application controller: sole owner and mutator of [`AppState`].

use std::sync::Arc;

use crate::core::note::{Note, NotePatch};
use crate::core::persistence::{KeyValueStore, StateRepository};
use crate::core::settings::Settings;
use crate::core::state::AppState;
use crate::core::theme::Theme;
use crate::core::view::EditorMode;
use crate::{BearnotesError, Result};

/// Owns the application state and mediates every transition.
///
/// Each operation builds the next state from a copy of the current one,
/// swaps it in, and then commits the whole aggregate through the
/// [`StateRepository`]. Operations addressed at an unknown note return
/// [`BearnotesError::NoteNotFound`], leave the state as it was, and do not
/// commit.
///
/// A failed commit is logged and remembered in [`last_commit_error`]; the
/// in-memory transition still stands.
///
/// [`last_commit_error`]: AppController::last_commit_error
pub struct AppController<S: KeyValueStore> {
    state: Arc<AppState>,
    repository: StateRepository<S>,
    settings: Settings,
    last_commit_error: Option<String>,
}

impl<S: KeyValueStore> AppController<S> {
    /// Loads the saved state from `store`, or starts from the default state if
    /// there is none or it cannot be parsed.
    pub fn open(store: S, settings: Settings) -> Self {
        let repository = StateRepository::new(store);
        let state = match repository.load() {
            Some(persisted) => {
                log::info!("restored {} note(s) from saved state", persisted.notes.len());
                AppState::from_persisted(persisted, &settings)
            }
            None => {
                log::info!("starting with default state");
                AppState::new(&settings)
            }
        };
        Self { state: Arc::new(state), repository, settings, last_commit_error: None }
    }

    /// Commits the final state and hands the underlying store back.
    pub fn close(mut self) -> S {
        self.commit();
        let Self { repository, .. } = self;
        repository.into_store()
    }

    /// A shared snapshot of the current state. It never changes after being returned.
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn repository(&self) -> &StateRepository<S> {
        &self.repository
    }

    /// Message of the most recent failed commit, cleared by the next successful one.
    pub fn last_commit_error(&self) -> Option<&str> {
        self.last_commit_error.as_deref()
    }

    pub fn current_note(&self) -> Option<Arc<Note>> {
        self.state.current_note().cloned()
    }

    /// Notes visible under the active tag filter.
    pub fn filtered_notes(&self) -> Vec<Arc<Note>> {
        self.state.filtered_notes().into_iter().cloned().collect()
    }

    /// Notes visible under the active tag filter whose title or content
    /// contains `query`, ignoring case.
    pub fn search_notes(&self, query: &str) -> Vec<Arc<Note>> {
        self.state.search_notes(query).into_iter().cloned().collect()
    }

    /// Creates an empty note, selects it, and returns its ID.
    pub fn create_note(&mut self) -> String {
        self.infallible(|state| {
            let id = state.notes.create();
            state.current_note_id = id.clone();
            id
        })
    }

    /// Merges `patch` into a note. Supplying content recomputes its title.
    ///
    /// # Errors
    ///
    /// Returns [`BearnotesError::NoteNotFound`] if `note_id` is unknown.
    pub fn update_note(&mut self, note_id: &str, patch: NotePatch) -> Result<()> {
        self.transition(|state| state.notes.update(note_id, patch).map(|_| ()))
    }

    /// Merges `patch` into the selected note.
    ///
    /// # Errors
    ///
    /// Returns [`BearnotesError::NoteNotFound`] if the state has no selected note.
    pub fn update_current_note(&mut self, patch: NotePatch) -> Result<()> {
        let note_id = self.state.current_note_id.clone();
        self.update_note(&note_id, patch)
    }

    /// Deletes a note. Deleting the last note leaves a fresh one in its place;
    /// deleting the selected note moves the selection to the first remaining note.
    ///
    /// # Errors
    ///
    /// Returns [`BearnotesError::NoteNotFound`] if `note_id` is unknown.
    pub fn delete_note(&mut self, note_id: &str) -> Result<()> {
        self.transition(|state| {
            let outcome = state.notes.delete(note_id)?;
            if let Some(replacement) = outcome.replacement_id {
                state.current_note_id = replacement;
            }
            state.ensure_selection();
            Ok(())
        })
    }

    /// Makes `note_id` the selected note.
    ///
    /// # Errors
    ///
    /// Returns [`BearnotesError::NoteNotFound`] if `note_id` is unknown.
    pub fn select_note(&mut self, note_id: &str) -> Result<()> {
        self.transition(|state| {
            if !state.notes.contains(note_id) {
                return Err(BearnotesError::NoteNotFound(note_id.to_string()));
            }
            state.current_note_id = note_id.to_string();
            Ok(())
        })
    }

    /// Adds `tag` to a note; a tag already present is left as is.
    ///
    /// # Errors
    ///
    /// Returns [`BearnotesError::NoteNotFound`] if `note_id` is unknown.
    pub fn add_tag(&mut self, note_id: &str, tag: &str) -> Result<()> {
        self.transition(|state| state.notes.add_tag(note_id, tag).map(|_| ()))
    }

    /// Removes `tag` from a note; an absent tag is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`BearnotesError::NoteNotFound`] if `note_id` is unknown.
    pub fn remove_tag(&mut self, note_id: &str, tag: &str) -> Result<()> {
        self.transition(|state| state.notes.remove_tag(note_id, tag).map(|_| ()))
    }

    /// Replaces the tag filter. Duplicates are dropped; unknown names are kept.
    pub fn set_selected_tags(&mut self, tags: Vec<String>) {
        self.infallible(|state| state.set_selected_tags(tags));
    }

    /// Adds `tag` to the filter, or removes it if it is already selected.
    pub fn toggle_selected_tag(&mut self, tag: &str) {
        self.infallible(|state| {
            if state.selected_tags.iter().any(|t| t == tag) {
                state.selected_tags.retain(|t| t != tag);
            } else {
                state.selected_tags.push(tag.to_string());
            }
        });
    }

    pub fn set_editor_mode(&mut self, mode: EditorMode) {
        self.infallible(|state| state.editor_mode = mode);
    }

    /// Moves to the next editor mode (edit → split → preview → edit).
    pub fn advance_editor_mode(&mut self) -> EditorMode {
        self.infallible(|state| {
            state.editor_mode = state.editor_mode.advance();
            state.editor_mode
        })
    }

    /// Sets the sidebar width, clamped to the configured bounds. A non-finite
    /// width is ignored. Returns the width now in effect.
    pub fn set_sidebar_width(&mut self, width: f64) -> f64 {
        let bounds = self.settings.sidebar_bounds();
        self.infallible(|state| {
            if let Some(width) = bounds.clamp(width) {
                state.sidebar_width = width;
            }
            state.clamp_sidebar(bounds);
            state.sidebar_width
        })
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.infallible(|state| state.theme = theme);
    }

    /// Switches between the light and dark theme and returns the new one.
    pub fn toggle_theme(&mut self) -> Theme {
        self.infallible(|state| {
            state.theme = state.theme.toggle();
            state.theme
        })
    }

    /// Adds a note holding `content` loaded from `file_path`, selects it, and
    /// returns its ID.
    pub fn import_note(&mut self, content: String, file_path: String) -> String {
        self.infallible(|state| {
            let mut note = Note::new();
            note.apply(NotePatch {
                content: Some(content),
                file_path: Some(file_path),
                ..NotePatch::default()
            });
            let id = note.id.clone();
            state.notes.insert(note);
            state.current_note_id = id.clone();
            id
        })
    }

    /// Runs `op` against a copy of the state; on success swaps the copy in,
    /// refreshes derived tag counts, and commits.
    fn transition<T>(&mut self, op: impl FnOnce(&mut AppState) -> Result<T>) -> Result<T> {
        let mut next = AppState::clone(&self.state);
        let out = match op(&mut next) {
            Ok(out) => out,
            Err(e) => {
                log::debug!("state transition rejected: {e}");
                return Err(e);
            }
        };
        next.refresh_tags();
        self.state = Arc::new(next);
        self.commit();
        Ok(out)
    }

    fn infallible<T>(&mut self, op: impl FnOnce(&mut AppState) -> T) -> T {
        let mut next = AppState::clone(&self.state);
        let out = op(&mut next);
        next.refresh_tags();
        self.state = Arc::new(next);
        self.commit();
        out
    }

    fn commit(&mut self) {
        match self.repository.save(&self.state) {
            Ok(()) => self.last_commit_error = None,
            Err(e) => {
                log::error!("failed to persist application state: {e}");
                self.last_commit_error = Some(e.user_message());
            }
        }
    }
}
