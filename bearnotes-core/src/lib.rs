//! Core library for Bearnotes — a local-first markdown note-taking application.
//!
//! The primary entry point is [`AppController`], which owns the whole
//! [`AppState`] (notes, tags, selection, layout, theme) and commits it to a
//! [`KeyValueStore`] after every operation. The native shell reaches files
//! through [`FileService`] and forwards menu items as [`MenuAction`]s.
//!
//! ```rust
//! use bearnotes_core::{AppController, MemoryStore, NotePatch, Settings};
//!
//! let mut app = AppController::open(MemoryStore::new(), Settings::default());
//! app.update_current_note(NotePatch::content("# Groceries\n- milk")).unwrap();
//! app.add_tag(&app.state().current_note_id.clone(), "personal").unwrap();
//! assert_eq!(app.current_note().unwrap().title, "Groceries");
//! ```
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    controller::AppController,
    error::{BearnotesError, Result},
    export::{markdown_to_html, ExportFormat},
    file_ops::{
        export_current_note, export_filters, import_file, markdown_filters, save_current_note,
        DialogFilter, FileDialogs, FileOperationResult, FileService, DEFAULT_SAVE_NAME,
    },
    menu::{dispatch_menu_action, MenuAction, MenuListeners, MenuOutcome},
    note::{derive_title, Note, NotePatch, DEFAULT_TITLE, TITLE_MAX_CHARS},
    note_store::{DeleteOutcome, NoteStore},
    persistence::{
        DisabledStore, FileStore, KeyValueStore, MemoryStore, StateRepository, APP_STATE_KEY,
        THEME_KEY,
    },
    settings::{load_settings, save_settings, settings_file_path, Settings},
    state::{AppState, PersistedState},
    tag::{default_tags, filter_by_tags, recompute_tag_counts, search_notes, Tag, ALL_TAG},
    theme::{css_variables, palette, SyntaxColors, Theme, ThemeColors},
    view::{EditorMode, SidebarBounds},
};

#[cfg(feature = "native-dialogs")]
#[doc(inline)]
pub use core::file_ops::NativeDialogs;
