//! Internal domain modules for the Bearnotes core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod controller;
pub mod error;
pub mod export;
pub mod file_ops;
pub mod menu;
pub mod note;
pub mod note_store;
pub mod persistence;
pub mod settings;
pub mod state;
pub mod tag;
pub mod theme;
pub mod view;

#[doc(inline)]
pub use controller::AppController;
#[doc(inline)]
pub use error::{BearnotesError, Result};
#[doc(inline)]
pub use export::ExportFormat;
#[doc(inline)]
pub use file_ops::{FileDialogs, FileOperationResult, FileService};
#[doc(inline)]
pub use menu::{MenuAction, MenuListeners};
#[doc(inline)]
pub use note::{Note, NotePatch};
#[doc(inline)]
pub use note_store::NoteStore;
#[doc(inline)]
pub use persistence::{KeyValueStore, StateRepository};
#[doc(inline)]
pub use settings::Settings;
#[doc(inline)]
pub use state::AppState;
#[doc(inline)]
pub use tag::Tag;
#[doc(inline)]
pub use theme::{Theme, ThemeColors};
#[doc(inline)]
pub use view::EditorMode;
