//! Saving, opening and exporting notes as files.
//!
//! The native shell supplies a [`FileDialogs`] implementation; [`FileService`]
//! wraps it with the read/write logic and reports every outcome as a
//! [`FileOperationResult`]. A dismissed dialog is not an error: it yields
//! `success: false` with no `error`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::controller::AppController;
use crate::core::export::ExportFormat;
use crate::core::note::NotePatch;
use crate::core::persistence::KeyValueStore;

/// File name proposed when saving a note that has no file yet.
pub const DEFAULT_SAVE_NAME: &str = "untitled.md";

/// Outcome of a file operation, shaped for the web view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOperationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileOperationResult {
    pub fn saved(path: &Path) -> Self {
        Self { success: true, file_path: Some(path.to_string_lossy().to_string()), ..Self::default() }
    }

    pub fn opened(path: &Path, content: String) -> Self {
        Self {
            success: true,
            file_path: Some(path.to_string_lossy().to_string()),
            content: Some(content),
            error: None,
        }
    }

    /// The user dismissed the dialog.
    pub fn cancelled() -> Self {
        Self::default()
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { error: Some(error.into()), ..Self::default() }
    }

    pub fn is_cancelled(&self) -> bool {
        !self.success && self.error.is_none()
    }
}

/// One entry in a dialog's file-type dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl DialogFilter {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self { name: name.into(), extensions: extensions.iter().map(|e| e.to_string()).collect() }
    }

    fn all_files() -> Self {
        Self::new("All Files", &["*"])
    }
}

/// Filters offered when saving or opening a markdown note.
pub fn markdown_filters() -> Vec<DialogFilter> {
    vec![DialogFilter::new("Markdown Files", &["md", "markdown"]), DialogFilter::all_files()]
}

/// Filters offered when exporting to `format`.
pub fn export_filters(format: ExportFormat) -> Vec<DialogFilter> {
    vec![
        DialogFilter::new(format.filter_name(), &[format.extension()]),
        DialogFilter::all_files(),
    ]
}

/// Native save/open dialogs. `None` means the user cancelled.
pub trait FileDialogs {
    fn pick_save_path(&mut self, default_name: &str, filters: &[DialogFilter]) -> Option<PathBuf>;
    fn pick_open_path(&mut self, filters: &[DialogFilter]) -> Option<PathBuf>;
}

/// Dialogs backed by the platform's native file chooser.
#[cfg(feature = "native-dialogs")]
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDialogs;

#[cfg(feature = "native-dialogs")]
impl FileDialogs for NativeDialogs {
    fn pick_save_path(&mut self, default_name: &str, filters: &[DialogFilter]) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new().set_file_name(default_name);
        for filter in filters {
            dialog = dialog.add_filter(filter.name.as_str(), filter.extensions.as_slice());
        }
        dialog.save_file()
    }

    fn pick_open_path(&mut self, filters: &[DialogFilter]) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new();
        for filter in filters {
            dialog = dialog.add_filter(filter.name.as_str(), filter.extensions.as_slice());
        }
        dialog.pick_file()
    }
}

/// Reads and writes note files, asking `D` for paths when needed.
pub struct FileService<D> {
    dialogs: D,
}

impl<D: FileDialogs> FileService<D> {
    pub fn new(dialogs: D) -> Self {
        Self { dialogs }
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    /// Writes `content` to `path`, or to a location picked in a save dialog
    /// when no path is given.
    pub fn save_file(&mut self, content: &str, path: Option<&str>) -> FileOperationResult {
        let target = match path {
            Some(path) => PathBuf::from(path),
            None => match self.dialogs.pick_save_path(DEFAULT_SAVE_NAME, &markdown_filters()) {
                Some(path) => path,
                None => return FileOperationResult::cancelled(),
            },
        };
        write_text(&target, content)
    }

    /// Reads a UTF-8 file picked in an open dialog.
    pub fn open_file(&mut self) -> FileOperationResult {
        let Some(path) = self.dialogs.pick_open_path(&markdown_filters()) else {
            return FileOperationResult::cancelled();
        };
        match fs::read_to_string(&path) {
            Ok(content) => FileOperationResult::opened(&path, content),
            Err(e) => {
                log::warn!("failed to read {}: {e}", path.display());
                FileOperationResult::failed(e.to_string())
            }
        }
    }

    /// Exports `content` in the format named by `format` (`pdf`, `html`, `md`).
    pub fn export_file(&mut self, content: &str, format: &str) -> FileOperationResult {
        match format.parse::<ExportFormat>() {
            Ok(format) => self.export_as(content, format),
            Err(e) => FileOperationResult::failed(e.user_message()),
        }
    }

    /// Writes already-rendered `content` to a location picked in a save dialog.
    pub fn export_as(&mut self, content: &str, format: ExportFormat) -> FileOperationResult {
        match self.dialogs.pick_save_path(&format.default_file_name(), &export_filters(format)) {
            Some(path) => write_text(&path, content),
            None => FileOperationResult::cancelled(),
        }
    }
}

fn write_text(path: &Path, content: &str) -> FileOperationResult {
    match fs::write(path, content) {
        Ok(()) => {
            log::debug!("wrote {}", path.display());
            FileOperationResult::saved(path)
        }
        Err(e) => {
            log::warn!("failed to write {}: {e}", path.display());
            FileOperationResult::failed(e.to_string())
        }
    }
}

/// Saves the selected note to its file, asking for a location the first
/// time. On success the note remembers the path it was saved to.
pub fn save_current_note<S: KeyValueStore, D: FileDialogs>(
    controller: &mut AppController<S>,
    files: &mut FileService<D>,
) -> FileOperationResult {
    let Some(note) = controller.current_note() else {
        return FileOperationResult::failed("No note is selected");
    };
    let result = files.save_file(&note.content, note.file_path.as_deref());
    if let Some(path) = result.file_path.as_deref().filter(|_| result.success) {
        if note.file_path.as_deref() != Some(path) {
            if let Err(e) = controller.update_note(&note.id, NotePatch::file_path(path)) {
                log::warn!("saved note vanished before its path could be recorded: {e}");
            }
        }
    }
    result
}

/// Renders the selected note in `format` and writes it where the user picks.
///
/// PDF is refused before any dialog opens: the core has no PDF renderer, and
/// printable content has to come from the shell through
/// [`FileService::export_as`].
pub fn export_current_note<S: KeyValueStore, D: FileDialogs>(
    controller: &AppController<S>,
    files: &mut FileService<D>,
    format: ExportFormat,
) -> FileOperationResult {
    if format == ExportFormat::Pdf {
        return FileOperationResult::failed("PDF export needs printable content from the shell");
    }
    let Some(note) = controller.current_note() else {
        return FileOperationResult::failed("No note is selected");
    };
    files.export_as(&format.render(&note.content, &note.title), format)
}

/// Opens a markdown file and adds it as a new, selected note.
pub fn import_file<S: KeyValueStore, D: FileDialogs>(
    controller: &mut AppController<S>,
    files: &mut FileService<D>,
) -> FileOperationResult {
    let result = files.open_file();
    if let (true, Some(content), Some(path)) =
        (result.success, result.content.clone(), result.file_path.clone())
    {
        controller.import_note(content, path);
    }
    result
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::persistence::MemoryStore;
    use crate::core::settings::Settings;
    use tempfile::TempDir;

    /// Answers dialogs from preset paths and records what it was asked.
    #[derive(Default)]
    pub(crate) struct ScriptedDialogs {
        pub save_answer: Option<PathBuf>,
        pub open_answer: Option<PathBuf>,
        pub asked_names: Vec<String>,
        pub asked_filters: Vec<Vec<DialogFilter>>,
    }

    impl FileDialogs for ScriptedDialogs {
        fn pick_save_path(&mut self, default_name: &str, filters: &[DialogFilter]) -> Option<PathBuf> {
            self.asked_names.push(default_name.to_string());
            self.asked_filters.push(filters.to_vec());
            self.save_answer.clone()
        }

        fn pick_open_path(&mut self, filters: &[DialogFilter]) -> Option<PathBuf> {
            self.asked_filters.push(filters.to_vec());
            self.open_answer.clone()
        }
    }

    fn controller() -> AppController<MemoryStore> {
        AppController::open(MemoryStore::new(), Settings::default())
    }

    #[test]
    fn test_save_with_path_skips_dialog() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("note.md");
        let mut files = FileService::new(ScriptedDialogs::default());

        let result = files.save_file("hello", Some(path.to_str().unwrap()));
        assert!(result.success);
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
        assert!(files.dialogs().asked_names.is_empty());
    }

    #[test]
    fn test_save_without_path_proposes_untitled_md() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("picked.md");
        let mut files = FileService::new(ScriptedDialogs {
            save_answer: Some(path.clone()),
            ..ScriptedDialogs::default()
        });

        let result = files.save_file("body", None);
        assert!(result.success);
        assert_eq!(result.file_path.as_deref(), path.to_str());
        assert_eq!(files.dialogs().asked_names, vec![DEFAULT_SAVE_NAME.to_string()]);
        assert_eq!(files.dialogs().asked_filters[0], markdown_filters());
    }

    #[test]
    fn test_cancel_is_not_an_error() {
        let mut files = FileService::new(ScriptedDialogs::default());
        let result = files.save_file("body", None);
        assert!(result.is_cancelled());
        assert!(files.open_file().is_cancelled());
        assert!(files.export_file("body", "html").is_cancelled());

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"success":false}"#);
    }

    #[test]
    fn test_write_failure_reports_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("note.md");
        let mut files = FileService::new(ScriptedDialogs::default());
        let result = files.save_file("x", Some(path.to_str().unwrap()));
        assert!(!result.success);
        assert!(result.error.is_some());
    }

    #[test]
    fn test_open_reads_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.md");
        fs::write(&path, "# Title\ntext").unwrap();
        let mut files = FileService::new(ScriptedDialogs {
            open_answer: Some(path),
            ..ScriptedDialogs::default()
        });
        let result = files.open_file();
        assert!(result.success);
        assert_eq!(result.content.as_deref(), Some("# Title\ntext"));
    }

    #[test]
    fn test_export_proposes_format_name_and_rejects_unknown() {
        let dir = TempDir::new().unwrap();
        let mut files = FileService::new(ScriptedDialogs {
            save_answer: Some(dir.path().join("out.html")),
            ..ScriptedDialogs::default()
        });
        assert!(files.export_file("<p>x</p>", "html").success);
        assert_eq!(files.dialogs().asked_names, vec!["export.html".to_string()]);

        let result = files.export_file("x", "docx");
        assert!(!result.success);
        assert!(result.error.unwrap().contains("docx"));
    }

    #[test]
    fn test_save_current_note_records_path_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("current.md");
        let mut ctl = controller();
        ctl.update_current_note(NotePatch::content("# Saved")).unwrap();
        let mut files = FileService::new(ScriptedDialogs {
            save_answer: Some(path.clone()),
            ..ScriptedDialogs::default()
        });

        let result = save_current_note(&mut ctl, &mut files);
        assert!(result.success);
        assert_eq!(ctl.current_note().unwrap().file_path.as_deref(), path.to_str());

        // Second save goes straight to the remembered path.
        ctl.update_current_note(NotePatch::content("# Saved again")).unwrap();
        assert!(save_current_note(&mut ctl, &mut files).success);
        assert_eq!(files.dialogs().asked_names.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Saved again");
    }

    #[test]
    fn test_cancelled_save_leaves_note_unlinked() {
        let mut ctl = controller();
        let mut files = FileService::new(ScriptedDialogs::default());
        assert!(save_current_note(&mut ctl, &mut files).is_cancelled());
        assert!(ctl.current_note().unwrap().file_path.is_none());
    }

    #[test]
    fn test_export_current_note_renders_html() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.html");
        let mut ctl = controller();
        ctl.update_current_note(NotePatch::content("# Report\n\nbody")).unwrap();
        let mut files = FileService::new(ScriptedDialogs {
            save_answer: Some(path.clone()),
            ..ScriptedDialogs::default()
        });

        assert!(export_current_note(&ctl, &mut files, ExportFormat::Html).success);
        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains("<h1>Report</h1>"));
        assert!(html.contains("<title>Report</title>"));
    }

    #[test]
    fn test_export_current_note_refuses_pdf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.pdf");
        let ctl = controller();
        let mut files = FileService::new(ScriptedDialogs {
            save_answer: Some(path.clone()),
            ..ScriptedDialogs::default()
        });

        let result = export_current_note(&ctl, &mut files, ExportFormat::Pdf);
        assert!(!result.success);
        assert!(result.error.unwrap().contains("PDF"));
        assert!(files.dialogs().asked_names.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_import_file_adds_selected_note() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("imported.md");
        fs::write(&path, "# From Disk\nbody").unwrap();
        let mut ctl = controller();
        let mut files = FileService::new(ScriptedDialogs {
            open_answer: Some(path.clone()),
            ..ScriptedDialogs::default()
        });

        assert!(import_file(&mut ctl, &mut files).success);
        let note = ctl.current_note().unwrap();
        assert_eq!(note.title, "From Disk");
        assert_eq!(note.file_path.as_deref(), path.to_str());
        assert_eq!(ctl.state().notes.len(), 2);
    }
}
