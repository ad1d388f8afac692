//! Application menu actions delivered from the native shell to the UI.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::controller::AppController;
use crate::core::file_ops::{
    export_current_note, save_current_note, FileDialogs, FileOperationResult, FileService,
};
use crate::core::persistence::KeyValueStore;
use crate::core::theme::Theme;
use crate::core::view::EditorMode;

/// A menu item or accelerator the shell forwards to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuAction {
    /// File > New Note (CmdOrCtrl+N)
    NewNote,
    /// File > Save (CmdOrCtrl+S)
    Save,
    /// File > Export... (CmdOrCtrl+E)
    Export,
    /// View > Toggle Theme (CmdOrCtrl+T)
    ToggleTheme,
    /// View > Toggle Preview (CmdOrCtrl+P)
    TogglePreview,
}

impl MenuAction {
    pub const ALL: [MenuAction; 5] = [
        MenuAction::NewNote,
        MenuAction::Save,
        MenuAction::Export,
        MenuAction::ToggleTheme,
        MenuAction::TogglePreview,
    ];

    /// Event name emitted to the web view, e.g. `menu-new-note`.
    pub fn event_name(self) -> &'static str {
        match self {
            Self::NewNote => "menu-new-note",
            Self::Save => "menu-save",
            Self::Export => "menu-export",
            Self::ToggleTheme => "menu-toggle-theme",
            Self::TogglePreview => "menu-toggle-preview",
        }
    }

    /// Parses an event name; the `menu-` prefix is optional.
    pub fn from_event_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix("menu-").unwrap_or(name);
        Self::ALL.into_iter().find(|a| &a.event_name()["menu-".len()..] == name)
    }

    pub fn accelerator(self) -> &'static str {
        match self {
            Self::NewNote => "CmdOrCtrl+N",
            Self::Save => "CmdOrCtrl+S",
            Self::Export => "CmdOrCtrl+E",
            Self::ToggleTheme => "CmdOrCtrl+T",
            Self::TogglePreview => "CmdOrCtrl+P",
        }
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

type Listener = Box<dyn FnMut(MenuAction)>;

/// Callbacks bound to menu actions.
///
/// The UI registers on startup and calls [`remove_all_listeners`] on
/// teardown, so a reloaded UI never handles an action twice.
///
/// [`remove_all_listeners`]: MenuListeners::remove_all_listeners
#[derive(Default)]
pub struct MenuListeners {
    listeners: Vec<Listener>,
}

impl MenuListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for every menu action.
    pub fn on_menu_action(&mut self, callback: impl FnMut(MenuAction) + 'static) {
        self.listeners.push(Box::new(callback));
    }

    /// Delivers `action` to every listener. Returns how many were called.
    pub fn emit(&mut self, action: MenuAction) -> usize {
        for listener in &mut self.listeners {
            listener(action);
        }
        self.listeners.len()
    }

    /// Delivers the action named `event`. Unknown names are ignored.
    pub fn emit_event(&mut self, event: &str) -> usize {
        match MenuAction::from_event_name(event) {
            Some(action) => self.emit(action),
            None => {
                log::debug!("ignoring unknown menu event {event:?}");
                0
            }
        }
    }

    pub fn remove_all_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// What a dispatched menu action did.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuOutcome {
    NoteCreated(String),
    File(FileOperationResult),
    ThemeChanged(Theme),
    EditorModeChanged(EditorMode),
}

/// Runs the controller operation bound to `action`.
///
/// Export uses the format configured in settings.
pub fn dispatch_menu_action<S: KeyValueStore, D: FileDialogs>(
    controller: &mut AppController<S>,
    files: &mut FileService<D>,
    action: MenuAction,
) -> MenuOutcome {
    log::debug!("menu action {action}");
    match action {
        MenuAction::NewNote => MenuOutcome::NoteCreated(controller.create_note()),
        MenuAction::Save => MenuOutcome::File(save_current_note(controller, files)),
        MenuAction::Export => {
            let format = controller.settings().default_export_format;
            MenuOutcome::File(export_current_note(controller, files, format))
        }
        MenuAction::ToggleTheme => MenuOutcome::ThemeChanged(controller.toggle_theme()),
        MenuAction::TogglePreview => {
            MenuOutcome::EditorModeChanged(controller.advance_editor_mode())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::file_ops::tests::ScriptedDialogs;
    use crate::core::persistence::MemoryStore;
    use crate::core::settings::Settings;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_event_names_round_trip() {
        for action in MenuAction::ALL {
            assert_eq!(MenuAction::from_event_name(action.event_name()), Some(action));
        }
        assert_eq!(MenuAction::from_event_name("toggle-theme"), Some(MenuAction::ToggleTheme));
        assert_eq!(MenuAction::from_event_name("menu-quit"), None);
        assert_eq!(
            serde_json::to_string(&MenuAction::TogglePreview).unwrap(),
            r#""toggle-preview""#
        );
    }

    #[test]
    fn test_listeners_receive_and_detach() {
        let seen: Rc<RefCell<Vec<MenuAction>>> = Rc::default();
        let mut listeners = MenuListeners::new();
        let sink = Rc::clone(&seen);
        listeners.on_menu_action(move |a| sink.borrow_mut().push(a));

        assert_eq!(listeners.emit_event("menu-save"), 1);
        assert_eq!(listeners.emit_event("menu-bogus"), 0);
        assert_eq!(*seen.borrow(), vec![MenuAction::Save]);

        listeners.remove_all_listeners();
        assert_eq!(listeners.listener_count(), 0);
        assert_eq!(listeners.emit(MenuAction::Export), 0);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_rebinding_after_teardown_does_not_double_handle() {
        let count = Rc::new(RefCell::new(0));
        let mut listeners = MenuListeners::new();
        for _ in 0..2 {
            listeners.remove_all_listeners();
            let c = Rc::clone(&count);
            listeners.on_menu_action(move |_| *c.borrow_mut() += 1);
        }
        listeners.emit(MenuAction::NewNote);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_dispatch_state_actions() {
        let mut ctl = AppController::open(MemoryStore::new(), Settings::default());
        let mut files = FileService::new(ScriptedDialogs::default());

        let MenuOutcome::NoteCreated(id) = dispatch_menu_action(&mut ctl, &mut files, MenuAction::NewNote) else {
            panic!("expected a new note");
        };
        assert_eq!(ctl.state().current_note_id, id);

        assert_eq!(
            dispatch_menu_action(&mut ctl, &mut files, MenuAction::ToggleTheme),
            MenuOutcome::ThemeChanged(Theme::NightOled)
        );
        assert_eq!(
            dispatch_menu_action(&mut ctl, &mut files, MenuAction::TogglePreview),
            MenuOutcome::EditorModeChanged(EditorMode::Split)
        );
    }

    #[test]
    fn test_dispatch_save_cancelled() {
        let mut ctl = AppController::open(MemoryStore::new(), Settings::default());
        let mut files = FileService::new(ScriptedDialogs::default());
        assert_eq!(
            dispatch_menu_action(&mut ctl, &mut files, MenuAction::Save),
            MenuOutcome::File(FileOperationResult::cancelled())
        );
        assert_eq!(
            dispatch_menu_action(&mut ctl, &mut files, MenuAction::Export),
            MenuOutcome::File(FileOperationResult::cancelled())
        );
        assert_eq!(files.dialogs().asked_names, vec!["untitled.md".to_string(), "export.md".to_string()]);
    }
}
