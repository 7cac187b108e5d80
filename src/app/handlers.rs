//! Input action handler methods for dualpane.
//!
//! This module implements [AppState] methods that process prompt input, viewer keys and the
//! navigation, file and system actions of the file manager.

use crate::app::keymap::{FileAction, NavAction, SystemAction, ViewerAction};
use crate::app::prompt::{Prompt, PromptEvent, PromptKind};
use crate::app::state::{AppState, KeypressResult};
use crate::app::viewer::Viewer;
use crate::core::fileops::{copy_entry, delete_entry, move_entry};
use crate::core::formatter::human_size;
use crate::core::input::Key;
use crate::utils::join_input_path;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// AppState input and action handlers
impl<'a> AppState<'a> {
    // Prompt

    pub(super) fn open_prompt(&mut self, kind: PromptKind) -> KeypressResult {
        self.prompt = Some(Prompt::new(kind));
        KeypressResult::Consumed
    }

    /// Feeds a key to the open prompt and runs the submitted command.
    pub(super) fn handle_prompt_key(&mut self, key: &Key) -> KeypressResult {
        let Some(prompt) = self.prompt.as_mut() else {
            return KeypressResult::Continue;
        };

        match prompt.feed(key) {
            PromptEvent::Pending => KeypressResult::Consumed,
            PromptEvent::Cancel => {
                if let Some(prompt) = self.prompt.take() {
                    match prompt.kind() {
                        PromptKind::GoToPath => self.set_status("Go to path cancelled"),
                        PromptKind::ConfirmDelete { .. } => self.set_status("Delete cancelled"),
                        PromptKind::Filter | PromptKind::Search | PromptKind::GoToLine => {}
                    }
                }
                KeypressResult::Consumed
            }
            PromptEvent::Submit(text) => {
                let Some(prompt) = self.prompt.take() else {
                    return KeypressResult::Consumed;
                };
                match prompt.kind() {
                    PromptKind::GoToPath => self.go_to_path(&text),
                    PromptKind::Filter => self.apply_filter(text),
                    PromptKind::Search => {
                        if let Some(viewer) = self.viewer.as_mut() {
                            viewer.set_search(text);
                        }
                    }
                    PromptKind::GoToLine => {
                        if let Some(viewer) = self.viewer.as_mut() {
                            viewer.go_to_line(&text);
                        }
                    }
                    PromptKind::ConfirmDelete {
                        target,
                        name,
                        is_dir,
                    } => {
                        if text.eq_ignore_ascii_case("y") {
                            self.delete_confirmed(target, name, *is_dir);
                        } else {
                            self.set_status("Delete cancelled");
                        }
                    }
                }
                KeypressResult::Consumed
            }
        }
    }

    // Viewer

    pub(super) fn handle_viewer_key(&mut self, key: &Key) -> KeypressResult {
        let height = self.layout.viewer_height;
        let Some(viewer) = self.viewer.as_mut() else {
            return KeypressResult::Continue;
        };

        // the hex dump closes on any key
        if viewer.is_binary() {
            return self.close_viewer();
        }

        let Some(action) = self.keymap.lookup_viewer(key) else {
            return KeypressResult::Continue;
        };

        match action {
            ViewerAction::ScrollUp => viewer.scroll_up(),
            ViewerAction::ScrollDown => viewer.scroll_down(),
            ViewerAction::PageUp => viewer.page(-1, height),
            ViewerAction::PageDown => viewer.page(1, height),
            ViewerAction::Top => viewer.to_top(),
            ViewerAction::Bottom => viewer.to_bottom(height),
            ViewerAction::NextMatch => viewer.next_match(),
            ViewerAction::PrevMatch => viewer.prev_match(),
            ViewerAction::Search => return self.open_prompt(PromptKind::Search),
            ViewerAction::GoToLine => return self.open_prompt(PromptKind::GoToLine),
            ViewerAction::Close => return self.close_viewer(),
        }
        KeypressResult::Consumed
    }

    fn open_viewer(&mut self, path: &Path) -> KeypressResult {
        match Viewer::open(path) {
            Ok(viewer) => {
                self.viewer = Some(viewer);
                KeypressResult::Redraw
            }
            Err(e) if e.kind() == io::ErrorKind::FileTooLarge => {
                let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
                log::warn!("refusing to view {}: {}", path.display(), e);
                self.set_status(format!(
                    "File too large to view: {} ({})",
                    display_name(path),
                    human_size(size)
                ));
                KeypressResult::Consumed
            }
            Err(e) => {
                log::warn!("cannot read {}: {}", path.display(), e);
                self.set_status(format!("Cannot read file: {}", path.display()));
                KeypressResult::Consumed
            }
        }
    }

    fn close_viewer(&mut self) -> KeypressResult {
        if let Some(viewer) = self.viewer.take() {
            self.set_status(format!("Closed file: {}", viewer.name()));
        }
        KeypressResult::Redraw
    }

    // Action handlers

    pub(super) fn handle_nav_action(&mut self, action: NavAction) -> KeypressResult {
        let visible = self.layout.list_rows;
        let active = self.active;

        match action {
            NavAction::GoUp => {
                self.panels[active].navigate(-1, visible);
            }
            NavAction::GoDown => {
                self.panels[active].navigate(1, visible);
            }
            NavAction::PageUp => self.panels[active].page(-1, visible),
            NavAction::PageDown => self.panels[active].page(1, visible),
            NavAction::GoToTop => self.panels[active].to_start(),
            NavAction::GoToBottom => self.panels[active].to_end(visible),
            NavAction::Open => return self.enter_selected(),
            NavAction::GoParent => self.go_parent(),
            NavAction::SwitchPanel => self.focus_panel(1 - active),
            NavAction::LeftPanel => self.focus_panel(0),
            NavAction::RightPanel => self.focus_panel(1),
            NavAction::GoToPath => return self.open_prompt(PromptKind::GoToPath),
            NavAction::Filter => return self.open_prompt(PromptKind::Filter),
            NavAction::NextMatch => self.next_search_result(),
            NavAction::ClearFilter => {
                self.panels[active].clear_filter();
                self.set_status("Search filter cleared");
            }
        }
        KeypressResult::Consumed
    }

    pub(super) fn handle_file_action(&mut self, action: FileAction) -> KeypressResult {
        match action {
            FileAction::Copy => self.copy_selected(),
            FileAction::Move => self.move_selected(),
            FileAction::Delete => return self.prompt_delete(),
        }
        KeypressResult::Consumed
    }

    pub(super) fn handle_sys_action(&mut self, action: SystemAction) -> KeypressResult {
        match action {
            SystemAction::Refresh => {
                self.reload_panel(0);
                self.reload_panel(1);
                self.set_status("Refreshed");
                KeypressResult::Consumed
            }
            SystemAction::Quit => {
                log::info!("quit requested");
                self.running = false;
                KeypressResult::Quit
            }
        }
    }

    // Navigation

    fn focus_panel(&mut self, idx: usize) {
        self.active = idx;
        let side = if idx == 0 { "left" } else { "right" };
        self.set_status(format!("Switched to {} panel", side));
    }

    fn enter_selected(&mut self) -> KeypressResult {
        let active = self.active;
        let Some(entry) = self.panels[active].selected_entry() else {
            return KeypressResult::Continue;
        };

        if entry.is_parent_link() {
            self.go_parent();
            return KeypressResult::Consumed;
        }

        let path = self.panels[active].path().join(entry.name());
        if !entry.is_dir() {
            return self.open_viewer(&path);
        }

        let target = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        let visible = self.layout.list_rows;
        match self.panels[active].change_dir(target.clone(), &self.formatter, None, visible) {
            Ok(()) => self.set_status(format!("Entered: {}", target.display())),
            Err(_) => self.set_status(format!("Cannot access directory: {}", path.display())),
        }
        KeypressResult::Consumed
    }

    /// Moves the active panel to its parent directory and focuses the directory it left.
    fn go_parent(&mut self) {
        let active = self.active;
        let Some(parent) = self.panels[active].path().parent().map(Path::to_path_buf) else {
            return;
        };
        let left = self.panels[active].dir_name();
        let visible = self.layout.list_rows;

        match self.panels[active].change_dir(
            parent.clone(),
            &self.formatter,
            left.as_deref(),
            visible,
        ) {
            Ok(()) => self.set_status(format!("Moved to: {}", parent.display())),
            Err(_) => self.set_status(format!("Cannot read directory: {}", parent.display())),
        }
    }

    fn go_to_path(&mut self, input: &str) {
        if input.is_empty() {
            self.set_status("Go to path cancelled");
            return;
        }

        let active = self.active;
        let visible = self.layout.list_rows;
        let requested = join_input_path(input, self.panels[active].path());

        let Ok(real) = fs::canonicalize(&requested) else {
            self.set_status(format!("Path not found: {}", requested.display()));
            return;
        };

        if real.is_dir() {
            match self.panels[active].change_dir(real.clone(), &self.formatter, None, visible) {
                Ok(()) => self.set_status(format!("Navigated to: {}", real.display())),
                Err(_) => self.set_status(format!("Cannot read directory: {}", real.display())),
            }
            return;
        }

        let (Some(dir), Some(file)) = (real.parent(), real.file_name()) else {
            self.set_status(format!("Path not found: {}", requested.display()));
            return;
        };
        match self.panels[active].change_dir(
            dir.to_path_buf(),
            &self.formatter,
            Some(file),
            visible,
        ) {
            Ok(()) => self.set_status(format!(
                "Navigated to: {} (selected: {})",
                dir.display(),
                file.to_string_lossy()
            )),
            Err(_) => self.set_status(format!("Cannot read directory: {}", dir.display())),
        }
    }

    // Filter

    fn apply_filter(&mut self, query: String) {
        let panel = &mut self.panels[self.active];
        if query.is_empty() {
            panel.clear_filter();
            self.set_status("Search cleared");
            return;
        }

        panel.set_filter(query);
        let count = panel.shown_len();
        let message = format!(
            "Filter: '{}' - Found {} matches (Esc to clear)",
            panel.filter(),
            count
        );
        self.set_status(message);
    }

    fn next_search_result(&mut self) {
        let visible = self.layout.list_rows;
        let panel = &mut self.panels[self.active];
        if panel.filter().is_empty() {
            self.set_status("No active search. Press / to search.");
            return;
        }

        let message = if panel.next_match(visible) {
            "Wrapped to first match".to_string()
        } else {
            let name = panel
                .selected_entry()
                .map(|e| e.name_str().into_owned())
                .unwrap_or_default();
            format!("Match: {}", name)
        };
        self.set_status(message);
    }

    // File operations

    /// Selected path and display name of the active panel, `None` for `..` or an empty list.
    fn selected_target(&self) -> Option<(PathBuf, String, bool)> {
        let panel = self.active_panel();
        let entry = panel.selected_entry().filter(|e| !e.is_parent_link())?;
        Some((
            panel.path().join(entry.name()),
            entry.name_str().into_owned(),
            entry.is_dir(),
        ))
    }

    fn copy_selected(&mut self) {
        let Some((src, name, _)) = self.selected_target() else {
            self.set_status("Cannot copy this item");
            return;
        };
        let other = 1 - self.active;
        let dest_dir = self.panels[other].path().to_path_buf();

        match copy_entry(&src, &dest_dir) {
            Ok(target) => {
                self.set_status(format!("Copied: {}", name));
                self.reload_panel(other);
                self.select_in(other, &target);
            }
            Err(e) => {
                log::warn!("copy {} failed: {}", src.display(), e);
                self.set_status(transfer_error(&e, "copy", &name));
            }
        }
    }

    fn move_selected(&mut self) {
        let Some((src, name, _)) = self.selected_target() else {
            self.set_status("Cannot move this item");
            return;
        };
        let other = 1 - self.active;
        let dest_dir = self.panels[other].path().to_path_buf();

        match move_entry(&src, &dest_dir) {
            Ok(target) => {
                self.set_status(format!("Moved: {}", name));
                self.reload_panel(0);
                self.reload_panel(1);
                self.select_in(other, &target);
            }
            Err(e) => {
                log::warn!("move {} failed: {}", src.display(), e);
                self.set_status(transfer_error(&e, "move", &name));
            }
        }
    }

    /// Puts the cursor of panel `idx` on the entry at `path`.
    fn select_in(&mut self, idx: usize, path: &Path) {
        if let Some(name) = path.file_name() {
            let visible = self.layout.list_rows;
            self.panels[idx].select_name(name, visible);
        }
    }

    fn prompt_delete(&mut self) -> KeypressResult {
        let Some((target, name, is_dir)) = self.selected_target() else {
            self.set_status("Cannot delete this item");
            return KeypressResult::Consumed;
        };
        self.open_prompt(PromptKind::ConfirmDelete {
            target,
            name,
            is_dir,
        })
    }

    fn delete_confirmed(&mut self, target: &Path, name: &str, is_dir: bool) {
        let use_trash = self.config.general().move_to_trash();

        match delete_entry(target, use_trash) {
            Ok(()) => {
                let message = if use_trash {
                    format!("Moved to trash: {}", name)
                } else if is_dir {
                    format!("Deleted directory: {}", name)
                } else {
                    format!("Deleted: {}", name)
                };
                self.set_status(message);
                self.reload_panel(self.active);
            }
            Err(e) => {
                log::warn!("delete {} failed: {}", target.display(), e);
                let message = if is_dir && !use_trash {
                    format!("Cannot delete (directory not empty?): {}", name)
                } else {
                    format!("Failed to delete: {}", name)
                };
                self.set_status(message);
            }
        }
    }
}

fn transfer_error(e: &io::Error, verb: &str, name: &str) -> String {
    if e.kind() == io::ErrorKind::AlreadyExists {
        format!("Destination already exists: {}", name)
    } else {
        format!("Failed to {}: {}", verb, name)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
