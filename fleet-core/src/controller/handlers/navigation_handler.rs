// fleet-core/src/controller/handlers/navigation_handler.rs
// Keystroke to navigation action mapping with vim keys and sequences

use crate::controller::actions::NavAction;
use crate::model::view_stack::ViewId;
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::HashMap;
use tracing::trace;

use super::*;

/// View-local keys that sit outside the navigation vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// `y`: copy the row's natural key.
    CopyKey,
    /// `Y`: copy the instance's private address.
    CopyAddress,
    /// `a`: toggle auto-refresh.
    ToggleAutoRefresh,
    /// `u`/`U`: open the launch template picker.
    LaunchTemplate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Action(NavAction),
    Shortcut(Shortcut),
    /// First `g` of the `g g` chord; wait for the next key.
    Pending,
    /// First `q` outside the root view.
    ConfirmQuit,
    /// `esc` while a quit confirmation was pending.
    QuitDeclined,
    Unbound,
}

pub struct Navigator {
    global: HashMap<KeyEvent, NavAction>,
    per_view: HashMap<ViewId, HashMap<KeyEvent, NavAction>>,
    shortcuts: HashMap<ViewId, HashMap<KeyEvent, Shortcut>>,
    sequence_buffer: Vec<KeyEvent>,
    quit_armed: bool,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        let mut global = HashMap::with_capacity(32);

        // Global controls
        global.insert(ctrl('c'), NavAction::Quit);
        global.insert(key('q'), NavAction::Quit);
        global.insert(key('?'), NavAction::Help);
        global.insert(key('/'), NavAction::Search);
        global.insert(key('r'), NavAction::Refresh);
        global.insert(ctrl('r'), NavAction::Refresh);
        global.insert(escape_key(), NavAction::Back);
        global.insert(backspace_key(), NavAction::Back);

        // Arrow keys
        global.insert(arrow_key(KeyCode::Up), NavAction::Up);
        global.insert(arrow_key(KeyCode::Down), NavAction::Down);
        global.insert(arrow_key(KeyCode::Left), NavAction::Left);
        global.insert(arrow_key(KeyCode::Right), NavAction::Right);

        // Page navigation
        global.insert(arrow_key(KeyCode::PageUp), NavAction::PageUp);
        global.insert(arrow_key(KeyCode::PageDown), NavAction::PageDown);
        global.insert(arrow_key(KeyCode::Home), NavAction::Home);
        global.insert(arrow_key(KeyCode::End), NavAction::End);

        // Vim keys
        global.insert(key('k'), NavAction::Up);
        global.insert(key('j'), NavAction::Down);
        global.insert(key('h'), NavAction::Left);
        global.insert(key('l'), NavAction::Right);
        global.insert(key('G'), NavAction::End);

        // Ctrl combinations
        global.insert(ctrl('u'), NavAction::PageUp);
        global.insert(ctrl('d'), NavAction::PageDown);

        // Entry actions
        global.insert(enter_key(), NavAction::Select);
        global.insert(key(' '), NavAction::Select);

        let mut per_view: HashMap<ViewId, HashMap<KeyEvent, NavAction>> = HashMap::new();
        per_view.insert(
            ViewId::Instances,
            HashMap::from([
                (enter_key(), NavAction::Shell),
                (key(' '), NavAction::Shell),
                (key('d'), NavAction::Details),
                (key('f'), NavAction::Filter),
            ]),
        );
        per_view.insert(
            ViewId::Clusters,
            HashMap::from([(key('d'), NavAction::Details)]),
        );
        for view in [ViewId::ScalingGroups, ViewId::NodeGroups] {
            per_view.insert(
                view,
                HashMap::from([
                    (enter_key(), NavAction::Scale),
                    (key(' '), NavAction::Scale),
                    (key('d'), NavAction::Details),
                ]),
            );
        }
        per_view.insert(
            ViewId::NetworkInterfaces,
            HashMap::from([(key('d'), NavAction::Details)]),
        );

        let mut shortcuts: HashMap<ViewId, HashMap<KeyEvent, Shortcut>> = HashMap::new();
        for view in ViewId::DATA_VIEWS {
            let mut table = HashMap::from([
                (key('y'), Shortcut::CopyKey),
                (key('a'), Shortcut::ToggleAutoRefresh),
            ]);
            match view {
                ViewId::Instances => {
                    table.insert(key('Y'), Shortcut::CopyAddress);
                }
                ViewId::NodeGroups => {
                    table.insert(key('u'), Shortcut::LaunchTemplate);
                    table.insert(key('U'), Shortcut::LaunchTemplate);
                }
                _ => {}
            }
            shortcuts.insert(view, table);
        }

        Self {
            global,
            per_view,
            shortcuts,
            sequence_buffer: Vec::with_capacity(2),
            quit_armed: false,
        }
    }

    #[must_use]
    pub const fn quit_armed(&self) -> bool {
        self.quit_armed
    }

    /// Drops any half-typed chord and pending quit confirmation.
    pub fn reset(&mut self) {
        self.sequence_buffer.clear();
        self.quit_armed = false;
    }

    pub fn resolve(&mut self, key_event: KeyEvent, view: ViewId, at_root: bool) -> NavOutcome {
        let key_event = normalize(key_event);
        trace!(
            marker = "NAVIGATOR_KEY_EVENT",
            operation_type = "input_handling",
            view = ?view,
            "Navigator: key {:?}",
            key_event
        );

        if key_event == ctrl('c') {
            self.reset();
            return NavOutcome::Action(NavAction::Quit);
        }

        if std::mem::take(&mut self.quit_armed) {
            if key_event == key('q') {
                return NavOutcome::Action(NavAction::Quit);
            }
            if key_event == escape_key() {
                return NavOutcome::QuitDeclined;
            }
        }

        if let Some(outcome) = self.check_sequences(key_event) {
            return outcome;
        }

        if let Some(shortcut) = self
            .shortcuts
            .get(&view)
            .and_then(|table| table.get(&key_event))
        {
            return NavOutcome::Shortcut(*shortcut);
        }

        let action = self
            .per_view
            .get(&view)
            .and_then(|table| table.get(&key_event))
            .or_else(|| self.global.get(&key_event))
            .copied();

        match action {
            Some(NavAction::Quit) if !at_root => {
                self.quit_armed = true;
                NavOutcome::ConfirmQuit
            }
            Some(action) => NavOutcome::Action(action),
            None => NavOutcome::Unbound,
        }
    }

    /// Footer hints for `view`, read from the same tables `resolve` uses.
    #[must_use]
    pub fn key_hints(&self, view: ViewId) -> Vec<(&'static str, &'static str)> {
        let candidates = [
            (enter_key(), "enter"),
            (key('u'), "u"),
            (key('y'), "y"),
            (key('Y'), "Y"),
            (key('d'), "d"),
            (key('a'), "a"),
            (key('/'), "/"),
            (key('r'), "r"),
            (escape_key(), "esc"),
            (key('?'), "?"),
            (key('q'), "q"),
        ];

        let mut hints = Vec::with_capacity(candidates.len());
        for (key_event, label) in candidates {
            if let Some(shortcut) = self
                .shortcuts
                .get(&view)
                .and_then(|table| table.get(&key_event))
            {
                hints.push((label, shortcut_label(*shortcut)));
                continue;
            }
            let action = self
                .per_view
                .get(&view)
                .and_then(|table| table.get(&key_event))
                .or_else(|| self.global.get(&key_event));
            match action {
                Some(NavAction::Search | NavAction::Refresh) if !view.is_data_view() => {}
                Some(NavAction::Select) if view == ViewId::Help => {}
                Some(action) => hints.push((label, action_label(*action, view))),
                None => {}
            }
        }
        hints
    }

    fn check_sequences(&mut self, key_event: KeyEvent) -> Option<NavOutcome> {
        if key_event != key('g') {
            self.sequence_buffer.clear();
            return None;
        }

        self.sequence_buffer.push(key_event);
        match self.sequence_buffer.as_slice() {
            [
                KeyEvent {
                    code: KeyCode::Char('g'),
                    ..
                },
                KeyEvent {
                    code: KeyCode::Char('g'),
                    ..
                },
            ] => {
                self.sequence_buffer.clear();
                Some(NavOutcome::Action(NavAction::Home))
            }
            _ => Some(NavOutcome::Pending),
        }
    }
}

const fn action_label(action: NavAction, view: ViewId) -> &'static str {
    match action {
        NavAction::Select => match view {
            ViewId::Dashboard => "open",
            ViewId::Clusters => "node groups",
            _ => "select",
        },
        NavAction::Shell => "connect",
        NavAction::Scale => "scale",
        NavAction::Details => "details",
        NavAction::Filter => "filter",
        NavAction::Search => "search",
        NavAction::Refresh => "refresh",
        NavAction::Back => "back",
        NavAction::Help => "help",
        NavAction::Quit => "quit",
        NavAction::Up
        | NavAction::Down
        | NavAction::Left
        | NavAction::Right
        | NavAction::PageUp
        | NavAction::PageDown
        | NavAction::Home
        | NavAction::End => "move",
    }
}

const fn shortcut_label(shortcut: Shortcut) -> &'static str {
    match shortcut {
        Shortcut::CopyKey => "copy",
        Shortcut::CopyAddress => "copy ip",
        Shortcut::ToggleAutoRefresh => "auto",
        Shortcut::LaunchTemplate => "template",
    }
}
