// fleet-core/src/controller/handlers/view_handler.rs
// Per-view navigation actions, loads, auto-refresh and clipboard shortcuts

use crate::controller::actions::{Command, NavAction, Payload};
use crate::controller::handlers::navigation_handler::Shortcut;
use crate::error::AppError;
use crate::model::{
    app_state::{DASHBOARD_MENU, Model},
    ui_state::{LoadingState, StatusMessage, ViewError},
    view_stack::ViewId,
};
use crate::util::humanize::format_interval;
use tracing::{debug, info, warn};

impl Model {
    /* ====================== Loading ====================== */

    /// First load of `view` after entering it.
    pub(crate) fn start_load(&mut self, view: ViewId) -> Command {
        self.begin_load(LoadingState::new(view))
    }

    /// Reload that keeps the focused row when it survives.
    pub(crate) fn reload(&mut self, view: ViewId) -> Command {
        if view == self.current_view() {
            self.capture_selection();
        }
        self.begin_load(LoadingState::with_message(view, view.refresh_message()))
    }

    fn begin_load(&mut self, loading: LoadingState) -> Command {
        let view = loading.view;
        if self.error.as_ref().is_some_and(|e| e.view == view) {
            self.error = None;
        }
        debug!(
            marker = "LOAD_DISPATCH",
            operation_type = "load",
            view = ?view,
            "{}",
            loading.message
        );
        self.loading = Some(loading);
        Command::Load(view)
    }

    pub(crate) fn on_loaded(&mut self, view: ViewId, result: Result<Payload, AppError>) -> Command {
        if self.loading.as_ref().is_some_and(|l| l.view == view) {
            self.loading = None;
        }

        match result {
            Ok(payload) => {
                info!(
                    marker = "LOAD_COMPLETE",
                    operation_type = "load",
                    view = ?view,
                    count = payload.len(),
                    "Loaded {} rows",
                    payload.len()
                );
                let query = self.query_for(view);
                match payload {
                    Payload::Instances(rows) => self.datasets.instances.replace(rows, &query),
                    Payload::Clusters(rows) => self.datasets.clusters.replace(rows, &query),
                    Payload::ScalingGroups(rows) => {
                        self.datasets.scaling_groups.replace(rows, &query);
                    }
                    Payload::NodeGroups(rows) => self.datasets.node_groups.replace(rows, &query),
                    Payload::Network(rows) => self.datasets.network.replace(rows, &query),
                }
                if self.error.as_ref().is_some_and(|e| e.view == view) {
                    self.error = None;
                }
                self.restore_selection(view);
            }
            Err(e) if e.is_cancelled() => {
                debug!(view = ?view, "Load cancelled; keeping previous rows");
            }
            Err(e) => {
                warn!(
                    marker = "LOAD_FAILED",
                    operation_type = "load",
                    view = ?view,
                    error = %e,
                    "Load failed"
                );
                self.error = Some(ViewError {
                    view,
                    message: e.to_string(),
                });
            }
        }
        Command::None
    }

    /* ==================== Auto-refresh ==================== */

    /// Commands to run before the first message is processed.
    pub fn startup(&mut self) -> Command {
        if !self.settings.auto_refresh_on_start {
            return Command::None;
        }
        let generation = self.auto_refresh.enable();
        Command::ScheduleAutoRefresh {
            generation,
            delay: self.auto_refresh.interval,
        }
    }

    pub(crate) fn toggle_auto_refresh(&mut self) -> Command {
        if self.auto_refresh.enabled {
            self.auto_refresh.disable();
            self.set_status(StatusMessage::info("Auto-refresh disabled"));
            return Command::None;
        }
        let generation = self.auto_refresh.enable();
        let interval = self.auto_refresh.interval;
        self.set_status(StatusMessage::success(format!(
            "Auto-refresh enabled ({})",
            format_interval(interval)
        )));
        Command::ScheduleAutoRefresh {
            generation,
            delay: interval,
        }
    }

    /// One tick of the tail-chained refresh timer. While enabled, every
    /// branch schedules the next tick.
    pub(crate) fn on_auto_refresh_tick(&mut self, generation: u64) -> Command {
        if !self.auto_refresh.is_current(generation) {
            debug!(generation, "Auto-refresh chain stopped");
            return Command::None;
        }
        let next = Command::ScheduleAutoRefresh {
            generation,
            delay: self.auto_refresh.interval,
        };

        let view = self.current_view();
        if self.is_loading() || self.modal.is_some() || !view.is_data_view() {
            return next;
        }
        self.reload(view).and(next)
    }

    /* ====================== Actions ====================== */

    pub(crate) fn handle_nav_action(&mut self, action: NavAction) -> Command {
        let view = self.current_view();
        match action {
            NavAction::Up
            | NavAction::Down
            | NavAction::PageUp
            | NavAction::PageDown
            | NavAction::Home
            | NavAction::End => {
                self.move_cursor(action);
                Command::None
            }
            NavAction::Back | NavAction::Left => {
                self.pop_view();
                Command::None
            }
            NavAction::Select | NavAction::Right => self.select(),
            NavAction::Search => self.begin_search(None),
            NavAction::Refresh => {
                if view.is_data_view() {
                    self.reload(view)
                } else {
                    self.set_status(StatusMessage::warning(
                        "Refresh not available for this view",
                    ));
                    Command::None
                }
            }
            NavAction::Help => {
                if view == ViewId::Help {
                    self.pop_view();
                } else {
                    self.push_view(ViewId::Help);
                }
                Command::None
            }
            NavAction::Quit => Command::Quit,
            NavAction::Scale => self.open_scaling(),
            NavAction::Shell => self.request_shell(),
            NavAction::Details => {
                self.show_details();
                Command::None
            }
            NavAction::Filter => {
                if view != ViewId::Instances {
                    return Command::None;
                }
                self.set_status(StatusMessage::info(
                    "Filter by: running, stopped, terminated",
                ));
                self.begin_search(Some("state:"))
            }
        }
    }

    pub(crate) fn handle_shortcut(&mut self, shortcut: Shortcut) -> Command {
        match shortcut {
            Shortcut::CopyKey => self.copy_selection(),
            Shortcut::CopyAddress => self.copy_private_ip(),
            Shortcut::ToggleAutoRefresh => self.toggle_auto_refresh(),
            Shortcut::LaunchTemplate => self.open_launch_template(),
        }
    }

    fn move_cursor(&mut self, action: NavAction) {
        let len = self.visible_len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let last = len - 1;
        let page = self.settings.page_size.max(1);
        self.cursor = match action {
            NavAction::Up => self.cursor.saturating_sub(1),
            NavAction::Down => (self.cursor + 1).min(last),
            NavAction::PageUp => self.cursor.saturating_sub(page),
            NavAction::PageDown => (self.cursor + page).min(last),
            NavAction::Home => 0,
            NavAction::End => last,
            _ => self.cursor,
        };
        self.error = None;
    }

    fn select(&mut self) -> Command {
        match self.current_view() {
            ViewId::Dashboard => {
                let Some(item) = DASHBOARD_MENU.get(self.cursor) else {
                    return Command::None;
                };
                self.push_view(item.view);
                if item.view.is_data_view() {
                    self.start_load(item.view)
                } else {
                    Command::None
                }
            }
            ViewId::Clusters => {
                let Some(name) = self
                    .datasets
                    .clusters
                    .visible(self.cursor)
                    .map(|c| c.name.clone())
                else {
                    return Command::None;
                };
                self.push_view(ViewId::NodeGroups);
                self.search
                    .set_saved(ViewId::NodeGroups, format!("cluster:{name}"));
                self.refilter(ViewId::NodeGroups);
                self.begin_load(LoadingState::with_message(
                    ViewId::NodeGroups,
                    format!("Loading node groups for {name}..."),
                ))
            }
            ViewId::Instances => self.request_shell(),
            ViewId::ScalingGroups | ViewId::NodeGroups => self.open_scaling(),
            ViewId::NetworkInterfaces | ViewId::Help => Command::None,
        }
    }

    /// Hands the focused running instance to the shell session runner.
    fn request_shell(&mut self) -> Command {
        if self.current_view() != ViewId::Instances {
            return Command::None;
        }
        let Some(instance) = self.datasets.instances.visible(self.cursor) else {
            return Command::None;
        };
        if !instance.is_running() {
            let message = format!(
                "instance {} is not running (state: {})",
                instance.display_name(),
                instance.state
            );
            self.set_view_error(message);
            return Command::None;
        }

        info!(
            marker = "SHELL_HANDOFF",
            operation_type = "shell",
            instance_id = %instance.id,
            "Scheduling session after exit"
        );
        self.pending_handoff = Some(self.shell().prepare(&instance.id));
        Command::Quit
    }

    fn show_details(&mut self) {
        let cursor = self.cursor;
        let message = match self.current_view() {
            ViewId::Instances => self
                .datasets
                .instances
                .visible(cursor)
                .map(|i| format!("Instance {} details: {}", i.id, i.state)),
            ViewId::Clusters => self
                .datasets
                .clusters
                .visible(cursor)
                .map(|c| format!("Cluster {} details: {}", c.name, c.status)),
            ViewId::ScalingGroups => self
                .datasets
                .scaling_groups
                .visible(cursor)
                .map(|g| format!("ASG {} details: {} instances", g.name, g.capacity.desired)),
            ViewId::NodeGroups => self
                .datasets
                .node_groups
                .visible(cursor)
                .map(|g| format!("Node group {} details: {}", g.name, g.status)),
            ViewId::NetworkInterfaces => self.datasets.network.visible(cursor).map(|n| {
                format!(
                    "Instance {} interfaces: {} total",
                    n.instance_id,
                    n.interfaces.len()
                )
            }),
            ViewId::Dashboard | ViewId::Help => None,
        };
        if let Some(message) = message {
            self.set_status(StatusMessage::info(message));
        }
    }

    /* ===================== Clipboard ===================== */

    fn copy_selection(&mut self) -> Command {
        let cursor = self.cursor;
        let selected = match self.current_view() {
            ViewId::Instances => self
                .datasets
                .instances
                .visible(cursor)
                .map(|i| ("Instance ID", i.id.clone())),
            ViewId::Clusters => self
                .datasets
                .clusters
                .visible(cursor)
                .map(|c| ("Cluster Name", c.name.clone())),
            ViewId::ScalingGroups => self
                .datasets
                .scaling_groups
                .visible(cursor)
                .map(|g| ("ASG Name", g.name.clone())),
            ViewId::NodeGroups => self
                .datasets
                .node_groups
                .visible(cursor)
                .map(|g| ("Node Group", g.qualified_name())),
            ViewId::NetworkInterfaces => self
                .datasets
                .network
                .visible(cursor)
                .map(|n| ("Instance ID", n.instance_id.clone())),
            ViewId::Dashboard | ViewId::Help => None,
        };
        match selected {
            Some((label, value)) => Command::WriteClipboard {
                label: label.to_string(),
                value,
            },
            None => {
                self.set_status(StatusMessage::error("Copy failed: nothing selected"));
                Command::None
            }
        }
    }

    fn copy_private_ip(&mut self) -> Command {
        let Some(instance) = self.datasets.instances.visible(self.cursor) else {
            self.set_status(StatusMessage::error("No instance selected"));
            return Command::None;
        };
        match instance.private_ip.as_deref().filter(|ip| !ip.is_empty()) {
            Some(ip) => Command::WriteClipboard {
                label: "IP".to_string(),
                value: ip.to_string(),
            },
            None => {
                self.set_status(StatusMessage::error("No private IP available"));
                Command::None
            }
        }
    }

    pub(crate) fn on_clipboard_written(
        &mut self,
        label: &str,
        value: &str,
        result: Result<(), AppError>,
    ) -> Command {
        match result {
            Ok(()) => self.set_status(StatusMessage::success(format!("Copied {label}: {value}"))),
            Err(e) => {
                warn!(error = %e, "Clipboard write failed");
                self.set_status(StatusMessage::error(format!("Copy failed: {e}")));
            }
        }
        Command::None
    }
}
