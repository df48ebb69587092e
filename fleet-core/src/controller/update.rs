//! src/controller/update.rs
//! ============================================================================
//! # Model::update: the single place where state changes
//!
//! Each `Message` is applied in arrival order and yields a `Command` for the
//! event loop. Keys flow through the open modal, then the search prompt,
//! then saved-query clearing, then the navigator. The cursor is re-clamped
//! after every message so the renderer can index without checks.

use crate::controller::actions::{Command, Message};
use crate::controller::handlers::{
    is_interrupt, is_press,
    navigation_handler::NavOutcome,
};
use crate::model::{app_state::Model, modal::Modal, ui_state::StatusMessage};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, instrument, trace};

impl Model {
    #[instrument(level = "trace", skip_all)]
    pub fn update(&mut self, message: Message) -> Command {
        let command = match message {
            Message::Key(key_event) => self.handle_key(key_event),
            Message::Resize { width, height } => {
                trace!(width, height, "Terminal resized");
                self.size.width = width;
                self.size.height = height;
                Command::None
            }
            Message::Shutdown => {
                debug!("Shutdown requested");
                Command::Quit
            }
            Message::Loaded { view, result } => self.on_loaded(view, result),
            Message::SearchDebounceFired { view, generation } => {
                self.on_search_debounce(view, generation)
            }
            Message::AutoRefreshTick { generation } => self.on_auto_refresh_tick(generation),
            Message::ScaleFinished {
                ticket,
                target,
                result,
            } => self.on_scale_finished(ticket, target, result),
            Message::LaunchTemplateVersionsLoaded { ticket, result } => {
                self.on_launch_template_versions(ticket, result)
            }
            Message::LaunchTemplateUpdated {
                ticket,
                version,
                result,
            } => self.on_launch_template_updated(ticket, version, result),
            Message::ClipboardWritten {
                label,
                value,
                result,
            } => self.on_clipboard_written(&label, &value, result),
        };
        self.clamp_cursor();
        command
    }

    fn handle_key(&mut self, key_event: KeyEvent) -> Command {
        if !is_press(&key_event) {
            return Command::None;
        }
        if is_interrupt(&key_event) {
            debug!("Ctrl+C: quitting");
            return Command::Quit;
        }

        match &self.modal {
            Some(Modal::Scaling(_)) => return self.handle_scaling_key(key_event),
            Some(Modal::LaunchTemplate(_)) => return self.handle_launch_template_key(key_event),
            None => {}
        }

        if self.search.is_editing() {
            if let Some(command) = self.handle_search_key(key_event) {
                return command;
            }
        }

        let view = self.current_view();
        if key_event.code == KeyCode::Esc
            && key_event.modifiers == KeyModifiers::NONE
            && !self.search.is_editing()
            && !self.navigator.quit_armed()
            && !self.search.saved(view).trim().is_empty()
        {
            self.clear_search(view);
            return Command::None;
        }

        let at_root = self.stack.is_root();
        match self.navigator.resolve(key_event, view, at_root) {
            NavOutcome::Action(action) => {
                if self
                    .status
                    .as_ref()
                    .is_some_and(|s| s.text.as_str() == QUIT_PROMPT)
                {
                    self.status = None;
                }
                self.handle_nav_action(action)
            }
            NavOutcome::Shortcut(shortcut) => self.handle_shortcut(shortcut),
            NavOutcome::ConfirmQuit => {
                self.set_status(StatusMessage::warning(QUIT_PROMPT));
                Command::None
            }
            NavOutcome::QuitDeclined => {
                self.status = None;
                Command::None
            }
            NavOutcome::Pending | NavOutcome::Unbound => Command::None,
        }
    }
}

pub const QUIT_PROMPT: &str = "press q again to quit, esc to stay";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::shell::ShellHandoff;
    use crate::controller::actions::Payload;
    use crate::error::AppError;
    use crate::model::app_state::{CloudContext, Settings};
    use crate::model::resources::{Instance, InstanceState, Tags};
    use crate::model::view_stack::ViewId;
    use std::time::Duration;

    fn model() -> Model {
        Model::new(
            CloudContext::default(),
            Settings::default(),
            ShellHandoff::default(),
        )
    }

    fn instance(id: &str, name: &str, state: &str, env: &str) -> Instance {
        let mut tags = Tags::new();
        tags.insert("Name".into(), name.into());
        tags.insert("Env".into(), env.into());
        Instance {
            id: id.into(),
            name: name.into(),
            state: InstanceState::parse(state),
            private_ip: Some(format!("10.0.0.{}", id.len())),
            public_ip: None,
            private_dns: None,
            public_dns: None,
            instance_type: "t3.micro".into(),
            availability_zone: "us-east-1a".into(),
            tags,
            launch_time: None,
            instance_profile: None,
            security_groups: Default::default(),
        }
    }

    fn fleet() -> Vec<Instance> {
        vec![
            instance("i-1", "web-1", "running", "prod"),
            instance("i-2", "web-2", "running", "prod"),
            instance("i-3", "batch", "stopped", "prod"),
        ]
    }

    fn key(code: KeyCode) -> Message {
        Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press(m: &mut Model, code: KeyCode) -> Command {
        m.update(key(code))
    }

    fn type_str(m: &mut Model, text: &str) {
        for c in text.chars() {
            press(m, KeyCode::Char(c));
        }
    }

    fn instances_model() -> Model {
        let mut m = model();
        m.push_view(ViewId::Instances);
        m.update(Message::Loaded {
            view: ViewId::Instances,
            result: Ok(Payload::Instances(fleet())),
        });
        m
    }

    fn status_text(m: &Model) -> String {
        m.status.as_ref().map(|s| s.text.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_quit_confirmation() {
        let mut m = model();
        assert!(press(&mut m, KeyCode::Char('q')).is_quit());

        let mut m = model();
        m.push_view(ViewId::Instances);
        assert!(!press(&mut m, KeyCode::Char('q')).is_quit());
        assert_eq!(status_text(&m), QUIT_PROMPT);
        assert!(press(&mut m, KeyCode::Char('q')).is_quit());
    }

    #[test]
    fn test_quit_prompt_cleared_by_esc() {
        let mut m = model();
        m.push_view(ViewId::Instances);
        press(&mut m, KeyCode::Char('q'));
        press(&mut m, KeyCode::Esc);
        assert!(m.status.is_none());
        assert_eq!(m.current_view(), ViewId::Instances);
        assert!(!press(&mut m, KeyCode::Char('q')).is_quit());
    }

    #[test]
    fn test_ctrl_c_quits_inside_modal_and_search() {
        let mut m = instances_model();
        press(&mut m, KeyCode::Char('/'));
        let ctrl_c = Message::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(m.update(ctrl_c).is_quit());
    }

    #[test]
    fn test_leaving_a_view_drops_its_search_edit() {
        let mut m = instances_model();
        press(&mut m, KeyCode::Char('/'));
        type_str(&mut m, "web");
        assert_eq!(m.datasets.visible_len(ViewId::Instances), 2);

        press(&mut m, KeyCode::Left);
        assert_eq!(m.current_view(), ViewId::Dashboard);
        assert!(!m.search.is_editing());
        assert_eq!(m.search.saved(ViewId::Instances), "");
        assert_eq!(m.datasets.visible_len(ViewId::Instances), 3);

        press(&mut m, KeyCode::Char('j'));
        assert_eq!(m.cursor, 1);
        assert!(press(&mut m, KeyCode::Char('q')).is_quit());
    }

    #[test]
    fn test_filter_instances_by_tag_and_state() {
        let mut m = instances_model();
        m.cursor = 2;
        press(&mut m, KeyCode::Char('/'));
        type_str(&mut m, "state:running tag:Env=prod");
        press(&mut m, KeyCode::Enter);
        assert_eq!(m.visible_len(), 2);
        assert_eq!(m.cursor, 0);
    }

    #[test]
    fn test_shell_requires_running_instance() {
        let mut m = instances_model();
        press(&mut m, KeyCode::Char('G'));
        assert_eq!(m.cursor, 2);
        let command = press(&mut m, KeyCode::Enter);
        assert!(!command.is_quit());
        assert!(m.pending_handoff.is_none());
        assert_eq!(m.current_view(), ViewId::Instances);
        assert_eq!(
            m.view_error().map(|e| e.message.as_str()),
            Some("instance batch is not running (state: stopped)")
        );

        press(&mut m, KeyCode::Up);
        assert!(m.view_error().is_none());
    }

    #[test]
    fn test_shell_on_running_instance_quits_with_pending_session() {
        let mut m = instances_model();
        let command = press(&mut m, KeyCode::Enter);
        assert!(command.is_quit());
        let session = m.take_pending_handoff().map(|s| s.instance_id);
        assert_eq!(session.as_deref(), Some("i-1"));
    }

    #[test]
    fn test_cursor_clamped_after_every_message() {
        let mut m = instances_model();
        press(&mut m, KeyCode::End);
        assert_eq!(m.cursor, 2);
        m.update(Message::Loaded {
            view: ViewId::Instances,
            result: Ok(Payload::Instances(vec![instance("i-9", "x", "running", "dev")])),
        });
        assert_eq!(m.cursor, 0);
        m.update(Message::Loaded {
            view: ViewId::Instances,
            result: Ok(Payload::Instances(Vec::new())),
        });
        assert_eq!(m.cursor, 0);
        press(&mut m, KeyCode::Down);
        assert_eq!(m.cursor, 0);
    }

    #[test]
    fn test_push_then_pop_restores_view() {
        let mut m = instances_model();
        m.cursor = 1;
        let stack = m.stack.clone();
        press(&mut m, KeyCode::Char('?'));
        assert_eq!(m.current_view(), ViewId::Help);
        press(&mut m, KeyCode::Char('?'));
        assert_eq!(m.stack, stack);
        assert_eq!(m.cursor, 1);
    }

    #[test]
    fn test_dashboard_select_pushes_and_loads() {
        let mut m = model();
        press(&mut m, KeyCode::Down);
        press(&mut m, KeyCode::Down);
        let command = press(&mut m, KeyCode::Enter);
        assert_eq!(m.current_view(), ViewId::ScalingGroups);
        assert_eq!(command, Command::Load(ViewId::ScalingGroups));
        assert!(m.current_loading().is_some());
    }

    #[test]
    fn test_failed_load_surfaces_and_cancel_keeps_rows() {
        let mut m = instances_model();
        press(&mut m, KeyCode::Char('r'));
        m.update(Message::Loaded {
            view: ViewId::Instances,
            result: Err(AppError::Cancelled),
        });
        assert!(!m.is_loading());
        assert_eq!(m.visible_len(), 3);
        assert!(m.view_error().is_none());

        press(&mut m, KeyCode::Char('r'));
        m.update(Message::Loaded {
            view: ViewId::Instances,
            result: Err(AppError::cloud("DescribeInstances", "expired token")),
        });
        assert!(
            m.view_error()
                .is_some_and(|e| e.message.contains("expired token"))
        );
    }

    #[test]
    fn test_refresh_outside_data_view() {
        let mut m = model();
        assert!(press(&mut m, KeyCode::Char('r')).is_none());
        assert_eq!(status_text(&m), "Refresh not available for this view");
    }

    #[test]
    fn test_auto_refresh_tick_always_reschedules() {
        let mut m = instances_model();
        let Command::ScheduleAutoRefresh { generation, delay } =
            press(&mut m, KeyCode::Char('a'))
        else {
            panic!("expected auto-refresh schedule");
        };
        assert_eq!(delay, Duration::from_secs(30));
        assert_eq!(status_text(&m), "Auto-refresh enabled (30s)");

        let next = Command::ScheduleAutoRefresh { generation, delay };

        // Idle data view: reload and reschedule.
        let command = m.update(Message::AutoRefreshTick { generation });
        assert!(command.contains(&Command::Load(ViewId::Instances)));
        assert!(command.contains(&next));

        // Load in flight: reschedule only.
        let command = m.update(Message::AutoRefreshTick { generation });
        assert_eq!(command, next);

        // Non-data view: reschedule only.
        m.update(Message::Loaded {
            view: ViewId::Instances,
            result: Ok(Payload::Instances(fleet())),
        });
        press(&mut m, KeyCode::Char('?'));
        let command = m.update(Message::AutoRefreshTick { generation });
        assert_eq!(command, next);

        // Disabled: the chain stops.
        press(&mut m, KeyCode::Char('?'));
        press(&mut m, KeyCode::Char('a'));
        assert!(m.update(Message::AutoRefreshTick { generation }).is_none());
    }

    #[test]
    fn test_auto_refresh_restores_focused_row() {
        let mut m = instances_model();
        let Command::ScheduleAutoRefresh { generation, .. } = press(&mut m, KeyCode::Char('a'))
        else {
            panic!("expected auto-refresh schedule");
        };
        m.update(Message::AutoRefreshTick { generation });
        let mut reordered = fleet();
        reordered.reverse();
        m.update(Message::Loaded {
            view: ViewId::Instances,
            result: Ok(Payload::Instances(reordered)),
        });
        assert_eq!(m.cursor, 2);
        assert_eq!(m.current_selection_key().as_deref(), Some("i-1"));
    }

    #[test]
    fn test_copy_shortcuts() {
        let mut m = instances_model();
        assert_eq!(
            press(&mut m, KeyCode::Char('y')),
            Command::WriteClipboard {
                label: "Instance ID".into(),
                value: "i-1".into()
            }
        );
        m.update(Message::ClipboardWritten {
            label: "Instance ID".into(),
            value: "i-1".into(),
            result: Ok(()),
        });
        assert_eq!(status_text(&m), "Copied Instance ID: i-1");

        let shifted = Message::Key(KeyEvent::new(KeyCode::Char('Y'), KeyModifiers::SHIFT));
        assert!(matches!(
            m.update(shifted),
            Command::WriteClipboard { ref label, .. } if label == "IP"
        ));
    }

    #[test]
    fn test_cluster_drill_down_presets_query() {
        let mut m = model();
        m.push_view(ViewId::Clusters);
        m.update(Message::Loaded {
            view: ViewId::Clusters,
            result: Ok(Payload::Clusters(vec![crate::model::resources::Cluster {
                name: "prod".into(),
                status: "ACTIVE".into(),
                version: "1.30".into(),
                arn: "arn-prod".into(),
            }])),
        });
        let command = press(&mut m, KeyCode::Enter);
        assert_eq!(command, Command::Load(ViewId::NodeGroups));
        assert_eq!(m.current_view(), ViewId::NodeGroups);
        assert_eq!(m.search.saved(ViewId::NodeGroups), "cluster:prod");
        assert_eq!(
            m.current_loading().map(|l| l.message.as_str()),
            Some("Loading node groups for prod...")
        );
    }

    #[test]
    fn test_details_status() {
        let mut m = instances_model();
        press(&mut m, KeyCode::Char('d'));
        assert_eq!(status_text(&m), "Instance i-1 details: running");
    }

    #[test]
    fn test_startup_arms_auto_refresh_when_configured() {
        let mut m = model();
        assert!(m.startup().is_none());

        let mut m = Model::new(
            CloudContext::default(),
            Settings {
                auto_refresh_on_start: true,
                ..Settings::default()
            },
            ShellHandoff::default(),
        );
        let command = m.startup();
        assert!(m.auto_refresh.enabled);
        assert!(matches!(
            command,
            Command::ScheduleAutoRefresh { delay, .. } if delay == Duration::from_secs(30)
        ));
    }
}
