// fleet-core/src/controller/handlers/scaling_handler.rs
// Capacity prompt for scaling groups and node groups

use crate::controller::actions::Command;
use crate::error::AppError;
use crate::model::{
    app_state::Model,
    modal::{Modal, ModalTarget, ScalingModal, ScalingPhase},
    ui_state::StatusMessage,
    view_stack::ViewId,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

impl Model {
    /// Opens the capacity prompt for the focused scaling group or node group.
    pub(crate) fn open_scaling(&mut self) -> Command {
        let ticket = self.issue_ticket();
        let modal = match self.current_view() {
            ViewId::ScalingGroups => self
                .datasets
                .scaling_groups
                .visible(self.cursor)
                .map(|group| ScalingModal::for_scaling_group(ticket, group)),
            ViewId::NodeGroups => self
                .datasets
                .node_groups
                .visible(self.cursor)
                .map(|group| ScalingModal::for_node_group(ticket, group)),
            _ => None,
        };
        if let Some(modal) = modal {
            debug!(
                marker = "SCALING_MODAL_OPEN",
                operation_type = "modal",
                ticket,
                target = %modal.target.display_name(),
                "ScalingHandler: opened capacity prompt"
            );
            self.status = None;
            self.modal = Some(Modal::Scaling(modal));
        }
        Command::None
    }

    pub(crate) fn handle_scaling_key(&mut self, key_event: KeyEvent) -> Command {
        let Some(Modal::Scaling(modal)) = self.modal.as_mut() else {
            return Command::None;
        };

        match modal.phase {
            ScalingPhase::Submitting { .. } => {
                if key_event.code == KeyCode::Esc {
                    debug!(
                        ticket = modal.ticket,
                        "ScalingHandler: prompt closed while request in flight"
                    );
                    self.modal = None;
                }
                Command::None
            }
            ScalingPhase::Confirming => match key_event.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                    let request = modal.submit(0);
                    Command::Scale {
                        ticket: modal.ticket,
                        target: modal.target.clone(),
                        request,
                    }
                }
                KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                    self.modal = None;
                    self.set_status(StatusMessage::info("Operation cancelled"));
                    Command::None
                }
                _ => Command::None,
            },
            ScalingPhase::Editing => match key_event.code {
                KeyCode::Esc => {
                    self.modal = None;
                    Command::None
                }
                KeyCode::Char('u') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                    modal.clear_input();
                    Command::None
                }
                KeyCode::Backspace => {
                    modal.backspace();
                    Command::None
                }
                KeyCode::Enter => {
                    let Some(desired) = modal.parse_desired() else {
                        return Command::None;
                    };
                    if desired == 0 {
                        modal.phase = ScalingPhase::Confirming;
                        modal.error = None;
                        return Command::None;
                    }
                    let request = modal.submit(desired);
                    info!(
                        marker = "SCALE_REQUESTED",
                        operation_type = "scale",
                        target = %modal.target.display_name(),
                        min = request.min,
                        max = request.max,
                        desired = request.desired,
                        "ScalingHandler: submitting capacity change"
                    );
                    Command::Scale {
                        ticket: modal.ticket,
                        target: modal.target.clone(),
                        request,
                    }
                }
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    modal.push_digit(c);
                    Command::None
                }
                _ => Command::None,
            },
        }
    }

    pub(crate) fn on_scale_finished(
        &mut self,
        ticket: u64,
        target: ModalTarget,
        result: Result<(), AppError>,
    ) -> Command {
        let Some(Modal::Scaling(modal)) = self.modal.as_mut().filter(|m| m.ticket() == ticket)
        else {
            match result {
                Ok(()) => debug!(ticket, "ScalingHandler: result for closed prompt dropped"),
                Err(e) => warn!(
                    ticket,
                    target = %target.display_name(),
                    error = %e,
                    "ScalingHandler: failure for closed prompt dropped"
                ),
            }
            return Command::None;
        };

        match result {
            Ok(()) => {
                let desired = match modal.phase {
                    ScalingPhase::Submitting { desired } => desired,
                    _ => modal.capacity.desired,
                };
                let message = format!("Scaled {} to {desired}", target.display_name());
                info!(
                    marker = "SCALE_COMPLETE",
                    operation_type = "scale",
                    "{message}"
                );
                self.modal = None;
                self.set_status(StatusMessage::success(message));
                let view = match target {
                    ModalTarget::ScalingGroup { .. } => ViewId::ScalingGroups,
                    ModalTarget::NodeGroup { .. } => ViewId::NodeGroups,
                };
                self.reload(view)
            }
            Err(e) => {
                warn!(
                    marker = "SCALE_FAILED",
                    operation_type = "scale",
                    error = %e,
                    "ScalingHandler: capacity change failed"
                );
                modal.phase = ScalingPhase::Editing;
                modal.error = Some(e.to_string());
                Command::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cloud::shell::ShellHandoff;
    use crate::controller::actions::{Command, Message, Payload};
    use crate::error::AppError;
    use crate::model::app_state::{CloudContext, Model, Settings};
    use crate::model::modal::{CapacityRequest, Modal, ModalTarget, ScalingPhase};
    use crate::model::resources::{Capacity, ScalingGroup};
    use crate::model::view_stack::ViewId;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn group(name: &str, min: u32, max: u32, desired: u32) -> ScalingGroup {
        ScalingGroup {
            name: name.to_string(),
            capacity: Capacity {
                desired,
                min,
                max,
                current: desired,
            },
            health_check_type: "EC2".into(),
            availability_zones: vec!["us-east-1a".into()],
            launch_template: None,
            launch_configuration: None,
            load_balancers: Vec::new(),
            target_groups: Vec::new(),
            tags: Default::default(),
            created_at: None,
        }
    }

    fn asg_model() -> Model {
        let mut m = Model::new(
            CloudContext::default(),
            Settings::default(),
            ShellHandoff::default(),
        );
        m.push_view(ViewId::ScalingGroups);
        m.update(Message::Loaded {
            view: ViewId::ScalingGroups,
            result: Ok(Payload::ScalingGroups(vec![group("web", 1, 5, 2)])),
        });
        m
    }

    fn press(m: &mut Model, code: KeyCode) -> Command {
        m.update(Message::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ticket(m: &Model) -> u64 {
        m.modal.as_ref().map(Modal::ticket).unwrap_or_default()
    }

    #[test]
    fn test_scale_group_to_three() {
        let mut m = asg_model();
        press(&mut m, KeyCode::Enter);
        press(&mut m, KeyCode::Char('3'));
        let command = press(&mut m, KeyCode::Enter);
        let ticket = ticket(&m);
        assert_eq!(
            command,
            Command::Scale {
                ticket,
                target: ModalTarget::ScalingGroup { name: "web".into() },
                request: CapacityRequest {
                    min: 1,
                    max: 5,
                    desired: 3
                },
            }
        );

        let command = m.update(Message::ScaleFinished {
            ticket,
            target: ModalTarget::ScalingGroup { name: "web".into() },
            result: Ok(()),
        });
        assert!(m.modal.is_none());
        let status = m.status.as_ref().map(|s| s.text.to_string()).unwrap_or_default();
        assert!(status.contains("Scaled ASG web to 3"));
        assert!(command.contains(&Command::Load(ViewId::ScalingGroups)));
    }

    #[test]
    fn test_request_widens_window() {
        let mut m = asg_model();
        press(&mut m, KeyCode::Enter);
        press(&mut m, KeyCode::Char('9'));
        let Command::Scale { request, .. } = press(&mut m, KeyCode::Enter) else {
            panic!("expected scale command");
        };
        assert_eq!((request.min, request.max, request.desired), (1, 9, 9));
        assert!(request.min <= request.desired && request.desired <= request.max);
    }

    #[test]
    fn test_leading_zero_replaced_and_bad_input_rejected() {
        let mut m = asg_model();
        press(&mut m, KeyCode::Enter);
        press(&mut m, KeyCode::Char('0'));
        press(&mut m, KeyCode::Char('4'));
        let Some(Modal::Scaling(modal)) = &m.modal else {
            panic!("modal should be open");
        };
        assert_eq!(modal.input, "4");

        m.update(Message::Key(KeyEvent::new(
            KeyCode::Char('u'),
            KeyModifiers::CONTROL,
        )));
        let command = press(&mut m, KeyCode::Enter);
        assert!(command.is_none());
        let Some(Modal::Scaling(modal)) = &m.modal else {
            panic!("modal should stay open");
        };
        assert_eq!(modal.error.as_deref(), Some("enter a desired capacity"));
        assert_eq!(modal.phase, ScalingPhase::Editing);
    }

    #[test]
    fn test_zero_requires_confirmation() {
        let mut m = asg_model();
        press(&mut m, KeyCode::Enter);
        press(&mut m, KeyCode::Char('0'));
        assert!(press(&mut m, KeyCode::Enter).is_none());
        let Some(Modal::Scaling(modal)) = &m.modal else {
            panic!("modal should be open");
        };
        assert_eq!(modal.phase, ScalingPhase::Confirming);

        press(&mut m, KeyCode::Char('n'));
        assert!(m.modal.is_none());
        assert_eq!(
            m.status.as_ref().map(|s| s.text.as_str()),
            Some("Operation cancelled")
        );

        press(&mut m, KeyCode::Enter);
        press(&mut m, KeyCode::Char('0'));
        press(&mut m, KeyCode::Enter);
        let command = press(&mut m, KeyCode::Char('y'));
        assert!(matches!(
            command,
            Command::Scale {
                request: CapacityRequest {
                    min: 0,
                    max: 5,
                    desired: 0
                },
                ..
            }
        ));
    }

    #[test]
    fn test_submitting_ignores_everything_but_esc() {
        let mut m = asg_model();
        press(&mut m, KeyCode::Enter);
        press(&mut m, KeyCode::Char('3'));
        press(&mut m, KeyCode::Enter);
        let before = m.modal.clone();
        for code in [
            KeyCode::Char('7'),
            KeyCode::Backspace,
            KeyCode::Enter,
            KeyCode::Char('q'),
        ] {
            assert!(press(&mut m, code).is_none());
            assert_eq!(m.modal, before);
        }
        press(&mut m, KeyCode::Esc);
        assert!(m.modal.is_none());
    }

    #[test]
    fn test_error_keeps_modal_open_and_late_result_is_dropped() {
        let mut m = asg_model();
        press(&mut m, KeyCode::Enter);
        press(&mut m, KeyCode::Char('3'));
        press(&mut m, KeyCode::Enter);
        let first = ticket(&m);
        m.update(Message::ScaleFinished {
            ticket: first,
            target: ModalTarget::ScalingGroup { name: "web".into() },
            result: Err(AppError::cloud("UpdateAutoScalingGroup", "throttled")),
        });
        let Some(Modal::Scaling(modal)) = &m.modal else {
            panic!("modal should stay open");
        };
        assert_eq!(modal.phase, ScalingPhase::Editing);
        assert!(modal.error.as_deref().is_some_and(|e| e.contains("throttled")));

        press(&mut m, KeyCode::Esc);
        press(&mut m, KeyCode::Enter);
        let command = m.update(Message::ScaleFinished {
            ticket: first,
            target: ModalTarget::ScalingGroup { name: "web".into() },
            result: Ok(()),
        });
        assert!(command.is_none());
        assert!(m.modal.is_some());
    }
}
