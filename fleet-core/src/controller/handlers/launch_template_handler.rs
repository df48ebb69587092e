// fleet-core/src/controller/handlers/launch_template_handler.rs
// Launch template version picker for node groups

use crate::controller::actions::Command;
use crate::error::AppError;
use crate::model::{
    app_state::Model,
    modal::{LaunchTemplateModal, LaunchTemplatePhase, Modal},
    resources::LaunchTemplateVersion,
    ui_state::StatusMessage,
    view_stack::ViewId,
};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, info, warn};

impl Model {
    /// Opens the picker for the focused node group and requests its versions.
    pub(crate) fn open_launch_template(&mut self) -> Command {
        if self.current_view() != ViewId::NodeGroups {
            return Command::None;
        }
        let ticket = self.issue_ticket();
        let Some(group) = self.datasets.node_groups.visible(self.cursor) else {
            return Command::None;
        };
        let Some(modal) = LaunchTemplateModal::open(ticket, group) else {
            self.set_status(StatusMessage::error(
                "Selected node group has no launch template configured",
            ));
            return Command::None;
        };

        debug!(
            marker = "LAUNCH_TEMPLATE_MODAL_OPEN",
            operation_type = "modal",
            ticket,
            node_group = %modal.qualified_name(),
            template_id = %modal.template_id,
            "LaunchTemplateHandler: loading versions"
        );
        let command = Command::ListLaunchTemplateVersions {
            ticket,
            template_id: modal.template_id.clone(),
        };
        self.status = None;
        self.modal = Some(Modal::LaunchTemplate(modal));
        command
    }

    pub(crate) fn handle_launch_template_key(&mut self, key_event: KeyEvent) -> Command {
        let Some(Modal::LaunchTemplate(modal)) = self.modal.as_mut() else {
            return Command::None;
        };

        if key_event.code == KeyCode::Esc {
            self.modal = None;
            return Command::None;
        }

        match modal.phase {
            LaunchTemplatePhase::Submitting | LaunchTemplatePhase::Loading => Command::None,
            LaunchTemplatePhase::Selecting => match key_event.code {
                KeyCode::Char('r' | 'R') => {
                    modal.reload();
                    Command::ListLaunchTemplateVersions {
                        ticket: modal.ticket,
                        template_id: modal.template_id.clone(),
                    }
                }
                _ if modal.options.is_empty() => Command::None,
                KeyCode::Up | KeyCode::Char('k') => {
                    modal.move_up();
                    Command::None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    modal.move_down();
                    Command::None
                }
                KeyCode::Enter => {
                    let Some(version) = modal.submit() else {
                        return Command::None;
                    };
                    info!(
                        marker = "LAUNCH_TEMPLATE_UPDATE_REQUESTED",
                        operation_type = "launch_template_update",
                        node_group = %modal.qualified_name(),
                        version = %version,
                        "LaunchTemplateHandler: submitting version change"
                    );
                    Command::UpdateLaunchTemplate {
                        ticket: modal.ticket,
                        cluster: modal.cluster.clone(),
                        node_group: modal.node_group.clone(),
                        template_id: modal.template_id.clone(),
                        version,
                    }
                }
                _ => Command::None,
            },
        }
    }

    pub(crate) fn on_launch_template_versions(
        &mut self,
        ticket: u64,
        result: Result<Vec<LaunchTemplateVersion>, AppError>,
    ) -> Command {
        let Some(Modal::LaunchTemplate(modal)) =
            self.modal.as_mut().filter(|m| m.ticket() == ticket)
        else {
            debug!(ticket, "LaunchTemplateHandler: versions for closed picker dropped");
            return Command::None;
        };
        if modal.phase != LaunchTemplatePhase::Loading {
            return Command::None;
        }

        match result {
            Ok(versions) => {
                debug!(
                    ticket,
                    count = versions.len(),
                    "LaunchTemplateHandler: versions loaded"
                );
                modal.set_versions(versions);
            }
            Err(e) => {
                warn!(ticket, error = %e, "LaunchTemplateHandler: version listing failed");
                modal.set_load_error(e.to_string());
            }
        }
        Command::None
    }

    pub(crate) fn on_launch_template_updated(
        &mut self,
        ticket: u64,
        version: String,
        result: Result<(), AppError>,
    ) -> Command {
        let Some(Modal::LaunchTemplate(modal)) =
            self.modal.as_mut().filter(|m| m.ticket() == ticket)
        else {
            if let Err(e) = result {
                warn!(
                    ticket,
                    error = %e,
                    "LaunchTemplateHandler: failure for closed picker"
                );
                self.set_status(StatusMessage::error(format!(
                    "Launch template update failed: {e}"
                )));
            }
            return Command::None;
        };

        match result {
            Ok(()) => {
                let message = format!(
                    "Updated launch template for {} to {version}",
                    modal.qualified_name()
                );
                info!(
                    marker = "LAUNCH_TEMPLATE_UPDATE_COMPLETE",
                    operation_type = "launch_template_update",
                    "{message}"
                );
                self.modal = None;
                self.set_status(StatusMessage::success(message));
                self.reload(ViewId::NodeGroups)
            }
            Err(e) => {
                warn!(
                    marker = "LAUNCH_TEMPLATE_UPDATE_FAILED",
                    operation_type = "launch_template_update",
                    error = %e,
                    "LaunchTemplateHandler: update failed"
                );
                modal.phase = LaunchTemplatePhase::Selecting;
                modal.error = Some(e.to_string());
                Command::None
            }
        }
    }
}
