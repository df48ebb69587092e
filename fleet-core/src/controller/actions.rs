//! src/controller/actions.rs
//! ============================================================================
//! # Actions, Messages and Commands
//!
//! `NavAction` is the fixed vocabulary the navigator maps keystrokes onto.
//! `Message` is everything the controller reacts to: terminal input and the
//! single completion each background command sends back. `Command` is plain
//! data describing I/O for the event loop to launch; the controller itself
//! never performs I/O.

use crate::error::AppError;
use crate::model::{
    modal::CapacityRequest,
    modal::ModalTarget,
    resources::{
        Cluster, Instance, LaunchTemplateVersion, NetworkAttachment, NodeGroup, ScalingGroup,
    },
    view_stack::ViewId,
};
use crossterm::event::KeyEvent;
use std::time::Duration;

/// Abstract navigation actions produced by the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Back,
    Select,
    Search,
    Refresh,
    Help,
    Quit,
    Scale,
    Shell,
    Details,
    Filter,
}

/// Dataset produced by one loader run.
#[derive(Debug, Clone)]
pub enum Payload {
    Instances(Vec<Instance>),
    Clusters(Vec<Cluster>),
    ScalingGroups(Vec<ScalingGroup>),
    NodeGroups(Vec<NodeGroup>),
    Network(Vec<NetworkAttachment>),
}

impl Payload {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Instances(v) => v.len(),
            Self::Clusters(v) => v.len(),
            Self::ScalingGroups(v) => v.len(),
            Self::NodeGroups(v) => v.len(),
            Self::Network(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Key(KeyEvent),
    Resize {
        width: u16,
        height: u16,
    },
    /// OS signal or external shutdown request.
    Shutdown,
    Loaded {
        view: ViewId,
        result: Result<Payload, AppError>,
    },
    SearchDebounceFired {
        view: ViewId,
        generation: u64,
    },
    AutoRefreshTick {
        generation: u64,
    },
    ScaleFinished {
        ticket: u64,
        target: ModalTarget,
        result: Result<(), AppError>,
    },
    LaunchTemplateVersionsLoaded {
        ticket: u64,
        result: Result<Vec<LaunchTemplateVersion>, AppError>,
    },
    LaunchTemplateUpdated {
        ticket: u64,
        version: String,
        result: Result<(), AppError>,
    },
    ClipboardWritten {
        label: String,
        value: String,
        result: Result<(), AppError>,
    },
}

/// Deferred I/O requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    None,
    Batch(Vec<Command>),
    Quit,
    Load(ViewId),
    ScheduleSearchDebounce {
        view: ViewId,
        generation: u64,
        delay: Duration,
    },
    ScheduleAutoRefresh {
        generation: u64,
        delay: Duration,
    },
    Scale {
        ticket: u64,
        target: ModalTarget,
        request: CapacityRequest,
    },
    ListLaunchTemplateVersions {
        ticket: u64,
        template_id: String,
    },
    UpdateLaunchTemplate {
        ticket: u64,
        cluster: String,
        node_group: String,
        template_id: String,
        version: String,
    },
    WriteClipboard {
        label: String,
        value: String,
    },
}

impl Command {
    /// Combines commands, dropping `None` and flattening nested batches.
    #[must_use]
    pub fn batch(commands: impl IntoIterator<Item = Self>) -> Self {
        let mut flat = Vec::new();
        for command in commands {
            match command {
                Self::None => {}
                Self::Batch(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Self::None,
            1 => flat.pop().unwrap_or_default(),
            _ => Self::Batch(flat),
        }
    }

    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::batch([self, other])
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Flattened view of the command tree, for inspection.
    #[must_use]
    pub fn flatten(&self) -> Vec<&Self> {
        match self {
            Self::None => Vec::new(),
            Self::Batch(inner) => inner.iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }

    #[must_use]
    pub fn contains(&self, wanted: &Self) -> bool {
        self.flatten().into_iter().any(|c| c == wanted)
    }

    #[must_use]
    pub fn is_quit(&self) -> bool {
        self.flatten().into_iter().any(|c| matches!(c, Self::Quit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_flattens_and_drops_none() {
        let cmd = Command::batch([
            Command::None,
            Command::Load(ViewId::Instances),
            Command::Batch(vec![Command::Quit]),
        ]);
        assert_eq!(
            cmd,
            Command::Batch(vec![Command::Load(ViewId::Instances), Command::Quit])
        );
        assert!(cmd.is_quit());
    }

    #[test]
    fn test_single_command_is_unwrapped() {
        assert_eq!(
            Command::None.and(Command::Load(ViewId::Clusters)),
            Command::Load(ViewId::Clusters)
        );
        assert!(Command::batch([Command::None]).is_none());
    }
}
