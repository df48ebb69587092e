//! src/model/view_stack.rs
//! ============================================================================
//! # View identifiers and the navigation stack
//!
//! The root view (Dashboard) is never stored on the stack; `current` always
//! holds the leaf. Popping at the root is a no-op.

use serde::{Deserialize, Serialize};

/// A named mode of the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ViewId {
    #[default]
    Dashboard,
    Instances,
    Clusters,
    ScalingGroups,
    NodeGroups,
    NetworkInterfaces,
    Help,
}

impl ViewId {
    /// Views backed by a loader and a dataset.
    pub const DATA_VIEWS: [Self; 5] = [
        Self::Instances,
        Self::Clusters,
        Self::ScalingGroups,
        Self::NodeGroups,
        Self::NetworkInterfaces,
    ];

    #[must_use]
    pub const fn is_data_view(self) -> bool {
        !matches!(self, Self::Dashboard | Self::Help)
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Instances => "EC2 Instances",
            Self::Clusters => "EKS Clusters",
            Self::ScalingGroups => "Auto Scaling Groups",
            Self::NodeGroups => "EKS Node Groups",
            Self::NetworkInterfaces => "Network Interfaces",
            Self::Help => "Help",
        }
    }

    /// Text shown while the view's loader is in flight.
    #[must_use]
    pub const fn loading_message(self) -> &'static str {
        match self {
            Self::Instances => "Loading EC2 instances...",
            Self::Clusters => "Loading EKS clusters...",
            Self::ScalingGroups => "Loading Auto Scaling Groups...",
            Self::NodeGroups => "Loading node groups...",
            Self::NetworkInterfaces => "Loading network interfaces...",
            Self::Dashboard | Self::Help => "Loading...",
        }
    }

    #[must_use]
    pub const fn refresh_message(self) -> &'static str {
        match self {
            Self::Instances => "Refreshing EC2 instances...",
            Self::Clusters => "Refreshing EKS clusters...",
            Self::ScalingGroups => "Refreshing Auto Scaling Groups...",
            Self::NodeGroups => "Refreshing EKS node groups...",
            Self::NetworkInterfaces => "Refreshing network interfaces...",
            Self::Dashboard | Self::Help => "Refreshing...",
        }
    }
}

/// Ordered history of views; the leaf is `current`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewStack {
    history: Vec<ViewId>,
    current: ViewId,
}

impl ViewStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn current(&self) -> ViewId {
        self.current
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.history.is_empty()
    }

    /// Previous view, if any.
    #[must_use]
    pub fn parent(&self) -> Option<ViewId> {
        self.history.last().copied()
    }

    pub fn push(&mut self, view: ViewId) {
        self.history.push(self.current);
        self.current = view;
    }

    /// Returns the view that became current, or `None` at the root.
    pub fn pop(&mut self) -> Option<ViewId> {
        let previous = self.history.pop()?;
        self.current = previous;
        Some(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_at_root_is_noop() {
        let mut stack = ViewStack::new();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.current(), ViewId::Dashboard);
        assert!(stack.is_root());
    }

    #[test]
    fn test_pop_after_push_restores_previous() {
        let mut stack = ViewStack::new();
        stack.push(ViewId::Clusters);
        let before = stack.clone();

        stack.push(ViewId::NodeGroups);
        assert_eq!(stack.current(), ViewId::NodeGroups);
        assert_eq!(stack.parent(), Some(ViewId::Clusters));

        assert_eq!(stack.pop(), Some(ViewId::Clusters));
        assert_eq!(stack, before);
    }

    #[test]
    fn test_data_views() {
        assert!(!ViewId::Dashboard.is_data_view());
        assert!(!ViewId::Help.is_data_view());
        assert!(ViewId::DATA_VIEWS.iter().all(|v| v.is_data_view()));
    }
}
