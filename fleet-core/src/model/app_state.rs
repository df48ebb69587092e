//! src/model/app_state.rs
//! ============================================================================
//! # Model: the root state of the fleet browser
//!
//! Everything the controller mutates lives here. The model is changed only
//! by `Model::update` (see `controller::update`), one message at a time, and
//! read by the renderer between messages. Background work never touches it
//! directly; it receives owned snapshots through `Message`s.

use crate::cloud::shell::{PendingSession, ShellHandoff};
use crate::config::Config;
use crate::controller::handlers::navigation_handler::Navigator;
use crate::model::{
    dataset::Dataset,
    modal::Modal,
    resources::{Cluster, Instance, NetworkAttachment, NodeGroup, Resource, ScalingGroup},
    search_state::SearchState,
    ui_state::{LoadingState, StatusMessage, ViewError},
    view_stack::{ViewId, ViewStack},
};
use crate::search::query::Query;
use std::collections::HashMap;
use std::time::Duration;

/// One entry of the dashboard menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub title: &'static str,
    pub description: &'static str,
    pub view: ViewId,
}

pub const DASHBOARD_MENU: [MenuItem; 6] = [
    MenuItem {
        title: "EC2 Instances",
        description: "View and manage EC2 instances",
        view: ViewId::Instances,
    },
    MenuItem {
        title: "EKS Clusters",
        description: "Manage EKS clusters and node groups",
        view: ViewId::Clusters,
    },
    MenuItem {
        title: "Auto Scaling Groups",
        description: "View and scale ASGs",
        view: ViewId::ScalingGroups,
    },
    MenuItem {
        title: "EKS Node Groups",
        description: "Inspect managed node groups",
        view: ViewId::NodeGroups,
    },
    MenuItem {
        title: "Network Interfaces",
        description: "View EC2 network interfaces and ENIs",
        view: ViewId::NetworkInterfaces,
    },
    MenuItem {
        title: "Help",
        description: "View keybindings and help",
        view: ViewId::Help,
    },
];

/* ========================================================================== */
/* Datasets                                                                   */
/* ========================================================================== */

/// Raw and filtered data for every data view.
#[derive(Debug, Default)]
pub struct Datasets {
    pub instances: Dataset<Instance>,
    pub clusters: Dataset<Cluster>,
    pub scaling_groups: Dataset<ScalingGroup>,
    pub node_groups: Dataset<NodeGroup>,
    pub network: Dataset<NetworkAttachment>,
}

impl Datasets {
    /// Visible rows for `view`. Dashboard rows are menu entries; help has none.
    #[must_use]
    pub fn visible_len(&self, view: ViewId) -> usize {
        match view {
            ViewId::Dashboard => DASHBOARD_MENU.len(),
            ViewId::Instances => self.instances.visible_len(),
            ViewId::Clusters => self.clusters.visible_len(),
            ViewId::ScalingGroups => self.scaling_groups.visible_len(),
            ViewId::NodeGroups => self.node_groups.visible_len(),
            ViewId::NetworkInterfaces => self.network.visible_len(),
            ViewId::Help => 0,
        }
    }

    #[must_use]
    pub fn raw_len(&self, view: ViewId) -> usize {
        match view {
            ViewId::Instances => self.instances.raw_len(),
            ViewId::Clusters => self.clusters.raw_len(),
            ViewId::ScalingGroups => self.scaling_groups.raw_len(),
            ViewId::NodeGroups => self.node_groups.raw_len(),
            ViewId::NetworkInterfaces => self.network.raw_len(),
            ViewId::Dashboard | ViewId::Help => 0,
        }
    }

    #[must_use]
    pub fn is_loaded(&self, view: ViewId) -> bool {
        match view {
            ViewId::Instances => self.instances.is_loaded(),
            ViewId::Clusters => self.clusters.is_loaded(),
            ViewId::ScalingGroups => self.scaling_groups.is_loaded(),
            ViewId::NodeGroups => self.node_groups.is_loaded(),
            ViewId::NetworkInterfaces => self.network.is_loaded(),
            ViewId::Dashboard | ViewId::Help => true,
        }
    }

    /// Re-applies `query` to the dataset behind `view`.
    pub fn apply_filter(&mut self, view: ViewId, query: &Query) {
        match view {
            ViewId::Instances => self.instances.apply_filter(query),
            ViewId::Clusters => self.clusters.apply_filter(query),
            ViewId::ScalingGroups => self.scaling_groups.apply_filter(query),
            ViewId::NodeGroups => self.node_groups.apply_filter(query),
            ViewId::NetworkInterfaces => self.network.apply_filter(query),
            ViewId::Dashboard | ViewId::Help => {}
        }
    }

    /// Natural key of the visible row at `position`.
    #[must_use]
    pub fn selection_key(&self, view: ViewId, position: usize) -> Option<String> {
        match view {
            ViewId::Instances => self.instances.visible(position).map(Resource::selection_key),
            ViewId::Clusters => self.clusters.visible(position).map(Resource::selection_key),
            ViewId::ScalingGroups => self
                .scaling_groups
                .visible(position)
                .map(Resource::selection_key),
            ViewId::NodeGroups => self
                .node_groups
                .visible(position)
                .map(Resource::selection_key),
            ViewId::NetworkInterfaces => {
                self.network.visible(position).map(Resource::selection_key)
            }
            ViewId::Dashboard | ViewId::Help => None,
        }
    }

    #[must_use]
    pub fn position_of(&self, view: ViewId, key: &str) -> Option<usize> {
        match view {
            ViewId::Instances => self.instances.position_of(key),
            ViewId::Clusters => self.clusters.position_of(key),
            ViewId::ScalingGroups => self.scaling_groups.position_of(key),
            ViewId::NodeGroups => self.node_groups.position_of(key),
            ViewId::NetworkInterfaces => self.network.position_of(key),
            ViewId::Dashboard | ViewId::Help => None,
        }
    }
}

/* ========================================================================== */
/* Auto-refresh and settings                                                  */
/* ========================================================================== */

/// Auto-refresh switch. `generation` changes on every enable so that ticks
/// from an earlier chain recognize themselves as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoRefresh {
    pub enabled: bool,
    pub interval: Duration,
    pub generation: u64,
}

impl AutoRefresh {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            enabled: false,
            interval,
            generation: 0,
        }
    }

    /// Turns the scheduler on and returns the generation of the new chain.
    pub const fn enable(&mut self) -> u64 {
        self.enabled = true;
        self.generation += 1;
        self.generation
    }

    pub const fn disable(&mut self) {
        self.enabled = false;
    }

    #[must_use]
    pub const fn is_current(&self, generation: u64) -> bool {
        self.enabled && self.generation == generation
    }
}

/// Account context shown in the header and status bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloudContext {
    pub region: String,
    pub profile: String,
}

impl CloudContext {
    #[must_use]
    pub fn region_label(&self) -> &str {
        if self.region.is_empty() {
            "default"
        } else {
            &self.region
        }
    }

    #[must_use]
    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() {
            "default"
        } else {
            &self.profile
        }
    }
}

/// Controller tunables taken from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub page_size: usize,
    pub debounce: Duration,
    pub auto_refresh_interval: Duration,
    pub auto_refresh_on_start: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: 10,
            debounce: Duration::from_millis(150),
            auto_refresh_interval: Duration::from_secs(30),
            auto_refresh_on_start: false,
        }
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.navigation.page_size,
            debounce: config.search.debounce,
            auto_refresh_interval: config.auto_refresh.interval,
            auto_refresh_on_start: config.auto_refresh.enabled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub width: u16,
    pub height: u16,
}

impl Default for TerminalSize {
    fn default() -> Self {
        Self {
            width: 120,
            height: 40,
        }
    }
}

/* ========================================================================== */
/* Model                                                                      */
/* ========================================================================== */

pub struct Model {
    pub stack: ViewStack,
    /// Cursor into the current view's visible rows.
    pub cursor: usize,
    pub datasets: Datasets,
    pub search: SearchState,
    pub modal: Option<Modal>,
    pub status: Option<StatusMessage>,
    /// Error slot of the current view (failed load or precondition).
    pub error: Option<ViewError>,
    pub loading: Option<LoadingState>,
    pub navigator: Navigator,
    pub auto_refresh: AutoRefresh,
    pub context: CloudContext,
    pub settings: Settings,
    pub size: TerminalSize,
    /// Session to run once the terminal has been restored.
    pub pending_handoff: Option<PendingSession>,
    shell: ShellHandoff,
    selections: HashMap<ViewId, String>,
    next_ticket: u64,
}

impl Model {
    pub fn new(context: CloudContext, settings: Settings, shell: ShellHandoff) -> Self {
        Self {
            stack: ViewStack::new(),
            cursor: 0,
            datasets: Datasets::default(),
            search: SearchState::default(),
            modal: None,
            status: None,
            error: None,
            loading: None,
            navigator: Navigator::new(),
            auto_refresh: AutoRefresh::new(settings.auto_refresh_interval),
            context,
            settings,
            size: TerminalSize::default(),
            pending_handoff: None,
            shell,
            selections: HashMap::new(),
            next_ticket: 0,
        }
    }

    #[must_use]
    pub fn current_view(&self) -> ViewId {
        self.stack.current()
    }

    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.datasets.visible_len(self.current_view())
    }

    /// Brings the cursor back into `[0, visible_len - 1]`, or 0 when empty.
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_len();
        self.cursor = if len == 0 { 0 } else { self.cursor.min(len - 1) };
    }

    #[must_use]
    pub fn current_selection_key(&self) -> Option<String> {
        self.datasets
            .selection_key(self.current_view(), self.cursor)
    }

    /// Remembers the focused row of the current view.
    pub fn capture_selection(&mut self) {
        let view = self.current_view();
        match self.current_selection_key() {
            Some(key) => {
                self.selections.insert(view, key);
            }
            None => {
                self.selections.remove(&view);
            }
        }
    }

    /// Moves the cursor back to the captured row of `view` if it is still
    /// visible, otherwise clamps.
    pub fn restore_selection(&mut self, view: ViewId) {
        if view != self.current_view() {
            return;
        }
        if let Some(position) = self
            .selections
            .get(&view)
            .and_then(|key| self.datasets.position_of(view, key))
        {
            self.cursor = position;
        }
        self.clamp_cursor();
    }

    /// Parsed query currently driving `view`.
    #[must_use]
    pub fn query_for(&self, view: ViewId) -> Query {
        Query::parse(self.search.effective(view))
    }

    pub fn refilter(&mut self, view: ViewId) {
        let query = self.query_for(view);
        self.datasets.apply_filter(view, &query);
    }

    /// Discards an open search edit and re-applies that view's saved query.
    fn abandon_search(&mut self) {
        if let Some(view) = self.search.cancel() {
            self.refilter(view);
        }
    }

    /// Pushes `view`, remembering the row focused in the view being left.
    pub fn push_view(&mut self, view: ViewId) {
        self.capture_selection();
        self.abandon_search();
        self.stack.push(view);
        self.cursor = 0;
        self.modal = None;
        self.status = None;
        self.error = None;
        self.navigator.reset();
    }

    /// Returns to the parent view. A no-op at the root.
    pub fn pop_view(&mut self) -> bool {
        if self.stack.is_root() {
            return false;
        }
        self.abandon_search();
        let Some(view) = self.stack.pop() else {
            return false;
        };
        self.cursor = 0;
        self.modal = None;
        self.status = None;
        self.error = None;
        self.navigator.reset();
        self.restore_selection(view);
        true
    }

    pub fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
    }

    pub fn set_view_error(&mut self, message: impl Into<String>) {
        self.error = Some(ViewError {
            view: self.current_view(),
            message: message.into(),
        });
    }

    /// Error to show for the current view, if any.
    #[must_use]
    pub fn view_error(&self) -> Option<&ViewError> {
        self.error
            .as_ref()
            .filter(|e| e.view == self.current_view())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Loading indicator for the current view.
    #[must_use]
    pub fn current_loading(&self) -> Option<&LoadingState> {
        self.loading
            .as_ref()
            .filter(|l| l.view == self.current_view())
    }

    pub fn issue_ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }

    #[must_use]
    pub const fn shell(&self) -> &ShellHandoff {
        &self.shell
    }

    #[must_use]
    pub fn take_pending_handoff(&mut self) -> Option<PendingSession> {
        self.pending_handoff.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::resources::Cluster;

    fn model() -> Model {
        Model::new(
            CloudContext::default(),
            Settings::default(),
            ShellHandoff::default(),
        )
    }

    fn clusters(names: &[&str]) -> Vec<Cluster> {
        names
            .iter()
            .map(|name| Cluster {
                name: (*name).to_string(),
                status: "ACTIVE".into(),
                version: "1.29".into(),
                arn: format!("arn-{name}"),
            })
            .collect()
    }

    #[test]
    fn test_clamp_on_empty_view() {
        let mut m = model();
        m.push_view(ViewId::Clusters);
        m.cursor = 7;
        m.clamp_cursor();
        assert_eq!(m.cursor, 0);
    }

    #[test]
    fn test_pop_restores_captured_row() {
        let mut m = model();
        m.push_view(ViewId::Clusters);
        m.datasets
            .clusters
            .replace(clusters(&["a", "b", "c"]), &Query::default());
        m.cursor = 2;
        m.push_view(ViewId::NodeGroups);
        assert_eq!(m.cursor, 0);
        assert!(m.pop_view());
        assert_eq!(m.current_view(), ViewId::Clusters);
        assert_eq!(m.cursor, 2);
    }

    #[test]
    fn test_pop_at_root_is_noop() {
        let mut m = model();
        assert!(!m.pop_view());
        assert_eq!(m.current_view(), ViewId::Dashboard);
    }

    #[test]
    fn test_auto_refresh_generations() {
        let mut auto = AutoRefresh::new(Duration::from_secs(30));
        let first = auto.enable();
        auto.disable();
        assert!(!auto.is_current(first));
        let second = auto.enable();
        assert!(auto.is_current(second));
        assert!(!auto.is_current(first));
    }

    #[test]
    fn test_context_labels_default() {
        let ctx = CloudContext {
            region: "eu-west-1".into(),
            profile: String::new(),
        };
        assert_eq!(ctx.region_label(), "eu-west-1");
        assert_eq!(ctx.profile_label(), "default");
    }
}
