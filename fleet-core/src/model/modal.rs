//! src/model/modal.rs
//! ============================================================================
//! # Inline modal state machines
//!
//! Two small machines share one target identity record. Every modal carries a
//! `ticket` assigned when it opens; completion messages quote the ticket and
//! are dropped if the open modal no longer has it.

use crate::model::resources::{Capacity, LaunchTemplateVersion, NodeGroup, ScalingGroup};
use chrono::{DateTime, Utc};

/// The resource a modal acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalTarget {
    ScalingGroup { name: String },
    NodeGroup { cluster: String, name: String },
}

impl ModalTarget {
    /// "ASG web" / "Node group prod/workers"
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::ScalingGroup { name } => format!("ASG {name}"),
            Self::NodeGroup { cluster, name } => format!("Node group {cluster}/{name}"),
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::ScalingGroup { .. } => "Scale Auto Scaling Group",
            Self::NodeGroup { .. } => "Scale Node Group",
        }
    }

    #[must_use]
    pub fn subtitle(&self) -> String {
        match self {
            Self::ScalingGroup { name } => name.clone(),
            Self::NodeGroup { cluster, name } => format!("{cluster} / {name}"),
        }
    }

    #[must_use]
    pub fn zero_capacity_prompt(&self) -> String {
        match self {
            Self::ScalingGroup { name } => format!("Scale ASG '{name}' to 0 instances?"),
            Self::NodeGroup { cluster, name } => {
                format!("Scale node group '{cluster}/{name}' to 0 instances?")
            }
        }
    }
}

pub const ZERO_CAPACITY_WARNING: &str = "This will scale all instances down to zero!";

/// Capacity triple sent to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityRequest {
    pub min: u32,
    pub max: u32,
    pub desired: u32,
}

impl CapacityRequest {
    /// Widens the saved window so that `min <= desired <= max` holds.
    #[must_use]
    pub fn widen(current: Capacity, desired: u32) -> Self {
        Self {
            min: current.min.min(desired),
            max: current.max.max(desired),
            desired,
        }
    }
}

/* =========================== Scaling modal ========================= */

/// Largest capacity accepted from the prompt.
pub const MAX_CAPACITY: u32 = i32::MAX as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingPhase {
    Editing,
    /// Waiting for the operator to confirm a scale to zero.
    Confirming,
    Submitting { desired: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalingModal {
    pub ticket: u64,
    pub target: ModalTarget,
    pub capacity: Capacity,
    pub input: String,
    pub phase: ScalingPhase,
    pub error: Option<String>,
}

impl ScalingModal {
    #[must_use]
    pub fn for_scaling_group(ticket: u64, group: &ScalingGroup) -> Self {
        Self::new(
            ticket,
            ModalTarget::ScalingGroup {
                name: group.name.clone(),
            },
            group.capacity,
        )
    }

    #[must_use]
    pub fn for_node_group(ticket: u64, group: &NodeGroup) -> Self {
        Self::new(
            ticket,
            ModalTarget::NodeGroup {
                cluster: group.cluster.clone(),
                name: group.name.clone(),
            },
            group.capacity,
        )
    }

    fn new(ticket: u64, target: ModalTarget, capacity: Capacity) -> Self {
        Self {
            ticket,
            target,
            capacity,
            input: String::new(),
            phase: ScalingPhase::Editing,
            error: None,
        }
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.phase, ScalingPhase::Submitting { .. })
    }

    pub fn push_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            return;
        }
        if self.input == "0" {
            self.input.clear();
        }
        self.input.push(digit);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.error = None;
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.error = None;
    }

    /// Parses the buffer, recording a local error on failure.
    pub fn parse_desired(&mut self) -> Option<u32> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            self.error = Some("enter a desired capacity".to_string());
            return None;
        }
        match trimmed.parse::<u32>() {
            Ok(value) if value <= MAX_CAPACITY => Some(value),
            _ => {
                self.error = Some("invalid capacity".to_string());
                None
            }
        }
    }

    /// Moves to `Submitting` and returns the request to send.
    pub fn submit(&mut self, desired: u32) -> CapacityRequest {
        self.phase = ScalingPhase::Submitting { desired };
        self.error = None;
        CapacityRequest::widen(self.capacity, desired)
    }
}

/* ====================== Launch template modal ====================== */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchTemplatePhase {
    Loading,
    Selecting,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTemplateOption {
    pub value: String,
    pub label: String,
    pub detail: String,
}

pub const LATEST_VERSION: &str = "$Latest";
pub const DEFAULT_VERSION: &str = "$Default";

/// Builds the picker list: synthetic options first, then numeric versions
/// in descending order.
#[must_use]
pub fn build_version_options(
    current: &str,
    mut versions: Vec<LaunchTemplateVersion>,
) -> Vec<LaunchTemplateOption> {
    let mut options = vec![
        LaunchTemplateOption {
            value: LATEST_VERSION.to_string(),
            label: "$Latest (latest)".to_string(),
            detail: "Always use the newest launch template version".to_string(),
        },
        LaunchTemplateOption {
            value: DEFAULT_VERSION.to_string(),
            label: "$Default (default)".to_string(),
            detail: "Use the template's default version".to_string(),
        },
    ];
    for option in &mut options {
        if option.value == current {
            option.label.push_str(" • current");
        }
    }

    versions.sort_by(|a, b| b.version_number.cmp(&a.version_number));
    options.extend(versions.into_iter().map(|v| {
        let value = v.version_number.to_string();
        let mut label = format!("Version {value}");
        if v.is_default {
            label.push_str(" • default");
        }
        if value == current {
            label.push_str(" • current");
        }
        let mut details: Vec<String> = Vec::with_capacity(2);
        let description = v.description.trim();
        if !description.is_empty() {
            details.push(description.to_string());
        }
        if let Some(created) = v.created_at {
            details.push(format_created(created));
        }
        LaunchTemplateOption {
            value,
            label,
            detail: details.join(" — "),
        }
    }));

    options
}

fn format_created(created: DateTime<Utc>) -> String {
    created.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTemplateModal {
    pub ticket: u64,
    pub cluster: String,
    pub node_group: String,
    pub template_id: String,
    pub template_name: String,
    pub current_version: String,
    pub options: Vec<LaunchTemplateOption>,
    pub cursor: usize,
    pub phase: LaunchTemplatePhase,
    pub requested: Option<String>,
    pub error: Option<String>,
}

impl LaunchTemplateModal {
    /// `None` when the node group has no launch template configured.
    #[must_use]
    pub fn open(ticket: u64, group: &NodeGroup) -> Option<Self> {
        let template_id = group.launch_template_id()?.to_string();
        let lt = group.launch_template.clone().unwrap_or_default();
        Some(Self {
            ticket,
            cluster: group.cluster.clone(),
            node_group: group.name.clone(),
            template_id,
            template_name: lt.name,
            current_version: lt.version,
            options: Vec::new(),
            cursor: 0,
            phase: LaunchTemplatePhase::Loading,
            requested: None,
            error: None,
        })
    }

    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.cluster, self.node_group)
    }

    pub fn reload(&mut self) {
        self.phase = LaunchTemplatePhase::Loading;
        self.error = None;
    }

    pub fn set_versions(&mut self, versions: Vec<LaunchTemplateVersion>) {
        self.options = build_version_options(&self.current_version, versions);
        self.cursor = self
            .options
            .iter()
            .position(|o| o.value == self.current_version)
            .unwrap_or(0);
        self.phase = LaunchTemplatePhase::Selecting;
    }

    pub fn set_load_error(&mut self, message: String) {
        self.options.clear();
        self.cursor = 0;
        self.error = Some(message);
        self.phase = LaunchTemplatePhase::Selecting;
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.options.len() {
            self.cursor += 1;
        }
    }

    /// Moves to `Submitting` and returns the chosen version value.
    pub fn submit(&mut self) -> Option<String> {
        let value = self.options.get(self.cursor)?.value.clone();
        self.phase = LaunchTemplatePhase::Submitting;
        self.requested = Some(value.clone());
        self.error = None;
        Some(value)
    }
}

/// At most one modal is open at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Scaling(ScalingModal),
    LaunchTemplate(LaunchTemplateModal),
}

impl Modal {
    #[must_use]
    pub const fn ticket(&self) -> u64 {
        match self {
            Self::Scaling(m) => m.ticket,
            Self::LaunchTemplate(m) => m.ticket,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(n: i64, is_default: bool) -> LaunchTemplateVersion {
        LaunchTemplateVersion {
            template_id: "lt-1".into(),
            template_name: "workers".into(),
            version_number: n,
            description: String::new(),
            created_at: None,
            created_by: String::new(),
            is_default,
        }
    }

    #[test]
    fn test_widen_includes_desired() {
        let current = Capacity {
            desired: 2,
            min: 1,
            max: 5,
            current: 2,
        };
        assert_eq!(
            CapacityRequest::widen(current, 3),
            CapacityRequest {
                min: 1,
                max: 5,
                desired: 3
            }
        );
        assert_eq!(CapacityRequest::widen(current, 9).max, 9);
        assert_eq!(CapacityRequest::widen(current, 0).min, 0);

        for d in [0, 1, 4, 5, 6, 100] {
            let req = CapacityRequest::widen(current, d);
            assert!(req.min <= req.desired && req.desired <= req.max);
        }
    }

    #[test]
    fn test_leading_zero_is_replaced() {
        let mut modal = ScalingModal::new(
            1,
            ModalTarget::ScalingGroup { name: "web".into() },
            Capacity::default(),
        );
        modal.push_digit('0');
        modal.push_digit('7');
        assert_eq!(modal.input, "7");
        modal.push_digit('x');
        assert_eq!(modal.input, "7");
    }

    #[test]
    fn test_parse_errors() {
        let mut modal = ScalingModal::new(
            1,
            ModalTarget::ScalingGroup { name: "web".into() },
            Capacity::default(),
        );
        assert_eq!(modal.parse_desired(), None);
        assert_eq!(modal.error.as_deref(), Some("enter a desired capacity"));

        modal.input = "99999999999".into();
        assert_eq!(modal.parse_desired(), None);
        assert_eq!(modal.error.as_deref(), Some("invalid capacity"));

        modal.input = "2147483647".into();
        assert_eq!(modal.parse_desired(), Some(MAX_CAPACITY));

        modal.input = "2147483648".into();
        assert_eq!(modal.parse_desired(), None);
    }

    #[test]
    fn test_version_options_order_and_labels() {
        let options = build_version_options(
            "3",
            vec![version(4, true), version(3, false), version(5, false)],
        );
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "$Latest (latest)",
                "$Default (default)",
                "Version 5",
                "Version 4 • default",
                "Version 3 • current",
            ]
        );
    }

    #[test]
    fn test_synthetic_current_marker() {
        let options = build_version_options("$Latest", vec![]);
        assert_eq!(options[0].label, "$Latest (latest) • current");
        assert_eq!(options[1].label, "$Default (default)");
    }

    #[test]
    fn test_zero_prompt_wording() {
        let target = ModalTarget::NodeGroup {
            cluster: "prod".into(),
            name: "ng1".into(),
        };
        assert_eq!(
            target.zero_capacity_prompt(),
            "Scale node group 'prod/ng1' to 0 instances?"
        );
        assert_eq!(target.display_name(), "Node group prod/ng1");
    }
}
