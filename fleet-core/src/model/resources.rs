//! src/model/resources.rs
//! ============================================================================
//! # Fleet resource records
//!
//! Plain value snapshots handed over by the cloud adapter. The model takes
//! ownership of them when a load completes and replaces whole lists on every
//! refresh.

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use smallvec::SmallVec;
use std::{collections::BTreeMap, fmt};

pub type Tags = BTreeMap<String, String>;

/// Natural key used to restore the cursor across reloads.
pub trait Resource {
    fn selection_key(&self) -> String;
}

/// Lifecycle state of a virtual machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InstanceState {
    Running,
    Stopped,
    Pending,
    Stopping,
    Terminated,
    ShuttingDown,
    Other(CompactString),
}

impl InstanceState {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "running" => Self::Running,
            "stopped" => Self::Stopped,
            "pending" => Self::Pending,
            "stopping" => Self::Stopping,
            "terminated" => Self::Terminated,
            "shutting-down" => Self::ShuttingDown,
            other => Self::Other(CompactString::new(other)),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Pending => "pending",
            Self::Stopping => "stopping",
            Self::Terminated => "terminated",
            Self::ShuttingDown => "shutting-down",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub id: String,
    pub name: String,
    pub state: InstanceState,
    pub private_ip: Option<String>,
    pub public_ip: Option<String>,
    pub private_dns: Option<String>,
    pub public_dns: Option<String>,
    pub instance_type: String,
    pub availability_zone: String,
    pub tags: Tags,
    pub launch_time: Option<DateTime<Utc>>,
    pub instance_profile: Option<String>,
    pub security_groups: SmallVec<[String; 2]>,
}

impl Instance {
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == InstanceState::Running
    }

    /// Name used in messages; falls back to the id for untagged instances.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

impl Resource for Instance {
    fn selection_key(&self) -> String {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub name: String,
    pub status: String,
    pub version: String,
    pub arn: String,
}

impl Resource for Cluster {
    fn selection_key(&self) -> String {
        self.name.clone()
    }
}

/// Desired/min/max window plus the observed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capacity {
    pub desired: u32,
    pub min: u32,
    pub max: u32,
    pub current: u32,
}

/// Launch template reference carried by node groups and scaling groups.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaunchTemplateRef {
    pub id: String,
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeGroup {
    pub cluster: String,
    pub name: String,
    pub status: String,
    pub version: String,
    pub instance_types: SmallVec<[String; 2]>,
    pub capacity: Capacity,
    pub launch_template: Option<LaunchTemplateRef>,
    pub created_at: Option<DateTime<Utc>>,
    pub tags: Tags,
}

impl NodeGroup {
    /// `cluster/name`, as shown in status messages.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.cluster, self.name)
    }

    /// Template id, if the node group was created from a launch template.
    #[must_use]
    pub fn launch_template_id(&self) -> Option<&str> {
        self.launch_template
            .as_ref()
            .map(|lt| lt.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

impl Resource for NodeGroup {
    fn selection_key(&self) -> String {
        format!("{}|{}", self.cluster, self.name)
    }
}

/// Scaling state derived from current vs desired size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingStatus {
    Healthy,
    ScalingUp,
    ScalingDown,
}

impl ScalingStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::ScalingUp => "Scaling Up",
            Self::ScalingDown => "Scaling Down",
        }
    }
}

impl fmt::Display for ScalingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalingGroup {
    pub name: String,
    pub capacity: Capacity,
    pub health_check_type: String,
    pub availability_zones: Vec<String>,
    pub launch_template: Option<LaunchTemplateRef>,
    pub launch_configuration: Option<String>,
    pub load_balancers: Vec<String>,
    pub target_groups: Vec<String>,
    pub tags: Tags,
    pub created_at: Option<DateTime<Utc>>,
}

impl ScalingGroup {
    #[must_use]
    pub const fn status(&self) -> ScalingStatus {
        let Capacity {
            desired, current, ..
        } = self.capacity;
        if current < desired {
            ScalingStatus::ScalingUp
        } else if current > desired {
            ScalingStatus::ScalingDown
        } else {
            ScalingStatus::Healthy
        }
    }
}

impl Resource for ScalingGroup {
    fn selection_key(&self) -> String {
        self.name.clone()
    }
}

/// One interface attached to an instance, in adapter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterface {
    pub name: String,
    pub network_card_index: i32,
    pub device_index: i32,
    pub subnet_id: String,
    pub cidr: String,
    pub security_group: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkAttachment {
    pub instance_id: String,
    pub instance_name: String,
    pub dns_name: String,
    pub interfaces: Vec<NetworkInterface>,
}

impl Resource for NetworkAttachment {
    fn selection_key(&self) -> String {
        self.instance_id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTemplateVersion {
    pub template_id: String,
    pub template_name: String,
    pub version_number: i64,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub is_default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(desired: u32, current: u32) -> ScalingGroup {
        ScalingGroup {
            name: "web".into(),
            capacity: Capacity {
                desired,
                min: 0,
                max: 10,
                current,
            },
            health_check_type: "EC2".into(),
            availability_zones: vec![],
            launch_template: None,
            launch_configuration: None,
            load_balancers: vec![],
            target_groups: vec![],
            tags: Tags::new(),
            created_at: None,
        }
    }

    #[test]
    fn test_scaling_status_derivation() {
        assert_eq!(group(2, 2).status(), ScalingStatus::Healthy);
        assert_eq!(group(3, 1).status(), ScalingStatus::ScalingUp);
        assert_eq!(group(1, 3).status(), ScalingStatus::ScalingDown);
    }

    #[test]
    fn test_instance_state_parse() {
        assert_eq!(InstanceState::parse("Running"), InstanceState::Running);
        assert_eq!(
            InstanceState::parse("shutting-down"),
            InstanceState::ShuttingDown
        );
        assert_eq!(InstanceState::parse("rebooting").as_str(), "rebooting");
    }

    #[test]
    fn test_node_group_keys() {
        let ng = NodeGroup {
            cluster: "prod".into(),
            name: "workers".into(),
            status: "ACTIVE".into(),
            version: "1.29".into(),
            instance_types: SmallVec::new(),
            capacity: Capacity::default(),
            launch_template: Some(LaunchTemplateRef::default()),
            created_at: None,
            tags: Tags::new(),
        };
        assert_eq!(ng.selection_key(), "prod|workers");
        assert_eq!(ng.qualified_name(), "prod/workers");
        assert_eq!(ng.launch_template_id(), None);
    }
}
