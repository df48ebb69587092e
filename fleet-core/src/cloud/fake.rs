//! src/cloud/fake.rs
//! In-memory `CloudClient` with scripted failures, call recording and an
//! in-flight high-water mark for exercising the describe fan-out.

use crate::cloud::client::CloudClient;
use crate::error::AppError;
use crate::model::{
    modal::CapacityRequest,
    resources::{
        Capacity, Cluster, Instance, LaunchTemplateVersion, NetworkAttachment, NodeGroup,
        ScalingGroup, Tags,
    },
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::time::Duration;

#[derive(Default)]
struct Counters {
    calls: Vec<String>,
    in_flight: usize,
    max_in_flight: usize,
}

#[derive(Default)]
pub struct FakeCloud {
    pub instances: Vec<Instance>,
    pub clusters: Vec<Cluster>,
    pub node_groups: Vec<NodeGroup>,
    pub scaling_groups: Vec<ScalingGroup>,
    pub network: Vec<NetworkAttachment>,
    pub versions: Vec<LaunchTemplateVersion>,
    /// Operation names ("list_clusters") or resource keys ("web",
    /// "prod/workers") whose calls fail.
    failing: HashSet<String>,
    describe_delay: Option<Duration>,
    counters: Mutex<Counters>,
}

struct InFlight<'a>(&'a Mutex<Counters>);

impl<'a> InFlight<'a> {
    fn enter(counters: &'a Mutex<Counters>) -> Self {
        let mut c = counters.lock();
        c.in_flight += 1;
        c.max_in_flight = c.max_in_flight.max(c.in_flight);
        drop(c);
        Self(counters)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.lock().in_flight -= 1;
    }
}

impl FakeCloud {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn fail(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    #[must_use]
    pub const fn with_describe_delay(mut self, delay: Duration) -> Self {
        self.describe_delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.counters.lock().calls.clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.counters.lock().max_in_flight
    }

    fn record(&self, call: String) {
        self.counters.lock().calls.push(call);
    }

    fn check(&self, operation: &str, key: &str) -> Result<(), AppError> {
        if self.failing.contains(operation) || self.failing.contains(key) {
            return Err(AppError::cloud(operation, format!("{key}: scripted failure")));
        }
        Ok(())
    }

    async fn describe_pause(&self) {
        if let Some(delay) = self.describe_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl CloudClient for FakeCloud {
    async fn list_instances(&self) -> Result<Vec<Instance>, AppError> {
        self.record("list_instances".to_string());
        self.check("list_instances", "")?;
        Ok(self.instances.clone())
    }

    async fn list_clusters(&self) -> Result<Vec<String>, AppError> {
        self.record("list_clusters".to_string());
        self.check("list_clusters", "")?;
        let mut names: Vec<String> = self.clusters.iter().map(|c| c.name.clone()).collect();
        for group in &self.node_groups {
            if !names.contains(&group.cluster) {
                names.push(group.cluster.clone());
            }
        }
        Ok(names)
    }

    async fn describe_cluster(&self, name: &str) -> Result<Cluster, AppError> {
        let _guard = InFlight::enter(&self.counters);
        self.record(format!("describe_cluster {name}"));
        self.describe_pause().await;
        self.check("describe_cluster", name)?;
        self.clusters
            .iter()
            .find(|c| c.name == name)
            .cloned()
            .ok_or_else(|| AppError::cloud("describe_cluster", format!("{name} not found")))
    }

    async fn list_scaling_groups(&self) -> Result<Vec<String>, AppError> {
        self.record("list_scaling_groups".to_string());
        self.check("list_scaling_groups", "")?;
        Ok(self.scaling_groups.iter().map(|g| g.name.clone()).collect())
    }

    async fn describe_scaling_group(&self, name: &str) -> Result<ScalingGroup, AppError> {
        let _guard = InFlight::enter(&self.counters);
        self.record(format!("describe_scaling_group {name}"));
        self.describe_pause().await;
        self.check("describe_scaling_group", name)?;
        self.scaling_groups
            .iter()
            .find(|g| g.name == name)
            .cloned()
            .ok_or_else(|| AppError::cloud("describe_scaling_group", format!("{name} not found")))
    }

    async fn update_scaling_group_capacity(
        &self,
        name: &str,
        request: CapacityRequest,
    ) -> Result<(), AppError> {
        self.record(format!(
            "update_scaling_group_capacity {name} {} {} {}",
            request.min, request.max, request.desired
        ));
        self.check("update_scaling_group_capacity", name)
    }

    async fn list_node_groups(&self, cluster: &str) -> Result<Vec<String>, AppError> {
        self.record(format!("list_node_groups {cluster}"));
        self.check("list_node_groups", cluster)?;
        Ok(self
            .node_groups
            .iter()
            .filter(|g| g.cluster == cluster)
            .map(|g| g.name.clone())
            .collect())
    }

    async fn describe_node_group(
        &self,
        cluster: &str,
        name: &str,
    ) -> Result<NodeGroup, AppError> {
        let _guard = InFlight::enter(&self.counters);
        let key = format!("{cluster}/{name}");
        self.record(format!("describe_node_group {key}"));
        self.describe_pause().await;
        self.check("describe_node_group", &key)?;
        self.node_groups
            .iter()
            .find(|g| g.cluster == cluster && g.name == name)
            .cloned()
            .ok_or_else(|| AppError::cloud("describe_node_group", format!("{key} not found")))
    }

    async fn update_node_group_scaling(
        &self,
        cluster: &str,
        name: &str,
        request: CapacityRequest,
    ) -> Result<(), AppError> {
        let key = format!("{cluster}/{name}");
        self.record(format!(
            "update_node_group_scaling {key} {} {} {}",
            request.min, request.max, request.desired
        ));
        self.check("update_node_group_scaling", &key)
    }

    async fn update_node_group_launch_template(
        &self,
        cluster: &str,
        name: &str,
        template_id: &str,
        version: &str,
    ) -> Result<(), AppError> {
        let key = format!("{cluster}/{name}");
        self.record(format!(
            "update_node_group_launch_template {key} {template_id} {version}"
        ));
        self.check("update_node_group_launch_template", &key)
    }

    async fn list_launch_template_versions(
        &self,
        template_id: &str,
    ) -> Result<Vec<LaunchTemplateVersion>, AppError> {
        self.record(format!("list_launch_template_versions {template_id}"));
        self.check("list_launch_template_versions", template_id)?;
        Ok(self
            .versions
            .iter()
            .filter(|v| v.template_id == template_id)
            .cloned()
            .collect())
    }

    async fn fetch_network_interfaces(&self) -> Result<Vec<NetworkAttachment>, AppError> {
        self.record("fetch_network_interfaces".to_string());
        self.check("fetch_network_interfaces", "")?;
        Ok(self.network.clone())
    }
}

/* ============================== Fixtures ============================== */

pub fn node_group(cluster: &str, name: &str) -> NodeGroup {
    NodeGroup {
        cluster: cluster.to_string(),
        name: name.to_string(),
        status: "ACTIVE".to_string(),
        version: "1.29".to_string(),
        instance_types: smallvec::smallvec!["m5.large".to_string()],
        capacity: Capacity {
            desired: 2,
            min: 1,
            max: 4,
            current: 2,
        },
        launch_template: None,
        created_at: None,
        tags: Tags::new(),
    }
}

pub fn scaling_group(name: &str) -> ScalingGroup {
    ScalingGroup {
        name: name.to_string(),
        capacity: Capacity {
            desired: 2,
            min: 1,
            max: 5,
            current: 2,
        },
        health_check_type: "EC2".to_string(),
        availability_zones: vec!["us-east-1a".to_string()],
        launch_template: None,
        launch_configuration: None,
        load_balancers: Vec::new(),
        target_groups: Vec::new(),
        tags: Tags::new(),
        created_at: None,
    }
}

pub fn cluster(name: &str) -> Cluster {
    Cluster {
        name: name.to_string(),
        status: "ACTIVE".to_string(),
        version: "1.29".to_string(),
        arn: format!("arn:aws:eks:us-east-1:123456789012:cluster/{name}"),
    }
}
