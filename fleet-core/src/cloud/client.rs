//! src/cloud/client.rs
//! ============================================================================
//! # CloudClient: the provider operations the controller consumes
//!
//! Implementations return plain value snapshots. Cancellation is enforced at
//! the call site with `tokio::select!`, so a dropped future must abandon its
//! work (the CLI adapter kills its child process on drop).

use crate::error::AppError;
use crate::model::{
    modal::CapacityRequest,
    resources::{
        Cluster, Instance, LaunchTemplateVersion, NetworkAttachment, NodeGroup, ScalingGroup,
    },
};
use async_trait::async_trait;

#[async_trait]
pub trait CloudClient: Send + Sync + 'static {
    async fn list_instances(&self) -> Result<Vec<Instance>, AppError>;

    /// Cluster names only.
    async fn list_clusters(&self) -> Result<Vec<String>, AppError>;

    async fn describe_cluster(&self, name: &str) -> Result<Cluster, AppError>;

    /// Scaling group names only.
    async fn list_scaling_groups(&self) -> Result<Vec<String>, AppError>;

    async fn describe_scaling_group(&self, name: &str) -> Result<ScalingGroup, AppError>;

    async fn update_scaling_group_capacity(
        &self,
        name: &str,
        request: CapacityRequest,
    ) -> Result<(), AppError>;

    /// Node group names of one cluster.
    async fn list_node_groups(&self, cluster: &str) -> Result<Vec<String>, AppError>;

    async fn describe_node_group(&self, cluster: &str, name: &str)
    -> Result<NodeGroup, AppError>;

    async fn update_node_group_scaling(
        &self,
        cluster: &str,
        name: &str,
        request: CapacityRequest,
    ) -> Result<(), AppError>;

    async fn update_node_group_launch_template(
        &self,
        cluster: &str,
        name: &str,
        template_id: &str,
        version: &str,
    ) -> Result<(), AppError>;

    async fn list_launch_template_versions(
        &self,
        template_id: &str,
    ) -> Result<Vec<LaunchTemplateVersion>, AppError>;

    /// Instances joined with their interfaces, one row per instance.
    async fn fetch_network_interfaces(&self) -> Result<Vec<NetworkAttachment>, AppError>;
}
