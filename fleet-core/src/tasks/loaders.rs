// fleet-core/src/tasks/loaders.rs

//! ``src/tasks/loaders.rs``
//! ============================================================================
//! # Per-view loaders
//!
//! Each data view has exactly one loader that produces a whole dataset or an
//! error. List calls that fail surface as the view's error; individual
//! describe calls that fail leave their row out.

use crate::cloud::client::CloudClient;
use crate::config::LoaderConfig;
use crate::controller::actions::Payload;
use crate::error::AppError;
use crate::model::{
    resources::{Cluster, NodeGroup, ScalingGroup},
    view_stack::ViewId,
};
use crate::tasks::worker_pool::{fan_out, with_cancel};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

/// Fan-out bounds per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderLimits {
    pub scaling_groups: usize,
    pub node_groups: usize,
}

impl Default for LoaderLimits {
    fn default() -> Self {
        Self {
            scaling_groups: 6,
            node_groups: 8,
        }
    }
}

impl From<&LoaderConfig> for LoaderLimits {
    fn from(config: &LoaderConfig) -> Self {
        Self {
            scaling_groups: config.scaling_group_workers,
            node_groups: config.node_group_workers,
        }
    }
}

/// Runs the loader for `view`.
#[instrument(skip(client, limits, cancel))]
pub async fn load_view(
    client: Arc<dyn CloudClient>,
    view: ViewId,
    limits: LoaderLimits,
    cancel: CancellationToken,
) -> Result<Payload, AppError> {
    let started = Instant::now();
    let payload = match view {
        ViewId::Instances => {
            Payload::Instances(with_cancel(&cancel, client.list_instances()).await?)
        }
        ViewId::Clusters => Payload::Clusters(load_clusters(client, limits, &cancel).await?),
        ViewId::ScalingGroups => {
            Payload::ScalingGroups(load_scaling_groups(client, limits, &cancel).await?)
        }
        ViewId::NodeGroups => {
            Payload::NodeGroups(load_node_groups(client, limits, &cancel).await?)
        }
        ViewId::NetworkInterfaces => {
            Payload::Network(with_cancel(&cancel, client.fetch_network_interfaces()).await?)
        }
        ViewId::Dashboard | ViewId::Help => {
            return Err(AppError::precondition(format!(
                "{} has no loader",
                view.display_name()
            )));
        }
    };

    info!(
        marker = "LOADER",
        operation_type = "load_complete",
        view = ?view,
        rows = payload.len(),
        duration_ms = started.elapsed().as_millis() as u64,
        "Loader finished"
    );
    Ok(payload)
}

async fn load_clusters(
    client: Arc<dyn CloudClient>,
    limits: LoaderLimits,
    cancel: &CancellationToken,
) -> Result<Vec<Cluster>, AppError> {
    let names = with_cancel(cancel, client.list_clusters()).await?;
    fan_out("clusters", names, limits.node_groups, cancel, move |name: String| {
        let client = Arc::clone(&client);
        async move { client.describe_cluster(&name).await }
    })
    .await
}

async fn load_scaling_groups(
    client: Arc<dyn CloudClient>,
    limits: LoaderLimits,
    cancel: &CancellationToken,
) -> Result<Vec<ScalingGroup>, AppError> {
    let names = with_cancel(cancel, client.list_scaling_groups()).await?;
    fan_out(
        "scaling_groups",
        names,
        limits.scaling_groups,
        cancel,
        move |name: String| {
            let client = Arc::clone(&client);
            async move { client.describe_scaling_group(&name).await }
        },
    )
    .await
}

/// clusters -> node group names per cluster -> describe every pair.
async fn load_node_groups(
    client: Arc<dyn CloudClient>,
    limits: LoaderLimits,
    cancel: &CancellationToken,
) -> Result<Vec<NodeGroup>, AppError> {
    let clusters = with_cancel(cancel, client.list_clusters()).await?;

    let lister = Arc::clone(&client);
    let per_cluster: Vec<Vec<(String, String)>> = fan_out(
        "node_group_names",
        clusters,
        limits.node_groups,
        cancel,
        move |cluster: String| {
            let client = Arc::clone(&lister);
            async move {
                let names = client.list_node_groups(&cluster).await?;
                Ok::<_, AppError>(
                    names
                        .into_iter()
                        .map(|name| (cluster.clone(), name))
                        .collect(),
                )
            }
        },
    )
    .await?;
    let pairs: Vec<(String, String)> = per_cluster.into_iter().flatten().collect();

    fan_out(
        "node_groups",
        pairs,
        limits.node_groups,
        cancel,
        move |(cluster, name): (String, String)| {
            let client = Arc::clone(&client);
            async move { client.describe_node_group(&cluster, &name).await }
        },
    )
    .await
}
