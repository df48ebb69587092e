// fleet-core/src/tasks/updates.rs

//! ``src/tasks/updates.rs``
//! Write operations started from the modals. Each runs under the lifetime
//! token; a modal closed by the user does not cancel its request.

use crate::cloud::client::CloudClient;
use crate::error::AppError;
use crate::model::{
    modal::{CapacityRequest, ModalTarget},
    resources::LaunchTemplateVersion,
};
use crate::tasks::worker_pool::with_cancel;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

#[instrument(skip(client, cancel))]
pub async fn scale(
    client: Arc<dyn CloudClient>,
    target: ModalTarget,
    request: CapacityRequest,
    cancel: CancellationToken,
) -> Result<(), AppError> {
    match &target {
        ModalTarget::ScalingGroup { name } => {
            with_cancel(&cancel, client.update_scaling_group_capacity(name, request)).await?;
        }
        ModalTarget::NodeGroup { cluster, name } => {
            with_cancel(
                &cancel,
                client.update_node_group_scaling(cluster, name, request),
            )
            .await?;
        }
    }
    info!(
        marker = "SCALE",
        operation_type = "capacity_update",
        target = %target.display_name(),
        min = request.min,
        max = request.max,
        desired = request.desired,
        "Capacity update accepted"
    );
    Ok(())
}

#[instrument(skip(client, cancel))]
pub async fn list_versions(
    client: Arc<dyn CloudClient>,
    template_id: String,
    cancel: CancellationToken,
) -> Result<Vec<LaunchTemplateVersion>, AppError> {
    with_cancel(&cancel, client.list_launch_template_versions(&template_id)).await
}

#[instrument(skip(client, cancel))]
pub async fn update_launch_template(
    client: Arc<dyn CloudClient>,
    cluster: String,
    node_group: String,
    template_id: String,
    version: String,
    cancel: CancellationToken,
) -> Result<(), AppError> {
    with_cancel(
        &cancel,
        client.update_node_group_launch_template(&cluster, &node_group, &template_id, &version),
    )
    .await?;
    info!(
        marker = "LAUNCH_TEMPLATE",
        operation_type = "version_update",
        cluster = %cluster,
        node_group = %node_group,
        version = %version,
        "Launch template update accepted"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::fake::FakeCloud;

    #[tokio::test]
    async fn test_scale_routes_by_target() {
        let fake = Arc::new(FakeCloud::new());
        let client: Arc<dyn CloudClient> = fake.clone();
        let request = CapacityRequest {
            min: 1,
            max: 5,
            desired: 3,
        };

        scale(
            Arc::clone(&client),
            ModalTarget::ScalingGroup { name: "web".into() },
            request,
            CancellationToken::new(),
        )
        .await
        .unwrap();
        scale(
            client,
            ModalTarget::NodeGroup {
                cluster: "prod".into(),
                name: "workers".into(),
            },
            request,
            CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(
            fake.calls(),
            [
                "update_scaling_group_capacity web 1 5 3",
                "update_node_group_scaling prod/workers 1 5 3"
            ]
        );
    }

    #[tokio::test]
    async fn test_update_failure_propagates() {
        let client: Arc<dyn CloudClient> = Arc::new(FakeCloud::new().fail("cluster1/ng1"));
        let err = update_launch_template(
            client,
            "cluster1".into(),
            "ng1".into(),
            "lt-1".into(),
            "5".into(),
            CancellationToken::new(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("scripted failure"));
    }
}
