//! src/cloud/aws_cli.rs
//! ============================================================================
//! # AwsCliClient: CloudClient backed by the AWS command-line tool
//!
//! Every call spawns `aws <service> <operation> ... --output json` and
//! decodes stdout with serde. Children are killed when the future is
//! dropped, so `tokio::select!` on the lifetime token really cancels them.
//! A non-zero exit becomes `AppError::ExternalCmd` with the trimmed stderr.

use crate::cloud::client::CloudClient;
use crate::config::Config;
use crate::error::AppError;
use crate::model::{
    modal::CapacityRequest,
    resources::{
        Capacity, Cluster, Instance, InstanceState, LaunchTemplateRef, LaunchTemplateVersion,
        NetworkAttachment, NetworkInterface, NodeGroup, ScalingGroup, Tags,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use smallvec::SmallVec;
use std::collections::{BTreeSet, HashMap};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

const NOT_AVAILABLE: &str = "N/A";
const FIRST_INTERFACE_INDEX: usize = 5;

#[derive(Debug, Clone)]
pub struct AwsCliClient {
    program: String,
    region: String,
    profile: String,
}

impl AwsCliClient {
    pub fn new(
        program: impl Into<String>,
        region: impl Into<String>,
        profile: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            region: region.into(),
            profile: profile.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.aws_cli.as_str(),
            config.region.as_str(),
            config.profile.as_str(),
        )
    }

    fn global_args(&self) -> Vec<String> {
        let mut args = vec!["--output".to_string(), "json".to_string()];
        if !self.region.is_empty() {
            args.push("--region".to_string());
            args.push(self.region.clone());
        }
        if !self.profile.is_empty() {
            args.push("--profile".to_string());
            args.push(self.profile.clone());
        }
        args
    }

    async fn run(&self, service: &str, operation: &str, args: &[String]) -> Result<String, AppError> {
        let started = Instant::now();
        let output = Command::new(&self.program)
            .arg(service)
            .arg(operation)
            .args(args)
            .args(self.global_args())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(
                marker = "AWS_CLI_FAILED",
                operation_type = operation,
                service,
                code = ?output.status.code(),
                "{stderr}"
            );
            return Err(AppError::ExternalCmd {
                cmd: format!("{} {service} {operation}", self.program),
                code: output.status.code(),
                stderr,
            });
        }

        debug!(
            marker = "AWS_CLI",
            operation_type = operation,
            service,
            duration_ms = started.elapsed().as_millis() as u64,
            bytes = output.stdout.len(),
            "CLI call completed"
        );
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn run_json<T: DeserializeOwned>(
        &self,
        service: &str,
        operation: &str,
        args: &[String],
    ) -> Result<T, AppError> {
        let stdout = self.run(service, operation, args).await?;
        Ok(serde_json::from_str(&stdout)?)
    }

    /// Batched subnet lookup; failures degrade to "N/A" for every subnet.
    async fn subnet_cidrs(&self, subnet_ids: BTreeSet<String>) -> HashMap<String, String> {
        if subnet_ids.is_empty() {
            return HashMap::new();
        }
        let mut args = vec!["--subnet-ids".to_string()];
        args.extend(subnet_ids);
        match self
            .run_json::<wire::DescribeSubnetsOutput>("ec2", "describe-subnets", &args)
            .await
        {
            Ok(out) => out
                .subnets
                .into_iter()
                .map(|s| (s.subnet_id, s.cidr_block))
                .collect(),
            Err(e) => {
                warn!(error = %e, "Subnet lookup failed; CIDRs shown as N/A");
                HashMap::new()
            }
        }
    }

    /// Maps `$Latest`/`$Default` to a concrete version number.
    async fn resolve_version(&self, template_id: &str, version: &str) -> Result<String, AppError> {
        if !version.starts_with('$') {
            return Ok(version.to_string());
        }
        let args = vec![
            "--launch-template-id".to_string(),
            template_id.to_string(),
            "--versions".to_string(),
            version.to_string(),
        ];
        let out: wire::DescribeLaunchTemplateVersionsOutput = self
            .run_json("ec2", "describe-launch-template-versions", &args)
            .await?;
        out.launch_template_versions
            .first()
            .map(|v| v.version_number.to_string())
            .ok_or_else(|| {
                AppError::cloud(
                    "DescribeLaunchTemplateVersions",
                    format!("{template_id} has no {version} version"),
                )
            })
    }
}

#[async_trait]
impl CloudClient for AwsCliClient {
    #[instrument(level = "debug", skip(self))]
    async fn list_instances(&self) -> Result<Vec<Instance>, AppError> {
        let out: wire::DescribeInstancesOutput =
            self.run_json("ec2", "describe-instances", &[]).await?;
        Ok(out.instances().map(decode_instance).collect())
    }

    #[instrument(level = "debug", skip(self))]
    async fn list_clusters(&self) -> Result<Vec<String>, AppError> {
        let out: wire::ListClustersOutput = self.run_json("eks", "list-clusters", &[]).await?;
        Ok(out.clusters)
    }

    #[instrument(level = "debug", skip(self))]
    async fn describe_cluster(&self, name: &str) -> Result<Cluster, AppError> {
        let args = vec!["--name".to_string(), name.to_string()];
        let out: wire::DescribeClusterOutput =
            self.run_json("eks", "describe-cluster", &args).await?;
        let c = out.cluster;
        Ok(Cluster {
            name: c.name,
            status: c.status,
            version: c.version,
            arn: c.arn,
        })
    }

    #[instrument(level = "debug", skip(self))]
    async fn list_scaling_groups(&self) -> Result<Vec<String>, AppError> {
        let args = vec![
            "--query".to_string(),
            "AutoScalingGroups[].AutoScalingGroupName".to_string(),
        ];
        let names: Option<Vec<String>> = self
            .run_json("autoscaling", "describe-auto-scaling-groups", &args)
            .await?;
        Ok(names.unwrap_or_default())
    }

    #[instrument(level = "debug", skip(self))]
    async fn describe_scaling_group(&self, name: &str) -> Result<ScalingGroup, AppError> {
        let args = vec![
            "--auto-scaling-group-names".to_string(),
            name.to_string(),
        ];
        let out: wire::DescribeAutoScalingGroupsOutput = self
            .run_json("autoscaling", "describe-auto-scaling-groups", &args)
            .await?;
        out.auto_scaling_groups
            .into_iter()
            .next()
            .map(decode_scaling_group)
            .ok_or_else(|| AppError::cloud("DescribeAutoScalingGroups", format!("{name} not found")))
    }

    #[instrument(level = "info", skip(self))]
    async fn update_scaling_group_capacity(
        &self,
        name: &str,
        request: CapacityRequest,
    ) -> Result<(), AppError> {
        let args = vec![
            "--auto-scaling-group-name".to_string(),
            name.to_string(),
            "--min-size".to_string(),
            request.min.to_string(),
            "--max-size".to_string(),
            request.max.to_string(),
            "--desired-capacity".to_string(),
            request.desired.to_string(),
        ];
        self.run("autoscaling", "update-auto-scaling-group", &args)
            .await
            .map(drop)
    }

    #[instrument(level = "debug", skip(self))]
    async fn list_node_groups(&self, cluster: &str) -> Result<Vec<String>, AppError> {
        let args = vec!["--cluster-name".to_string(), cluster.to_string()];
        let out: wire::ListNodegroupsOutput =
            self.run_json("eks", "list-nodegroups", &args).await?;
        Ok(out.nodegroups)
    }

    #[instrument(level = "debug", skip(self))]
    async fn describe_node_group(
        &self,
        cluster: &str,
        name: &str,
    ) -> Result<NodeGroup, AppError> {
        let args = vec![
            "--cluster-name".to_string(),
            cluster.to_string(),
            "--nodegroup-name".to_string(),
            name.to_string(),
        ];
        let out: wire::DescribeNodegroupOutput =
            self.run_json("eks", "describe-nodegroup", &args).await?;
        Ok(decode_node_group(cluster, out.nodegroup))
    }

    #[instrument(level = "info", skip(self))]
    async fn update_node_group_scaling(
        &self,
        cluster: &str,
        name: &str,
        request: CapacityRequest,
    ) -> Result<(), AppError> {
        let args = vec![
            "--cluster-name".to_string(),
            cluster.to_string(),
            "--nodegroup-name".to_string(),
            name.to_string(),
            "--scaling-config".to_string(),
            format!(
                "minSize={},maxSize={},desiredSize={}",
                request.min, request.max, request.desired
            ),
        ];
        self.run("eks", "update-nodegroup-config", &args)
            .await
            .map(drop)
    }

    #[instrument(level = "info", skip(self))]
    async fn update_node_group_launch_template(
        &self,
        cluster: &str,
        name: &str,
        template_id: &str,
        version: &str,
    ) -> Result<(), AppError> {
        if version.trim().is_empty() {
            return Err(AppError::invalid_input("version", "must not be empty"));
        }
        let resolved = self.resolve_version(template_id, version).await?;
        let args = vec![
            "--cluster-name".to_string(),
            cluster.to_string(),
            "--nodegroup-name".to_string(),
            name.to_string(),
            "--launch-template".to_string(),
            format!("id={template_id},version={resolved}"),
        ];
        self.run("eks", "update-nodegroup-version", &args)
            .await
            .map(drop)
    }

    #[instrument(level = "debug", skip(self))]
    async fn list_launch_template_versions(
        &self,
        template_id: &str,
    ) -> Result<Vec<LaunchTemplateVersion>, AppError> {
        let args = vec!["--launch-template-id".to_string(), template_id.to_string()];
        let out: wire::DescribeLaunchTemplateVersionsOutput = self
            .run_json("ec2", "describe-launch-template-versions", &args)
            .await?;
        Ok(out
            .launch_template_versions
            .into_iter()
            .map(decode_launch_template_version)
            .collect())
    }

    #[instrument(level = "debug", skip(self))]
    async fn fetch_network_interfaces(&self) -> Result<Vec<NetworkAttachment>, AppError> {
        let args = vec![
            "--filters".to_string(),
            "Name=instance-state-name,Values=running".to_string(),
        ];
        let out: wire::DescribeInstancesOutput =
            self.run_json("ec2", "describe-instances", &args).await?;
        let instances: Vec<wire::Instance> = out.instances().collect();

        let subnet_ids: BTreeSet<String> = instances
            .iter()
            .flat_map(|i| i.network_interfaces.iter())
            .filter_map(|n| n.subnet_id.clone())
            .filter(|id| !id.is_empty())
            .collect();
        let cidrs = self.subnet_cidrs(subnet_ids).await;

        Ok(instances
            .into_iter()
            .map(|i| decode_network_attachment(i, &cidrs))
            .collect())
    }
}

/* =============================== Decoding =============================== */

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn tag_map(tags: Vec<wire::Tag>) -> Tags {
    tags.into_iter().map(|t| (t.key, t.value)).collect()
}

fn decode_instance(raw: wire::Instance) -> Instance {
    let tags = tag_map(raw.tags);
    let name = tags.get("Name").cloned().unwrap_or_default();
    let security_groups: SmallVec<[String; 2]> = raw
        .security_groups
        .into_iter()
        .map(|g| {
            if g.group_name.is_empty() {
                g.group_id
            } else {
                g.group_name
            }
        })
        .collect();
    Instance {
        id: raw.instance_id,
        name,
        state: InstanceState::parse(raw.state.as_ref().map_or("", |s| s.name.as_str())),
        private_ip: non_empty(raw.private_ip_address),
        public_ip: non_empty(raw.public_ip_address),
        private_dns: non_empty(raw.private_dns_name),
        public_dns: non_empty(raw.public_dns_name),
        instance_type: raw.instance_type,
        availability_zone: raw
            .placement
            .map(|p| p.availability_zone)
            .unwrap_or_default(),
        tags,
        launch_time: parse_timestamp(raw.launch_time.as_deref()),
        instance_profile: raw
            .iam_instance_profile
            .map(|p| p.arn.rsplit('/').next().unwrap_or(&p.arn).to_string()),
        security_groups,
    }
}

fn decode_node_group(cluster: &str, raw: wire::Nodegroup) -> NodeGroup {
    let scaling = raw.scaling_config.unwrap_or_default();
    NodeGroup {
        cluster: if raw.cluster_name.is_empty() {
            cluster.to_string()
        } else {
            raw.cluster_name
        },
        name: raw.nodegroup_name,
        status: raw.status,
        version: raw.version,
        instance_types: raw.instance_types.into_iter().collect(),
        capacity: Capacity {
            desired: scaling.desired_size,
            min: scaling.min_size,
            max: scaling.max_size,
            // EKS does not report a live node count
            current: scaling.desired_size,
        },
        launch_template: raw.launch_template.map(|lt| LaunchTemplateRef {
            id: lt.id,
            name: lt.name,
            version: lt.version,
        }),
        created_at: parse_timestamp(raw.created_at.as_deref()),
        tags: raw.tags.into_iter().collect(),
    }
}

fn decode_scaling_group(raw: wire::AutoScalingGroup) -> ScalingGroup {
    let launch_template = raw
        .launch_template
        .or_else(|| {
            raw.mixed_instances_policy
                .and_then(|p| p.launch_template)
                .and_then(|lt| lt.launch_template_specification)
        })
        .map(|lt| LaunchTemplateRef {
            id: lt.launch_template_id,
            name: lt.launch_template_name,
            version: lt.version,
        });
    ScalingGroup {
        name: raw.auto_scaling_group_name,
        capacity: Capacity {
            desired: raw.desired_capacity,
            min: raw.min_size,
            max: raw.max_size,
            current: u32::try_from(raw.instances.len()).unwrap_or(u32::MAX),
        },
        health_check_type: raw.health_check_type,
        availability_zones: raw.availability_zones,
        launch_template,
        launch_configuration: non_empty(raw.launch_configuration_name),
        load_balancers: raw.load_balancer_names,
        target_groups: raw.target_group_arns,
        tags: raw.tags.into_iter().map(|t| (t.key, t.value)).collect(),
        created_at: parse_timestamp(raw.created_time.as_deref()),
    }
}

fn decode_launch_template_version(raw: wire::LaunchTemplateVersion) -> LaunchTemplateVersion {
    LaunchTemplateVersion {
        template_id: raw.launch_template_id,
        template_name: raw.launch_template_name,
        version_number: raw.version_number,
        description: raw.version_description.unwrap_or_default(),
        created_at: parse_timestamp(raw.create_time.as_deref()),
        created_by: raw.created_by.unwrap_or_default(),
        is_default: raw.default_version,
    }
}

/// Interfaces are ordered by (card, device) and named `ens5`, `ens6`, ...
fn decode_network_attachment(
    raw: wire::Instance,
    cidrs: &HashMap<String, String>,
) -> NetworkAttachment {
    let instance_name = raw
        .tags
        .iter()
        .find(|t| t.key == "Name")
        .map_or_else(|| NOT_AVAILABLE.to_string(), |t| t.value.clone());
    let dns_name = non_empty(raw.private_dns_name).unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let mut raw_interfaces = raw.network_interfaces;
    raw_interfaces.sort_by_key(|n| {
        n.attachment
            .as_ref()
            .map_or((0, 0), |a| (a.network_card_index.unwrap_or(0), a.device_index.unwrap_or(0)))
    });

    let interfaces = raw_interfaces
        .into_iter()
        .enumerate()
        .map(|(position, n)| {
            let (network_card_index, device_index) = n.attachment.as_ref().map_or((0, 0), |a| {
                (a.network_card_index.unwrap_or(0), a.device_index.unwrap_or(0))
            });
            let subnet_id = non_empty(n.subnet_id).unwrap_or_else(|| NOT_AVAILABLE.to_string());
            let cidr = cidrs
                .get(&subnet_id)
                .cloned()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            let security_group = n
                .groups
                .into_iter()
                .next()
                .map_or_else(|| NOT_AVAILABLE.to_string(), |g| g.group_id);
            NetworkInterface {
                name: format!("ens{}", FIRST_INTERFACE_INDEX + position),
                network_card_index,
                device_index,
                subnet_id,
                cidr,
                security_group,
            }
        })
        .collect();

    NetworkAttachment {
        instance_id: raw.instance_id,
        instance_name,
        dns_name,
        interfaces,
    }
}

/// JSON shapes emitted by the CLI. Only the fields the browser shows.
mod wire {
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct DescribeInstancesOutput {
        #[serde(default)]
        pub reservations: Vec<Reservation>,
    }

    impl DescribeInstancesOutput {
        pub fn instances(self) -> impl Iterator<Item = Instance> {
            self.reservations.into_iter().flat_map(|r| r.instances)
        }
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct Reservation {
        #[serde(default)]
        pub instances: Vec<Instance>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct Instance {
        pub instance_id: String,
        pub state: Option<InstanceState>,
        pub private_ip_address: Option<String>,
        pub public_ip_address: Option<String>,
        pub private_dns_name: Option<String>,
        pub public_dns_name: Option<String>,
        #[serde(default)]
        pub instance_type: String,
        pub placement: Option<Placement>,
        #[serde(default)]
        pub tags: Vec<Tag>,
        pub launch_time: Option<String>,
        pub iam_instance_profile: Option<IamInstanceProfile>,
        #[serde(default)]
        pub security_groups: Vec<GroupIdentifier>,
        #[serde(default)]
        pub network_interfaces: Vec<InstanceNetworkInterface>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct InstanceState {
        #[serde(default)]
        pub name: String,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct Placement {
        #[serde(default)]
        pub availability_zone: String,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct Tag {
        pub key: String,
        #[serde(default)]
        pub value: String,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct IamInstanceProfile {
        #[serde(default)]
        pub arn: String,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct GroupIdentifier {
        #[serde(default)]
        pub group_id: String,
        #[serde(default)]
        pub group_name: String,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct InstanceNetworkInterface {
        pub subnet_id: Option<String>,
        #[serde(default)]
        pub groups: Vec<GroupIdentifier>,
        pub attachment: Option<Attachment>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct Attachment {
        pub device_index: Option<i32>,
        pub network_card_index: Option<i32>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct DescribeSubnetsOutput {
        #[serde(default)]
        pub subnets: Vec<Subnet>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct Subnet {
        pub subnet_id: String,
        #[serde(default)]
        pub cidr_block: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ListClustersOutput {
        #[serde(default)]
        pub clusters: Vec<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct DescribeClusterOutput {
        pub cluster: ClusterDescription,
    }

    #[derive(Debug, Deserialize)]
    pub struct ClusterDescription {
        pub name: String,
        #[serde(default)]
        pub status: String,
        #[serde(default)]
        pub version: String,
        #[serde(default)]
        pub arn: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ListNodegroupsOutput {
        #[serde(default)]
        pub nodegroups: Vec<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct DescribeNodegroupOutput {
        pub nodegroup: Nodegroup,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Nodegroup {
        pub nodegroup_name: String,
        #[serde(default)]
        pub cluster_name: String,
        #[serde(default)]
        pub status: String,
        #[serde(default)]
        pub version: String,
        #[serde(default)]
        pub instance_types: Vec<String>,
        pub scaling_config: Option<ScalingConfig>,
        pub launch_template: Option<NodegroupLaunchTemplate>,
        pub created_at: Option<String>,
        #[serde(default)]
        pub tags: BTreeMap<String, String>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ScalingConfig {
        #[serde(default)]
        pub min_size: u32,
        #[serde(default)]
        pub max_size: u32,
        #[serde(default)]
        pub desired_size: u32,
    }

    #[derive(Debug, Deserialize)]
    pub struct NodegroupLaunchTemplate {
        #[serde(default)]
        pub id: String,
        #[serde(default)]
        pub name: String,
        #[serde(default)]
        pub version: String,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct DescribeAutoScalingGroupsOutput {
        #[serde(default)]
        pub auto_scaling_groups: Vec<AutoScalingGroup>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct AutoScalingGroup {
        pub auto_scaling_group_name: String,
        #[serde(default)]
        pub min_size: u32,
        #[serde(default)]
        pub max_size: u32,
        #[serde(default)]
        pub desired_capacity: u32,
        #[serde(default)]
        pub instances: Vec<serde_json::Value>,
        #[serde(default)]
        pub health_check_type: String,
        #[serde(default)]
        pub availability_zones: Vec<String>,
        pub launch_template: Option<LaunchTemplateSpecification>,
        pub mixed_instances_policy: Option<MixedInstancesPolicy>,
        pub launch_configuration_name: Option<String>,
        #[serde(default)]
        pub load_balancer_names: Vec<String>,
        #[serde(default, rename = "TargetGroupARNs")]
        pub target_group_arns: Vec<String>,
        #[serde(default)]
        pub tags: Vec<Tag>,
        pub created_time: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct LaunchTemplateSpecification {
        #[serde(default)]
        pub launch_template_id: String,
        #[serde(default)]
        pub launch_template_name: String,
        #[serde(default)]
        pub version: String,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct MixedInstancesPolicy {
        pub launch_template: Option<MixedLaunchTemplate>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct MixedLaunchTemplate {
        pub launch_template_specification: Option<LaunchTemplateSpecification>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct DescribeLaunchTemplateVersionsOutput {
        #[serde(default)]
        pub launch_template_versions: Vec<LaunchTemplateVersion>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct LaunchTemplateVersion {
        #[serde(default)]
        pub launch_template_id: String,
        #[serde(default)]
        pub launch_template_name: String,
        pub version_number: i64,
        pub version_description: Option<String>,
        pub create_time: Option<String>,
        pub created_by: Option<String>,
        #[serde(default)]
        pub default_version: bool,
    }
}
