//! src/view/components/detail_panel.rs
//! Detail lines for the focused row of each data view.

use crate::model::resources::{
    Cluster, Instance, LaunchTemplateRef, NetworkAttachment, NodeGroup, ScalingGroup, Tags,
};
use crate::util::humanize::relative_timestamp;
use crate::view::{
    layout::{fit, truncate},
    theme::RenderContext,
};
use ratatui::text::{Line, Span};

pub trait DetailPanel {
    fn detail_lines(&self, ctx: &RenderContext) -> Vec<Line<'static>>;
}

const LABEL_WIDTH: usize = 18;

fn field(ctx: &RenderContext, label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(fit(&format!("{label}:"), LABEL_WIDTH), ctx.label()),
        Span::styled(value.into(), ctx.base()),
    ])
}

fn heading(ctx: &RenderContext, text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(text.into(), ctx.title()))
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

fn or_na(value: Option<&String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| "N/A".to_string())
}

/// Tags sorted by key; `Name` is already shown as the title.
fn tag_lines(ctx: &RenderContext, tags: &Tags) -> Vec<Line<'static>> {
    let visible: Vec<_> = tags.iter().filter(|(k, _)| k.as_str() != "Name").collect();
    if visible.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![Line::from(Span::styled("Tags:", ctx.label()))];
    lines.extend(visible.into_iter().map(|(k, v)| {
        Line::from(vec![
            Span::styled(format!("  {k}"), ctx.muted()),
            Span::raw(" = "),
            Span::styled(v.clone(), ctx.base()),
        ])
    }));
    lines
}

fn launch_template_text(lt: &LaunchTemplateRef) -> String {
    format!("{} ({}) version {}", lt.name, lt.id, lt.version)
}

impl DetailPanel for Instance {
    fn detail_lines(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        let mut lines = vec![
            heading(ctx, format!("Instance: {}", self.display_name())),
            field(ctx, "ID", self.id.clone()),
            Line::from(vec![
                Span::styled(fit("State:", LABEL_WIDTH), ctx.label()),
                Span::styled(self.state.to_string(), ctx.instance_state(&self.state)),
            ]),
            field(ctx, "Type", self.instance_type.clone()),
            field(ctx, "Zone", self.availability_zone.clone()),
            field(ctx, "Private IP", or_na(self.private_ip.as_ref())),
            field(ctx, "Public IP", or_na(self.public_ip.as_ref())),
            field(ctx, "Private DNS", or_na(self.private_dns.as_ref())),
            field(ctx, "Public DNS", or_na(self.public_dns.as_ref())),
            field(ctx, "Launched", relative_timestamp(self.launch_time, ctx.now)),
            field(ctx, "IAM profile", or_na(self.instance_profile.as_ref())),
            field(ctx, "Security groups", list_or_none(&self.security_groups)),
        ];
        lines.extend(tag_lines(ctx, &self.tags));
        lines
    }
}

impl DetailPanel for Cluster {
    fn detail_lines(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        vec![
            heading(ctx, format!("Cluster: {}", self.name)),
            Line::from(vec![
                Span::styled(fit("Status:", LABEL_WIDTH), ctx.label()),
                Span::styled(self.status.clone(), ctx.resource_status(&self.status)),
            ]),
            field(ctx, "Version", self.version.clone()),
            field(ctx, "ARN", self.arn.clone()),
        ]
    }
}

impl DetailPanel for ScalingGroup {
    fn detail_lines(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        let c = self.capacity;
        let status = self.status();
        let source = match (&self.launch_template, &self.launch_configuration) {
            (Some(lt), _) => ("Launch template", launch_template_text(lt)),
            (None, Some(config)) => ("Launch config", config.clone()),
            (None, None) => ("Launch template", "none".to_string()),
        };
        let mut lines = vec![
            heading(ctx, format!("Auto Scaling Group: {}", self.name)),
            field(
                ctx,
                "Capacity",
                format!(
                    "desired {} | min {} | max {} | current {}",
                    c.desired, c.min, c.max, c.current
                ),
            ),
            Line::from(vec![
                Span::styled(fit("Status:", LABEL_WIDTH), ctx.label()),
                Span::styled(status.to_string(), ctx.scaling_status(status)),
            ]),
            field(ctx, "Health check", self.health_check_type.clone()),
            field(ctx, "Zones", list_or_none(&self.availability_zones)),
            field(ctx, source.0, source.1),
            field(ctx, "Load balancers", list_or_none(&self.load_balancers)),
            field(ctx, "Target groups", list_or_none(&self.target_groups)),
            field(ctx, "Created", relative_timestamp(self.created_at, ctx.now)),
        ];
        lines.extend(tag_lines(ctx, &self.tags));
        lines
    }
}

impl DetailPanel for NodeGroup {
    fn detail_lines(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        let c = self.capacity;
        let mut lines = vec![
            heading(ctx, format!("Node Group: {}", self.name)),
            field(ctx, "Cluster", self.cluster.clone()),
            Line::from(vec![
                Span::styled(fit("Status:", LABEL_WIDTH), ctx.label()),
                Span::styled(self.status.clone(), ctx.resource_status(&self.status)),
            ]),
            field(ctx, "Version", self.version.clone()),
            field(ctx, "Instance types", list_or_none(&self.instance_types)),
            field(
                ctx,
                "Capacity",
                format!(
                    "desired {} | min {} | max {} | current {}",
                    c.desired, c.min, c.max, c.current
                ),
            ),
        ];
        match &self.launch_template {
            Some(lt) => {
                lines.push(field(ctx, "Launch template", lt.name.clone()));
                lines.push(field(ctx, "Template ID", lt.id.clone()));
                lines.push(field(ctx, "Template version", lt.version.clone()));
            }
            None => lines.push(field(ctx, "Launch template", "none")),
        }
        lines.push(field(
            ctx,
            "Created",
            relative_timestamp(self.created_at, ctx.now),
        ));
        lines.extend(tag_lines(ctx, &self.tags));
        lines
    }
}

impl DetailPanel for NetworkAttachment {
    fn detail_lines(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        let mut lines = vec![
            heading(
                ctx,
                format!("Interfaces: {} ({})", self.instance_name, self.instance_id),
            ),
            field(ctx, "DNS", self.dns_name.clone()),
            Line::from(Span::styled(
                format!(
                    "{} {} {} {} {} {}",
                    fit("Name", 6),
                    fit("Card", 4),
                    fit("Device", 6),
                    fit("Subnet", 24),
                    fit("CIDR", 18),
                    "Security Group"
                ),
                ctx.column_header(),
            )),
        ];
        lines.extend(self.interfaces.iter().map(|iface| {
            Line::from(Span::styled(
                format!(
                    "{} {} {} {} {} {}",
                    fit(&iface.name, 6),
                    fit(&iface.network_card_index.to_string(), 4),
                    fit(&iface.device_index.to_string(), 6),
                    fit(&iface.subnet_id, 24),
                    fit(&iface.cidr, 18),
                    truncate(&iface.security_group, 40)
                ),
                ctx.base(),
            ))
        }));
        lines
    }
}
