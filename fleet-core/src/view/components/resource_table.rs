//! src/view/components/resource_table.rs
//! ============================================================================
//! # Per-view tables
//!
//! Every resource type declares its columns and how one record turns into
//! cells. The generic renderer below takes care of widths, truncation, the
//! row window around the cursor and the selection marker.

use crate::model::{
    dataset::Dataset,
    resources::{Cluster, Instance, NetworkAttachment, NodeGroup, Resource, ScalingGroup},
};
use crate::search::matcher::Searchable;
use crate::view::{
    layout::{Column, column_widths, fit, visible_window},
    theme::RenderContext,
};
use ratatui::{
    style::Style,
    text::{Line, Span},
};

pub trait TableRow {
    const COLUMNS: &'static [Column];

    fn cells(&self, ctx: &RenderContext) -> Vec<(String, Style)>;
}

fn na(value: Option<&String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| "N/A".to_string())
}

impl TableRow for Instance {
    const COLUMNS: &'static [Column] = &[
        Column::flex("Name", 16),
        Column::fixed("Instance ID", 19),
        Column::fixed("State", 13),
        Column::fixed("Type", 12),
        Column::fixed("Private IP", 15),
        Column::fixed("Zone", 12),
    ];

    fn cells(&self, ctx: &RenderContext) -> Vec<(String, Style)> {
        vec![
            (self.display_name().to_string(), ctx.base()),
            (self.id.clone(), ctx.base()),
            (self.state.to_string(), ctx.instance_state(&self.state)),
            (self.instance_type.clone(), ctx.base()),
            (na(self.private_ip.as_ref()), ctx.base()),
            (self.availability_zone.clone(), ctx.muted()),
        ]
    }
}

impl TableRow for Cluster {
    const COLUMNS: &'static [Column] = &[
        Column::flex("Name", 20),
        Column::fixed("Status", 10),
        Column::fixed("Version", 8),
        Column::flex("ARN", 20),
    ];

    fn cells(&self, ctx: &RenderContext) -> Vec<(String, Style)> {
        vec![
            (self.name.clone(), ctx.base()),
            (self.status.clone(), ctx.resource_status(&self.status)),
            (self.version.clone(), ctx.base()),
            (self.arn.clone(), ctx.muted()),
        ]
    }
}

impl TableRow for ScalingGroup {
    const COLUMNS: &'static [Column] = &[
        Column::flex("Name", 20),
        Column::fixed("Desired", 7),
        Column::fixed("Min", 5),
        Column::fixed("Max", 5),
        Column::fixed("Current", 7),
        Column::fixed("Status", 12),
        Column::fixed("Health", 6),
    ];

    fn cells(&self, ctx: &RenderContext) -> Vec<(String, Style)> {
        let c = self.capacity;
        let status = self.status();
        vec![
            (self.name.clone(), ctx.base()),
            (c.desired.to_string(), ctx.base()),
            (c.min.to_string(), ctx.base()),
            (c.max.to_string(), ctx.base()),
            (c.current.to_string(), ctx.base()),
            (status.to_string(), ctx.scaling_status(status)),
            (self.health_check_type.clone(), ctx.muted()),
        ]
    }
}

impl TableRow for NodeGroup {
    const COLUMNS: &'static [Column] = &[
        Column::flex("Cluster", 12),
        Column::flex("Node Group", 16),
        Column::fixed("Status", 10),
        Column::fixed("Desired", 7),
        Column::fixed("Min", 5),
        Column::fixed("Max", 5),
        Column::flex("Instance Types", 12),
        Column::fixed("LT Version", 10),
    ];

    fn cells(&self, ctx: &RenderContext) -> Vec<(String, Style)> {
        let c = self.capacity;
        let lt_version = self
            .launch_template
            .as_ref()
            .map_or_else(|| "-".to_string(), |lt| lt.version.clone());
        vec![
            (self.cluster.clone(), ctx.muted()),
            (self.name.clone(), ctx.base()),
            (self.status.clone(), ctx.resource_status(&self.status)),
            (c.desired.to_string(), ctx.base()),
            (c.min.to_string(), ctx.base()),
            (c.max.to_string(), ctx.base()),
            (self.instance_types.join(", "), ctx.base()),
            (lt_version, ctx.base()),
        ]
    }
}

impl TableRow for NetworkAttachment {
    const COLUMNS: &'static [Column] = &[
        Column::flex("Instance", 16),
        Column::fixed("Instance ID", 19),
        Column::fixed("Interfaces", 10),
        Column::flex("DNS", 20),
    ];

    fn cells(&self, ctx: &RenderContext) -> Vec<(String, Style)> {
        vec![
            (self.instance_name.clone(), ctx.base()),
            (self.instance_id.clone(), ctx.base()),
            (self.interfaces.len().to_string(), ctx.base()),
            (self.dns_name.clone(), ctx.muted()),
        ]
    }
}

/// Header line plus at most `rows - 1` data rows.
pub fn table_lines<T>(
    dataset: &Dataset<T>,
    cursor: usize,
    ctx: &RenderContext,
    width: usize,
    rows: usize,
) -> Vec<Line<'static>>
where
    T: TableRow + Searchable + Resource,
{
    let widths = column_widths(T::COLUMNS, width);
    let mut lines = Vec::with_capacity(rows);

    let mut header = vec![Span::raw("  ")];
    for (i, (column, w)) in T::COLUMNS.iter().zip(&widths).enumerate() {
        if i > 0 {
            header.push(Span::raw(" "));
        }
        header.push(Span::styled(fit(column.title, *w), ctx.column_header()));
    }
    lines.push(Line::from(header));

    let body_rows = rows.saturating_sub(1);
    for position in visible_window(cursor, dataset.visible_len(), body_rows) {
        let Some(record) = dataset.visible(position) else {
            continue;
        };
        let selected = position == cursor;
        let marker = if selected { "▶ " } else { "  " };
        let mut spans = vec![Span::raw(marker)];
        for (i, ((text, style), w)) in record.cells(ctx).into_iter().zip(&widths).enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let style = if selected {
                style.patch(ctx.selected())
            } else {
                style
            };
            spans.push(Span::styled(fit(&text, *w), style));
        }
        lines.push(Line::from(spans));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::fake::scaling_group;
    use crate::search::query::Query;

    fn flatten(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_window_follows_cursor() {
        let mut ds = Dataset::<ScalingGroup>::default();
        ds.replace(
            (0..20).map(|i| scaling_group(&format!("asg-{i:02}"))).collect(),
            &Query::default(),
        );
        let ctx = RenderContext::new(true);
        let lines = flatten(&table_lines(&ds, 15, &ctx, 100, 6));

        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("Desired"));
        assert!(lines.iter().any(|l| l.starts_with("▶ asg-15")));
        assert!(!lines.iter().any(|l| l.contains("asg-00")));
    }

    #[test]
    fn test_long_names_are_truncated() {
        let mut ds = Dataset::<ScalingGroup>::default();
        ds.replace(
            vec![scaling_group(&"x".repeat(80))],
            &Query::default(),
        );
        let ctx = RenderContext::new(true);
        let lines = flatten(&table_lines(&ds, 0, &ctx, 80, 5));
        assert!(lines[1].contains('…'));
        assert!(lines[1].chars().count() <= 80);
    }
}
