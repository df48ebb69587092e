//! src/view/components/modal_overlay.rs
//! Lines for the open scaling or launch-template modal. They take the place
//! of the detail panel while the modal is open.

use crate::model::modal::{
    LaunchTemplateModal, LaunchTemplatePhase, Modal, ScalingModal, ScalingPhase,
    ZERO_CAPACITY_WARNING,
};
use crate::view::{
    layout::{truncate, visible_window},
    theme::RenderContext,
};
use ratatui::text::{Line, Span};

pub fn modal_lines(modal: &Modal, ctx: &RenderContext, width: usize, rows: usize) -> Vec<Line<'static>> {
    let mut lines = match modal {
        Modal::Scaling(m) => scaling_lines(m, ctx),
        Modal::LaunchTemplate(m) => launch_template_lines(m, ctx, width, rows),
    };
    let rule = "─".repeat(width.min(60));
    lines.insert(0, Line::from(Span::styled(rule, ctx.muted())));
    lines
}

fn hints(ctx: &RenderContext, pairs: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(pairs.len() * 3);
    for (i, (key, action)) in pairs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, ctx.key_hint()));
        spans.push(Span::styled(format!(":{action}"), ctx.muted()));
    }
    Line::from(spans)
}

fn error_line(ctx: &RenderContext, error: Option<&String>) -> Option<Line<'static>> {
    error.map(|e| Line::from(Span::styled(format!("Error: {e}"), ctx.error())))
}

fn scaling_lines(modal: &ScalingModal, ctx: &RenderContext) -> Vec<Line<'static>> {
    let c = modal.capacity;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{}: ", modal.target.title()), ctx.title()),
            Span::styled(modal.target.subtitle(), ctx.base()),
        ]),
        Line::from(Span::styled(
            format!(
                "Current: desired {} | min {} | max {} | current {}",
                c.desired, c.min, c.max, c.current
            ),
            ctx.muted(),
        )),
    ];

    match modal.phase {
        ScalingPhase::Editing => {
            lines.push(Line::from(vec![
                Span::styled("New desired capacity: ", ctx.label()),
                Span::styled(format!("{}█", modal.input), ctx.base()),
            ]));
            lines.extend(error_line(ctx, modal.error.as_ref()));
            lines.push(hints(
                ctx,
                &[("enter", "apply"), ("ctrl+u", "clear"), ("esc", "cancel")],
            ));
        }
        ScalingPhase::Confirming => {
            lines.push(Line::from(Span::styled(
                modal.target.zero_capacity_prompt(),
                ctx.warning(),
            )));
            lines.push(Line::from(Span::styled(ZERO_CAPACITY_WARNING, ctx.error())));
            lines.push(hints(ctx, &[("y/enter", "confirm"), ("n/esc", "cancel")]));
        }
        ScalingPhase::Submitting { desired } => {
            lines.push(Line::from(Span::styled(
                format!("Scaling {} to {desired}...", modal.target.display_name()),
                ctx.label(),
            )));
            lines.extend(error_line(ctx, modal.error.as_ref()));
            lines.push(hints(ctx, &[("esc", "close")]));
        }
    }
    lines
}

fn launch_template_lines(
    modal: &LaunchTemplateModal,
    ctx: &RenderContext,
    width: usize,
    rows: usize,
) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Update Launch Template: ", ctx.title()),
            Span::styled(modal.qualified_name(), ctx.base()),
        ]),
        Line::from(Span::styled(
            format!(
                "Template: {} ({}) | current version: {}",
                modal.template_name, modal.template_id, modal.current_version
            ),
            ctx.muted(),
        )),
    ];

    match modal.phase {
        LaunchTemplatePhase::Loading => {
            lines.push(Line::from(Span::styled(
                "Loading launch template versions...",
                ctx.label(),
            )));
            lines.push(hints(ctx, &[("esc", "cancel")]));
        }
        LaunchTemplatePhase::Selecting if modal.options.is_empty() => {
            match error_line(ctx, modal.error.as_ref()) {
                Some(line) => lines.push(line),
                None => lines.push(Line::from(Span::styled(
                    "No launch template versions found",
                    ctx.muted(),
                ))),
            }
            lines.push(hints(ctx, &[("r", "reload"), ("esc", "cancel")]));
        }
        LaunchTemplatePhase::Selecting => {
            let budget = rows.saturating_sub(lines.len() + 3).max(1);
            for i in visible_window(modal.cursor, modal.options.len(), budget) {
                let option = &modal.options[i];
                let selected = i == modal.cursor;
                let marker = if selected { "▶ " } else { "  " };
                let style = if selected { ctx.selected() } else { ctx.base() };
                let mut spans = vec![Span::raw(marker), Span::styled(option.label.clone(), style)];
                if !option.detail.is_empty() {
                    let room = width.saturating_sub(option.label.chars().count() + 5);
                    spans.push(Span::styled(
                        format!(" — {}", truncate(&option.detail, room)),
                        ctx.muted(),
                    ));
                }
                lines.push(Line::from(spans));
            }
            lines.extend(error_line(ctx, modal.error.as_ref()));
            lines.push(hints(
                ctx,
                &[("↑/↓", "move"), ("enter", "apply"), ("r", "reload"), ("esc", "cancel")],
            ));
        }
        LaunchTemplatePhase::Submitting => {
            let version = modal.requested.as_deref().unwrap_or("?");
            lines.push(Line::from(Span::styled(
                format!("Updating {} to version {version}...", modal.qualified_name()),
                ctx.label(),
            )));
            lines.extend(error_line(ctx, modal.error.as_ref()));
            lines.push(hints(ctx, &[("esc", "close")]));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::fake::{node_group, scaling_group};
    use crate::model::resources::{LaunchTemplateRef, LaunchTemplateVersion};

    fn flatten(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_scaling_prompt_and_confirmation() {
        let ctx = RenderContext::new(true);
        let mut modal = ScalingModal::for_scaling_group(1, &scaling_group("web"));
        modal.push_digit('3');
        let out = flatten(&modal_lines(&Modal::Scaling(modal.clone()), &ctx, 80, 10));
        assert!(out.contains("Scale Auto Scaling Group: web"));
        assert!(out.contains("New desired capacity: 3█"));

        modal.phase = ScalingPhase::Confirming;
        let out = flatten(&modal_lines(&Modal::Scaling(modal), &ctx, 80, 10));
        assert!(out.contains("Scale ASG 'web' to 0 instances?"));
        assert!(out.contains(ZERO_CAPACITY_WARNING));
    }

    #[test]
    fn test_version_picker_marks_cursor() {
        let mut group = node_group("cluster1", "ng1");
        group.launch_template = Some(LaunchTemplateRef {
            id: "lt-1".into(),
            name: "ng1-lt".into(),
            version: "3".into(),
        });
        let mut modal = LaunchTemplateModal::open(2, &group).unwrap();
        modal.set_versions(
            (3..=5)
                .map(|n| LaunchTemplateVersion {
                    template_id: "lt-1".into(),
                    template_name: "ng1-lt".into(),
                    version_number: n,
                    description: String::new(),
                    created_at: None,
                    created_by: String::new(),
                    is_default: n == 4,
                })
                .collect(),
        );
        let out = flatten(&modal_lines(
            &Modal::LaunchTemplate(modal),
            &RenderContext::new(true),
            80,
            20,
        ));
        assert!(out.contains("▶ Version 3 • current"));
        assert!(out.contains("  Version 4 • default"));
        assert!(out.contains("$Latest"));
    }
}
