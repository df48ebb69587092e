//! src/view/ui.rs
//! ============================================================
//! Frame renderer. `render` is a pure function of the model and the
//! render context and yields the whole screen as styled text; `draw`
//! paints that text into a ratatui frame.

use crate::model::{
    app_state::Model,
    dataset::Dataset,
    resources::Resource,
    view_stack::ViewId,
};
use crate::search::matcher::Searchable;
use crate::view::{
    components::{
        dashboard_menu::menu_lines,
        detail_panel::DetailPanel,
        error_overlay::error_line,
        help_overlay::help_lines,
        modal_overlay::modal_lines,
        resource_table::{TableRow, table_lines},
        status_bar::{footer_line, header_lines, search_line, status_bar_line, status_line},
    },
    layout::{list_ratio, split_rows, truncate},
    theme::RenderContext,
};
use ratatui::{
    Frame,
    text::{Line, Span, Text},
    widgets::Paragraph,
};
use tracing::instrument;

/// Header (2), search prompt, status line, footer and status bar.
pub const CHROME_LINES: usize = 6;

/// Table rows (header plus one) kept above an open modal.
const MIN_MODAL_TABLE_ROWS: usize = 2;

#[instrument(level = "trace", skip_all)]
pub fn draw(frame: &mut Frame<'_>, model: &Model, ctx: &RenderContext) {
    let area = frame.area();
    let text = render(model, ctx, area.width, area.height);
    frame.render_widget(Paragraph::new(text).style(ctx.base()), area);
}

#[must_use]
pub fn render(model: &Model, ctx: &RenderContext, width: u16, height: u16) -> Text<'static> {
    let width = usize::from(width);
    let free = usize::from(height).saturating_sub(CHROME_LINES);

    let mut lines: Vec<Line<'static>> = Vec::with_capacity(usize::from(height));
    lines.extend(header_lines(model, ctx, width));

    let mut body = body_lines(model, ctx, width, free);
    body.truncate(free);
    body.resize(free, Line::default());
    lines.extend(body);

    lines.push(search_line(model, ctx, width));
    lines.push(status_line(model, ctx, width));
    lines.push(footer_line(model, ctx, width));
    lines.push(status_bar_line(model, ctx, width));
    Text::from(lines)
}

fn body_lines(model: &Model, ctx: &RenderContext, width: usize, free: usize) -> Vec<Line<'static>> {
    let datasets = &model.datasets;
    match model.current_view() {
        ViewId::Dashboard => menu_lines(model.cursor, ctx),
        ViewId::Help => help_lines(ctx),
        ViewId::Instances => data_view(&datasets.instances, model, ctx, width, free),
        ViewId::Clusters => data_view(&datasets.clusters, model, ctx, width, free),
        ViewId::ScalingGroups => data_view(&datasets.scaling_groups, model, ctx, width, free),
        ViewId::NodeGroups => data_view(&datasets.node_groups, model, ctx, width, free),
        ViewId::NetworkInterfaces => data_view(&datasets.network, model, ctx, width, free),
    }
}

fn data_view<T>(
    dataset: &Dataset<T>,
    model: &Model,
    ctx: &RenderContext,
    width: usize,
    free: usize,
) -> Vec<Line<'static>>
where
    T: TableRow + DetailPanel + Searchable + Resource,
{
    let view = model.current_view();
    let mut lines = Vec::with_capacity(free);
    if let Some(error) = model.view_error() {
        lines.push(error_line(error, ctx, width));
    }

    if !dataset.is_loaded() {
        if model.current_loading().is_none() && lines.is_empty() {
            lines.push(Line::from(Span::styled("No data loaded. Press r to refresh.", ctx.muted())));
        }
        return lines;
    }

    if dataset.visible_len() == 0 {
        let saved = model.search.saved(view).trim();
        let text = if dataset.raw_len() > 0 && !saved.is_empty() {
            format!("No matches for filter '{saved}'")
        } else {
            format!("No {} found", view.display_name())
        };
        lines.push(Line::from(Span::styled(truncate(&text, width), ctx.muted())));
        return lines;
    }

    let free = free.saturating_sub(lines.len());
    let (list_rows, lower) = match &model.modal {
        Some(modal) => {
            let room = free.saturating_sub(MIN_MODAL_TABLE_ROWS);
            let mut overlay = modal_lines(modal, ctx, width, free / 2);
            if overlay.len() > room {
                // The prompt, error and key hints sit at the bottom.
                overlay.drain(..overlay.len() - room);
            }
            (free - overlay.len(), overlay)
        }
        None => {
            let (list_rows, detail_rows) = split_rows(free, list_ratio(view));
            let mut detail = Vec::new();
            if detail_rows > 0 {
                if let Some(record) = dataset.visible(model.cursor) {
                    detail.push(Line::from(Span::styled(
                        "─".repeat(width.min(60)),
                        ctx.muted(),
                    )));
                    detail.extend(record.detail_lines(ctx));
                    detail.truncate(detail_rows);
                }
            }
            (list_rows, detail)
        }
    };

    let mut table = table_lines(dataset, model.cursor, ctx, width, list_rows);
    table.resize(list_rows, Line::default());
    lines.extend(table);
    lines.extend(lower);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::fake::scaling_group;
    use crate::cloud::shell::ShellHandoff;
    use crate::controller::actions::{Message, Payload};
    use crate::controller::handlers::utils::{enter_key, key};
    use crate::model::{
        app_state::{CloudContext, Settings},
        resources::{Instance, InstanceState, Tags},
    };
    use smallvec::SmallVec;

    fn model() -> Model {
        Model::new(
            CloudContext {
                region: "us-east-1".into(),
                profile: String::new(),
            },
            Settings::default(),
            ShellHandoff::default(),
        )
    }

    fn instance(id: &str, name: &str, state: InstanceState) -> Instance {
        Instance {
            id: id.into(),
            name: name.into(),
            state,
            private_ip: Some("10.0.0.1".into()),
            public_ip: None,
            private_dns: None,
            public_dns: None,
            instance_type: "t3.micro".into(),
            availability_zone: "us-east-1a".into(),
            tags: Tags::new(),
            launch_time: None,
            instance_profile: None,
            security_groups: SmallVec::new(),
        }
    }

    fn screen(model: &Model) -> Vec<String> {
        let ctx = RenderContext::new(true);
        let text = render(model, &ctx, 120, 30);
        for line in &text.lines {
            for span in &line.spans {
                assert_eq!(span.style.fg, None);
                assert_eq!(span.style.bg, None);
            }
        }
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn with_instances(m: &mut Model) {
        m.update(Message::Key(enter_key()));
        m.update(Message::Loaded {
            view: ViewId::Instances,
            result: Ok(Payload::Instances(vec![
                instance("i-1", "web", InstanceState::Running),
                instance("i-2", "batch", InstanceState::Stopped),
                instance("i-3", "api", InstanceState::Running),
            ])),
        });
    }

    #[test]
    fn test_dashboard_frame() {
        let lines = screen(&model());
        assert_eq!(lines.len(), 30);
        assert!(lines[0].starts_with("Fleet • Dashboard"));
        assert!(lines[1].contains("region: us-east-1 | profile: default"));
        assert!(lines.iter().any(|l| l.starts_with("▶ EC2 Instances")));
        assert!(lines[28].contains("enter:open"));
    }

    #[test]
    fn test_instances_table_and_detail() {
        let mut m = model();
        with_instances(&mut m);
        let lines = screen(&m);

        assert!(lines[0].contains("EC2 Instances (3)"));
        assert!(lines.iter().any(|l| l.contains("Instance ID") && l.contains("Private IP")));
        assert!(lines.iter().any(|l| l.starts_with("▶ web")));
        assert!(lines.iter().any(|l| l.starts_with("Instance: web")));
        assert!(lines[29].contains("1/3"));
    }

    #[test]
    fn test_precondition_error_line() {
        let mut m = model();
        with_instances(&mut m);
        m.update(Message::Key(key('j')));
        m.update(Message::Key(enter_key()));
        let lines = screen(&m);
        assert!(lines.iter().any(|l| {
            l.contains("Error: instance batch is not running (state: stopped)") && l.contains("esc:back")
        }));
    }

    #[test]
    fn test_filter_counts_and_prompt() {
        let mut m = model();
        with_instances(&mut m);
        m.search.set_saved(ViewId::Instances, "state:running");
        m.refilter(ViewId::Instances);
        let lines = screen(&m);
        assert!(lines[0].contains("(2/3)"));
        assert!(lines.iter().any(|l| l.starts_with("filter: state:running")));
    }

    #[test]
    fn test_modal_and_auto_marker() {
        let mut m = model();
        m.update(Message::Key(key('j')));
        m.update(Message::Key(key('j')));
        m.update(Message::Key(enter_key()));
        m.update(Message::Loaded {
            view: ViewId::ScalingGroups,
            result: Ok(Payload::ScalingGroups(vec![scaling_group("web")])),
        });
        m.update(Message::Key(key('a')));
        m.update(Message::Key(enter_key()));

        let lines = screen(&m);
        assert!(lines.iter().any(|l| l.contains("Scale Auto Scaling Group: web")));
        assert!(lines[29].contains("auto:on"));
    }

    #[test]
    fn test_short_terminal_keeps_modal_prompt() {
        let mut m = model();
        m.update(Message::Key(key('j')));
        m.update(Message::Key(key('j')));
        m.update(Message::Key(enter_key()));
        m.update(Message::Loaded {
            view: ViewId::ScalingGroups,
            result: Ok(Payload::ScalingGroups(vec![scaling_group("web")])),
        });
        m.update(Message::Key(enter_key()));
        m.update(Message::Key(key('0')));
        m.update(Message::Key(enter_key()));

        let text = render(&m, &RenderContext::new(true), 120, 12);
        let lines: Vec<String> = text
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(lines.len(), 12);
        assert!(lines.iter().any(|l| l.contains("scale all instances down to zero")));
        assert!(lines.iter().any(|l| l.contains("y/enter:confirm")));
        assert!(lines.iter().any(|l| l.contains("Name") && l.contains("Health")));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut m = model();
        with_instances(&mut m);
        let text = render(&m, &RenderContext::new(false), 10, 3);
        assert!(!text.lines.is_empty());
    }
}
