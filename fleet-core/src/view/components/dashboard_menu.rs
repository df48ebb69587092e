//! src/view/components/dashboard_menu.rs
use crate::model::app_state::DASHBOARD_MENU;
use crate::view::{layout::fit, theme::RenderContext};
use ratatui::text::{Line, Span};

pub fn menu_lines(cursor: usize, ctx: &RenderContext) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("Select a resource to browse", ctx.label())),
        Line::default(),
    ];
    lines.extend(DASHBOARD_MENU.iter().enumerate().map(|(i, item)| {
        let selected = i == cursor;
        let (marker, style) = if selected {
            ("▶ ", ctx.selected())
        } else {
            ("  ", ctx.base())
        };
        Line::from(vec![
            Span::raw(marker),
            Span::styled(fit(item.title, 22), style),
            Span::styled(item.description, ctx.muted()),
        ])
    }));
    lines
}
