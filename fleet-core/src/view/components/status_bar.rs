//! src/view/components/status_bar.rs
//!
//! The chrome around the body: header, search prompt, transient status line,
//! footer key hints and the persistent status bar.

use crate::model::app_state::Model;
use crate::view::{layout::truncate, theme::RenderContext};
use ratatui::text::{Line, Span};

/// Title with row counts, then the account context.
pub fn header_lines(model: &Model, ctx: &RenderContext, width: usize) -> [Line<'static>; 2] {
    let view = model.current_view();
    let count = if view.is_data_view() {
        let visible = model.datasets.visible_len(view);
        let raw = model.datasets.raw_len(view);
        if visible == raw {
            format!(" ({raw})")
        } else {
            format!(" ({visible}/{raw})")
        }
    } else {
        String::new()
    };
    let title = truncate(&format!("Fleet • {}{count}", view.display_name()), width);

    let context = format!(
        "region: {} | profile: {} | view: {}",
        model.context.region_label(),
        model.context.profile_label(),
        view.display_name()
    );
    [
        Line::from(Span::styled(title, ctx.title())),
        Line::from(Span::styled(truncate(&context, width), ctx.muted())),
    ]
}

/// Prompt while editing; otherwise the saved filter of the view, if any.
pub fn search_line(model: &Model, ctx: &RenderContext, width: usize) -> Line<'static> {
    if let Some(buffer) = model.search.buffer() {
        return Line::from(vec![
            Span::styled("/", ctx.key_hint()),
            Span::styled(truncate(&format!("{buffer}█"), width.saturating_sub(1)), ctx.base()),
        ]);
    }
    let saved = model.search.saved(model.current_view()).trim();
    if saved.is_empty() {
        Line::default()
    } else {
        Line::from(vec![
            Span::styled("filter: ", ctx.label()),
            Span::styled(truncate(saved, width.saturating_sub(8)), ctx.base()),
            Span::styled("  esc:clear", ctx.muted()),
        ])
    }
}

/// Loading indicator for the current view, else the last status message.
pub fn status_line(model: &Model, ctx: &RenderContext, width: usize) -> Line<'static> {
    if let Some(loading) = model.current_loading() {
        return Line::from(Span::styled(
            truncate(&format!("⟳ {}", loading.message), width),
            ctx.label(),
        ));
    }
    match &model.status {
        Some(status) => Line::from(Span::styled(
            truncate(&status.text, width),
            ctx.notification(status.level),
        )),
        None => Line::default(),
    }
}

pub fn footer_line(model: &Model, ctx: &RenderContext, width: usize) -> Line<'static> {
    let mut spans = Vec::new();
    let mut used = 0;
    for (key, action) in model.navigator.key_hints(model.current_view()) {
        let len = key.chars().count() + action.chars().count() + 3;
        if used + len > width {
            break;
        }
        spans.push(Span::styled(key, ctx.key_hint()));
        spans.push(Span::styled(format!(":{action}  "), ctx.muted()));
        used += len;
    }
    Line::from(spans)
}

pub fn status_bar_line(model: &Model, ctx: &RenderContext, width: usize) -> Line<'static> {
    let view = model.current_view();
    let mut parts = vec![
        model.context.region_label().to_string(),
        model.context.profile_label().to_string(),
    ];
    if view.is_data_view() {
        let len = model.visible_len();
        let position = if len == 0 { 0 } else { model.cursor + 1 };
        parts.push(format!("{position}/{len}"));
    }
    if model.auto_refresh.enabled {
        parts.push("auto:on".to_string());
    }
    if model.is_loading() {
        parts.push("loading".to_string());
    }
    Line::from(Span::styled(
        truncate(&parts.join(" | "), width),
        ctx.muted(),
    ))
}
