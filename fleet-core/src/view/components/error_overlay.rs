//! src/view/components/error_overlay.rs
use crate::model::ui_state::ViewError;
use crate::view::{layout::truncate, theme::RenderContext};
use ratatui::text::{Line, Span};

/// Error line of a view, with the way out.
pub fn error_line(error: &ViewError, ctx: &RenderContext, width: usize) -> Line<'static> {
    const HINT: &str = "  esc:back";
    let room = width.saturating_sub(HINT.len() + 7);
    Line::from(vec![
        Span::styled("Error: ", ctx.error()),
        Span::styled(truncate(&error.message, room), ctx.error()),
        Span::styled(HINT, ctx.muted()),
    ])
}
