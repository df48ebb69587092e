//! src/view/layout.rs
//! Column widths, truncation and vertical splits for the text frame.

use crate::model::view_stack::ViewId;
use std::ops::Range;

/// Width of the selection marker in front of every table row.
pub const MARKER_WIDTH: usize = 2;

pub const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Compact column: ids, sizes, states.
    Fixed(usize),
    /// Shares the remaining width, never narrower than `min`.
    Flex { min: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub width: ColumnWidth,
}

impl Column {
    pub const fn fixed(title: &'static str, width: usize) -> Self {
        Self {
            title,
            width: ColumnWidth::Fixed(width),
        }
    }

    pub const fn flex(title: &'static str, min: usize) -> Self {
        Self {
            title,
            width: ColumnWidth::Flex { min },
        }
    }
}

/// Resolves column widths for a terminal `total` columns wide.
///
/// Fixed columns keep their width; the rest is split evenly between flex
/// columns, with any remainder going to the first one. Columns are separated
/// by one space.
#[must_use]
pub fn column_widths(columns: &[Column], total: usize) -> Vec<usize> {
    let gaps = columns.len().saturating_sub(1);
    let fixed: usize = columns
        .iter()
        .map(|c| match c.width {
            ColumnWidth::Fixed(w) => w,
            ColumnWidth::Flex { .. } => 0,
        })
        .sum();
    let flex_count = columns
        .iter()
        .filter(|c| matches!(c.width, ColumnWidth::Flex { .. }))
        .count();

    let free = total.saturating_sub(MARKER_WIDTH + gaps + fixed);
    let share = if flex_count == 0 { 0 } else { free / flex_count };
    let mut remainder = if flex_count == 0 {
        0
    } else {
        free % flex_count
    };

    columns
        .iter()
        .map(|c| match c.width {
            ColumnWidth::Fixed(w) => w,
            ColumnWidth::Flex { min } => {
                let extra = std::mem::take(&mut remainder);
                (share + extra).max(min)
            }
        })
        .collect()
}

/// Cuts `text` to `width` characters, ending in an ellipsis when shortened.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    match width {
        0 => String::new(),
        w => {
            let mut out: String = text.chars().take(w - 1).collect();
            out.push(ELLIPSIS);
            out
        }
    }
}

/// `truncate`, then pads with spaces to exactly `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let mut out = truncate(text, width);
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    out
}

/// Rows to draw so that `cursor` stays visible, centered where possible.
#[must_use]
pub fn visible_window(cursor: usize, len: usize, rows: usize) -> Range<usize> {
    if len <= rows {
        return 0..len;
    }
    let start = cursor
        .saturating_sub(rows / 2)
        .min(len - rows);
    start..start + rows
}

pub const MIN_LIST_ROWS: usize = 3;
pub const MIN_DETAIL_ROWS: usize = 4;

/// Share of the free area given to the list.
#[must_use]
pub const fn list_ratio(view: ViewId) -> f32 {
    match view {
        ViewId::Instances | ViewId::NetworkInterfaces => 0.45,
        _ => 0.5,
    }
}

/// Splits `free` lines into (list, detail). The detail panel is dropped
/// entirely when it cannot get its minimum.
#[must_use]
pub fn split_rows(free: usize, ratio: f32) -> (usize, usize) {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let list = ((free as f32 * ratio).round() as usize)
        .max(MIN_LIST_ROWS)
        .min(free);
    let detail = free - list;
    if detail < MIN_DETAIL_ROWS {
        (free, 0)
    } else {
        (list, detail)
    }
}
