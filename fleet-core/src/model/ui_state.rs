//! src/model/ui_state.rs
//! Transient UI state: status line, loading indicator and the view error slot.

use crate::model::view_stack::ViewId;
use compact_str::CompactString;
use std::time::Instant;

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NotificationLevel {
    Info = 0,
    Success = 1,
    Warning = 2,
    Error = 3,
}

/// One-line status message with semantic level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: CompactString,
    pub level: NotificationLevel,
}

impl StatusMessage {
    pub fn new(text: impl Into<CompactString>, level: NotificationLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    pub fn info(text: impl Into<CompactString>) -> Self {
        Self::new(text, NotificationLevel::Info)
    }

    pub fn success(text: impl Into<CompactString>) -> Self {
        Self::new(text, NotificationLevel::Success)
    }

    pub fn warning(text: impl Into<CompactString>) -> Self {
        Self::new(text, NotificationLevel::Warning)
    }

    pub fn error(text: impl Into<CompactString>) -> Self {
        Self::new(text, NotificationLevel::Error)
    }
}

/// In-flight load for one view
#[derive(Debug, Clone)]
pub struct LoadingState {
    pub view: ViewId,
    pub message: CompactString,
    pub start_time: Instant,
}

impl LoadingState {
    pub fn new(view: ViewId) -> Self {
        Self {
            view,
            message: CompactString::const_new(view.loading_message()),
            start_time: Instant::now(),
        }
    }

    pub fn with_message(view: ViewId, message: impl Into<CompactString>) -> Self {
        Self {
            view,
            message: message.into(),
            start_time: Instant::now(),
        }
    }
}

/// Error shown in place of a view's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewError {
    pub view: ViewId,
    pub message: String,
}
