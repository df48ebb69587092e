//! src/view/theme.rs
//! ============================================================================
//! # Catppuccin Mocha palette and the render context
//!
//! Colors are from the official Catppuccin theme specification:
//! https://github.com/catppuccin/catppuccin
//!
//! Styles are looked up through a `RenderContext` that is passed into every
//! render call. With `monochrome` set, no foreground or background color is
//! ever emitted; only modifiers remain.

use crate::model::resources::{InstanceState, ScalingStatus};
use crate::model::ui_state::NotificationLevel;
use chrono::{DateTime, Utc};
use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(30, 30, 46); // Base
pub const CURRENT_LINE: Color = Color::Rgb(69, 71, 90); // Surface1
pub const FOREGROUND: Color = Color::Rgb(205, 214, 244); // Text
pub const COMMENT: Color = Color::Rgb(127, 132, 156); // Overlay1
pub const CYAN: Color = Color::Rgb(137, 220, 235); // Sky
pub const GREEN: Color = Color::Rgb(166, 227, 161); // Green
pub const ORANGE: Color = Color::Rgb(250, 179, 135); // Peach
pub const PURPLE: Color = Color::Rgb(203, 166, 247); // Mauve
pub const RED: Color = Color::Rgb(243, 139, 168); // Red
pub const YELLOW: Color = Color::Rgb(249, 226, 175); // Yellow

/// Everything a render pass needs besides the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub monochrome: bool,
    /// Reference point for relative timestamps.
    pub now: DateTime<Utc>,
}

impl RenderContext {
    #[must_use]
    pub fn new(monochrome: bool) -> Self {
        Self {
            monochrome,
            now: Utc::now(),
        }
    }

    #[must_use]
    pub const fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    fn fg(&self, color: Color) -> Style {
        if self.monochrome {
            Style::default()
        } else {
            Style::default().fg(color)
        }
    }

    #[must_use]
    pub fn base(&self) -> Style {
        if self.monochrome {
            Style::default()
        } else {
            Style::default().fg(FOREGROUND).bg(BACKGROUND)
        }
    }

    #[must_use]
    pub fn title(&self) -> Style {
        self.fg(PURPLE).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn column_header(&self) -> Style {
        self.fg(YELLOW).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn label(&self) -> Style {
        self.fg(CYAN)
    }

    #[must_use]
    pub fn muted(&self) -> Style {
        if self.monochrome {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(COMMENT)
        }
    }

    #[must_use]
    pub fn selected(&self) -> Style {
        if self.monochrome {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default()
                .bg(CURRENT_LINE)
                .add_modifier(Modifier::BOLD)
        }
    }

    #[must_use]
    pub fn key_hint(&self) -> Style {
        self.fg(YELLOW).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn error(&self) -> Style {
        self.fg(RED).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn warning(&self) -> Style {
        self.fg(ORANGE)
    }

    #[must_use]
    pub fn notification(&self, level: NotificationLevel) -> Style {
        match level {
            NotificationLevel::Info => self.fg(CYAN),
            NotificationLevel::Success => self.fg(GREEN),
            NotificationLevel::Warning => self.warning(),
            NotificationLevel::Error => self.error(),
        }
    }

    #[must_use]
    pub fn instance_state(&self, state: &InstanceState) -> Style {
        match state {
            InstanceState::Running => self.fg(GREEN),
            InstanceState::Pending | InstanceState::Stopping => self.fg(YELLOW),
            InstanceState::Stopped | InstanceState::ShuttingDown => self.fg(RED),
            InstanceState::Terminated | InstanceState::Other(_) => self.muted(),
        }
    }

    #[must_use]
    pub fn scaling_status(&self, status: ScalingStatus) -> Style {
        match status {
            ScalingStatus::Healthy => self.fg(GREEN),
            ScalingStatus::ScalingUp | ScalingStatus::ScalingDown => self.fg(YELLOW),
        }
    }

    /// Cluster and node group status strings (`ACTIVE`, `CREATING`, ...).
    #[must_use]
    pub fn resource_status(&self, status: &str) -> Style {
        match status.to_ascii_uppercase().as_str() {
            "ACTIVE" => self.fg(GREEN),
            "CREATING" | "UPDATING" | "DELETING" => self.fg(YELLOW),
            "FAILED" | "DEGRADED" | "CREATE_FAILED" | "DELETE_FAILED" => self.fg(RED),
            _ => self.base(),
        }
    }
}
