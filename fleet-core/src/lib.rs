pub mod error;
pub use error::AppError;

pub mod cli;

pub mod config;
pub use config::Config;

pub mod logging;

pub mod cloud {
    pub mod aws_cli;
    pub use aws_cli::AwsCliClient;

    pub mod client;
    pub use client::CloudClient;

    pub mod clipboard;

    pub mod shell;
    pub use shell::{PendingSession, ShellHandoff};

    #[cfg(test)]
    pub mod fake;
}

pub mod controller {
    pub mod actions;
    pub use actions::{Command, Message};

    pub mod event_loop;
    pub use event_loop::EventLoop;

    pub mod handlers;

    pub mod update;
}

pub mod model {
    pub mod app_state;
    pub use app_state::{CloudContext, Model, Settings};

    pub mod dataset;

    pub mod modal;

    pub mod resources;

    pub mod search_state;

    pub mod ui_state;

    pub mod view_stack;
    pub use view_stack::ViewId;
}

pub mod search {
    pub mod matcher;

    pub mod query;
}

pub mod tasks {
    pub mod loaders;

    pub mod updates;

    pub mod worker_pool;
}

pub mod util {
    pub mod humanize;
}

pub mod view {
    pub mod layout;

    pub mod theme;

    pub mod ui;

    pub mod components {
        pub mod dashboard_menu;

        pub mod detail_panel;

        pub mod error_overlay;

        pub mod help_overlay;

        pub mod modal_overlay;

        pub mod resource_table;

        pub mod status_bar;
    }
}
