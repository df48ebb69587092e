//! src/main.rs
//! Fleet browser entry point: configuration, logging, terminal lifecycle and
//! the shell handoff that runs after the UI has exited.

use std::{
    io::{self, Stdout},
    panic::PanicHookInfo,
    process::ExitCode,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use fleet_core::{
    AppError,
    cli::Cli,
    cloud::{
        aws_cli::AwsCliClient,
        client::CloudClient,
        clipboard::SystemClipboard,
        shell::{PendingSession, ShellHandoff},
    },
    config::Config,
    controller::event_loop::EventLoop,
    logging::{LoggerBuilder, LoggerConfig},
    model::app_state::{CloudContext, Model, Settings},
    tasks::loaders::LoaderLimits,
    view::{theme::RenderContext, ui},
};

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> ExitCode {
    match run().await {
        Ok(None) => ExitCode::SUCCESS,
        Ok(Some(session)) => hand_off(&session).await,
        Err(e) => {
            eprintln!("fleet: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the UI. Returns the session to start, if the operator asked for one.
async fn run() -> Result<Option<PendingSession>> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())
        .await
        .context("Failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    let _guard: WorkerGuard = init_logging(&config).await?;
    info!(
        marker = "APP_START",
        operation_type = "startup",
        region = %config.region,
        profile = %config.profile,
        "Starting fleet browser"
    );

    let client: Arc<dyn CloudClient> = Arc::new(AwsCliClient::from_config(&config));
    let shell = ShellHandoff::new(
        config.aws_cli.as_str(),
        config.region.as_str(),
        config.profile.as_str(),
    );
    let mut model = Model::new(
        CloudContext {
            region: config.region.clone(),
            profile: config.profile.clone(),
        },
        Settings::from(&config),
        shell,
    );
    let mut event_loop = EventLoop::new(
        client,
        Box::new(SystemClipboard::new()),
        LoaderLimits::from(&config.loader),
        CancellationToken::new(),
    );
    let monochrome = config.no_color;

    setup_panic_handler();
    let mut terminal = setup_terminal()?;
    if let Ok(size) = terminal.size() {
        model.size.width = size.width;
        model.size.height = size.height;
    }

    let outcome = event_loop
        .run(&mut model, |model| {
            let ctx = RenderContext::new(monochrome);
            terminal
                .draw(|frame| ui::draw(frame, model, &ctx))
                .map(|_| ())
                .map_err(|e| AppError::Terminal(e.to_string()))
        })
        .await;

    if let Err(e) = cleanup_terminal(&mut terminal) {
        warn!("Failed to cleanup terminal: {e}");
    }
    outcome.context("Application runtime error")?;

    info!("Application exited cleanly");
    Ok(model.take_pending_handoff())
}

async fn init_logging(config: &Config) -> Result<WorkerGuard> {
    let settings = LoggerConfig::from_settings(&config.logging, Config::data_dir());
    LoggerBuilder::new()
        .with_config(settings)
        .build()
        .await
        .context("Failed to initialize logging")
}

async fn hand_off(session: &PendingSession) -> ExitCode {
    println!("Starting session with instance {}...", session.instance_id);
    match session.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(instance_id = %session.instance_id, error = %e, "Shell session failed");
            eprintln!("fleet: session failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!("Terminal setup complete");
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Terminal cleanup complete");
    Ok(())
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
