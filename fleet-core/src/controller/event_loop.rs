//! ``src/controller/event_loop.rs``
//! ============================================================================
//! # Event loop: the only place that performs I/O
//!
//! Terminal events, completions of background commands and shutdown signals
//! are multiplexed into `Message`s and fed to `Model::update` one at a time.
//! Every `Command` the model returns is launched here as a detached task that
//! sends exactly one `Message` back over the unbounded channel. Loads report
//! cancellation as an error completion; other commands end silently when the
//! lifetime token fires. The search debounce keeps a single slot: scheduling
//! a new timer aborts the old one.

use crate::cloud::{client::CloudClient, clipboard::Clipboard};
use crate::controller::actions::{Command, Message};
use crate::error::AppError;
use crate::model::app_state::Model;
use crate::tasks::{
    loaders::{LoaderLimits, load_view},
    updates,
};
use crossterm::event::{Event as TermEvent, EventStream};
use futures::StreamExt;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

pub type SharedClipboard = Arc<Mutex<Box<dyn Clipboard>>>;

pub struct EventLoop {
    client: Arc<dyn CloudClient>,
    clipboard: SharedClipboard,
    limits: LoaderLimits,
    cancel: CancellationToken,
    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
    debounce: Option<JoinHandle<()>>,
    // Monitoring
    message_count: u64,
}

impl EventLoop {
    pub fn new(
        client: Arc<dyn CloudClient>,
        clipboard: Box<dyn Clipboard>,
        limits: LoaderLimits,
        cancel: CancellationToken,
    ) -> Self {
        info!(
            marker = "EVENT_LOOP",
            operation_type = "init",
            scaling_group_workers = limits.scaling_groups,
            node_group_workers = limits.node_groups,
            "Initializing event loop"
        );
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            clipboard: Arc::new(Mutex::new(clipboard)),
            limits,
            cancel,
            tx,
            rx,
            debounce: None,
            message_count: 0,
        }
    }

    /// Drives the model until it asks to quit or the token is cancelled.
    /// `draw` is called once before the first event and after every message.
    pub async fn run<D>(&mut self, model: &mut Model, mut draw: D) -> Result<(), AppError>
    where
        D: FnMut(&Model) -> Result<(), AppError>,
    {
        let mut events = EventStream::new();
        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        let startup = model.startup();
        self.execute(startup);
        draw(model)?;

        loop {
            let message = tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => match map_terminal_event(event) {
                        Some(message) => message,
                        None => continue,
                    },
                    Some(Err(e)) => {
                        warn!(error = %e, "Terminal event stream error");
                        return Err(AppError::Terminal(e.to_string()));
                    }
                    None => {
                        info!("Terminal event stream closed");
                        Message::Shutdown
                    }
                },

                Some(message) = self.rx.recv() => message,

                () = &mut shutdown => {
                    info!(marker = "EVENT_LOOP", operation_type = "signal", "Shutdown signal received");
                    Message::Shutdown
                }

                () = self.cancel.cancelled() => Message::Shutdown,
            };

            let started = Instant::now();
            let command = model.update(message);
            let quit = self.execute(command);
            draw(model)?;
            self.message_count += 1;

            let elapsed = started.elapsed();
            if elapsed.as_millis() > 16 {
                debug!(
                    marker = "PERF_SLOW_EVENT",
                    operation_type = "message_processing",
                    duration_ms = elapsed.as_millis() as u64,
                    processed = self.message_count,
                    "Slow message processing"
                );
            }

            if quit {
                self.shutdown();
                return Ok(());
            }
        }
    }

    /// Launches `command`. Returns true when it contains `Quit`; nothing else
    /// in a quitting batch is started.
    pub fn execute(&mut self, command: Command) -> bool {
        if command.is_quit() {
            return true;
        }
        for command in command.flatten() {
            self.launch(command.clone());
        }
        false
    }

    /// Next completion from a background task.
    pub async fn recv(&mut self) -> Option<Message> {
        self.rx.recv().await
    }

    /// Cancels the lifetime token and drops the pending debounce timer.
    pub fn shutdown(&mut self) {
        info!(
            marker = "EVENT_LOOP",
            operation_type = "shutdown",
            processed = self.message_count,
            "Stopping background work"
        );
        self.cancel.cancel();
        if let Some(handle) = self.debounce.take() {
            handle.abort();
        }
    }

    fn launch(&mut self, command: Command) {
        trace!(?command, "Launching command");
        let tx = self.tx.clone();
        let cancel = self.cancel.clone();

        match command {
            Command::None | Command::Batch(_) | Command::Quit => {}

            Command::Load(view) => {
                let client = Arc::clone(&self.client);
                let limits = self.limits;
                tokio::spawn(async move {
                    let result = load_view(client, view, limits, cancel).await;
                    send(&tx, Message::Loaded { view, result });
                });
            }

            Command::ScheduleSearchDebounce {
                view,
                generation,
                delay,
            } => {
                if let Some(previous) = self.debounce.take() {
                    previous.abort();
                }
                self.debounce = Some(tokio::spawn(async move {
                    tokio::select! {
                        () = cancel.cancelled() => {}
                        () = tokio::time::sleep(delay) => {
                            send(&tx, Message::SearchDebounceFired { view, generation });
                        }
                    }
                }));
            }

            Command::ScheduleAutoRefresh { generation, delay } => {
                tokio::spawn(async move {
                    tokio::select! {
                        () = cancel.cancelled() => {}
                        () = tokio::time::sleep(delay) => {
                            send(&tx, Message::AutoRefreshTick { generation });
                        }
                    }
                });
            }

            Command::Scale {
                ticket,
                target,
                request,
            } => {
                let client = Arc::clone(&self.client);
                tokio::spawn(async move {
                    let result = updates::scale(client, target.clone(), request, cancel).await;
                    if matches!(result, Err(AppError::Cancelled)) {
                        return;
                    }
                    send(
                        &tx,
                        Message::ScaleFinished {
                            ticket,
                            target,
                            result,
                        },
                    );
                });
            }

            Command::ListLaunchTemplateVersions {
                ticket,
                template_id,
            } => {
                let client = Arc::clone(&self.client);
                tokio::spawn(async move {
                    let result = updates::list_versions(client, template_id, cancel).await;
                    if matches!(result, Err(AppError::Cancelled)) {
                        return;
                    }
                    send(&tx, Message::LaunchTemplateVersionsLoaded { ticket, result });
                });
            }

            Command::UpdateLaunchTemplate {
                ticket,
                cluster,
                node_group,
                template_id,
                version,
            } => {
                let client = Arc::clone(&self.client);
                tokio::spawn(async move {
                    let result = updates::update_launch_template(
                        client,
                        cluster,
                        node_group,
                        template_id,
                        version.clone(),
                        cancel,
                    )
                    .await;
                    if matches!(result, Err(AppError::Cancelled)) {
                        return;
                    }
                    send(
                        &tx,
                        Message::LaunchTemplateUpdated {
                            ticket,
                            version,
                            result,
                        },
                    );
                });
            }

            Command::WriteClipboard { label, value } => {
                let clipboard = Arc::clone(&self.clipboard);
                tokio::spawn(async move {
                    let text = value.clone();
                    let result = tokio::task::spawn_blocking(move || clipboard.lock().set_text(&text))
                        .await
                        .unwrap_or_else(|e| Err(AppError::Clipboard(e.to_string())));
                    send(
                        &tx,
                        Message::ClipboardWritten {
                            label,
                            value,
                            result,
                        },
                    );
                });
            }
        }
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn send(tx: &mpsc::UnboundedSender<Message>, message: Message) {
    if tx.send(message).is_err() {
        trace!("Event loop gone; dropping completion");
    }
}

fn map_terminal_event(event: TermEvent) -> Option<Message> {
    match event {
        TermEvent::Key(key_event) => {
            trace!(code = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
            Some(Message::Key(key_event))
        }
        TermEvent::Resize(width, height) => {
            debug!("Terminal resize: {width}x{height}");
            Some(Message::Resize { width, height })
        }
        other => {
            trace!("Unhandled terminal event: {:?}", other);
            None
        }
    }
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};
    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            term.recv().await;
        }
        Err(e) => {
            warn!(error = %e, "SIGTERM handler unavailable");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    std::future::pending::<()>().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::clipboard::MemoryClipboard;
    use crate::cloud::fake::{FakeCloud, cluster, scaling_group};
    use crate::controller::actions::Payload;
    use crate::model::modal::{CapacityRequest, ModalTarget};
    use crate::model::view_stack::ViewId;
    use std::time::Duration;

    fn event_loop(fake: FakeCloud) -> (EventLoop, Arc<FakeCloud>) {
        let fake = Arc::new(fake);
        let client: Arc<dyn CloudClient> = fake.clone();
        let looper = EventLoop::new(
            client,
            Box::new(MemoryClipboard::default()),
            LoaderLimits::default(),
            CancellationToken::new(),
        );
        (looper, fake)
    }

    #[tokio::test]
    async fn test_load_sends_loaded() {
        let mut fake = FakeCloud::new();
        fake.clusters = vec![cluster("prod")];
        let (mut looper, _) = event_loop(fake);

        assert!(!looper.execute(Command::Load(ViewId::Clusters)));
        match looper.recv().await {
            Some(Message::Loaded {
                view: ViewId::Clusters,
                result: Ok(Payload::Clusters(clusters)),
            }) => assert_eq!(clusters.len(), 1),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancelled_load_still_completes() {
        let mut fake = FakeCloud::new();
        fake.clusters = vec![cluster("prod")];
        let (mut looper, _) = event_loop(fake);
        looper.shutdown();

        looper.execute(Command::Load(ViewId::Clusters));
        match looper.recv().await {
            Some(Message::Loaded {
                view: ViewId::Clusters,
                result: Err(e),
            }) => assert!(e.is_cancelled()),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_quit_batch_launches_nothing() {
        let (mut looper, fake) = event_loop(FakeCloud::new());
        let quit = looper.execute(Command::batch([
            Command::Load(ViewId::Instances),
            Command::Quit,
        ]));
        assert!(quit);
        tokio::task::yield_now().await;
        assert!(fake.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_replaces_pending_timer() {
        let (mut looper, _) = event_loop(FakeCloud::new());
        let delay = Duration::from_millis(150);
        looper.execute(Command::ScheduleSearchDebounce {
            view: ViewId::Instances,
            generation: 1,
            delay,
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        looper.execute(Command::ScheduleSearchDebounce {
            view: ViewId::Instances,
            generation: 2,
            delay,
        });

        match looper.recv().await {
            Some(Message::SearchDebounceFired { generation, .. }) => assert_eq!(generation, 2),
            other => panic!("unexpected message: {other:?}"),
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(looper.rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_refresh_tick_after_delay() {
        let (mut looper, _) = event_loop(FakeCloud::new());
        looper.execute(Command::ScheduleAutoRefresh {
            generation: 3,
            delay: Duration::from_secs(30),
        });
        tokio::time::sleep(Duration::from_secs(29)).await;
        assert!(looper.rx.try_recv().is_err());
        assert!(matches!(
            looper.recv().await,
            Some(Message::AutoRefreshTick { generation: 3 })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_pending_timers() {
        let (mut looper, _) = event_loop(FakeCloud::new());
        looper.execute(Command::ScheduleAutoRefresh {
            generation: 1,
            delay: Duration::from_secs(5),
        });
        looper.shutdown();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(looper.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_scale_reports_back() {
        let mut fake = FakeCloud::new();
        fake.scaling_groups = vec![scaling_group("web")];
        let (mut looper, fake) = event_loop(fake);
        let target = ModalTarget::ScalingGroup { name: "web".into() };
        looper.execute(Command::Scale {
            ticket: 7,
            target: target.clone(),
            request: CapacityRequest {
                min: 1,
                max: 5,
                desired: 3,
            },
        });

        match looper.recv().await {
            Some(Message::ScaleFinished {
                ticket: 7,
                target: t,
                result: Ok(()),
            }) => assert_eq!(t, target),
            other => panic!("unexpected message: {other:?}"),
        }
        assert_eq!(fake.calls(), ["update_scaling_group_capacity web 1 5 3"]);
    }

    #[tokio::test]
    async fn test_clipboard_write() {
        let store = MemoryClipboard::default();
        let value = Arc::clone(&store.value);
        let client: Arc<dyn CloudClient> = Arc::new(FakeCloud::new());
        let mut looper = EventLoop::new(
            client,
            Box::new(store),
            LoaderLimits::default(),
            CancellationToken::new(),
        );
        looper.execute(Command::WriteClipboard {
            label: "instance ID".into(),
            value: "i-123".into(),
        });

        assert!(matches!(
            looper.recv().await,
            Some(Message::ClipboardWritten { result: Ok(()), .. })
        ));
        assert_eq!(value.lock().as_deref(), Some("i-123"));
    }
}
