// fleet-core/src/tasks/worker_pool.rs

//! ``src/tasks/worker_pool.rs``
//! ============================================================================
//! # Bounded describe fan-out
//!
//! One task per item, gated by a counting semaphore sized
//! `min(limit, items)`. Successful results are appended under a mutex held
//! only for the push. Per-item failures are logged and dropped; only
//! cancellation of the lifetime token aborts the batch.

use crate::error::AppError;
use parking_lot::Mutex;
use std::{future::Future, sync::Arc, time::Instant};
use tokio::{sync::Semaphore, task::JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Awaits `fut` unless `cancel` fires first.
pub async fn with_cancel<T, F>(cancel: &CancellationToken, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(AppError::Cancelled),
        result = fut => result,
    }
}

/// Runs `op` over every item with at most `limit` calls in flight.
///
/// Results come back in completion order.
pub async fn fan_out<I, T, F, Fut>(
    label: &'static str,
    items: Vec<I>,
    limit: usize,
    cancel: &CancellationToken,
    op: F,
) -> Result<Vec<T>, AppError>
where
    I: Send + 'static,
    T: Send + 'static,
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, AppError>> + Send + 'static,
{
    if cancel.is_cancelled() {
        return Err(AppError::Cancelled);
    }
    let total = items.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let started = Instant::now();
    let workers = limit.max(1).min(total);
    let semaphore = Arc::new(Semaphore::new(workers));
    let results: Arc<Mutex<Vec<T>>> = Arc::new(Mutex::new(Vec::with_capacity(total)));
    let op = Arc::new(op);
    let mut set = JoinSet::new();

    for item in items {
        let semaphore = Arc::clone(&semaphore);
        let results = Arc::clone(&results);
        let op = Arc::clone(&op);
        let cancel = cancel.clone();

        set.spawn(async move {
            let _permit = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(AppError::Cancelled),
                permit = semaphore.acquire_owned() => permit.map_err(|_| AppError::Cancelled)?,
            };
            if cancel.is_cancelled() {
                return Err(AppError::Cancelled);
            }
            match with_cancel(&cancel, op(item)).await {
                Ok(value) => results.lock().push(value),
                Err(AppError::Cancelled) => return Err(AppError::Cancelled),
                Err(e) => {
                    debug!(
                        marker = "LOADER",
                        operation_type = "describe_skipped",
                        label,
                        error = %e,
                        "Describe failed; omitting row"
                    );
                }
            }
            Ok(())
        });
    }

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                set.abort_all();
                debug!(label, "Fan-out aborted: {e}");
                return Err(e);
            }
            Err(join_error) => {
                warn!(label, error = %join_error, "Describe worker panicked; omitting row");
            }
        }
    }

    let collected = std::mem::take(&mut *results.lock());
    debug!(
        marker = "LOADER",
        operation_type = "describe_fanout_complete",
        label,
        requested = total,
        loaded = collected.len(),
        workers,
        duration_ms = started.elapsed().as_millis() as u64,
        "Fan-out complete"
    );
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_empty_input_spawns_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cancel = CancellationToken::new();
        let out: Vec<u32> = fan_out("test", Vec::<u32>::new(), 4, &cancel, move |n| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { Ok(n) }
        })
        .await
        .unwrap();
        assert!(out.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_item_errors_are_swallowed() {
        let cancel = CancellationToken::new();
        let mut out = fan_out("test", (0..10).collect(), 3, &cancel, |n: u32| async move {
            if n == 4 {
                Err(AppError::cloud("describe", "throttled"))
            } else {
                Ok(n)
            }
        })
        .await
        .unwrap();
        out.sort_unstable();
        assert_eq!(out, [0, 1, 2, 3, 5, 6, 7, 8, 9]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_is_bounded() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let (flight, top) = (Arc::clone(&in_flight), Arc::clone(&peak));

        let cancel = CancellationToken::new();
        let out = fan_out("test", (0..20).collect(), 6, &cancel, move |n: u32| {
            let (flight, top) = (Arc::clone(&flight), Arc::clone(&top));
            async move {
                let now = flight.fetch_add(1, Ordering::SeqCst) + 1;
                top.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                flight.fetch_sub(1, Ordering::SeqCst);
                Ok(n)
            }
        })
        .await
        .unwrap();

        assert_eq!(out.len(), 20);
        assert_eq!(peak.load(Ordering::SeqCst), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_aborts_batch() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            trigger.cancel();
        });

        let result = fan_out("test", (0..8).collect(), 2, &cancel, |n: u32| async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(n)
        })
        .await;
        assert!(matches!(result, Err(AppError::Cancelled)));
    }

    #[tokio::test]
    async fn test_precancelled_token() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = fan_out("test", vec![1u32], 1, &cancel, |n| async move { Ok(n) }).await;
        assert!(matches!(result, Err(AppError::Cancelled)));
    }
}
