use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Runs `worker` once per item with at most `max_in_flight` running at a time.
///
/// Every task is spawned before any result is awaited; results come back in
/// item order regardless of completion order. A task that panics yields `None`
/// in its slot and does not affect its siblings.
pub async fn run_ordered<T, R, F, Fut>(
    items: Vec<T>,
    max_in_flight: usize,
    worker: F,
) -> Vec<Option<R>>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = R> + Send + 'static,
    R: Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(max_in_flight.max(1)));

    let handles: Vec<_> = items
        .into_iter()
        .map(|item| {
            let semaphore = semaphore.clone();
            let task = worker(item);
            tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok()?;
                Some(task.await)
            })
        })
        .collect();

    join_all(handles)
        .await
        .into_iter()
        .enumerate()
        .map(|(idx, joined)| match joined {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Worker {} did not complete: {}", idx, e);
                None
            }
        })
        .collect()
}
