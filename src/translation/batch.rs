/*!
 * Bounded-concurrency batch processing.
 *
 * This module contains the runner both workflows use to push many
 * independent translation calls through the provider at once, with
 * progress reporting and input-order results.
 */

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt};

/// Runs independent async tasks over a work list with a concurrency cap
pub struct BatchRunner {
    /// Maximum number of tasks in flight
    max_concurrent: usize,
}

impl BatchRunner {
    /// Create a new batch runner
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Run a task over every item with bounded concurrency.
    ///
    /// `progress` is called after each completion with (done, total).
    /// Results come back in input order regardless of completion order.
    pub async fn run<T, R, F, Fut, P>(&self, items: Vec<T>, progress: P, task: F) -> Vec<R>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = R>,
        P: Fn(usize, usize),
    {
        let total = items.len();
        let completed = AtomicUsize::new(0);
        let task = &task;
        let progress = &progress;
        let completed = &completed;

        let mut results = stream::iter(items.into_iter().enumerate())
            .map(|(index, item)| async move {
                let result = task(item).await;
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                progress(done, total);
                (index, result)
            })
            .buffer_unordered(self.max_concurrent)
            .collect::<Vec<_>>()
            .await;

        // Restore input order
        results.sort_by_key(|(index, _)| *index);
        results.into_iter().map(|(_, result)| result).collect()
    }
}
