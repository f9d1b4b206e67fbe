//! Concurrency gate for outbound capture requests.
//!
//! The service bills per capture and rate-limits aggressively, so the client
//! keeps a hard ceiling on the number of requests it has in flight. All
//! single-capture calls on one [`crate::Client`] pass through the same
//! [`Dispatcher`] instance and draw from the same budget.

use std::future::Future;

use tokio::sync::Semaphore;

/// Gate that bounds how many tasks execute concurrently.
///
/// Waiters are served strictly in the order they arrive. A slot freed by a
/// failing task is handed to the next waiter exactly like a slot freed by a
/// successful one; a task's outcome is returned untouched either way.
///
/// There is no timeout, retry, or priority here. The dispatcher holds no
/// per-task state once a task completes.
#[derive(Debug)]
pub(crate) struct Dispatcher {
    /// Controls the number of concurrently executing tasks.
    ///
    /// `tokio`'s semaphore is fair, which gives us the FIFO start order
    /// among queued tasks for free.
    semaphore: Semaphore,
    /// The configured ceiling, kept around for introspection.
    max_concurrency: usize,
}

impl Dispatcher {
    /// Creates a dispatcher with `max_concurrency` slots.
    pub(crate) fn new(max_concurrency: usize) -> Self {
        Self {
            semaphore: Semaphore::new(max_concurrency),
            max_concurrency,
        }
    }

    /// Runs `task` as soon as a slot is free.
    ///
    /// If fewer than `max_concurrency` tasks are currently executing, the
    /// task starts immediately. Otherwise it waits behind earlier callers
    /// until a running task completes and releases its slot.
    pub(crate) async fn run<F>(&self, task: F) -> F::Output
    where
        F: Future,
    {
        let _permit = self
            .semaphore
            .acquire()
            .await
            // SAFETY: this should not panic as we never close the semaphore
            .expect("Semaphore was closed unexpectedly");
        task.await
    }

    /// Number of free slots at this instant.
    pub(crate) fn available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// The configured concurrency ceiling.
    pub(crate) const fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }
}
