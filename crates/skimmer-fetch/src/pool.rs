//! Bounded worker pool for fetching several URLs.
//!
//! Concurrency is allowed in the I/O layer only: bodies come back in
//! input order, so the caller can feed them into the pipeline without
//! breaking its deterministic merge invariant.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use crate::error::FetchError;
use crate::source::PageSource;

/// Default number of concurrent fetch workers.
pub const DEFAULT_WORKERS: usize = 4;

/// Fetches every URL through `source`, using at most `workers` threads.
///
/// Bodies are returned in the same order as `urls`. The first fetch
/// failure aborts the whole batch: either every URL resolves to a full
/// body, or the caller gets an error and no content at all. Partial
/// content never leaks out.
pub fn fetch_all(
    source: &dyn PageSource,
    urls: &[&str],
    workers: usize,
) -> Result<Vec<String>, FetchError> {
    if urls.is_empty() {
        return Ok(Vec::new());
    }
    let workers = workers.max(1).min(urls.len());

    let next = AtomicUsize::new(0);
    let failed = AtomicBool::new(false);
    let (tx, rx) = mpsc::channel::<(usize, Result<String, FetchError>)>();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let next = &next;
            let failed = &failed;
            scope.spawn(move || loop {
                if failed.load(Ordering::Relaxed) {
                    break;
                }
                let i = next.fetch_add(1, Ordering::Relaxed);
                if i >= urls.len() {
                    break;
                }
                let result = source.fetch(urls[i]);
                if result.is_err() {
                    failed.store(true, Ordering::Relaxed);
                }
                if tx.send((i, result)).is_err() {
                    break;
                }
            });
        }
        drop(tx);

        let mut bodies: Vec<Option<String>> = (0..urls.len()).map(|_| None).collect();
        let mut first_err = None;
        for (i, result) in rx {
            match result {
                Ok(body) => bodies[i] = Some(body),
                Err(e) => {
                    if first_err.is_none() {
                        first_err = Some(e);
                    }
                }
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => {
                // Without a failure every index was claimed and answered.
                let bodies: Vec<String> = bodies.into_iter().flatten().collect();
                debug_assert_eq!(bodies.len(), urls.len());
                Ok(bodies)
            }
        }
    })
}
