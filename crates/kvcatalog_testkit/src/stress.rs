//! Stress helpers for concurrent catalog access.

use kvcatalog_backend::KvBackend;
use kvcatalog_core::{CatalogStore, RecordDraft, RecordId, Status};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Result of a stress run.
#[derive(Debug, Clone)]
pub struct StressResult {
    /// Ids returned by successful creates, in no particular order.
    pub ids: Vec<RecordId>,
    /// Number of failed operations.
    pub failed_ops: usize,
    /// Wall-clock duration.
    pub duration: Duration,
}

impl StressResult {
    /// Operations per second over the whole run.
    pub fn ops_per_second(&self) -> f64 {
        let total = (self.ids.len() + self.failed_ops) as f64;
        if self.duration.as_secs_f64() > 0.0 {
            total / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Creates `per_thread` records from each of `threads` threads at once.
pub fn concurrent_creates<B>(
    store: Arc<CatalogStore<B>>,
    threads: usize,
    per_thread: usize,
) -> StressResult
where
    B: KvBackend + 'static,
{
    let start = Instant::now();

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut ids = Vec::with_capacity(per_thread);
                let mut failed = 0;
                for i in 0..per_thread {
                    let draft = RecordDraft::new(
                        format!("Thread {t} book {i}"),
                        format!("Writer {t}"),
                        "Stress",
                        Status::Pending,
                    );
                    match store.create(draft) {
                        Ok(record) => ids.push(record.id),
                        Err(_) => failed += 1,
                    }
                }
                (ids, failed)
            })
        })
        .collect();

    let mut ids = Vec::with_capacity(threads * per_thread);
    let mut failed_ops = 0;
    for handle in handles {
        let (thread_ids, thread_failed) = handle.join().expect("stress thread panicked");
        ids.extend(thread_ids);
        failed_ops += thread_failed;
    }

    StressResult {
        ids,
        failed_ops,
        duration: start.elapsed(),
    }
}
