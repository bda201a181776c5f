//! PollingScheduler — named periodic tasks on the tokio timer wheel.
//!
//! Every visual channel runs off its own timer (motor poll, spectrum frames,
//! playback clock, GPS drift, reveal one-shots). Tasks are cheap and
//! fire-and-forget: a callback that needs the network spawns the request and
//! returns, so a slow response is superseded by the next tick rather than
//! piling up.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

struct TaskEntry {
    seq: u64,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Owns every timer in the dashboard. `cancel_all` at teardown is the only
/// way tasks die early; individual network requests are never cancelled.
pub struct Scheduler {
    tasks: Arc<Mutex<HashMap<String, TaskEntry>>>,
    next_seq: AtomicU64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(Mutex::new(HashMap::new())),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Register a repeating task. First fire comes one full `period` after
    /// registration. Scheduling an id that already exists stops the old timer
    /// before the replacement starts — exactly one timer per id, ever.
    pub fn schedule<F>(&self, id: &str, period: Duration, mut callback: F)
    where
        F: FnMut() -> anyhow::Result<()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let task_token = token.clone();
        let task_id = id.to_string();

        let start = tokio::time::Instant::now() + period;
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = interval.tick() => {
                        // A native tick can race cancel_all; the token check
                        // keeps a torn-down task from ever running its callback.
                        if task_token.is_cancelled() {
                            break;
                        }
                        if let Err(e) = callback() {
                            warn!(task = %task_id, "periodic task failed: {e:#}");
                        }
                    }
                }
            }
            debug!(task = %task_id, "periodic task stopped");
        });

        self.insert(id, token, handle);
    }

    /// One-shot task: fires once after `delay`, then deregisters itself.
    pub fn schedule_once<F>(&self, id: &str, delay: Duration, callback: F)
    where
        F: FnOnce() -> anyhow::Result<()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let task_token = token.clone();
        let task_id = id.to_string();
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let tasks = Arc::clone(&self.tasks);

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = task_token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if !task_token.is_cancelled() {
                        if let Err(e) = callback() {
                            warn!(task = %task_id, "one-shot task failed: {e:#}");
                        }
                    }
                }
            }
            // Deregister, but only our own entry — a same-id replacement
            // scheduled in the meantime keeps its slot.
            let mut map = tasks.lock().expect("scheduler lock poisoned");
            if map.get(&task_id).map(|e| e.seq) == Some(seq) {
                map.remove(&task_id);
            }
        });

        let mut map = self.tasks.lock().expect("scheduler lock poisoned");
        if let Some(old) = map.remove(id) {
            old.token.cancel();
            old.handle.abort();
        }
        map.insert(id.to_string(), TaskEntry { seq, token, handle });
    }

    /// Stop every registered timer. Called at dashboard teardown so no
    /// dangling timer can reach destroyed state.
    pub fn cancel_all(&self) {
        let mut map = self.tasks.lock().expect("scheduler lock poisoned");
        for (id, entry) in map.drain() {
            debug!(task = %id, "cancelling");
            entry.token.cancel();
            entry.handle.abort();
        }
    }

    /// Number of currently registered tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.lock().expect("scheduler lock poisoned").len()
    }

    fn insert(&self, id: &str, token: CancellationToken, handle: JoinHandle<()>) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let mut map = self.tasks.lock().expect("scheduler lock poisoned");
        if let Some(old) = map.remove(id) {
            old.token.cancel();
            old.handle.abort();
        }
        map.insert(id.to_string(), TaskEntry { seq, token, handle });
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    async fn advance(ms: u64) {
        // Step the paused clock in small increments so each intermediate
        // timer deadline gets polled in order.
        for _ in 0..ms / 10 {
            tokio::time::advance(Duration::from_millis(10)).await;
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fires_at_fixed_interval() {
        let sched = Scheduler::new();
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        sched.schedule("tick", Duration::from_millis(100), move || {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        advance(350).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn reschedule_replaces_prior_timer() {
        let sched = Scheduler::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let f = Arc::clone(&first);
        sched.schedule("x", Duration::from_millis(100), move || {
            f.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let s = Arc::clone(&second);
        sched.schedule("x", Duration::from_millis(50), move || {
            s.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        advance(270).await;
        assert_eq!(first.load(Ordering::SeqCst), 0, "replaced timer must not fire");
        assert_eq!(second.load(Ordering::SeqCst), 5);
        assert_eq!(sched.task_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn one_shot_fires_once_and_deregisters() {
        let sched = Scheduler::new();
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        sched.schedule_once("reveal", Duration::from_millis(100), move || {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        advance(400).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(sched.task_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn one_shot_reschedule_restarts_window() {
        let sched = Scheduler::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&count);
        sched.schedule_once("hide", Duration::from_millis(100), move || {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        advance(60).await;
        // Re-trigger before the first window elapses: the window restarts.
        let c = Arc::clone(&count);
        sched.schedule_once("hide", Duration::from_millis(100), move || {
            c.fetch_add(10, Ordering::SeqCst);
            Ok(())
        });
        advance(60).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        advance(60).await;
        assert_eq!(count.load(Ordering::SeqCst), 10);
        assert_eq!(sched.task_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_guards_late_timers() {
        let sched = Scheduler::new();
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        sched.schedule("tick", Duration::from_millis(50), move || {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let c = Arc::clone(&count);
        sched.schedule_once("late", Duration::from_millis(80), move || {
            c.fetch_add(100, Ordering::SeqCst);
            Ok(())
        });

        sched.cancel_all();
        advance(1000).await;
        assert_eq!(count.load(Ordering::SeqCst), 0, "no callback may run after teardown");
        assert_eq!(sched.task_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_task_does_not_stop_siblings() {
        let sched = Scheduler::new();
        let good = Arc::new(AtomicUsize::new(0));

        sched.schedule("bad", Duration::from_millis(50), || {
            anyhow::bail!("sensor went away")
        });
        let g = Arc::clone(&good);
        sched.schedule("good", Duration::from_millis(50), move || {
            g.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        advance(300).await;
        assert_eq!(good.load(Ordering::SeqCst), 6);
        // The failing task keeps its registration too — errors are logged,
        // never fatal.
        assert_eq!(sched.task_count(), 2);
    }
}
