//! Cancellable timer handles.
//!
//! The run controller never sleeps and never spawns anything itself. It asks a
//! [`Timers`] implementation to arm a timer and gets back a [`TimerHandle`].
//! When the timer fires, the handle is delivered back to the controller,
//! which compares it against the handles it currently holds. A handle that
//! was cancelled or replaced in the meantime is simply ignored.
//!
//! ## Implementations
//!
//! - [`TokioTimers`]: real time. Every armed timer is a tokio task that posts
//!   its handle into an unbounded channel; cancelling aborts the task.
//! - [`ManualTimers`]: virtual time. Nothing fires until the owner advances
//!   the clock, which makes tick counts exact in tests and in `simulate`.

use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// What a timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Repeating activity tick.
    Tick,
    /// One-shot end of a bounded run.
    AutoStop,
}

/// Identity of one armed timer. Never reused within a [`Timers`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    id: u64,
    kind: TimerKind,
}

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }
}

/// A timer facility the controller can arm and cancel timers on.
pub trait Timers {
    /// Fires every `period`, first after one full period.
    fn arm_repeating(&mut self, period: Duration, kind: TimerKind) -> TimerHandle;

    /// Fires once after `delay`.
    fn arm_once(&mut self, delay: Duration, kind: TimerKind) -> TimerHandle;

    /// Cancels the timer. Unknown or already finished handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);

    /// Number of timers that can still fire.
    fn pending(&self) -> usize;
}

/// Real-time timers running as tokio tasks.
///
/// Must be used from inside a tokio runtime.
pub struct TokioTimers {
    sender: UnboundedSender<TimerHandle>,
    tasks: HashMap<u64, JoinHandle<()>>,
    next_id: u64,
}

impl TokioTimers {
    /// Creates the facility together with the receiver fired handles arrive on.
    pub fn new() -> (Self, UnboundedReceiver<TimerHandle>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let timers = TokioTimers {
            sender,
            tasks: HashMap::new(),
            next_id: 1,
        };
        (timers, receiver)
    }

    fn next_handle(&mut self, kind: TimerKind) -> TimerHandle {
        let handle = TimerHandle { id: self.next_id, kind };
        self.next_id += 1;
        handle
    }
}

impl Timers for TokioTimers {
    fn arm_repeating(&mut self, period: Duration, kind: TimerKind) -> TimerHandle {
        let handle = self.next_handle(kind);
        let sender = self.sender.clone();
        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if sender.send(handle).is_err() {
                    break;
                }
            }
        });
        debug!(id = handle.id, ?kind, ?period, "armed repeating timer");
        self.tasks.insert(handle.id, task);
        handle
    }

    fn arm_once(&mut self, delay: Duration, kind: TimerKind) -> TimerHandle {
        let handle = self.next_handle(kind);
        let sender = self.sender.clone();
        let task = tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = sender.send(handle);
        });
        debug!(id = handle.id, ?kind, ?delay, "armed one-shot timer");
        self.tasks.insert(handle.id, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle.id) {
            task.abort();
            debug!(id = handle.id, kind = ?handle.kind, "cancelled timer");
        }
    }

    fn pending(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }
}

impl Drop for TokioTimers {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[derive(Debug, Clone)]
struct ManualEntry {
    handle: TimerHandle,
    due_ms: u64,
    period_ms: Option<u64>,
}

/// Virtual-clock timers. Time only moves when the owner says so.
#[derive(Debug, Clone, Default)]
pub struct ManualTimers {
    now_ms: u64,
    next_id: u64,
    entries: Vec<ManualEntry>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds since creation.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Due time of the earliest armed timer.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.entries.iter().map(|entry| entry.due_ms).min()
    }

    /// Removes and returns the earliest timer due at or before `deadline_ms`.
    ///
    /// The clock moves to that timer's due time. Repeating timers are put back
    /// one period later. Ties fire in the order they were armed.
    pub fn pop_due(&mut self, deadline_ms: u64) -> Option<TimerHandle> {
        let position = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due_ms <= deadline_ms)
            .min_by_key(|(_, entry)| (entry.due_ms, entry.handle.id))
            .map(|(position, _)| position)?;

        let mut entry = self.entries.remove(position);
        self.now_ms = self.now_ms.max(entry.due_ms);
        let handle = entry.handle;
        if let Some(period_ms) = entry.period_ms {
            entry.due_ms = entry.due_ms.saturating_add(period_ms);
            self.entries.push(entry);
        }
        Some(handle)
    }

    /// Moves the clock forward to `deadline_ms` without firing anything.
    pub fn advance_to(&mut self, deadline_ms: u64) {
        self.now_ms = self.now_ms.max(deadline_ms);
    }

    fn arm(&mut self, delay: Duration, period: Option<Duration>, kind: TimerKind) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle { id: self.next_id, kind };
        self.entries.push(ManualEntry {
            handle,
            due_ms: self.now_ms.saturating_add(millis(delay)),
            period_ms: period.map(millis),
        });
        handle
    }
}

impl Timers for ManualTimers {
    fn arm_repeating(&mut self, period: Duration, kind: TimerKind) -> TimerHandle {
        self.arm(period, Some(period), kind)
    }

    fn arm_once(&mut self, delay: Duration, kind: TimerKind) -> TimerHandle {
        self.arm(delay, None, kind)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.entries.retain(|entry| entry.handle != handle);
    }

    fn pending(&self) -> usize {
        self.entries.len()
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
