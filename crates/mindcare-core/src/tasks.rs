//! Deferred work owned by a screen.
//!
//! Uploads and voice-note processing complete after a delay. Each task
//! belongs to the screen that started it; leaving that screen cancels the
//! task and its completion is dropped. The shell drives time by calling
//! [`TaskQueue::poll`] with the current clock in milliseconds.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::router::Screen;

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// State change applied when a task finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// A medicine photo finished uploading
    MedicineImageUploaded {
        patient_id: String,
        prescription_id: String,
    },
    /// A prescription image finished uploading in the session workspace
    PrescriptionUploaded { file_name: String },
    /// A voice recording finished processing
    VoiceNoteProcessed,
}

/// Handle to a scheduled task.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: u64,
    token: CancelToken,
}

impl TaskHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Cancel the task. Its completion will never be delivered.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[derive(Debug)]
struct PendingTask {
    id: u64,
    owner: Screen,
    key: String,
    due_at_ms: u64,
    completion: Completion,
    token: CancelToken,
}

/// Pending deferred tasks.
#[derive(Debug, Default)]
pub struct TaskQueue {
    next_id: u64,
    pending: Vec<PendingTask>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `completion` to fire `delay_ms` after `now_ms`.
    ///
    /// `key` identifies what the task works on (e.g. a prescription id) so the
    /// shell can show progress with [`TaskQueue::is_pending`].
    pub fn schedule(
        &mut self,
        owner: Screen,
        key: impl Into<String>,
        now_ms: u64,
        delay_ms: u64,
        completion: Completion,
    ) -> TaskHandle {
        self.next_id += 1;
        let token = CancelToken::new();
        let task = PendingTask {
            id: self.next_id,
            owner,
            key: key.into(),
            due_at_ms: now_ms.saturating_add(delay_ms),
            completion,
            token: token.clone(),
        };
        debug!(
            task_id = task.id,
            owner = owner.id(),
            key = %task.key,
            due_at_ms = task.due_at_ms,
            "Scheduled task"
        );
        self.pending.push(task);

        TaskHandle {
            id: self.next_id,
            token,
        }
    }

    /// Cancel every task owned by `owner`. Returns how many were cancelled.
    pub fn cancel_owned_by(&mut self, owner: Screen) -> usize {
        let before = self.pending.len();
        self.pending.retain(|task| {
            if task.owner == owner {
                task.token.cancel();
                false
            } else {
                true
            }
        });
        let cancelled = before - self.pending.len();
        if cancelled > 0 {
            debug!(owner = owner.id(), cancelled, "Cancelled tasks on leave");
        }
        cancelled
    }

    /// Cancel tasks matching `key`, whatever their owner.
    pub fn cancel_key(&mut self, key: &str) -> usize {
        let before = self.pending.len();
        self.pending.retain(|task| {
            if task.key == key {
                task.token.cancel();
                false
            } else {
                true
            }
        });
        before - self.pending.len()
    }

    /// Remove and return completions due at `now_ms`, in due order.
    ///
    /// Tasks cancelled through a [`TaskHandle`] are discarded here.
    pub fn poll(&mut self, now_ms: u64) -> Vec<Completion> {
        self.pending.retain(|task| !task.token.is_cancelled());

        let (mut due, waiting): (Vec<PendingTask>, Vec<PendingTask>) = self
            .pending
            .drain(..)
            .partition(|task| task.due_at_ms <= now_ms);
        self.pending = waiting;

        due.sort_by_key(|task| (task.due_at_ms, task.id));
        due.into_iter().map(|task| task.completion).collect()
    }

    /// Whether a live task is working on `key`.
    pub fn is_pending(&self, key: &str) -> bool {
        self.pending
            .iter()
            .any(|task| task.key == key && !task.token.is_cancelled())
    }

    /// Earliest due time among live tasks.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending
            .iter()
            .filter(|task| !task.token.is_cancelled())
            .map(|task| task.due_at_ms)
            .min()
    }

    pub fn len(&self) -> usize {
        self.pending
            .iter()
            .filter(|task| !task.token.is_cancelled())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
