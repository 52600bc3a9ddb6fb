//! Cancellable background tasks.
//!
//! # Design
//! - A [`TaskHandle`] aborts its task on `cancel`; dropping it detaches the task.
//! - A [`TaskSlot`] holds at most one task; scheduling a new one aborts the previous.

use std::cell::RefCell;
use std::future::Future;

use futures_util::FutureExt;
use futures_util::future::{AbortHandle, abortable};

use crate::core::ports::Spawner;

/// Handle to a spawned task.
#[derive(Debug)]
pub struct TaskHandle {
    abort: AbortHandle,
}

impl TaskHandle {
    /// Stop the task at its next suspension point.
    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// Whether `cancel` was called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.abort.is_aborted()
    }
}

/// Spawn `future` as an abortable task.
pub fn spawn_task<F>(spawner: &dyn Spawner, future: F) -> TaskHandle
where
    F: Future<Output = ()> + 'static,
{
    let (task, abort) = abortable(future);
    spawner.spawn(task.map(|_| ()).boxed_local());
    TaskHandle { abort }
}

/// Single-occupancy task holder.
#[derive(Debug, Default)]
pub struct TaskSlot {
    current: RefCell<Option<TaskHandle>>,
}

impl TaskSlot {
    /// Empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: RefCell::new(None),
        }
    }

    /// Spawn `future`, superseding any task already in the slot.
    pub fn replace<F>(&self, spawner: &dyn Spawner, future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let handle = spawn_task(spawner, future);
        if let Some(previous) = self.current.replace(Some(handle)) {
            previous.cancel();
        }
    }

    /// Abort the task in the slot, if any.
    pub fn cancel(&self) {
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }
    }

    /// Whether the slot holds a task that was not cancelled.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.current
            .borrow()
            .as_ref()
            .is_some_and(|handle| !handle.is_cancelled())
    }
}
