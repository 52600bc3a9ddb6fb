//! Toast scheduling.
//!
//! Each toast gets a monotonic id and its own dismiss task; dismissal of one
//! toast never affects another.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::core::binding::{Shell, Toast, ToastKind};
use crate::core::ports::{Sleeper, Spawner};
use crate::core::tasks::spawn_task;

/// Shows toasts and schedules their dismissal.
pub struct Toaster {
    shell: Rc<dyn Shell>,
    sleeper: Rc<dyn Sleeper>,
    spawner: Rc<dyn Spawner>,
    duration: Duration,
    next_id: Cell<u64>,
}

impl Toaster {
    /// Toaster dismissing after `duration`.
    #[must_use]
    pub fn new(
        shell: Rc<dyn Shell>,
        sleeper: Rc<dyn Sleeper>,
        spawner: Rc<dyn Spawner>,
        duration: Duration,
    ) -> Self {
        Self {
            shell,
            sleeper,
            spawner,
            duration,
            next_id: Cell::new(0),
        }
    }

    /// Show a toast; returns its id.
    pub fn show(&self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let toast = Toast {
            id,
            kind,
            message: message.into(),
        };
        debug!(id, kind = ?toast.kind, message = %toast.message, "toast shown");
        self.shell.show_toast(&toast);

        let shell = Rc::clone(&self.shell);
        let sleeper = Rc::clone(&self.sleeper);
        let duration = self.duration;
        spawn_task(self.spawner.as_ref(), async move {
            sleeper.sleep(duration).await;
            shell.dismiss_toast(id);
        });
        id
    }

    /// Success toast.
    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.show(ToastKind::Success, message)
    }

    /// Error toast.
    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.show(ToastKind::Error, message)
    }
}
