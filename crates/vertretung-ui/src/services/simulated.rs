//! Offline trigger used when no dispatch endpoint is configured.

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::core::error::RemoteError;
use crate::core::ports::{DispatchOutcome, Sleeper, TriggerService};

/// Accepts every dispatch after a fixed delay without touching the network.
pub struct SimulatedTrigger {
    sleeper: Rc<dyn Sleeper>,
    delay: Duration,
}

impl SimulatedTrigger {
    /// Trigger that answers after `delay`.
    #[must_use]
    pub fn new(sleeper: Rc<dyn Sleeper>, delay: Duration) -> Self {
        Self { sleeper, delay }
    }
}

#[async_trait(?Send)]
impl TriggerService for SimulatedTrigger {
    async fn dispatch(&self) -> Result<DispatchOutcome, RemoteError> {
        self.sleeper.sleep(self.delay).await;
        info!(delay_ms = self.delay.as_millis(), "simulated substitution check");
        Ok(DispatchOutcome::Accepted)
    }
}
