//! Browser timer and task ports.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use gloo_timers::future::TimeoutFuture;

use crate::core::ports::{Sleeper, Spawner};

pub(crate) struct GlooSleeper;

#[async_trait(?Send)]
impl Sleeper for GlooSleeper {
    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}

pub(crate) struct LocalSpawner;

impl Spawner for LocalSpawner {
    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(future);
    }
}
