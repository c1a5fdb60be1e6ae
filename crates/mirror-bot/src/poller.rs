//! Long-polling loop
//!
//! Fetches updates with `getUpdates`, hands each one to the router and
//! sends back any reply. Updates are processed one at a time, in order.
//! Polling errors never end the loop; it stops only on shutdown.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use mirror_core::TransportError;
use tracing::{debug, info, warn};

use crate::router::{Reply, UpdateRouter};
use crate::telegram::{BotApi, Update};

/// Pause after a failed `getUpdates` call
const RETRY_DELAY: Duration = Duration::from_secs(3);

pub struct Poller {
    api: Arc<BotApi>,
    router: UpdateRouter,
    timeout_secs: u64,
}

impl Poller {
    pub fn new(api: Arc<BotApi>, router: UpdateRouter, timeout_secs: u64) -> Self {
        Self {
            api,
            router,
            timeout_secs,
        }
    }

    /// Poll until `shutdown` resolves
    ///
    /// An update being processed when shutdown is requested runs to
    /// completion first.
    pub async fn run(&self, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);
        let mut offset = 0_i64;

        info!(timeout_secs = self.timeout_secs, "Polling for updates");
        loop {
            let batch = tokio::select! {
                () = &mut shutdown => break,
                batch = self.api.get_updates(offset, self.timeout_secs) => batch,
            };

            match batch {
                Ok(updates) => {
                    for update in updates {
                        offset = offset.max(next_offset(&update));
                        self.handle(&update).await;
                    }
                }
                Err(err) => {
                    let delay = retry_delay(&err);
                    warn!(error = %err, ?delay, "getUpdates failed; retrying");
                    tokio::select! {
                        () = &mut shutdown => break,
                        () = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }

        info!("Polling stopped");
    }

    async fn handle(&self, update: &Update) {
        debug!(update_id = update.update_id, "Handling update");
        if let Some(reply) = self.router.route(update).await {
            self.send_reply(&reply).await;
        }
    }

    async fn send_reply(&self, reply: &Reply) {
        if let Err(err) = self.api.send_message(reply.chat_id, &reply.html, false).await {
            warn!(chat_id = reply.chat_id, error = %err, "Failed to send reply");
        }
    }
}

/// Offset that acknowledges `update`
fn next_offset(update: &Update) -> i64 {
    update.update_id + 1
}

fn retry_delay(err: &TransportError) -> Duration {
    match err {
        TransportError::RateLimited { retry_after } => (*retry_after).max(RETRY_DELAY),
        _ => RETRY_DELAY,
    }
}
