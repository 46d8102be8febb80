use log::{error, info};
use std::sync::Arc;
use tokio::signal;
use tokio::sync::Notify;

const SHUTDOWN_PERIOD_MS: u64 = 100;
const MAX_RETRIES: u64 = 10;

/// Wakes every replay loop waiting on `notify` on Ctrl+C, or after `run_for_millis`.
pub(crate) struct ShutdownSignal {
    notify: Arc<Notify>,
}

impl ShutdownSignal {
    fn new(notify: Arc<Notify>) -> Self {
        Self { notify }
    }

    async fn listen_for_shutdown(&self, run_for_millis: Option<u64>) {
        match run_for_millis {
            Some(time_to_live_millis) => {
                tokio::time::sleep(std::time::Duration::from_millis(time_to_live_millis)).await;
                info!("Run time of {} ms elapsed. Sending stop signal...", time_to_live_millis);
            }
            None => {
                if let Err(e) = signal::ctrl_c().await {
                    error!("Error while waiting for Ctrl+C: {}", e);
                    return;
                }
                info!("Ctrl+C received. Sending stop signal...");
            }
        }
        // Loops that were busy emitting when the first notification fired pick up a later one.
        for _ in 0..MAX_RETRIES {
            self.notify.notify_waiters();
            tokio::time::sleep(std::time::Duration::from_millis(SHUTDOWN_PERIOD_MS)).await;
        }
    }
}

pub(crate) fn listen_for_shutdown(
    notify: Arc<Notify>,
    run_for_millis: Option<u64>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let shutdown_signal = ShutdownSignal::new(notify);
        shutdown_signal.listen_for_shutdown(run_for_millis).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn test_shutdown_signal_with_timeout() {
        let notify = Arc::new(Notify::new());
        let shutdown_signal = ShutdownSignal::new(notify.clone());

        let handle = tokio::spawn(async move {
            shutdown_signal.listen_for_shutdown(Some(200)).await;
        });

        // Wait for the notify to be called
        let result = timeout(Duration::from_millis(300), notify.notified()).await;
        assert!(result.is_ok(), "Shutdown signal was not received in time");

        handle.abort();
    }
}
