//! Cancellable countdown for the timed mode
//!
//! A background task ticks once per second and publishes the remaining
//! time over a watch channel. The task is aborted on drop, so every exit
//! path from a timed session cancels the timer and no stale tick can
//! fire afterwards.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Second-resolution countdown running on a background task
pub struct Countdown {
    remaining: watch::Receiver<u64>,
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Start counting down from `seconds`
    pub fn start(seconds: u64) -> Self {
        let (tx, rx) = watch::channel(seconds);

        let handle = tokio::spawn(async move {
            let mut left = seconds;
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            // The first tick completes immediately
            ticker.tick().await;

            while left > 0 {
                ticker.tick().await;
                left -= 1;
                if tx.send(left).is_err() {
                    break;
                }
            }
        });

        Self { remaining: rx, handle }
    }

    /// Seconds left
    pub fn remaining(&self) -> u64 {
        *self.remaining.borrow()
    }

    /// True once the countdown reached zero
    pub fn is_expired(&self) -> bool {
        self.remaining() == 0
    }

    /// Resolves when the countdown reaches zero
    pub async fn expired(&mut self) {
        while *self.remaining.borrow() > 0 {
            if self.remaining.changed().await.is_err() {
                break;
            }
        }
    }

    /// Stop the timer early
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Format as MM:SS
    pub fn display(&self) -> String {
        let left = self.remaining();
        format!("{:02}:{:02}", left / 60, left % 60)
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
