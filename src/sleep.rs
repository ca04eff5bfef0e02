use std::time::Duration;

use async_trait::async_trait;

/// Waits out a backoff delay, suspending only the current task.
#[async_trait]
pub trait Sleep: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleep;

#[async_trait]
impl Sleep for TokioSleep {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Waits out a backoff delay by parking the calling thread.
#[cfg(feature = "blocking")]
pub trait BlockingSleep: Send + Sync {
    fn sleep(&self, delay: Duration);
}

#[cfg(feature = "blocking")]
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSleep;

#[cfg(feature = "blocking")]
impl BlockingSleep for ThreadSleep {
    fn sleep(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}
