//! Cooperative cancellation for searches
//!
//! A [`CancelHandle`] is held by whoever may abort the search (the CLI wires
//! it to Ctrl-C); the matching [`Cancellation`] is awaited at every suspension
//! point of the pipeline. Cancellation is sticky: once cancelled, always
//! cancelled.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

use crate::error::{RegisterError, RegisterResult};

/// Requests cancellation of the paired [`Cancellation`]
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

/// Observes cancellation requests
#[derive(Debug, Clone)]
pub struct Cancellation {
    rx: watch::Receiver<bool>,
}

/// Create a connected handle / observer pair
#[must_use]
pub fn cancellation() -> (CancelHandle, Cancellation) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx: Arc::new(tx) }, Cancellation { rx })
}

impl CancelHandle {
    /// Request cancellation; idempotent
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Cancellation {
    /// An observer that is never cancelled
    #[must_use]
    pub fn never() -> Self {
        let (_, rx) = watch::channel(false);
        Self { rx }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation is requested; pends forever if the handle
    /// is dropped without cancelling
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    /// Run `fut` unless cancellation arrives first
    pub async fn guard<T>(
        &self,
        fut: impl Future<Output = RegisterResult<T>>,
    ) -> RegisterResult<T> {
        tokio::select! {
            biased;
            () = self.cancelled() => Err(RegisterError::Cancelled),
            result = fut => result,
        }
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::never()
    }
}
