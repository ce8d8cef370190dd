//! Cancellation utilities
//!
//! Provides cancellation handles for in-flight conversions.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::{ConvertApiError, Result};

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    /// Create a new cancel handle.
    fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation. Operations observing this handle stop as soon
    /// as possible; dropping the in-flight future closes the underlying
    /// HTTP connection and abandons pending uploads.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when cancellation is requested.
    pub fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }

    /// A child handle, cancelled together with this one.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }
}

/// Run `future` until it completes or `cancel` fires.
pub async fn run_cancellable<F, T>(cancel: &CancelHandle, what: &str, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    if cancel.is_cancelled() {
        return Err(ConvertApiError::Cancelled(format!("{what} cancelled before start")));
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ConvertApiError::Cancelled(format!("{what} cancelled"))),
        res = future => res,
    }
}

/// Create a fresh cancel handle
pub fn new_cancel_handle() -> CancelHandle {
    CancelHandle::new()
}
