use tokio::sync::Mutex;

use super::{BoxFuture, Confirmation, Notifier};
use crate::error::{NotifyError, NotifyResult};

/// Keeps every confirmation in memory instead of sending it.
///
/// A failing instance rejects every message, for exercising the
/// best-effort path.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<Confirmation>>,
    fail: bool,
}

impl MemoryNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    pub async fn sent(&self) -> Vec<Confirmation> {
        self.sent.lock().await.clone()
    }
}

impl Notifier for MemoryNotifier {
    fn send<'a>(&'a self, confirmation: &'a Confirmation) -> BoxFuture<'a, NotifyResult<()>> {
        Box::pin(async move {
            if self.fail {
                return Err(NotifyError::DispatchFailed(format!(
                    "refusing to deliver to {}",
                    confirmation.to_address
                )));
            }
            self.sent.lock().await.push(confirmation.clone());
            Ok(())
        })
    }
}
