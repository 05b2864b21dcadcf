//! Per-account serialisation of store transitions.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::Email;

/// Async locks keyed by account email.
///
/// Idle entries are dropped on the next acquisition so the map only holds
/// accounts with an in-flight transition.
#[derive(Debug, Default)]
pub(super) struct AccountLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl AccountLocks {
    pub(super) async fn acquire(&self, email: &Email) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(email.as_ref().to_owned()).or_default())
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    pub(super) async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}
