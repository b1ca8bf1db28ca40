//! Application state passed to all handlers.

use std::sync::Arc;

use crate::db::DbPool;
use crate::notify::PaymentReminder;

#[derive(Clone)]
pub struct AppState {
    /// Shared document store handle
    pub pool: DbPool,

    /// Outbound payment-reminder sender
    pub notifier: Arc<PaymentReminder>,
}

impl AppState {
    pub fn new(pool: DbPool, notifier: PaymentReminder) -> Self {
        Self {
            pool,
            notifier: Arc::new(notifier),
        }
    }
}
