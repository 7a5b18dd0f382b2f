use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::payments::PaymentGateway;

/// Shared application state available to all request handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
    /// Settles recharge payments.
    pub payments: Arc<dyn PaymentGateway>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db)
            .field("config", &self.config)
            .field("payments", &self.payments.name())
            .finish()
    }
}
