//! Recharge settlement.
//!
//! The recharge flow hands every freshly recorded transaction to a
//! [`PaymentGateway`] and stores whatever outcome it reports. The gateway lives
//! in [`AppState`](crate::state::AppState) as a trait object, so swapping the
//! stub for a real processor does not touch the handlers.

use async_trait::async_trait;

use crate::entities::{RechargeStatus, recharge_transaction};

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Charge for `txn` and report the final status.
    ///
    /// # Errors
    ///
    /// Returns an error when the gateway could not be reached or answered
    /// unexpectedly. The transaction then stays `pending`.
    async fn settle(&self, txn: &recharge_transaction::Model) -> anyhow::Result<RechargeStatus>;
}

/// Gateway stub that confirms every payment immediately. No money moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockGateway;

#[async_trait]
impl PaymentGateway for MockGateway {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn settle(&self, txn: &recharge_transaction::Model) -> anyhow::Result<RechargeStatus> {
        tracing::debug!(
            transaction_id = %txn.transaction_id,
            amount = %txn.amount,
            "mock gateway approving payment"
        );
        Ok(RechargeStatus::Success)
    }
}
