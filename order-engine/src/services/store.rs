//! Persistence boundary
//!
//! Save/update/status/payment requests are explicit one-shot calls with
//! surfaced success or failure. The engine performs no retries: a failed
//! save leaves the editor in its pre-save editable state so the user can
//! retry manually.

use async_trait::async_trait;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::order::{PaymentInput, PaymentOutcome, WorkOrderDraft, WorkOrderStatus};

/// Maximum accepted payment amount
const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// External work-order store
#[async_trait]
pub trait WorkOrderStore: Send + Sync {
    /// Persist the draft block list and totals snapshot
    async fn save_draft(&self, order_id: &str, draft: &WorkOrderDraft) -> AppResult<()>;

    /// Update the order status
    async fn update_status(&self, order_id: &str, status: WorkOrderStatus) -> AppResult<()>;

    /// Record a payment. Balances are external state; the outcome is
    /// only read back for display.
    async fn record_payment(
        &self,
        order_id: &str,
        payment: &PaymentInput,
    ) -> AppResult<PaymentOutcome>;
}

/// Validate a payment input before handing it to the store.
pub fn validate_payment(payment: &PaymentInput) -> AppResult<()> {
    if !payment.amount.is_finite() || payment.amount <= 0.0 {
        return Err(AppError::new(ErrorCode::InvalidPaymentAmount).with_field("amount"));
    }
    if payment.amount > MAX_PAYMENT_AMOUNT {
        return Err(AppError::with_message(
            ErrorCode::InvalidPaymentAmount,
            format!(
                "payment amount exceeds maximum allowed ({}), got {}",
                MAX_PAYMENT_AMOUNT, payment.amount
            ),
        )
        .with_field("amount"));
    }
    Ok(())
}
