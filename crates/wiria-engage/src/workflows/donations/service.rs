use std::sync::Arc;

use super::domain::{DonationRequest, DonationSession, DonationStatus, DonationStore};
use crate::backend::BackendError;
use crate::notify::NotificationCenter;
use crate::workflows::payments::{PaymentGateway, PaymentMethod, StoreError};

const STK_PROMPT_NOTICE: &str =
    "Check your phone and enter your M-Pesa PIN to complete the donation.";
const MANUAL_PENDING_NOTICE: &str =
    "Thank you! Your paybill payment will be confirmed by our team shortly.";
const DONATION_RECEIVED_NOTICE: &str = "Donation received. Thank you for supporting WIRIA!";
const DONATION_FAILED_NOTICE: &str = "The payment did not go through. Please try again.";
const GENERIC_FAILURE_NOTICE: &str =
    "Something went wrong while processing your donation. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum DonationError {
    #[error("invalid donation: {0}")]
    Invalid(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("donation not found")]
    NotFound,
}

/// Donation submission and status polling against the backend. Payments do
/// not degrade to the email channel; a backend failure surfaces one generic
/// user-facing notice and the underlying error goes to the log only.
pub struct DonationFlow<G, S> {
    gateway: Arc<G>,
    store: Arc<S>,
    notifier: Arc<NotificationCenter>,
}

impl<G, S> DonationFlow<G, S>
where
    G: PaymentGateway + 'static,
    S: DonationStore + 'static,
{
    pub fn new(gateway: Arc<G>, store: Arc<S>, notifier: Arc<NotificationCenter>) -> Self {
        Self {
            gateway,
            store,
            notifier,
        }
    }

    pub async fn submit(&self, request: DonationRequest) -> Result<DonationSession, DonationError> {
        request.validate().map_err(DonationError::Invalid)?;

        let mut session = DonationSession::begin();

        let receipt = match self.gateway.initiate_donation(&request).await {
            Ok(receipt) => receipt,
            Err(error) => {
                tracing::error!(%error, amount = request.amount, "donation initiation failed");
                self.notifier.error(GENERIC_FAILURE_NOTICE);
                return Err(error.into());
            }
        };

        let confirmed = receipt
            .status
            .as_deref()
            .and_then(DonationStatus::from_remote);

        let status = match (request.payment_method, confirmed) {
            (_, Some(DonationStatus::Completed)) => {
                self.notifier.success(DONATION_RECEIVED_NOTICE);
                DonationStatus::Completed
            }
            (PaymentMethod::StkPush, _) => {
                self.notifier.info(STK_PROMPT_NOTICE);
                DonationStatus::Pending
            }
            (PaymentMethod::Manual, _) => {
                self.notifier.info(MANUAL_PENDING_NOTICE);
                DonationStatus::Pending
            }
        };

        session.donation_id = Some(receipt.donation_id);
        session.checkout_request_id = receipt.checkout_request_id;
        session.status = Some(status);
        session.is_submitting = false;

        self.store.save(session.clone())?;
        Ok(session)
    }

    /// Manually-triggered status check. Terminal states are sticky: once
    /// the stored session is terminal the backend is not polled again.
    /// A failed poll is swallowed and the current state returned.
    pub async fn check_status(&self, donation_id: &str) -> Result<DonationSession, DonationError> {
        let mut session = self
            .store
            .fetch(donation_id)?
            .ok_or(DonationError::NotFound)?;

        let current = session.effective_status();
        if current.is_terminal() {
            return Ok(session);
        }

        let remote = match self.gateway.donation_status(donation_id).await {
            Ok(payload) => DonationStatus::from_remote(&payload.status),
            Err(error) => {
                tracing::warn!(%error, donation_id, "donation status poll failed");
                None
            }
        };

        if let Some(next) = remote {
            if next != current {
                match next {
                    DonationStatus::Completed => self.notifier.success(DONATION_RECEIVED_NOTICE),
                    DonationStatus::Failed => self.notifier.error(DONATION_FAILED_NOTICE),
                    DonationStatus::Pending | DonationStatus::Cancelled => {}
                }
                session.status = Some(next);
                self.store.save(session.clone())?;
            }
        }

        Ok(session)
    }
}
