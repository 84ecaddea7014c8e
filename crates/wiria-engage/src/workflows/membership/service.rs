use std::sync::Arc;

use super::domain::{
    MembershipType, RegistrationForm, RegistrationOutcome, RenewalForm, RenewalSession,
    RenewalStatus, RenewalStore,
};
use super::fees::{FeeBreakdown, FeeSchedule, RenewalFeeBreakdown};
use crate::backend::BackendError;
use crate::notify::NotificationCenter;
use crate::workflows::payments::{PaymentGateway, PaymentMethod, StoreError};

const STK_PROMPT_NOTICE: &str =
    "Check your phone and enter your M-Pesa PIN to complete the payment.";
const MANUAL_PENDING_NOTICE: &str =
    "Thank you! Your paybill payment will be confirmed by our team shortly.";
const REGISTRATION_RECEIVED_NOTICE: &str = "Welcome to WIRIA! Your registration has been received.";
const RENEWAL_RECORDED_NOTICE: &str = "Your membership has been renewed. Thank you!";
const RENEWAL_FAILED_NOTICE: &str = "The renewal payment did not go through. Please try again.";
const GENERIC_FAILURE_NOTICE: &str =
    "Something went wrong while processing your request. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum MembershipError {
    #[error("invalid submission: {0}")]
    Invalid(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("renewal not found")]
    NotFound,
}

/// Registration and renewal submission plus the renewal status poll. Fee
/// quotes come from the injected schedule so the rates live in one place.
pub struct MembershipFlow<G, S> {
    gateway: Arc<G>,
    store: Arc<S>,
    schedule: FeeSchedule,
    notifier: Arc<NotificationCenter>,
}

impl<G, S> MembershipFlow<G, S>
where
    G: PaymentGateway + 'static,
    S: RenewalStore + 'static,
{
    pub fn new(
        gateway: Arc<G>,
        store: Arc<S>,
        schedule: FeeSchedule,
        notifier: Arc<NotificationCenter>,
    ) -> Self {
        Self {
            gateway,
            store,
            schedule,
            notifier,
        }
    }

    pub fn registration_quote(
        &self,
        membership_type: MembershipType,
        member_count: u32,
    ) -> FeeBreakdown {
        self.schedule
            .registration_quote(membership_type, member_count)
    }

    pub fn renewal_quote(
        &self,
        membership_type: MembershipType,
        member_count: u32,
        previous_max: u32,
    ) -> RenewalFeeBreakdown {
        self.schedule
            .renewal_quote(membership_type, member_count, previous_max)
    }

    pub async fn register(
        &self,
        form: RegistrationForm,
    ) -> Result<RegistrationOutcome, MembershipError> {
        form.validate().map_err(MembershipError::Invalid)?;

        let fees = self
            .schedule
            .registration_quote(form.membership_type, form.member_count);

        let receipt = match self.gateway.register_member(&form, &fees).await {
            Ok(receipt) => receipt,
            Err(error) => {
                tracing::error!(%error, "membership registration failed");
                self.notifier.error(GENERIC_FAILURE_NOTICE);
                return Err(error.into());
            }
        };

        let confirmed = receipt.status.as_deref().and_then(RenewalStatus::from_remote);

        match (form.payment_method, confirmed) {
            (_, Some(RenewalStatus::Success)) => {
                self.notifier.success(REGISTRATION_RECEIVED_NOTICE)
            }
            (PaymentMethod::StkPush, _) => self.notifier.info(STK_PROMPT_NOTICE),
            (PaymentMethod::Manual, _) => self.notifier.info(MANUAL_PENDING_NOTICE),
        }

        Ok(RegistrationOutcome {
            member_no: receipt.member_no,
            checkout_request_id: receipt.checkout_request_id,
            fees,
        })
    }

    pub async fn renew(&self, form: RenewalForm) -> Result<RenewalSession, MembershipError> {
        form.validate().map_err(MembershipError::Invalid)?;

        let fees =
            self.schedule
                .renewal_quote(form.membership_type, form.member_count, form.previous_max);

        let mut session = RenewalSession::begin();

        let receipt = match self.gateway.renew_membership(&form, &fees).await {
            Ok(receipt) => receipt,
            Err(error) => {
                tracing::error!(%error, member_no = %form.member_no, "membership renewal failed");
                self.notifier.error(GENERIC_FAILURE_NOTICE);
                return Err(error.into());
            }
        };

        let confirmed = receipt.status.as_deref().and_then(RenewalStatus::from_remote);

        let status = match (form.payment_method, confirmed) {
            (_, Some(RenewalStatus::Success)) => {
                self.notifier.success(RENEWAL_RECORDED_NOTICE);
                RenewalStatus::Success
            }
            (PaymentMethod::StkPush, _) => {
                self.notifier.info(STK_PROMPT_NOTICE);
                RenewalStatus::Pending
            }
            (PaymentMethod::Manual, _) => {
                self.notifier.info(MANUAL_PENDING_NOTICE);
                RenewalStatus::Pending
            }
        };

        session.renewal_id = Some(receipt.renewal_id);
        session.checkout_request_id = receipt.checkout_request_id;
        session.status = Some(status);
        session.is_submitting = false;

        self.store.save(session.clone())?;
        Ok(session)
    }

    /// Manually-triggered poll of `/payments/status/:id`. Sticky terminal
    /// states and swallowed poll errors, as for donations.
    pub async fn check_renewal_status(
        &self,
        renewal_id: &str,
    ) -> Result<RenewalSession, MembershipError> {
        let mut session = self
            .store
            .fetch(renewal_id)?
            .ok_or(MembershipError::NotFound)?;

        let current = session.effective_status();
        if current.is_terminal() {
            return Ok(session);
        }

        let remote = match self.gateway.payment_status(renewal_id).await {
            Ok(payload) => RenewalStatus::from_remote(&payload.status),
            Err(error) => {
                tracing::warn!(%error, renewal_id, "renewal status poll failed");
                None
            }
        };

        if let Some(next) = remote {
            if next != current {
                match next {
                    RenewalStatus::Success => self.notifier.success(RENEWAL_RECORDED_NOTICE),
                    RenewalStatus::Failed => self.notifier.error(RENEWAL_FAILED_NOTICE),
                    RenewalStatus::Pending => {}
                }
                session.status = Some(next);
                self.store.save(session.clone())?;
            }
        }

        Ok(session)
    }
}
