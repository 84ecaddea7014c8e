use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::backend::{BackendClient, BackendError};
use crate::workflows::donations::domain::DonationRequest;
use crate::workflows::membership::domain::{RegistrationForm, RenewalForm};
use crate::workflows::membership::fees::{FeeBreakdown, RenewalFeeBreakdown};

/// Remote payment state as the backend reports it. The status string is
/// mapped onto the local enums by the flows; unknown strings leave local
/// state untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusPayload {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DonationReceipt {
    pub donation_id: String,
    #[serde(default)]
    pub checkout_request_id: Option<String>,
    /// Present when the backend settles the payment synchronously.
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationReceipt {
    pub member_no: String,
    #[serde(default)]
    pub checkout_request_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenewalReceipt {
    pub renewal_id: String,
    #[serde(default)]
    pub checkout_request_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Backend operations the money flows depend on, kept behind a trait so the
/// flows can be exercised against in-memory fakes.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn initiate_donation(
        &self,
        request: &DonationRequest,
    ) -> Result<DonationReceipt, BackendError>;

    async fn donation_status(&self, donation_id: &str) -> Result<StatusPayload, BackendError>;

    async fn register_member(
        &self,
        form: &RegistrationForm,
        fees: &FeeBreakdown,
    ) -> Result<RegistrationReceipt, BackendError>;

    async fn renew_membership(
        &self,
        form: &RenewalForm,
        fees: &RenewalFeeBreakdown,
    ) -> Result<RenewalReceipt, BackendError>;

    async fn payment_status(&self, payment_id: &str) -> Result<StatusPayload, BackendError>;
}

#[derive(Debug, Serialize)]
struct RegistrationSubmission<'a> {
    #[serde(flatten)]
    form: &'a RegistrationForm,
    fees: &'a FeeBreakdown,
}

#[derive(Debug, Serialize)]
struct RenewalSubmission<'a> {
    #[serde(flatten)]
    form: &'a RenewalForm,
    fees: &'a RenewalFeeBreakdown,
}

/// The real gateway over the organization's REST backend.
#[derive(Debug)]
pub struct HttpPaymentGateway {
    client: Arc<BackendClient>,
}

impl HttpPaymentGateway {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn initiate_donation(
        &self,
        request: &DonationRequest,
    ) -> Result<DonationReceipt, BackendError> {
        self.client.post_json("/donations/initiate", request).await
    }

    async fn donation_status(&self, donation_id: &str) -> Result<StatusPayload, BackendError> {
        self.client
            .get_json(&format!("/donations/status/{donation_id}"))
            .await
    }

    async fn register_member(
        &self,
        form: &RegistrationForm,
        fees: &FeeBreakdown,
    ) -> Result<RegistrationReceipt, BackendError> {
        self.client
            .post_json("/members/register", &RegistrationSubmission { form, fees })
            .await
    }

    async fn renew_membership(
        &self,
        form: &RenewalForm,
        fees: &RenewalFeeBreakdown,
    ) -> Result<RenewalReceipt, BackendError> {
        self.client
            .post_json("/members/renew", &RenewalSubmission { form, fees })
            .await
    }

    async fn payment_status(&self, payment_id: &str) -> Result<StatusPayload, BackendError> {
        self.client
            .get_json(&format!("/payments/status/{payment_id}"))
            .await
    }
}
