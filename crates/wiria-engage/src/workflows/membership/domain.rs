use serde::{Deserialize, Serialize};

use super::fees::FeeBreakdown;
use crate::workflows::payments::{PaymentMethod, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipType {
    #[serde(rename = "INDIVIDUAL")]
    Individual,
    #[serde(rename = "GROUP")]
    Group,
}

/// New-member application as submitted by the public site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub applicant_name: String,
    /// Set for group memberships (self-help groups, CBOs, schools).
    #[serde(default)]
    pub group_name: Option<String>,
    pub email: String,
    pub phone: String,
    pub membership_type: MembershipType,
    #[serde(default)]
    pub member_count: u32,
    pub payment_method: PaymentMethod,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), String> {
        if self.applicant_name.trim().is_empty() {
            return Err("an applicant name is required".to_string());
        }
        if self.payment_method == PaymentMethod::StkPush && self.phone.trim().is_empty() {
            return Err("a phone number is required for an M-Pesa prompt".to_string());
        }
        Ok(())
    }
}

/// Renewal request for an existing member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalForm {
    pub member_no: String,
    pub phone: String,
    pub membership_type: MembershipType,
    #[serde(default)]
    pub member_count: u32,
    /// Member count on record from the previous renewal.
    #[serde(default)]
    pub previous_max: u32,
    pub payment_method: PaymentMethod,
}

impl RenewalForm {
    pub fn validate(&self) -> Result<(), String> {
        if self.member_no.trim().is_empty() {
            return Err("a membership number is required".to_string());
        }
        if self.payment_method == PaymentMethod::StkPush && self.phone.trim().is_empty() {
            return Err("a phone number is required for an M-Pesa prompt".to_string());
        }
        Ok(())
    }
}

/// Registration is not polled for payment state; the receipt plus the
/// quoted fees are everything the caller gets back.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationOutcome {
    pub member_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_request_id: Option<String>,
    pub fees: FeeBreakdown,
}

/// Renewal payment state as mirrored locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenewalStatus {
    Pending,
    Success,
    Failed,
}

impl RenewalStatus {
    pub fn from_remote(raw: &str) -> Option<Self> {
        match raw {
            "PENDING" => Some(Self::Pending),
            "SUCCESS" => Some(Self::Success),
            "FAILED" => Some(Self::Failed),
            _ => None,
        }
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

/// Transient per-renewal state, reset to all-unset like a donation session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenewalSession {
    pub renewal_id: Option<String>,
    pub checkout_request_id: Option<String>,
    pub status: Option<RenewalStatus>,
    pub is_submitting: bool,
}

impl RenewalSession {
    pub fn begin() -> Self {
        Self {
            renewal_id: None,
            checkout_request_id: None,
            status: None,
            is_submitting: true,
        }
    }

    pub fn reset(&mut self) {
        self.renewal_id = None;
        self.checkout_request_id = None;
        self.status = None;
        self.is_submitting = false;
    }

    pub fn effective_status(&self) -> RenewalStatus {
        self.status.unwrap_or(RenewalStatus::Pending)
    }

    pub fn view(&self) -> RenewalStatusView {
        RenewalStatusView {
            renewal_id: self.renewal_id.clone(),
            checkout_request_id: self.checkout_request_id.clone(),
            status: self.effective_status().label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenewalStatusView {
    pub renewal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_request_id: Option<String>,
    pub status: &'static str,
}

/// Storage abstraction for renewal sessions.
pub trait RenewalStore: Send + Sync {
    fn save(&self, session: RenewalSession) -> Result<(), StoreError>;
    fn fetch(&self, renewal_id: &str) -> Result<Option<RenewalSession>, StoreError>;
}
