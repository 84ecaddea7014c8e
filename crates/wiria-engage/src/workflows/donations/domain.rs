use serde::{Deserialize, Serialize};

use crate::workflows::payments::{PaymentMethod, StoreError};

/// Donor-supplied input for one submission attempt. Never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRequest {
    pub donor_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub phone: String,
    /// Whole Kenyan shillings.
    pub amount: u32,
    pub payment_method: PaymentMethod,
}

impl DonationRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.amount == 0 {
            return Err("donation amount must be at least one shilling".to_string());
        }
        if self.payment_method == PaymentMethod::StkPush && self.phone.trim().is_empty() {
            return Err("a phone number is required for an M-Pesa prompt".to_string());
        }
        Ok(())
    }
}

/// Client-side mirror of the remote payment state. Refreshed only when
/// explicitly polled; the last fetched value wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DonationStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

impl DonationStatus {
    /// Identity mapping over the backend's documented strings; anything
    /// else is `None` so the caller keeps its current state.
    pub fn from_remote(raw: &str) -> Option<Self> {
        match raw {
            "PENDING" => Some(Self::Pending),
            "COMPLETED" => Some(Self::Completed),
            "FAILED" => Some(Self::Failed),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Transient per-donation state. All fields start unset and return to that
/// shape on [`DonationSession::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonationSession {
    pub donation_id: Option<String>,
    pub checkout_request_id: Option<String>,
    pub status: Option<DonationStatus>,
    pub is_submitting: bool,
}

impl DonationSession {
    /// Fresh session at the start of a submission attempt.
    pub fn begin() -> Self {
        Self {
            donation_id: None,
            checkout_request_id: None,
            status: None,
            is_submitting: true,
        }
    }

    /// Returns every transient field to its initial unset value.
    pub fn reset(&mut self) {
        self.donation_id = None;
        self.checkout_request_id = None;
        self.status = None;
        self.is_submitting = false;
    }

    /// The status to act on; an unset status reads as pending.
    pub fn effective_status(&self) -> DonationStatus {
        self.status.unwrap_or(DonationStatus::Pending)
    }

    pub fn view(&self) -> DonationStatusView {
        DonationStatusView {
            donation_id: self.donation_id.clone(),
            checkout_request_id: self.checkout_request_id.clone(),
            status: self.effective_status().label(),
        }
    }
}

/// Sanitized representation returned by the HTTP surface.
#[derive(Debug, Clone, Serialize)]
pub struct DonationStatusView {
    pub donation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_request_id: Option<String>,
    pub status: &'static str,
}

/// Storage abstraction so the flow can be exercised in isolation.
pub trait DonationStore: Send + Sync {
    fn save(&self, session: DonationSession) -> Result<(), StoreError>;
    fn fetch(&self, donation_id: &str) -> Result<Option<DonationSession>, StoreError>;
}
