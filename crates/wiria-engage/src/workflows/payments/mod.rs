//! Types and the backend port shared by the money-moving workflows
//! (donations, membership registration and renewal).

mod gateway;

pub use gateway::{
    DonationReceipt, HttpPaymentGateway, PaymentGateway, RegistrationReceipt, RenewalReceipt,
    StatusPayload,
};

use serde::{Deserialize, Serialize};

/// How the payer settles: an M-Pesa STK push confirmed on their phone, or a
/// self-initiated paybill payment reconciled later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "STK_PUSH")]
    StkPush,
    #[serde(rename = "MANUAL")]
    Manual,
}

/// Session store failure. The stores are in-memory mirrors of remote state,
/// so the only failure mode worth naming is unavailability.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
