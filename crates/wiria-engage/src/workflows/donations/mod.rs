//! Donation intake over M-Pesa (STK push) or a self-initiated paybill
//! payment, with a manually-triggered status poll against the backend.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{
    DonationRequest, DonationSession, DonationStatus, DonationStatusView, DonationStore,
};
pub use router::donation_router;
pub use service::{DonationError, DonationFlow};
