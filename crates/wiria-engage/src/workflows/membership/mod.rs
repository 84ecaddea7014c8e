//! Membership registration and renewal, including the fee schedule the
//! public site quotes before a member pays.

pub mod domain;
pub mod fees;
pub mod router;
pub mod service;

pub use domain::{
    MembershipType, RegistrationForm, RegistrationOutcome, RenewalForm, RenewalSession,
    RenewalStatus, RenewalStatusView, RenewalStore,
};
pub use fees::{FeeBreakdown, FeeDetail, FeeSchedule, MembershipRates, RenewalFeeBreakdown};
pub use router::membership_router;
pub use service::{MembershipError, MembershipFlow};
