//! Outreach form intake: contact messages, safeguarding reports, and
//! newsletter signups, delivered through an ordered chain of best-effort
//! channels.

pub mod channels;
pub mod domain;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use channels::{
    handoff_links, BackendChannel, ChannelError, DeliveryChannel, EmailChannel, ManualHandoff,
};
pub use domain::{DeliveryMethod, OutreachKind, OutreachMessage, SubmissionResult};
pub use router::outreach_router;
pub use service::OutreachService;
