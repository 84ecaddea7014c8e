//! Delivery channels for outreach submissions.
//!
//! Each channel is one way of getting a message out of the browser session
//! and into the organization's hands. The orchestrator walks them in order
//! and stops at the first success; a channel that is not ready (backend
//! flagged unreachable, email provider unconfigured) is skipped without an
//! attempt.

mod backend;
mod email;
mod manual;

pub use backend::BackendChannel;
pub use email::{EmailChannel, EMAILJS_ENDPOINT};
pub use manual::{handoff_links, ManualHandoff};

use async_trait::async_trait;

use super::domain::{DeliveryMethod, OutreachMessage};
use crate::backend::BackendError;

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("backend rejected the submission: {0}")]
    Backend(#[from] BackendError),
    #[error("email provider returned status {0}")]
    Provider(u16),
    #[error("email provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("email provider configuration missing")]
    NotConfigured,
}

/// One best-effort delivery mechanism. Implementations make exactly one
/// attempt per call; retries and queueing are deliberately absent.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    fn method(&self) -> DeliveryMethod;

    /// Cheap readiness check consulted before every attempt. Not-ready
    /// channels are skipped entirely, never attempted.
    fn is_ready(&self) -> bool;

    async fn attempt(&self, message: &OutreachMessage) -> Result<(), ChannelError>;
}
