use std::sync::Arc;

use super::channels::{handoff_links, DeliveryChannel};
use super::domain::{DeliveryMethod, OutreachKind, OutreachMessage, SubmissionResult};
use crate::config::OrganizationConfig;
use crate::notify::NotificationCenter;

/// Walks the configured delivery channels in order until one accepts the
/// message. One attempt per channel per call; channel errors are folded
/// into the result, never raised to the caller.
pub struct OutreachService {
    channels: Vec<Arc<dyn DeliveryChannel>>,
    organization: OrganizationConfig,
    notifier: Arc<NotificationCenter>,
}

impl OutreachService {
    pub fn new(
        channels: Vec<Arc<dyn DeliveryChannel>>,
        organization: OrganizationConfig,
        notifier: Arc<NotificationCenter>,
    ) -> Self {
        Self {
            channels,
            organization,
            notifier,
        }
    }

    pub async fn submit(&self, message: &OutreachMessage) -> SubmissionResult {
        let mut method = DeliveryMethod::Unattempted;
        let mut error = None;

        for channel in &self.channels {
            if !channel.is_ready() {
                continue;
            }

            method = channel.method();
            match channel.attempt(message).await {
                Ok(()) => {
                    self.notifier.success(acknowledgement(message.kind));
                    return SubmissionResult {
                        success: true,
                        method,
                        error: None,
                        manual: None,
                    };
                }
                Err(channel_error) => {
                    tracing::warn!(
                        %channel_error,
                        method = ?method,
                        kind = message.kind.label(),
                        "delivery channel failed"
                    );
                    error = Some(channel_error.to_string());
                }
            }
        }

        self.notifier.error(failure_notice(message.kind));
        SubmissionResult {
            success: false,
            method,
            error,
            manual: Some(handoff_links(&self.organization, message)),
        }
    }
}

fn acknowledgement(kind: OutreachKind) -> &'static str {
    match kind {
        OutreachKind::Contact => "Thank you for reaching out. We will get back to you shortly.",
        OutreachKind::Safeguarding => {
            "Your report has been received and will be handled confidentially."
        }
        OutreachKind::Newsletter => "You are now subscribed to our newsletter.",
    }
}

fn failure_notice(kind: OutreachKind) -> &'static str {
    match kind {
        OutreachKind::Contact | OutreachKind::Newsletter => {
            "We could not send your message right now. Please reach us through WhatsApp or email."
        }
        OutreachKind::Safeguarding => {
            "We could not send your report right now. Please reach us through WhatsApp or email."
        }
    }
}
