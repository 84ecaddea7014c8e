use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::OrganizationConfig;
use crate::notify::NotificationCenter;
use crate::workflows::outreach::channels::{ChannelError, DeliveryChannel};
use crate::workflows::outreach::domain::{DeliveryMethod, OutreachKind, OutreachMessage};
use crate::workflows::outreach::service::OutreachService;

pub(super) fn organization() -> OrganizationConfig {
    OrganizationConfig {
        whatsapp_number: "254700000000".to_string(),
        contact_email: "info@wiria.or.ke".to_string(),
    }
}

pub(super) fn contact_message() -> OutreachMessage {
    OutreachMessage {
        kind: OutreachKind::Contact,
        name: "Achieng O.".to_string(),
        email: "achieng@example.org".to_string(),
        phone: Some("+254711000222".to_string()),
        subject: "Water project".to_string(),
        body: "How can we partner?".to_string(),
    }
}

/// Scripted channel standing in for the backend or email provider: fixed
/// method, fixed readiness, fixed outcome, attempt counter.
pub(super) struct ScriptedChannel {
    method: DeliveryMethod,
    ready: bool,
    succeeds: bool,
    attempts: AtomicUsize,
}

impl ScriptedChannel {
    pub(super) fn ready(method: DeliveryMethod, succeeds: bool) -> Arc<Self> {
        Arc::new(Self {
            method,
            ready: true,
            succeeds,
            attempts: AtomicUsize::new(0),
        })
    }

    pub(super) fn not_ready(method: DeliveryMethod) -> Arc<Self> {
        Arc::new(Self {
            method,
            ready: false,
            succeeds: false,
            attempts: AtomicUsize::new(0),
        })
    }

    pub(super) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeliveryChannel for ScriptedChannel {
    fn method(&self) -> DeliveryMethod {
        self.method
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn attempt(&self, _message: &OutreachMessage) -> Result<(), ChannelError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.succeeds {
            Ok(())
        } else {
            Err(ChannelError::Provider(500))
        }
    }
}

pub(super) fn service_with(
    channels: Vec<Arc<dyn DeliveryChannel>>,
) -> (OutreachService, Arc<NotificationCenter>) {
    let notifier = Arc::new(NotificationCenter::new());
    let service = OutreachService::new(channels, organization(), notifier.clone());
    (service, notifier)
}
