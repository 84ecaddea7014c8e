use std::sync::Arc;

use async_trait::async_trait;

use super::{ChannelError, DeliveryChannel};
use crate::backend::{BackendClient, ConnectivityProbe};
use crate::workflows::outreach::domain::{DeliveryMethod, OutreachKind, OutreachMessage};

/// Primary channel: the organization's REST backend. Gated on the cached
/// connectivity flag so a known-down backend is not attempted at all.
pub struct BackendChannel {
    client: Arc<BackendClient>,
    probe: Arc<dyn ConnectivityProbe>,
}

impl BackendChannel {
    pub fn new(client: Arc<BackendClient>, probe: Arc<dyn ConnectivityProbe>) -> Self {
        Self { client, probe }
    }

    pub(crate) fn endpoint(kind: OutreachKind) -> &'static str {
        match kind {
            OutreachKind::Contact => "/contact",
            OutreachKind::Safeguarding => "/safeguarding",
            OutreachKind::Newsletter => "/newsletter/subscribe",
        }
    }
}

#[async_trait]
impl DeliveryChannel for BackendChannel {
    fn method(&self) -> DeliveryMethod {
        DeliveryMethod::Api
    }

    fn is_ready(&self) -> bool {
        self.probe.is_connected()
    }

    async fn attempt(&self, message: &OutreachMessage) -> Result<(), ChannelError> {
        let _: serde_json::Value = self
            .client
            .post_json(Self::endpoint(message.kind), message)
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for BackendChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendChannel")
            .field("base_url", &self.client.base_url())
            .finish_non_exhaustive()
    }
}
