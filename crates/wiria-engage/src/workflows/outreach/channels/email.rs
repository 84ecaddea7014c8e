use async_trait::async_trait;
use serde::Serialize;

use super::{ChannelError, DeliveryChannel};
use crate::backend::BackendError;
use crate::config::EmailJsConfig;
use crate::workflows::outreach::domain::{DeliveryMethod, OutreachKind, OutreachMessage};

/// The transactional email provider's send endpoint.
pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Fallback channel: relays the message through EmailJS so staff still
/// receive it when the backend is down. Success is the provider answering
/// with a 2xx status; anything else is that attempt's failure.
pub struct EmailChannel {
    http: reqwest::Client,
    config: Option<EmailJsConfig>,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    from_email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    subject: &'a str,
    message: &'a str,
}

impl EmailChannel {
    pub fn new(http: reqwest::Client, config: Option<EmailJsConfig>) -> Self {
        Self { http, config }
    }

    /// Builds the channel with its own HTTP client. The provider call uses
    /// the same request timeout as the backend client.
    pub fn from_config(
        config: Option<EmailJsConfig>,
        timeout: std::time::Duration,
    ) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(http, config))
    }

    fn template_id(config: &EmailJsConfig, kind: OutreachKind) -> &str {
        match kind {
            OutreachKind::Contact => &config.contact_template,
            OutreachKind::Safeguarding => &config.safeguarding_template,
            OutreachKind::Newsletter => &config.newsletter_template,
        }
    }

    fn send_request<'a>(
        config: &'a EmailJsConfig,
        message: &'a OutreachMessage,
    ) -> SendRequest<'a> {
        SendRequest {
            service_id: &config.service_id,
            template_id: Self::template_id(config, message.kind),
            user_id: &config.public_key,
            template_params: TemplateParams {
                from_name: &message.name,
                from_email: &message.email,
                phone: message.phone.as_deref(),
                subject: &message.subject,
                message: &message.body,
            },
        }
    }
}

#[async_trait]
impl DeliveryChannel for EmailChannel {
    fn method(&self) -> DeliveryMethod {
        DeliveryMethod::Email
    }

    fn is_ready(&self) -> bool {
        self.config.is_some()
    }

    async fn attempt(&self, message: &OutreachMessage) -> Result<(), ChannelError> {
        let config = self.config.as_ref().ok_or(ChannelError::NotConfigured)?;

        let response = self
            .http
            .post(EMAILJS_ENDPOINT)
            .json(&Self::send_request(config, message))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ChannelError::Provider(status.as_u16()))
        }
    }
}

impl std::fmt::Debug for EmailChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailChannel")
            .field("configured", &self.config.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EmailJsConfig {
        EmailJsConfig {
            service_id: "service_wiria".to_string(),
            public_key: "pk_test".to_string(),
            contact_template: "contact_form".to_string(),
            safeguarding_template: "safeguarding_report".to_string(),
            newsletter_template: "newsletter_signup".to_string(),
        }
    }

    fn message(kind: OutreachKind) -> OutreachMessage {
        OutreachMessage {
            kind,
            name: "Achieng O.".to_string(),
            email: "achieng@example.org".to_string(),
            phone: Some("+254711000222".to_string()),
            subject: "Volunteering".to_string(),
            body: "I would like to help.".to_string(),
        }
    }

    #[test]
    fn unconfigured_channel_is_not_ready() {
        let channel = EmailChannel::new(reqwest::Client::new(), None);
        assert!(!channel.is_ready());
    }

    #[test]
    fn selects_template_by_kind() {
        let config = config();
        assert_eq!(
            EmailChannel::template_id(&config, OutreachKind::Safeguarding),
            "safeguarding_report"
        );
        assert_eq!(
            EmailChannel::template_id(&config, OutreachKind::Newsletter),
            "newsletter_signup"
        );
    }

    #[test]
    fn send_request_carries_credentials_and_params() {
        let config = config();
        let message = message(OutreachKind::Contact);
        let request = EmailChannel::send_request(&config, &message);

        let value = serde_json::to_value(&request).expect("serializes");
        assert_eq!(value["service_id"], "service_wiria");
        assert_eq!(value["template_id"], "contact_form");
        assert_eq!(value["user_id"], "pk_test");
        assert_eq!(value["template_params"]["from_email"], "achieng@example.org");
        assert_eq!(value["template_params"]["message"], "I would like to help.");
    }
}
