use serde::Serialize;

use crate::config::OrganizationConfig;
use crate::workflows::outreach::domain::OutreachMessage;

/// Deep links offered to the user when no channel could deliver: a WhatsApp
/// conversation and a prefilled mailto, both carrying the message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManualHandoff {
    pub whatsapp_url: String,
    pub mailto_url: String,
}

/// Builds the offline handoff links from the organization's configured
/// contact points.
pub fn handoff_links(
    organization: &OrganizationConfig,
    message: &OutreachMessage,
) -> ManualHandoff {
    let text = format!(
        "{} - {} ({}): {}",
        message.subject, message.name, message.email, message.body
    );

    // wa.me wants the number without a leading + or separators.
    let number: String = organization
        .whatsapp_number
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    ManualHandoff {
        whatsapp_url: format!("https://wa.me/{}?text={}", number, percent_encode(&text)),
        mailto_url: format!(
            "mailto:{}?subject={}&body={}",
            organization.contact_email,
            percent_encode(&message.subject),
            percent_encode(&message.body)
        ),
    }
}

/// RFC 3986 percent-encoding over everything but the unreserved set.
fn percent_encode(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            other => {
                encoded.push('%');
                encoded.push_str(&format!("{other:02X}"));
            }
        }
    }
    encoded
}
