use serde::{Deserialize, Serialize};

use super::channels::ManualHandoff;

/// Which public form produced a message. Decides the backend endpoint, the
/// email template, and the wording of user-facing acknowledgements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutreachKind {
    Contact,
    Safeguarding,
    Newsletter,
}

impl OutreachKind {
    pub const fn label(self) -> &'static str {
        match self {
            OutreachKind::Contact => "contact",
            OutreachKind::Safeguarding => "safeguarding",
            OutreachKind::Newsletter => "newsletter",
        }
    }
}

/// One submission attempt's payload. Exists only for the duration of the
/// attempt; nothing here is cached or persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutreachMessage {
    #[serde(skip)]
    pub kind: OutreachKind,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: String,
    #[serde(rename = "message")]
    pub body: String,
}

/// Which channel ultimately handled (or failed to handle) a submission.
/// Wire strings match what the public site expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeliveryMethod {
    #[serde(rename = "api")]
    Api,
    #[serde(rename = "emailjs")]
    Email,
    #[serde(rename = "none")]
    Unattempted,
}

/// Outcome of one submission call. Created and discarded per call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionResult {
    pub success: bool,
    pub method: DeliveryMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Offline handoff links, present only when every channel failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual: Option<ManualHandoff>,
}
