use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use wiria_engage::backend::BackendError;
use wiria_engage::notify::{NotificationCenter, Severity};
use wiria_engage::workflows::donations::{
    DonationError, DonationFlow, DonationRequest, DonationSession, DonationStatus, DonationStore,
};
use wiria_engage::workflows::membership::{FeeBreakdown, RenewalFeeBreakdown};
use wiria_engage::workflows::membership::{RegistrationForm, RenewalForm};
use wiria_engage::workflows::payments::{
    DonationReceipt, PaymentGateway, PaymentMethod, RegistrationReceipt, RenewalReceipt,
    StatusPayload, StoreError,
};

fn unreachable_backend(path: &str) -> BackendError {
    BackendError::Status {
        status: 503,
        path: path.to_string(),
    }
}

/// Gateway scripted per test: one initiate response and a queue of status
/// poll responses, with a counter on the poll calls.
#[derive(Default)]
struct ScriptedGateway {
    initiate_response: Mutex<Option<DonationReceipt>>,
    status_responses: Mutex<VecDeque<Option<StatusPayload>>>,
    status_calls: AtomicUsize,
}

impl ScriptedGateway {
    fn with_receipt(receipt: DonationReceipt) -> Arc<Self> {
        let gateway = Self::default();
        *gateway.initiate_response.lock().expect("gateway mutex poisoned") = Some(receipt);
        Arc::new(gateway)
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn queue_status(&self, status: Option<&str>) {
        self.status_responses
            .lock()
            .expect("gateway mutex poisoned")
            .push_back(status.map(|raw| StatusPayload {
                status: raw.to_string(),
            }));
    }

    fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn initiate_donation(
        &self,
        _request: &DonationRequest,
    ) -> Result<DonationReceipt, BackendError> {
        self.initiate_response
            .lock()
            .expect("gateway mutex poisoned")
            .clone()
            .ok_or_else(|| unreachable_backend("/donations/initiate"))
    }

    async fn donation_status(&self, donation_id: &str) -> Result<StatusPayload, BackendError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.status_responses
            .lock()
            .expect("gateway mutex poisoned")
            .pop_front()
            .flatten()
            .ok_or_else(|| unreachable_backend(&format!("/donations/status/{donation_id}")))
    }

    async fn register_member(
        &self,
        _form: &RegistrationForm,
        _fees: &FeeBreakdown,
    ) -> Result<RegistrationReceipt, BackendError> {
        Err(unreachable_backend("/members/register"))
    }

    async fn renew_membership(
        &self,
        _form: &RenewalForm,
        _fees: &RenewalFeeBreakdown,
    ) -> Result<RenewalReceipt, BackendError> {
        Err(unreachable_backend("/members/renew"))
    }

    async fn payment_status(&self, payment_id: &str) -> Result<StatusPayload, BackendError> {
        Err(unreachable_backend(&format!("/payments/status/{payment_id}")))
    }
}

#[derive(Default)]
struct MemoryDonations {
    sessions: Mutex<HashMap<String, DonationSession>>,
}

impl DonationStore for MemoryDonations {
    fn save(&self, session: DonationSession) -> Result<(), StoreError> {
        let key = session.donation_id.clone().unwrap_or_default();
        self.sessions
            .lock()
            .expect("store mutex poisoned")
            .insert(key, session);
        Ok(())
    }

    fn fetch(&self, donation_id: &str) -> Result<Option<DonationSession>, StoreError> {
        Ok(self
            .sessions
            .lock()
            .expect("store mutex poisoned")
            .get(donation_id)
            .cloned())
    }
}

fn stk_request() -> DonationRequest {
    DonationRequest {
        donor_name: "Otieno K.".to_string(),
        email: Some("otieno@example.org".to_string()),
        phone: "254711000222".to_string(),
        amount: 1_000,
        payment_method: PaymentMethod::StkPush,
    }
}

fn pending_receipt() -> DonationReceipt {
    DonationReceipt {
        donation_id: "don-41".to_string(),
        checkout_request_id: Some("ws_CO_2608".to_string()),
        status: None,
    }
}

fn flow_with(
    gateway: Arc<ScriptedGateway>,
) -> (
    DonationFlow<ScriptedGateway, MemoryDonations>,
    Arc<MemoryDonations>,
    Arc<NotificationCenter>,
) {
    let store = Arc::new(MemoryDonations::default());
    let notifier = Arc::new(NotificationCenter::new());
    let flow = DonationFlow::new(gateway, store.clone(), notifier.clone());
    (flow, store, notifier)
}

#[tokio::test]
async fn stk_push_submission_is_stored_pending_with_prompt_notice() {
    let gateway = ScriptedGateway::with_receipt(pending_receipt());
    let (flow, store, notifier) = flow_with(gateway);

    let session = flow.submit(stk_request()).await.expect("submission succeeds");

    assert_eq!(session.donation_id.as_deref(), Some("don-41"));
    assert_eq!(session.checkout_request_id.as_deref(), Some("ws_CO_2608"));
    assert_eq!(session.status, Some(DonationStatus::Pending));
    assert!(!session.is_submitting);

    let stored = store.fetch("don-41").expect("fetch succeeds");
    assert_eq!(stored, Some(session));

    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].severity, Severity::Info);
    assert!(events[0].message.contains("M-Pesa PIN"));
}

#[tokio::test]
async fn synchronous_confirmation_completes_the_session() {
    let gateway = ScriptedGateway::with_receipt(DonationReceipt {
        donation_id: "don-42".to_string(),
        checkout_request_id: None,
        status: Some("COMPLETED".to_string()),
    });
    let (flow, _, notifier) = flow_with(gateway);

    let request = DonationRequest {
        payment_method: PaymentMethod::Manual,
        ..stk_request()
    };
    let session = flow.submit(request).await.expect("submission succeeds");

    assert_eq!(session.status, Some(DonationStatus::Completed));
    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].severity, Severity::Success);
}

#[tokio::test]
async fn backend_failure_emits_one_generic_error() {
    let gateway = ScriptedGateway::failing();
    let (flow, _, notifier) = flow_with(gateway);

    let error = flow.submit(stk_request()).await.expect_err("submission fails");
    assert!(matches!(error, DonationError::Backend(_)));

    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].severity, Severity::Error);
    assert!(events[0].message.contains("try again"));
}

#[tokio::test]
async fn completed_poll_notifies_once_and_sticks() {
    let gateway = ScriptedGateway::with_receipt(pending_receipt());
    gateway.queue_status(Some("COMPLETED"));
    let (flow, _, notifier) = flow_with(gateway.clone());

    flow.submit(stk_request()).await.expect("submission succeeds");

    let session = flow.check_status("don-41").await.expect("poll succeeds");
    assert_eq!(session.status, Some(DonationStatus::Completed));
    assert_eq!(gateway.status_calls(), 1);

    let success_count = notifier
        .events()
        .iter()
        .filter(|event| event.severity == Severity::Success)
        .count();
    assert_eq!(success_count, 1);

    // Terminal state is sticky: a second poll must not hit the gateway or
    // notify again.
    let session = flow.check_status("don-41").await.expect("poll succeeds");
    assert_eq!(session.status, Some(DonationStatus::Completed));
    assert_eq!(gateway.status_calls(), 1);
    let success_count = notifier
        .events()
        .iter()
        .filter(|event| event.severity == Severity::Success)
        .count();
    assert_eq!(success_count, 1);
}

#[tokio::test]
async fn failed_poll_notifies_with_error() {
    let gateway = ScriptedGateway::with_receipt(pending_receipt());
    gateway.queue_status(Some("FAILED"));
    let (flow, _, notifier) = flow_with(gateway);

    flow.submit(stk_request()).await.expect("submission succeeds");
    let session = flow.check_status("don-41").await.expect("poll succeeds");

    assert_eq!(session.status, Some(DonationStatus::Failed));
    let errors: Vec<_> = notifier
        .events()
        .into_iter()
        .filter(|event| event.severity == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("did not go through"));
}

#[tokio::test]
async fn poll_errors_are_swallowed_and_state_stays_pending() {
    let gateway = ScriptedGateway::with_receipt(pending_receipt());
    gateway.queue_status(None); // transport failure
    let (flow, _, notifier) = flow_with(gateway.clone());

    flow.submit(stk_request()).await.expect("submission succeeds");
    let before = notifier.events().len();

    let session = flow.check_status("don-41").await.expect("poll swallows errors");
    assert_eq!(session.status, Some(DonationStatus::Pending));
    assert_eq!(notifier.events().len(), before, "no notification on a failed poll");
}

#[tokio::test]
async fn unknown_remote_status_leaves_state_pending() {
    let gateway = ScriptedGateway::with_receipt(pending_receipt());
    gateway.queue_status(Some("REVERSED"));
    let (flow, _, _) = flow_with(gateway);

    flow.submit(stk_request()).await.expect("submission succeeds");
    let session = flow.check_status("don-41").await.expect("poll succeeds");
    assert_eq!(session.status, Some(DonationStatus::Pending));
}

#[tokio::test]
async fn unknown_donation_is_not_found() {
    let gateway = ScriptedGateway::failing();
    let (flow, _, _) = flow_with(gateway);

    let error = flow.check_status("missing").await.expect_err("lookup fails");
    assert!(matches!(error, DonationError::NotFound));
}

#[tokio::test]
async fn invalid_request_never_reaches_the_gateway() {
    let gateway = ScriptedGateway::with_receipt(pending_receipt());
    let (flow, store, _) = flow_with(gateway);

    let request = DonationRequest {
        amount: 0,
        ..stk_request()
    };
    let error = flow.submit(request).await.expect_err("validation fails");
    assert!(matches!(error, DonationError::Invalid(_)));
    assert_eq!(store.fetch("don-41").expect("fetch succeeds"), None);
}
