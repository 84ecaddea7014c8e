use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;
use wiria_engage::backend::HealthMonitor;
use wiria_engage::workflows::donations::{DonationSession, DonationStore};
use wiria_engage::workflows::membership::{
    FeeSchedule, MembershipRates, RenewalSession, RenewalStore,
};
use wiria_engage::workflows::payments::StoreError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) connectivity: Arc<HealthMonitor>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Donation sessions are transient mirrors of remote state, held in a
/// plain in-process map.
#[derive(Default, Clone)]
pub(crate) struct InMemoryDonationStore {
    sessions: Arc<Mutex<HashMap<String, DonationSession>>>,
}

impl DonationStore for InMemoryDonationStore {
    fn save(&self, session: DonationSession) -> Result<(), StoreError> {
        let key = session.donation_id.clone().unwrap_or_default();
        self.sessions
            .lock()
            .expect("donation store mutex poisoned")
            .insert(key, session);
        Ok(())
    }

    fn fetch(&self, donation_id: &str) -> Result<Option<DonationSession>, StoreError> {
        Ok(self
            .sessions
            .lock()
            .expect("donation store mutex poisoned")
            .get(donation_id)
            .cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRenewalStore {
    sessions: Arc<Mutex<HashMap<String, RenewalSession>>>,
}

impl RenewalStore for InMemoryRenewalStore {
    fn save(&self, session: RenewalSession) -> Result<(), StoreError> {
        let key = session.renewal_id.clone().unwrap_or_default();
        self.sessions
            .lock()
            .expect("renewal store mutex poisoned")
            .insert(key, session);
        Ok(())
    }

    fn fetch(&self, renewal_id: &str) -> Result<Option<RenewalSession>, StoreError> {
        Ok(self
            .sessions
            .lock()
            .expect("renewal store mutex poisoned")
            .get(renewal_id)
            .cloned())
    }
}

/// The fee schedule the board adopted for the current year, in whole
/// Kenyan shillings.
pub(crate) fn default_fee_schedule() -> FeeSchedule {
    FeeSchedule {
        individual: MembershipRates {
            registration: 500,
            subscription: 1_000,
        },
        group: MembershipRates {
            registration: 1_500,
            subscription: 3_000,
        },
    }
}
