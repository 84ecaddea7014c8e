use serde::{Deserialize, Serialize};

use super::domain::MembershipType;

/// Registration and annual subscription rates for one membership type, in
/// whole Kenyan shillings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRates {
    pub registration: u32,
    pub subscription: u32,
}

/// Static rate table keyed by membership type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub individual: MembershipRates,
    pub group: MembershipRates,
}

/// One line of a quote. `subtotal` is always `rate * count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeDetail {
    pub rate: u32,
    pub count: u32,
    pub subtotal: u32,
}

impl FeeDetail {
    fn assess(rate: u32, count: u32) -> Self {
        Self {
            rate,
            count,
            subtotal: rate * count,
        }
    }
}

/// Quote for a new registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeBreakdown {
    pub registration: FeeDetail,
    pub subscription: FeeDetail,
    pub total: u32,
}

/// Quote for a renewal. `new_registration` covers only members added since
/// the last known count; for individual members it is always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenewalFeeBreakdown {
    pub renewal: FeeDetail,
    pub new_registration: FeeDetail,
    pub total: u32,
}

impl FeeSchedule {
    pub fn rates(&self, membership_type: MembershipType) -> MembershipRates {
        match membership_type {
            MembershipType::Individual => self.individual,
            MembershipType::Group => self.group,
        }
    }

    /// Pure function of the inputs; inputs are coerced with `max`, never
    /// rejected, so this is safe to call on every quote request.
    pub fn registration_quote(
        &self,
        membership_type: MembershipType,
        member_count: u32,
    ) -> FeeBreakdown {
        let rates = self.rates(membership_type);
        let count = match membership_type {
            MembershipType::Individual => 1,
            MembershipType::Group => member_count.max(1),
        };

        let registration = FeeDetail::assess(rates.registration, count);
        let subscription = FeeDetail::assess(rates.subscription, count);

        FeeBreakdown {
            registration,
            subscription,
            total: registration.subtotal + subscription.subtotal,
        }
    }

    /// `previous_max` is the member count on record from the last renewal;
    /// only members beyond it pay a fresh registration fee alongside the
    /// renewal subscription.
    pub fn renewal_quote(
        &self,
        membership_type: MembershipType,
        member_count: u32,
        previous_max: u32,
    ) -> RenewalFeeBreakdown {
        let rates = self.rates(membership_type);
        let (renewal_count, added_count) = match membership_type {
            MembershipType::Individual => (1, 0),
            MembershipType::Group => (
                member_count.max(1),
                member_count.saturating_sub(previous_max),
            ),
        };

        let renewal = FeeDetail::assess(rates.subscription, renewal_count);
        let new_registration = FeeDetail::assess(rates.registration, added_count);

        RenewalFeeBreakdown {
            renewal,
            new_registration,
            total: renewal.subtotal + new_registration.subtotal,
        }
    }
}
