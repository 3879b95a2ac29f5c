use serde::{Deserialize, Serialize};

use crate::models::booking::BookingDraft;
use crate::models::catalog;

pub const BEDROOM_SURCHARGE: u32 = 20;
pub const BATHROOM_SURCHARGE: u32 = 15;

/// Whether the frequency discount shown to the customer is taken off the
/// charged price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingPolicy {
    /// The discount is displayed as a badge only; the charged total is the
    /// estimated total.
    #[default]
    Observed,
    ApplyFrequencyDiscount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub base_price: u32,
    pub room_surcharge: u32,
    pub add_on_total: u32,
    pub discount_percent: i32,
    pub estimated_total: u32,
    pub charged_total: u32,
    pub policy: PricingPolicy,
}

pub struct PricingService;

impl PricingService {
    /// Base price of the selected service tier, zero if it does not resolve.
    pub fn base_price(draft: &BookingDraft) -> u32 {
        catalog::find_service_tier(&draft.service_tier)
            .map(|tier| tier.base_price)
            .unwrap_or(0)
    }

    pub fn room_surcharge(draft: &BookingDraft) -> u32 {
        u32::from(draft.bedrooms) * BEDROOM_SURCHARGE
            + u32::from(draft.bathrooms) * BATHROOM_SURCHARGE
    }

    /// Sum of selected add-on prices; unknown ids contribute nothing.
    pub fn add_on_total(draft: &BookingDraft) -> u32 {
        draft
            .add_ons
            .iter()
            .filter_map(|id| catalog::find_add_on(id))
            .map(|add_on| add_on.price)
            .sum()
    }

    pub fn compute_total(draft: &BookingDraft) -> u32 {
        Self::base_price(draft) + Self::room_surcharge(draft) + Self::add_on_total(draft)
    }

    /// Total with the frequency adjustment applied, rounded half up to the
    /// nearest dollar.
    pub fn discounted_total(draft: &BookingDraft) -> u32 {
        let total = i64::from(Self::compute_total(draft));
        let factor = 100 + i64::from(draft.frequency.adjustment_percent());
        let discounted = (total * factor + 50) / 100;
        u32::try_from(discounted.max(0)).unwrap_or(0)
    }

    pub fn charged_total(draft: &BookingDraft, policy: PricingPolicy) -> u32 {
        match policy {
            PricingPolicy::Observed => Self::compute_total(draft),
            PricingPolicy::ApplyFrequencyDiscount => Self::discounted_total(draft),
        }
    }

    pub fn quote(draft: &BookingDraft, policy: PricingPolicy) -> PriceQuote {
        PriceQuote {
            base_price: Self::base_price(draft),
            room_surcharge: Self::room_surcharge(draft),
            add_on_total: Self::add_on_total(draft),
            discount_percent: draft.frequency.adjustment_percent(),
            estimated_total: Self::compute_total(draft),
            charged_total: Self::charged_total(draft, policy),
            policy,
        }
    }
}
