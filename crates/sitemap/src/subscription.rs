//! Subscription vocabulary shared by the pricing, subscribe and account pages.

use route_codec::conversion::{Enumeration, enumeration};
use serde::{Deserialize, Serialize};

/// How often a subscription is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Billing {
    Monthly,
    Yearly,
}

static BILLINGS: &[(&str, Billing)] = &[("monthly", Billing::Monthly), ("yearly", Billing::Yearly)];

impl Billing {
    pub const ALL: [Billing; 2] = [Billing::Monthly, Billing::Yearly];

    /// The path segment and query value naming this billing interval.
    pub(crate) fn conversion() -> Enumeration<Billing> {
        enumeration(BILLINGS)
    }
}

/// Whether a subscription is for one person or for a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    Personal,
    Team,
}

static LANES: &[(&str, Lane)] = &[("personal", Lane::Personal), ("team", Lane::Team)];

impl Lane {
    pub const ALL: [Lane; 2] = [Lane::Personal, Lane::Team];

    pub(crate) fn conversion() -> Enumeration<Lane> {
        enumeration(LANES)
    }
}

/// The plan part of the subscribe form: `pricing[billing]=yearly&pricing[quantity]=3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    pub billing: Billing,
    pub quantity: u32,
}

/// Body of `POST /subscribe`, a form using bracket syntax for nested and repeated
/// fields, e.g. `pricing[billing]=monthly&pricing[quantity]=2&teammates[0]=a@example.com`.
///
/// Missing `teammates` decode as an empty list and a missing
/// `use_regional_discount` as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeData {
    pub pricing: Pricing,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub teammates: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
    #[serde(default)]
    pub use_regional_discount: bool,
}
