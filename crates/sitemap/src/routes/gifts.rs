use chrono::NaiveDate;
use route_codec::conversion::enumeration;
use route_codec::matcher::{MatcherExt, form, get, json, post, segment, segment_as};
use route_codec::{OneOf, case, one_of, sequence};
use serde::{Deserialize, Serialize};

use crate::ids::GiftId;

/// Routes below `/gifts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GiftRoute {
    /// `GET /gifts`
    Index,
    /// `GET /gifts/{plan}`, e.g. `/gifts/threeMonths`.
    Plan(GiftPlan),
    /// `POST /gifts`, accepted as JSON or as a form. Printed as JSON.
    Create(GiftFormData),
    /// `GET /gifts/{id}`, the landing page of a received gift.
    Show(GiftId),
    /// `POST /gifts/{id}`
    Redeem(GiftId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GiftPlan {
    ThreeMonths,
    SixMonths,
    Year,
}

static GIFT_PLANS: &[(&str, GiftPlan)] =
    &[("threeMonths", GiftPlan::ThreeMonths), ("sixMonths", GiftPlan::SixMonths), ("year", GiftPlan::Year)];

impl GiftPlan {
    pub const ALL: [GiftPlan; 3] = [GiftPlan::ThreeMonths, GiftPlan::SixMonths, GiftPlan::Year];

    pub fn months(self) -> u32 {
        match self {
            GiftPlan::ThreeMonths => 3,
            GiftPlan::SixMonths => 6,
            GiftPlan::Year => 12,
        }
    }
}

/// Body of `POST /gifts`.
///
/// Without `deliver_at` the gift is delivered right away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftFormData {
    pub from_email: String,
    pub from_name: String,
    pub to_email: String,
    pub to_name: String,
    #[serde(default)]
    pub message: String,
    pub plan: GiftPlan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliver_at: Option<NaiveDate>,
}

pub(crate) fn gift_routes() -> OneOf<GiftRoute> {
    one_of()
        .or(sequence().skip(get()).map(case!(GiftRoute::Index)))
        // plan names are tried before numeric ids, both are single segments
        .or(sequence().skip(get()).take(segment_as(enumeration(GIFT_PLANS))).map(case!(GiftRoute::Plan(plan))))
        .or(sequence().skip(post()).take(json::<GiftFormData>()).map(case!(GiftRoute::Create(data))))
        .or(sequence().skip(post()).take(form::<GiftFormData>()).map(case!(GiftRoute::Create(data))))
        .or(sequence().skip(get()).take(segment::<GiftId>()).map(case!(GiftRoute::Show(id))))
        .or(sequence().skip(post()).take(segment::<GiftId>()).map(case!(GiftRoute::Redeem(id))))
}
