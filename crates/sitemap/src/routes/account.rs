use route_codec::matcher::{MatcherExt, form, get, path, post, query_as, query_or, segment};
use route_codec::{OneOf, case, one_of, sequence};
use serde::{Deserialize, Serialize};

use crate::ids::{InvoiceId, UserId};
use crate::subscription::Billing;

/// Routes below `/account`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountRoute {
    /// `GET /account`
    Index,
    /// `POST /account` with a [`ProfileData`] form.
    Update(ProfileData),
    /// `POST /account/subscription/cancel`
    Cancel,
    /// `POST /account/subscription/reactivate`
    Reactivate,
    /// `POST /account/subscription/change?billing=..`
    ChangeBilling(Billing),
    Invoices(InvoicesRoute),
    PaymentInfo(PaymentInfoRoute),
    /// `GET /account/rss/{user_id}/{salt}`, the private podcast feed of a subscriber.
    Rss { user_id: UserId, salt: String },
}

/// Routes below `/account/invoices`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoicesRoute {
    Index,
    /// `GET /account/invoices/upcoming`
    Upcoming,
    /// `GET /account/invoices/{id}`; ids start with `in_` and never collide with `upcoming`.
    Show(InvoiceId),
}

/// Routes below `/account/payment-info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentInfoRoute {
    /// `GET /account/payment-info`, `expand` defaults to `false`.
    Show { expand: bool },
    /// `POST /account/payment-info` with a card token form.
    Update(PaymentInfoData),
}

/// Body of `POST /account`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileData {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Newsletters the user subscribes to, `email_settings[0]=new_episodes`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email_settings: Vec<String>,
}

/// Body of `POST /account/payment-info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfoData {
    pub token: String,
}

pub(crate) fn account_routes() -> OneOf<AccountRoute> {
    one_of()
        .or(sequence().skip(get()).map(case!(AccountRoute::Index)))
        .or(sequence().skip(post()).take(form::<ProfileData>()).map(case!(AccountRoute::Update(data))))
        .or(sequence()
            .skip(post())
            .skip(path("subscription"))
            .skip(path("cancel"))
            .map(case!(AccountRoute::Cancel)))
        .or(sequence()
            .skip(post())
            .skip(path("subscription"))
            .skip(path("reactivate"))
            .map(case!(AccountRoute::Reactivate)))
        .or(sequence()
            .skip(post())
            .skip(path("subscription"))
            .skip(path("change"))
            .take(query_as("billing", Billing::conversion()))
            .map(case!(AccountRoute::ChangeBilling(billing))))
        .or(sequence().skip(path("invoices")).take(invoices_routes()).map(case!(AccountRoute::Invoices(route))))
        .or(sequence()
            .skip(path("payment-info"))
            .take(payment_info_routes())
            .map(case!(AccountRoute::PaymentInfo(route))))
        .or(sequence()
            .skip(get())
            .skip(path("rss"))
            .take(segment::<UserId>())
            .take(segment::<String>())
            .map(case!(AccountRoute::Rss { user_id, salt })))
}

fn invoices_routes() -> OneOf<InvoicesRoute> {
    one_of()
        .or(sequence().skip(get()).map(case!(InvoicesRoute::Index)))
        .or(sequence().skip(get()).skip(path("upcoming")).map(case!(InvoicesRoute::Upcoming)))
        .or(sequence().skip(get()).take(segment::<InvoiceId>()).map(case!(InvoicesRoute::Show(id))))
}

fn payment_info_routes() -> OneOf<PaymentInfoRoute> {
    one_of()
        .or(sequence().skip(get()).take(query_or("expand", false)).map(case!(PaymentInfoRoute::Show { expand })))
        .or(sequence()
            .skip(post())
            .take(form::<PaymentInfoData>())
            .map(case!(PaymentInfoRoute::Update(data))))
}
