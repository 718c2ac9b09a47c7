//! The sitemap: every page and action of the site as one enum tree.
//!
//! Each area owns a nested route enum and the [`OneOf`] declaring it. Leaf
//! sequences declare the method themselves, so an area can mix `GET` pages with
//! `POST` actions on the same path.
//!
//! Alternatives that can match the same request are kept apart by the conversion
//! of their parameters rather than by order alone, e.g. invoice ids always start
//! with `in_` so they never read as `upcoming`.

mod account;
mod blog;
mod episode;
mod gifts;
mod team;
mod webhooks;

pub use account::{AccountRoute, InvoicesRoute, PaymentInfoData, PaymentInfoRoute, ProfileData};
pub use blog::BlogRoute;
pub use episode::EpisodeRoute;
pub use gifts::{GiftFormData, GiftPlan, GiftRoute};
pub use team::TeamRoute;
pub use webhooks::{MailgunEvent, StripeEvent, StripeEventData, StripeObject, WebhookRoute};

use route_codec::matcher::{
    MatcherExt, form, get, optional_query, optional_query_as, path, post, query, query_all, query_or, segment,
    segment_as,
};
use route_codec::{OneOf, case, one_of, sequence};

use crate::ids::EpisodeId;
use crate::subscription::{Billing, Lane, SubscribeData};

/// Every addressable page and action of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteRoute {
    /// `GET /`
    Home,
    /// `GET /about`
    About,
    /// `GET /pricing`, optionally preselecting a billing interval and lane.
    Pricing { billing: Option<Billing>, lane: Option<Lane> },
    /// `GET /episodes`, `page` defaults to 1.
    Episodes { page: u32 },
    /// `/episodes/{id}` and below.
    Episode(EpisodeId, EpisodeRoute),
    /// `GET /search?q=..&tag=..`
    Search { query: String, tags: Vec<String> },
    /// `GET /feed/episodes.xml`, the public podcast feed.
    Feed,
    Blog(BlogRoute),
    Account(AccountRoute),
    Gifts(GiftRoute),
    Team(TeamRoute),
    /// `GET /subscribe/{lane}`, the subscribe page.
    SubscribeConfirmation { lane: Lane, billing: Option<Billing>, coupon: Option<String> },
    /// `POST /subscribe` with a [`SubscribeData`] form.
    Subscribe(SubscribeData),
    /// `GET /login`, returning to `redirect` once logged in.
    Login { redirect: Option<String> },
    /// `GET /logout`
    Logout,
    Webhooks(WebhookRoute),
}

pub(crate) fn site_routes() -> OneOf<SiteRoute> {
    one_of()
        .or(sequence().skip(get()).map(case!(SiteRoute::Home)))
        .or(sequence().skip(get()).skip(path("about")).map(case!(SiteRoute::About)))
        .or(sequence()
            .skip(get())
            .skip(path("pricing"))
            .take(optional_query_as("billing", Billing::conversion()))
            .take(optional_query_as("lane", Lane::conversion()))
            .map(case!(SiteRoute::Pricing { billing, lane })))
        .or(sequence()
            .skip(get())
            .skip(path("episodes"))
            .take(query_or("page", 1_u32))
            .map(case!(SiteRoute::Episodes { page })))
        .or(sequence()
            .skip(path("episodes"))
            .take(segment::<EpisodeId>())
            .take(episode::episode_routes())
            .map(case!(SiteRoute::Episode(id, route))))
        .or(sequence()
            .skip(get())
            .skip(path("search"))
            .take(query::<String>("q"))
            .take(query_all::<String>("tag"))
            .map(case!(SiteRoute::Search { query, tags })))
        .or(sequence().skip(get()).skip(path("feed")).skip(path("episodes.xml")).map(case!(SiteRoute::Feed)))
        .or(sequence().skip(path("blog")).take(blog::blog_routes()).map(case!(SiteRoute::Blog(route))))
        .or(sequence().skip(path("account")).take(account::account_routes()).map(case!(SiteRoute::Account(route))))
        .or(sequence().skip(path("gifts")).take(gifts::gift_routes()).map(case!(SiteRoute::Gifts(route))))
        .or(sequence().skip(path("team")).take(team::team_routes()).map(case!(SiteRoute::Team(route))))
        .or(sequence()
            .skip(get())
            .skip(path("subscribe"))
            .take(segment_as(Lane::conversion()))
            .take(optional_query_as("billing", Billing::conversion()))
            .take(optional_query::<String>("coupon"))
            .map(case!(SiteRoute::SubscribeConfirmation { lane, billing, coupon })))
        .or(sequence()
            .skip(post())
            .skip(path("subscribe"))
            .take(form::<SubscribeData>())
            .map(case!(SiteRoute::Subscribe(data))))
        .or(sequence()
            .skip(get())
            .skip(path("login"))
            .take(optional_query::<String>("redirect"))
            .map(case!(SiteRoute::Login { redirect })))
        .or(sequence().skip(get()).skip(path("logout")).map(case!(SiteRoute::Logout)))
        .or(sequence().skip(path("webhooks")).take(webhooks::webhook_routes()).map(case!(SiteRoute::Webhooks(route))))
}
