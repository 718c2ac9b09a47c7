//! The typed sitemap of the site.
//!
//! [`SiteRoute`] enumerates every page and action. The same declarations parse
//! incoming requests and print links, so a link can't point to a page that does
//! not exist:
//!
//! ```
//! use http::Method;
//! use route_codec::RequestData;
//! use site_routes::{BlogPostId, BlogRoute, SiteRoute, SiteRouter};
//!
//! let router = SiteRouter::new("https://www.example.com").unwrap();
//!
//! let request = RequestData::from_uri(Method::GET, "/blog/posts/12-announcing-the-new-site").unwrap();
//! let route = router.parse(request).unwrap();
//! let post = BlogPostId::new(12).with_slug("announcing-the-new-site");
//! assert_eq!(route, SiteRoute::Blog(BlogRoute::Show(post)));
//!
//! assert_eq!(router.path_for(&route), "/blog/posts/12-announcing-the-new-site");
//! ```

mod ids;
mod router;
mod routes;
mod subscription;

pub use ids::{BlogPostId, EpisodeId, GiftId, IdError, InvoiceId, TeamInviteId, UserId};
pub use router::{BASE_URL_ENV, SiteRouter, route_tree};
pub use routes::{
    AccountRoute, BlogRoute, EpisodeRoute, GiftFormData, GiftPlan, GiftRoute, InvoicesRoute, MailgunEvent,
    PaymentInfoData, PaymentInfoRoute, ProfileData, SiteRoute, StripeEvent, StripeEventData, StripeObject, TeamRoute,
    WebhookRoute,
};
pub use subscription::{Billing, Lane, Pricing, SubscribeData};
