use std::env;
use std::ops::Deref;

use once_cell::sync::Lazy;
use route_codec::{ConfigError, OneOf, Router};
use tracing::info;

use crate::routes::{SiteRoute, site_routes};

/// Environment variable read by [`SiteRouter::from_env`].
pub const BASE_URL_ENV: &str = "SITE_BASE_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

static ROUTES: Lazy<OneOf<SiteRoute>> = Lazy::new(site_routes);

/// The route tree of the site, built on first use and shared by every router.
pub fn route_tree() -> &'static OneOf<SiteRoute> {
    &ROUTES
}

/// The router of the site.
///
/// Dereferences to a [`Router`], which provides `parse`, `print`, `path_for`,
/// `url_for` and the other entry points:
///
/// ```
/// use site_routes::{EpisodeId, EpisodeRoute, SiteRoute, SiteRouter};
///
/// let router = SiteRouter::new("https://www.example.com").unwrap();
/// let route = SiteRoute::Episode(EpisodeId(42), EpisodeRoute::Show);
///
/// assert_eq!(router.url_for(&route), "https://www.example.com/episodes/42");
/// ```
#[derive(Debug)]
pub struct SiteRouter {
    inner: Router<&'static OneOf<SiteRoute>>,
}

impl SiteRouter {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let inner = Router::builder(route_tree()).base_url(base_url.to_string()).build()?;
        Ok(Self { inner })
    }

    /// Creates a router whose base url comes from `SITE_BASE_URL`, or
    /// `http://localhost:8080` when the variable is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(BASE_URL_ENV) {
            Ok(base_url) => {
                info!(%base_url, "using base url from {BASE_URL_ENV}");
                Self::new(&base_url)
            }
            Err(_) => Self::new(DEFAULT_BASE_URL),
        }
    }
}

impl Deref for SiteRouter {
    type Target = Router<&'static OneOf<SiteRoute>>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
