//! The top level router: parse and print entry points plus link generation.

use std::borrow::Cow;
use std::fmt::{self, Debug};
use std::sync::Arc;

use arc_swap::ArcSwap;
use bytes::Bytes;
use http::Request;
use tracing::{debug, error};
use url::Url;

use crate::error::{ConfigError, RoundTripError};
use crate::matcher::Matcher;
use crate::utils::ensure;
use crate::{MatchError, PrintError, RequestData};

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Immutable router configuration.
///
/// To change it at runtime, build a new one and hand it to
/// [`Router::replace_config`]; a configuration is never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    base_url: Url,
}

impl RouterConfig {
    /// Validates `base_url`: it must be an absolute `http` or `https` url with a host.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url)?;
        ensure!(
            matches!(base_url.scheme(), "http" | "https"),
            ConfigError::UnsupportedScheme { scheme: base_url.scheme().to_string() }
        );
        ensure!(base_url.has_host(), ConfigError::MissingHost { url: base_url.to_string() });

        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Scheme, host and port, plus the base path without its trailing slash.
    fn url_prefix(&self) -> String {
        let origin = self.base_url.origin().ascii_serialization();
        let base_path = self.base_url.path().trim_end_matches('/');
        format!("{origin}{base_path}")
    }
}

/// The root of a router tree with its configuration.
///
/// The tree is immutable once built and every call works on its own
/// [`RequestData`], so one `Router` can serve any number of threads.
pub struct Router<M> {
    root: M,
    config: ArcSwap<RouterConfig>,
}

impl<M: Matcher> Router<M> {
    /// Creates a router builder around the root matcher.
    pub fn builder(root: M) -> RouterBuilder<M> {
        RouterBuilder { root, base_url: Cow::Borrowed(DEFAULT_BASE_URL) }
    }

    /// Parses a request into a route.
    ///
    /// Returns `None` when no route matches, or when a route matched but left path
    /// segments or a non empty body unconsumed. Boundary layers usually answer
    /// `None` with a 404.
    pub fn parse(&self, request: impl Into<RequestData>) -> Option<M::Output> {
        let data = request.into();
        let method = data.method();
        let path = data.path_string();

        match self.match_request(data) {
            Ok(route) => Some(route),
            Err(e) => {
                debug!(%method, %path, cause = %e, "no route matched");
                None
            }
        }
    }

    /// Same as [`parse`](Router::parse), reporting why the request did not match.
    pub fn match_request(&self, mut data: RequestData) -> Result<M::Output, MatchError> {
        if let Some(reason) = data.malformed() {
            return Err(MatchError::MalformedRequest { reason: reason.to_string() });
        }

        let route = self.root.parse(&mut data)?;

        ensure!(data.is_path_consumed(), MatchError::UnconsumedPath { remaining: data.segments().count() });
        ensure!(data.is_body_consumed(), MatchError::UnconsumedBody);
        Ok(route)
    }

    /// Prints a route into request data.
    ///
    /// # Panics
    ///
    /// Panics if the route can't be printed. Every value of a route type must be
    /// printable, so this is a defect in the route declarations.
    pub fn print(&self, route: &M::Output) -> RequestData {
        match self.try_print(route) {
            Ok(data) => data,
            Err(e) => {
                error!(cause = %e, "route can't be printed");
                panic!("route can't be printed: {e}");
            }
        }
    }

    pub fn try_print(&self, route: &M::Output) -> Result<RequestData, PrintError> {
        let mut data = RequestData::new();
        self.root.print(route, &mut data)?;
        Ok(data)
    }

    /// The path and query of a route, e.g. `/episodes/42?ref=home`.
    pub fn path_for(&self, route: &M::Output) -> String {
        self.print(route).path_string()
    }

    /// The absolute url of a route, using the configured base url.
    pub fn url_for(&self, route: &M::Output) -> String {
        let prefix = self.config.load().url_prefix();
        format!("{prefix}{}", self.path_for(route))
    }

    /// An [`http::Request`] for a route, e.g. to drive a handler in tests.
    pub fn request_for(&self, route: &M::Output) -> Result<Request<Bytes>, http::Error> {
        self.print(route).into_request()
    }

    /// The current configuration.
    pub fn config(&self) -> Arc<RouterConfig> {
        self.config.load_full()
    }

    /// Atomically replaces the whole configuration. Calls already running keep the
    /// configuration they loaded.
    pub fn replace_config(&self, config: RouterConfig) {
        self.config.store(Arc::new(config));
    }

    /// Prints a route, serializes it, parses it back and compares.
    pub fn check_round_trip(&self, route: &M::Output) -> Result<(), RoundTripError>
    where
        M::Output: PartialEq + Debug,
    {
        let printed = self.try_print(route)?;
        let method = printed.method();
        let path = printed.path_string();

        let mut reparsed = RequestData::from_uri(method.clone(), &path).map_err(|e| RoundTripError::Parse {
            method: method.clone(),
            path: path.clone(),
            source: MatchError::conversion(e),
        })?;
        if let Some(content_type) = printed.content_type() {
            reparsed.set_content_type(content_type.clone());
        }
        if let Some(body) = printed.body() {
            reparsed.set_body(body.clone());
        }

        match self.match_request(reparsed) {
            Ok(parsed) if parsed == *route => Ok(()),
            Ok(parsed) => Err(RoundTripError::Mismatch {
                method,
                path,
                expected: format!("{route:?}"),
                reparsed: format!("{parsed:?}"),
            }),
            Err(source) => Err(RoundTripError::Parse { method, path, source }),
        }
    }
}

impl<M> Debug for Router<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router").field("config", &self.config.load_full()).finish_non_exhaustive()
    }
}

/// Builder for [`Router`].
#[derive(Debug)]
pub struct RouterBuilder<M> {
    root: M,
    base_url: Cow<'static, str>,
}

impl<M: Matcher> RouterBuilder<M> {
    /// Sets the base url used by [`Router::url_for`], `http://localhost:8080` by default.
    pub fn base_url(mut self, base_url: impl Into<Cow<'static, str>>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn build(self) -> Result<Router<M>, ConfigError> {
        let config = RouterConfig::new(&self.base_url)?;
        Ok(Router { root: self.root, config: ArcSwap::from_pointee(config) })
    }
}
