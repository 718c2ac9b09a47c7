//! Bidirectional request routing.
//!
//! This crate turns HTTP requests into typed route values and route values back
//! into requests and urls, with one declaration serving both directions. It is
//! built from parser-printer combinators:
//!
//! - [`RequestData`]: the per-call cursor over a request's method, path, query and body
//! - [`matcher`]: primitive matchers for one path segment, query field, method or body
//! - [`conversion`]: partial bidirectional conversions, including enum cases via [`case!`]
//! - [`sequence`](mod@sequence): ordered matchers collected into a tuple
//! - [`one_of`](mod@one_of): ordered, first-match-wins alternation
//! - [`Router`]: the root of a tree, with parse / print / url entry points
//!
//! For every value `route` of a route type, parsing the printed request gives back
//! `route`. Declarations keep that promise by using conversions that obey the
//! round-trip law, and [`Router::check_round_trip`] verifies it in tests.
//!
//! # Example
//!
//! ```
//! use http::Method;
//! use route_codec::matcher::{MatcherExt, get, optional_query, path, segment};
//! use route_codec::{OneOf, RequestData, Router, case, one_of, sequence};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Route {
//!     Home,
//!     Episode { id: u64, reference: Option<String> },
//! }
//!
//! let root: OneOf<Route> = one_of()
//!     .or(sequence().skip(get()).map(case!(Route::Home)))
//!     .or(sequence()
//!         .skip(get())
//!         .skip(path("episodes"))
//!         .take(segment::<u64>())
//!         .take(optional_query::<String>("ref"))
//!         .map(case!(Route::Episode { id, reference })));
//!
//! let router = Router::builder(root).base_url("https://www.example.com").build().unwrap();
//!
//! let route = Route::Episode { id: 42, reference: None };
//! assert_eq!(router.path_for(&route), "/episodes/42");
//! assert_eq!(router.url_for(&route), "https://www.example.com/episodes/42");
//!
//! let request = RequestData::from_uri(Method::GET, "/episodes/42").unwrap();
//! assert_eq!(router.parse(request), Some(route));
//! ```

mod error;
mod request;
mod router;
mod utils;

pub mod conversion;
pub mod matcher;
pub mod one_of;
pub mod sequence;

pub use error::{ConfigError, MatchError, PrintError, RequestDataError, RoundTripError};
pub use matcher::{Matcher, MatcherExt};
pub use one_of::{OneOf, one_of};
pub use request::RequestData;
pub use router::{Router, RouterBuilder, RouterConfig};
pub use sequence::{Sequence, sequence};
