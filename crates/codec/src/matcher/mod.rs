//! Parser-printers over a [`RequestData`] cursor.
//!
//! This module provides the [`Matcher`] trait and the primitive matchers that
//! consume or produce exactly one feature of a request:
//! - path segments, literal or typed ([`path`], [`segment`], [`segment_as`])
//! - query fields ([`query`], [`optional_query`], [`query_or`], [`query_all`])
//! - the method ([`method`] and shorthands such as [`get`], [`post`])
//! - the whole body ([`form`], [`json`], [`raw_body`])
//!
//! ## Thread Safety
//!
//! A router tree is built once and shared by every request. Matchers never
//! mutate themselves while parsing or printing, all state lives in the
//! `RequestData` passed to them, so any matcher made of `Send + Sync` parts can be
//! shared across threads without locking.
//!
//! # Examples
//!
//! ```
//! use http::Method;
//! use route_codec::RequestData;
//! use route_codec::matcher::{Matcher, path, segment};
//!
//! let mut data = RequestData::from_uri(Method::GET, "/episodes/42").unwrap();
//!
//! path("episodes").parse(&mut data).unwrap();
//! let id = segment::<u64>().parse(&mut data).unwrap();
//!
//! assert_eq!(id, 42);
//! assert!(data.is_path_consumed());
//! ```

mod body;
mod method;
mod path;
mod query;

pub use body::{Form, Json, RawBody, form, json, raw_body};
pub use method::{MethodMatcher, delete, get, head, method, patch, post, put};
pub use path::{Literal, Segment, path, segment, segment_as};
pub use query::{DefaultQuery, OptionalQuery, Query, QueryAll, optional_query, optional_query_as, query, query_all, query_as, query_or};

use std::sync::Arc;

use crate::conversion::Conversion;
use crate::{MatchError, PrintError, RequestData};

/// A parser and printer for one piece of a request.
///
/// `parse` consumes what it recognises from the cursor and returns the typed value.
/// A matcher that fails must leave the cursor untouched for the part it was
/// responsible for.
///
/// `print` is the inverse: it appends the request features describing `value` to
/// `data`. Parsing the printed request must give back a value equal to `value`.
pub trait Matcher {
    type Output;

    fn parse(&self, data: &mut RequestData) -> Result<Self::Output, MatchError>;

    fn print(&self, value: &Self::Output, data: &mut RequestData) -> Result<(), PrintError>;
}

/// Matchers shared by reference, in a [`Box`] or in an [`Arc`] behave as the matcher itself.
impl<M: Matcher + ?Sized> Matcher for &M {
    type Output = M::Output;

    #[inline]
    fn parse(&self, data: &mut RequestData) -> Result<Self::Output, MatchError> {
        (**self).parse(data)
    }

    #[inline]
    fn print(&self, value: &Self::Output, data: &mut RequestData) -> Result<(), PrintError> {
        (**self).print(value, data)
    }
}

impl<M: Matcher + ?Sized> Matcher for Box<M> {
    type Output = M::Output;

    #[inline]
    fn parse(&self, data: &mut RequestData) -> Result<Self::Output, MatchError> {
        (**self).parse(data)
    }

    #[inline]
    fn print(&self, value: &Self::Output, data: &mut RequestData) -> Result<(), PrintError> {
        (**self).print(value, data)
    }
}

impl<M: Matcher + ?Sized> Matcher for Arc<M> {
    type Output = M::Output;

    #[inline]
    fn parse(&self, data: &mut RequestData) -> Result<Self::Output, MatchError> {
        (**self).parse(data)
    }

    #[inline]
    fn print(&self, value: &Self::Output, data: &mut RequestData) -> Result<(), PrintError> {
        (**self).print(value, data)
    }
}

/// A type erased matcher, as stored by [`OneOf`](crate::OneOf).
pub type BoxedMatcher<O> = Box<dyn Matcher<Output = O> + Send + Sync>;

/// Combinators available on every [`Matcher`].
pub trait MatcherExt: Matcher + Sized {
    /// Converts the output with `conversion`, e.g. to wrap it into a route case.
    fn map<C>(self, conversion: C) -> Mapped<Self, C>
    where
        C: Conversion<Input = Self::Output>,
    {
        Mapped { matcher: self, conversion }
    }

    fn boxed(self) -> BoxedMatcher<Self::Output>
    where
        Self: Send + Sync + 'static,
    {
        Box::new(self)
    }
}

impl<M: Matcher> MatcherExt for M {}

/// A matcher whose output goes through a [`Conversion`].
///
/// Printing first asks the conversion to `unapply` the value; a value the
/// conversion rejects is reported as [`PrintError::Unclaimed`] before anything is
/// written, which is how [`OneOf`](crate::OneOf) dispatches on the case of a value.
/// The claimed value is printed into an empty fragment, merged into `data` only
/// once every part printed.
#[derive(Debug)]
pub struct Mapped<M, C> {
    matcher: M,
    conversion: C,
}

impl<M, C> Matcher for Mapped<M, C>
where
    M: Matcher,
    C: Conversion<Input = M::Output>,
{
    type Output = C::Output;

    fn parse(&self, data: &mut RequestData) -> Result<Self::Output, MatchError> {
        let input = self.matcher.parse(data)?;
        self.conversion.apply(input).ok_or_else(|| MatchError::conversion("matched fields were rejected by the case"))
    }

    fn print(&self, value: &Self::Output, data: &mut RequestData) -> Result<(), PrintError> {
        let input = self.conversion.unapply(value).ok_or(PrintError::Unclaimed)?;

        let mut fragment = RequestData::new();
        self.matcher.print(&input, &mut fragment).map_err(|e| match e {
            PrintError::Unclaimed => PrintError::conversion("a claimed value has a part no router accepts"),
            e => e,
        })?;

        data.merge(fragment);
        Ok(())
    }
}
