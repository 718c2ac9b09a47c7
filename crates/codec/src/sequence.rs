//! Sequencing of matchers.
//!
//! A [`Sequence`] runs matchers in declared order against one cursor and collects
//! the outputs of the [`take`](Sequence::take)n ones into a flat positional tuple:
//!
//! ```
//! use http::Method;
//! use route_codec::case;
//! use route_codec::matcher::{Matcher, MatcherExt, get, path, query_or, segment};
//! use route_codec::{RequestData, sequence};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Route {
//!     Comments { episode: u64, page: u32 },
//! }
//!
//! let comments = sequence()
//!     .skip(get())
//!     .skip(path("episodes"))
//!     .take(segment::<u64>())
//!     .skip(path("comments"))
//!     .take(query_or("page", 1_u32))
//!     .map(case!(Route::Comments { episode, page }));
//!
//! let mut data = RequestData::from_uri(Method::GET, "/episodes/42/comments?page=2").unwrap();
//! assert_eq!(comments.parse(&mut data), Ok(Route::Comments { episode: 42, page: 2 }));
//!
//! let mut printed = RequestData::new();
//! comments.print(&Route::Comments { episode: 42, page: 1 }, &mut printed).unwrap();
//! assert_eq!(printed.path_string(), "/episodes/42/comments");
//! ```
//!
//! A sequence short-circuits on the first failing matcher. What earlier matchers
//! consumed is not given back by the sequence itself: the enclosing
//! [`OneOf`](crate::OneOf) restores its own snapshot.

use crate::matcher::Matcher;
use crate::utils::ensure;
use crate::{MatchError, PrintError, RequestData};

/// Appends one value to the end of a tuple, and splits it back off.
pub trait Append<T> {
    type Output;

    fn append(self, value: T) -> Self::Output;

    fn split(output: Self::Output) -> (Self, T)
    where
        Self: Sized;
}

macro_rules! impl_append_for_tuple {
    ($($param:ident)*) => {
        impl<$($param,)* Last> Append<Last> for ($($param,)*) {
            type Output = ($($param,)* Last,);

            #[inline]
            #[allow(non_snake_case, reason = "tuple fields are named after their type parameter")]
            fn append(self, value: Last) -> Self::Output {
                let ($($param,)*) = self;
                ($($param,)* value,)
            }

            #[inline]
            #[allow(non_snake_case, reason = "tuple fields are named after their type parameter")]
            fn split(output: Self::Output) -> (Self, Last) {
                let ($($param,)* value,) = output;
                (($($param,)*), value)
            }
        }
    };
}

impl_append_for_tuple! {}
impl_append_for_tuple! { A }
impl_append_for_tuple! { A B }
impl_append_for_tuple! { A B C }
impl_append_for_tuple! { A B C D }
impl_append_for_tuple! { A B C D E }
impl_append_for_tuple! { A B C D E F }
impl_append_for_tuple! { A B C D E F G }
impl_append_for_tuple! { A B C D E F G H }
impl_append_for_tuple! { A B C D E F G H I }
impl_append_for_tuple! { A B C D E F G H I J }
impl_append_for_tuple! { A B C D E F G H I J K }

/// Starts an empty sequence, whose output is `()`.
pub fn sequence() -> Sequence<Unit> {
    Sequence { inner: Unit, prefix: false }
}

/// Matches nothing, consumes nothing, outputs `()`.
#[derive(Debug)]
pub struct Unit;

impl Matcher for Unit {
    type Output = ();

    #[inline]
    fn parse(&self, _data: &mut RequestData) -> Result<(), MatchError> {
        Ok(())
    }

    #[inline]
    fn print(&self, _value: &(), _data: &mut RequestData) -> Result<(), PrintError> {
        Ok(())
    }
}

/// An ordered list of matchers threaded through one cursor.
///
/// Unless marked as a [`prefix`](Sequence::prefix), a sequence only matches when
/// no path segment is left once its last matcher ran, so `/episodes/42/extra`
/// does not match a sequence for `/episodes/42`.
#[derive(Debug)]
pub struct Sequence<P> {
    inner: P,
    prefix: bool,
}

impl<P: Matcher> Sequence<P> {
    /// Runs `matcher` next, discarding its `()` output.
    pub fn skip<Q>(self, matcher: Q) -> Sequence<Skip<P, Q>>
    where
        Q: Matcher<Output = ()>,
    {
        Sequence { inner: Skip { init: self.inner, last: matcher }, prefix: self.prefix }
    }

    /// Runs `matcher` next, appending its output to the tuple.
    pub fn take<Q>(self, matcher: Q) -> Sequence<Take<P, Q>>
    where
        Q: Matcher,
        P::Output: Append<Q::Output>,
    {
        Sequence { inner: Take { init: self.inner, last: matcher }, prefix: self.prefix }
    }

    /// Allows path segments to remain after the sequence, for sequences that only
    /// match the beginning of a path.
    pub fn prefix(mut self) -> Self {
        self.prefix = true;
        self
    }
}

impl<P: Matcher> Matcher for Sequence<P> {
    type Output = P::Output;

    fn parse(&self, data: &mut RequestData) -> Result<Self::Output, MatchError> {
        let output = self.inner.parse(data)?;
        if !self.prefix {
            ensure!(data.is_path_consumed(), MatchError::UnconsumedPath { remaining: data.segments().count() });
        }
        Ok(output)
    }

    fn print(&self, value: &Self::Output, data: &mut RequestData) -> Result<(), PrintError> {
        self.inner.print(value, data)
    }
}

/// `init` then `last`, keeping only the output of `init`.
#[derive(Debug)]
pub struct Skip<P, Q> {
    init: P,
    last: Q,
}

impl<P, Q> Matcher for Skip<P, Q>
where
    P: Matcher,
    Q: Matcher<Output = ()>,
{
    type Output = P::Output;

    #[inline]
    fn parse(&self, data: &mut RequestData) -> Result<Self::Output, MatchError> {
        let output = self.init.parse(data)?;
        self.last.parse(data)?;
        Ok(output)
    }

    #[inline]
    fn print(&self, value: &Self::Output, data: &mut RequestData) -> Result<(), PrintError> {
        self.init.print(value, data)?;
        self.last.print(&(), data)
    }
}

/// `init` then `last`, appending the output of `last` to the tuple of `init`.
#[derive(Debug)]
pub struct Take<P, Q> {
    init: P,
    last: Q,
}

impl<P, Q> Matcher for Take<P, Q>
where
    P: Matcher,
    Q: Matcher,
    P::Output: Append<Q::Output>,
    <P::Output as Append<Q::Output>>::Output: Clone,
{
    type Output = <P::Output as Append<Q::Output>>::Output;

    #[inline]
    fn parse(&self, data: &mut RequestData) -> Result<Self::Output, MatchError> {
        let init = self.init.parse(data)?;
        let last = self.last.parse(data)?;
        Ok(init.append(last))
    }

    fn print(&self, value: &Self::Output, data: &mut RequestData) -> Result<(), PrintError> {
        let (init, last) = <P::Output as Append<Q::Output>>::split(value.clone());
        self.init.print(&init, data)?;
        self.last.print(&last, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case;
    use crate::matcher::{MatcherExt, get, optional_query, path, post, segment};
    use http::Method;

    #[derive(Debug, Clone, PartialEq)]
    enum Route {
        Show(u64),
        Edit { id: u64, section: Option<String> },
    }

    fn data(method: Method, uri: &str) -> RequestData {
        RequestData::from_uri(method, uri).unwrap()
    }

    #[test]
    fn append_and_split() {
        let one = ().append(1);
        assert_eq!(one, (1,));

        let three = (1, "a").append(2.5);
        assert_eq!(three, (1, "a", 2.5));
        assert_eq!(<(i32, &str) as Append<f64>>::split(three), ((1, "a"), 2.5));
    }

    #[test]
    fn collect_taken_outputs_in_order() {
        let matcher = sequence().skip(path("a")).take(segment::<u32>()).skip(path("b")).take(segment::<String>());

        assert_eq!(matcher.parse(&mut data(Method::GET, "/a/1/b/x")), Ok((1, "x".to_string())));
    }

    #[test]
    fn short_circuit_keeps_earlier_consumption() {
        let matcher = sequence().skip(path("episodes")).take(segment::<u64>());
        let mut request = data(Method::GET, "/episodes/latest");

        assert!(matcher.parse(&mut request).is_err());
        // "episodes" was consumed by the first matcher, "latest" was rejected
        assert_eq!(request.segments().collect::<Vec<_>>(), vec!["latest"]);
    }

    #[test]
    fn reject_unconsumed_path() {
        let matcher = sequence().skip(path("episodes")).take(segment::<u64>());

        assert_eq!(
            matcher.parse(&mut data(Method::GET, "/episodes/42/extra")),
            Err(MatchError::UnconsumedPath { remaining: 1 })
        );
        assert_eq!(matcher.prefix().parse(&mut data(Method::GET, "/episodes/42/extra")), Ok((42,)));
    }

    #[test]
    fn map_into_case() {
        let show = sequence().skip(get()).skip(path("episodes")).take(segment::<u64>()).map(case!(Route::Show(id)));
        let edit = sequence()
            .skip(post())
            .skip(path("episodes"))
            .take(segment::<u64>())
            .skip(path("edit"))
            .take(optional_query::<String>("section"))
            .map(case!(Route::Edit { id, section }));

        assert_eq!(show.parse(&mut data(Method::GET, "/episodes/7")), Ok(Route::Show(7)));
        assert_eq!(
            edit.parse(&mut data(Method::POST, "/episodes/7/edit?section=notes")),
            Ok(Route::Edit { id: 7, section: Some("notes".into()) })
        );

        let mut printed = RequestData::new();
        edit.print(&Route::Edit { id: 7, section: None }, &mut printed).unwrap();
        assert_eq!(printed.method(), Method::POST);
        assert_eq!(printed.path_string(), "/episodes/7/edit");
    }

    #[test]
    fn print_unclaimed_writes_nothing() {
        let show = sequence().skip(path("episodes")).take(segment::<u64>()).map(case!(Route::Show(id)));

        let mut printed = RequestData::new();
        let result = show.print(&Route::Edit { id: 1, section: None }, &mut printed);

        assert_eq!(result, Err(PrintError::Unclaimed));
        assert_eq!(printed, RequestData::new());
    }
}
