//! Partial bidirectional conversions.
//!
//! A [`Conversion`] pairs a parsing direction (`apply`) with a printing direction
//! (`unapply`). Both are partial: `apply` rejects malformed input, `unapply`
//! rejects values that belong to another case.
//!
//! Every conversion must obey the round-trip law: whenever `apply(a)` yields `b`,
//! `unapply(&b)` yields a value equal to `a`. The type system can't check this,
//! the round-trip property tests do.
//!
//! # Enum cases
//!
//! The [`case!`](crate::case) macro declares the conversion between a flat tuple
//! and one variant of a route enum:
//!
//! ```
//! use route_codec::case;
//! use route_codec::conversion::Conversion;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Route {
//!     Home,
//!     Episode(u64),
//!     Search { query: String, page: u32 },
//! }
//!
//! let home = case!(Route::Home);
//! assert_eq!(home.apply(()), Some(Route::Home));
//!
//! let episode = case!(Route::Episode(id));
//! assert_eq!(episode.apply((42,)), Some(Route::Episode(42)));
//! assert_eq!(episode.unapply(&Route::Home), None);
//!
//! let search = case!(Route::Search { query, page });
//! let route = Route::Search { query: "swift".into(), page: 2 };
//! assert_eq!(search.unapply(&route), Some(("swift".to_string(), 2)));
//! ```

use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::str::FromStr;

/// A partial, bidirectional mapping between `Input` and `Output`.
pub trait Conversion {
    type Input;
    type Output;

    /// Parsing direction.
    fn apply(&self, input: Self::Input) -> Option<Self::Output>;

    /// Printing direction.
    fn unapply(&self, output: &Self::Output) -> Option<Self::Input>;

    /// Chains another conversion after this one.
    fn then<C>(self, next: C) -> Chain<Self, C>
    where
        Self: Sized,
        C: Conversion<Input = Self::Output>,
    {
        Chain { first: self, second: next }
    }
}

/// Conversion for one enum case: `apply` wraps, `unapply` matches the tag and unwraps.
///
/// Usually built through [`case!`](crate::case).
pub struct Case<I, O, F, G> {
    wrap: F,
    unwrap: G,
    _phantom: PhantomData<fn(I) -> O>,
}

impl<I, O, F, G> fmt::Debug for Case<I, O, F, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case").finish_non_exhaustive()
    }
}

pub fn case_of<I, O, F, G>(wrap: F, unwrap: G) -> Case<I, O, F, G>
where
    F: Fn(I) -> O,
    G: Fn(&O) -> Option<I>,
{
    Case { wrap, unwrap, _phantom: PhantomData }
}

impl<I, O, F, G> Conversion for Case<I, O, F, G>
where
    F: Fn(I) -> O,
    G: Fn(&O) -> Option<I>,
{
    type Input = I;
    type Output = O;

    #[inline]
    fn apply(&self, input: I) -> Option<O> {
        Some((self.wrap)(input))
    }

    #[inline]
    fn unapply(&self, output: &O) -> Option<I> {
        (self.unwrap)(output)
    }
}

/// A conversion from a pair of hand written functions, both partial.
pub struct PartialIso<I, O, F, G> {
    apply: F,
    unapply: G,
    _phantom: PhantomData<fn(I) -> O>,
}

impl<I, O, F, G> fmt::Debug for PartialIso<I, O, F, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialIso").finish_non_exhaustive()
    }
}

pub fn partial_iso<I, O, F, G>(apply: F, unapply: G) -> PartialIso<I, O, F, G>
where
    F: Fn(I) -> Option<O>,
    G: Fn(&O) -> Option<I>,
{
    PartialIso { apply, unapply, _phantom: PhantomData }
}

impl<I, O, F, G> Conversion for PartialIso<I, O, F, G>
where
    F: Fn(I) -> Option<O>,
    G: Fn(&O) -> Option<I>,
{
    type Input = I;
    type Output = O;

    fn apply(&self, input: I) -> Option<O> {
        (self.apply)(input)
    }

    fn unapply(&self, output: &O) -> Option<I> {
        (self.unapply)(output)
    }
}

/// `String ⇄ T` through [`FromStr`] and [`Display`].
///
/// Covers ids, numbers and anything with a canonical text form, such as
/// `chrono::NaiveDate`. Only the canonical form is accepted: text that parses but
/// displays differently (`042`, `+42`) is rejected, so `unapply` always gives back
/// the text `apply` was given.
#[derive(Debug)]
pub struct FromStrConversion<T> {
    _phantom: PhantomData<fn() -> T>,
}

pub fn from_str<T>() -> FromStrConversion<T>
where
    T: FromStr + Display,
{
    FromStrConversion { _phantom: PhantomData }
}

impl<T> Conversion for FromStrConversion<T>
where
    T: FromStr + Display,
{
    type Input = String;
    type Output = T;

    #[inline]
    fn apply(&self, input: String) -> Option<T> {
        let value = input.parse::<T>().ok()?;
        (value.to_string() == input).then_some(value)
    }

    #[inline]
    fn unapply(&self, output: &T) -> Option<String> {
        Some(output.to_string())
    }
}

/// `String ⇄ T` through a fixed table, for enums with a fixed text representation.
#[derive(Debug)]
pub struct Enumeration<T: 'static> {
    table: &'static [(&'static str, T)],
}

/// Builds an [`Enumeration`] conversion.
///
/// The first entry wins on both sides, so the table should not repeat a name or
/// a value.
pub fn enumeration<T>(table: &'static [(&'static str, T)]) -> Enumeration<T>
where
    T: PartialEq + Clone,
{
    Enumeration { table }
}

impl<T> Conversion for Enumeration<T>
where
    T: PartialEq + Clone,
{
    type Input = String;
    type Output = T;

    fn apply(&self, input: String) -> Option<T> {
        self.table.iter().find(|(name, _)| *name == input).map(|(_, value)| value.clone())
    }

    fn unapply(&self, output: &T) -> Option<String> {
        self.table.iter().find(|(_, value)| value == output).map(|(name, _)| (*name).to_string())
    }
}

/// Two conversions run one after the other.
#[derive(Debug)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Conversion for Chain<A, B>
where
    A: Conversion,
    B: Conversion<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    fn apply(&self, input: A::Input) -> Option<B::Output> {
        self.second.apply(self.first.apply(input)?)
    }

    fn unapply(&self, output: &B::Output) -> Option<A::Input> {
        self.first.unapply(&self.second.unapply(output)?)
    }
}

macro_rules! impl_conversion_for_tuple {
    ($($param:ident $index:tt)+) => {
        /// Zips conversions positionally; a failure at any position fails the whole tuple.
        impl<$($param,)+> Conversion for ($($param,)+)
        where
            $($param: Conversion,)+
        {
            type Input = ($($param::Input,)+);
            type Output = ($($param::Output,)+);

            fn apply(&self, input: Self::Input) -> Option<Self::Output> {
                Some(($(self.$index.apply(input.$index)?,)+))
            }

            fn unapply(&self, output: &Self::Output) -> Option<Self::Input> {
                Some(($(self.$index.unapply(&output.$index)?,)+))
            }
        }
    };
}

impl_conversion_for_tuple! { A 0 }
impl_conversion_for_tuple! { A 0 B 1 }
impl_conversion_for_tuple! { A 0 B 1 C 2 }
impl_conversion_for_tuple! { A 0 B 1 C 2 D 3 }
impl_conversion_for_tuple! { A 0 B 1 C 2 D 3 E 4 }
impl_conversion_for_tuple! { A 0 B 1 C 2 D 3 E 4 F 5 }

/// Declares the [`Conversion`] between a flat tuple and one enum variant.
///
/// - `case!(Enum::Variant)` converts `()`;
/// - `case!(Enum::Variant(a, b))` converts `(A, B)` for a tuple variant;
/// - `case!(Enum::Variant { a, b })` converts `(A, B)` for a struct variant, in
///   the order the fields are listed.
///
/// `unapply` is a plain pattern match on the variant, the payload is cloned out.
#[macro_export]
macro_rules! case {
    ($enum:ident :: $variant:ident) => {
        $crate::conversion::case_of(
            |()| $enum::$variant,
            |value: &$enum| match value {
                $enum::$variant => ::std::option::Option::Some(()),
                #[allow(unreachable_patterns, reason = "enums with a single variant")]
                _ => ::std::option::Option::None,
            },
        )
    };
    ($enum:ident :: $variant:ident ( $($field:ident),+ $(,)? )) => {
        $crate::conversion::case_of(
            |($($field,)+)| $enum::$variant($($field),+),
            |value: &$enum| match value {
                $enum::$variant($($field),+) => {
                    ::std::option::Option::Some(($(::std::clone::Clone::clone($field),)+))
                }
                #[allow(unreachable_patterns, reason = "enums with a single variant")]
                _ => ::std::option::Option::None,
            },
        )
    };
    ($enum:ident :: $variant:ident { $($field:ident),+ $(,)? }) => {
        $crate::conversion::case_of(
            |($($field,)+)| $enum::$variant { $($field),+ },
            |value: &$enum| match value {
                $enum::$variant { $($field),+ } => {
                    ::std::option::Option::Some(($(::std::clone::Clone::clone($field),)+))
                }
                #[allow(unreachable_patterns, reason = "enums with a single variant")]
                _ => ::std::option::Option::None,
            },
        )
    };
}
