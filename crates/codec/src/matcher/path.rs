use std::borrow::Cow;
use std::fmt::Display;
use std::str::FromStr;

use tracing::trace;

use crate::conversion::{Conversion, FromStrConversion, from_str};
use crate::matcher::Matcher;
use crate::utils::ensure;
use crate::{MatchError, PrintError, RequestData};

/// Matches one literal path segment, case sensitively.
#[derive(Debug)]
pub struct Literal(Cow<'static, str>);

/// Creates a matcher for the literal segment `literal`.
#[inline]
pub fn path(literal: impl Into<Cow<'static, str>>) -> Literal {
    Literal(literal.into())
}

impl Matcher for Literal {
    type Output = ();

    fn parse(&self, data: &mut RequestData) -> Result<(), MatchError> {
        let segment = data.peek_segment().ok_or(MatchError::PathExhausted)?;
        ensure!(segment == self.0, MatchError::literal_mismatch(&self.0, segment));

        data.pop_segment();
        Ok(())
    }

    fn print(&self, _value: &(), data: &mut RequestData) -> Result<(), PrintError> {
        data.push_segment(self.0.as_ref());
        Ok(())
    }
}

/// Matches one path segment and converts it into a typed value.
#[derive(Debug)]
pub struct Segment<C> {
    conversion: C,
}

/// Creates a matcher for one segment parsed with [`FromStr`] and printed with [`Display`].
#[inline]
pub fn segment<T>() -> Segment<FromStrConversion<T>>
where
    T: FromStr + Display,
{
    Segment { conversion: from_str() }
}

/// Creates a matcher for one segment converted with `conversion`.
#[inline]
pub fn segment_as<C>(conversion: C) -> Segment<C>
where
    C: Conversion<Input = String>,
{
    Segment { conversion }
}

impl<C> Matcher for Segment<C>
where
    C: Conversion<Input = String>,
{
    type Output = C::Output;

    fn parse(&self, data: &mut RequestData) -> Result<Self::Output, MatchError> {
        let segment = data.peek_segment().ok_or(MatchError::PathExhausted)?;

        let value = self.conversion.apply(segment.to_string()).ok_or_else(|| {
            trace!(segment, "path segment rejected by conversion");
            MatchError::conversion(format!("can't convert path segment '{segment}'"))
        })?;

        data.pop_segment();
        Ok(value)
    }

    fn print(&self, value: &Self::Output, data: &mut RequestData) -> Result<(), PrintError> {
        let segment = self.conversion.unapply(value).ok_or_else(|| PrintError::conversion("path segment"))?;
        // an empty segment would vanish from the printed path
        ensure!(!segment.is_empty(), PrintError::conversion("path segment printed as an empty string"));

        data.push_segment(segment);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::enumeration;
    use http::Method;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Plan {
        ThreeMonths,
        Year,
    }

    static PLANS: &[(&str, Plan)] = &[("threeMonths", Plan::ThreeMonths), ("year", Plan::Year)];

    fn data(uri: &str) -> RequestData {
        RequestData::from_uri(Method::GET, uri).unwrap()
    }

    #[test]
    fn literal_is_case_sensitive() {
        let mut request = data("/Episodes");

        let result = path("episodes").parse(&mut request);

        assert_eq!(result, Err(MatchError::literal_mismatch("episodes", "Episodes")));
        assert_eq!(request.peek_segment(), Some("Episodes"));
    }

    #[test]
    fn literal_on_exhausted_path() {
        let mut request = data("/");
        assert_eq!(path("episodes").parse(&mut request), Err(MatchError::PathExhausted));
    }

    #[test]
    fn typed_segment() {
        let mut request = data("/42/oops");
        let matcher = segment::<u64>();

        assert_eq!(matcher.parse(&mut request), Ok(42));
        assert!(matcher.parse(&mut request).is_err());
        // a failed conversion leaves the segment in place
        assert_eq!(request.peek_segment(), Some("oops"));
    }

    #[test]
    fn enumerated_segment() {
        let matcher = segment_as(enumeration(PLANS));

        assert_eq!(matcher.parse(&mut data("/year")), Ok(Plan::Year));
        assert!(matcher.parse(&mut data("/decade")).is_err());

        let mut printed = RequestData::new();
        matcher.print(&Plan::ThreeMonths, &mut printed).unwrap();
        assert_eq!(printed.path_string(), "/threeMonths");
    }

    #[test]
    fn empty_segment_is_not_printable() {
        let mut printed = RequestData::new();
        let result = segment::<String>().print(&String::new(), &mut printed);

        assert!(matches!(result, Err(PrintError::Conversion { .. })));
        assert!(printed.is_path_consumed());
    }
}
