//! Query field matchers.
//!
//! Every matcher owns one key. A successful parse removes the key, with all of its
//! values, from the cursor; a failed one leaves it in place. Printing only ever
//! appends entries for values that are present, so an absent optional field
//! round-trips to "no entry" rather than to an empty one.

use std::borrow::Cow;
use std::fmt::{self, Display};
use std::str::FromStr;

use tracing::trace;

use crate::conversion::{Conversion, FromStrConversion, from_str};
use crate::matcher::Matcher;
use crate::{MatchError, PrintError, RequestData};

type Key = Cow<'static, str>;

/// A required query field. The first value of the key is converted.
#[derive(Debug)]
pub struct Query<C> {
    key: Key,
    conversion: C,
}

#[inline]
pub fn query<T>(key: impl Into<Key>) -> Query<FromStrConversion<T>>
where
    T: FromStr + Display,
{
    Query { key: key.into(), conversion: from_str() }
}

#[inline]
pub fn query_as<C>(key: impl Into<Key>, conversion: C) -> Query<C>
where
    C: Conversion<Input = String>,
{
    Query { key: key.into(), conversion }
}

impl<C> Matcher for Query<C>
where
    C: Conversion<Input = String>,
{
    type Output = C::Output;

    fn parse(&self, data: &mut RequestData) -> Result<Self::Output, MatchError> {
        let value = match first_value(data, &self.key) {
            Some(raw) => self
                .conversion
                .apply(raw.to_string())
                .ok_or_else(|| MatchError::conversion(format!("can't convert query field '{}={raw}'", self.key)))?,
            None => return Err(MatchError::missing_query(&self.key)),
        };

        data.pop_query(&self.key);
        Ok(value)
    }

    fn print(&self, value: &Self::Output, data: &mut RequestData) -> Result<(), PrintError> {
        let raw = self.conversion.unapply(value).ok_or_else(|| PrintError::conversion(&self.key))?;
        data.push_query(self.key.as_ref(), raw);
        Ok(())
    }
}

/// An optional query field.
///
/// Absent or malformed values parse as `None`; a malformed value is left in the
/// cursor. `None` prints nothing.
#[derive(Debug)]
pub struct OptionalQuery<C> {
    key: Key,
    conversion: C,
}

#[inline]
pub fn optional_query<T>(key: impl Into<Key>) -> OptionalQuery<FromStrConversion<T>>
where
    T: FromStr + Display,
{
    OptionalQuery { key: key.into(), conversion: from_str() }
}

#[inline]
pub fn optional_query_as<C>(key: impl Into<Key>, conversion: C) -> OptionalQuery<C>
where
    C: Conversion<Input = String>,
{
    OptionalQuery { key: key.into(), conversion }
}

impl<C> OptionalQuery<C>
where
    C: Conversion<Input = String>,
{
    fn parse_optional(&self, data: &mut RequestData) -> Option<C::Output> {
        let raw = first_value(data, &self.key)?;
        match self.conversion.apply(raw.to_string()) {
            Some(value) => {
                data.pop_query(&self.key);
                Some(value)
            }
            None => {
                trace!(key = %self.key, raw, "ignore malformed optional query field");
                None
            }
        }
    }

    fn print_present(&self, value: &C::Output, data: &mut RequestData) -> Result<(), PrintError> {
        let raw = self.conversion.unapply(value).ok_or_else(|| PrintError::conversion(&self.key))?;
        data.push_query(self.key.as_ref(), raw);
        Ok(())
    }
}

impl<C> Matcher for OptionalQuery<C>
where
    C: Conversion<Input = String>,
{
    type Output = Option<C::Output>;

    fn parse(&self, data: &mut RequestData) -> Result<Self::Output, MatchError> {
        Ok(self.parse_optional(data))
    }

    fn print(&self, value: &Self::Output, data: &mut RequestData) -> Result<(), PrintError> {
        match value {
            Some(value) => self.print_present(value, data),
            None => Ok(()),
        }
    }
}

/// An optional query field with a default value.
///
/// Parses like [`OptionalQuery`] and falls back to the default; prints nothing when
/// the value equals the default.
pub struct DefaultQuery<C: Conversion> {
    inner: OptionalQuery<C>,
    default: C::Output,
}

impl<C> fmt::Debug for DefaultQuery<C>
where
    C: Conversion + fmt::Debug,
    C::Output: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultQuery").field("inner", &self.inner).field("default", &self.default).finish()
    }
}

#[inline]
pub fn query_or<T>(key: impl Into<Key>, default: T) -> DefaultQuery<FromStrConversion<T>>
where
    T: FromStr + Display + PartialEq + Clone,
{
    DefaultQuery { inner: optional_query(key), default }
}

impl<C> Matcher for DefaultQuery<C>
where
    C: Conversion<Input = String>,
    C::Output: PartialEq + Clone,
{
    type Output = C::Output;

    fn parse(&self, data: &mut RequestData) -> Result<Self::Output, MatchError> {
        Ok(self.inner.parse_optional(data).unwrap_or_else(|| self.default.clone()))
    }

    fn print(&self, value: &Self::Output, data: &mut RequestData) -> Result<(), PrintError> {
        if *value == self.default {
            return Ok(());
        }
        self.inner.print_present(value, data)
    }
}

/// Every value of a repeated key, e.g. `?tag=a&tag=b`. An absent key is an empty list.
#[derive(Debug)]
pub struct QueryAll<C> {
    key: Key,
    conversion: C,
}

#[inline]
pub fn query_all<T>(key: impl Into<Key>) -> QueryAll<FromStrConversion<T>>
where
    T: FromStr + Display,
{
    QueryAll { key: key.into(), conversion: from_str() }
}

impl<C> Matcher for QueryAll<C>
where
    C: Conversion<Input = String>,
{
    type Output = Vec<C::Output>;

    fn parse(&self, data: &mut RequestData) -> Result<Self::Output, MatchError> {
        let Some(raw_values) = data.query(&self.key) else {
            return Ok(Vec::new());
        };

        let values = raw_values
            .iter()
            .map(|raw| {
                self.conversion
                    .apply(raw.clone())
                    .ok_or_else(|| MatchError::conversion(format!("can't convert query field '{}={raw}'", self.key)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        data.pop_query(&self.key);
        Ok(values)
    }

    fn print(&self, values: &Self::Output, data: &mut RequestData) -> Result<(), PrintError> {
        for value in values {
            let raw = self.conversion.unapply(value).ok_or_else(|| PrintError::conversion(&self.key))?;
            data.push_query(self.key.as_ref(), raw);
        }
        Ok(())
    }
}

fn first_value<'a>(data: &'a RequestData, key: &str) -> Option<&'a str> {
    data.query(key).and_then(<[String]>::first).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    fn data(uri: &str) -> RequestData {
        RequestData::from_uri(Method::GET, uri).unwrap()
    }

    #[test]
    fn required_field() {
        let matcher = query::<u32>("page");

        let mut request = data("/?page=3&page=4&other=x");
        assert_eq!(matcher.parse(&mut request), Ok(3));
        assert_eq!(request.query("page"), None);
        assert_eq!(request.query("other"), Some(&["x".to_string()][..]));

        assert_eq!(matcher.parse(&mut data("/")), Err(MatchError::missing_query("page")));

        let mut malformed = data("/?page=three");
        assert!(matches!(matcher.parse(&mut malformed), Err(MatchError::Conversion { .. })));
        assert!(malformed.query("page").is_some());
    }

    #[test]
    fn optional_field_omitted_when_absent() {
        let matcher = optional_query::<String>("ref");

        let mut printed = RequestData::new();
        matcher.print(&None, &mut printed).unwrap();
        assert_eq!(printed.path_string(), "/");

        matcher.print(&Some("home".to_string()), &mut printed).unwrap();
        assert_eq!(printed.path_string(), "/?ref=home");
        assert_eq!(printed.query_pairs().count(), 1);
    }

    #[test]
    fn optional_field_parse() {
        let matcher = optional_query::<u64>("id");

        assert_eq!(matcher.parse(&mut data("/")), Ok(None));
        assert_eq!(matcher.parse(&mut data("/?id=9")), Ok(Some(9)));

        let mut malformed = data("/?id=nine");
        assert_eq!(matcher.parse(&mut malformed), Ok(None));
        assert!(malformed.query("id").is_some());
    }

    #[test]
    fn default_field() {
        let matcher = query_or("page", 1_u32);

        assert_eq!(matcher.parse(&mut data("/")), Ok(1));
        assert_eq!(matcher.parse(&mut data("/?page=5")), Ok(5));

        let mut printed = RequestData::new();
        matcher.print(&1, &mut printed).unwrap();
        assert_eq!(printed.path_string(), "/");

        matcher.print(&5, &mut printed).unwrap();
        assert_eq!(printed.path_string(), "/?page=5");
    }

    #[test]
    fn repeated_field() {
        let matcher = query_all::<u32>("id");

        assert_eq!(matcher.parse(&mut data("/")), Ok(vec![]));
        assert_eq!(matcher.parse(&mut data("/?id=1&id=2")), Ok(vec![1, 2]));
        assert!(matcher.parse(&mut data("/?id=1&id=x")).is_err());

        let mut printed = RequestData::new();
        matcher.print(&vec![3, 4], &mut printed).unwrap();
        assert_eq!(printed.path_string(), "/?id=3&id=4");
    }
}
