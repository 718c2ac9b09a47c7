//! Body matchers.
//!
//! A body matcher consumes the entire body. When the request declares a content
//! type, it must agree with the matcher's encoding, so a form route and a JSON
//! route can sit side by side in one [`OneOf`](crate::OneOf).

use std::marker::PhantomData;

use bytes::Bytes;
use mime::Mime;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::matcher::Matcher;
use crate::{MatchError, PrintError, RequestData};

/// A form-encoded body, with bracket and array syntax (`plan[interval]=monthly`,
/// `teammates[0]=a@b.c`), decoded through `serde_qs`.
///
/// A missing body is decoded as an empty form, so a form whose fields are all
/// optional matches a request without a body.
#[derive(Debug)]
pub struct Form<T> {
    _phantom: PhantomData<fn() -> T>,
}

#[inline]
pub fn form<T>() -> Form<T>
where
    T: Serialize + DeserializeOwned,
{
    Form { _phantom: PhantomData }
}

impl<T> Matcher for Form<T>
where
    T: Serialize + DeserializeOwned,
{
    type Output = T;

    fn parse(&self, data: &mut RequestData) -> Result<T, MatchError> {
        check_content_type(data, &mime::APPLICATION_WWW_FORM_URLENCODED)?;

        let body = data.body().cloned().unwrap_or_default();
        let value = serde_qs::from_bytes::<T>(&body).map_err(|e| {
            trace!(cause = %e, "can't decode form body");
            MatchError::body(e)
        })?;

        data.take_body();
        Ok(value)
    }

    fn print(&self, value: &T, data: &mut RequestData) -> Result<(), PrintError> {
        let encoded = serde_qs::to_string(value).map_err(PrintError::body)?;
        data.set_content_type(mime::APPLICATION_WWW_FORM_URLENCODED);
        data.set_body(encoded);
        Ok(())
    }
}

/// A JSON body, decoded through `serde_json`.
#[derive(Debug)]
pub struct Json<T> {
    _phantom: PhantomData<fn() -> T>,
}

#[inline]
pub fn json<T>() -> Json<T>
where
    T: Serialize + DeserializeOwned,
{
    Json { _phantom: PhantomData }
}

impl<T> Matcher for Json<T>
where
    T: Serialize + DeserializeOwned,
{
    type Output = T;

    fn parse(&self, data: &mut RequestData) -> Result<T, MatchError> {
        check_content_type(data, &mime::APPLICATION_JSON)?;

        let body = data.body().ok_or_else(|| MatchError::body("missing json body"))?;
        let value = serde_json::from_slice::<T>(body).map_err(|e| {
            trace!(cause = %e, "can't decode json body");
            MatchError::body(e)
        })?;

        data.take_body();
        Ok(value)
    }

    fn print(&self, value: &T, data: &mut RequestData) -> Result<(), PrintError> {
        let encoded = serde_json::to_vec(value).map_err(PrintError::body)?;
        data.set_content_type(mime::APPLICATION_JSON);
        data.set_body(encoded);
        Ok(())
    }
}

/// The body as raw bytes, whatever its content type.
#[derive(Debug)]
pub struct RawBody;

#[inline]
pub fn raw_body() -> RawBody {
    RawBody
}

impl Matcher for RawBody {
    type Output = Bytes;

    fn parse(&self, data: &mut RequestData) -> Result<Bytes, MatchError> {
        data.take_body().ok_or_else(|| MatchError::body("missing body"))
    }

    fn print(&self, value: &Bytes, data: &mut RequestData) -> Result<(), PrintError> {
        data.set_body(value.clone());
        Ok(())
    }
}

fn check_content_type(data: &RequestData, expected: &Mime) -> Result<(), MatchError> {
    match data.content_type() {
        Some(found) if found.essence_str() != expected.essence_str() => {
            Err(MatchError::content_type(expected.essence_str(), found.essence_str()))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Pricing {
        interval: String,
        quantity: u32,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Subscribe {
        pricing: Pricing,
        #[serde(default)]
        teammates: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coupon: Option<String>,
    }

    fn subscribe() -> Subscribe {
        Subscribe {
            pricing: Pricing { interval: "monthly".into(), quantity: 2 },
            teammates: vec!["a@example.com".into(), "b@example.com".into()],
            coupon: None,
        }
    }

    fn post(content_type: Mime, body: &'static [u8]) -> RequestData {
        RequestData::from_uri(Method::POST, "/subscribe").unwrap().with_body(content_type, Bytes::from_static(body))
    }

    #[test]
    fn decode_bracket_form() {
        let mut data = post(
            mime::APPLICATION_WWW_FORM_URLENCODED,
            b"pricing[interval]=monthly&pricing[quantity]=2&teammates[0]=a%40example.com&teammates[1]=b%40example.com",
        );

        let value = form::<Subscribe>().parse(&mut data).unwrap();

        assert_eq!(value, subscribe());
        assert!(data.is_body_consumed());
    }

    #[test]
    fn form_round_trip() {
        let matcher = form::<Subscribe>();

        let mut printed = RequestData::new();
        matcher.print(&subscribe(), &mut printed).unwrap();

        assert_eq!(printed.content_type(), Some(&mime::APPLICATION_WWW_FORM_URLENCODED));
        assert_eq!(matcher.parse(&mut printed), Ok(subscribe()));
    }

    #[test]
    fn json_round_trip() {
        let matcher = json::<Subscribe>();
        let value = Subscribe { coupon: Some("FRIENDS".into()), ..subscribe() };

        let mut printed = RequestData::new();
        matcher.print(&value, &mut printed).unwrap();

        assert_eq!(printed.content_type(), Some(&mime::APPLICATION_JSON));
        assert_eq!(matcher.parse(&mut printed), Ok(value));
    }

    #[test]
    fn reject_mismatched_content_type() {
        let mut data = post(mime::APPLICATION_JSON, br#"{"pricing":{"interval":"monthly","quantity":2}}"#);

        let result = form::<Subscribe>().parse(&mut data);

        assert_eq!(result, Err(MatchError::content_type("application/x-www-form-urlencoded", "application/json")));
        assert!(!data.is_body_consumed());
    }

    #[test]
    fn reject_malformed_json() {
        let mut data = post(mime::APPLICATION_JSON, b"{");

        assert!(matches!(json::<Subscribe>().parse(&mut data), Err(MatchError::Body { .. })));
        assert!(!data.is_body_consumed());
    }

    #[test]
    fn raw_body_taken_whole() {
        let mut data = post(mime::TEXT_PLAIN, b"hello");

        assert_eq!(raw_body().parse(&mut data), Ok(Bytes::from_static(b"hello")));
        assert_eq!(raw_body().parse(&mut data), Err(MatchError::body("missing body")));
    }
}
