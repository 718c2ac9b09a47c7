//! The request cursor shared by every matcher.
//!
//! [`RequestData`] is a flattened, mutable view over one HTTP request: the method,
//! the path split into segments, the query grouped by key, the body bytes and
//! the declared content type.
//!
//! It is used in both directions:
//! - while parsing, matchers *consume* it: path segments are popped from the
//!   front, query keys are removed, the body is taken;
//! - while printing, matchers *append* to an initially empty value, which is
//!   later serialized into a path, a url or an [`http::Request`].
//!
//! A `RequestData` is created per call and never shared. Cloning it is cheap
//! enough to snapshot before every alternative: the body is a refcounted
//! [`Bytes`].

use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method, Request, Uri};
use mime::Mime;
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use tracing::trace;

use crate::error::RequestDataError;

/// Characters escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet =
    &CONTROLS.add(b' ').add(b'"').add(b'#').add(b'<').add(b'>').add(b'`').add(b'?').add(b'{').add(b'}').add(b'/').add(b'%');

#[derive(Clone, Default, PartialEq)]
pub struct RequestData {
    method: Option<Method>,
    path: VecDeque<String>,
    query: Vec<(String, Vec<String>)>,
    body: Option<Bytes>,
    content_type: Option<Mime>,
    malformed: Option<String>,
}

impl RequestData {
    /// Creates an empty value, the starting point for printing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cursor from a method and an origin-form uri such as `/episodes/42?ref=home`.
    ///
    /// Empty segments are dropped, so `/episodes/42/` and `/episodes//42` are the same
    /// path as `/episodes/42`.
    pub fn from_uri(method: Method, uri: &str) -> Result<Self, RequestDataError> {
        let uri: Uri = uri.parse()?;
        Self::from_parts(method, &uri)
    }

    fn from_parts(method: Method, uri: &Uri) -> Result<Self, RequestDataError> {
        let path = uri
            .path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                percent_decode_str(segment)
                    .decode_utf8()
                    .map(Cow::into_owned)
                    .map_err(|_utf8_error| RequestDataError::InvalidSegment { segment: segment.to_string() })
            })
            .collect::<Result<VecDeque<_>, _>>()?;

        let mut data = Self { method: Some(method), path, ..Self::default() };
        if let Some(query) = uri.query() {
            let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(query)?;
            for (key, value) in pairs {
                data.push_query(key, value);
            }
        }

        Ok(data)
    }

    /// Returns the request method, `GET` when it was never set.
    pub fn method(&self) -> Method {
        self.method.clone().unwrap_or(Method::GET)
    }

    /// Why the request could not be read, for cursors built from a malformed request.
    pub fn malformed(&self) -> Option<&str> {
        self.malformed.as_deref()
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = Some(method);
    }

    /// Returns the first unconsumed path segment without consuming it.
    pub fn peek_segment(&self) -> Option<&str> {
        self.path.front().map(String::as_str)
    }

    /// Removes and returns the first unconsumed path segment.
    pub fn pop_segment(&mut self) -> Option<String> {
        self.path.pop_front()
    }

    pub fn push_segment(&mut self, segment: impl Into<String>) {
        self.path.push_back(segment.into());
    }

    /// The unconsumed path segments, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.iter().map(String::as_str)
    }

    #[inline]
    pub fn is_path_consumed(&self) -> bool {
        self.path.is_empty()
    }

    /// Returns the values of a query key without consuming them.
    pub fn query(&self, key: &str) -> Option<&[String]> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, values)| values.as_slice())
    }

    /// Removes a query key and returns all of its values.
    pub fn pop_query(&mut self, key: &str) -> Option<Vec<String>> {
        let index = self.query.iter().position(|(k, _)| k == key)?;
        Some(self.query.remove(index).1)
    }

    /// Appends one value for a key, keeping keys in first-seen order.
    pub fn push_query(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value.into()),
            None => self.query.push((key, vec![value.into()])),
        }
    }

    /// Flattened `(key, value)` pairs, in the order they will be serialized.
    pub fn query_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.query.iter().flat_map(|(key, values)| values.iter().map(move |value| (key.as_str(), value.as_str())))
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Removes the body, leaving the cursor without one.
    pub fn take_body(&mut self) -> Option<Bytes> {
        self.body.take()
    }

    /// A body counts as consumed once taken, or when it was empty to begin with.
    #[inline]
    pub fn is_body_consumed(&self) -> bool {
        self.body.as_ref().is_none_or(Bytes::is_empty)
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = Some(body.into());
    }

    pub fn content_type(&self) -> Option<&Mime> {
        self.content_type.as_ref()
    }

    pub fn set_content_type(&mut self, content_type: Mime) {
        self.content_type = Some(content_type);
    }

    /// Builder style setters, convenient for hand made requests in tests.
    pub fn with_body(mut self, content_type: Mime, body: impl Into<Bytes>) -> Self {
        self.set_content_type(content_type);
        self.set_body(body);
        self
    }

    /// Appends a fragment printed by a child router.
    ///
    /// Path segments and query entries are appended after the existing ones; method,
    /// body and content type are overridden only when the fragment sets them.
    pub fn merge(&mut self, fragment: RequestData) {
        let RequestData { method, path, query, body, content_type, malformed: _ } = fragment;

        if method.is_some() {
            self.method = method;
        }
        self.path.extend(path);
        for (key, values) in query {
            for value in values {
                self.push_query(key.clone(), value);
            }
        }
        if body.is_some() {
            self.body = body;
        }
        if content_type.is_some() {
            self.content_type = content_type;
        }
    }

    /// Serializes the path and query, e.g. `/episodes/42?ref=home`.
    ///
    /// Segments are percent encoded, and the query string is only emitted when at
    /// least one entry was printed.
    pub fn path_string(&self) -> String {
        let mut path = String::new();
        for segment in &self.path {
            path.push('/');
            path.extend(utf8_percent_encode(segment, PATH_SEGMENT));
        }
        if path.is_empty() {
            path.push('/');
        }

        if let Some(query) = self.query_string() {
            path.push('?');
            path.push_str(&query);
        }
        path
    }

    fn query_string(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        let pairs = self.query_pairs().collect::<Vec<_>>();
        // serializing a sequence of string pairs can't fail
        serde_urlencoded::to_string(pairs).ok()
    }

    /// Converts the printed value into an [`http::Request`].
    pub fn into_request(self) -> Result<Request<Bytes>, http::Error> {
        let mut builder = Request::builder().method(self.method()).uri(self.path_string());
        if let Some(content_type) = &self.content_type {
            builder = builder.header(CONTENT_TYPE, HeaderValue::from_str(content_type.as_ref())?);
        }
        builder.body(self.body.unwrap_or_default())
    }
}

/// Builds a cursor from a received request.
///
/// A uri that can't be split (non utf-8 segment, malformed query) yields a
/// malformed cursor, which [`Router::match_request`](crate::Router::match_request)
/// rejects before trying any route.
impl From<Request<Bytes>> for RequestData {
    fn from(request: Request<Bytes>) -> Self {
        let (parts, body) = request.into_parts();

        let mut data = match Self::from_parts(parts.method.clone(), &parts.uri) {
            Ok(data) => data,
            Err(e) => {
                trace!(uri = %parts.uri, cause = %e, "can't build request data from uri");
                Self { method: Some(parts.method), malformed: Some(e.to_string()), ..Self::default() }
            }
        };

        data.content_type = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<Mime>().ok());
        if !body.is_empty() {
            data.body = Some(body);
        }
        data
    }
}

impl fmt::Debug for RequestData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestData")
            .field("method", &self.method())
            .field("path", &self.path_string())
            .field("body_len", &self.body.as_ref().map(Bytes::len))
            .field("content_type", &self.content_type)
            .field("malformed", &self.malformed)
            .finish()
    }
}
