use http::Method;
use thiserror::Error;

/// Why a request did not match a router.
///
/// A failed match is an expected outcome, not an exceptional one: the top level
/// [`Router::parse`](crate::Router::parse) turns it into `None`. The variants
/// only exist so the reason can be logged and asserted on in tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("expected a path segment, but the path is exhausted")]
    PathExhausted,

    #[error("expected path segment '{expected}', found '{found}'")]
    LiteralMismatch { expected: String, found: String },

    #[error("expected method {expected}, found {found}")]
    MethodMismatch { expected: Method, found: Method },

    #[error("missing query field '{key}'")]
    MissingQuery { key: String },

    #[error("conversion failed: {reason}")]
    Conversion { reason: String },

    #[error("invalid body: {reason}")]
    Body { reason: String },

    #[error("expected content type {expected}, found {found}")]
    ContentType { expected: String, found: String },

    #[error("no alternative matched")]
    NoAlternative,

    #[error("{remaining} path segment(s) left unconsumed")]
    UnconsumedPath { remaining: usize },

    #[error("request body left unconsumed")]
    UnconsumedBody,

    #[error("malformed request: {reason}")]
    MalformedRequest { reason: String },
}

impl MatchError {
    pub fn literal_mismatch<E: ToString, F: ToString>(expected: E, found: F) -> Self {
        Self::LiteralMismatch { expected: expected.to_string(), found: found.to_string() }
    }

    pub fn method_mismatch(expected: &Method, found: &Method) -> Self {
        Self::MethodMismatch { expected: expected.clone(), found: found.clone() }
    }

    pub fn missing_query<S: ToString>(key: S) -> Self {
        Self::MissingQuery { key: key.to_string() }
    }

    pub fn conversion<S: ToString>(reason: S) -> Self {
        Self::Conversion { reason: reason.to_string() }
    }

    pub fn body<S: ToString>(reason: S) -> Self {
        Self::Body { reason: reason.to_string() }
    }

    pub fn content_type<E: ToString, F: ToString>(expected: E, found: F) -> Self {
        Self::ContentType { expected: expected.to_string(), found: found.to_string() }
    }
}

/// Why a value could not be printed.
///
/// [`PrintError::Unclaimed`] is the normal signal an alternative uses to say
/// "this value is not my case"; every other variant is a programming error in
/// a route declaration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrintError {
    #[error("value is not handled by this router")]
    Unclaimed,

    #[error("conversion failed while printing: {reason}")]
    Conversion { reason: String },

    #[error("failed to encode body: {reason}")]
    Body { reason: String },
}

impl PrintError {
    pub fn conversion<S: ToString>(reason: S) -> Self {
        Self::Conversion { reason: reason.to_string() }
    }

    pub fn body<S: ToString>(reason: S) -> Self {
        Self::Body { reason: reason.to_string() }
    }
}

/// Errors raised while building a [`RequestData`](crate::RequestData) from raw input.
#[derive(Error, Debug)]
pub enum RequestDataError {
    #[error("invalid uri: {source}")]
    InvalidUri {
        #[from]
        source: http::uri::InvalidUri,
    },

    #[error("path segment is not valid utf-8: {segment}")]
    InvalidSegment { segment: String },

    #[error("invalid query string: {source}")]
    InvalidQuery {
        #[from]
        source: serde_urlencoded::de::Error,
    },
}

/// Errors raised while building a [`RouterConfig`](crate::RouterConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid base url: {source}")]
    InvalidBaseUrl {
        #[from]
        source: url::ParseError,
    },

    #[error("base url has no host: {url}")]
    MissingHost { url: String },

    #[error("base url scheme must be http or https, found {scheme}")]
    UnsupportedScheme { scheme: String },
}

/// A route whose printed form does not parse back to the same value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoundTripError {
    #[error("printing failed: {source}")]
    Print {
        #[from]
        source: PrintError,
    },

    #[error("printed request '{method} {path}' did not parse: {source}")]
    Parse { method: Method, path: String, source: MatchError },

    #[error("printed request '{method} {path}' parsed to {reparsed}, expected {expected}")]
    Mismatch { method: Method, path: String, expected: String, reparsed: String },
}
