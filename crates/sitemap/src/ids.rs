//! Typed identifiers appearing in paths and query strings.
//!
//! Each id has exactly one canonical text form: `Display` prints it and `FromStr`
//! parses it back, rejecting any other spelling. That is what makes them usable
//! as path segments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("invalid numeric id: {0}")]
    InvalidNumber(String),

    #[error("invoice id must start with 'in_': {id}")]
    InvalidInvoice { id: String },
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_number(s).map($name)
            }
        }
    };
}

numeric_id!(
    /// Id of an episode, e.g. `/episodes/42`.
    EpisodeId
);
numeric_id!(GiftId);
numeric_id!(TeamInviteId);
numeric_id!(UserId);

/// Digits only, without sign or leading zeros, so the id prints back to the same text.
fn parse_number(s: &str) -> Result<u64, IdError> {
    let invalid = || IdError::InvalidNumber(s.to_string());
    let number = s.parse::<u64>().map_err(|_parse_error| invalid())?;
    if number.to_string() == s { Ok(number) } else { Err(invalid()) }
}

/// Id of a blog post, with the optional slug of its url.
///
/// `/blog/posts/12` and `/blog/posts/12-announcing-the-new-site` name the same
/// post. The slug is kept so a parsed id prints back to the path it came from;
/// compare [`BlogPostId::id`] to tell posts apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlogPostId {
    pub id: u64,
    pub slug: Option<String>,
}

impl BlogPostId {
    pub fn new(id: u64) -> Self {
        Self { id, slug: None }
    }

    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}

impl fmt::Display for BlogPostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slug {
            Some(slug) => write!(f, "{}-{slug}", self.id),
            None => write!(f, "{}", self.id),
        }
    }
}

impl FromStr for BlogPostId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((_, "")) => Err(IdError::InvalidNumber(s.to_string())),
            Some((number, slug)) => Ok(Self::new(parse_number(number)?).with_slug(slug)),
            None => Ok(Self::new(parse_number(s)?)),
        }
    }
}

/// Id of an invoice at the billing provider, always of the form `in_…`.
///
/// The prefix keeps `/account/invoices/{id}` from overlapping with the literal
/// `/account/invoices/upcoming`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceId(String);

impl InvoiceId {
    pub const PREFIX: &'static str = "in_";

    pub fn new(id: impl Into<String>) -> Result<Self, IdError> {
        id.into().parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for InvoiceId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix(Self::PREFIX) {
            Some(rest) if !rest.is_empty() => Ok(Self(s.to_string())),
            _ => Err(IdError::InvalidInvoice { id: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_codec::conversion::{Conversion, from_str};

    #[test]
    fn numeric_ids() {
        assert_eq!("42".parse::<EpisodeId>(), Ok(EpisodeId(42)));
        assert_eq!(EpisodeId(42).to_string(), "42");
        assert_eq!("x".parse::<GiftId>(), Err(IdError::InvalidNumber("x".into())));
        assert_eq!("042".parse::<EpisodeId>(), Err(IdError::InvalidNumber("042".into())));
        assert_eq!("+42".parse::<UserId>(), Err(IdError::InvalidNumber("+42".into())));
    }

    #[test]
    fn blog_post_slug_is_kept() {
        assert_eq!("12".parse::<BlogPostId>(), Ok(BlogPostId::new(12)));
        assert_eq!(
            "12-announcing-the-new-site".parse::<BlogPostId>(),
            Ok(BlogPostId::new(12).with_slug("announcing-the-new-site"))
        );
        assert!("announcing".parse::<BlogPostId>().is_err());
        assert!("12-".parse::<BlogPostId>().is_err());
        assert!("012-announcing".parse::<BlogPostId>().is_err());
        assert_eq!(BlogPostId::new(12).with_slug("new-site").to_string(), "12-new-site");
    }

    #[test]
    fn accepted_text_prints_back_unchanged() {
        let blog_post = from_str::<BlogPostId>();
        for text in ["12", "12-announcing", "7-a-b-c", "0"] {
            let parsed = blog_post.apply(text.to_string()).unwrap();
            assert_eq!(blog_post.unapply(&parsed).as_deref(), Some(text));
        }

        let episode = from_str::<EpisodeId>();
        for text in ["0", "42", "18446744073709551615"] {
            let parsed = episode.apply(text.to_string()).unwrap();
            assert_eq!(episode.unapply(&parsed).as_deref(), Some(text));
        }
        for text in ["042", "+42", "-1", ""] {
            assert_eq!(episode.apply(text.to_string()), None, "{text}");
        }

        let invoice = from_str::<InvoiceId>();
        let parsed = invoice.apply("in_1Hx2".to_string()).unwrap();
        assert_eq!(invoice.unapply(&parsed).as_deref(), Some("in_1Hx2"));
    }

    #[test]
    fn invoice_prefix() {
        assert_eq!(InvoiceId::new("in_1abc").map(|id| id.to_string()), Ok("in_1abc".to_string()));
        assert!(InvoiceId::new("upcoming").is_err());
        assert!(InvoiceId::new("in_").is_err());
    }
}
