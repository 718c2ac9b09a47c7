use chrono::NaiveDate;
use route_codec::matcher::{MatcherExt, get, optional_query, path, segment};
use route_codec::{OneOf, case, one_of, sequence};

use crate::ids::BlogPostId;

/// Routes below `/blog`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlogRoute {
    /// `GET /blog`, optionally limited to posts published since a date (`?since=2024-01-31`).
    Index { since: Option<NaiveDate> },
    /// `GET /blog/feed/atom.xml`
    Feed,
    /// `GET /blog/posts/{id}`, where the id may carry a slug, as in `12-new-site`.
    Show(BlogPostId),
}

pub(crate) fn blog_routes() -> OneOf<BlogRoute> {
    one_of()
        .or(sequence()
            .skip(get())
            .take(optional_query::<NaiveDate>("since"))
            .map(case!(BlogRoute::Index { since })))
        .or(sequence().skip(get()).skip(path("feed")).skip(path("atom.xml")).map(case!(BlogRoute::Feed)))
        .or(sequence()
            .skip(get())
            .skip(path("posts"))
            .take(segment::<BlogPostId>())
            .map(case!(BlogRoute::Show(id))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use route_codec::{Matcher, RequestData};

    fn parse(uri: &str) -> Option<BlogRoute> {
        let mut data = RequestData::from_uri(Method::GET, uri).unwrap();
        blog_routes().parse(&mut data).ok()
    }

    #[test]
    fn parse_blog() {
        assert_eq!(parse("/"), Some(BlogRoute::Index { since: None }));
        assert_eq!(parse("/?since=2024-01-31"), Some(BlogRoute::Index { since: NaiveDate::from_ymd_opt(2024, 1, 31) }));
        assert_eq!(parse("/feed/atom.xml"), Some(BlogRoute::Feed));
        assert_eq!(parse("/posts/12-new-site"), Some(BlogRoute::Show(BlogPostId::new(12).with_slug("new-site"))));
        assert_eq!(parse("/posts/12"), Some(BlogRoute::Show(BlogPostId::new(12))));
        assert_eq!(parse("/posts/new-site"), None);
        assert_eq!(parse("/posts/012-new-site"), None);
    }

    #[test]
    fn slug_is_printed_back() {
        let route = BlogRoute::Show(BlogPostId::new(12).with_slug("new-site"));
        let mut data = RequestData::new();

        blog_routes().print(&route, &mut data).unwrap();
        assert_eq!(data.path_string(), "/posts/12-new-site");
    }

    #[test]
    fn malformed_date_is_ignored() {
        let mut data = RequestData::from_uri(Method::GET, "/?since=yesterday").unwrap();

        assert_eq!(blog_routes().parse(&mut data), Ok(BlogRoute::Index { since: None }));
        // left for the router, which only rejects leftover path and body
        assert!(data.query("since").is_some());
    }
}
