use http::Method;

use crate::matcher::Matcher;
use crate::utils::ensure;
use crate::{MatchError, PrintError, RequestData};

/// Matches the request method. Path, query and body are left untouched.
#[derive(Debug)]
pub struct MethodMatcher(Method);

#[inline]
pub fn method(method: Method) -> MethodMatcher {
    MethodMatcher(method)
}

impl Matcher for MethodMatcher {
    type Output = ();

    fn parse(&self, data: &mut RequestData) -> Result<(), MatchError> {
        let found = data.method();
        ensure!(found == self.0, MatchError::method_mismatch(&self.0, &found));
        Ok(())
    }

    fn print(&self, _value: &(), data: &mut RequestData) -> Result<(), PrintError> {
        data.set_method(self.0.clone());
        Ok(())
    }
}

macro_rules! method_matcher {
    ($method:ident, $upper_case_method:ident) => {
        #[doc = concat!("Creates a matcher for HTTP ", stringify!($upper_case_method), " requests.")]
        #[inline]
        pub fn $method() -> MethodMatcher {
            MethodMatcher(Method::$upper_case_method)
        }
    };
}

method_matcher!(get, GET);
method_matcher!(post, POST);
method_matcher!(put, PUT);
method_matcher!(patch, PATCH);
method_matcher!(delete, DELETE);
method_matcher!(head, HEAD);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_method_without_consuming() {
        let mut data = RequestData::from_uri(Method::POST, "/subscribe").unwrap();

        assert_eq!(post().parse(&mut data), Ok(()));
        assert_eq!(get().parse(&mut data), Err(MatchError::method_mismatch(&Method::GET, &Method::POST)));
        assert_eq!(data.peek_segment(), Some("subscribe"));
    }

    #[test]
    fn print_sets_method() {
        let mut data = RequestData::new();
        assert_eq!(data.method(), Method::GET);

        delete().print(&(), &mut data).unwrap();
        assert_eq!(data.method(), Method::DELETE);
    }
}
