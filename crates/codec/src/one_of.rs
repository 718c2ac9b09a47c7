//! Ordered alternation between routers.
//!
//! [`OneOf`] holds a list of routers producing the same type. Parsing tries them in
//! declared order, each against a fresh copy of the cursor as it was before the
//! alternation, and commits to the first one that succeeds. When two alternatives
//! can match the same request, the one declared first always wins, at every
//! level of a nested tree.
//!
//! Printing dispatches on the case of the value: the first alternative whose case
//! conversion claims the value prints it, the others are never asked to write.

use std::fmt;

use tracing::trace;

use crate::matcher::{BoxedMatcher, Matcher};
use crate::{MatchError, PrintError, RequestData};

/// Creates an empty alternation. With no alternatives, nothing matches.
pub fn one_of<O>() -> OneOf<O> {
    OneOf::new()
}

pub struct OneOf<O> {
    alternatives: Vec<BoxedMatcher<O>>,
}

impl<O> fmt::Debug for OneOf<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneOf").field("alternatives", &self.alternatives.len()).finish()
    }
}

impl<O> OneOf<O> {
    fn new() -> Self {
        Self { alternatives: vec![] }
    }

    /// Adds an alternative, tried after every alternative added before it.
    pub fn or<M>(mut self, matcher: M) -> Self
    where
        M: Matcher<Output = O> + Send + Sync + 'static,
    {
        self.alternatives.push(Box::new(matcher));
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

impl<O> Matcher for OneOf<O> {
    type Output = O;

    fn parse(&self, data: &mut RequestData) -> Result<O, MatchError> {
        for (index, alternative) in self.alternatives.iter().enumerate() {
            let mut attempt = data.clone();
            match alternative.parse(&mut attempt) {
                Ok(output) => {
                    *data = attempt;
                    return Ok(output);
                }
                Err(e) => trace!(index, cause = %e, "alternative did not match"),
            }
        }

        Err(MatchError::NoAlternative)
    }

    fn print(&self, value: &O, data: &mut RequestData) -> Result<(), PrintError> {
        for alternative in &self.alternatives {
            let mut fragment = RequestData::new();
            match alternative.print(value, &mut fragment) {
                Ok(()) => {
                    data.merge(fragment);
                    return Ok(());
                }
                Err(PrintError::Unclaimed) => {}
                Err(e) => return Err(e),
            }
        }

        Err(PrintError::Unclaimed)
    }
}
