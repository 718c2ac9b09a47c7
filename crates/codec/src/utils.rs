//! Utility macros shared by the matchers.

/// Returns early with an error if a condition is not met.
///
/// Like `assert!`, but yields `Err($error)` instead of panicking, so a matcher
/// can reject its input without touching the cursor any further.
///
/// # Example
///
/// ```ignore
/// ensure!(segment == self.literal, MatchError::literal_mismatch(&self.literal, &segment));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
