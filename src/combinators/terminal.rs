//! Operators that leave the outcome channel and produce a plain value.

use crate::failure::Failure;
use crate::outcome::Outcome;

impl<V, C> Outcome<V, C> {
    /// Returns the value, or the replacement computed from the failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome::{Failure, Outcome};
    ///
    /// let x: Outcome<i32, &str> = Outcome::Success(3);
    /// assert_eq!(x.use_or_else(|_| 0), 3);
    ///
    /// let y: Outcome<i32, &str> = Failure::new("broken").into();
    /// assert_eq!(y.use_or_else(|_| 0), 0);
    /// ```
    #[inline]
    pub fn use_or_else<F>(self, on_failure: F) -> V
    where
        F: FnOnce(Failure<C>) -> V,
    {
        match self {
            Outcome::Success(v) => v,
            Outcome::Failure(failure) => on_failure(failure),
        }
    }

    /// Eliminates the outcome with one function per variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome::{Failure, Outcome};
    ///
    /// let describe = |o: Outcome<i32, &str>| {
    ///     o.use_with(|v| format!("got {v}"), |f| format!("failed: {}", f.cause()))
    /// };
    ///
    /// assert_eq!(describe(Outcome::Success(1)), "got 1");
    /// assert_eq!(describe(Failure::new("timeout").into()), "failed: timeout");
    /// ```
    #[inline]
    pub fn use_with<R, S, F>(self, on_success: S, on_failure: F) -> R
    where
        S: FnOnce(V) -> R,
        F: FnOnce(Failure<C>) -> R,
    {
        match self {
            Outcome::Success(v) => on_success(v),
            Outcome::Failure(failure) => on_failure(failure),
        }
    }

    /// Returns the value, or calls `on_failure` and returns `None`.
    ///
    /// Use [`value`](Outcome::value) when nothing needs to happen on failure.
    #[inline]
    pub fn use_or_none<F>(self, on_failure: F) -> Option<V>
    where
        F: FnOnce(Failure<C>),
    {
        self.use_map_or_none(|v| v, on_failure)
    }

    /// Maps the value with `on_success`, or calls `on_failure` and returns `None`.
    #[inline]
    pub fn use_map_or_none<R, S, F>(self, on_success: S, on_failure: F) -> Option<R>
    where
        S: FnOnce(V) -> R,
        F: FnOnce(Failure<C>),
    {
        match self {
            Outcome::Success(v) => Some(on_success(v)),
            Outcome::Failure(failure) => {
                on_failure(failure);
                None
            }
        }
    }
}
