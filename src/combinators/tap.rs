use crate::failure::Failure;
use crate::outcome::Outcome;

impl<V, C> Outcome<V, C> {
    /// Calls `f` with the value if this is a `Success`, then returns `self` unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome::Outcome;
    ///
    /// let mut seen = Vec::new();
    /// let x: Outcome<i32, &str> = Outcome::Success(3).on_success(|v| seen.push(*v));
    /// assert_eq!(x, Outcome::Success(3));
    /// assert_eq!(seen, vec![3]);
    /// ```
    #[inline]
    pub fn on_success<F>(self, f: F) -> Self
    where
        F: FnOnce(&V),
    {
        if let Outcome::Success(v) = &self {
            f(v);
        }
        self
    }

    /// Calls `f` with the failure if this is a `Failure`, then returns `self` unchanged.
    ///
    /// Typically used to log a failure on its way through a pipeline.
    #[inline]
    pub fn on_failure<F>(self, f: F) -> Self
    where
        F: FnOnce(&Failure<C>),
    {
        if let Outcome::Failure(failure) = &self {
            f(failure);
        }
        self
    }
}
