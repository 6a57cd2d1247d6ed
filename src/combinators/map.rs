use crate::outcome::Outcome;

impl<V, C> Outcome<V, C> {
    /// Maps a `Success` value with `f`, leaving a `Failure` untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome::{Failure, Outcome};
    ///
    /// let x: Outcome<i32, &str> = Outcome::Success(21);
    /// assert_eq!(x.map_value(|v| v * 2), Outcome::Success(42));
    ///
    /// let y: Outcome<i32, &str> = Failure::new("broken").into();
    /// assert!(y.map_value(|v| v * 2).is_failure());
    /// ```
    #[inline]
    pub fn map_value<R, F>(self, f: F) -> Outcome<R, C>
    where
        F: FnOnce(V) -> R,
    {
        self.use_and_map(|v| Outcome::Success(f(v)))
    }

    /// Replaces a `Success` value with `()`.
    #[inline]
    pub fn drop_value(self) -> Outcome<(), C> {
        self.map_value(|_| ())
    }
}
