use crate::failure::Failure;

/// Result of a fallible operation, either a successful value or a typed failure.
///
/// `Outcome` plays the role `Result` plays for `?`-style code, except the failure side
/// always carries a [`Failure`]: a caller-defined cause plus optional diagnostics.
/// Both variants must be handled; there is no third state.
///
/// # Examples
///
/// ```rust
/// use outcome::{Failure, Outcome};
///
/// let found: Outcome<i32, &str> = Outcome::Success(42);
/// let missing: Outcome<i32, &str> = Failure::new("not found").into();
///
/// // Using combinators
/// assert_eq!(found.map_value(|x| x * 2), Outcome::Success(84));
/// assert!(missing.map_value(|x| x * 2).is_failure());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "this `Outcome` may be a `Failure`, which should be handled"]
pub enum Outcome<V, C> {
    /// The operation succeeded with a value
    Success(V),
    /// The operation failed for a typed cause
    Failure(Failure<C>),
}

impl<V, C> Outcome<V, C> {
    /// Returns `true` if the outcome is `Success`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome::{Failure, Outcome};
    ///
    /// let x: Outcome<i32, &str> = Outcome::Success(42);
    /// assert!(x.is_success());
    ///
    /// let y: Outcome<i32, &str> = Failure::new("broken").into();
    /// assert!(!y.is_success());
    /// ```
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns `true` if the outcome is `Failure`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome::{Failure, Outcome};
    ///
    /// let x: Outcome<i32, &str> = Failure::new("broken").into();
    /// assert!(x.is_failure());
    ///
    /// let y: Outcome<i32, &str> = Outcome::Success(42);
    /// assert!(!y.is_failure());
    /// ```
    #[inline]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Converts from `Outcome<V, C>` to `Option<V>`, discarding the failure, if any.
    ///
    /// This is the callback-free form of [`use_or_none`](Outcome::use_or_none).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome::{Failure, Outcome};
    ///
    /// let x: Outcome<i32, &str> = Outcome::Success(42);
    /// assert_eq!(x.value(), Some(42));
    ///
    /// let y: Outcome<i32, &str> = Failure::new("broken").into();
    /// assert_eq!(y.value(), None);
    /// ```
    #[inline]
    pub fn value(self) -> Option<V> {
        match self {
            Outcome::Success(v) => Some(v),
            Outcome::Failure(_) => None,
        }
    }

    /// Converts from `Outcome<V, C>` to `Option<Failure<C>>`, discarding the value, if any.
    #[inline]
    pub fn failure(self) -> Option<Failure<C>> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(f) => Some(f),
        }
    }

    /// Converts from `&Outcome<V, C>` to `Outcome<&V, C>`.
    ///
    /// The failure is cloned, which only clones the cause; the exception and
    /// message producer are shared.
    #[inline]
    pub fn as_ref(&self) -> Outcome<&V, C>
    where
        C: Clone,
    {
        match self {
            Outcome::Success(v) => Outcome::Success(v),
            Outcome::Failure(f) => Outcome::Failure(f.clone()),
        }
    }

    /// Converts the outcome into a `Result`, so it can be propagated with `?`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome::{Failure, Outcome};
    ///
    /// fn double(input: Outcome<i32, &'static str>) -> Result<i32, Failure<&'static str>> {
    ///     let value = input.into_result()?;
    ///     Ok(value * 2)
    /// }
    ///
    /// assert_eq!(double(Outcome::Success(4)).ok(), Some(8));
    /// assert!(double(Failure::new("broken").into()).is_err());
    /// ```
    #[inline]
    pub fn into_result(self) -> Result<V, Failure<C>> {
        self.into()
    }
}

impl<V, C> From<Failure<C>> for Outcome<V, C> {
    fn from(failure: Failure<C>) -> Self {
        Outcome::Failure(failure)
    }
}

impl<V, C> From<Result<V, Failure<C>>> for Outcome<V, C> {
    fn from(result: Result<V, Failure<C>>) -> Self {
        match result {
            Ok(v) => Outcome::Success(v),
            Err(f) => Outcome::Failure(f),
        }
    }
}

impl<V, C> From<Outcome<V, C>> for Result<V, Failure<C>> {
    fn from(outcome: Outcome<V, C>) -> Self {
        match outcome {
            Outcome::Success(v) => Ok(v),
            Outcome::Failure(f) => Err(f),
        }
    }
}
