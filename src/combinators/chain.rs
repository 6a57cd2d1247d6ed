use crate::outcome::Outcome;

impl<V, C> Outcome<V, C> {
    /// Runs a fallible step against the value and keeps the original value.
    ///
    /// If `f` succeeds its value is discarded and `self` is returned; if it fails its
    /// failure replaces the outcome. Meant for validation steps whose result only
    /// matters when it is a failure. A `Failure` short-circuits without calling `f`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome::{Failure, Outcome};
    ///
    /// fn positive(v: &i32) -> Outcome<(), &'static str> {
    ///     if *v > 0 {
    ///         Outcome::Success(())
    ///     } else {
    ///         Failure::new("not positive").into()
    ///     }
    /// }
    ///
    /// assert_eq!(Outcome::Success(5).use_and_keep(positive), Outcome::Success(5));
    /// assert!(Outcome::Success(-5).use_and_keep(positive).is_failure());
    /// ```
    #[inline]
    pub fn use_and_keep<U, F>(self, f: F) -> Self
    where
        F: FnOnce(&V) -> Outcome<U, C>,
    {
        match self {
            Outcome::Success(v) => match f(&v) {
                Outcome::Success(_) => Outcome::Success(v),
                Outcome::Failure(failure) => Outcome::Failure(failure),
            },
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// Feeds the value into a step that may itself fail, returning that step's outcome.
    ///
    /// A `Failure` short-circuits without calling `f`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome::{Failure, Outcome};
    ///
    /// fn half(v: i32) -> Outcome<i32, &'static str> {
    ///     if v % 2 == 0 {
    ///         Outcome::Success(v / 2)
    ///     } else {
    ///         Failure::new("odd").into()
    ///     }
    /// }
    ///
    /// assert_eq!(Outcome::Success(8).use_and_map(half).use_and_map(half), Outcome::Success(2));
    /// assert!(Outcome::Success(6).use_and_map(half).use_and_map(half).is_failure());
    /// ```
    #[inline]
    pub fn use_and_map<R, F>(self, f: F) -> Outcome<R, C>
    where
        F: FnOnce(V) -> Outcome<R, C>,
    {
        match self {
            Outcome::Success(v) => f(v),
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }
}

impl<V, C> Outcome<Outcome<V, C>, C> {
    /// Flattens a nested outcome.
    ///
    /// `o.map_value(f).flatten()` is the same as `o.use_and_map(f)`.
    #[inline]
    pub fn flatten(self) -> Outcome<V, C> {
        self.use_and_map(|inner| inner)
    }
}

#[cfg(test)]
mod tests {
    use crate::failure::Failure;
    use crate::outcome::Outcome;
    use std::cell::Cell;

    fn reject(cause: &'static str) -> Outcome<String, &'static str> {
        Failure::new(cause).into()
    }

    #[test]
    fn test_use_and_keep_discards_inner_success_value() {
        let s: Outcome<i32, &str> = Outcome::Success(7);
        let kept = s.use_and_keep(|v| Outcome::Success(format!("inner {v}")));
        assert_eq!(kept, Outcome::Success(7));
    }

    #[test]
    fn test_use_and_keep_replaces_with_inner_failure() {
        let s: Outcome<i32, &str> = Outcome::Success(7);
        let replaced = s.use_and_keep(|_| reject("invalid"));
        assert_eq!(replaced, Outcome::Failure(Failure::new("invalid")));
    }

    #[test]
    fn test_use_and_keep_short_circuits() {
        let called = Cell::new(false);
        let f: Outcome<i32, &str> = Failure::new("first").into();
        let result = f.use_and_keep(|_| {
            called.set(true);
            reject("second")
        });

        assert_eq!(result, Outcome::Failure(Failure::new("first")));
        assert!(!called.get());
    }

    #[test]
    fn test_use_and_map_returns_inner_outcome() {
        let s: Outcome<i32, &str> = Outcome::Success(3);
        assert_eq!(
            s.clone().use_and_map(|v| Outcome::Success(v * 10)),
            Outcome::Success(30)
        );
        assert_eq!(
            s.use_and_map(|_| reject("nope")),
            Outcome::Failure(Failure::new("nope"))
        );
    }

    #[test]
    fn test_use_and_map_short_circuits_rest_of_chain() {
        let calls = Cell::new(0);
        let step = |v: i32| {
            calls.set(calls.get() + 1);
            Outcome::Success(v + 1)
        };

        let f: Outcome<i32, &str> = Failure::new("early").into();
        let result = f.use_and_map(step).use_and_map(step).use_and_map(step);

        assert_eq!(result, Outcome::Failure(Failure::new("early")));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_flatten() {
        let nested: Outcome<Outcome<i32, &str>, &str> = Outcome::Success(Outcome::Success(1));
        assert_eq!(nested.flatten(), Outcome::Success(1));

        let inner: Outcome<Outcome<i32, &str>, &str> =
            Outcome::Success(Failure::new("inner").into());
        assert_eq!(inner.flatten(), Outcome::Failure(Failure::new("inner")));

        let outer: Outcome<Outcome<i32, &str>, &str> = Failure::new("outer").into();
        assert_eq!(outer.flatten(), Outcome::Failure(Failure::new("outer")));
    }
}
