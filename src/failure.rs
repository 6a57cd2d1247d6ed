//! The failure side of an [`Outcome`](crate::Outcome).
//!
//! A [`Failure`] is a typed cause, optionally enriched with the [`Exception`] it was
//! captured from and a lazily produced human readable message. Both extras are
//! shared handles, so cloning a failure never clones the diagnostics.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

type MessageFn = dyn Fn() -> Option<String> + Send + Sync;

/// A captured, recoverable error.
///
/// `Exception` is a cheap, clonable handle to a type-erased error. It is owned by the
/// [`Failure`] it was captured into and is never mutated. Two handles are equal only
/// when they point at the same captured error.
#[derive(Clone)]
pub struct Exception(Arc<dyn Error + Send + Sync + 'static>);

impl Exception {
    /// Wraps an error value.
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Exception(Arc::new(error))
    }

    /// Returns a reference to the captured error if it is of type `E`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome::Exception;
    ///
    /// let parse = "x".parse::<i32>().unwrap_err();
    /// let exception = Exception::new(parse);
    /// assert!(exception.downcast_ref::<std::num::ParseIntError>().is_some());
    /// assert!(exception.downcast_ref::<std::io::Error>().is_none());
    /// ```
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        self.0.downcast_ref::<E>()
    }

    /// Returns `true` if both handles share the same captured error.
    #[inline]
    pub fn ptr_eq(&self, other: &Exception) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Box<dyn Error + Send + Sync + 'static>> for Exception {
    fn from(error: Box<dyn Error + Send + Sync + 'static>) -> Self {
        Exception(Arc::from(error))
    }
}

impl fmt::Debug for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl Error for Exception {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

impl PartialEq for Exception {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Exception {}

/// A failed [`Outcome`](crate::Outcome) with a type-safe cause.
///
/// The cause `C` is chosen by the caller, typically an enum so failure handling can be
/// matched exhaustively. `exception` is present only when the failure was captured from
/// an error; `message` is evaluated on demand by whoever reports the failure.
///
/// # Examples
///
/// ```rust
/// use outcome::Failure;
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum LoadError {
///     NotFound,
/// }
///
/// let failure = Failure::new(LoadError::NotFound).with_message(|| "user 7 does not exist");
/// assert_eq!(failure.cause(), &LoadError::NotFound);
/// assert_eq!(failure.message().as_deref(), Some("user 7 does not exist"));
/// assert!(failure.exception().is_none());
/// ```
#[derive(Clone)]
pub struct Failure<C> {
    cause: C,
    exception: Option<Exception>,
    message: Option<Arc<MessageFn>>,
}

impl<C> Failure<C> {
    /// Creates a failure without exception or message.
    pub fn new(cause: C) -> Self {
        Failure {
            cause,
            exception: None,
            message: None,
        }
    }

    /// Attaches the exception this failure was captured from.
    pub fn with_exception(mut self, exception: impl Into<Exception>) -> Self {
        self.exception = Some(exception.into());
        self
    }

    /// Attaches a lazily produced message.
    ///
    /// The producer may run any number of times, so it must be free of side effects.
    pub fn with_message<F, M>(mut self, message: F) -> Self
    where
        F: Fn() -> M + Send + Sync + 'static,
        M: Into<String>,
    {
        self.message = Some(Arc::new(move || Some(message().into())));
        self
    }

    /// Attaches a message producer that may decline to produce a message.
    pub fn with_optional_message<F>(mut self, message: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        self.message = Some(Arc::new(message));
        self
    }

    pub fn cause(&self) -> &C {
        &self.cause
    }

    pub fn into_cause(self) -> C {
        self.cause
    }

    pub fn exception(&self) -> Option<&Exception> {
        self.exception.as_ref()
    }

    /// Evaluates the message producer, if any.
    pub fn message(&self) -> Option<String> {
        self.message.as_ref().and_then(|message| message())
    }

    /// Returns `true` if a message producer is attached, without evaluating it.
    pub fn has_message(&self) -> bool {
        self.message.is_some()
    }
}

impl<C: fmt::Debug> fmt::Debug for Failure<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("cause", &self.cause)
            .field("exception", &self.exception)
            .field("message", &self.message())
            .finish()
    }
}

impl<C: PartialEq> PartialEq for Failure<C> {
    fn eq(&self, other: &Self) -> bool {
        let same_message = match (&self.message, &other.message) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.cause == other.cause && self.exception == other.exception && same_message
    }
}

impl<C: Eq> Eq for Failure<C> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, thiserror::Error)]
    #[error("disk on fire")]
    struct DiskError;

    #[test]
    fn test_new_has_no_extras() {
        let failure = Failure::new(3_u8);
        assert_eq!(failure.cause(), &3);
        assert!(failure.exception().is_none());
        assert!(failure.message().is_none());
        assert!(!failure.has_message());
    }

    #[test]
    fn test_message_is_lazy() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let failure = Failure::new(()).with_message(|| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            "late"
        });

        assert_eq!(CALLS.load(Ordering::SeqCst), 0);
        assert!(failure.has_message());
        assert_eq!(failure.message().as_deref(), Some("late"));
        assert_eq!(failure.message().as_deref(), Some("late"));
        assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_optional_message_may_decline() {
        let failure = Failure::new(()).with_optional_message(|| None);
        assert!(failure.has_message());
        assert_eq!(failure.message(), None);
    }

    #[test]
    fn test_exception_is_shared_on_clone() {
        let failure = Failure::new("io").with_exception(Exception::new(DiskError));
        let copy = failure.clone();

        let (a, b) = (failure.exception(), copy.exception());
        assert!(a.zip(b).is_some_and(|(a, b)| a.ptr_eq(b)));
        assert_eq!(failure, copy);
    }

    #[test]
    fn test_equality_uses_exception_identity() {
        let a = Failure::new("io").with_exception(Exception::new(DiskError));
        let b = Failure::new("io").with_exception(Exception::new(DiskError));
        assert_ne!(a, b);
        assert_eq!(Failure::new("io"), Failure::new("io"));
        assert_ne!(Failure::new("io"), Failure::new("net"));
    }

    #[test]
    fn test_exception_display_and_downcast() {
        let exception = Exception::new(DiskError);
        assert_eq!(exception.to_string(), "disk on fire");
        assert!(exception.downcast_ref::<DiskError>().is_some());
    }

    #[test]
    fn test_debug_evaluates_message() {
        let failure = Failure::new(1).with_message(|| "boom");
        let dbg = format!("{failure:?}");
        assert!(dbg.contains("Failure"));
        assert!(dbg.contains("boom"));
    }
}
