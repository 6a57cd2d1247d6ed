//! Building outcomes from fallible blocks.
//!
//! This module bridges `Result`-returning code into [`Outcome`]s. Recoverable errors
//! are handed to a caller supplied handler that turns them into a [`Failure`];
//! cancellation and fatal errors are re-raised as an [`Interrupt`] and never reach
//! the handler.

use crate::failure::{Exception, Failure};
use crate::outcome::Outcome;
use crate::raise::{Interrupt, Raised};
use std::future::Future;
use tracing::{debug, trace};

/// Converts caught exceptions into failures.
///
/// Implemented for every `Fn(Exception) -> Failure<C>`, so a plain closure works
/// wherever a handler is expected. Implement it on a type when the same conversion
/// is shared by many call sites.
///
/// # Examples
///
/// ```rust
/// use outcome::{Exception, ExceptionHandler, Failure, Outcome};
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Cause {
///     Parse,
/// }
///
/// struct ParseHandler;
///
/// impl ExceptionHandler<Cause> for ParseHandler {
///     fn handle(&self, _exception: Exception) -> Failure<Cause> {
///         Failure::new(Cause::Parse)
///     }
/// }
///
/// let parsed = Outcome::build_with(&ParseHandler, || Ok("12".parse::<i32>()?)).unwrap();
/// assert_eq!(parsed, Outcome::Success(12));
/// ```
pub trait ExceptionHandler<C> {
    /// Receives a caught exception and converts it into a failure.
    fn handle(&self, exception: Exception) -> Failure<C>;
}

impl<C, F> ExceptionHandler<C> for F
where
    F: Fn(Exception) -> Failure<C>,
{
    fn handle(&self, exception: Exception) -> Failure<C> {
        self(exception)
    }
}

/// Classifies a raised error, keeping only recoverable exceptions.
pub(crate) fn intercept(raised: Raised) -> Result<Exception, Interrupt> {
    match raised.classify() {
        Ok(exception) => {
            debug!(exception = %exception, "capturing exception as failure");
            Ok(exception)
        }
        Err(interrupt) => {
            trace!(interrupt = %interrupt, "re-raising interrupt");
            Err(interrupt)
        }
    }
}

/// Ensures a captured failure references the exception it was built from.
pub(crate) fn attach<C>(failure: Failure<C>, exception: Exception) -> Failure<C> {
    if failure.exception().is_some() {
        failure
    } else {
        failure.with_exception(exception)
    }
}

fn capture<C, F>(raised: Raised, catch: F) -> Result<Failure<C>, Interrupt>
where
    F: FnOnce(Exception) -> Failure<C>,
{
    let exception = intercept(raised)?;
    Ok(attach(catch(exception.clone()), exception))
}

impl<V, C> Outcome<V, C> {
    /// Runs `block` and wraps its value into `Success`.
    ///
    /// A recoverable error returned by `block` is passed to `catch`, and the failure it
    /// returns becomes the outcome. If that failure does not carry an exception, the
    /// caught one is attached. A [`Cancelled`](crate::Cancelled) or [`Fatal`](crate::Fatal)
    /// error is returned as `Err(Interrupt)` without consulting `catch`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome::{Cancelled, Failure, Interrupt, Outcome};
    ///
    /// let ok = Outcome::build(|_| Failure::new("parse"), || Ok("42".parse::<i32>()?));
    /// assert_eq!(ok.unwrap(), Outcome::Success(42));
    ///
    /// let failed = Outcome::build(|_| Failure::new("parse"), || Ok("x".parse::<i32>()?));
    /// let failure = failed.unwrap().failure().unwrap();
    /// assert_eq!(failure.cause(), &"parse");
    /// assert!(failure.exception().is_some());
    ///
    /// let cancelled: Result<Outcome<i32, &str>, Interrupt> =
    ///     Outcome::build(|_| Failure::new("parse"), || Err(Cancelled::new().into()));
    /// assert!(cancelled.unwrap_err().is_cancelled());
    /// ```
    pub fn build<F, B>(catch: F, block: B) -> Result<Self, Interrupt>
    where
        F: FnOnce(Exception) -> Failure<C>,
        B: FnOnce() -> Result<V, Raised>,
    {
        match block() {
            Ok(value) => Ok(Outcome::Success(value)),
            Err(raised) => capture(raised, catch).map(Outcome::Failure),
        }
    }

    /// Like [`build`](Outcome::build), with the conversion supplied as an [`ExceptionHandler`].
    pub fn build_with<H, B>(handler: &H, block: B) -> Result<Self, Interrupt>
    where
        H: ExceptionHandler<C> + ?Sized,
        B: FnOnce() -> Result<V, Raised>,
    {
        Self::build(|exception| handler.handle(exception), block)
    }

    /// Async version of [`build`](Outcome::build).
    ///
    /// Awaits `future` and classifies its error exactly like `build` does. Dropping the
    /// returned future drops `future` as well; nothing is reported to `catch`.
    pub async fn build_async<F, Fut>(catch: F, future: Fut) -> Result<Self, Interrupt>
    where
        F: FnOnce(Exception) -> Failure<C>,
        Fut: Future<Output = Result<V, Raised>>,
    {
        match future.await {
            Ok(value) => Ok(Outcome::Success(value)),
            Err(raised) => capture(raised, catch).map(Outcome::Failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raise::{Cancelled, Fatal};
    use futures::executor::block_on;
    use std::cell::Cell;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Cause {
        Io,
        Parse,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("out of memory")]
    struct OutOfMemory;

    fn io_failure(_: Exception) -> Failure<Cause> {
        Failure::new(Cause::Io)
    }

    #[test]
    fn test_build_success() {
        let outcome = Outcome::build(io_failure, || Ok(42));
        assert_eq!(outcome.ok(), Some(Outcome::Success(42)));
    }

    #[test]
    fn test_build_recoverable_error_becomes_failure() {
        let outcome = Outcome::build(
            |_| Failure::new(Cause::Parse),
            || Ok("nope".parse::<u32>()?),
        );

        let failure = outcome.ok().and_then(Outcome::failure);
        let failure = failure.as_ref();
        assert_eq!(failure.map(Failure::cause), Some(&Cause::Parse));
        let exception = failure.and_then(Failure::exception);
        assert!(exception.is_some_and(|e| e.downcast_ref::<std::num::ParseIntError>().is_some()));
    }

    #[test]
    fn test_build_keeps_exception_chosen_by_handler() {
        let replacement = Exception::new(OutOfMemory);
        let outcome = Outcome::build(
            |_| Failure::new(Cause::Io).with_exception(replacement.clone()),
            || -> Result<(), Raised> { Err(std::fmt::Error.into()) },
        );

        let failure = outcome.ok().and_then(Outcome::failure);
        let exception = failure.as_ref().and_then(Failure::exception);
        assert!(exception.is_some_and(|e| e.ptr_eq(&replacement)));
    }

    #[test]
    fn test_build_reraises_cancellation() {
        let called = Cell::new(false);
        let outcome: Result<Outcome<i32, Cause>, Interrupt> = Outcome::build(
            |e| {
                called.set(true);
                io_failure(e)
            },
            || Err(Cancelled::new().into()),
        );

        assert!(matches!(outcome, Err(Interrupt::Cancelled(_))));
        assert!(!called.get());
    }

    #[test]
    fn test_build_reraises_fatal() {
        let called = Cell::new(false);
        let outcome: Result<Outcome<i32, Cause>, Interrupt> = Outcome::build(
            |e| {
                called.set(true);
                io_failure(e)
            },
            || Err(Fatal::new(OutOfMemory).into()),
        );

        assert!(matches!(outcome, Err(Interrupt::Fatal(_))));
        assert!(!called.get());
    }

    #[test]
    fn test_build_reraises_cancellation_wrapped_in_exception() {
        let called = Cell::new(false);
        let outcome: Result<Outcome<i32, Cause>, Interrupt> = Outcome::build(
            |e| {
                called.set(true);
                io_failure(e)
            },
            || Err(Exception::new(Cancelled::new()).into()),
        );

        assert!(matches!(outcome, Err(Interrupt::Cancelled(_))));
        assert!(!called.get());
    }

    #[test]
    fn test_nested_build_propagates_interrupt_with_question_mark() {
        let outer: Result<Outcome<i32, Cause>, Interrupt> = Outcome::build(io_failure, || {
            let inner: Outcome<i32, Cause> =
                Outcome::build(io_failure, || Err(Cancelled::with_reason("inner").into()))?;
            Ok(inner.value().unwrap_or_default())
        });

        match outer {
            Err(Interrupt::Cancelled(c)) => assert_eq!(c.reason(), "inner"),
            other => panic!("expected cancellation, got {other:?}"),
        }
    }

    #[test]
    fn test_build_with_handler_struct() {
        struct Handler;
        impl ExceptionHandler<Cause> for Handler {
            fn handle(&self, _: Exception) -> Failure<Cause> {
                Failure::new(Cause::Parse)
            }
        }

        let outcome = Outcome::build_with(&Handler, || Ok("x".parse::<u8>()?));
        let cause = outcome.ok().and_then(Outcome::failure).map(Failure::into_cause);
        assert_eq!(cause, Some(Cause::Parse));
    }

    #[test]
    fn test_build_with_closure_handler() {
        let handler = |_: Exception| Failure::new(Cause::Io);
        let outcome = Outcome::build_with(&handler, || Ok(1));
        assert_eq!(outcome.ok(), Some(Outcome::Success(1)));
    }

    #[test]
    fn test_build_async() {
        let ok = block_on(Outcome::build_async(io_failure, async { Ok::<_, Raised>(5) }));
        assert_eq!(ok.ok(), Some(Outcome::Success(5)));

        let failed = block_on(Outcome::build_async(io_failure, async {
            Err::<i32, _>(Raised::from(std::fmt::Error))
        }));
        let cause = failed.ok().and_then(Outcome::failure).map(Failure::into_cause);
        assert_eq!(cause, Some(Cause::Io));

        let cancelled = block_on(Outcome::build_async(io_failure, async {
            Err::<i32, _>(Raised::from(Cancelled::new()))
        }));
        assert!(cancelled.is_err_and(|i| i.is_cancelled()));
    }
}
