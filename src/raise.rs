//! Classification of errors raised by fallible blocks.
//!
//! Anything a block raises is turned into a [`Raised`] value, which falls into exactly
//! one of three kinds:
//!
//! - **Cancellation** ([`Cancelled`]): the surrounding task is being torn down.
//! - **Fatal** ([`Fatal`]): an environment error that must not be recovered from.
//! - **Recoverable** ([`Exception`]): may become a [`Failure`](crate::Failure).
//!
//! Only the last kind is ever handed to a user supplied handler. The other two are
//! re-raised as an [`Interrupt`], which callers propagate with `?`.
//!
//! Panics are not errors in this sense and are never intercepted.

use crate::failure::Exception;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// Cooperative cancellation signal.
///
/// Raise it from a block to unwind the enclosing task; it is never converted into a
/// failure, no matter how deeply it was wrapped into [`Raised`] or [`Interrupt`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cancelled: {reason}")]
pub struct Cancelled {
    reason: Cow<'static, str>,
}

impl Cancelled {
    pub fn new() -> Self {
        Cancelled {
            reason: Cow::Borrowed("task cancelled"),
        }
    }

    pub fn with_reason(reason: impl Into<Cow<'static, str>>) -> Self {
        Cancelled {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Default for Cancelled {
    fn default() -> Self {
        Cancelled::new()
    }
}

/// An unrecoverable environment error, such as resource exhaustion.
#[derive(Debug, Clone, thiserror::Error)]
#[error("fatal: {source}")]
pub struct Fatal {
    source: Exception,
}

impl Fatal {
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Fatal {
            source: Exception::new(error),
        }
    }

    /// The error that made the condition fatal.
    pub fn error(&self) -> &Exception {
        &self.source
    }
}

/// A raised error that must bypass every failure handler.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Interrupt {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error(transparent)]
    Fatal(#[from] Fatal),
}

impl Interrupt {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Interrupt::Cancelled(_))
    }
}

/// An error raised by a fallible block, classified by kind.
///
/// Every `std::error::Error` converts into `Raised`, so blocks can use `?` freely.
/// The conversion recognises [`Cancelled`], [`Fatal`], [`Interrupt`] and
/// [`Exception`] by type; everything else is a recoverable exception.
///
/// # Examples
///
/// ```rust
/// use outcome::{Cancelled, Raised};
///
/// let raised = Raised::from(Cancelled::new());
/// assert!(matches!(raised, Raised::Cancelled(_)));
///
/// let raised = Raised::from("x".parse::<i32>().unwrap_err());
/// assert!(matches!(raised, Raised::Exception(_)));
/// ```
#[derive(Debug, Clone)]
pub enum Raised {
    Cancelled(Cancelled),
    Fatal(Fatal),
    Exception(Exception),
}

impl Raised {
    /// Splits a raised error into a recoverable exception or an interrupt to re-raise.
    ///
    /// This is the only place where errors are classified.
    ///
    /// An [`Exception`] that wraps a [`Cancelled`], [`Fatal`] or [`Interrupt`] is still an
    /// interrupt.
    pub fn classify(self) -> Result<Exception, Interrupt> {
        match self {
            Raised::Exception(exception) => match wrapped_interrupt(&exception) {
                Some(interrupt) => Err(interrupt),
                None => Ok(exception),
            },
            Raised::Cancelled(cancelled) => Err(Interrupt::Cancelled(cancelled)),
            Raised::Fatal(fatal) => Err(Interrupt::Fatal(fatal)),
        }
    }
}

fn wrapped_interrupt(exception: &Exception) -> Option<Interrupt> {
    if let Some(interrupt) = exception.downcast_ref::<Interrupt>() {
        return Some(interrupt.clone());
    }
    if let Some(cancelled) = exception.downcast_ref::<Cancelled>() {
        return Some(Interrupt::Cancelled(cancelled.clone()));
    }
    exception
        .downcast_ref::<Fatal>()
        .map(|fatal| Interrupt::Fatal(fatal.clone()))
}

impl<E> From<E> for Raised
where
    E: Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        let error: Box<dyn Error + Send + Sync + 'static> = Box::new(error);
        let error = match error.downcast::<Interrupt>() {
            Ok(interrupt) => {
                return match *interrupt {
                    Interrupt::Cancelled(cancelled) => Raised::Cancelled(cancelled),
                    Interrupt::Fatal(fatal) => Raised::Fatal(fatal),
                }
            }
            Err(error) => error,
        };
        let error = match error.downcast::<Cancelled>() {
            Ok(cancelled) => return Raised::Cancelled(*cancelled),
            Err(error) => error,
        };
        let error = match error.downcast::<Fatal>() {
            Ok(fatal) => return Raised::Fatal(*fatal),
            Err(error) => error,
        };
        let exception = match error.downcast::<Exception>() {
            Ok(exception) => *exception,
            Err(error) => Exception::from(error),
        };
        match wrapped_interrupt(&exception) {
            Some(Interrupt::Cancelled(cancelled)) => Raised::Cancelled(cancelled),
            Some(Interrupt::Fatal(fatal)) => Raised::Fatal(fatal),
            None => Raised::Exception(exception),
        }
    }
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raised::Cancelled(cancelled) => fmt::Display::fmt(cancelled, f),
            Raised::Fatal(fatal) => fmt::Display::fmt(fatal, f),
            Raised::Exception(exception) => fmt::Display::fmt(exception, f),
        }
    }
}
