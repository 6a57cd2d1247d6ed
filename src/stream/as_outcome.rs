//! Entry points into the outcome stream algebra.

use crate::capture::{attach, intercept, ExceptionHandler};
use crate::failure::{Exception, Failure};
use crate::outcome::Outcome;
use crate::raise::{Interrupt, Raised};
use futures::future::{self, Ready};
use futures::ready;
use futures::stream::{Stream, TryStream};
use pin_project_lite::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::debug;

/// Asynchronous conversion of a caught exception into a failure.
///
/// Implemented for every `FnMut(Exception) -> impl Future<Output = Failure<C>>` and for
/// [`WithHandler`].
pub trait Catch<C> {
    type Future: Future<Output = Failure<C>>;

    fn catch(&mut self, exception: Exception) -> Self::Future;
}

impl<C, F, Fut> Catch<C> for F
where
    F: FnMut(Exception) -> Fut,
    Fut: Future<Output = Failure<C>>,
{
    type Future = Fut;

    fn catch(&mut self, exception: Exception) -> Fut {
        self(exception)
    }
}

/// Adapts a synchronous [`ExceptionHandler`] to [`Catch`].
#[derive(Debug, Clone)]
pub struct WithHandler<H>(H);

impl<C, H> Catch<C> for WithHandler<H>
where
    H: ExceptionHandler<C>,
{
    type Future = Ready<Failure<C>>;

    fn catch(&mut self, exception: Exception) -> Self::Future {
        future::ready(self.0.handle(exception))
    }
}

pin_project! {
    /// Stream for [`as_outcome`](AsOutcomeExt::as_outcome) and
    /// [`as_outcome_with`](AsOutcomeExt::as_outcome_with).
    #[must_use = "streams do nothing unless polled"]
    pub struct AsOutcome<S, K, Fut> {
        #[pin]
        stream: Option<S>,
        catch: K,
        #[pin]
        pending: Option<Fut>,
        exception: Option<Exception>,
    }
}

impl<S, K, Fut> AsOutcome<S, K, Fut> {
    fn new(stream: S, catch: K) -> Self {
        AsOutcome {
            stream: Some(stream),
            catch,
            pending: None,
            exception: None,
        }
    }

    /// Returns the upstream, unless it was already dropped after an error.
    pub fn get_ref(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut S> {
        self.stream.as_mut()
    }

    pub fn into_inner(self) -> Option<S> {
        self.stream
    }
}

impl<S, K, Fut, C> Stream for AsOutcome<S, K, Fut>
where
    S: TryStream,
    S::Error: Into<Raised>,
    K: Catch<C, Future = Fut>,
    Fut: Future<Output = Failure<C>>,
{
    type Item = Result<Outcome<S::Ok, C>, Interrupt>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            if let Some(pending) = this.pending.as_mut().as_pin_mut() {
                let failure = ready!(pending.poll(cx));
                this.pending.set(None);
                let failure = match this.exception.take() {
                    Some(exception) => attach(failure, exception),
                    None => failure,
                };
                return Poll::Ready(Some(Ok(Outcome::Failure(failure))));
            }

            let Some(stream) = this.stream.as_mut().as_pin_mut() else {
                return Poll::Ready(None);
            };
            match ready!(stream.try_poll_next(cx)) {
                Some(Ok(value)) => return Poll::Ready(Some(Ok(Outcome::Success(value)))),
                Some(Err(error)) => {
                    this.stream.set(None);
                    match intercept(error.into()) {
                        Ok(exception) => {
                            debug!("upstream failed, terminating after converted failure");
                            this.pending.set(Some(this.catch.catch(exception.clone())));
                            *this.exception = Some(exception);
                        }
                        Err(interrupt) => {
                            debug!("upstream interrupted, terminating");
                            return Poll::Ready(Some(Err(interrupt)));
                        }
                    }
                }
                None => {
                    this.stream.set(None);
                    return Poll::Ready(None);
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = usize::from(self.pending.is_some());
        match &self.stream {
            Some(stream) => {
                let (_, upper) = stream.size_hint();
                // an error may end the stream early, or add one converted failure
                (pending, upper.and_then(|n| n.checked_add(pending)))
            }
            None => (pending, Some(pending)),
        }
    }
}

/// Conversion of fallible streams into outcome streams.
pub trait AsOutcomeExt: TryStream + Sized {
    /// Wraps every upstream value into `Success`.
    ///
    /// The first upstream error ends the stream. A recoverable error is passed to
    /// `catch` and the failure it resolves to is emitted as the last element; a
    /// cancellation or fatal error is emitted as `Err(Interrupt)` instead and `catch`
    /// is not called. The upstream is dropped as soon as the error is seen.
    fn as_outcome<C, F, Fut>(self, catch: F) -> AsOutcome<Self, F, Fut>
    where
        Self::Error: Into<Raised>,
        F: FnMut(Exception) -> Fut,
        Fut: Future<Output = Failure<C>>,
    {
        AsOutcome::new(self, catch)
    }

    /// Like [`as_outcome`](AsOutcomeExt::as_outcome), with a synchronous [`ExceptionHandler`].
    fn as_outcome_with<C, H>(self, handler: H) -> AsOutcome<Self, WithHandler<H>, Ready<Failure<C>>>
    where
        Self::Error: Into<Raised>,
        H: ExceptionHandler<C>,
    {
        AsOutcome::new(self, WithHandler(handler))
    }
}

impl<S> AsOutcomeExt for S where S: TryStream {}

pin_project! {
    /// Stream for [`outcomes`].
    #[must_use = "streams do nothing unless polled"]
    pub struct Outcomes<S> {
        #[pin]
        stream: S,
    }
}

/// Lifts a stream of plain outcomes into an outcome stream that never raises.
pub fn outcomes<S, V, C>(stream: S) -> Outcomes<S>
where
    S: Stream<Item = Outcome<V, C>>,
{
    Outcomes { stream }
}

impl<S> Outcomes<S> {
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S, V, C> Stream for Outcomes<S>
where
    S: Stream<Item = Outcome<V, C>>,
{
    type Item = Result<Outcome<V, C>, Interrupt>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().stream.poll_next(cx).map(|item| item.map(Ok))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}
