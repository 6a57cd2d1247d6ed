use crate::failure::Failure;
use crate::outcome::Outcome;
use futures::ready;
use futures::stream::{Stream, TryStream};
use pin_project_lite::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

pin_project! {
    /// Stream for [`on_success`](super::OutcomeStreamExt::on_success).
    #[must_use = "streams do nothing unless polled"]
    pub struct OnSuccess<S, F, Fut>
    where
        S: TryStream,
    {
        #[pin]
        stream: S,
        f: F,
        #[pin]
        pending: Option<Fut>,
        held: Option<S::Ok>,
    }
}

impl<S: TryStream, F, Fut> OnSuccess<S, F, Fut> {
    pub(super) fn new(stream: S, f: F) -> Self {
        OnSuccess {
            stream,
            f,
            pending: None,
            held: None,
        }
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// Drops the in-flight callback and its element, if any.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S, F, Fut, V, C> Stream for OnSuccess<S, F, Fut>
where
    S: TryStream<Ok = Outcome<V, C>>,
    F: FnMut(&V) -> Fut,
    Fut: Future<Output = ()>,
{
    type Item = Result<Outcome<V, C>, S::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            if let Some(pending) = this.pending.as_mut().as_pin_mut() {
                ready!(pending.poll(cx));
                this.pending.set(None);
                if let Some(outcome) = this.held.take() {
                    return Poll::Ready(Some(Ok(outcome)));
                }
            }

            match ready!(this.stream.as_mut().try_poll_next(cx)) {
                Some(Ok(Outcome::Success(value))) => {
                    this.pending.set(Some((this.f)(&value)));
                    *this.held = Some(Outcome::Success(value));
                }
                Some(Ok(failure)) => return Poll::Ready(Some(Ok(failure))),
                Some(Err(error)) => return Poll::Ready(Some(Err(error))),
                None => return Poll::Ready(None),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        super::in_flight_hint(self.stream.size_hint(), self.held.is_some())
    }
}

pin_project! {
    /// Stream for [`on_failure`](super::OutcomeStreamExt::on_failure).
    #[must_use = "streams do nothing unless polled"]
    pub struct OnFailure<S, F, Fut>
    where
        S: TryStream,
    {
        #[pin]
        stream: S,
        f: F,
        #[pin]
        pending: Option<Fut>,
        held: Option<S::Ok>,
    }
}

impl<S: TryStream, F, Fut> OnFailure<S, F, Fut> {
    pub(super) fn new(stream: S, f: F) -> Self {
        OnFailure {
            stream,
            f,
            pending: None,
            held: None,
        }
    }

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

impl<S, F, Fut, V, C> Stream for OnFailure<S, F, Fut>
where
    S: TryStream<Ok = Outcome<V, C>>,
    F: FnMut(&Failure<C>) -> Fut,
    Fut: Future<Output = ()>,
{
    type Item = Result<Outcome<V, C>, S::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            if let Some(pending) = this.pending.as_mut().as_pin_mut() {
                ready!(pending.poll(cx));
                this.pending.set(None);
                if let Some(outcome) = this.held.take() {
                    return Poll::Ready(Some(Ok(outcome)));
                }
            }

            match ready!(this.stream.as_mut().try_poll_next(cx)) {
                Some(Ok(Outcome::Failure(failure))) => {
                    this.pending.set(Some((this.f)(&failure)));
                    *this.held = Some(Outcome::Failure(failure));
                }
                Some(Ok(success)) => return Poll::Ready(Some(Ok(success))),
                Some(Err(error)) => return Poll::Ready(Some(Err(error))),
                None => return Poll::Ready(None),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        super::in_flight_hint(self.stream.size_hint(), self.held.is_some())
    }
}
