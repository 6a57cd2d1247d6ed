use crate::outcome::Outcome;
use futures::ready;
use futures::stream::{Stream, TryStream};
use pin_project_lite::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

pin_project! {
    /// Stream for [`use_and_keep`](super::OutcomeStreamExt::use_and_keep).
    #[must_use = "streams do nothing unless polled"]
    pub struct UseAndKeep<S, F, Fut>
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

impl<S: TryStream, F, Fut> UseAndKeep<S, F, Fut> {
    pub(super) fn new(stream: S, f: F) -> Self {
        UseAndKeep {
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

impl<S, F, Fut, V, C, U> Stream for UseAndKeep<S, F, Fut>
where
    S: TryStream<Ok = Outcome<V, C>>,
    F: FnMut(&V) -> Fut,
    Fut: Future<Output = Outcome<U, C>>,
{
    type Item = Result<Outcome<V, C>, S::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            if let Some(pending) = this.pending.as_mut().as_pin_mut() {
                let step = ready!(pending.poll(cx));
                this.pending.set(None);
                let original = this.held.take();
                match step {
                    Outcome::Success(_) => {
                        if let Some(original) = original {
                            return Poll::Ready(Some(Ok(original)));
                        }
                    }
                    Outcome::Failure(failure) => {
                        return Poll::Ready(Some(Ok(Outcome::Failure(failure))))
                    }
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
    /// Stream for [`use_and_map`](super::OutcomeStreamExt::use_and_map).
    #[must_use = "streams do nothing unless polled"]
    pub struct UseAndMap<S, F, Fut> {
        #[pin]
        stream: S,
        f: F,
        #[pin]
        pending: Option<Fut>,
    }
}

impl<S, F, Fut> UseAndMap<S, F, Fut> {
    pub(super) fn new(stream: S, f: F) -> Self {
        UseAndMap {
            stream,
            f,
            pending: None,
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

impl<S, F, Fut, V, C, R> Stream for UseAndMap<S, F, Fut>
where
    S: TryStream<Ok = Outcome<V, C>>,
    F: FnMut(V) -> Fut,
    Fut: Future<Output = Outcome<R, C>>,
{
    type Item = Result<Outcome<R, C>, S::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            if let Some(pending) = this.pending.as_mut().as_pin_mut() {
                let outcome = ready!(pending.poll(cx));
                this.pending.set(None);
                return Poll::Ready(Some(Ok(outcome)));
            }

            match ready!(this.stream.as_mut().try_poll_next(cx)) {
                Some(Ok(Outcome::Success(value))) => this.pending.set(Some((this.f)(value))),
                Some(Ok(Outcome::Failure(failure))) => {
                    return Poll::Ready(Some(Ok(Outcome::Failure(failure))))
                }
                Some(Err(error)) => return Poll::Ready(Some(Err(error))),
                None => return Poll::Ready(None),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        super::in_flight_hint(self.stream.size_hint(), self.pending.is_some())
    }
}
