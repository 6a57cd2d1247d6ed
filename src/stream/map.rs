use crate::outcome::Outcome;
use futures::ready;
use futures::stream::{Stream, TryStream};
use pin_project_lite::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

pin_project! {
    /// Stream for [`map_value`](super::OutcomeStreamExt::map_value).
    #[must_use = "streams do nothing unless polled"]
    pub struct MapValue<S, F, Fut> {
        #[pin]
        stream: S,
        f: F,
        #[pin]
        pending: Option<Fut>,
    }
}

impl<S, F, Fut> MapValue<S, F, Fut> {
    pub(super) fn new(stream: S, f: F) -> Self {
        MapValue {
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

impl<S, F, Fut, V, C, R> Stream for MapValue<S, F, Fut>
where
    S: TryStream<Ok = Outcome<V, C>>,
    F: FnMut(V) -> Fut,
    Fut: Future<Output = R>,
{
    type Item = Result<Outcome<R, C>, S::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            if let Some(pending) = this.pending.as_mut().as_pin_mut() {
                let value = ready!(pending.poll(cx));
                this.pending.set(None);
                return Poll::Ready(Some(Ok(Outcome::Success(value))));
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
