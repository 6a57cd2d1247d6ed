//! Terminal stream operators: every element leaves the outcome channel.

use crate::failure::Failure;
use crate::outcome::Outcome;
use futures::ready;
use futures::stream::{Stream, TryStream};
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

pin_project! {
    /// Stream for [`get`](super::OutcomeStreamExt::get) and
    /// [`values`](super::OutcomeStreamExt::values).
    #[must_use = "streams do nothing unless polled"]
    pub struct Get<S, F, St> {
        #[pin]
        stream: S,
        f: F,
        #[pin]
        recovery: Option<St>,
    }
}

impl<S, F, St> Get<S, F, St> {
    pub(super) fn new(stream: S, f: F) -> Self {
        Get {
            stream,
            f,
            recovery: None,
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

impl<S, F, St, V, C, R> Stream for Get<S, F, St>
where
    S: TryStream<Ok = Outcome<V, C>>,
    V: Into<R>,
    F: FnMut(Failure<C>) -> St,
    St: Stream<Item = R>,
{
    type Item = Result<R, S::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            // replacements for a failure are drained before the next upstream element
            if let Some(recovery) = this.recovery.as_mut().as_pin_mut() {
                match ready!(recovery.poll_next(cx)) {
                    Some(replacement) => return Poll::Ready(Some(Ok(replacement))),
                    None => this.recovery.set(None),
                }
            }

            match ready!(this.stream.as_mut().try_poll_next(cx)) {
                Some(Ok(Outcome::Success(value))) => return Poll::Ready(Some(Ok(value.into()))),
                Some(Ok(Outcome::Failure(failure))) => {
                    this.recovery.set(Some((this.f)(failure)))
                }
                Some(Err(error)) => return Poll::Ready(Some(Err(error))),
                None => return Poll::Ready(None),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, _) = match &self.recovery {
            Some(recovery) => recovery.size_hint(),
            None => (0, Some(0)),
        };
        (lower, None)
    }
}

pin_project! {
    /// Stream for [`try_get`](super::OutcomeStreamExt::try_get).
    #[must_use = "streams do nothing unless polled"]
    pub struct TryGet<S, F, St> {
        #[pin]
        stream: S,
        f: F,
        #[pin]
        recovery: Option<St>,
    }
}

impl<S, F, St> TryGet<S, F, St> {
    pub(super) fn new(stream: S, f: F) -> Self {
        TryGet {
            stream,
            f,
            recovery: None,
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

impl<S, F, St, V, C, R> Stream for TryGet<S, F, St>
where
    S: TryStream<Ok = Outcome<V, C>>,
    V: Into<R>,
    F: FnMut(Failure<C>) -> St,
    St: TryStream<Ok = R, Error = S::Error>,
{
    type Item = Result<R, S::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            if let Some(recovery) = this.recovery.as_mut().as_pin_mut() {
                match ready!(recovery.try_poll_next(cx)) {
                    Some(item) => return Poll::Ready(Some(item)),
                    None => this.recovery.set(None),
                }
            }

            match ready!(this.stream.as_mut().try_poll_next(cx)) {
                Some(Ok(Outcome::Success(value))) => return Poll::Ready(Some(Ok(value.into()))),
                Some(Ok(Outcome::Failure(failure))) => {
                    this.recovery.set(Some((this.f)(failure)))
                }
                Some(Err(error)) => return Poll::Ready(Some(Err(error))),
                None => return Poll::Ready(None),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, _) = match &self.recovery {
            Some(recovery) => recovery.size_hint(),
            None => (0, Some(0)),
        };
        (lower, None)
    }
}

/// Per-element conversion applied by [`Resolve`].
pub trait Resolver<V, C> {
    type Output;

    fn resolve(&mut self, outcome: Outcome<V, C>) -> Self::Output;
}

pin_project! {
    /// Stream that converts every outcome with a [`Resolver`], one output per element.
    #[must_use = "streams do nothing unless polled"]
    pub struct Resolve<S, M> {
        #[pin]
        stream: S,
        resolver: M,
    }
}

impl<S, M> Resolve<S, M> {
    pub(super) fn new(stream: S, resolver: M) -> Self {
        Resolve { stream, resolver }
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

impl<S, M, V, C> Stream for Resolve<S, M>
where
    S: TryStream<Ok = Outcome<V, C>>,
    M: Resolver<V, C>,
{
    type Item = Result<M::Output, S::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let item = ready!(this.stream.try_poll_next(cx));
        let resolver = this.resolver;
        Poll::Ready(item.map(|item| item.map(|outcome| resolver.resolve(outcome))))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}

/// Resolver for [`drop_value`](super::OutcomeStreamExt::drop_value).
#[derive(Debug, Clone, Copy, Default)]
pub struct DropValues;

impl<V, C> Resolver<V, C> for DropValues {
    type Output = Outcome<(), C>;

    fn resolve(&mut self, outcome: Outcome<V, C>) -> Self::Output {
        outcome.drop_value()
    }
}

/// Resolver for [`get_or_else`](super::OutcomeStreamExt::get_or_else).
#[derive(Debug, Clone)]
pub struct OrElse<F> {
    on_failure: F,
}

impl<F> OrElse<F> {
    pub(super) fn new(on_failure: F) -> Self {
        OrElse { on_failure }
    }
}

impl<V, C, R, F> Resolver<V, C> for OrElse<F>
where
    V: Into<R>,
    F: FnMut(Failure<C>) -> R,
{
    type Output = R;

    fn resolve(&mut self, outcome: Outcome<V, C>) -> R {
        outcome.use_with(Into::into, &mut self.on_failure)
    }
}

/// Resolver for [`get_with`](super::OutcomeStreamExt::get_with).
#[derive(Debug, Clone)]
pub struct With<S, F> {
    on_success: S,
    on_failure: F,
}

impl<S, F> With<S, F> {
    pub(super) fn new(on_success: S, on_failure: F) -> Self {
        With {
            on_success,
            on_failure,
        }
    }
}

impl<V, C, R, S, F> Resolver<V, C> for With<S, F>
where
    S: FnMut(V) -> R,
    F: FnMut(Failure<C>) -> R,
{
    type Output = R;

    fn resolve(&mut self, outcome: Outcome<V, C>) -> R {
        outcome.use_with(&mut self.on_success, &mut self.on_failure)
    }
}

/// Resolver for [`get_or_none`](super::OutcomeStreamExt::get_or_none).
#[derive(Debug, Clone)]
pub struct OrNone<F> {
    on_failure: F,
}

impl<F> OrNone<F> {
    pub(super) fn new(on_failure: F) -> Self {
        OrNone { on_failure }
    }
}

impl<V, C, F> Resolver<V, C> for OrNone<F>
where
    F: FnMut(Failure<C>),
{
    type Output = Option<V>;

    fn resolve(&mut self, outcome: Outcome<V, C>) -> Option<V> {
        outcome.use_or_none(&mut self.on_failure)
    }
}

/// Resolver for [`get_map_or_none`](super::OutcomeStreamExt::get_map_or_none).
#[derive(Debug, Clone)]
pub struct MapOrNone<S, F> {
    on_success: S,
    on_failure: F,
}

impl<S, F> MapOrNone<S, F> {
    pub(super) fn new(on_success: S, on_failure: F) -> Self {
        MapOrNone {
            on_success,
            on_failure,
        }
    }
}

impl<V, C, R, S, F> Resolver<V, C> for MapOrNone<S, F>
where
    S: FnMut(V) -> R,
    F: FnMut(Failure<C>),
{
    type Output = Option<R>;

    fn resolve(&mut self, outcome: Outcome<V, C>) -> Option<R> {
        outcome.use_map_or_none(&mut self.on_success, &mut self.on_failure)
    }
}

#[cfg(test)]
mod tests {
    use crate::failure::Failure;
    use crate::outcome::Outcome;
    use crate::raise::{Cancelled, Interrupt};
    use crate::stream::OutcomeStreamExt;
    use futures::executor::block_on;
    use futures::stream::{self, Stream, StreamExt, TryStreamExt};
    use std::cell::RefCell;

    type Item = Result<Outcome<i32, &'static str>, Interrupt>;

    fn source() -> impl Stream<Item = Item> {
        stream::iter(vec![
            Ok(Outcome::Success(1)),
            Ok(Failure::new("lost").into()),
            Ok(Outcome::Success(2)),
        ])
    }

    #[test]
    fn test_get_emits_every_replacement_in_order() {
        let values: Vec<i32> = block_on(
            source()
                .get(|_| stream::iter(vec![10, 20]))
                .try_collect(),
        )
        .unwrap();
        assert_eq!(values, vec![1, 10, 20, 2]);
    }

    #[test]
    fn test_get_with_empty_replacement_skips_failure() {
        let values: Vec<i32> =
            block_on(source().get(|_| stream::empty::<i32>()).try_collect()).unwrap();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_get_widens_value_type() {
        let values: Vec<i64> = block_on(
            source()
                .get(|_| stream::once(async { -1_i64 }))
                .try_collect(),
        )
        .unwrap();
        assert_eq!(values, vec![1, -1, 2]);
    }

    #[test]
    fn test_try_get_escalates_through_error_channel() {
        let items: Vec<_> = block_on(
            source()
                .try_get(|f| {
                    let escalated = Cancelled::with_reason(format!("gave up on {}", f.cause()));
                    stream::iter(vec![Ok(-1), Err(Interrupt::from(escalated))])
                })
                .collect(),
        );

        assert_eq!(items.len(), 4);
        assert!(matches!(items[0], Ok(1)));
        assert!(matches!(items[1], Ok(-1)));
        match &items[2] {
            Err(Interrupt::Cancelled(c)) => assert_eq!(c.reason(), "gave up on lost"),
            other => panic!("expected escalation, got {other:?}"),
        }
        assert!(matches!(items[3], Ok(2)));

        let collected: Result<Vec<i32>, _> = block_on(
            source()
                .try_get(|_| stream::once(async { Err::<i32, _>(Interrupt::from(Cancelled::new())) }))
                .try_collect(),
        );
        assert!(collected.is_err_and(|i| i.is_cancelled()));
    }

    #[test]
    fn test_values_drops_failures() {
        let values: Vec<i32> = block_on(source().values().try_collect()).unwrap();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_get_or_else() {
        let values: Vec<i32> = block_on(source().get_or_else(|_| 0).try_collect()).unwrap();
        assert_eq!(values, vec![1, 0, 2]);
    }

    #[test]
    fn test_get_with() {
        let described: Vec<String> = block_on(
            source()
                .get_with(|v| format!("value {v}"), |f| format!("failed: {}", f.cause()))
                .try_collect(),
        )
        .unwrap();
        assert_eq!(described, vec!["value 1", "failed: lost", "value 2"]);
    }

    #[test]
    fn test_get_or_none_reports_each_failure() {
        let seen = RefCell::new(Vec::new());
        let values: Vec<Option<i32>> = block_on(
            source()
                .get_or_none(|f| seen.borrow_mut().push(*f.cause()))
                .try_collect(),
        )
        .unwrap();

        assert_eq!(values, vec![Some(1), None, Some(2)]);
        assert_eq!(*seen.borrow(), vec!["lost"]);
    }

    #[test]
    fn test_get_map_or_none() {
        let values: Vec<Option<String>> = block_on(
            source()
                .get_map_or_none(|v| v.to_string(), |_| {})
                .try_collect(),
        )
        .unwrap();
        assert_eq!(values, vec![Some("1".to_string()), None, Some("2".to_string())]);
    }

    #[test]
    fn test_terminal_operators_forward_interrupt() {
        let raising = stream::iter(vec![
            Ok(Outcome::<i32, &str>::Success(1)),
            Err(Interrupt::from(Cancelled::new())),
        ]);
        let items: Vec<_> = block_on(raising.get_or_else(|_| 0).collect());

        assert!(matches!(items[0], Ok(1)));
        assert!(matches!(items[1], Err(Interrupt::Cancelled(_))));
    }

    #[test]
    fn test_resolve_forwards_size_hint() {
        assert_eq!(source().get_or_else(|_| 0).size_hint(), (3, Some(3)));
        assert_eq!(source().get(|_| stream::empty::<i32>()).size_hint(), (0, None));
    }
}
