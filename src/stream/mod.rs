//! Outcome combinators lifted over asynchronous streams.
//!
//! An *outcome stream* is any [`TryStream`] whose `Ok` items are [`Outcome`]s. The
//! `Err` side is the re-raise channel: it normally carries an [`Interrupt`](crate::Interrupt)
//! and is forwarded by every stage untouched. Every operator from the single-value
//! algebra has a stream counterpart in [`OutcomeStreamExt`] with the same per-element
//! behaviour.
//!
//! Stages hold at most one element (or one callback future) at a time and emit
//! elements in upstream order. Cancelling a pipeline means dropping it: every stage
//! drops its upstream and any in-flight callback future, and no failure callback
//! ever sees the cancellation.
//!
//! # Examples
//!
//! ```rust
//! use futures::executor::block_on;
//! use futures::stream::{self, TryStreamExt};
//! use outcome::stream::{AsOutcomeExt, OutcomeStreamExt};
//! use outcome::{Failure, Raised};
//!
//! let source = stream::iter(vec![Ok(1), Ok(2), Err(Raised::from(std::fmt::Error))]);
//! let values: Vec<i32> = block_on(
//!     source
//!         .as_outcome(|_| async { Failure::new("format") })
//!         .map_value(|v| async move { v * 10 })
//!         .get_or_else(|_| -1)
//!         .try_collect(),
//! )
//! .unwrap();
//!
//! assert_eq!(values, vec![10, 20, -1]);
//! ```

mod as_outcome;
mod chain;
mod get;
mod map;
mod tap;

pub use as_outcome::{outcomes, AsOutcome, AsOutcomeExt, Catch, Outcomes, WithHandler};
pub use chain::{UseAndKeep, UseAndMap};
pub use get::{DropValues, Get, MapOrNone, OrElse, OrNone, Resolve, Resolver, TryGet, With};
pub use map::MapValue;
pub use tap::{OnFailure, OnSuccess};

use crate::failure::Failure;
use crate::outcome::Outcome;
use futures::stream::{self, Empty, TryStream};
use std::future::Future;

/// Combinators for streams of [`Outcome`]s.
///
/// Implemented for every `TryStream<Ok = Outcome<V, C>>`. Callbacks of the non-terminal
/// operators are asynchronous; each returned future is awaited before the next
/// upstream element is pulled.
pub trait OutcomeStreamExt<V, C>: TryStream<Ok = Outcome<V, C>> + Sized {
    /// Maps every `Success` value, emitting failures unchanged.
    fn map_value<R, F, Fut>(self, f: F) -> MapValue<Self, F, Fut>
    where
        F: FnMut(V) -> Fut,
        Fut: Future<Output = R>,
    {
        MapValue::new(self, f)
    }

    /// Replaces every `Success` value with `()`.
    fn drop_value(self) -> Resolve<Self, DropValues> {
        Resolve::new(self, DropValues)
    }

    /// Awaits `f` for every `Success`, then emits the element unchanged.
    fn on_success<F, Fut>(self, f: F) -> OnSuccess<Self, F, Fut>
    where
        F: FnMut(&V) -> Fut,
        Fut: Future<Output = ()>,
    {
        OnSuccess::new(self, f)
    }

    /// Awaits `f` for every `Failure`, then emits the element unchanged.
    fn on_failure<F, Fut>(self, f: F) -> OnFailure<Self, F, Fut>
    where
        F: FnMut(&Failure<C>) -> Fut,
        Fut: Future<Output = ()>,
    {
        OnFailure::new(self, f)
    }

    /// Runs a fallible step per `Success`, keeping the original value unless the step fails.
    fn use_and_keep<U, F, Fut>(self, f: F) -> UseAndKeep<Self, F, Fut>
    where
        F: FnMut(&V) -> Fut,
        Fut: Future<Output = Outcome<U, C>>,
    {
        UseAndKeep::new(self, f)
    }

    /// Replaces every `Success` with the outcome of a fallible step.
    fn use_and_map<R, F, Fut>(self, f: F) -> UseAndMap<Self, F, Fut>
    where
        F: FnMut(V) -> Fut,
        Fut: Future<Output = Outcome<R, C>>,
    {
        UseAndMap::new(self, f)
    }

    /// Emits every `Success` value and replaces every `Failure` with the elements of the
    /// stream returned by `on_failure`, which may be empty or hold many elements.
    ///
    /// An empty replacement needs its element type spelled out
    /// (`stream::empty::<V>()`); [`values`](OutcomeStreamExt::values) drops failures directly.
    fn get<R, F, St>(self, on_failure: F) -> Get<Self, F, St>
    where
        V: Into<R>,
        F: FnMut(Failure<C>) -> St,
        St: futures::Stream<Item = R>,
    {
        Get::new(self, on_failure)
    }

    /// Like [`get`](OutcomeStreamExt::get), with a fallible replacement stream.
    ///
    /// `Err` items of the replacement are emitted on the error channel in place, so a
    /// failure handler can escalate instead of recovering.
    fn try_get<R, F, St>(self, on_failure: F) -> TryGet<Self, F, St>
    where
        V: Into<R>,
        F: FnMut(Failure<C>) -> St,
        St: TryStream<Ok = R, Error = Self::Error>,
    {
        TryGet::new(self, on_failure)
    }

    /// Emits every `Success` value and silently drops failures.
    fn values(self) -> Get<Self, fn(Failure<C>) -> Empty<V>, Empty<V>> {
        Get::new(self, skip_failure as fn(Failure<C>) -> Empty<V>)
    }

    /// Emits every `Success` value, or exactly one replacement per `Failure`.
    fn get_or_else<R, F>(self, on_failure: F) -> Resolve<Self, OrElse<F>>
    where
        V: Into<R>,
        F: FnMut(Failure<C>) -> R,
    {
        Resolve::new(self, OrElse::new(on_failure))
    }

    /// Maps every element with one function per variant.
    fn get_with<R, S, F>(self, on_success: S, on_failure: F) -> Resolve<Self, With<S, F>>
    where
        S: FnMut(V) -> R,
        F: FnMut(Failure<C>) -> R,
    {
        Resolve::new(self, With::new(on_success, on_failure))
    }

    /// Emits `Some(value)` per `Success`, or calls `on_failure` and emits `None`.
    fn get_or_none<F>(self, on_failure: F) -> Resolve<Self, OrNone<F>>
    where
        F: FnMut(Failure<C>),
    {
        Resolve::new(self, OrNone::new(on_failure))
    }

    /// Emits `Some(on_success(value))` per `Success`, or calls `on_failure` and emits `None`.
    fn get_map_or_none<R, S, F>(self, on_success: S, on_failure: F) -> Resolve<Self, MapOrNone<S, F>>
    where
        S: FnMut(V) -> R,
        F: FnMut(Failure<C>),
    {
        Resolve::new(self, MapOrNone::new(on_success, on_failure))
    }
}

impl<S, V, C> OutcomeStreamExt<V, C> for S where S: TryStream<Ok = Outcome<V, C>> {}

/// Size hint of a stage that may hold one element besides what upstream still has.
fn in_flight_hint((lower, upper): (usize, Option<usize>), in_flight: bool) -> (usize, Option<usize>) {
    let extra = usize::from(in_flight);
    (lower.saturating_add(extra), upper.and_then(|n| n.checked_add(extra)))
}

fn skip_failure<C, V>(_: Failure<C>) -> Empty<V> {
    stream::empty()
}

#[cfg(test)]
pub(crate) async fn yield_now() {
    let mut yielded = false;
    futures::future::poll_fn(move |cx| {
        if yielded {
            std::task::Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            std::task::Poll::Pending
        }
    })
    .await
}
