//! Combinators over a single [`Outcome`](crate::Outcome).
//!
//! Chaining operators only run their callback for `Success`; a `Failure` passes
//! through every later link untouched.

mod chain;
mod map;
mod tap;
mod terminal;
