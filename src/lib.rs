//! # Outcome: Typed Success/Failure Results
//!
//! Model an operation's result as either a value or a domain failure, and compose
//! results without checking for failure at every step.
//!
//! ## Core Types
//!
//! - **[`Outcome<V, C>`]**: Either `Success(V)` or `Failure(Failure<C>)`
//! - **[`Failure<C>`]**: A typed cause, an optional originating [`Exception`] and a lazily
//!   computed message
//! - **[`Raised`]**: Anything a fallible block may raise, classified into a recoverable
//!   [`Exception`] or an [`Interrupt`] that must propagate
//!
//! ## Key Features
//!
//! - **Composable**: Chain steps with `.use_and_map()`, validate with `.use_and_keep()`
//! - **Side effects**: Observe with `.on_success()` and `.on_failure()`
//! - **Capture**: Turn `Result`-returning code into outcomes with [`Outcome::build`]
//! - **Streams**: Lift the whole algebra over asynchronous streams (feature `stream`)
//!
//! ## Example
//!
//! ```
//! use outcome::*;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Cause {
//!     NotANumber,
//!     Negative,
//! }
//!
//! fn parse(input: &str) -> Result<Outcome<u32, Cause>, Interrupt> {
//!     Outcome::build(
//!         |e| Failure::new(Cause::NotANumber).with_message(move || e.to_string()),
//!         || Ok(input.trim().parse::<i64>()?),
//!     )
//!     .map(|parsed| {
//!         parsed.use_and_map(|n| match u32::try_from(n) {
//!             Ok(n) => Outcome::Success(n),
//!             Err(_) => Failure::new(Cause::Negative).into(),
//!         })
//!     })
//! }
//!
//! assert_eq!(parse(" 42 ").unwrap(), Outcome::Success(42));
//! assert_eq!(parse("-1").unwrap().failure().map(|f| f.into_cause()), Some(Cause::Negative));
//! assert!(parse("x").unwrap().is_failure());
//! ```
//!
//! ## Common Functions
//!
//! **Chaining:**
//! - [`Outcome::map_value`] - Transform the success value
//! - [`Outcome::use_and_map`] - Continue with a step that may fail
//! - [`Outcome::use_and_keep`] - Validate, keeping the original value
//!
//! **Leaving the outcome:**
//! - [`Outcome::use_or_else`] - Value or replacement
//! - [`Outcome::use_with`] - One function per variant
//! - [`Outcome::use_or_none`] - Value or `None`

mod capture;
mod combinators;
mod failure;
mod outcome;
mod raise;

pub mod prelude;
#[cfg(feature = "stream")]
pub mod stream;

pub use capture::ExceptionHandler;
pub use failure::{Exception, Failure};
pub use outcome::Outcome;
pub use raise::{Cancelled, Fatal, Interrupt, Raised};
