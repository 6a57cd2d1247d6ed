//! Commonly used imports
//!
//! Use `use outcome::prelude::*;` for quick access to the most common types and traits.

// Core types
pub use crate::{Failure, Outcome};

// Capture
pub use crate::{Exception, ExceptionHandler, Interrupt, Raised};

// Streams
#[cfg(feature = "stream")]
pub use crate::stream::{outcomes, AsOutcomeExt, OutcomeStreamExt};
