//! Error types.
//!
//! Validation failures are ordinary values ([`ValidationError`], collected
//! into [`ValidationErrors`] by accumulating reports). Configuration mistakes
//! made while building a validator are [`BuildError`]s and surface before any
//! value is evaluated.

mod build_error;
mod validation_error;

pub use build_error::BuildError;
pub use validation_error::{ValidationError, ValidationErrors};
