//! Record validation for csvbind.
//!
//! Rules are declared per field in a [`RuleSet`] and evaluated by
//! [`validate`]. Every rule of every declared field runs; each failure
//! becomes one [`ValidationError`].
//!
//! - **Required**: value present, and non-blank for text
//! - **Range**: numeric value within `[min, max]`
//! - **StringLength**: text length within `[min, max]`
//!
//! Absent values pass `Range` and `StringLength`; presence is `Required`'s job.

mod rule;
mod validator;

pub use rule::Rule;
pub use validator::{RuleSet, ValidationError, validate};
