//! Domain types for social presence resolution.
//!
//! The platform table and the business category enum live here so the
//! resolver pipeline can treat all thirteen platforms through one generic
//! code path.

pub mod category;
pub mod platform;

pub use category::BusinessCategory;
pub use platform::{EntryShape, Eligibility, LinkRule, LinkShaping, Platform};
