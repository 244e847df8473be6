//! Prelude module for proclaimed_holidays crate.
//!
//! Re-exports the derive macros from derive_more used across the crate.

pub use derive_more::{Deref, Display, From, Into};
