//! `smeta-core`: number handling shared by every other crate.
//!
//! Pure functions only: no I/O, no logging.

pub mod numeric;

pub use numeric::{format, format_money, parse, plain, NumberStyle, DEFAULT_CURRENCY};
