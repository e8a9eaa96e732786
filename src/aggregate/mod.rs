//! Aggregation core.
//!
//! Correlates the four source collections into merged artists, memoizes
//! the result, and answers lookups against it.

pub mod cache;
pub mod correlator;
pub mod lookup;

pub use lookup::LookupService;
