//! Remote API access.
//!
//! This module fetches the four source collections and decodes them
//! into their typed shapes.

pub mod client;

pub use client::SourceClient;
