//! Retry executor built on the `backoff` crate.

pub mod backoff;

pub use backoff::*;
