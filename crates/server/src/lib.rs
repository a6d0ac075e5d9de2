//! HTTP front end for the movie library.
//!
//! The library half of this crate is shared by the `filmdex` server binary,
//! the `filmdex-normalize` batch binary and the integration tests.

pub mod api;
pub mod bootstrap;
pub mod metrics;
pub mod state;
