//! Balanced tile selection for the Shallow Sea board game.
//!
//! The core lives in [`services`]: a quota-driven group sampler, a resource
//! classifier and a selector that retries draws until the coral and fish
//! tile types are balanced within a tolerance. [`handlers`] exposes it as a
//! small JSON service.

pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;
