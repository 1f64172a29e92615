//! HTTP access to the API under test
//!
//! A thin wrapper over reqwest that resolves paths against the configured
//! base URL, attaches the bearer credential and times each round trip.

pub mod client;
pub mod response;

pub use client::ApiClient;
pub use response::ApiResponse;
