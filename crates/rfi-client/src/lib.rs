//! # rfi-client
//!
//! HTTP client for the RFI simulation backend: request construction,
//! response normalization, and the optional timeout/retry policy.

pub mod client;
pub mod policy;
pub mod wire;

pub use client::HttpSimulationClient;
pub use policy::RequestPolicy;
