//! rfi-compare library: configuration, dispatch, and exit codes for the
//! scenario comparison tool.

pub mod app;
pub mod config;
pub mod errors;
pub mod version;
