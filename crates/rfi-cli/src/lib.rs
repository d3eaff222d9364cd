//! # rfi-cli
//!
//! Terminal and JSON presentation of comparison results, the progress
//! spinner, and shell completion.

pub mod completion;
pub mod output;
pub mod presenter;
pub mod ui;

pub use presenter::CliComparisonPresenter;
