//! Cross-crate integration tests for the RFI scenario comparison workspace.
//!
//! The tests live in `tests/`; this library target is intentionally empty.
