//! Test-only crate. The actual end-to-end tests live in `tests/`.
