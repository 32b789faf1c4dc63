//! Shared helpers for bundle creation.

pub mod fs;
