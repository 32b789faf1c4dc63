//! macOS `.app` bundle support.

pub mod app;
pub mod icon;
