//! Test helpers shared across crates in the workspace.
//!
//! Provides environment variable guards, a `figment::Jail` wrapper, and
//! builders for fake test applications laid out like a CMake build tree.

pub mod app;
pub mod env;
pub mod figment;
