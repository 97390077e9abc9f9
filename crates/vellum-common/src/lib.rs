//! Common utilities for the Vellum renderer.
//!
//! This crate provides shared infrastructure used by all renderer components:
//! - **Warning System** - colored terminal output for unsupported capabilities

pub mod warning;
