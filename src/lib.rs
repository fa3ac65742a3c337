//! simq library crate
//!
//! Exposes core modules so benchmarks and the binary can exercise the search
//! coordination and rendering paths without going through CLI startup.

pub mod app;
pub mod config;
pub mod logging;
pub mod search;
pub mod service;
pub mod ui;
pub mod util;
