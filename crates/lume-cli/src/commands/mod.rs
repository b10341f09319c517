//! Command implementations.
//!
//! - [`build`] - One-shot production bundle
//! - [`dev`] - Development server with live updates
//! - [`serve`] - Static server for the production bundle
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and returns a Result.

pub mod build;
pub mod dev;
pub mod serve;
pub(crate) mod utils;

pub use build::execute as build_execute;
pub use dev::execute as dev_execute;
pub use serve::execute as serve_execute;
