//! Configuration module.
//!
//! This module provides the runtime settings and the functionality for
//! loading them from a JSON file or command-line arguments.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::Settings;
