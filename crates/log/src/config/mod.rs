//! Configuration types and builders
//!
//! This module provides configuration types for the logging system, organized into:
//! - `base`: Core configuration structs (Config, Format)
//! - `display`: Writer and display configuration
//! - `presets`: Pre-configured setups (development, production, test)

mod base;
mod display;
mod presets;

// Re-export all public types
pub use base::{Config, Format};
pub use display::{DisplayConfig, WriterConfig};
