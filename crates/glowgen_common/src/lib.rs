//! Glowgen Common - Shared types and schemas for the glowgen pipeline.
//!
//! The product model, question types, configuration, and error taxonomy.
//! Nothing here performs IO beyond reading the config file.

pub mod config;
pub mod error;
pub mod product;
pub mod question;

pub use config::*;
pub use error::*;
pub use product::*;
pub use question::*;
