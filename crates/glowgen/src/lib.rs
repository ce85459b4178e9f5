//! Glowgen - deterministic product content generation engine.
//!
//! Turns one validated product record into three JSON documents (FAQ,
//! product page, comparison page) through a fixed stage pipeline. The only
//! non-deterministic input is the optional generative question source, and
//! every use of it is guarded by a deterministic fallback.

pub mod blocks;
pub mod comparison;
pub mod ollama;
pub mod output;
pub mod pages;
pub mod pipeline;
pub mod prompts;
pub mod router;
pub mod synthesizer;
