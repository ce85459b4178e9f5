//! Output boundary - persists the three final documents.
//!
//! Runs only after every stage has completed. A failed write names the
//! artifact; artifacts written before the failure are left in place.

use crate::pipeline::{PipelineState, StateKey};
use glowgen_common::GlowgenError;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

pub const FAQ_FILE: &str = "faq.json";
pub const PRODUCT_PAGE_FILE: &str = "product_page.json";
pub const COMPARISON_FILE: &str = "comparison_page.json";

/// Write all three artifacts into `output_dir`, creating it if needed.
pub fn write_documents(state: &PipelineState, output_dir: &Path) -> Result<(), GlowgenError> {
    let faq = state.faq_document().ok_or_else(|| GlowgenError::MissingState {
        stage: "output".to_string(),
        key: StateKey::FaqDocument.as_str().to_string(),
    })?;
    let product_page = state
        .product_page_document()
        .ok_or_else(|| GlowgenError::MissingState {
            stage: "output".to_string(),
            key: StateKey::ProductPageDocument.as_str().to_string(),
        })?;
    let comparison = state
        .comparison_document()
        .ok_or_else(|| GlowgenError::MissingState {
            stage: "output".to_string(),
            key: StateKey::ComparisonDocument.as_str().to_string(),
        })?;

    fs::create_dir_all(output_dir).map_err(|e| GlowgenError::Write {
        artifact: output_dir.display().to_string(),
        source: e,
    })?;

    write_json(output_dir, FAQ_FILE, faq)?;
    write_json(output_dir, PRODUCT_PAGE_FILE, product_page)?;
    write_json(output_dir, COMPARISON_FILE, comparison)?;

    Ok(())
}

fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<(), GlowgenError> {
    let path = dir.join(name);
    let body = serde_json::to_string_pretty(value)?;
    fs::write(&path, body).map_err(|e| GlowgenError::Write {
        artifact: name.to_string(),
        source: e,
    })?;
    info!("wrote {}", path.display());
    Ok(())
}
