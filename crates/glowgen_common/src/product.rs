//! Product model - the validated, immutable input record.
//!
//! One record per run. Constructed once from raw JSON, never mutated.
//! Validation reports every missing field at once so a caller can fix the
//! input in one pass instead of replaying the run per field.

use crate::error::GlowgenError;
use serde::{Deserialize, Serialize};

/// All fields a product record must carry.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "name",
    "concentration",
    "skin_type",
    "key_ingredients",
    "benefits",
    "how_to_use",
    "side_effects",
    "price",
];

/// A single product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub concentration: String,
    pub skin_type: Vec<String>,
    pub key_ingredients: Vec<String>,
    pub benefits: Vec<String>,
    pub how_to_use: String,
    pub side_effects: String,
    pub price: u32,
}

impl Product {
    /// Parse and validate a raw JSON product record.
    pub fn from_json(raw: &str) -> Result<Self, GlowgenError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| GlowgenError::Malformed(e.to_string()))?;
        Self::from_value(value)
    }

    /// Validate a parsed JSON value and construct the record.
    ///
    /// Field presence is checked before deserialization so the error names
    /// every missing field, not just the first one serde happens to hit.
    pub fn from_value(value: serde_json::Value) -> Result<Self, GlowgenError> {
        let object = value
            .as_object()
            .ok_or_else(|| GlowgenError::Malformed("top-level value is not an object".to_string()))?;

        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !object.contains_key(**field))
            .map(|field| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(GlowgenError::Validation { missing });
        }

        serde_json::from_value(value).map_err(|e| GlowgenError::Malformed(e.to_string()))
    }

    /// Skin types as one display string.
    pub fn skin_types_joined(&self) -> String {
        self.skin_type.join(", ")
    }

    /// Key ingredients as one display string.
    pub fn ingredients_joined(&self) -> String {
        self.key_ingredients.join(", ")
    }

    /// Benefits as one display string.
    pub fn benefits_joined(&self) -> String {
        self.benefits.join(", ")
    }

    /// Short derived tagline, used wherever a one-line framing of the
    /// product is needed (catch-all answers, page overview copy).
    pub fn tagline(&self) -> String {
        match self.benefits.first() {
            Some(benefit) => format!(
                "a {} formula for {}",
                self.concentration,
                benefit.to_lowercase()
            ),
            None => format!("a {} formula", self.concentration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "name": "GlowBoost Vitamin C Serum",
            "concentration": "20%",
            "skin_type": ["oily", "combination"],
            "key_ingredients": ["Vitamin C", "Hyaluronic Acid"],
            "benefits": ["Brightening", "Fades dark spots"],
            "how_to_use": "Apply 2-3 drops to cleansed skin. Use in the morning before sunscreen.",
            "side_effects": "Mild tingling for first-time users.",
            "price": 699
        })
    }

    #[test]
    fn test_valid_record_parses() {
        let product = Product::from_value(sample_json()).unwrap();
        assert_eq!(product.name, "GlowBoost Vitamin C Serum");
        assert_eq!(product.price, 699);
        assert_eq!(product.skin_type.len(), 2);
    }

    #[test]
    fn test_missing_price_is_named() {
        let mut value = sample_json();
        value.as_object_mut().unwrap().remove("price");

        let err = Product::from_value(value).unwrap_err();
        assert_eq!(err.missing_fields(), Some(&["price".to_string()][..]));
    }

    #[test]
    fn test_all_missing_fields_reported_at_once() {
        let mut value = sample_json();
        value.as_object_mut().unwrap().remove("price");
        value.as_object_mut().unwrap().remove("benefits");

        let err = Product::from_value(value).unwrap_err();
        let missing = err.missing_fields().unwrap();
        assert_eq!(missing.len(), 2);
        assert!(missing.contains(&"price".to_string()));
        assert!(missing.contains(&"benefits".to_string()));
    }

    #[test]
    fn test_non_object_input_is_malformed() {
        let err = Product::from_value(serde_json::json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, GlowgenError::Malformed(_)));
    }

    #[test]
    fn test_tagline_uses_first_benefit() {
        let product = Product::from_value(sample_json()).unwrap();
        assert_eq!(product.tagline(), "a 20% formula for brightening");
    }
}
