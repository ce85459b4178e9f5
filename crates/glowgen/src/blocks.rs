//! Logic block library - pure product-to-subdocument functions.
//!
//! Each block reads the product and nothing else, so blocks are idempotent
//! and callable in any order. Serde structs keep key order fixed.

use glowgen_common::Product;
use serde::Serialize;

/// Sentence markers that move a usage sentence into the `timing` field.
const TIME_WORDS: [&str; 3] = ["morning", "night", "daily"];

/// Timing line used when the usage text carries no timing sentence.
const DEFAULT_TIMING: &str = "Use as part of your regular skincare routine.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewBlock {
    pub name: String,
    pub concentration: String,
    pub suitable_for: String,
    pub short_tagline: String,
}

/// One ingredient with its display descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientEntry {
    pub name: String,
    pub descriptor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientsBlock {
    pub key_ingredients: Vec<IngredientEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenefitsBlock {
    pub benefits_list: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageBlock {
    pub application: String,
    pub timing: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetyBlock {
    pub warnings: Vec<String>,
    pub suitable_for: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingBlock {
    pub price: String,
    pub currency: String,
}

pub fn overview(product: &Product) -> OverviewBlock {
    OverviewBlock {
        name: product.name.clone(),
        concentration: product.concentration.clone(),
        suitable_for: product.skin_types_joined(),
        short_tagline: format!(
            "A straightforward {} formula suitable for {} skin types.",
            product.concentration,
            product.skin_types_joined()
        ),
    }
}

pub fn ingredients(product: &Product) -> IngredientsBlock {
    IngredientsBlock {
        key_ingredients: product
            .key_ingredients
            .iter()
            .map(|name| IngredientEntry {
                name: name.clone(),
                descriptor: format!("Active ingredient in {}", product.name),
            })
            .collect(),
    }
}

pub fn benefits(product: &Product) -> BenefitsBlock {
    BenefitsBlock {
        benefits_list: product.benefits.clone(),
        summary: format!(
            "{} focuses on {}.",
            product.name,
            product.benefits_joined().to_lowercase()
        ),
    }
}

/// Decompose `how_to_use` into application and timing.
///
/// Split rule: when the text has two or more sentences, the first sentence
/// mentioning "morning", "night", or "daily" becomes `timing` and the rest
/// become `application`. Otherwise the whole text is `application` and
/// `timing` falls back to a fixed line.
pub fn usage(product: &Product) -> UsageBlock {
    let sentences: Vec<&str> = product
        .how_to_use
        .split_inclusive('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if sentences.len() >= 2 {
        let timing_idx = sentences.iter().position(|sentence| {
            let lowered = sentence.to_lowercase();
            TIME_WORDS.iter().any(|word| lowered.contains(word))
        });

        if let Some(idx) = timing_idx {
            let application: Vec<&str> = sentences
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != idx)
                .map(|(_, s)| *s)
                .collect();

            return UsageBlock {
                application: application.join(" "),
                timing: sentences[idx].to_string(),
            };
        }
    }

    UsageBlock {
        application: product.how_to_use.trim().to_string(),
        timing: DEFAULT_TIMING.to_string(),
    }
}

pub fn safety(product: &Product) -> SafetyBlock {
    SafetyBlock {
        warnings: vec![product.side_effects.clone()],
        suitable_for: product.skin_type.clone(),
    }
}

pub fn pricing(product: &Product) -> PricingBlock {
    PricingBlock {
        price: format!("₹{}", product.price),
        currency: "INR".to_string(),
    }
}
