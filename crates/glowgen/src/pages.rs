//! Final page documents and their assembly.
//!
//! The three document types serialize directly into the output artifacts;
//! field declaration order is the wire order.

use crate::{blocks, comparison, router};
use glowgen_common::{Product, QuestionCategory, QuestionSet};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqSection {
    pub category: QuestionCategory,
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqDocument {
    pub title: String,
    pub product: String,
    pub total_questions: usize,
    pub sections: Vec<FaqSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPageDocument {
    pub page_type: String,
    pub product_name: String,
    pub headline: String,
    pub tagline: String,
    pub hero_section: blocks::OverviewBlock,
    pub key_features: Vec<String>,
    pub ingredients: blocks::IngredientsBlock,
    pub benefits: blocks::BenefitsBlock,
    pub how_to_use: blocks::UsageBlock,
    pub safety_information: blocks::SafetyBlock,
    pub pricing: blocks::PricingBlock,
    pub who_is_it_for: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub name: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonProducts {
    pub product_a: ProductSummary,
    pub product_b: ProductSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonPageDocument {
    pub page_type: String,
    pub title: String,
    pub subtitle: String,
    pub products: ComparisonProducts,
    pub comparison_table: Vec<comparison::ComparisonAspect>,
    pub ingredient_comparison: comparison::IngredientComparison,
    pub summary: comparison::ComparisonSummary,
    pub recommendation: comparison::Recommendation,
}

/// Assemble the FAQ document: every question answered, sections in fixed
/// category order, question order preserved within a section.
pub fn build_faq(product: &Product, questions: &QuestionSet) -> FaqDocument {
    let entries = router::build_faq_entries(product, questions);

    let sections = QuestionCategory::ALL
        .iter()
        .map(|category| FaqSection {
            category: *category,
            items: entries
                .iter()
                .filter(|entry| entry.question.category == *category)
                .map(|entry| FaqItem {
                    question: entry.question.text.clone(),
                    answer: entry.answer.clone(),
                })
                .collect(),
        })
        .collect();

    FaqDocument {
        title: format!("{} – Frequently Asked Questions", product.name),
        product: product.name.clone(),
        total_questions: entries.len(),
        sections,
    }
}

/// Attention line for the product page hero.
fn headline(product: &Product) -> String {
    match product.benefits.first() {
        Some(benefit) => format!("{} – Your Solution for {}", product.name, benefit),
        None => format!("{} – Premium Skincare", product.name),
    }
}

/// Feature bullets assembled from every descriptive field.
fn key_features(product: &Product) -> Vec<String> {
    let mut features = vec![
        format!("Potent {} formula", product.concentration),
        format!("Enriched with {}", product.ingredients_joined()),
        format!("Perfect for {} skin", product.skin_types_joined()),
    ];
    for benefit in &product.benefits {
        features.push(format!("Helps with {}", benefit.to_lowercase()));
    }
    features
}

fn who_is_it_for(product: &Product) -> String {
    format!(
        "Anyone with {} skin looking for {}.",
        product.skin_types_joined(),
        product.benefits_joined().to_lowercase()
    )
}

/// Assemble the product page from the logic blocks.
pub fn build_product_page(product: &Product) -> ProductPageDocument {
    ProductPageDocument {
        page_type: "product_page".to_string(),
        product_name: product.name.clone(),
        headline: headline(product),
        tagline: product.tagline(),
        hero_section: blocks::overview(product),
        key_features: key_features(product),
        ingredients: blocks::ingredients(product),
        benefits: blocks::benefits(product),
        how_to_use: blocks::usage(product),
        safety_information: blocks::safety(product),
        pricing: blocks::pricing(product),
        who_is_it_for: who_is_it_for(product),
    }
}

/// Assemble the comparison page against the fictional counterpart.
pub fn build_comparison_page(product: &Product) -> ComparisonPageDocument {
    let rival = comparison::fictional_product();
    let table = comparison::compare(product, &rival);
    let ingredient_comparison = comparison::compare_ingredients(product, &rival);
    let summary = comparison::summarize(product, &rival, &ingredient_comparison);
    let recommendation = comparison::recommend(product, &rival, &table);

    ComparisonPageDocument {
        page_type: "product_comparison".to_string(),
        title: format!("{} vs {}", product.name, rival.name),
        subtitle: "Comprehensive comparison to help you choose".to_string(),
        products: ComparisonProducts {
            product_a: ProductSummary {
                name: product.name.clone(),
                price: format!("₹{}", product.price),
            },
            product_b: ProductSummary {
                name: rival.name.clone(),
                price: format!("₹{}", rival.price),
            },
        },
        comparison_table: table,
        ingredient_comparison,
        summary,
        recommendation,
    }
}
