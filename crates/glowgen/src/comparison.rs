//! Product comparison engine.
//!
//! Compares the input product against a fixed fictional counterpart and
//! resolves a winner per aspect under an explicit tie-break policy:
//! numeric price favors the strictly lower value; qualitative aspects use
//! the Jaccard overlap of the two field sets, reporting `equal` at or above
//! the threshold and otherwise favoring the strictly larger set.

use glowgen_common::Product;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Overlap ratio at or above which a qualitative aspect is `equal`.
pub const EQUAL_OVERLAP_THRESHOLD: f64 = 0.5;

/// Value of a recommendation segment when no product is favored.
const EITHER: &str = "either";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    ProductA,
    ProductB,
    Equal,
}

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonAspect {
    pub aspect: String,
    pub product_a: String,
    pub product_b: String,
    pub winner: Winner,
}

/// Common and unique ingredients between the two products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientComparison {
    pub ingredient_overlap: Vec<String>,
    pub unique_to_a: Vec<String>,
    pub unique_to_b: Vec<String>,
}

/// Short readable sentences summarizing the comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub price_difference: String,
    pub ingredient_summary: String,
}

/// Recommended product per audience segment ("either" on ties).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub budget_conscious: String,
    pub oily_skin: String,
    pub dry_skin: String,
}

/// The fictional counterpart product used for every comparison page.
/// A fixed fixture conforming to the full product schema.
pub fn fictional_product() -> Product {
    Product {
        name: "RadiancePlus Brightening Serum".to_string(),
        concentration: "15%".to_string(),
        skin_type: vec!["oily".to_string(), "combination".to_string()],
        key_ingredients: vec!["Vitamin C".to_string(), "Niacinamide".to_string()],
        benefits: vec!["Brightening".to_string(), "Evens skin tone".to_string()],
        how_to_use: "Apply 3-4 drops to cleansed skin in the morning.".to_string(),
        side_effects: "Mild dryness during the first week.".to_string(),
        price: 749,
    }
}

fn lowered_set(values: &[String]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}

/// Jaccard overlap of two field-derived sets, case-insensitive.
fn overlap_ratio(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 1.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

fn qualitative_winner(a_values: &[String], b_values: &[String]) -> Winner {
    let a = lowered_set(a_values);
    let b = lowered_set(b_values);

    if overlap_ratio(&a, &b) >= EQUAL_OVERLAP_THRESHOLD {
        return Winner::Equal;
    }

    // Distinct sets: the larger, more specific listing is the favorable side
    match a.len().cmp(&b.len()) {
        Ordering::Greater => Winner::ProductA,
        Ordering::Less => Winner::ProductB,
        Ordering::Equal => Winner::Equal,
    }
}

fn price_winner(a: u32, b: u32) -> Winner {
    match a.cmp(&b) {
        Ordering::Less => Winner::ProductA,
        Ordering::Greater => Winner::ProductB,
        Ordering::Equal => Winner::Equal,
    }
}

/// Build the five-aspect comparison table, fixed order.
pub fn compare(a: &Product, b: &Product) -> Vec<ComparisonAspect> {
    vec![
        ComparisonAspect {
            aspect: "concentration".to_string(),
            product_a: a.concentration.clone(),
            product_b: b.concentration.clone(),
            winner: qualitative_winner(
                std::slice::from_ref(&a.concentration),
                std::slice::from_ref(&b.concentration),
            ),
        },
        ComparisonAspect {
            aspect: "skin_type".to_string(),
            product_a: a.skin_types_joined(),
            product_b: b.skin_types_joined(),
            winner: qualitative_winner(&a.skin_type, &b.skin_type),
        },
        ComparisonAspect {
            aspect: "ingredients".to_string(),
            product_a: a.ingredients_joined(),
            product_b: b.ingredients_joined(),
            winner: qualitative_winner(&a.key_ingredients, &b.key_ingredients),
        },
        ComparisonAspect {
            aspect: "benefits".to_string(),
            product_a: a.benefits_joined(),
            product_b: b.benefits_joined(),
            winner: qualitative_winner(&a.benefits, &b.benefits),
        },
        ComparisonAspect {
            aspect: "price".to_string(),
            product_a: format!("₹{}", a.price),
            product_b: format!("₹{}", b.price),
            winner: price_winner(a.price, b.price),
        },
    ]
}

/// Common and unique ingredients, sorted for stable output.
pub fn compare_ingredients(a: &Product, b: &Product) -> IngredientComparison {
    let a_set: BTreeSet<&String> = a.key_ingredients.iter().collect();
    let b_set: BTreeSet<&String> = b.key_ingredients.iter().collect();

    IngredientComparison {
        ingredient_overlap: a_set.intersection(&b_set).map(|s| (*s).clone()).collect(),
        unique_to_a: a_set.difference(&b_set).map(|s| (*s).clone()).collect(),
        unique_to_b: b_set.difference(&a_set).map(|s| (*s).clone()).collect(),
    }
}

/// Readable summary sentences for the comparison section.
pub fn summarize(a: &Product, b: &Product, ingredients: &IngredientComparison) -> ComparisonSummary {
    let price_difference = match b.price.cmp(&a.price) {
        Ordering::Greater => format!(
            "{} is ₹{} more expensive than {}.",
            b.name,
            b.price - a.price,
            a.name
        ),
        Ordering::Less => format!(
            "{} is ₹{} cheaper than {}.",
            b.name,
            a.price - b.price,
            a.name
        ),
        Ordering::Equal => format!("Both products are priced the same at ₹{}.", a.price),
    };

    let ingredient_summary = if ingredients.ingredient_overlap.is_empty() {
        "They do not share any listed key ingredients.".to_string()
    } else {
        format!("Both contain: {}.", ingredients.ingredient_overlap.join(", "))
    };

    ComparisonSummary {
        price_difference,
        ingredient_summary,
    }
}

/// Pick a product per audience segment from the resolved aspects.
pub fn recommend(a: &Product, b: &Product, table: &[ComparisonAspect]) -> Recommendation {
    let budget_conscious = table
        .iter()
        .find(|aspect| aspect.aspect == "price")
        .map(|aspect| match aspect.winner {
            Winner::ProductA => a.name.clone(),
            Winner::ProductB => b.name.clone(),
            Winner::Equal => EITHER.to_string(),
        })
        .unwrap_or_else(|| EITHER.to_string());

    Recommendation {
        budget_conscious,
        oily_skin: skin_segment_pick(a, b, "oily"),
        dry_skin: skin_segment_pick(a, b, "dry"),
    }
}

fn skin_segment_pick(a: &Product, b: &Product, segment: &str) -> String {
    let a_covers = covers_skin_type(a, segment);
    let b_covers = covers_skin_type(b, segment);

    match (a_covers, b_covers) {
        (true, false) => a.name.clone(),
        (false, true) => b.name.clone(),
        _ => EITHER.to_string(),
    }
}

fn covers_skin_type(product: &Product, segment: &str) -> bool {
    product
        .skin_type
        .iter()
        .any(|skin_type| skin_type.to_lowercase() == segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_a() -> Product {
        Product {
            name: "GlowBoost Vitamin C Serum".to_string(),
            concentration: "20%".to_string(),
            skin_type: vec!["oily".to_string(), "combination".to_string()],
            key_ingredients: vec!["Vitamin C".to_string(), "Hyaluronic Acid".to_string()],
            benefits: vec!["Brightening".to_string(), "Fades dark spots".to_string()],
            how_to_use: "Apply 2-3 drops to cleansed skin. Use in the morning.".to_string(),
            side_effects: "Mild tingling for first-time users.".to_string(),
            price: 699,
        }
    }

    #[test]
    fn test_table_has_exactly_five_aspects() {
        let table = compare(&product_a(), &fictional_product());
        assert_eq!(table.len(), 5);
        let aspects: Vec<&str> = table.iter().map(|row| row.aspect.as_str()).collect();
        assert_eq!(
            aspects,
            vec!["concentration", "skin_type", "ingredients", "benefits", "price"]
        );
    }

    #[test]
    fn test_lower_price_wins() {
        // 699 vs 899: product A is cheaper
        let mut rival = fictional_product();
        rival.price = 899;

        let table = compare(&product_a(), &rival);
        let price_row = table.iter().find(|row| row.aspect == "price").unwrap();
        assert_eq!(price_row.winner, Winner::ProductA);
    }

    #[test]
    fn test_identical_price_is_equal() {
        let mut rival = fictional_product();
        rival.price = product_a().price;

        let table = compare(&product_a(), &rival);
        let price_row = table.iter().find(|row| row.aspect == "price").unwrap();
        assert_eq!(price_row.winner, Winner::Equal);
    }

    #[test]
    fn test_identical_sets_are_equal() {
        assert_eq!(
            qualitative_winner(
                &["oily".to_string(), "combination".to_string()],
                &["Oily".to_string(), "Combination".to_string()]
            ),
            Winner::Equal
        );
    }

    #[test]
    fn test_high_overlap_is_equal() {
        // Overlap 2/3 >= 0.5
        assert_eq!(
            qualitative_winner(
                &["a".to_string(), "b".to_string(), "c".to_string()],
                &["a".to_string(), "b".to_string()]
            ),
            Winner::Equal
        );
    }

    #[test]
    fn test_low_overlap_favors_larger_set() {
        // Overlap 1/4 < 0.5, A lists three entries to B's two
        assert_eq!(
            qualitative_winner(
                &["a".to_string(), "b".to_string(), "c".to_string()],
                &["a".to_string(), "d".to_string()]
            ),
            Winner::ProductA
        );
    }

    #[test]
    fn test_disjoint_equal_sized_sets_are_equal() {
        assert_eq!(
            qualitative_winner(&["a".to_string()], &["b".to_string()]),
            Winner::Equal
        );
    }

    #[test]
    fn test_ingredient_comparison_sets() {
        let comparison = compare_ingredients(&product_a(), &fictional_product());
        assert_eq!(comparison.ingredient_overlap, vec!["Vitamin C"]);
        assert_eq!(comparison.unique_to_a, vec!["Hyaluronic Acid"]);
        assert_eq!(comparison.unique_to_b, vec!["Niacinamide"]);
    }

    #[test]
    fn test_summary_sentences() {
        let a = product_a();
        let b = fictional_product();
        let summary = summarize(&a, &b, &compare_ingredients(&a, &b));

        assert_eq!(
            summary.price_difference,
            "RadiancePlus Brightening Serum is ₹50 more expensive than GlowBoost Vitamin C Serum."
        );
        assert_eq!(summary.ingredient_summary, "Both contain: Vitamin C.");
    }

    #[test]
    fn test_recommendation_segments() {
        let a = product_a();
        let b = fictional_product();
        let table = compare(&a, &b);
        let recommendation = recommend(&a, &b, &table);

        // A is cheaper, both cover oily, neither covers dry
        assert_eq!(recommendation.budget_conscious, a.name);
        assert_eq!(recommendation.oily_skin, "either");
        assert_eq!(recommendation.dry_skin, "either");
    }

    #[test]
    fn test_dry_skin_pick_when_only_one_covers() {
        let mut a = product_a();
        a.skin_type = vec!["dry".to_string()];
        let b = fictional_product();

        let table = compare(&a, &b);
        let recommendation = recommend(&a, &b, &table);
        assert_eq!(recommendation.dry_skin, a.name);
    }

    #[test]
    fn test_every_winner_is_a_valid_tag() {
        let table = compare(&product_a(), &fictional_product());
        for row in &table {
            let tag = serde_json::to_string(&row.winner).unwrap();
            assert!(
                tag == "\"product_a\"" || tag == "\"product_b\"" || tag == "\"equal\"",
                "unexpected winner tag {}",
                tag
            );
        }
    }
}
