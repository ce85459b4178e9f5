//! Prompt building for question generation.

use glowgen_common::{Product, QuestionCategory, MIN_PER_CATEGORY};

/// Output contract appended to every question prompt.
const OUTPUT_RULES: &str = r#"
Return ONLY a JSON array, no prose, no markdown code fences.
Each element must be an object: {"text": "...", "category": "..."}.
Every "text" value must end with a question mark.
Use each category exactly as spelled above, all lowercase."#;

/// Build the question-generation prompt for one product.
pub fn build_question_prompt(product: &Product) -> String {
    let categories: Vec<String> = QuestionCategory::ALL
        .iter()
        .map(|c| format!("- {}", c))
        .collect();

    format!(
        "You are writing customer FAQ questions for a skincare product.\n\
         Product name: {}\n\
         Concentration: {}\n\
         Skin types: {}\n\
         Key ingredients: {}\n\
         Benefits: {}\n\
         Price: INR {}\n\n\
         Write exactly {} questions for each of these categories:\n{}\n{}",
        product.name,
        product.concentration,
        product.skin_types_joined(),
        product.ingredients_joined(),
        product.benefits_joined(),
        product.price,
        MIN_PER_CATEGORY,
        categories.join("\n"),
        OUTPUT_RULES,
    )
}
