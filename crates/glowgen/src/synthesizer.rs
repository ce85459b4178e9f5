//! Question synthesis with a guaranteed deterministic fallback.
//!
//! One bounded generative attempt; if the backend is unavailable or its
//! output fails any structural check, the whole result is discarded and the
//! fixed template bank takes over. Generated and fallback questions are
//! never mixed within a run, so the count and category guarantees stay
//! provable whichever path was taken.

use crate::ollama::{GenerationOutcome, QuestionGenerator};
use crate::prompts;
use glowgen_common::{Product, Question, QuestionCategory, QuestionSet};
use serde::Deserialize;
use tracing::{info, warn};

/// One entry of the generated question list, as the model returns it.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    text: String,
    category: QuestionCategory,
}

/// Produce the question set for one product.
pub async fn synthesize(product: &Product, generator: &dyn QuestionGenerator) -> QuestionSet {
    let prompt = prompts::build_question_prompt(product);

    match generator.generate(&prompt).await {
        GenerationOutcome::Generated(raw) => match parse_generated(&raw) {
            Ok(set) => {
                info!("using generated question set ({} questions)", set.len());
                set
            }
            Err(reason) => {
                warn!("generated question set rejected ({}); using fallback bank", reason);
                fallback_question_set(product)
            }
        },
        GenerationOutcome::Unavailable(reason) => {
            warn!("generator unavailable ({}); using fallback bank", reason);
            fallback_question_set(product)
        }
    }
}

/// Parse and validate raw generator output into a question set.
fn parse_generated(raw: &str) -> Result<QuestionSet, String> {
    let json = extract_json(raw);
    let entries: Vec<RawQuestion> =
        serde_json::from_str(&json).map_err(|e| format!("invalid JSON: {}", e))?;

    let questions = entries
        .into_iter()
        .map(|entry| Question {
            text: entry.text.trim().to_string(),
            category: entry.category,
        })
        .collect();

    QuestionSet::new(questions).map_err(|e| e.to_string())
}

/// Extract JSON from a model response (models often wrap it in fences).
fn extract_json(response: &str) -> String {
    let trimmed = response.trim();

    // If starts with ```json or ```, extract the content
    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() >= 3 {
            // Skip first and last line (the ``` markers)
            let json_lines = &lines[1..lines.len() - 1];
            return json_lines.join("\n");
        }
    }

    trimmed.to_string()
}

/// The deterministic template bank: three canonical questions per category,
/// parameterized only by product fields. Identical product input yields an
/// identical set, independent of whether the generative call was attempted.
pub fn fallback_question_set(product: &Product) -> QuestionSet {
    let name = &product.name;

    let texts: [(QuestionCategory, [String; 3]); 5] = [
        (
            QuestionCategory::Informational,
            [
                format!("What is {} and what does it do?", name),
                format!("Who can use {}?", name),
                format!("How long does it take to see results from using {}?", name),
            ],
        ),
        (
            QuestionCategory::Usage,
            [
                format!("How should I apply {} in my daily routine?", name),
                format!("Should I use {} in the morning or at night?", name),
                format!("How much of {} should I use per application?", name),
            ],
        ),
        (
            QuestionCategory::Safety,
            [
                format!("Is {} safe for sensitive skin?", name),
                format!("Are there any side effects of {} I should know about?", name),
                format!("What should I do if I experience irritation from {}?", name),
            ],
        ),
        (
            QuestionCategory::Purchase,
            [
                format!("What is the price of {}?", name),
                format!("Is {} worth the price?", name),
                format!("Are there discounts for {}?", name),
            ],
        ),
        (
            QuestionCategory::Comparison,
            [
                format!("How does {} compare to similar products?", name),
                format!("Is {} better for oily skin than other serums?", name),
                format!("How does the price of {} compare to similar products?", name),
            ],
        ),
    ];

    let questions = texts
        .into_iter()
        .flat_map(|(category, batch)| {
            batch
                .into_iter()
                .map(move |text| Question { text, category })
        })
        .collect();

    QuestionSet::new(questions).expect("fallback bank satisfies the question set invariants")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use glowgen_common::{MIN_PER_CATEGORY, MIN_TOTAL_QUESTIONS};

    struct CannedGenerator {
        raw: String,
    }

    #[async_trait]
    impl QuestionGenerator for CannedGenerator {
        async fn generate(&self, _prompt: &str) -> GenerationOutcome {
            GenerationOutcome::Generated(self.raw.clone())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl QuestionGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> GenerationOutcome {
            GenerationOutcome::Unavailable("timed out".to_string())
        }
    }

    fn sample_product() -> Product {
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

    fn valid_generated_json() -> String {
        let mut entries = Vec::new();
        for category in QuestionCategory::ALL {
            for i in 0..MIN_PER_CATEGORY {
                entries.push(serde_json::json!({
                    "text": format!("Generated {} question {}?", category, i),
                    "category": category.as_str(),
                }));
            }
        }
        serde_json::Value::Array(entries).to_string()
    }

    #[test]
    fn test_fallback_invariants() {
        let set = fallback_question_set(&sample_product());
        assert_eq!(set.len(), MIN_TOTAL_QUESTIONS);
        for category in QuestionCategory::ALL {
            assert_eq!(set.in_category(category).len(), MIN_PER_CATEGORY);
        }
        for question in set.questions() {
            assert!(question.text.ends_with('?'));
        }
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let product = sample_product();
        assert_eq!(
            fallback_question_set(&product),
            fallback_question_set(&product)
        );
    }

    #[tokio::test]
    async fn test_valid_generation_is_used() {
        let generator = CannedGenerator {
            raw: valid_generated_json(),
        };
        let set = synthesize(&sample_product(), &generator).await;
        assert!(set.questions()[0].text.starts_with("Generated"));
    }

    #[tokio::test]
    async fn test_fenced_generation_is_used() {
        let generator = CannedGenerator {
            raw: format!("```json\n{}\n```", valid_generated_json()),
        };
        let set = synthesize(&sample_product(), &generator).await;
        assert!(set.questions()[0].text.starts_with("Generated"));
    }

    #[tokio::test]
    async fn test_unavailable_falls_back() {
        let set = synthesize(&sample_product(), &FailingGenerator).await;
        assert_eq!(set, fallback_question_set(&sample_product()));
    }

    #[tokio::test]
    async fn test_malformed_json_falls_back() {
        let generator = CannedGenerator {
            raw: "here are your questions: 1. What is it?".to_string(),
        };
        let set = synthesize(&sample_product(), &generator).await;
        assert_eq!(set, fallback_question_set(&sample_product()));
    }

    #[tokio::test]
    async fn test_short_generation_falls_back() {
        // Valid JSON, right shape, but only one category covered
        let raw = serde_json::json!([
            {"text": "Only one question?", "category": "usage"}
        ])
        .to_string();
        let generator = CannedGenerator { raw };
        let set = synthesize(&sample_product(), &generator).await;
        assert_eq!(set, fallback_question_set(&sample_product()));
    }

    #[test]
    fn test_extract_json_plain() {
        let response = r#"[{"text": "t?"}]"#;
        assert_eq!(extract_json(response), response);
    }

    #[test]
    fn test_extract_json_markdown() {
        let response = "```json\n[1, 2]\n```";
        assert_eq!(extract_json(response), "[1, 2]");
    }
}
