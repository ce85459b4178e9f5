//! Deterministic answer routing.
//!
//! An ordered rule table maps each question to an answer built from product
//! fields alone. Predicates are case-insensitive keyword checks against the
//! question text; the first matching rule wins; the table ends with a
//! catch-all, so every question gets exactly one answer.

use glowgen_common::{Product, Question, QuestionSet};
use serde::Serialize;

/// One question paired with its routed answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqEntry {
    pub question: Question,
    pub answer: String,
}

type AnswerFn = fn(&Product) -> String;

/// A single routing rule.
pub struct AnswerRule {
    /// Short identifier, used in logs and tests
    pub name: &'static str,
    /// Lowercase keywords; an empty list matches everything
    keywords: &'static [&'static str],
    answer: AnswerFn,
}

impl AnswerRule {
    fn matches(&self, question_text: &str) -> bool {
        if self.keywords.is_empty() {
            return true;
        }
        let lowered = question_text.to_lowercase();
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

/// The fixed rule table, highest priority first. The final rule has no
/// keywords and therefore always matches.
static RULES: &[AnswerRule] = &[
    AnswerRule {
        name: "price",
        keywords: &["price", "cost"],
        answer: answer_price,
    },
    AnswerRule {
        name: "usage",
        keywords: &["apply", "routine", "how to use", "morning", "night"],
        answer: answer_usage,
    },
    AnswerRule {
        name: "safety",
        keywords: &[
            "side effect",
            "safe",
            "sensitive",
            "irritation",
            "tingling",
            "warning",
        ],
        answer: answer_safety,
    },
    AnswerRule {
        name: "actives",
        keywords: &["retinol", "aha", "bha", "layer", "other active"],
        answer: answer_actives,
    },
    AnswerRule {
        name: "ingredients",
        keywords: &["ingredient", "contain", "formula"],
        answer: answer_ingredients,
    },
    AnswerRule {
        name: "skin_type",
        keywords: &["suitable", "skin type", "oily", "dry", "combination"],
        answer: answer_skin_type,
    },
    AnswerRule {
        name: "benefits",
        keywords: &["benefit", "dark spot", "brighten", "dullness"],
        answer: answer_benefits,
    },
    AnswerRule {
        name: "results",
        keywords: &["how long", "see results"],
        answer: answer_results,
    },
    AnswerRule {
        name: "value",
        keywords: &["worth", "compare price"],
        answer: answer_value,
    },
    AnswerRule {
        name: "overview",
        keywords: &[],
        answer: answer_overview,
    },
];

fn answer_price(product: &Product) -> String {
    format!("The price of {} is ₹{}.", product.name, product.price)
}

fn answer_usage(product: &Product) -> String {
    product.how_to_use.clone()
}

fn answer_safety(product: &Product) -> String {
    format!("Possible side effects include: {}", product.side_effects)
}

fn answer_actives(product: &Product) -> String {
    format!(
        "The key ingredients in {} are {}, so it should be paired carefully with stronger actives.",
        product.name,
        product.ingredients_joined()
    )
}

fn answer_ingredients(product: &Product) -> String {
    format!(
        "The key ingredients in {} are: {}.",
        product.name,
        product.ingredients_joined()
    )
}

fn answer_skin_type(product: &Product) -> String {
    format!(
        "{} is suitable for {} skin types.",
        product.name,
        product.skin_types_joined()
    )
}

fn answer_benefits(product: &Product) -> String {
    format!(
        "{} mainly focuses on {}.",
        product.name,
        product.benefits_joined().to_lowercase()
    )
}

fn answer_results(_product: &Product) -> String {
    "It generally takes 3-4 weeks of consistent use to see visible improvements.".to_string()
}

fn answer_value(product: &Product) -> String {
    format!(
        "It offers {} at a price of ₹{}.",
        product.benefits_joined().to_lowercase(),
        product.price
    )
}

fn answer_overview(product: &Product) -> String {
    format!("{} is {}.", product.name, product.tagline())
}

/// Route one question through the rule table.
pub fn route(product: &Product, question: &Question) -> FaqEntry {
    let rule = RULES
        .iter()
        .find(|rule| rule.matches(&question.text))
        .expect("rule table ends with a catch-all");

    FaqEntry {
        question: question.clone(),
        answer: (rule.answer)(product),
    }
}

/// Name of the rule a question text would hit. Exposed for tests.
pub fn matching_rule(question_text: &str) -> &'static str {
    RULES
        .iter()
        .find(|rule| rule.matches(question_text))
        .expect("rule table ends with a catch-all")
        .name
}

/// Answer every question in the set, preserving order.
pub fn build_faq_entries(product: &Product, questions: &QuestionSet) -> Vec<FaqEntry> {
    questions
        .questions()
        .iter()
        .map(|question| route(product, question))
        .collect()
}
