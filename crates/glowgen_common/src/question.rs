//! Question types and the question-set invariants.
//!
//! A `QuestionSet` is only constructible through `QuestionSet::new`, which
//! enforces the invariants every downstream consumer relies on: at least 15
//! questions, at least 3 per category, every text ends in `?`, no duplicate
//! text. Both the generated and the fallback paths go through the same
//! constructor, so the guarantees hold regardless of source.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Minimum number of questions in a valid set.
pub const MIN_TOTAL_QUESTIONS: usize = 15;

/// Minimum number of questions per category.
pub const MIN_PER_CATEGORY: usize = 3;

/// The five fixed question categories, in section order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionCategory {
    Informational,
    Usage,
    Safety,
    Purchase,
    Comparison,
}

impl QuestionCategory {
    /// All categories in the order sections appear in the FAQ document.
    pub const ALL: [QuestionCategory; 5] = [
        QuestionCategory::Informational,
        QuestionCategory::Usage,
        QuestionCategory::Safety,
        QuestionCategory::Purchase,
        QuestionCategory::Comparison,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionCategory::Informational => "informational",
            QuestionCategory::Usage => "usage",
            QuestionCategory::Safety => "safety",
            QuestionCategory::Purchase => "purchase",
            QuestionCategory::Comparison => "comparison",
        }
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One categorized question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub category: QuestionCategory,
}

/// Reasons a candidate question list fails the set invariants.
#[derive(Error, Debug, PartialEq)]
pub enum QuestionSetError {
    #[error("{} questions, need at least {}", .total, MIN_TOTAL_QUESTIONS)]
    TooFew { total: usize },

    #[error("category '{}' has {} questions, need at least {}", .category, .count, MIN_PER_CATEGORY)]
    CategoryShortfall {
        category: QuestionCategory,
        count: usize,
    },

    #[error("question '{text}' does not end with '?'")]
    MissingTerminator { text: String },

    #[error("empty question text")]
    EmptyText,

    #[error("duplicate question '{text}'")]
    Duplicate { text: String },
}

/// An ordered, validated set of questions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Validate a candidate list and wrap it. Order is preserved.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionSetError> {
        if questions.len() < MIN_TOTAL_QUESTIONS {
            return Err(QuestionSetError::TooFew {
                total: questions.len(),
            });
        }

        let mut seen = HashSet::new();
        for question in &questions {
            let text = question.text.trim();
            if text.is_empty() {
                return Err(QuestionSetError::EmptyText);
            }
            if !text.ends_with('?') {
                return Err(QuestionSetError::MissingTerminator {
                    text: question.text.clone(),
                });
            }
            if !seen.insert(text.to_lowercase()) {
                return Err(QuestionSetError::Duplicate {
                    text: question.text.clone(),
                });
            }
        }

        for category in QuestionCategory::ALL {
            let count = questions.iter().filter(|q| q.category == category).count();
            if count < MIN_PER_CATEGORY {
                return Err(QuestionSetError::CategoryShortfall { category, count });
            }
        }

        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions of one category, in set order.
    pub fn in_category(&self, category: QuestionCategory) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.category == category)
            .collect()
    }
}
