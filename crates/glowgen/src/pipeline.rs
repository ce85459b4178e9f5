//! Pipeline runner and the accumulating run state.
//!
//! A fixed, linear sequence of stages over an append-only state. Each stage
//! declares the keys it reads and the keys it writes; the runner checks
//! preconditions before a stage runs and rejects any overwrite or
//! undeclared write when merging the stage's delta. The runner sequences
//! and validates; all content logic lives in the stages' callees.

use crate::ollama::QuestionGenerator;
use crate::{pages, synthesizer};
use async_trait::async_trait;
use glowgen_common::{GlowgenError, Product, QuestionSet};
use std::collections::BTreeMap;
use tracing::info;

/// Keys a stage may read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StateKey {
    Product,
    Questions,
    FaqDocument,
    ProductPageDocument,
    ComparisonDocument,
}

impl StateKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateKey::Product => "product",
            StateKey::Questions => "questions",
            StateKey::FaqDocument => "faq_document",
            StateKey::ProductPageDocument => "product_page_document",
            StateKey::ComparisonDocument => "comparison_document",
        }
    }
}

/// One artifact held in the pipeline state.
#[derive(Debug, Clone)]
pub enum StateValue {
    Product(Product),
    Questions(QuestionSet),
    Faq(pages::FaqDocument),
    ProductPage(pages::ProductPageDocument),
    Comparison(pages::ComparisonPageDocument),
}

/// Append-only state carried across stages. The runner is the only writer.
#[derive(Debug, Default)]
pub struct PipelineState {
    values: BTreeMap<StateKey, StateValue>,
}

impl PipelineState {
    /// State for a fresh run, seeded with the validated product record.
    pub fn seeded(product: Product) -> Self {
        let mut values = BTreeMap::new();
        values.insert(StateKey::Product, StateValue::Product(product));
        Self { values }
    }

    pub fn contains(&self, key: StateKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn product(&self) -> Option<&Product> {
        match self.values.get(&StateKey::Product) {
            Some(StateValue::Product(product)) => Some(product),
            _ => None,
        }
    }

    pub fn questions(&self) -> Option<&QuestionSet> {
        match self.values.get(&StateKey::Questions) {
            Some(StateValue::Questions(questions)) => Some(questions),
            _ => None,
        }
    }

    pub fn faq_document(&self) -> Option<&pages::FaqDocument> {
        match self.values.get(&StateKey::FaqDocument) {
            Some(StateValue::Faq(document)) => Some(document),
            _ => None,
        }
    }

    pub fn product_page_document(&self) -> Option<&pages::ProductPageDocument> {
        match self.values.get(&StateKey::ProductPageDocument) {
            Some(StateValue::ProductPage(document)) => Some(document),
            _ => None,
        }
    }

    pub fn comparison_document(&self) -> Option<&pages::ComparisonPageDocument> {
        match self.values.get(&StateKey::ComparisonDocument) {
            Some(StateValue::Comparison(document)) => Some(document),
            _ => None,
        }
    }

    fn insert(&mut self, key: StateKey, value: StateValue) {
        self.values.insert(key, value);
    }
}

/// The writes one stage produced, merged by the runner.
pub type StateDelta = Vec<(StateKey, StateValue)>;

/// One step of the pipeline.
#[async_trait]
pub trait Stage: Send + Sync {
    fn name(&self) -> &'static str;

    /// Keys that must be present before this stage runs.
    fn requires(&self) -> &'static [StateKey];

    /// Keys this stage is allowed to write.
    fn provides(&self) -> &'static [StateKey];

    async fn run(&self, state: &PipelineState) -> Result<StateDelta, GlowgenError>;
}

fn missing(stage: &'static str, key: StateKey) -> GlowgenError {
    GlowgenError::MissingState {
        stage: stage.to_string(),
        key: key.as_str().to_string(),
    }
}

/// Synthesizes the question set, generatively when possible.
pub struct QuestionStage {
    generator: Box<dyn QuestionGenerator>,
}

impl QuestionStage {
    pub fn new(generator: Box<dyn QuestionGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Stage for QuestionStage {
    fn name(&self) -> &'static str {
        "questions"
    }

    fn requires(&self) -> &'static [StateKey] {
        &[StateKey::Product]
    }

    fn provides(&self) -> &'static [StateKey] {
        &[StateKey::Questions]
    }

    async fn run(&self, state: &PipelineState) -> Result<StateDelta, GlowgenError> {
        let product = state
            .product()
            .ok_or_else(|| missing(self.name(), StateKey::Product))?;
        let questions = synthesizer::synthesize(product, self.generator.as_ref()).await;
        Ok(vec![(
            StateKey::Questions,
            StateValue::Questions(questions),
        )])
    }
}

/// Routes every question to an answer and shapes the FAQ document.
pub struct FaqStage;

#[async_trait]
impl Stage for FaqStage {
    fn name(&self) -> &'static str {
        "faq"
    }

    fn requires(&self) -> &'static [StateKey] {
        &[StateKey::Product, StateKey::Questions]
    }

    fn provides(&self) -> &'static [StateKey] {
        &[StateKey::FaqDocument]
    }

    async fn run(&self, state: &PipelineState) -> Result<StateDelta, GlowgenError> {
        let product = state
            .product()
            .ok_or_else(|| missing(self.name(), StateKey::Product))?;
        let questions = state
            .questions()
            .ok_or_else(|| missing(self.name(), StateKey::Questions))?;
        let document = pages::build_faq(product, questions);
        Ok(vec![(StateKey::FaqDocument, StateValue::Faq(document))])
    }
}

/// Assembles the product page from the logic blocks.
pub struct ProductPageStage;

#[async_trait]
impl Stage for ProductPageStage {
    fn name(&self) -> &'static str {
        "product_page"
    }

    fn requires(&self) -> &'static [StateKey] {
        &[StateKey::Product]
    }

    fn provides(&self) -> &'static [StateKey] {
        &[StateKey::ProductPageDocument]
    }

    async fn run(&self, state: &PipelineState) -> Result<StateDelta, GlowgenError> {
        let product = state
            .product()
            .ok_or_else(|| missing(self.name(), StateKey::Product))?;
        let document = pages::build_product_page(product);
        Ok(vec![(
            StateKey::ProductPageDocument,
            StateValue::ProductPage(document),
        )])
    }
}

/// Builds the comparison page against the fictional counterpart.
pub struct ComparisonStage;

#[async_trait]
impl Stage for ComparisonStage {
    fn name(&self) -> &'static str {
        "comparison"
    }

    fn requires(&self) -> &'static [StateKey] {
        &[StateKey::Product]
    }

    fn provides(&self) -> &'static [StateKey] {
        &[StateKey::ComparisonDocument]
    }

    async fn run(&self, state: &PipelineState) -> Result<StateDelta, GlowgenError> {
        let product = state
            .product()
            .ok_or_else(|| missing(self.name(), StateKey::Product))?;
        let document = pages::build_comparison_page(product);
        Ok(vec![(
            StateKey::ComparisonDocument,
            StateValue::Comparison(document),
        )])
    }
}

/// The fixed, linear stage sequence.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// The standard four-stage run.
    pub fn standard(generator: Box<dyn QuestionGenerator>) -> Self {
        Self {
            stages: vec![
                Box::new(QuestionStage::new(generator)),
                Box::new(FaqStage),
                Box::new(ProductPageStage),
                Box::new(ComparisonStage),
            ],
        }
    }

    /// A pipeline with an explicit stage list. Exposed for tests.
    pub fn with_stages(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Run every stage in order over a state seeded with the product.
    ///
    /// Aborts on the first missing precondition, overwrite, or undeclared
    /// write; nothing of a failed run is exposed.
    pub async fn run(&self, product: Product) -> Result<PipelineState, GlowgenError> {
        let mut state = PipelineState::seeded(product);

        for stage in &self.stages {
            for key in stage.requires() {
                if !state.contains(*key) {
                    return Err(GlowgenError::MissingState {
                        stage: stage.name().to_string(),
                        key: key.as_str().to_string(),
                    });
                }
            }

            info!("running stage '{}'", stage.name());
            let delta = stage.run(&state).await?;

            for (key, value) in delta {
                if !stage.provides().contains(&key) {
                    return Err(GlowgenError::UndeclaredState {
                        stage: stage.name().to_string(),
                        key: key.as_str().to_string(),
                    });
                }
                if state.contains(key) {
                    return Err(GlowgenError::DuplicateState {
                        stage: stage.name().to_string(),
                        key: key.as_str().to_string(),
                    });
                }
                state.insert(key, value);
            }
        }

        Ok(state)
    }
}
