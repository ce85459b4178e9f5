//! End-to-end test for the content generation pipeline.
//!
//! Runs the full pipeline against a temporary output directory and checks
//! that the three expected JSON files exist and follow the expected
//! structure. Structure only, not wording, so the test stays stable as
//! copy changes.

use glowgen::ollama::DisabledGenerator;
use glowgen::output;
use glowgen::pipeline::Pipeline;
use glowgen_common::{GlowgenError, Product};
use std::fs;

fn sample_input() -> serde_json::Value {
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

#[tokio::test]
async fn test_pipeline_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = dir.path().join("output");

    let product = Product::from_value(sample_input()).unwrap();
    let pipeline = Pipeline::standard(Box::new(DisabledGenerator));
    let state = pipeline.run(product).await.unwrap();
    output::write_documents(&state, &output_dir).unwrap();

    let faq_file = output_dir.join("faq.json");
    let product_file = output_dir.join("product_page.json");
    let comparison_file = output_dir.join("comparison_page.json");

    assert!(faq_file.exists(), "faq.json was not created");
    assert!(product_file.exists(), "product_page.json was not created");
    assert!(
        comparison_file.exists(),
        "comparison_page.json was not created"
    );

    // FAQ: 15 questions even without a generative backend
    let faq: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&faq_file).unwrap()).unwrap();
    assert_eq!(faq["total_questions"], 15);
    assert_eq!(faq["sections"].as_array().unwrap().len(), 5);
    for section in faq["sections"].as_array().unwrap() {
        let items = section["items"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        for item in items {
            let question = item["question"].as_str().unwrap();
            let answer = item["answer"].as_str().unwrap();
            assert!(question.ends_with('?'));
            assert!(!answer.is_empty());
        }
    }

    // Product page: fixed top-level shape
    let page: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&product_file).unwrap()).unwrap();
    assert_eq!(page["page_type"], "product_page");
    for field in [
        "product_name",
        "headline",
        "tagline",
        "hero_section",
        "key_features",
        "ingredients",
        "how_to_use",
        "safety_information",
        "pricing",
        "who_is_it_for",
    ] {
        assert!(page.get(field).is_some(), "product page missing {}", field);
    }

    // Comparison page: five resolved aspects
    let comparison: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&comparison_file).unwrap()).unwrap();
    assert_eq!(comparison["page_type"], "product_comparison");
    let table = comparison["comparison_table"].as_array().unwrap();
    assert_eq!(table.len(), 5);
    for row in table {
        let winner = row["winner"].as_str().unwrap();
        assert!(
            winner == "product_a" || winner == "product_b" || winner == "equal",
            "unexpected winner {}",
            winner
        );
    }
    assert!(comparison["products"]["product_a"].is_object());
    assert!(comparison["products"]["product_b"].is_object());
}

#[tokio::test]
async fn test_missing_price_aborts_before_any_output() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = dir.path().join("output");

    let mut input = sample_input();
    input.as_object_mut().unwrap().remove("price");

    let err = Product::from_value(input).unwrap_err();
    match err {
        GlowgenError::Validation { missing } => {
            assert_eq!(missing, vec!["price".to_string()]);
        }
        other => panic!("expected Validation, got {:?}", other),
    }

    // The run never got to the pipeline, so no output directory exists
    assert!(!output_dir.exists());
}

#[tokio::test]
async fn test_repeated_runs_write_identical_bytes() {
    let dir_one = tempfile::tempdir().unwrap();
    let dir_two = tempfile::tempdir().unwrap();

    for dir in [dir_one.path(), dir_two.path()] {
        let product = Product::from_value(sample_input()).unwrap();
        let pipeline = Pipeline::standard(Box::new(DisabledGenerator));
        let state = pipeline.run(product).await.unwrap();
        output::write_documents(&state, dir).unwrap();
    }

    for name in ["faq.json", "product_page.json", "comparison_page.json"] {
        let first = fs::read(dir_one.path().join(name)).unwrap();
        let second = fs::read(dir_two.path().join(name)).unwrap();
        assert_eq!(first, second, "{} differs between runs", name);
    }
}
