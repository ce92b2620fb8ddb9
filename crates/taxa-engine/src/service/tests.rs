use super::*;
use crate::embedding::MockEmbedder;
use crate::selection::SelectionConfig;
use crate::taxonomy::Taxonomy;

const WEATHER_DESC: &str = "storms, rainfall, flooding, weather warnings";
const DISASTER_DESC: &str = "earthquakes, rescue operations, evacuations";

fn two_label_taxonomy() -> Taxonomy {
    Taxonomy::from_json(&format!(
        r#"[
            {{"label": "weather", "description": "{WEATHER_DESC}"}},
            {{"label": "disaster", "description": "{DISASTER_DESC}"}}
        ]"#
    ))
    .unwrap()
}

fn scenario_config() -> SelectionConfig {
    SelectionConfig {
        min_score: 0.22,
        soft_top_floor: 0.16,
        second_min_score: 0.18,
        second_ratio: 0.70,
        max_labels: 2,
    }
}

/// Article vector scoring 0.30 against weather and 0.24 against disaster.
fn scripted_embedder() -> MockEmbedder {
    let third = (1.0f32 - 0.30 * 0.30 - 0.24 * 0.24).sqrt();
    MockEmbedder::new(4)
        .with_vector(WEATHER_DESC, vec![1.0, 0.0, 0.0, 0.0])
        .with_vector(DISASTER_DESC, vec![0.0, 1.0, 0.0, 0.0])
        .with_vector("Flood warning", vec![0.30, 0.24, third, 0.0])
}

#[tokio::test]
async fn test_empty_input_short_circuits_without_embedding() {
    let embedder = std::sync::Arc::new(MockEmbedder::new(4));
    let categorizer = Categorizer::new(
        std::sync::Arc::clone(&embedder),
        two_label_taxonomy(),
        scenario_config(),
    )
    .unwrap();

    let outcome = categorizer.categorize("", "", "").await.unwrap();

    assert_eq!(outcome.labels, vec!["general"]);
    assert_eq!(outcome.reason, SelectionReason::NoScores);
    assert!(outcome.scores.is_empty());
    // The embedder was never invoked, not even for reference warm-up.
    assert_eq!(embedder.calls(), 0);
    assert!(!categorizer.references_warm());
}

#[tokio::test]
async fn test_whitespace_only_input_short_circuits() {
    let embedder = std::sync::Arc::new(MockEmbedder::new(4));
    let categorizer = Categorizer::new(
        std::sync::Arc::clone(&embedder),
        two_label_taxonomy(),
        scenario_config(),
    )
    .unwrap();

    let outcome = categorizer.categorize("  ", "\n\t", "   ").await.unwrap();

    assert_eq!(outcome.labels, vec!["general"]);
    assert_eq!(embedder.calls(), 0);
}

#[tokio::test]
async fn test_two_label_scenario_end_to_end() {
    let categorizer =
        Categorizer::new(scripted_embedder(), two_label_taxonomy(), scenario_config()).unwrap();

    let outcome = categorizer.categorize("Flood warning", "", "").await.unwrap();

    assert_eq!(outcome.labels, vec!["weather", "disaster"]);
    assert_eq!(outcome.reason, SelectionReason::PickedOk);
    assert_eq!(outcome.scores.len(), 2);
    assert!((outcome.scores[0].score - 0.30).abs() < 1e-5);
    assert!((outcome.scores[1].score - 0.24).abs() < 1e-5);
    assert!(categorizer.references_warm());
}

#[tokio::test]
async fn test_identical_input_yields_identical_output() {
    let categorizer = Categorizer::new(
        MockEmbedder::new(16),
        two_label_taxonomy(),
        scenario_config(),
    )
    .unwrap();

    let first = categorizer.categorize("Some headline", "body", "aux").await.unwrap();
    let second = categorizer.categorize("Some headline", "body", "aux").await.unwrap();

    assert_eq!(first.labels, second.labels);
    assert_eq!(first.reason, second.reason);
    assert_eq!(first.scores, second.scores);
}

#[tokio::test]
async fn test_references_embedded_once_across_requests() {
    let embedder = std::sync::Arc::new(MockEmbedder::new(16));
    let categorizer = Categorizer::new(
        std::sync::Arc::clone(&embedder),
        two_label_taxonomy(),
        scenario_config(),
    )
    .unwrap();

    categorizer.categorize("first article", "", "").await.unwrap();
    categorizer.categorize("second article", "", "").await.unwrap();

    // Two descriptor embeddings on warm-up, then one per article.
    assert_eq!(embedder.calls(), 4);
}

#[tokio::test]
async fn test_embedding_failure_surfaces_as_service_error() {
    let embedder = MockEmbedder::new(4);
    embedder.set_failing(true);
    let categorizer =
        Categorizer::new(embedder, two_label_taxonomy(), scenario_config()).unwrap();

    let err = categorizer.categorize("Flood warning", "", "").await.unwrap_err();
    assert!(matches!(err, CategorizeError::Embedding(_)));
}

#[tokio::test]
async fn test_warm_references() {
    let categorizer = Categorizer::new(
        MockEmbedder::new(8),
        two_label_taxonomy(),
        scenario_config(),
    )
    .unwrap();

    assert!(!categorizer.references_warm());
    categorizer.warm_references().await.unwrap();
    assert!(categorizer.references_warm());
}

#[test]
fn test_new_rejects_incoherent_thresholds() {
    let bad = SelectionConfig {
        soft_top_floor: 0.5,
        min_score: 0.1,
        ..Default::default()
    };
    let err = Categorizer::new(MockEmbedder::new(4), two_label_taxonomy(), bad).unwrap_err();
    assert!(matches!(err, CategorizeError::InvalidSelectionConfig(_)));
}

#[test]
fn test_combine_text_order_and_trim() {
    assert_eq!(combine_text("title", "aux", "body"), "title\n\naux\n\nbody");
    assert_eq!(combine_text("title", "", ""), "title");
    assert_eq!(combine_text("", "", ""), "");
    assert_eq!(combine_text(" ", "\n", "\t"), "");
}

#[tokio::test]
async fn test_top_truncation_never_changes_labels() {
    let categorizer =
        Categorizer::new(scripted_embedder(), two_label_taxonomy(), scenario_config()).unwrap();

    let outcome = categorizer.categorize("Flood warning", "", "").await.unwrap();
    let labels_before = outcome.labels.clone();

    assert_eq!(outcome.top(1).len(), 1);
    assert_eq!(outcome.top(10).len(), 2);
    assert_eq!(outcome.labels, labels_before);
}
