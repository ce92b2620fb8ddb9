use super::*;
use crate::embedding::Embedder;

#[test]
fn test_stub_load() {
    let embedder = MiniLmEmbedder::load(MiniLmConfig::stub()).expect("stub should always load");
    assert!(embedder.is_stub());
    assert!(!embedder.has_model());
    assert_eq!(embedder.dim(), MINILM_EMBEDDING_DIM);
    assert_eq!(embedder.config().max_seq_len, MINILM_MAX_SEQ_LEN);
    assert!(embedder.config().testing_stub);
}

#[test]
fn test_stub_embedding_is_deterministic() {
    let embedder = MiniLmEmbedder::load(MiniLmConfig::stub()).unwrap();

    let a = embedder.embed("storm warning over the coast").unwrap();
    let b = embedder.embed("storm warning over the coast").unwrap();
    assert_eq!(a, b);

    let c = embedder.embed("different text entirely").unwrap();
    assert_ne!(a, c);
}

#[test]
fn test_stub_embedding_is_unit_length() {
    let embedder = MiniLmEmbedder::load(MiniLmConfig::stub()).unwrap();
    let v = embedder.embed("some article body").unwrap();

    assert_eq!(v.len(), MINILM_EMBEDDING_DIM);
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5, "norm was {norm}");
}

#[test]
fn test_validate_rejects_missing_model_dir() {
    let config = MiniLmConfig::default();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, EmbeddingError::InvalidConfig { .. }));
}

#[test]
fn test_validate_rejects_nonexistent_model_dir() {
    let config = MiniLmConfig::new("/nonexistent/minilm");
    let err = config.validate().unwrap_err();
    assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
}

#[test]
fn test_validate_rejects_zero_dim() {
    let config = MiniLmConfig {
        embedding_dim: 0,
        ..MiniLmConfig::stub()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, EmbeddingError::InvalidConfig { .. }));
}

#[test]
fn test_load_reports_missing_files_for_empty_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = MiniLmConfig::new(dir.path());
    let err = MiniLmEmbedder::load(config).unwrap_err();
    assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
}

#[test]
fn test_model_file_paths() {
    let config = MiniLmConfig::new("/models/minilm");
    assert_eq!(
        config.tokenizer_path(),
        std::path::PathBuf::from("/models/minilm/tokenizer.json")
    );
    assert_eq!(
        config.weights_path(),
        std::path::PathBuf::from("/models/minilm/model.safetensors")
    );
}
