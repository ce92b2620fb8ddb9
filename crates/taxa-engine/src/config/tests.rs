use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_taxa_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("TAXA_PORT");
        env::remove_var("TAXA_BIND_ADDR");
        env::remove_var("TAXA_MODEL_PATH");
        env::remove_var("TAXA_TAXONOMY_PATH");
        env::remove_var("TAXA_MIN_SCORE");
        env::remove_var("TAXA_SOFT_TOP_FLOOR");
        env::remove_var("TAXA_SECOND_MIN_SCORE");
        env::remove_var("TAXA_SECOND_RATIO");
        env::remove_var("TAXA_MAX_LABELS");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 3000);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert!(config.model_path.is_none());
    assert!(config.taxonomy_path.is_none());
    assert!((config.selection.min_score - 0.14).abs() < 1e-6);
    assert!((config.selection.second_ratio - 0.70).abs() < 1e-6);
    assert_eq!(config.selection.max_labels, 2);
}

#[test]
fn test_default_config_validates() {
    Config::default().validate().expect("defaults must validate");
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:3000");

    let config = Config {
        port: 8080,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:8080");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_taxa_env();

    let config = Config::from_env().expect("should parse with defaults");
    assert_eq!(config.port, 3000);
    assert!(config.model_path.is_none());
}

#[test]
#[serial]
fn test_from_env_custom_port() {
    clear_taxa_env();

    with_env_vars(&[("TAXA_PORT", "8080")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.port, 8080);
    });
}

#[test]
#[serial]
fn test_from_env_rejects_bad_port() {
    clear_taxa_env();

    with_env_vars(&[("TAXA_PORT", "not-a-port")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::PortParseError { .. }));
    });

    with_env_vars(&[("TAXA_PORT", "0")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    });
}

#[test]
#[serial]
fn test_from_env_custom_bind_addr() {
    clear_taxa_env();

    with_env_vars(&[("TAXA_BIND_ADDR", "0.0.0.0")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(
            config.bind_addr,
            IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0))
        );
    });
}

#[test]
#[serial]
fn test_from_env_threshold_overrides() {
    clear_taxa_env();

    with_env_vars(
        &[
            ("TAXA_MIN_SCORE", "0.22"),
            ("TAXA_SOFT_TOP_FLOOR", "0.16"),
            ("TAXA_SECOND_MIN_SCORE", "0.18"),
            ("TAXA_SECOND_RATIO", "0.8"),
            ("TAXA_MAX_LABELS", "1"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert!((config.selection.min_score - 0.22).abs() < 1e-6);
            assert!((config.selection.soft_top_floor - 0.16).abs() < 1e-6);
            assert!((config.selection.second_min_score - 0.18).abs() < 1e-6);
            assert!((config.selection.second_ratio - 0.8).abs() < 1e-6);
            assert_eq!(config.selection.max_labels, 1);
            config.validate().expect("overrides must validate");
        },
    );
}

#[test]
#[serial]
fn test_from_env_rejects_malformed_threshold() {
    clear_taxa_env();

    with_env_vars(&[("TAXA_MIN_SCORE", "high")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::FloatParseError {
                name: "TAXA_MIN_SCORE",
                ..
            }
        ));
    });
}

#[test]
#[serial]
fn test_validate_rejects_ratio_out_of_range() {
    clear_taxa_env();

    with_env_vars(&[("TAXA_SECOND_RATIO", "1.5")], || {
        // Parses fine, but validation rejects it before serving.
        let config = Config::from_env().expect("should parse");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Selection(_)));
    });
}

#[test]
#[serial]
fn test_validate_rejects_soft_floor_above_min_score() {
    clear_taxa_env();

    with_env_vars(
        &[("TAXA_SOFT_TOP_FLOOR", "0.3"), ("TAXA_MIN_SCORE", "0.2")],
        || {
            let config = Config::from_env().expect("should parse");
            let err = config.validate().unwrap_err();
            assert!(matches!(err, ConfigError::Selection(_)));
        },
    );
}

#[test]
#[serial]
fn test_from_env_model_path() {
    clear_taxa_env();

    with_env_vars(&[("TAXA_MODEL_PATH", "/models/minilm")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(
            config.model_path,
            Some(std::path::PathBuf::from("/models/minilm"))
        );
    });

    with_env_vars(&[("TAXA_MODEL_PATH", "  ")], || {
        let config = Config::from_env().expect("should parse");
        assert!(config.model_path.is_none());
    });
}

#[test]
fn test_validate_rejects_missing_model_dir() {
    let config = Config {
        model_path: Some("/nonexistent/minilm".into()),
        ..Default::default()
    };
    assert!(matches!(
        config.validate().unwrap_err(),
        ConfigError::PathNotFound { .. }
    ));
}

#[test]
fn test_validate_rejects_model_path_that_is_a_file() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let config = Config {
        model_path: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    assert!(matches!(
        config.validate().unwrap_err(),
        ConfigError::NotADirectory { .. }
    ));
}

#[test]
fn test_validate_rejects_taxonomy_path_that_is_a_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        taxonomy_path: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    assert!(matches!(
        config.validate().unwrap_err(),
        ConfigError::NotAFile { .. }
    ));
}
