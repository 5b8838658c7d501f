//! Configuration files and environment overrides.

mod common;

use bagging_rust::*;
use common::*;
use tempfile::TempDir;

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bagging.toml");

    let config = ConfigBuilder::new()
        .n_estimators(33)
        .random_seed(123)
        .oob_score(true)
        .learner_kind(LearnerKind::DecisionTree)
        .max_depth(6)
        .build()
        .unwrap();
    config.save_to_file(&path).unwrap();

    let loaded = BaggingConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.learner.tree.max_depth, Some(6));
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bagging.json");

    let config = ConfigBuilder::new()
        .n_estimators(4)
        .parallel(true)
        .num_threads(3)
        .learner_kind(LearnerKind::Linear)
        .alpha(0.25)
        .build()
        .unwrap();
    config.save_to_file(&path).unwrap();
    assert_eq!(BaggingConfig::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.toml");
    std::fs::write(
        &path,
        "n_estimators = 7\n\n[learner]\nkind = \"mean\"\n",
    )
    .unwrap();

    let config = BaggingConfig::load_from_file(&path).unwrap();
    assert_eq!(config.n_estimators, 7);
    assert_eq!(config.learner.kind, LearnerKind::Mean);
    assert_eq!(config.random_seed, DEFAULT_RANDOM_SEED);
    assert!(!config.oob_score);
}

#[test]
fn test_invalid_file_contents_rejected() {
    let dir = TempDir::new().unwrap();

    let zero = dir.path().join("zero.toml");
    std::fs::write(&zero, "n_estimators = 0\n").unwrap();
    assert!(matches!(
        BaggingConfig::load_from_file(&zero),
        Err(BaggingError::InvalidParameter { .. })
    ));

    let garbage = dir.path().join("garbage.json");
    std::fs::write(&garbage, "{ not json").unwrap();
    assert!(matches!(
        BaggingConfig::load_from_file(&garbage),
        Err(BaggingError::Config { .. })
    ));

    let missing = dir.path().join("missing.toml");
    assert!(BaggingConfig::load_from_file(&missing).is_err());
}

// The only test in this binary that touches BAGGING_* variables.
#[test]
fn test_environment_overrides() {
    let vars = [
        ("BAGGING_N_ESTIMATORS", "17"),
        ("BAGGING_RANDOM_SEED", "99"),
        ("BAGGING_OOB_SCORE", "true"),
        ("BAGGING_PARALLEL", "true"),
        ("BAGGING_NUM_THREADS", "2"),
        ("BAGGING_LEARNER", "linear"),
    ];
    for (name, value) in vars {
        std::env::set_var(name, value);
    }

    let config = BaggingConfig::load_from_environment().unwrap();
    assert_eq!(config.n_estimators, 17);
    assert_eq!(config.random_seed, 99);
    assert!(config.oob_score);
    assert!(config.parallel);
    assert_eq!(config.num_threads, 2);
    assert_eq!(config.learner.kind, LearnerKind::Linear);

    let mut file_config = BaggingConfig {
        n_estimators: 3,
        ..BaggingConfig::default()
    };
    file_config.apply_environment_overrides().unwrap();
    assert_eq!(file_config.n_estimators, 17);

    std::env::set_var("BAGGING_N_ESTIMATORS", "many");
    assert!(matches!(
        BaggingConfig::load_from_environment(),
        Err(BaggingError::Config { .. })
    ));

    std::env::set_var("BAGGING_N_ESTIMATORS", "0");
    assert!(BaggingConfig::load_from_environment().is_err());

    for (name, _) in vars {
        std::env::remove_var(name);
    }
    assert_eq!(BaggingConfig::load_from_environment().unwrap(), BaggingConfig::default());
}

#[test]
fn test_loaded_config_builds_ensemble() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ensemble.toml");
    std::fs::write(
        &path,
        "n_estimators = 5\nrandom_seed = 8\n\n[learner]\nkind = \"decision_tree\"\n\n[learner.tree]\nmax_depth = 3\n",
    )
    .unwrap();

    let config = BaggingConfig::load_from_file(&path).unwrap();
    let dataset = create_nonlinear_dataset(60, 0.1);
    let ensemble = BaggingRegressor::from_config(config).fit_seeded(&dataset).unwrap();
    assert_eq!(ensemble.num_members(), 5);

    for member in ensemble.members() {
        assert_eq!(member.name(), "decision_tree");
    }
}
