//! Bagged decision trees on a noisy sine curve.
//!
//! Compares the test error of a single deep tree with that of a bagged
//! ensemble of the same trees, then cross-validates both.
//!
//! Run with: `cargo run --example noisy_sine`

use anyhow::{Context, Result};
use bagging_rust::*;
use ndarray::{Array1, Array2};
use rand::prelude::*;
use std::time::Instant;

fn noisy_sine(num_samples: usize, rng: &mut StdRng) -> bagging_rust::Result<Dataset> {
    let features = Array2::from_shape_fn((num_samples, 1), |_| rng.gen_range(0.0..6.0));
    let targets: Array1<f64> = features
        .column(0)
        .mapv(|x: f64| x.sin())
        .mapv(|y| y + rng.gen_range(-0.4..0.4));
    Dataset::new(features, targets)
}

fn main() -> Result<()> {
    bagging_rust::init();

    println!("bagging-rust {} - noisy sine demo", VERSION);
    println!("==================================");

    let mut rng = StdRng::seed_from_u64(2024);
    let dataset = noisy_sine(400, &mut rng).context("building dataset")?;
    let (train, test) = train_test_split(&dataset, 0.25, &mut rng)?;
    println!(
        "train: {} samples, test: {} samples",
        train.num_data(),
        test.num_data()
    );

    let mut single = DecisionTreeRegressor::new();
    single.fit(&train.features(), &train.targets())?;
    let single_pred = single.predict(&test.features())?;
    let single_metrics = evaluate_regression(&test.targets(), &single_pred.view())?;

    let config = ConfigBuilder::new()
        .n_estimators(50)
        .random_seed(7)
        .oob_score(true)
        .parallel(true)
        .build()?;
    let start = Instant::now();
    let ensemble = BaggingRegressor::new(DecisionTreeRegressor::new, config).fit_seeded(&train)?;
    let elapsed = start.elapsed();
    let bagged_pred = ensemble.predict(&test.features())?;
    let bagged_metrics = evaluate_regression(&test.targets(), &bagged_pred.view())?;

    println!();
    println!("{:<20} {:>10} {:>10}", "model", "test MSE", "test R2");
    println!(
        "{:<20} {:>10.4} {:>10.4}",
        "single tree", single_metrics.mse, single_metrics.r2
    );
    println!(
        "{:<20} {:>10.4} {:>10.4}",
        format!("bagged x{}", ensemble.num_members()),
        bagged_metrics.mse,
        bagged_metrics.r2
    );
    if let Some(oob) = ensemble.oob_score() {
        println!(
            "OOB estimate: MSE {:.4}, R2 {:.4} over {} samples",
            oob.mse, oob.r2, oob.num_scored
        );
    }
    println!("ensemble built in {:.2?}", elapsed);

    let kfold = KFold::new(5).with_shuffle(true).with_random_seed(1);
    let cv_tree = cross_validate(&DecisionTreeRegressor::new, &dataset, &kfold)?;
    let cv_linear = cross_validate(&LinearRegression::new, &dataset, &kfold)?;
    println!();
    println!(
        "5-fold CV MSE: tree {:.4} +/- {:.4}, linear {:.4} +/- {:.4}",
        cv_tree.mean.mse, cv_tree.std.mse, cv_linear.mean.mse, cv_linear.std.mse
    );

    Ok(())
}
