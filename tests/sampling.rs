//! Statistical and property tests for bootstrap sampling.

mod common;

use bagging_rust::*;
use ndarray::{Array1, Array2};
use proptest::prelude::*;
use rand::prelude::*;

fn index_dataset(n: usize) -> Dataset {
    let features = Array2::from_shape_fn((n, 1), |(i, _)| i as f64);
    let targets = Array1::from_shape_fn(n, |i| i as f64);
    Dataset::new(features, targets).unwrap()
}

proptest! {
    #[test]
    fn prop_sample_length_matches_dataset(n in 1usize..300, seed in any::<u64>()) {
        let dataset = index_dataset(n);
        let sample = bootstrap_sample(&dataset, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(sample.len(), n);
        prop_assert_eq!(sample.features().nrows(), n);
        prop_assert_eq!(sample.targets().len(), n);
        prop_assert!(sample.indices().iter().all(|&i| i < n));
    }

    #[test]
    fn prop_sample_rows_are_source_rows(n in 1usize..100, seed in any::<u64>()) {
        let dataset = index_dataset(n);
        let sample = bootstrap_sample(&dataset, &mut StdRng::seed_from_u64(seed)).unwrap();
        for (index, row, target) in sample.iter() {
            prop_assert_eq!(row[0], index as f64);
            prop_assert_eq!(target, index as f64);
        }
    }

    #[test]
    fn prop_seeded_draws_are_reproducible(n in 1usize..500, seed in any::<u64>()) {
        let sampler = BootstrapSampler::new();
        let a = sampler.draw_indices(n, &mut StdRng::seed_from_u64(seed)).unwrap();
        let b = sampler.draw_indices(n, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_in_bag_and_out_of_bag_partition(n in 1usize..200, seed in any::<u64>()) {
        let dataset = index_dataset(n);
        let sample = bootstrap_sample(&dataset, &mut StdRng::seed_from_u64(seed)).unwrap();
        let oob = sample.out_of_bag_indices();
        prop_assert_eq!(sample.num_unique() + oob.len(), n);
        prop_assert!(oob.iter().all(|i| !sample.indices().contains(i)));
    }
}

#[test]
fn test_unique_fraction_near_one_minus_inverse_e() {
    let n = 100_000;
    let sampler = BootstrapSampler::new();
    let mut rng = StdRng::seed_from_u64(42);
    let indices = sampler.draw_indices(n, &mut rng).unwrap();

    let mut seen = vec![false; n];
    for &i in &indices {
        seen[i] = true;
    }
    let unique_fraction = seen.iter().filter(|&&s| s).count() as f64 / n as f64;
    assert!(
        (unique_fraction - EXPECTED_UNIQUE_FRACTION).abs() < 0.01,
        "unique fraction {} too far from {}",
        unique_fraction,
        EXPECTED_UNIQUE_FRACTION
    );
}

#[test]
fn test_sample_unique_fraction_accessor() {
    let dataset = index_dataset(20_000);
    let sample = bootstrap_sample(&dataset, &mut StdRng::seed_from_u64(3)).unwrap();
    assert!((sample.unique_fraction() - EXPECTED_UNIQUE_FRACTION).abs() < 0.02);
}

#[test]
fn test_every_index_reachable() {
    let sampler = BootstrapSampler::new();
    let mut rng = StdRng::seed_from_u64(11);
    let mut hits = [0usize; 5];
    for _ in 0..200 {
        for i in sampler.draw_indices(5, &mut rng).unwrap() {
            hits[i] += 1;
        }
    }
    // 1000 draws over 5 values
    assert!(hits.iter().all(|&h| h > 150 && h < 250), "skewed counts {:?}", hits);
}
