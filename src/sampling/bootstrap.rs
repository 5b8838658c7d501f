//! Bootstrap resampling.
//!
//! A bootstrap sample draws `N` indices uniformly from `[0, N)` with
//! replacement and gathers the matching rows in drawn order. The random
//! source is always passed in explicitly, so the same seeded state
//! reproduces the same sample.

use crate::core::error::{BaggingError, Result};
use crate::core::types::*;
use crate::dataset::Dataset;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::Rng;

/// One bootstrap draw from a dataset.
#[derive(Debug, Clone)]
pub struct BootstrapSample {
    /// Drawn indices into the source dataset, in draw order
    indices: Vec<SampleIndex>,
    /// Gathered feature rows, `features.row(i)` is source row `indices[i]`
    features: Array2<Feature>,
    /// Gathered targets
    targets: Array1<Target>,
    /// Size of the source dataset
    source_len: usize,
}

impl BootstrapSample {
    /// Number of drawn samples, always equal to the source dataset size.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Always false: a bootstrap sample of a valid dataset is non-empty.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Drawn source indices in draw order.
    pub fn indices(&self) -> &[SampleIndex] {
        &self.indices
    }

    /// Gathered feature matrix.
    pub fn features(&self) -> ArrayView2<'_, Feature> {
        self.features.view()
    }

    /// Gathered target vector.
    pub fn targets(&self) -> ArrayView1<'_, Target> {
        self.targets.view()
    }

    /// Iterate over `(source index, input, target)` triples in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (SampleIndex, ArrayView1<'_, Feature>, Target)> + '_ {
        self.indices
            .iter()
            .zip(self.features.axis_iter(Axis(0)))
            .zip(self.targets.iter())
            .map(|((&index, row), &target)| (index, row, target))
    }

    /// Membership mask over the source dataset.
    pub fn in_bag_mask(&self) -> Vec<bool> {
        let mut mask = vec![false; self.source_len];
        for &i in &self.indices {
            mask[i] = true;
        }
        mask
    }

    /// Number of distinct source samples drawn.
    pub fn num_unique(&self) -> usize {
        self.in_bag_mask().iter().filter(|&&hit| hit).count()
    }

    /// Fraction of the source dataset that was drawn at least once.
    pub fn unique_fraction(&self) -> f64 {
        self.num_unique() as f64 / self.source_len as f64
    }

    /// Source indices that were never drawn, in ascending order.
    pub fn out_of_bag_indices(&self) -> Vec<SampleIndex> {
        self.in_bag_mask()
            .iter()
            .enumerate()
            .filter_map(|(i, &hit)| if hit { None } else { Some(i) })
            .collect()
    }
}

/// Draws bootstrap samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapSampler;

impl BootstrapSampler {
    /// Create a sampler.
    pub fn new() -> Self {
        BootstrapSampler
    }

    /// Draw `n` indices uniformly from `[0, n)` with replacement.
    pub fn draw_indices<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<SampleIndex>> {
        if n == 0 {
            return Err(BaggingError::invalid_dataset_size(n));
        }
        Ok((0..n).map(|_| rng.gen_range(0..n)).collect())
    }

    /// Draw one bootstrap sample of `dataset`.
    pub fn sample<R: Rng + ?Sized>(&self, dataset: &Dataset, rng: &mut R) -> Result<BootstrapSample> {
        let indices = self.draw_indices(dataset.num_data(), rng)?;
        let (features, targets) = dataset.select(&indices)?;
        Ok(BootstrapSample {
            indices,
            features,
            targets,
            source_len: dataset.num_data(),
        })
    }
}

/// Draw one bootstrap sample of `dataset` from `rng`.
pub fn bootstrap_sample<R: Rng + ?Sized>(dataset: &Dataset, rng: &mut R) -> Result<BootstrapSample> {
    BootstrapSampler::new().sample(dataset, rng)
}
