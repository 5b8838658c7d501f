//! Out-of-bag scoring.
//!
//! Each member is asked to predict the samples its bootstrap sample missed.
//! The per-sample OOB prediction is the mean over those members, and the
//! ensemble is scored on every sample that was out-of-bag at least once.

use crate::core::error::{BaggingError, Result};
use crate::core::types::{Prediction, SampleIndex, Target};
use crate::metrics::{mean_squared_error, r2_score};

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

/// Out-of-bag estimate of generalisation error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OobScore {
    /// Mean squared error of OOB predictions
    pub mse: f64,
    /// R² of OOB predictions
    pub r2: f64,
    /// Samples with at least one OOB prediction
    pub num_scored: usize,
    /// Samples that were in every member's bootstrap sample
    pub num_skipped: usize,
}

/// OOB predictions of a single member.
#[derive(Debug, Clone)]
pub(crate) struct MemberOob {
    pub(crate) indices: Vec<SampleIndex>,
    pub(crate) predictions: Array1<Prediction>,
}

/// Running per-sample sums of OOB predictions.
#[derive(Debug, Clone)]
pub(crate) struct OobAccumulator {
    sums: Vec<f64>,
    counts: Vec<usize>,
}

impl OobAccumulator {
    pub(crate) fn new(num_samples: usize) -> Self {
        Self {
            sums: vec![0.0; num_samples],
            counts: vec![0; num_samples],
        }
    }

    pub(crate) fn add(&mut self, member: &MemberOob) {
        for (&index, &prediction) in member.indices.iter().zip(member.predictions.iter()) {
            self.sums[index] += prediction;
            self.counts[index] += 1;
        }
    }

    pub(crate) fn finish(self, targets: &ArrayView1<'_, Target>) -> Result<OobScore> {
        let mut truth = Vec::new();
        let mut predicted = Vec::new();
        let mut num_skipped = 0;

        for (i, (&sum, &count)) in self.sums.iter().zip(self.counts.iter()).enumerate() {
            if count == 0 {
                num_skipped += 1;
            } else {
                truth.push(targets[i]);
                predicted.push(sum / count as f64);
            }
        }

        if truth.is_empty() {
            return Err(BaggingError::training(
                "no sample was out-of-bag for any member; increase n_estimators to compute an OOB score",
            ));
        }
        if num_skipped > 0 {
            log::warn!(
                "{} of {} samples were never out-of-bag and are excluded from the OOB score",
                num_skipped,
                self.sums.len()
            );
        }

        let truth = Array1::from_vec(truth);
        let predicted = Array1::from_vec(predicted);
        Ok(OobScore {
            mse: mean_squared_error(&truth.view(), &predicted.view())?,
            r2: r2_score(&truth.view(), &predicted.view())?,
            num_scored: truth.len(),
            num_skipped,
        })
    }
}
