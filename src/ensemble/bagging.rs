//! Bootstrap aggregation for regression.
//!
//! [`BaggingRegressor`] is the unbuilt state: a learner factory plus a
//! [`BaggingConfig`]. Fitting draws one bootstrap sample per member from a
//! shared random source, fits a fresh learner on it and discards the sample.
//! The result is an immutable [`BaggedEnsemble`] whose prediction is the
//! unweighted mean of its members' predictions.

use crate::config::{BaggingConfig, LearnerConfig};
use crate::core::error::{BaggingError, Result};
use crate::core::traits::{check_num_features, LearnerFactory, Regressor};
use crate::core::types::*;
use crate::dataset::Dataset;
use crate::ensemble::oob::{MemberOob, OobAccumulator, OobScore};
use crate::sampling::BootstrapSampler;
use crate::training_error;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Unbuilt bagging ensemble.
#[derive(Debug, Clone)]
pub struct BaggingRegressor<F> {
    factory: F,
    config: BaggingConfig,
    sampler: BootstrapSampler,
}

struct FittedMember<L> {
    learner: L,
    oob: Option<MemberOob>,
}

impl<F: LearnerFactory> BaggingRegressor<F> {
    /// Combine a learner factory with ensemble settings.
    ///
    /// `config.learner` is not consulted; the factory decides what is built.
    pub fn new(factory: F, config: BaggingConfig) -> Self {
        Self {
            factory,
            config,
            sampler: BootstrapSampler::new(),
        }
    }

    /// Ensemble settings.
    pub fn config(&self) -> &BaggingConfig {
        &self.config
    }

    /// Learner factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Build the ensemble serially, drawing every bootstrap sample from `rng`.
    ///
    /// Consumes exactly `n_estimators` bootstrap draws from `rng`. Fails
    /// before touching `rng` if the configuration is invalid, and fails as a
    /// whole if any member cannot be fit.
    pub fn fit<R: Rng + ?Sized>(
        &self,
        dataset: &Dataset,
        rng: &mut R,
    ) -> Result<BaggedEnsemble<F::Learner>> {
        self.config.validate()?;
        let n_estimators = self.config.n_estimators;
        log::info!(
            "Building bagged ensemble: {} members on {} samples x {} features",
            n_estimators,
            dataset.num_data(),
            dataset.num_features()
        );

        let mut fitted = Vec::with_capacity(n_estimators);
        for member in 0..n_estimators {
            fitted.push(self.fit_member(dataset, rng, member)?);
        }

        self.assemble(dataset, fitted)
    }

    /// Build the ensemble seeded from `config.random_seed`.
    ///
    /// Dispatches to [`fit_parallel`](Self::fit_parallel) when
    /// `config.parallel` is set.
    pub fn fit_seeded(&self, dataset: &Dataset) -> Result<BaggedEnsemble<F::Learner>> {
        let mut rng = StdRng::seed_from_u64(self.config.random_seed);
        if self.config.parallel {
            self.fit_parallel(dataset, &mut rng)
        } else {
            self.fit(dataset, &mut rng)
        }
    }

    /// Build the ensemble on a rayon thread pool.
    ///
    /// One seed per member is drawn from `rng` up front and each member
    /// samples from its own `StdRng` substream, so the result depends only on
    /// the state of `rng` and never on the number of threads.
    pub fn fit_parallel<R: Rng + ?Sized>(
        &self,
        dataset: &Dataset,
        rng: &mut R,
    ) -> Result<BaggedEnsemble<F::Learner>> {
        self.config.validate()?;
        let n_estimators = self.config.n_estimators;
        let num_threads = self.config.effective_num_threads();
        log::info!(
            "Building bagged ensemble in parallel: {} members on {} threads",
            n_estimators,
            num_threads
        );

        let seeds: Vec<u64> = (0..n_estimators).map(|_| rng.gen()).collect();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| training_error!("Failed to create thread pool: {}", e))?;

        let fitted = pool.install(|| {
            seeds
                .par_iter()
                .enumerate()
                .map(|(member, &seed)| {
                    let mut member_rng = StdRng::seed_from_u64(seed);
                    self.fit_member(dataset, &mut member_rng, member)
                })
                .collect::<Result<Vec<_>>>()
        })?;

        self.assemble(dataset, fitted)
    }

    fn fit_member<R: Rng + ?Sized>(
        &self,
        dataset: &Dataset,
        rng: &mut R,
        member: usize,
    ) -> Result<FittedMember<F::Learner>> {
        let sample = self.sampler.sample(dataset, rng)?;
        let mut learner = self.factory.create();
        learner
            .fit(&sample.features(), &sample.targets())
            .map_err(|e| BaggingError::learner_fit_failure(member, e))?;

        log::debug!(
            "Fitted member {} ({}) on {} unique samples",
            member,
            learner.name(),
            sample.num_unique()
        );

        let oob = if self.config.oob_score {
            let indices = sample.out_of_bag_indices();
            if indices.is_empty() {
                None
            } else {
                let (features, _) = dataset.select(&indices)?;
                let predictions = learner
                    .predict(&features.view())
                    .map_err(|e| BaggingError::learner_fit_failure(member, e))?;
                Some(MemberOob {
                    indices,
                    predictions,
                })
            }
        } else {
            None
        };

        Ok(FittedMember { learner, oob })
    }

    fn assemble(
        &self,
        dataset: &Dataset,
        fitted: Vec<FittedMember<F::Learner>>,
    ) -> Result<BaggedEnsemble<F::Learner>> {
        let mut accumulator = self
            .config
            .oob_score
            .then(|| OobAccumulator::new(dataset.num_data()));

        let members: Vec<F::Learner> = fitted
            .into_iter()
            .map(|member| {
                if let (Some(acc), Some(oob)) = (accumulator.as_mut(), member.oob.as_ref()) {
                    acc.add(oob);
                }
                member.learner
            })
            .collect();

        let oob_score = match accumulator {
            Some(acc) => Some(acc.finish(&dataset.targets())?),
            None => None,
        };

        if let Some(score) = &oob_score {
            log::info!(
                "Bagged ensemble built: {} members, OOB MSE = {:.6}, OOB R2 = {:.4}",
                members.len(),
                score.mse,
                score.r2
            );
        } else {
            log::info!("Bagged ensemble built: {} members", members.len());
        }

        Ok(BaggedEnsemble {
            members,
            num_features: dataset.num_features(),
            oob_score,
        })
    }
}

impl BaggingRegressor<LearnerConfig> {
    /// Use `config.learner` as the learner factory.
    pub fn from_config(config: BaggingConfig) -> Self {
        let factory = config.learner.clone();
        Self::new(factory, config)
    }
}

/// Build an ensemble of `n_estimators` members serially from `rng`.
pub fn build_ensemble<F, R>(
    dataset: &Dataset,
    factory: F,
    n_estimators: usize,
    rng: &mut R,
) -> Result<BaggedEnsemble<F::Learner>>
where
    F: LearnerFactory,
    R: Rng + ?Sized,
{
    let config = BaggingConfig {
        n_estimators,
        ..BaggingConfig::default()
    };
    BaggingRegressor::new(factory, config).fit(dataset, rng)
}

/// Fitted bagging ensemble.
///
/// Prediction never mutates the ensemble and may run concurrently.
#[derive(Debug, Clone)]
pub struct BaggedEnsemble<L> {
    members: Vec<L>,
    num_features: usize,
    oob_score: Option<OobScore>,
}

impl<L: Regressor> BaggedEnsemble<L> {
    /// Fitted members in build order.
    pub fn members(&self) -> &[L] {
        &self.members
    }

    /// Number of members (B).
    pub fn num_members(&self) -> usize {
        self.members.len()
    }

    /// Feature count of the training data.
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Out-of-bag score, if it was requested.
    pub fn oob_score(&self) -> Option<&OobScore> {
        self.oob_score.as_ref()
    }

    fn member_prediction(&self, member: &L, features: &ArrayView2<'_, Feature>) -> Result<Array1<Prediction>> {
        let predictions = member.predict(features)?;
        if predictions.len() != features.nrows() {
            return Err(BaggingError::prediction(format!(
                "{} returned {} predictions for {} inputs",
                member.name(),
                predictions.len(),
                features.nrows()
            )));
        }
        Ok(predictions)
    }

    /// Mean of the member predictions for each row of `features`.
    pub fn predict(&self, features: &ArrayView2<'_, Feature>) -> Result<Array1<Prediction>> {
        check_num_features(self.num_features, features)?;
        let mut sum = Array1::<Prediction>::zeros(features.nrows());
        for member in &self.members {
            sum += &self.member_prediction(member, features)?;
        }
        Ok(sum / self.members.len() as f64)
    }

    /// Prediction for a single input vector.
    pub fn predict_one(&self, features: &ArrayView1<'_, Feature>) -> Result<Prediction> {
        let row = features.view().insert_axis(Axis(0));
        let predictions = self.predict(&row)?;
        Ok(predictions[0])
    }

    /// Per-member predictions, one row per member (B x M).
    pub fn member_predictions(&self, features: &ArrayView2<'_, Feature>) -> Result<Array2<Prediction>> {
        check_num_features(self.num_features, features)?;
        let mut all = Array2::<Prediction>::zeros((self.members.len(), features.nrows()));
        for (member, mut row) in self.members.iter().zip(all.axis_iter_mut(Axis(0))) {
            row.assign(&self.member_prediction(member, features)?);
        }
        Ok(all)
    }

    /// Same output as [`predict`](Self::predict), with members evaluated on
    /// the global rayon pool.
    pub fn predict_parallel(&self, features: &ArrayView2<'_, Feature>) -> Result<Array1<Prediction>> {
        check_num_features(self.num_features, features)?;
        let per_member = self
            .members
            .par_iter()
            .map(|member| self.member_prediction(member, features))
            .collect::<Result<Vec<_>>>()?;

        let mut sum = Array1::<Prediction>::zeros(features.nrows());
        for predictions in &per_member {
            sum += predictions;
        }
        Ok(sum / self.members.len() as f64)
    }
}

impl<L: Regressor> Regressor for BaggedEnsemble<L> {
    fn fit(
        &mut self,
        _features: &ArrayView2<'_, Feature>,
        _targets: &ArrayView1<'_, Target>,
    ) -> Result<()> {
        Err(BaggingError::training(
            "a built ensemble is immutable; fit a new BaggingRegressor instead",
        ))
    }

    fn predict(&self, features: &ArrayView2<'_, Feature>) -> Result<Array1<Prediction>> {
        BaggedEnsemble::predict(self, features)
    }

    fn name(&self) -> &'static str {
        "bagged_ensemble"
    }

    fn num_features(&self) -> Option<usize> {
        Some(self.num_features)
    }
}
