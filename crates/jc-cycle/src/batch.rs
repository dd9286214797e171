//! Parallel evaluation of independent operating points.

use crate::error::{CycleEvalResult, FailureKind};
use crate::evaluator::CycleEvaluator;
use crate::inputs::CycleInputs;
use crate::result::CycleResult;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Outcomes of a batch, in input order.
#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<CycleEvalResult<CycleResult>>,
    pub num_successful: usize,
    /// Failure counts by kind; kinds that never occurred are absent.
    pub failures: BTreeMap<FailureKind, usize>,
}

impl BatchReport {
    fn from_outcomes(outcomes: Vec<CycleEvalResult<CycleResult>>) -> Self {
        let mut failures = BTreeMap::new();
        let mut num_successful = 0;
        for outcome in &outcomes {
            match outcome {
                Ok(_) => num_successful += 1,
                Err(err) => *failures.entry(err.kind()).or_insert(0) += 1,
            }
        }
        Self {
            outcomes,
            num_successful,
            failures,
        }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn num_failed(&self) -> usize {
        self.outcomes.len() - self.num_successful
    }

    pub fn failure_count(&self, kind: FailureKind) -> usize {
        self.failures.get(&kind).copied().unwrap_or(0)
    }

    /// Successful results, skipping failed samples.
    pub fn successes(&self) -> impl Iterator<Item = &CycleResult> {
        self.outcomes.iter().filter_map(|o| o.as_ref().ok())
    }

    /// Thrust [N] of every successful sample.
    pub fn thrust_n(&self) -> Vec<f64> {
        self.successes().map(|r| r.thrust.value).collect()
    }
}

/// Evaluate every input on the rayon pool.
///
/// Each sample is evaluated exactly as a serial [`CycleEvaluator::evaluate`]
/// call would; failures are recorded and never stop the batch.
pub fn evaluate_batch(evaluator: &CycleEvaluator, inputs: &[CycleInputs]) -> BatchReport {
    let outcomes: Vec<_> = inputs
        .par_iter()
        .map(|input| evaluator.evaluate(input))
        .collect();
    let report = BatchReport::from_outcomes(outcomes);
    debug!(
        samples = report.len(),
        successful = report.num_successful,
        failed = report.num_failed(),
        "batch evaluated"
    );
    report
}
