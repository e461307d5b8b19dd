use crate::error::{EvalError, EvalResult};
use dgc_structs::core::{Fitness, PassReport, ScoringFailure};

/// Collects per-unit score runs back into population order with
/// exactly-once write semantics. Partitioning guarantees disjoint runs by
/// construction; the per-index counters turn any violation into a hard
/// error instead of a silently corrupted pass.
pub struct ResultAggregator {
    write_counts: Vec<u32>,
    failures: Vec<ScoringFailure>,
    num_scored: usize,
}

impl ResultAggregator {
    pub fn new(population_size: usize) -> Self {
        Self {
            write_counts: vec![0; population_size],
            failures: Vec::new(),
            num_scored: 0,
        }
    }

    /// Writes one contiguous run of scores starting at `offset`. Kernel
    /// failures become error sentinels in their slots and are recorded for
    /// the pass report.
    pub fn merge(
        &mut self,
        offset: usize,
        scores: Vec<Result<f64, String>>,
        results: &mut [Option<Fitness>],
    ) -> EvalResult<()> {
        for (i, score) in scores.into_iter().enumerate() {
            let index = offset + i;
            self.write_counts[index] += 1;
            if self.write_counts[index] > 1 {
                return Err(EvalError::DuplicateWrite { index });
            }
            match score {
                Ok(value) => {
                    results[index] = Some(Fitness::Score(value));
                    self.num_scored += 1;
                }
                Err(error) => {
                    results[index] = Some(Fitness::Error(error.clone()));
                    self.failures.push(ScoringFailure { index, error });
                }
            }
        }
        Ok(())
    }

    pub fn write_counts(&self) -> &[u32] {
        &self.write_counts
    }

    /// Verifies every slot was written exactly once and produces the pass
    /// report. An unwritten slot means the planner or a dispatcher dropped
    /// part of the population, which is fatal to the pass.
    pub fn finish(mut self, elapsed_ms: u64) -> EvalResult<PassReport> {
        if let Some(index) = self.write_counts.iter().position(|count| *count == 0) {
            return Err(EvalError::IncompleteCoverage { index });
        }
        self.failures.sort_by_key(|failure| failure.index);
        Ok(PassReport {
            population_size: self.write_counts.len(),
            num_scored: self.num_scored,
            failures: self.failures,
            elapsed_ms,
        })
    }
}
