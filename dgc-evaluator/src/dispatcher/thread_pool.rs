use super::EvaluationDispatcher;
use crate::aggregator::ResultAggregator;
use crate::error::EvalResult;
use crate::kernel::ScoringKernel;
use crate::planner;
use dgc_structs::config::EvaluatorConfig;
use dgc_structs::core::{Fitness, PassReport};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;

/// CPU execution: one concurrent task per non-empty plan, each scoring its
/// slice sequentially. Tasks share the population read-only and deliver
/// their scores back to the dispatching thread, which owns all result
/// writes.
pub struct ThreadPoolDispatcher {
    config: EvaluatorConfig,
}

impl ThreadPoolDispatcher {
    pub fn new(config: EvaluatorConfig) -> EvalResult<Self> {
        super::validate_units(&config)?;
        Ok(Self { config })
    }
}

impl<I> EvaluationDispatcher<I> for ThreadPoolDispatcher
where
    I: Send + Sync + 'static,
{
    fn dispatch(
        &self,
        population: Arc<Vec<I>>,
        kernel: Arc<dyn ScoringKernel<I>>,
        results: &mut [Option<Fitness>],
    ) -> EvalResult<PassReport> {
        super::check_result_buffer(population.len(), results.len())?;
        let started = Instant::now();

        let plans = planner::plan(population.len(), self.config.max_units)?;
        let offsets = planner::slice_offsets(&plans);
        let segments: Vec<(usize, usize)> = plans
            .iter()
            .zip(offsets)
            .filter(|(plan, _)| !plan.is_empty())
            .map(|(plan, offset)| (offset, plan.slice_size))
            .collect();

        let runtime = super::worker_runtime(self.config.max_units)?;
        let max_units = self.config.max_units as usize;
        let completed = runtime.block_on(async {
            stream::iter(segments)
                .map(|(offset, len)| {
                    let population = Arc::clone(&population);
                    let kernel = Arc::clone(&kernel);
                    tokio::spawn(async move {
                        let scores: Vec<Result<f64, String>> = population[offset..offset + len]
                            .iter()
                            .map(|individual| kernel.score(individual).map_err(|e| e.to_string()))
                            .collect();
                        (offset, scores)
                    })
                })
                .buffer_unordered(max_units)
                .collect::<Vec<_>>()
                .await
        });

        let mut aggregator = ResultAggregator::new(population.len());
        for result in completed {
            // A task that died delivers nothing; the coverage check below
            // surfaces its slice as IncompleteCoverage.
            if let Ok((offset, scores)) = result {
                aggregator.merge(offset, scores, results)?;
            }
        }
        aggregator.finish(started.elapsed().as_millis() as u64)
    }
}
