use super::EvaluationDispatcher;
use crate::aggregator::ResultAggregator;
use crate::alignment::aligned_sub_batch;
use crate::error::{EvalError, EvalResult};
use crate::kernel::ScoringKernel;
use crate::planner;
use dgc_structs::config::{EvaluatorConfig, MAX_BLOCK_SIZE};
use dgc_structs::core::{Fitness, PassReport, Plan};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;

/// Accelerator-style execution: each plan's slice is tiled into aligned
/// sub-batches of at most `block_size` individuals, and each sub-batch is
/// scored by one kernel launch. At most `max_units` launches are in flight
/// at once. Only the final sub-batch of a slice may fall short of the
/// alignment granularity.
pub struct AcceleratorDispatcher {
    config: EvaluatorConfig,
}

impl AcceleratorDispatcher {
    pub fn new(config: EvaluatorConfig) -> EvalResult<Self> {
        super::validate_units(&config)?;
        if config.block_size == 0 || config.block_size > MAX_BLOCK_SIZE {
            return Err(EvalError::InvalidConfiguration {
                reason: format!(
                    "block_size must be within [1, {}], got {}",
                    MAX_BLOCK_SIZE, config.block_size
                ),
            });
        }
        if config.alignment == 0 {
            return Err(EvalError::InvalidConfiguration {
                reason: "alignment must be non-zero".to_string(),
            });
        }
        Ok(Self { config })
    }

    fn launches(&self, plans: &[Plan], offsets: &[usize]) -> Vec<(usize, usize)> {
        let block_size = self.config.block_size as usize;
        let alignment = self.config.alignment as usize;
        let mut launches = Vec::new();
        for (plan, offset) in plans.iter().zip(offsets.iter().copied()) {
            let mut done = 0;
            while done < plan.slice_size {
                let remaining = plan.slice_size - done;
                let request = block_size.min(remaining);
                let len = aligned_sub_batch(request, alignment, remaining).min(remaining);
                launches.push((offset + done, len));
                done += len;
            }
        }
        launches
    }
}

impl<I> EvaluationDispatcher<I> for AcceleratorDispatcher
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
        let launches = self.launches(&plans, &offsets);

        let runtime = super::worker_runtime(self.config.max_units)?;
        let max_units = self.config.max_units as usize;
        let completed = runtime.block_on(async {
            stream::iter(launches)
                .map(|(offset, len)| {
                    let population = Arc::clone(&population);
                    let kernel = Arc::clone(&kernel);
                    tokio::spawn(async move {
                        let scores: Vec<Result<f64, String>> = kernel
                            .score_batch(&population[offset..offset + len])
                            .into_iter()
                            .map(|score| score.map_err(|e| e.to_string()))
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
            if let Ok((offset, scores)) = result {
                aggregator.merge(offset, scores, results)?;
            }
        }
        aggregator.finish(started.elapsed().as_millis() as u64)
    }
}
