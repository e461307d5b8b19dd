mod accelerator;
mod thread_pool;

pub use accelerator::AcceleratorDispatcher;
pub use thread_pool::ThreadPoolDispatcher;

use crate::error::{EvalError, EvalResult};
use crate::kernel::ScoringKernel;
use dgc_structs::config::{EvaluatorConfig, ExecutionMode, MAX_UNITS_LIMIT};
use dgc_structs::core::{Fitness, PassReport};
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

/// Executes one evaluation pass: every individual of the population is
/// scored exactly once and its result slot written exactly once, with an
/// error sentinel standing in for individuals whose scoring failed.
/// Implementations differ only in how work is mapped onto the execution
/// substrate; selection happens by configuration, not compilation.
pub trait EvaluationDispatcher<I>: Send + Sync
where
    I: Send + Sync + 'static,
{
    fn dispatch(
        &self,
        population: Arc<Vec<I>>,
        kernel: Arc<dyn ScoringKernel<I>>,
        results: &mut [Option<Fitness>],
    ) -> EvalResult<PassReport>;
}

pub fn dispatcher_for<I>(config: EvaluatorConfig) -> EvalResult<Box<dyn EvaluationDispatcher<I>>>
where
    I: Send + Sync + 'static,
{
    match config.mode {
        ExecutionMode::ThreadPool => Ok(Box::new(ThreadPoolDispatcher::new(config)?)),
        ExecutionMode::AcceleratorBatch => Ok(Box::new(AcceleratorDispatcher::new(config)?)),
    }
}

/// Runs a single pass with a dispatcher built from `config`.
pub fn evaluate_population<I>(
    config: EvaluatorConfig,
    population: Arc<Vec<I>>,
    kernel: Arc<dyn ScoringKernel<I>>,
    results: &mut [Option<Fitness>],
) -> EvalResult<PassReport>
where
    I: Send + Sync + 'static,
{
    dispatcher_for(config)?.dispatch(population, kernel, results)
}

pub(crate) fn validate_units(config: &EvaluatorConfig) -> EvalResult<()> {
    if config.max_units == 0 || config.max_units > MAX_UNITS_LIMIT {
        return Err(EvalError::InvalidConfiguration {
            reason: format!(
                "max_units must be within [1, {}], got {}",
                MAX_UNITS_LIMIT, config.max_units
            ),
        });
    }
    Ok(())
}

pub(crate) fn check_result_buffer(population_size: usize, buffer_size: usize) -> EvalResult<()> {
    if population_size != buffer_size {
        return Err(EvalError::InvalidConfiguration {
            reason: format!(
                "result buffer length {} does not match population size {}",
                buffer_size, population_size
            ),
        });
    }
    Ok(())
}

/// Fixed pool of worker threads for one pass; torn down when the pass
/// completes.
pub(crate) fn worker_runtime(max_units: u32) -> EvalResult<Runtime> {
    Builder::new_multi_thread()
        .worker_threads(max_units as usize)
        .build()
        .map_err(|e| EvalError::InvalidConfiguration {
            reason: format!("failed to start worker runtime: {}", e),
        })
}
