use serde::{Deserialize, Serialize};

/// Maximum number of CPU worker threads or concurrently in-flight
/// accelerator launches.
pub const MAX_UNITS_LIMIT: u32 = 16;
/// Maximum number of individuals scored by a single accelerator launch.
pub const MAX_BLOCK_SIZE: u32 = 256;

pub const DEFAULT_MAX_UNITS: u32 = 4;
pub const DEFAULT_BLOCK_SIZE: u32 = 128;
/// Threads per evaluation block on the accelerator; sub-batch boundaries
/// are rounded to this granularity.
pub const DEFAULT_ALIGNMENT: u32 = 256;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    ThreadPool,
    AcceleratorBatch,
}

/// Immutable configuration for one evaluation backend. Constructed once and
/// passed into the dispatcher; never process-wide state.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EvaluatorConfig {
    pub mode: ExecutionMode,
    pub max_units: u32,
    pub block_size: u32,
    pub alignment: u32,
}

impl EvaluatorConfig {
    pub fn thread_pool(max_units: u32) -> Self {
        Self {
            mode: ExecutionMode::ThreadPool,
            max_units,
            block_size: DEFAULT_BLOCK_SIZE,
            alignment: DEFAULT_ALIGNMENT,
        }
    }

    pub fn accelerator(max_units: u32, block_size: u32) -> Self {
        Self {
            mode: ExecutionMode::AcceleratorBatch,
            max_units,
            block_size,
            alignment: DEFAULT_ALIGNMENT,
        }
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self::thread_pool(DEFAULT_MAX_UNITS)
    }
}
