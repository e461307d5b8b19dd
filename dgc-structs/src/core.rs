use serde::{Deserialize, Serialize};

/// Assignment of one contiguous slice of the population to one execution
/// unit. Plans are created fresh for every evaluation pass and hold no
/// state beyond it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub unit_index: u32,
    pub slice_size: usize,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.slice_size == 0
    }
}

/// Fitness slot for one individual. `Error` is the sentinel written when the
/// scoring kernel failed for that individual; the caller decides what to do
/// with it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Fitness {
    Score(f64),
    Error(String),
}

impl Fitness {
    pub fn score(&self) -> Option<f64> {
        match self {
            Fitness::Score(value) => Some(*value),
            Fitness::Error(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Fitness::Error(_))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScoringFailure {
    pub index: usize,
    pub error: String,
}

/// Outcome of one evaluation pass. Every index of the result buffer has been
/// written when this is produced; `failures` lists the indexes that carry an
/// error sentinel instead of a score.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PassReport {
    pub population_size: usize,
    pub num_scored: usize,
    pub failures: Vec<ScoringFailure>,
    pub elapsed_ms: u64,
}

impl PassReport {
    pub fn is_partial_failure(&self) -> bool {
        !self.failures.is_empty()
    }
}
