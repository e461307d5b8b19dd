use crate::error::{EvalError, EvalResult};
use dgc_structs::config::MAX_UNITS_LIMIT;
use dgc_structs::core::Plan;

/// Splits a population into one contiguous slice per execution unit, as
/// evenly as possible: every unit gets `population_size / unit_count`
/// individuals and the first `population_size % unit_count` units (lowest
/// index first) take one extra. Slice sizes always sum to the population
/// size exactly; units beyond the population receive empty plans.
pub fn plan(population_size: usize, unit_count: u32) -> EvalResult<Vec<Plan>> {
    if unit_count == 0 || unit_count > MAX_UNITS_LIMIT {
        return Err(EvalError::InvalidConfiguration {
            reason: format!(
                "unit count must be within [1, {}], got {}",
                MAX_UNITS_LIMIT, unit_count
            ),
        });
    }
    let base = population_size / unit_count as usize;
    let remainder = population_size % unit_count as usize;
    Ok((0..unit_count)
        .map(|unit_index| Plan {
            unit_index,
            slice_size: base + ((unit_index as usize) < remainder) as usize,
        })
        .collect())
}

/// Start offset of each plan's slice in population order.
pub fn slice_offsets(plans: &[Plan]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(plans.len());
    let mut offset = 0;
    for plan in plans {
        offsets.push(offset);
        offset += plan.slice_size;
    }
    offsets
}
