use anyhow::{anyhow, Result};
use dgc_evaluator::ScoringKernel;

/// Stand-in scoring functions over real-vector individuals, used to drive
/// evaluation passes from the command line. The production fitness metric
/// plugs into the same `ScoringKernel` seam.
pub enum Objective {
    Sphere,
    Rastrigin,
}

impl Objective {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "sphere" => Ok(Objective::Sphere),
            "rastrigin" => Ok(Objective::Rastrigin),
            _ => Err(anyhow!("Unknown objective '{}'", name)),
        }
    }
}

impl ScoringKernel<Vec<f64>> for Objective {
    fn score(&self, individual: &Vec<f64>) -> Result<f64> {
        if individual.is_empty() {
            return Err(anyhow!("individual has no components"));
        }
        match self {
            Objective::Sphere => Ok(individual.iter().map(|x| x * x).sum()),
            Objective::Rastrigin => {
                let n = individual.len() as f64;
                Ok(10.0 * n
                    + individual
                        .iter()
                        .map(|x| x * x - 10.0 * (2.0 * std::f64::consts::PI * x).cos())
                        .sum::<f64>())
            }
        }
    }
}
