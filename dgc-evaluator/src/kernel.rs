use anyhow::Result;

/// Per-individual fitness computation. The metric itself lives behind this
/// trait; the evaluation core only relies on the fixed numeric signature.
///
/// Implementations must be safe to invoke concurrently from independent
/// evaluation tasks with no shared mutable state.
pub trait ScoringKernel<I>: Send + Sync {
    fn score(&self, individual: &I) -> Result<f64>;

    /// Scores an aligned batch of individuals, one result per individual in
    /// batch order. Batched substrates override this with a single launch.
    fn score_batch(&self, batch: &[I]) -> Vec<Result<f64>> {
        batch.iter().map(|individual| self.score(individual)).collect()
    }
}
