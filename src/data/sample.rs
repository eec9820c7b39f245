use rand::rngs::StdRng;
use rand::SeedableRng;

use super::model::{TradeDataset, TradeSample};
use super::DataError;

/// Draw `n` distinct rows from `dataset` with a seeded RNG.
///
/// The rows keep the order in which they were drawn. The same dataset, size
/// and seed always produce the same sample.
pub fn sample_rows(dataset: &TradeDataset, n: usize, seed: u64) -> Result<TradeSample, DataError> {
    let available = dataset.len();
    if n > available {
        return Err(DataError::SampleTooLarge {
            requested: n,
            available,
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let rows = rand::seq::index::sample(&mut rng, available, n)
        .into_iter()
        .map(|i| dataset.rows[i].clone())
        .collect();

    Ok(TradeSample {
        rows,
        seed,
        population: available,
    })
}
