//! Synthesis of prior-period records
//!
//! History is a swappable data-generation policy, not analysis logic. The
//! default policy scales each canonical row by an independent factor drawn
//! uniformly from `[0.7, 1.3)`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::RawRecord;
use crate::models::Record;

/// Produces the records of one historical period from the canonical rows
pub trait HistoryGenerator {
    /// Generate one record per row for `period`
    fn generate(&mut self, rows: &[RawRecord], period: i32) -> Vec<Record>;
}

/// Scale a row by `factor`: counts are floored, percentages kept fractional
fn scaled(index: usize, row: &RawRecord, period: i32, factor: f64) -> Record {
    Record::new(
        index,
        row.hub.clone(),
        (row.absolute_count * factor).floor(),
        row.relative_percent * factor,
        period,
        Some(row.region.clone()),
    )
}

/// Independent uniform variation factor per row
#[derive(Debug, Clone)]
pub struct UniformVariation {
    rng: ChaCha8Rng,
    min: f64,
    max: f64,
}

impl UniformVariation {
    /// Reproducible generator; the same seed always yields the same history
    pub fn seeded(seed: u64, min: f64, max: f64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            min,
            max,
        }
    }

    /// Non-deterministic generator seeded from OS entropy
    pub fn from_entropy(min: f64, max: f64) -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            min,
            max,
        }
    }

    fn factor(&mut self) -> f64 {
        if self.min >= self.max {
            return self.min;
        }
        self.rng.gen_range(self.min..self.max)
    }
}

impl HistoryGenerator for UniformVariation {
    fn generate(&mut self, rows: &[RawRecord], period: i32) -> Vec<Record> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| {
                let factor = self.factor();
                scaled(index, row, period, factor)
            })
            .collect()
    }
}

/// Same factor for every row; useful for exact expectations in tests
#[derive(Debug, Clone, Copy)]
pub struct ConstantFactor(pub f64);

impl HistoryGenerator for ConstantFactor {
    fn generate(&mut self, rows: &[RawRecord], period: i32) -> Vec<Record> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| scaled(index, row, period, self.0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::canonical_rows;

    #[test]
    fn test_variation_within_bounds() {
        let rows = canonical_rows();
        let mut generator = UniformVariation::seeded(7, 0.7, 1.3);
        let history = generator.generate(&rows, 2023);

        assert_eq!(history.len(), rows.len());
        for (row, record) in rows.iter().zip(&history) {
            assert_eq!(record.hub, row.hub);
            assert_eq!(record.period, 2023);
            assert!(record.absolute_count >= (row.absolute_count * 0.7).floor());
            assert!(record.absolute_count <= (row.absolute_count * 1.3).floor());
            assert_eq!(record.absolute_count, record.absolute_count.floor());
        }
    }

    #[test]
    fn test_same_seed_same_history() {
        let rows = canonical_rows();
        let a = UniformVariation::seeded(99, 0.7, 1.3).generate(&rows, 2022);
        let b = UniformVariation::seeded(99, 0.7, 1.3).generate(&rows, 2022);
        assert_eq!(a, b);
    }

    #[test]
    fn test_constant_factor_ids() {
        let rows = canonical_rows();
        let history = ConstantFactor(0.5).generate(&rows, 2021);
        assert_eq!(history[0].id, "0_2021");
        assert_eq!(history[0].absolute_count, 1916.0);
    }
}
