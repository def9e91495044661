//! Interarrival lookup table
//!
//! The table holds `size` independently drawn interarrival samples, each paired
//! with the cumulative probability `i / size` of its stratum. Resolving a
//! uniform draw returns the sample of the first stratum whose cumulative
//! probability covers it. This is a stratified sample set, not an inverse CDF.

use serde::Serialize;
use tracing::debug;

use super::variate::{DistributionSpec, UniformSource, VariateGenerator};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::ConfigValidationError;

/// One stratum of the lookup table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LookupEntry {
    /// Cumulative probability covered up to and including this stratum, in (0, 1]
    pub cumulative_probability: f64,
    /// Interarrival time sampled for this stratum
    pub sampled_value: f64,
}

/// Ordered interarrival lookup table with strictly increasing cumulative probabilities
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InterArrivalTable {
    entries: Vec<LookupEntry>,
}

impl InterArrivalTable {
    /// Draw `size` samples of `spec` into a new table
    pub fn build<S: UniformSource>(
        spec: &DistributionSpec,
        size: usize,
        generator: &mut VariateGenerator<S>,
    ) -> SimulationResult<Self> {
        if size == 0 {
            return Err(ConfigValidationError::InvalidTableSize(size).into());
        }

        let entries: Vec<LookupEntry> = (1..=size)
            .map(|i| LookupEntry {
                // i / size rather than a running sum, so the last stratum is exactly 1.0
                cumulative_probability: i as f64 / size as f64,
                sampled_value: generator.sample(spec),
            })
            .collect();

        debug!(
            distribution = %spec.family,
            mean = spec.mean,
            size,
            "Built interarrival lookup table"
        );

        Ok(Self { entries })
    }

    /// Build a table from explicit entries
    pub fn from_entries(entries: Vec<LookupEntry>) -> SimulationResult<Self> {
        if entries.is_empty() {
            return Err(SimulationError::invalid_lookup_table("table has no entries"));
        }

        let mut previous = 0.0;
        for (index, entry) in entries.iter().enumerate() {
            let probability = entry.cumulative_probability;
            if !(probability > 0.0 && probability <= 1.0) {
                return Err(SimulationError::invalid_lookup_table(format!(
                    "entry {} has cumulative probability {} outside (0, 1]",
                    index, probability
                )));
            }
            if probability <= previous {
                return Err(SimulationError::invalid_lookup_table(format!(
                    "entry {} does not increase the cumulative probability ({} after {})",
                    index, probability, previous
                )));
            }
            if !(entry.sampled_value.is_finite() && entry.sampled_value >= 0.0) {
                return Err(SimulationError::invalid_lookup_table(format!(
                    "entry {} has invalid value {}",
                    index, entry.sampled_value
                )));
            }
            previous = probability;
        }

        Ok(Self { entries })
    }

    /// Interarrival time for the uniform draw `u`
    ///
    /// Returns the value of the first entry whose cumulative probability is at
    /// least `u`. A draw above every entry resolves to the last entry.
    pub fn resolve(&self, u: f64) -> f64 {
        let index = self.entries.partition_point(|entry| entry.cumulative_probability < u);
        match self.entries.get(index) {
            Some(entry) => entry.sampled_value,
            None => {
                debug!(draw = u, "Draw exceeds the lookup table, using the last entry");
                self.entries.last().map_or(0.0, |entry| entry.sampled_value)
            }
        }
    }

    /// All entries in order
    pub fn entries(&self) -> &[LookupEntry] {
        &self.entries
    }

    /// Number of strata
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed table
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mean of the sampled values
    pub fn mean_value(&self) -> f64 {
        let total: f64 = self.entries.iter().map(|entry| entry.sampled_value).sum();
        total / self.entries.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::ReplaySource;
    use crate::types::DistributionFamily;

    fn entry(cumulative_probability: f64, sampled_value: f64) -> LookupEntry {
        LookupEntry { cumulative_probability, sampled_value }
    }

    fn three_strata() -> InterArrivalTable {
        InterArrivalTable::from_entries(vec![entry(0.3, 1.0), entry(0.6, 2.0), entry(0.9, 3.0)])
            .unwrap()
    }

    #[test]
    fn test_build_strata() {
        let mut generator = VariateGenerator::from_seed(Some(11));
        let spec = DistributionSpec::new(DistributionFamily::Exponential, 5.0);
        let table = InterArrivalTable::build(&spec, 7, &mut generator).unwrap();

        assert_eq!(table.len(), 7);
        assert!(!table.is_empty());
        for pair in table.entries().windows(2) {
            assert!(pair[1].cumulative_probability > pair[0].cumulative_probability);
        }
        let last = table.entries().last().unwrap();
        assert!((last.cumulative_probability - 1.0).abs() < 1e-12);
        assert!(table.entries().iter().all(|e| e.sampled_value >= 0.0));
    }

    #[test]
    fn test_build_consumes_one_sample_per_stratum() {
        let source = ReplaySource::new(vec![0.5]).unwrap();
        let mut generator = VariateGenerator::new(source);
        let spec = DistributionSpec::new(DistributionFamily::Exponential, 1.0);
        InterArrivalTable::build(&spec, 10, &mut generator).unwrap();
        assert_eq!(generator.source().consumed(), 10);
    }

    #[test]
    fn test_build_rejects_zero_size() {
        let mut generator = VariateGenerator::from_seed(Some(1));
        let spec = DistributionSpec::new(DistributionFamily::Exponential, 5.0);
        let result = InterArrivalTable::build(&spec, 0, &mut generator);
        assert!(matches!(
            result,
            Err(SimulationError::Configuration(ConfigValidationError::InvalidTableSize(0)))
        ));
    }

    #[test]
    fn test_unrecognized_distribution_table_is_all_zero() {
        let mut generator = VariateGenerator::from_seed(Some(5));
        let spec = DistributionSpec::new(DistributionFamily::parse_lenient("xyz"), 5.0);
        let table = InterArrivalTable::build(&spec, 20, &mut generator).unwrap();
        assert!(table.entries().iter().all(|e| e.sampled_value == 0.0));
    }

    #[test]
    fn test_resolve_picks_first_covering_entry() {
        let table = three_strata();
        assert_eq!(table.resolve(0.01), 1.0);
        assert_eq!(table.resolve(0.3), 1.0);
        assert_eq!(table.resolve(0.31), 2.0);
        assert_eq!(table.resolve(0.6), 2.0);
        assert_eq!(table.resolve(0.75), 3.0);
        assert_eq!(table.resolve(0.9), 3.0);
    }

    #[test]
    fn test_resolve_falls_back_to_last_entry() {
        let table = three_strata();
        assert_eq!(table.resolve(0.95), 3.0);
        assert_eq!(table.resolve(1.0), 3.0);
    }

    #[test]
    fn test_from_entries_validation() {
        assert!(InterArrivalTable::from_entries(Vec::new()).is_err());
        assert!(InterArrivalTable::from_entries(vec![entry(0.0, 1.0)]).is_err());
        assert!(InterArrivalTable::from_entries(vec![entry(1.2, 1.0)]).is_err());
        assert!(InterArrivalTable::from_entries(vec![entry(0.5, 1.0), entry(0.5, 2.0)]).is_err());
        assert!(InterArrivalTable::from_entries(vec![entry(0.5, -1.0)]).is_err());
        assert!(InterArrivalTable::from_entries(vec![entry(0.5, f64::NAN)]).is_err());
        assert!(InterArrivalTable::from_entries(vec![entry(1.0, 0.0)]).is_ok());
    }

    #[test]
    fn test_mean_value() {
        assert!((three_strata().mean_value() - 2.0).abs() < 1e-12);
    }
}
