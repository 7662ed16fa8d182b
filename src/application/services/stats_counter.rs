//! Conversion counters.

use crate::domain::entities::{ConversionStats, Network};

/// Per-network conversion counters for the life of a converter.
#[derive(Debug, Default)]
pub struct StatsCounter {
    amazon: u64,
    earnpe: u64,
    earnkaro: u64,
}

impl StatsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one conversion for `network`.
    pub fn record(&mut self, network: Network) {
        let counter = match network {
            Network::Amazon => &mut self.amazon,
            Network::EarnPe => &mut self.earnpe,
            Network::EarnKaro => &mut self.earnkaro,
        };
        *counter += 1;

        metrics::counter!("affiliate_conversions_total", "network" => network.as_str())
            .increment(1);
    }

    /// Copy of the current counts.
    pub fn snapshot(&self) -> ConversionStats {
        ConversionStats::new(self.amazon, self.earnpe, self.earnkaro)
    }

    /// Sets every counter back to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
