//! Conversion counters as seen by callers.

use serde::Serialize;

/// Point-in-time conversion counts.
///
/// `total` is always the sum of the three network counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    pub amazon: u64,
    pub earnpe: u64,
    pub earnkaro: u64,
    pub total: u64,
}

impl ConversionStats {
    /// Builds stats from per-network counts, deriving `total`.
    pub fn new(amazon: u64, earnpe: u64, earnkaro: u64) -> Self {
        Self {
            amazon,
            earnpe,
            earnkaro,
            total: amazon + earnpe + earnkaro,
        }
    }

    /// Counts accumulated since `earlier`.
    pub fn since(&self, earlier: &ConversionStats) -> ConversionStats {
        ConversionStats::new(
            self.amazon.saturating_sub(earlier.amazon),
            self.earnpe.saturating_sub(earlier.earnpe),
            self.earnkaro.saturating_sub(earlier.earnkaro),
        )
    }
}

/// Registered platform counts per aggregator network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlatformCounts {
    pub earnpe: usize,
    pub earnkaro: usize,
}

/// Stats query result: counters plus registry size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub conversions: ConversionStats,
    pub platforms: PlatformCounts,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_total_is_derived() {
        let stats = ConversionStats::new(2, 3, 4);
        assert_eq!(stats.total, 9);
    }

    #[test]
    fn test_since_computes_delta() {
        let before = ConversionStats::new(1, 1, 0);
        let after = ConversionStats::new(3, 1, 2);
        let delta = after.since(&before);

        assert_eq!(delta, ConversionStats::new(2, 0, 2));
        assert_eq!(delta.total, delta.amazon + delta.earnpe + delta.earnkaro);
    }

    #[test]
    fn test_report_serializes_flat() {
        let report = StatsReport {
            conversions: ConversionStats::new(1, 0, 0),
            platforms: PlatformCounts {
                earnpe: 18,
                earnkaro: 13,
            },
        };

        assert_eq!(
            serde_json::to_value(report).unwrap(),
            json!({
                "amazon": 1,
                "earnpe": 0,
                "earnkaro": 0,
                "total": 1,
                "platforms": { "earnpe": 18, "earnkaro": 13 }
            })
        );
    }
}
