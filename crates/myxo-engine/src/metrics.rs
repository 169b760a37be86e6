//! Per-tick timing metrics.

use myxo_core::TickId;

/// Wall-clock timings for the most recent tick, in microseconds.
///
/// Populated by the engine after each successful tick; read them back with
/// [`Simulation::metrics`](crate::Simulation::metrics).
#[derive(Clone, Debug, Default)]
pub struct TickMetrics {
    /// The tick these timings belong to.
    pub tick: TickId,
    /// Wall-clock time for the whole tick.
    pub total_us: u64,
    /// Per-stage execution times, `(name, microseconds)`, in pipeline order.
    pub stage_us: Vec<(String, u64)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_empty() {
        let m = TickMetrics::default();
        assert_eq!(m.tick, TickId(0));
        assert_eq!(m.total_us, 0);
        assert!(m.stage_us.is_empty());
    }
}
