//! Big spike pattern: a decreasing run, then a sharp five-half-day spike
//!
//! Pre-spike half-days decay from `[0.85, 0.9]`; the spike itself is a fixed
//! five-window sequence peaking at `[2.0, 6.0]`; whatever remains of the week
//! sits in a static `[0.4, 0.9]` window.

use super::helpers::{fit_decay, fit_slot, fit_static, Decay, Observation, RateWindow};
use super::PatternGenerator;
use crate::{DayPrice, Pattern, PatternKind, HALF_DAYS};

const PRE_SPIKE: RateWindow = RateWindow::new(0.85, 0.9);
const DECAY: Decay = Decay::new(0.05, 0.03);
const TAIL: RateWindow = RateWindow::new(0.4, 0.9);

/// Rate windows of the five spike half-days, peak in the middle
pub const SPIKE_MIN_RATES: [f64; 5] = [0.9, 1.4, 2.0, 1.4, 0.9];
pub const SPIKE_MAX_RATES: [f64; 5] = [1.4, 2.0, 6.0, 2.0, 1.4];

/// First possible spike start (a big spike never opens the week)
pub const SPIKE_START_MIN: usize = 1;
/// Last possible spike start (the spike must fit before Saturday PM)
pub const SPIKE_START_MAX: usize = 7;

/// Build the big spike pattern for one spike start, or `None` when an
/// observed price falls outside the configuration's windows.
pub fn pattern(obs: &Observation, spike_start: usize) -> Option<Pattern> {
    debug_assert!(
        (SPIKE_START_MIN..=SPIKE_START_MAX).contains(&spike_start),
        "spike start {spike_start} violates enumeration invariants"
    );

    let mut prices = [DayPrice::default(); HALF_DAYS];

    fit_decay(obs, &mut prices, 0..spike_start, PRE_SPIKE, DECAY)?;

    for (offset, (&min_rate, &max_rate)) in
        SPIKE_MIN_RATES.iter().zip(SPIKE_MAX_RATES.iter()).enumerate()
    {
        let slot = spike_start + offset;
        prices[slot] = fit_slot(
            obs,
            slot,
            obs.min_rate_price(min_rate),
            obs.max_rate_price(max_rate),
        )?;
    }

    fit_static(obs, &mut prices, spike_start + 5..HALF_DAYS, TAIL)?;

    Some(Pattern {
        kind: PatternKind::BigSpike,
        prices,
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BigSpikeGenerator;

impl PatternGenerator for BigSpikeGenerator {
    fn kind(&self) -> PatternKind {
        PatternKind::BigSpike
    }

    fn enumerate(&self, obs: &Observation) -> Vec<Pattern> {
        (SPIKE_START_MIN..=SPIKE_START_MAX)
            .filter_map(|spike_start| pattern(obs, spike_start))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_unknown() -> Observation {
        Observation::new(100, [0; HALF_DAYS]).unwrap()
    }

    #[test]
    fn test_enumeration_count_without_data() {
        let patterns = BigSpikeGenerator.enumerate(&all_unknown());
        assert_eq!(patterns.len(), 7);
    }

    #[test]
    fn test_windows_without_data() {
        let p = pattern(&all_unknown(), 3).unwrap();

        // Pre-spike decay run
        assert_eq!(p.prices[0], DayPrice { min: 85, max: 90 });
        assert_eq!(p.prices[1], DayPrice { min: 80, max: 87 });
        assert_eq!(p.prices[2], DayPrice { min: 74, max: 84 });

        // Spike sequence with the 6x peak in the middle
        assert_eq!(p.prices[3], DayPrice { min: 90, max: 140 });
        assert_eq!(p.prices[4], DayPrice { min: 140, max: 200 });
        assert_eq!(p.prices[5], DayPrice { min: 200, max: 600 });
        assert_eq!(p.prices[6], DayPrice { min: 140, max: 200 });
        assert_eq!(p.prices[7], DayPrice { min: 90, max: 140 });

        // Static tail
        assert_eq!(p.prices[8], DayPrice { min: 40, max: 90 });
        assert_eq!(p.prices[11], DayPrice { min: 40, max: 90 });
    }

    #[test]
    fn test_observed_peak_collapses() {
        let mut observed = [0u32; HALF_DAYS];
        observed[5] = 450;
        let obs = Observation::new(100, observed).unwrap();

        let p = pattern(&obs, 3).unwrap();
        assert_eq!(p.prices[5], DayPrice { min: 450, max: 450 });
    }

    #[test]
    fn test_observed_peak_rules_out_other_starts() {
        // A 450 price only fits the 2.0x-6.0x peak window, so the peak must
        // sit exactly at the observed slot.
        let mut observed = [0u32; HALF_DAYS];
        observed[5] = 450;
        let obs = Observation::new(100, observed).unwrap();

        let patterns = BigSpikeGenerator.enumerate(&obs);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].prices[5], DayPrice { min: 450, max: 450 });
    }

    #[test]
    fn test_observed_pre_spike_sharpens_run() {
        let mut observed = [0u32; HALF_DAYS];
        observed[0] = 90;
        let obs = Observation::new(100, observed).unwrap();

        let p = pattern(&obs, 3).unwrap();
        assert_eq!(p.prices[0], DayPrice { min: 90, max: 90 });
        assert_eq!(p.prices[1], DayPrice { min: 84, max: 88 });
    }
}
