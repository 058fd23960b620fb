//! Small spike pattern: a decreasing run, then a modest five-half-day bump
//!
//! Pre-spike half-days decay from `[0.4, 0.9]`; the bump is a fixed
//! five-window sequence topping out at 2x, with two hard-coded adjustments
//! matching observed game behavior: the 3rd and 5th bump half-days cap one
//! bell below their rate bound, and the 4th (peak) half-day inherits the
//! previous half-day's minimum. The rest of the week is a static
//! `[0.4, 0.9]` window.

use super::helpers::{fit_decay, fit_slot, fit_static, Decay, Observation, RateWindow};
use super::PatternGenerator;
use crate::{DayPrice, Pattern, PatternKind, HALF_DAYS};

const PRE_SPIKE: RateWindow = RateWindow::new(0.4, 0.9);
const DECAY: Decay = Decay::new(0.05, 0.03);
const TAIL: RateWindow = RateWindow::new(0.4, 0.9);

/// Rate windows of the five bump half-days
pub const SPIKE_MIN_RATES: [f64; 5] = [0.9, 0.9, 1.4, 1.4, 1.4];
pub const SPIKE_MAX_RATES: [f64; 5] = [1.4, 1.4, 2.0, 2.0, 2.0];

/// Last possible spike start (unlike a big spike, the bump may open the week)
pub const SPIKE_START_MAX: usize = 7;

/// Build the small spike pattern for one spike start, or `None` when an
/// observed price falls outside the configuration's windows.
pub fn pattern(obs: &Observation, spike_start: usize) -> Option<Pattern> {
    debug_assert!(
        spike_start <= SPIKE_START_MAX,
        "spike start {spike_start} violates enumeration invariants"
    );

    let mut prices = [DayPrice::default(); HALF_DAYS];

    fit_decay(obs, &mut prices, 0..spike_start, PRE_SPIKE, DECAY)?;

    for offset in 0..SPIKE_MIN_RATES.len() {
        let slot = spike_start + offset;
        let mut min_pred = obs.min_rate_price(SPIKE_MIN_RATES[offset]);
        let mut max_pred = obs.max_rate_price(SPIKE_MAX_RATES[offset]);

        // 3rd and 5th bump half-days cap one bell below the rate bound
        if offset == 2 || offset == 4 {
            max_pred -= 1;
        }

        // The peak half-day inherits the previous slot's minimum
        if offset == 3 {
            min_pred = prices[slot - 1].min;
        }

        prices[slot] = fit_slot(obs, slot, min_pred, max_pred)?;
    }

    fit_static(obs, &mut prices, spike_start + 5..HALF_DAYS, TAIL)?;

    Some(Pattern {
        kind: PatternKind::SmallSpike,
        prices,
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SmallSpikeGenerator;

impl PatternGenerator for SmallSpikeGenerator {
    fn kind(&self) -> PatternKind {
        PatternKind::SmallSpike
    }

    fn enumerate(&self, obs: &Observation) -> Vec<Pattern> {
        (0..=SPIKE_START_MAX)
            .filter_map(|spike_start| pattern(obs, spike_start))
            .collect()
    }
}
