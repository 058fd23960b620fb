//! Shared rate-window helpers for pattern generation
//!
//! Every generator walks the week the same way: a half-day's price bounds are
//! the model's rate window scaled by the base price, an observed price must
//! land inside that window (otherwise the whole configuration is discarded),
//! and a matched slot collapses to the observed value. The functions here hold
//! that common walk so the generator modules only describe phase structure.

use crate::{
    DayPrice, ForecastError, Result, BASE_PRICE_MAX, BASE_PRICE_MIN, HALF_DAYS, PRICE_CAP,
};

// ============================================================
// OBSERVATION
// ============================================================

/// Validated engine input: the week's base price plus the observed half-day
/// prices (0 = not yet known).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    base_price: u32,
    prices: [u32; HALF_DAYS],
}

impl Observation {
    /// Validate and wrap the caller-supplied inputs.
    pub fn new(base_price: u32, prices: [u32; HALF_DAYS]) -> Result<Self> {
        if !(BASE_PRICE_MIN..=BASE_PRICE_MAX).contains(&base_price) {
            return Err(ForecastError::InvalidBasePrice(base_price));
        }

        for (slot, &value) in prices.iter().enumerate() {
            if value > PRICE_CAP {
                return Err(ForecastError::InvalidObservedPrice { slot, value });
            }
        }

        Ok(Self { base_price, prices })
    }

    #[inline]
    pub fn base_price(&self) -> u32 {
        self.base_price
    }

    /// Observed price for a half-day slot, 0 when unknown
    #[inline]
    pub fn price(&self, slot: usize) -> u32 {
        self.prices[slot]
    }

    /// Tightest rate lower bound consistent with the integer-rounded
    /// observed price at `slot`. Only meaningful for a nonzero slot.
    #[inline]
    pub fn min_rate(&self, slot: usize) -> f64 {
        (f64::from(self.prices[slot]) - 0.5) / f64::from(self.base_price)
    }

    /// Tightest rate upper bound consistent with the integer-rounded
    /// observed price at `slot`. Only meaningful for a nonzero slot.
    #[inline]
    pub fn max_rate(&self, slot: usize) -> f64 {
        (f64::from(self.prices[slot]) + 0.5) / f64::from(self.base_price)
    }

    /// Integer price lower bound for a model rate (rounds down)
    #[inline]
    pub fn min_rate_price(&self, rate: f64) -> u32 {
        (rate * f64::from(self.base_price)).floor() as u32
    }

    /// Integer price upper bound for a model rate (rounds up)
    #[inline]
    pub fn max_rate_price(&self, rate: f64) -> u32 {
        (rate * f64::from(self.base_price)).ceil() as u32
    }
}

// ============================================================
// RATE WINDOWS
// ============================================================

/// A `[min, max]` multiplier of the base price for one model phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateWindow {
    pub min: f64,
    pub max: f64,
}

impl RateWindow {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Per-half-day window shrink applied within a decreasing run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decay {
    pub min: f64,
    pub max: f64,
}

impl Decay {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

// ============================================================
// SLOT FITTING
// ============================================================

/// Fit one half-day against its predicted bounds.
///
/// Returns the generic bounds for an unknown slot, the collapsed
/// `{observed, observed}` bound for a matching observed slot, and `None`
/// when the observed price falls outside the prediction (no match).
#[inline]
pub fn fit_slot(obs: &Observation, slot: usize, min_pred: u32, max_pred: u32) -> Option<DayPrice> {
    let observed = obs.price(slot);

    if observed == 0 {
        return Some(DayPrice {
            min: min_pred,
            max: max_pred,
        });
    }

    if observed < min_pred || observed > max_pred {
        return None;
    }

    Some(DayPrice {
        min: observed,
        max: observed,
    })
}

/// Fit a phase whose rate window is the same for every half-day.
pub fn fit_static(
    obs: &Observation,
    prices: &mut [DayPrice; HALF_DAYS],
    slots: std::ops::Range<usize>,
    window: RateWindow,
) -> Option<()> {
    let min_pred = obs.min_rate_price(window.min);
    let max_pred = obs.max_rate_price(window.max);

    for slot in slots {
        prices[slot] = fit_slot(obs, slot, min_pred, max_pred)?;
    }

    Some(())
}

/// Fit a decreasing run: the window decays per half-day, and an observed
/// price re-anchors the window to its exact rate interval so every later
/// half-day of the run is predicted from real data.
pub fn fit_decay(
    obs: &Observation,
    prices: &mut [DayPrice; HALF_DAYS],
    slots: std::ops::Range<usize>,
    window: RateWindow,
    decay: Decay,
) -> Option<()> {
    let mut min_rate = window.min;
    let mut max_rate = window.max;

    for slot in slots {
        prices[slot] = fit_slot(
            obs,
            slot,
            obs.min_rate_price(min_rate),
            obs.max_rate_price(max_rate),
        )?;

        if obs.price(slot) != 0 {
            min_rate = obs.min_rate(slot);
            max_rate = obs.max_rate(slot);
        }

        min_rate -= decay.min;
        max_rate -= decay.max;
    }

    Some(())
}

// ============================================================
// TESTS
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(base_price: u32, known: &[(usize, u32)]) -> Observation {
        let mut prices = [0u32; HALF_DAYS];
        for &(slot, value) in known {
            prices[slot] = value;
        }
        Observation::new(base_price, prices).unwrap()
    }

    #[test]
    fn test_rate_price_rounding() {
        let week = obs(100, &[]);
        // floor for the lower bound, ceil for the upper bound
        assert_eq!(week.min_rate_price(0.85), 85);
        assert_eq!(week.max_rate_price(0.85), 85);
        assert_eq!(week.min_rate_price(0.847), 84);
        assert_eq!(week.max_rate_price(0.847), 85);

        let week = obs(93, &[]);
        assert_eq!(week.min_rate_price(0.9), 83); // 83.7
        assert_eq!(week.max_rate_price(0.9), 84);
    }

    #[test]
    fn test_observed_rate_interval() {
        let week = obs(100, &[(0, 90)]);
        assert!((week.min_rate(0) - 0.895).abs() < 1e-12);
        assert!((week.max_rate(0) - 0.905).abs() < 1e-12);
    }

    #[test]
    fn test_negative_rate_clamps_to_zero() {
        let week = obs(100, &[]);
        assert_eq!(week.min_rate_price(-0.02), 0);
    }

    #[test]
    fn test_fit_slot_unknown_keeps_window() {
        let week = obs(100, &[]);
        assert_eq!(
            fit_slot(&week, 0, 85, 90),
            Some(DayPrice { min: 85, max: 90 })
        );
    }

    #[test]
    fn test_fit_slot_collapses_to_observed() {
        let week = obs(100, &[(0, 87)]);
        assert_eq!(
            fit_slot(&week, 0, 85, 90),
            Some(DayPrice { min: 87, max: 87 })
        );
    }

    #[test]
    fn test_fit_slot_rejects_out_of_window() {
        let week = obs(100, &[(0, 91)]);
        assert_eq!(fit_slot(&week, 0, 85, 90), None);
        let week = obs(100, &[(0, 84)]);
        assert_eq!(fit_slot(&week, 0, 85, 90), None);
    }

    #[test]
    fn test_fit_decay_reanchors_on_observed() {
        // After seeing 90 at base 100, the next half-day is predicted from
        // the exact [0.895, 0.905] interval minus one decay step:
        // [floor(84.5), ceil(87.5)] = [84, 88].
        let week = obs(100, &[(0, 90)]);
        let mut prices = [DayPrice::default(); HALF_DAYS];

        fit_decay(
            &week,
            &mut prices,
            0..2,
            RateWindow::new(0.85, 0.9),
            Decay::new(0.05, 0.03),
        )
        .unwrap();

        assert_eq!(prices[0], DayPrice { min: 90, max: 90 });
        assert_eq!(prices[1], DayPrice { min: 84, max: 88 });
    }

    #[test]
    fn test_fit_decay_generic_windows_without_data() {
        let week = obs(100, &[]);
        let mut prices = [DayPrice::default(); HALF_DAYS];

        fit_decay(
            &week,
            &mut prices,
            0..3,
            RateWindow::new(0.85, 0.9),
            Decay::new(0.05, 0.03),
        )
        .unwrap();

        assert_eq!(prices[0], DayPrice { min: 85, max: 90 });
        assert_eq!(prices[1], DayPrice { min: 80, max: 87 });
        // 0.85 - 0.05 - 0.05 lands a hair under 0.75 in f64, so the floor
        // is 74 rather than 75; the bound must keep that exact behavior.
        assert_eq!(prices[2], DayPrice { min: 74, max: 84 });
    }

    #[test]
    fn test_fit_static_discards_whole_phase() {
        let week = obs(100, &[(2, 200)]);
        let mut prices = [DayPrice::default(); HALF_DAYS];

        let fit = fit_static(&week, &mut prices, 0..4, RateWindow::new(0.9, 1.4));
        assert_eq!(fit, None);
    }
}
