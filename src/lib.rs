//! # Stalkcast - Stalk Market price forecaster
//!
//! Turnip price forecasting engine for Animal Crossing: New Horizons style
//! markets. Given the week's base ("sell") price and a partial series of 12
//! half-day observed prices, the engine enumerates every price-pattern
//! hypothesis consistent with the game-rule price models, derives per-half-day
//! min/max bounds across all surviving hypotheses, and assigns a probability
//! to each pattern family from a fixed transition matrix conditioned on the
//! previous week's outcome.
//!
//! ## Quick Start
//!
//! ```rust
//! use stalkcast::prelude::*;
//!
//! // Base price 100, only Monday AM known so far
//! let mut observed = [0u32; HALF_DAYS];
//! observed[0] = 87;
//!
//! let forecast = Forecast::new(100, observed, None).unwrap();
//!
//! for (kind, prob) in forecast.probabilities() {
//!     println!("{}: {:.2}%", kind.name(), prob * 100.0);
//! }
//! ```

pub mod generators;
pub mod transition;

pub mod prelude {
    pub use crate::{
        // Parallel
        forecast_parallel,
        // Generators
        generators::{
            helpers::Observation, BigSpikeGenerator, FallingGenerator, PatternGenerator,
            PhaseLengths, RandomGenerator, SmallSpikeGenerator, BUILTIN,
        },
        // Probability
        transition::TRANSITION,
        // Types
        DayPrice,
        Forecast,
        // Errors
        ForecastError,
        IslandError,
        IslandForecast,
        Pattern,
        PatternKind,
        Result,
        WeekRecord,
        BASE_PRICE_MAX,
        BASE_PRICE_MIN,
        HALF_DAYS,
        PRICE_CAP,
    };
}

use std::collections::BTreeMap;

// ============================================================
// CONSTANTS
// ============================================================

/// Number of price slots per week (AM/PM for Monday through Saturday)
pub const HALF_DAYS: usize = 12;

/// Lowest valid base (sell) price
pub const BASE_PRICE_MIN: u32 = 90;

/// Highest valid base (sell) price
pub const BASE_PRICE_MAX: u32 = 110;

/// Highest observable buy price (6.0x the highest base price)
pub const PRICE_CAP: u32 = 660;

// ============================================================
// ERRORS
// ============================================================

pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur constructing a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ForecastError {
    #[error("base price {0} out of range [{min}, {max}]", min = BASE_PRICE_MIN, max = BASE_PRICE_MAX)]
    InvalidBasePrice(u32),

    #[error("observed price {value} at half-day {slot} exceeds {cap}", cap = PRICE_CAP)]
    InvalidObservedPrice { slot: usize, value: u32 },
}

// ============================================================
// DATA MODEL
// ============================================================

/// Price bounds for one half-day slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DayPrice {
    pub min: u32,
    pub max: u32,
}

/// The four pattern families of the price model
///
/// Declaration order is the transition-matrix row/column order; do not
/// reorder without updating [`transition::TRANSITION`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum PatternKind {
    /// Prices move randomly, peaking around 1.1x-1.45x the base price
    Random,
    /// A sharp spike: the peak half-day reaches 2x-6x the base price
    BigSpike,
    /// Prices keep falling all week
    Falling,
    /// A modest spike: the peak half-days reach 1.4x-2x the base price
    SmallSpike,
}

impl PatternKind {
    pub const COUNT: usize = 4;

    /// All kinds in transition-matrix order
    pub const ALL: [PatternKind; Self::COUNT] = [
        PatternKind::Random,
        PatternKind::BigSpike,
        PatternKind::Falling,
        PatternKind::SmallSpike,
    ];

    /// Ordinal used to index [`transition::TRANSITION`]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable pattern family name
    pub const fn name(self) -> &'static str {
        match self {
            PatternKind::Random => "random",
            PatternKind::BigSpike => "big spike",
            PatternKind::Falling => "falling",
            PatternKind::SmallSpike => "small spike",
        }
    }

    /// Short description of the family's typical shape
    pub const fn description(self) -> &'static str {
        match self {
            PatternKind::Random => "prices fluctuate with no clear trend, topping out below 1.45x",
            PatternKind::BigSpike => "a steady decline followed by a sharp spike up to 6x",
            PatternKind::Falling => "prices fall all week, sell elsewhere",
            PatternKind::SmallSpike => "a decline followed by a modest spike up to 2x",
        }
    }
}

/// One fully-determined hypothesis for all 12 half-day price bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub prices: [DayPrice; HALF_DAYS],
}

// ============================================================
// FORECAST
// ============================================================

/// A full week forecast: the surviving hypothesis set, the per-half-day
/// price envelope, and the pattern-family probabilities.
///
/// Constructed once via [`Forecast::new`] and never mutated afterwards;
/// presentation layers consume it through the read-only accessors.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Forecast {
    base_price: u32,
    observed: [u32; HALF_DAYS],
    patterns: Vec<Pattern>,
    bounds: [DayPrice; HALF_DAYS],
    probabilities: BTreeMap<PatternKind, f64>,
}

impl Forecast {
    /// Build a forecast from the week's base price, the observed half-day
    /// prices (0 = not yet known) and, optionally, the previous week's
    /// forecast to condition the pattern probabilities on.
    ///
    /// An empty pattern set is a valid outcome, not an error: it means the
    /// observed prices are inconsistent with every modeled pattern and no
    /// forecast is possible (see [`Forecast::is_unknown`]).
    pub fn new(
        base_price: u32,
        observed: [u32; HALF_DAYS],
        previous: Option<&Forecast>,
    ) -> Result<Self> {
        let obs = generators::helpers::Observation::new(base_price, observed)?;

        let mut patterns = Vec::new();
        for generator in generators::BUILTIN {
            patterns.extend(generator.enumerate(&obs));
        }

        let bounds = envelope(&patterns);
        let probabilities =
            transition::probabilities(&patterns, previous.map(|f| &f.probabilities));

        Ok(Self {
            base_price,
            observed,
            patterns,
            bounds,
            probabilities,
        })
    }

    /// The week's base (sell) price
    #[inline]
    pub fn base_price(&self) -> u32 {
        self.base_price
    }

    /// The observed half-day prices this forecast was built from (0 = unknown)
    #[inline]
    pub fn observed(&self) -> &[u32; HALF_DAYS] {
        &self.observed
    }

    /// All surviving pattern hypotheses
    #[inline]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Per-half-day min/max envelope across all surviving patterns.
    ///
    /// All-zero when [`Forecast::is_unknown`] returns true; callers must
    /// check that before trusting the bounds.
    #[inline]
    pub fn bounds(&self) -> &[DayPrice; HALF_DAYS] {
        &self.bounds
    }

    /// Probability per pattern family, summing to 1.0. Families with no
    /// surviving pattern are absent from the map.
    #[inline]
    pub fn probabilities(&self) -> &BTreeMap<PatternKind, f64> {
        &self.probabilities
    }

    /// True when no modeled pattern matches the observed prices
    #[inline]
    pub fn is_unknown(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Highest upper bound of the week, the ceiling a chart needs
    #[inline]
    pub fn peak_bound(&self) -> u32 {
        self.bounds.iter().map(|b| b.max).max().unwrap_or(0)
    }
}

/// Elementwise min-of-mins / max-of-maxes across all patterns.
/// Left all-zero when the pattern set is empty.
fn envelope(patterns: &[Pattern]) -> [DayPrice; HALF_DAYS] {
    let mut bounds = [DayPrice::default(); HALF_DAYS];

    if patterns.is_empty() {
        return bounds;
    }

    for bound in &mut bounds {
        bound.min = u32::MAX;
    }

    for pattern in patterns {
        for (bound, price) in bounds.iter_mut().zip(pattern.prices.iter()) {
            bound.min = bound.min.min(price.min);
            bound.max = bound.max.max(price.max);
        }
    }

    bounds
}

// ============================================================
// PARALLEL FORECASTING
// ============================================================

use rayon::prelude::*;

/// One island's week of inputs for [`forecast_parallel`]
#[derive(Debug, Clone, Copy)]
pub struct WeekRecord<'a> {
    pub island: &'a str,
    pub base_price: u32,
    pub observed: [u32; HALF_DAYS],
    pub previous: Option<&'a Forecast>,
}

/// Successful forecast for a single island
#[derive(Debug)]
pub struct IslandForecast {
    pub island: String,
    pub forecast: Forecast,
}

/// Failed forecast for a single island
#[derive(Debug)]
pub struct IslandError {
    pub island: String,
    pub error: ForecastError,
}

/// Forecast many islands in parallel.
///
/// Each forecast is a pure function of its record, so records are processed
/// concurrently with no shared state.
pub fn forecast_parallel<'a, I>(records: I) -> (Vec<IslandForecast>, Vec<IslandError>)
where
    I: IntoParallelIterator<Item = WeekRecord<'a>>,
{
    let results: Vec<_> = records
        .into_par_iter()
        .map(|record| {
            Forecast::new(record.base_price, record.observed, record.previous)
                .map(|forecast| IslandForecast {
                    island: record.island.to_string(),
                    forecast,
                })
                .map_err(|error| IslandError {
                    island: record.island.to_string(),
                    error,
                })
        })
        .collect();

    let mut successes = Vec::new();
    let mut errors = Vec::new();

    for result in results {
        match result {
            Ok(r) => successes.push(r),
            Err(e) => errors.push(e),
        }
    }

    (successes, errors)
}

// ============================================================
// TESTS
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_price_validation() {
        assert_eq!(
            Forecast::new(89, [0; HALF_DAYS], None),
            Err(ForecastError::InvalidBasePrice(89))
        );
        assert_eq!(
            Forecast::new(111, [0; HALF_DAYS], None),
            Err(ForecastError::InvalidBasePrice(111))
        );
        assert!(Forecast::new(90, [0; HALF_DAYS], None).is_ok());
        assert!(Forecast::new(110, [0; HALF_DAYS], None).is_ok());
    }

    #[test]
    fn test_observed_price_validation() {
        let mut observed = [0u32; HALF_DAYS];
        observed[5] = 661;
        assert_eq!(
            Forecast::new(100, observed, None),
            Err(ForecastError::InvalidObservedPrice {
                slot: 5,
                value: 661
            })
        );

        // The cap itself is observable (6.0x of base 110)
        observed[5] = 660;
        assert!(Forecast::new(100, observed, None).is_ok());
    }

    #[test]
    fn test_envelope_empty() {
        let bounds = envelope(&[]);
        assert!(bounds.iter().all(|b| b.min == 0 && b.max == 0));
    }

    #[test]
    fn test_envelope_two_patterns() {
        let mut a = [DayPrice { min: 40, max: 90 }; HALF_DAYS];
        let mut b = [DayPrice { min: 60, max: 80 }; HALF_DAYS];
        a[3] = DayPrice { min: 200, max: 600 };
        b[3] = DayPrice { min: 90, max: 140 };

        let patterns = [
            Pattern {
                kind: PatternKind::BigSpike,
                prices: a,
            },
            Pattern {
                kind: PatternKind::Random,
                prices: b,
            },
        ];

        let bounds = envelope(&patterns);
        assert_eq!(bounds[0], DayPrice { min: 40, max: 90 });
        assert_eq!(bounds[3], DayPrice { min: 90, max: 600 });
    }

    #[test]
    fn test_kind_index_matches_all_order() {
        for (i, kind) in PatternKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_kind_metadata() {
        for kind in PatternKind::ALL {
            assert!(!kind.name().is_empty());
            assert!(!kind.description().is_empty());
        }
        assert_eq!(PatternKind::BigSpike.name(), "big spike");
    }

    #[test]
    fn test_peak_bound_all_unknown() {
        let forecast = Forecast::new(100, [0; HALF_DAYS], None).unwrap();
        // Big spike peak window tops out at 6.0x
        assert_eq!(forecast.peak_bound(), 600);
    }

    #[test]
    fn test_accessors_echo_inputs() {
        let mut observed = [0u32; HALF_DAYS];
        observed[0] = 87;
        let forecast = Forecast::new(104, observed, None).unwrap();
        assert_eq!(forecast.base_price(), 104);
        assert_eq!(forecast.observed(), &observed);
    }
}
