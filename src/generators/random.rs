//! Random pattern: three increase phases interleaved with two decrease phases
//!
//! The week splits into `(inc1, dec1, inc2, dec2, inc3)` half-day phases.
//! Increase half-days share a static `[0.9, 1.4]` window; decrease phases
//! restart at `[0.6, 0.8]` and decay `-0.1/-0.04` per half-day.

use super::helpers::{fit_decay, fit_static, Decay, Observation, RateWindow};
use super::PatternGenerator;
use crate::{DayPrice, Pattern, PatternKind, HALF_DAYS};

const INCREASE: RateWindow = RateWindow::new(0.9, 1.4);
const DECREASE: RateWindow = RateWindow::new(0.6, 0.8);
const DECAY: Decay = Decay::new(0.1, 0.04);

/// Half-day lengths of the five phases.
///
/// The enumeration constraints tie the lengths together: `inc2` and `dec2`
/// are derived, and a valid combination always sums to the full week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseLengths {
    pub inc1: usize,
    pub dec1: usize,
    pub inc2: usize,
    pub dec2: usize,
    pub inc3: usize,
}

impl PhaseLengths {
    /// Derive the full phase lengths from the three free parameters.
    ///
    /// Callers must respect the enumeration ranges: `inc1 <= 6`,
    /// `dec1 in {2, 3}`, `inc3 < 7 - inc1`.
    pub fn new(inc1: usize, dec1: usize, inc3: usize) -> Self {
        Self {
            inc1,
            dec1,
            inc2: 7 - inc1 - inc3,
            dec2: 5 - dec1,
            inc3,
        }
    }

    /// Whether the lengths satisfy the family's combinatorial constraints
    pub fn is_valid(&self) -> bool {
        self.inc1 <= 6
            && matches!(self.dec1, 2 | 3)
            && self.inc1 + self.inc3 < 7
            && self.inc2 == 7 - self.inc1 - self.inc3
            && self.dec2 == 5 - self.dec1
            && self.inc1 + self.dec1 + self.inc2 + self.dec2 + self.inc3 == HALF_DAYS
    }
}

/// Build the random pattern for one phase configuration, or `None` when an
/// observed price falls outside the configuration's windows.
pub fn pattern(obs: &Observation, phases: PhaseLengths) -> Option<Pattern> {
    debug_assert!(
        phases.is_valid(),
        "phase lengths violate enumeration invariants: {phases:?}"
    );

    let mut prices = [DayPrice::default(); HALF_DAYS];
    let mut at = 0;

    fit_static(obs, &mut prices, at..at + phases.inc1, INCREASE)?;
    at += phases.inc1;

    fit_decay(obs, &mut prices, at..at + phases.dec1, DECREASE, DECAY)?;
    at += phases.dec1;

    fit_static(obs, &mut prices, at..at + phases.inc2, INCREASE)?;
    at += phases.inc2;

    fit_decay(obs, &mut prices, at..at + phases.dec2, DECREASE, DECAY)?;
    at += phases.dec2;

    fit_static(obs, &mut prices, at..at + phases.inc3, INCREASE)?;

    Some(Pattern {
        kind: PatternKind::Random,
        prices,
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl PatternGenerator for RandomGenerator {
    fn kind(&self) -> PatternKind {
        PatternKind::Random
    }

    fn enumerate(&self, obs: &Observation) -> Vec<Pattern> {
        let mut patterns = Vec::new();

        for dec1 in 2..=3 {
            for inc1 in 0..7 {
                for inc3 in 0..7 - inc1 {
                    if let Some(p) = pattern(obs, PhaseLengths::new(inc1, dec1, inc3)) {
                        patterns.push(p);
                    }
                }
            }
        }

        patterns
    }
}
