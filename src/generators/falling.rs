//! Falling pattern: one decreasing run across the whole week
//!
//! A single configuration with no parameters: every half-day decays from the
//! `[0.85, 0.9]` opening window by `-0.05/-0.03`.

use super::helpers::{fit_decay, Decay, Observation, RateWindow};
use super::PatternGenerator;
use crate::{DayPrice, Pattern, PatternKind, HALF_DAYS};

const OPENING: RateWindow = RateWindow::new(0.85, 0.9);
const DECAY: Decay = Decay::new(0.05, 0.03);

/// Build the single falling pattern, or `None` when an observed price falls
/// outside the decaying window.
pub fn pattern(obs: &Observation) -> Option<Pattern> {
    let mut prices = [DayPrice::default(); HALF_DAYS];

    fit_decay(obs, &mut prices, 0..HALF_DAYS, OPENING, DECAY)?;

    Some(Pattern {
        kind: PatternKind::Falling,
        prices,
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FallingGenerator;

impl PatternGenerator for FallingGenerator {
    fn kind(&self) -> PatternKind {
        PatternKind::Falling
    }

    fn enumerate(&self, obs: &Observation) -> Vec<Pattern> {
        pattern(obs).into_iter().collect()
    }
}
