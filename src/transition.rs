//! Pattern-family probabilities from the week-to-week transition matrix
//!
//! The game picks next week's pattern family from the current one with fixed
//! weights. Conditioning those weights on the previous week's family
//! distribution, restricted to the families that actually survived this
//! week's data, yields the forecast probabilities.

use std::collections::BTreeMap;

use crate::{Pattern, PatternKind};

/// Unnormalized transition weights, `TRANSITION[previous][current]`,
/// rows and columns in [`PatternKind::ALL`] order. Every row sums to 100.
pub const TRANSITION: [[u32; PatternKind::COUNT]; PatternKind::COUNT] = [
    [20, 30, 15, 35], // from Random
    [50, 5, 20, 25],  // from BigSpike
    [25, 45, 5, 25],  // from Falling
    [45, 25, 15, 15], // from SmallSpike
];

/// Probability per family present in `patterns`, conditioned on the previous
/// week's distribution when one is available.
///
/// Duplicate patterns within a family do not increase its weight; this is a
/// per-family model. Without a previous week (or with an empty previous
/// distribution, a week that had no forecast) each matrix column is summed
/// across all rows, a uniform prior over the previous family.
pub(crate) fn probabilities(
    patterns: &[Pattern],
    previous: Option<&BTreeMap<PatternKind, f64>>,
) -> BTreeMap<PatternKind, f64> {
    let mut present = [false; PatternKind::COUNT];
    for pattern in patterns {
        present[pattern.kind.index()] = true;
    }

    let previous = previous.filter(|dist| !dist.is_empty());

    let mut weights = BTreeMap::new();
    for kind in PatternKind::ALL {
        if !present[kind.index()] {
            continue;
        }

        let weight: f64 = match previous {
            Some(dist) => dist
                .iter()
                .map(|(&prev, &prob)| f64::from(TRANSITION[prev.index()][kind.index()]) * prob)
                .sum(),
            None => TRANSITION
                .iter()
                .map(|row| f64::from(row[kind.index()]))
                .sum(),
        };

        weights.insert(kind, weight);
    }

    let total: f64 = weights.values().sum();
    if total > 0.0 {
        for weight in weights.values_mut() {
            *weight /= total;
        }
    }

    weights
}
