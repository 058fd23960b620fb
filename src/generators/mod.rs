//! Pattern generators for the four price-model families
//!
//! Each generator enumerates the phase configurations its family allows and
//! produces one [`Pattern`] per configuration that is consistent with the
//! observed prices. A configuration whose predicted window excludes an
//! observed price is discarded whole; enumeration bounds make malformed
//! configurations impossible by construction (checked by `debug_assert!`).

pub mod helpers;

pub mod big_spike;
pub mod falling;
pub mod random;
pub mod small_spike;

pub use big_spike::BigSpikeGenerator;
pub use falling::FallingGenerator;
pub use random::{PhaseLengths, RandomGenerator};
pub use small_spike::SmallSpikeGenerator;

use crate::{Pattern, PatternKind};
use helpers::Observation;

/// A price-model family that can enumerate its pattern hypotheses
pub trait PatternGenerator: Send + Sync {
    /// The family this generator produces
    fn kind(&self) -> PatternKind;

    /// All patterns of this family consistent with the observation.
    /// An empty result means no configuration matched.
    fn enumerate(&self, obs: &Observation) -> Vec<Pattern>;
}

/// The four builtin generators, in [`PatternKind::ALL`] order
pub const BUILTIN: [&dyn PatternGenerator; PatternKind::COUNT] = [
    &RandomGenerator,
    &BigSpikeGenerator,
    &FallingGenerator,
    &SmallSpikeGenerator,
];
