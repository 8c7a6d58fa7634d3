//! Per-colour disease cube counters.

use serde::{Deserialize, Serialize};

use super::Colour;

/// Cubes of each colour, used both for the supply and for a single city.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubePile {
    counts: [u8; 4],
}

impl CubePile {
    /// A pile with no cubes.
    #[must_use]
    pub const fn empty() -> Self {
        Self { counts: [0; 4] }
    }

    /// A pile with `count` cubes of every colour.
    #[must_use]
    pub const fn full(count: u8) -> Self {
        Self { counts: [count; 4] }
    }

    /// Cubes of one colour.
    #[must_use]
    pub fn get(&self, colour: Colour) -> u8 {
        self.counts[colour.index()]
    }

    /// Total cubes across colours.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| u32::from(c)).sum()
    }

    /// Add cubes of a colour.
    pub fn add(&mut self, colour: Colour, count: u8) {
        self.counts[colour.index()] += count;
    }

    /// Remove up to `count` cubes of a colour, returning how many were removed.
    pub fn remove(&mut self, colour: Colour, count: u8) -> u8 {
        let slot = &mut self.counts[colour.index()];
        let removed = count.min(*slot);
        *slot -= removed;
        removed
    }

    /// Colours with at least one cube.
    pub fn colours_present(&self) -> impl Iterator<Item = Colour> + '_ {
        Colour::ALL.into_iter().filter(|&c| self.get(c) > 0)
    }
}
