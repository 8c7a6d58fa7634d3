//! Per-game city state.

use serde::{Deserialize, Serialize};

use super::{Colour, CubePile};
use crate::board::{board, CityId};

/// A city's cubes and research station. Name and colour come from the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub cubes: CubePile,
    pub has_research_station: bool,
}

impl City {
    /// A clean city with no cubes and no station.
    #[must_use]
    pub const fn new(id: CityId) -> Self {
        Self {
            id,
            cubes: CubePile::empty(),
            has_research_station: false,
        }
    }

    /// City name from the board.
    #[must_use]
    pub fn name(&self) -> &'static str {
        board().name(self.id)
    }

    /// City colour from the board.
    #[must_use]
    pub fn colour(&self) -> Colour {
        board().colour(self.id)
    }

    /// Cubes of one colour.
    #[must_use]
    pub fn cubes(&self, colour: Colour) -> u8 {
        self.cubes.get(colour)
    }
}
