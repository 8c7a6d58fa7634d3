//! Global invariant checks for the self-consistency mode.

use rustc_hash::FxHashSet;

use crate::board::board;
use crate::core::{
    Colour, GameError, GameResult, GameState, PlayerCard, CUBES_PER_COLOUR, MAX_OUTBREAKS,
    RESEARCH_STATIONS,
};
use crate::rules::infection::OUTBREAK_THRESHOLD;

impl GameState {
    /// Re-validate every global invariant of a set-up game.
    ///
    /// Returns `ConsistencyCheckFailed` naming the first broken invariant.
    pub fn check_consistency(&self) -> GameResult<()> {
        self.check_cubes()?;
        self.check_player_cards()?;
        self.check_infection_cards()?;
        self.check_stations_and_counters()
    }

    fn check_cubes(&self) -> GameResult<()> {
        for colour in Colour::ALL {
            let total = self.cubes_on_board(colour) + u32::from(self.cube_supply().get(colour));
            if total != u32::from(CUBES_PER_COLOUR) {
                return Err(failed(format!("{total} {colour} cubes in play")));
            }
            if self.is_eradicated(colour) && self.cubes_on_board(colour) > 0 {
                return Err(failed(format!("{colour} is eradicated but on the board")));
            }
            if let Some(city) = self
                .cities()
                .iter()
                .find(|c| c.cubes(colour) > OUTBREAK_THRESHOLD)
            {
                return Err(failed(format!("{} holds too many {colour} cubes", city.name())));
            }
        }
        Ok(())
    }

    fn check_player_cards(&self) -> GameResult<()> {
        let mut seen = FxHashSet::default();
        let mut epidemics = 0;
        let in_piles = self
            .player_draw_pile()
            .iter()
            .chain(self.player_discard_pile().iter())
            .copied();
        let in_hands = self.players().iter().flat_map(|p| p.hand.iter());

        for card in in_piles.chain(in_hands) {
            match card {
                PlayerCard::Epidemic => epidemics += 1,
                other => {
                    if !seen.insert(other) {
                        return Err(failed(format!("duplicate player card {other}")));
                    }
                }
            }
        }

        let city_cards = seen.iter().filter(|c| c.city().is_some()).count();
        if city_cards != board().len() {
            return Err(failed(format!("{city_cards} city cards in play")));
        }
        if epidemics != self.difficulty().epidemic_cards() {
            return Err(failed(format!("{epidemics} epidemic cards in play")));
        }
        Ok(())
    }

    fn check_infection_cards(&self) -> GameResult<()> {
        let mut seen = FxHashSet::default();
        let all = self
            .infection_draw_pile()
            .iter()
            .chain(self.infection_discard_pile().iter())
            .chain(self.infection_cards_removed().iter());
        for &city in all {
            if !seen.insert(city) {
                return Err(failed(format!("duplicate infection card {city}")));
            }
        }
        if seen.len() != board().len() {
            return Err(failed(format!("{} infection cards in play", seen.len())));
        }
        Ok(())
    }

    fn check_stations_and_counters(&self) -> GameResult<()> {
        let placed = self.research_station_cities().count();
        if placed + usize::from(self.research_stations_remaining()) != usize::from(RESEARCH_STATIONS) {
            return Err(failed(format!(
                "{placed} stations placed with {} left",
                self.research_stations_remaining()
            )));
        }
        if self.current_player_index() >= self.players().len() {
            return Err(failed(format!(
                "current player {} of {}",
                self.current_player_index(),
                self.players().len()
            )));
        }
        if self.outbreak_counter() > MAX_OUTBREAKS {
            return Err(failed(format!("{} outbreaks", self.outbreak_counter())));
        }
        Ok(())
    }
}

fn failed(message: String) -> GameError {
    GameError::ConsistencyCheckFailed(message)
}
