//! Game state.
//!
//! `GameState` is an immutable snapshot. Every collection inside it is an
//! `im` persistent structure, so cloning is O(1) and a successor state shares
//! everything it did not change with its parent. Search agents can hold any
//! number of divergent states from a common ancestor without locks.
//!
//! Mutation only happens inside the crate, on a freshly cloned value, through
//! the event fold (`events::apply_event`).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::cards::PlayerCard;
use super::city::City;
use super::config::Difficulty;
use super::cubes::CubePile;
use super::deck::Deck;
use super::player::{Player, Role};
use super::rng::{GameRng, GameRngState};
use super::Colour;
use crate::board::{board, CityId};

/// Cards a player may hold before having to discard.
pub const HAND_LIMIT: usize = 7;

/// Actions each player gets per turn.
pub const ACTIONS_PER_TURN: u8 = 4;

/// Cubes per colour in the supply at the start of a game.
pub const CUBES_PER_COLOUR: u8 = 24;

/// Research station tokens in the box.
pub const RESEARCH_STATIONS: u8 = 6;

/// Outbreak count that loses the game.
pub const MAX_OUTBREAKS: u8 = 8;

/// Infection rate for each marker position.
pub const INFECTION_RATES: [usize; 7] = [2, 2, 2, 3, 3, 4, 4];

/// Player cards drawn at the end of each turn.
pub const PLAYER_CARDS_PER_TURN: usize = 2;

/// Turn phases, in order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    DoActions,
    DrawCards,
    InfectCities,
}

/// Progress against one disease.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiseaseStatus {
    #[default]
    Active,
    Cured,
    /// Cured with no cubes left on the board. Never infects again.
    Eradicated,
}

/// Complete game state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) difficulty: Difficulty,
    pub(crate) players: Vector<Player>,
    pub(crate) current_player: usize,
    pub(crate) cities: Vector<City>,
    pub(crate) player_draw_pile: Deck<PlayerCard>,
    pub(crate) player_discard_pile: Deck<PlayerCard>,
    pub(crate) infection_draw_pile: Deck<CityId>,
    pub(crate) infection_discard_pile: Deck<CityId>,
    /// Infection cards removed from the game by Resilient Population.
    pub(crate) infection_cards_removed: Vector<CityId>,
    pub(crate) cubes: CubePile,
    pub(crate) diseases: [DiseaseStatus; 4],
    pub(crate) research_stations_remaining: u8,
    pub(crate) phase: TurnPhase,
    pub(crate) infection_rate_marker: usize,
    pub(crate) outbreak_counter: u8,
    pub(crate) loss_reason: Option<String>,
    pub(crate) one_quiet_night: bool,
    pub(crate) operations_expert_flew_this_turn: bool,
    /// Only consumed by epidemic shuffles. Not part of the replayable state.
    #[serde(skip)]
    pub(crate) rng: GameRng,
}

impl GameState {
    /// The zero state every event log is folded from: a clean board, full
    /// supply, no players and empty decks.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            difficulty: Difficulty::default(),
            players: Vector::new(),
            current_player: 0,
            cities: board().city_ids().map(City::new).collect(),
            player_draw_pile: Deck::new(),
            player_discard_pile: Deck::new(),
            infection_draw_pile: Deck::new(),
            infection_discard_pile: Deck::new(),
            infection_cards_removed: Vector::new(),
            cubes: CubePile::full(CUBES_PER_COLOUR),
            diseases: [DiseaseStatus::Active; 4],
            research_stations_remaining: RESEARCH_STATIONS,
            phase: TurnPhase::DoActions,
            infection_rate_marker: 0,
            outbreak_counter: 0,
            loss_reason: None,
            one_quiet_night: false,
            operations_expert_flew_this_turn: false,
            rng: GameRng::default(),
        }
    }

    // === Outcome ===

    /// Game won or lost.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.is_won() || self.is_lost()
    }

    /// Every disease cured.
    #[must_use]
    pub fn is_won(&self) -> bool {
        !self.is_lost() && self.diseases.iter().all(|&d| d != DiseaseStatus::Active)
    }

    /// A losing condition fired.
    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.loss_reason.is_some()
    }

    /// Why the game was lost, if it was.
    #[must_use]
    pub fn loss_reason(&self) -> Option<&str> {
        self.loss_reason.as_deref()
    }

    // === Players ===

    /// Difficulty chosen at setup.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Players in turn order.
    #[must_use]
    pub fn players(&self) -> &Vector<Player> {
        &self.players
    }

    /// Index of the player whose turn it is.
    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.current_player
    }

    /// The player whose turn it is.
    ///
    /// Panics on the zero state, which has no players.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    /// Index of the player with `role`.
    #[must_use]
    pub fn player_index(&self, role: Role) -> Option<usize> {
        self.players.iter().position(|p| p.role == role)
    }

    /// Player with `role`.
    #[must_use]
    pub fn player(&self, role: Role) -> Option<&Player> {
        self.players.iter().find(|p| p.role == role)
    }

    /// Location of the pawn with `role`, if that role is in the game.
    #[must_use]
    pub fn location_of(&self, role: Role) -> Option<CityId> {
        self.player(role).map(|p| p.location)
    }

    /// Any player is holding more cards than the hand limit.
    #[must_use]
    pub fn any_hand_over_limit(&self) -> bool {
        self.players.iter().any(|p| p.hand.len() > HAND_LIMIT)
    }

    // === Board ===

    /// Per-game state of one city.
    #[must_use]
    pub fn city(&self, id: CityId) -> &City {
        &self.cities[id.index()]
    }

    /// All cities, indexed by `CityId`.
    #[must_use]
    pub fn cities(&self) -> &Vector<City> {
        &self.cities
    }

    /// Cities with a research station.
    pub fn research_station_cities(&self) -> impl Iterator<Item = CityId> + '_ {
        self.cities
            .iter()
            .filter(|c| c.has_research_station)
            .map(|c| c.id)
    }

    /// Research station tokens still in the box.
    #[must_use]
    pub fn research_stations_remaining(&self) -> u8 {
        self.research_stations_remaining
    }

    /// Cubes left in the supply.
    #[must_use]
    pub fn cube_supply(&self) -> CubePile {
        self.cubes
    }

    /// Cubes of a colour currently on the board.
    #[must_use]
    pub fn cubes_on_board(&self, colour: Colour) -> u32 {
        self.cities.iter().map(|c| u32::from(c.cubes(colour))).sum()
    }

    // === Diseases ===

    /// Status of one disease.
    #[must_use]
    pub fn disease_status(&self, colour: Colour) -> DiseaseStatus {
        self.diseases[colour.index()]
    }

    /// Cured or eradicated.
    #[must_use]
    pub fn is_cured(&self, colour: Colour) -> bool {
        self.disease_status(colour) != DiseaseStatus::Active
    }

    /// Eradicated.
    #[must_use]
    pub fn is_eradicated(&self, colour: Colour) -> bool {
        self.disease_status(colour) == DiseaseStatus::Eradicated
    }

    // === Turn ===

    /// Current turn phase.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Infection rate marker position (0-6).
    #[must_use]
    pub fn infection_rate_marker(&self) -> usize {
        self.infection_rate_marker
    }

    /// Infection cards drawn in the infect-cities step.
    #[must_use]
    pub fn infection_rate(&self) -> usize {
        INFECTION_RATES[self.infection_rate_marker.min(INFECTION_RATES.len() - 1)]
    }

    /// Outbreaks so far.
    #[must_use]
    pub fn outbreak_counter(&self) -> u8 {
        self.outbreak_counter
    }

    /// One Quiet Night is waiting to skip the next infect-cities step.
    #[must_use]
    pub fn one_quiet_night_active(&self) -> bool {
        self.one_quiet_night
    }

    /// The Operations Expert already used the station move this turn.
    #[must_use]
    pub fn operations_expert_flew_this_turn(&self) -> bool {
        self.operations_expert_flew_this_turn
    }

    // === Decks ===

    /// Player draw pile.
    #[must_use]
    pub fn player_draw_pile(&self) -> &Deck<PlayerCard> {
        &self.player_draw_pile
    }

    /// Player discard pile.
    #[must_use]
    pub fn player_discard_pile(&self) -> &Deck<PlayerCard> {
        &self.player_discard_pile
    }

    /// Infection draw pile.
    #[must_use]
    pub fn infection_draw_pile(&self) -> &Deck<CityId> {
        &self.infection_draw_pile
    }

    /// Infection discard pile.
    #[must_use]
    pub fn infection_discard_pile(&self) -> &Deck<CityId> {
        &self.infection_discard_pile
    }

    /// Infection cards removed from the game.
    #[must_use]
    pub fn infection_cards_removed(&self) -> &Vector<CityId> {
        &self.infection_cards_removed
    }

    // === Comparison ===

    /// Structural equality of everything that replay reproduces.
    ///
    /// The RNG is excluded: it is never consumed on replay.
    #[must_use]
    pub fn is_same_state_as(&self, other: &GameState) -> bool {
        self.difficulty == other.difficulty
            && self.players == other.players
            && self.current_player == other.current_player
            && self.cities == other.cities
            && self.player_draw_pile == other.player_draw_pile
            && self.player_discard_pile == other.player_discard_pile
            && self.infection_draw_pile == other.infection_draw_pile
            && self.infection_discard_pile == other.infection_discard_pile
            && self.infection_cards_removed == other.infection_cards_removed
            && self.cubes == other.cubes
            && self.diseases == other.diseases
            && self.research_stations_remaining == other.research_stations_remaining
            && self.phase == other.phase
            && self.infection_rate_marker == other.infection_rate_marker
            && self.outbreak_counter == other.outbreak_counter
            && self.loss_reason == other.loss_reason
            && self.one_quiet_night == other.one_quiet_night
            && self.operations_expert_flew_this_turn == other.operations_expert_flew_this_turn
    }

    // === Crate-internal mutation helpers ===

    pub(crate) fn player_mut(&mut self, role: Role) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.role == role)
    }

    pub(crate) fn city_mut(&mut self, id: CityId) -> &mut City {
        &mut self.cities[id.index()]
    }

    /// Replace the RNG, e.g. after replay or to determinize a search branch.
    #[must_use]
    pub fn with_rng_seed(&self, seed: u64) -> Self {
        let mut next = self.clone();
        next.rng = GameRng::new(seed);
        next
    }

    /// A copy of this state for a search branch.
    ///
    /// The copy gets a forked RNG, so epidemic shuffles differ between
    /// branches but each branch is reproducible. `self` advances its fork
    /// counter.
    #[must_use]
    pub fn branch(&mut self) -> Self {
        let mut next = self.clone();
        next.rng = self.rng.fork();
        next
    }

    /// Position of the RNG. Serialized states do not carry it.
    #[must_use]
    pub fn rng_checkpoint(&self) -> GameRngState {
        self.rng.state()
    }

    /// Copy of this state with the RNG restored from `checkpoint`.
    #[must_use]
    pub fn with_rng_checkpoint(&self, checkpoint: &GameRngState) -> Self {
        let mut next = self.clone();
        next.rng = GameRng::from_state(checkpoint);
        next
    }
}
