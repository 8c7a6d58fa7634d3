//! Game events: immutable facts about what happened.
//!
//! The ordered list of every event since setup is the authoritative history
//! of a game. Events that carry a deck order (setup shuffles, epidemic
//! intensify) list cards bottom first, so folding them never needs the RNG.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::CityId;
use crate::core::{Colour, Difficulty, EventCard, PlayerCard, Role, TurnPhase};

/// Every fact the engine can record. Closed set: adding a rule means adding
/// a variant here and a case in `apply_event`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    // === Setup ===
    DifficultySet {
        difficulty: Difficulty,
    },
    /// A station placed without spending an action (setup).
    ResearchStationPlaced {
        city: CityId,
    },
    /// The shuffled infection deck, bottom first.
    InfectionDeckSetUp {
        cards: Vec<CityId>,
    },
    PlayerAdded {
        role: Role,
    },
    /// The shuffled player deck before dealing, bottom first.
    PlayerDeckShuffledForDealing {
        cards: Vec<PlayerCard>,
    },
    /// Top player card moved into a hand (dealing and the draw step).
    PlayerCardPickedUp {
        role: Role,
        card: PlayerCard,
    },
    /// The player deck with epidemics inserted, bottom first.
    PlayerDeckFinalised {
        cards: Vec<PlayerCard>,
    },

    // === Actions ===
    PlayerDroveFerried {
        role: Role,
        city: CityId,
    },
    PlayerDirectFlew {
        role: Role,
        city: CityId,
    },
    PlayerCharterFlew {
        role: Role,
        city: CityId,
    },
    PlayerShuttleFlew {
        role: Role,
        city: CityId,
    },
    ResearchStationBuilt {
        role: Role,
        city: CityId,
    },
    OperationsExpertBuiltResearchStation {
        city: CityId,
    },
    OperationsExpertFlewFromStation {
        city: CityId,
        discarded: CityId,
    },
    DiseaseTreated {
        role: Role,
        city: CityId,
        colour: Colour,
        cubes_removed: u8,
    },
    ShareKnowledgeGiven {
        giver: Role,
        receiver: Role,
        city: CityId,
    },
    ShareKnowledgeTaken {
        taker: Role,
        giver: Role,
        city: CityId,
    },
    CureDiscovered {
        role: Role,
        colour: Colour,
        cards: SmallVec<[CityId; 5]>,
    },
    DispatcherMovedPawnToOtherPawn {
        pawn: Role,
        target: Role,
    },
    DispatcherDroveFerriedPawn {
        pawn: Role,
        city: CityId,
    },
    DispatcherDirectFlewPawn {
        pawn: Role,
        city: CityId,
    },
    DispatcherCharterFlewPawn {
        pawn: Role,
        city: CityId,
    },
    DispatcherShuttleFlewPawn {
        pawn: Role,
        city: CityId,
    },
    PlayerPassed {
        role: Role,
    },

    // === Role side effects ===
    MedicAutoRemovedCubes {
        city: CityId,
        colour: Colour,
        cubes_removed: u8,
    },
    DiseaseEradicated {
        colour: Colour,
    },

    // === Cards outside the action budget ===
    PlayerCardDiscarded {
        role: Role,
        card: PlayerCard,
    },
    GovernmentGrantUsed {
        role: Role,
        city: CityId,
    },
    AirliftUsed {
        role: Role,
        pawn: Role,
        city: CityId,
    },
    OneQuietNightUsed {
        role: Role,
    },
    ResilientPopulationUsed {
        role: Role,
        city: CityId,
    },
    /// New order of the top infection cards, top first.
    ForecastUsed {
        role: Role,
        cards: Vec<CityId>,
    },

    // === Turn phases ===
    TurnPhaseChanged {
        phase: TurnPhase,
    },
    EpidemicCardDiscarded {
        role: Role,
    },
    InfectionRateIncreased,
    InfectionCardDrawnFromBottom {
        city: CityId,
    },
    /// The reshuffled infection discard pile, bottom first, now on top of
    /// the infection draw pile.
    EpidemicIntensified {
        cards: Vec<CityId>,
    },
    InfectionCardDrawn {
        city: CityId,
    },
    CubeAddedToCity {
        city: CityId,
        colour: Colour,
    },
    OutbreakOccurred {
        city: CityId,
        colour: Colour,
    },
    MedicPreventedInfection {
        city: CityId,
        colour: Colour,
    },
    QuarantineSpecialistPreventedInfection {
        city: CityId,
        colour: Colour,
    },
    InfectCitiesSkipped,
    TurnEnded {
        role: Role,
    },
    GameLost {
        reason: String,
    },
}

impl GameEvent {
    /// Event card consumed by this event, if any.
    #[must_use]
    pub fn event_card(&self) -> Option<EventCard> {
        match self {
            GameEvent::GovernmentGrantUsed { .. } => Some(EventCard::GovernmentGrant),
            GameEvent::AirliftUsed { .. } => Some(EventCard::Airlift),
            GameEvent::OneQuietNightUsed { .. } => Some(EventCard::OneQuietNight),
            GameEvent::ResilientPopulationUsed { .. } => Some(EventCard::ResilientPopulation),
            GameEvent::ForecastUsed { .. } => Some(EventCard::Forecast),
            _ => None,
        }
    }
}
