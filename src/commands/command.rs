//! Player commands: requests that the engine validates and turns into events.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::CityId;
use crate::core::{Colour, EventCard, PlayerCard, Role};

/// A request from a player. Closed set; each variant is handled in
/// `commands::validation`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    // === Actions ===
    /// Move to a connected city.
    DriveFerry { role: Role, city: CityId },
    /// Discard the destination's card to move there.
    DirectFlight { role: Role, city: CityId },
    /// Discard the current city's card to move anywhere.
    CharterFlight { role: Role, city: CityId },
    /// Move between two research stations.
    ShuttleFlight { role: Role, city: CityId },
    BuildResearchStation { role: Role, city: CityId },
    OperationsExpertBuildResearchStation { city: CityId },
    /// From a research station, discard any city card to move anywhere.
    OperationsExpertDiscardToMoveFromStation { card: CityId, city: CityId },
    TreatDisease { role: Role, city: CityId, colour: Colour },
    ShareKnowledgeGive { role: Role, receiver: Role, city: CityId },
    ShareKnowledgeTake { role: Role, giver: Role, city: CityId },
    DiscoverCure { role: Role, cards: SmallVec<[CityId; 5]> },
    DispatcherMovePawnToOtherPawn { pawn: Role, target: Role },
    DispatcherDriveFerryPawn { pawn: Role, city: CityId },
    DispatcherDirectFlyPawn { pawn: Role, city: CityId },
    DispatcherCharterFlyPawn { pawn: Role, city: CityId },
    DispatcherShuttleFlyPawn { pawn: Role, city: CityId },
    Pass { role: Role },

    // === Outside the action budget ===
    /// Only while the issuing player holds more than the hand limit.
    DiscardPlayerCard { role: Role, card: PlayerCard },
    GovernmentGrant { role: Role, city: CityId },
    Airlift { role: Role, pawn: Role, city: CityId },
    OneQuietNight { role: Role },
    ResilientPopulation { role: Role, city: CityId },
    /// New order of the top infection cards, top first.
    Forecast { role: Role, cards: Vec<CityId> },
}

/// Tag of a command variant, for priority tables and statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CommandKind {
    DriveFerry,
    DirectFlight,
    CharterFlight,
    ShuttleFlight,
    BuildResearchStation,
    OperationsExpertBuildResearchStation,
    OperationsExpertDiscardToMoveFromStation,
    TreatDisease,
    ShareKnowledgeGive,
    ShareKnowledgeTake,
    DiscoverCure,
    DispatcherMovePawnToOtherPawn,
    DispatcherDriveFerryPawn,
    DispatcherDirectFlyPawn,
    DispatcherCharterFlyPawn,
    DispatcherShuttleFlyPawn,
    Pass,
    DiscardPlayerCard,
    GovernmentGrant,
    Airlift,
    OneQuietNight,
    ResilientPopulation,
    Forecast,
}

impl CommandKind {
    /// Fixed preference used by greedy agents. Higher is tried first.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            CommandKind::DiscoverCure => 100,
            CommandKind::ShareKnowledgeGive | CommandKind::ShareKnowledgeTake => 80,
            CommandKind::TreatDisease => 70,
            CommandKind::BuildResearchStation
            | CommandKind::OperationsExpertBuildResearchStation
            | CommandKind::GovernmentGrant => 60,
            CommandKind::ResilientPopulation | CommandKind::OneQuietNight => 50,
            CommandKind::DispatcherMovePawnToOtherPawn => 45,
            CommandKind::DriveFerry
            | CommandKind::ShuttleFlight
            | CommandKind::DispatcherDriveFerryPawn
            | CommandKind::DispatcherShuttleFlyPawn => 40,
            CommandKind::Airlift | CommandKind::Forecast => 35,
            CommandKind::DirectFlight
            | CommandKind::CharterFlight
            | CommandKind::OperationsExpertDiscardToMoveFromStation
            | CommandKind::DispatcherDirectFlyPawn
            | CommandKind::DispatcherCharterFlyPawn => 30,
            CommandKind::DiscardPlayerCard => 10,
            CommandKind::Pass => 0,
        }
    }
}

impl Command {
    /// The role issuing the command.
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Command::DriveFerry { role, .. }
            | Command::DirectFlight { role, .. }
            | Command::CharterFlight { role, .. }
            | Command::ShuttleFlight { role, .. }
            | Command::BuildResearchStation { role, .. }
            | Command::TreatDisease { role, .. }
            | Command::ShareKnowledgeGive { role, .. }
            | Command::ShareKnowledgeTake { role, .. }
            | Command::DiscoverCure { role, .. }
            | Command::Pass { role }
            | Command::DiscardPlayerCard { role, .. }
            | Command::GovernmentGrant { role, .. }
            | Command::Airlift { role, .. }
            | Command::OneQuietNight { role }
            | Command::ResilientPopulation { role, .. }
            | Command::Forecast { role, .. } => *role,
            Command::OperationsExpertBuildResearchStation { .. }
            | Command::OperationsExpertDiscardToMoveFromStation { .. } => Role::OperationsExpert,
            Command::DispatcherMovePawnToOtherPawn { .. }
            | Command::DispatcherDriveFerryPawn { .. }
            | Command::DispatcherDirectFlyPawn { .. }
            | Command::DispatcherCharterFlyPawn { .. }
            | Command::DispatcherShuttleFlyPawn { .. } => Role::Dispatcher,
        }
    }

    /// Variant tag.
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::DriveFerry { .. } => CommandKind::DriveFerry,
            Command::DirectFlight { .. } => CommandKind::DirectFlight,
            Command::CharterFlight { .. } => CommandKind::CharterFlight,
            Command::ShuttleFlight { .. } => CommandKind::ShuttleFlight,
            Command::BuildResearchStation { .. } => CommandKind::BuildResearchStation,
            Command::OperationsExpertBuildResearchStation { .. } => {
                CommandKind::OperationsExpertBuildResearchStation
            }
            Command::OperationsExpertDiscardToMoveFromStation { .. } => {
                CommandKind::OperationsExpertDiscardToMoveFromStation
            }
            Command::TreatDisease { .. } => CommandKind::TreatDisease,
            Command::ShareKnowledgeGive { .. } => CommandKind::ShareKnowledgeGive,
            Command::ShareKnowledgeTake { .. } => CommandKind::ShareKnowledgeTake,
            Command::DiscoverCure { .. } => CommandKind::DiscoverCure,
            Command::DispatcherMovePawnToOtherPawn { .. } => {
                CommandKind::DispatcherMovePawnToOtherPawn
            }
            Command::DispatcherDriveFerryPawn { .. } => CommandKind::DispatcherDriveFerryPawn,
            Command::DispatcherDirectFlyPawn { .. } => CommandKind::DispatcherDirectFlyPawn,
            Command::DispatcherCharterFlyPawn { .. } => CommandKind::DispatcherCharterFlyPawn,
            Command::DispatcherShuttleFlyPawn { .. } => CommandKind::DispatcherShuttleFlyPawn,
            Command::Pass { .. } => CommandKind::Pass,
            Command::DiscardPlayerCard { .. } => CommandKind::DiscardPlayerCard,
            Command::GovernmentGrant { .. } => CommandKind::GovernmentGrant,
            Command::Airlift { .. } => CommandKind::Airlift,
            Command::OneQuietNight { .. } => CommandKind::OneQuietNight,
            Command::ResilientPopulation { .. } => CommandKind::ResilientPopulation,
            Command::Forecast { .. } => CommandKind::Forecast,
        }
    }

    /// Costs one of the current player's actions.
    #[must_use]
    pub fn consumes_action(&self) -> bool {
        !matches!(self, Command::DiscardPlayerCard { .. }) && !self.is_special_event()
    }

    /// Played from a special event card.
    #[must_use]
    pub fn is_special_event(&self) -> bool {
        self.event_card().is_some()
    }

    /// Event card a special-event command plays.
    #[must_use]
    pub fn event_card(&self) -> Option<EventCard> {
        match self {
            Command::GovernmentGrant { .. } => Some(EventCard::GovernmentGrant),
            Command::Airlift { .. } => Some(EventCard::Airlift),
            Command::OneQuietNight { .. } => Some(EventCard::OneQuietNight),
            Command::ResilientPopulation { .. } => Some(EventCard::ResilientPopulation),
            Command::Forecast { .. } => Some(EventCard::Forecast),
            _ => None,
        }
    }

    /// Priority of this command's kind.
    #[must_use]
    pub fn priority(&self) -> u8 {
        self.kind().priority()
    }
}

/// Stable sort, highest priority first.
pub fn sort_by_priority(commands: &mut [Command]) {
    commands.sort_by_key(|c| std::cmp::Reverse(c.priority()));
}
