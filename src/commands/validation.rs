//! Command validation: the aggregate.
//!
//! `handle` checks a command against the current state and, if it is legal,
//! emits the events it causes into the transition. Checks run in a fixed
//! order:
//!
//! 1. the game must not be over
//! 2. input: every role and city the command names must exist (`InvalidInput`)
//! 3. while any hand is over the limit, only discards and special events
//! 4. action commands need the `DoActions` phase, the current player and a
//!    spare action
//! 5. the command's own rules
//!
//! Every check for a command runs before its first event is emitted.

use smallvec::SmallVec;

use super::command::Command;
use crate::board::{board, CityId};
use crate::core::{
    Colour, DiseaseStatus, EventCard, GameError, GameResult, GameState, Player, PlayerCard, Role,
    TurnPhase, HAND_LIMIT,
};
use crate::events::GameEvent;
use crate::rules::transition::Transition;

/// Most infection cards Forecast may rearrange.
pub const FORECAST_CARDS: usize = 6;

/// Validate `command` and emit its events.
pub(crate) fn handle(t: &mut Transition, command: &Command) -> GameResult<()> {
    if t.state().is_over() {
        return Err(GameError::rule("Game is over"));
    }
    validate_input(t.state(), command)?;
    check_preconditions(t.state(), command)?;

    match command {
        Command::DriveFerry { role, city } => drive_ferry(t, *role, *city),
        Command::DirectFlight { role, city } => direct_flight(t, *role, *city),
        Command::CharterFlight { role, city } => charter_flight(t, *role, *city),
        Command::ShuttleFlight { role, city } => shuttle_flight(t, *role, *city),
        Command::BuildResearchStation { role, city } => build_research_station(t, *role, *city),
        Command::OperationsExpertBuildResearchStation { city } => {
            operations_expert_build(t, *city)
        }
        Command::OperationsExpertDiscardToMoveFromStation { card, city } => {
            operations_expert_move(t, *card, *city)
        }
        Command::TreatDisease { role, city, colour } => treat_disease(t, *role, *city, *colour),
        Command::ShareKnowledgeGive {
            role,
            receiver,
            city,
        } => share_knowledge(t, *role, *receiver, *city, Direction::Give),
        Command::ShareKnowledgeTake { role, giver, city } => {
            share_knowledge(t, *giver, *role, *city, Direction::Take)
        }
        Command::DiscoverCure { role, cards } => discover_cure(t, *role, cards),
        Command::DispatcherMovePawnToOtherPawn { pawn, target } => {
            dispatcher_move_to_pawn(t, *pawn, *target)
        }
        Command::DispatcherDriveFerryPawn { pawn, city } => dispatcher_drive(t, *pawn, *city),
        Command::DispatcherDirectFlyPawn { pawn, city } => dispatcher_direct(t, *pawn, *city),
        Command::DispatcherCharterFlyPawn { pawn, city } => dispatcher_charter(t, *pawn, *city),
        Command::DispatcherShuttleFlyPawn { pawn, city } => dispatcher_shuttle(t, *pawn, *city),
        Command::Pass { role } => {
            t.emit(GameEvent::PlayerPassed { role: *role });
            Ok(())
        }
        Command::DiscardPlayerCard { role, card } => discard(t, *role, *card),
        Command::GovernmentGrant { role, city } => government_grant(t, *role, *city),
        Command::Airlift { role, pawn, city } => airlift(t, *role, *pawn, *city),
        Command::OneQuietNight { role } => one_quiet_night(t, *role),
        Command::ResilientPopulation { role, city } => resilient_population(t, *role, *city),
        Command::Forecast { role, cards } => forecast(t, *role, cards),
    }
}

// === Centralised checks ===

fn validate_input(state: &GameState, command: &Command) -> GameResult<()> {
    let mut roles: SmallVec<[Role; 3]> = SmallVec::new();
    roles.push(command.role());
    let mut cities: SmallVec<[CityId; 6]> = SmallVec::new();

    match command {
        Command::DriveFerry { city, .. }
        | Command::DirectFlight { city, .. }
        | Command::CharterFlight { city, .. }
        | Command::ShuttleFlight { city, .. }
        | Command::BuildResearchStation { city, .. }
        | Command::OperationsExpertBuildResearchStation { city }
        | Command::TreatDisease { city, .. }
        | Command::GovernmentGrant { city, .. }
        | Command::ResilientPopulation { city, .. } => cities.push(*city),
        Command::OperationsExpertDiscardToMoveFromStation { card, city } => {
            cities.extend([*card, *city]);
        }
        Command::ShareKnowledgeGive { receiver, city, .. } => {
            roles.push(*receiver);
            cities.push(*city);
        }
        Command::ShareKnowledgeTake { giver, city, .. } => {
            roles.push(*giver);
            cities.push(*city);
        }
        Command::DiscoverCure { cards, .. } => {
            for (i, card) in cards.iter().enumerate() {
                if cards[..i].contains(card) {
                    return Err(GameError::invalid(format!("cure lists {card} twice")));
                }
            }
            cities.extend(cards.iter().copied());
        }
        Command::DispatcherMovePawnToOtherPawn { pawn, target } => {
            roles.extend([*pawn, *target]);
        }
        Command::DispatcherDriveFerryPawn { pawn, city }
        | Command::DispatcherDirectFlyPawn { pawn, city }
        | Command::DispatcherCharterFlyPawn { pawn, city }
        | Command::DispatcherShuttleFlyPawn { pawn, city }
        | Command::Airlift { pawn, city, .. } => {
            roles.push(*pawn);
            cities.push(*city);
        }
        Command::DiscardPlayerCard { card, .. } => cities.extend(card.city()),
        Command::Forecast { cards, .. } => {
            for (i, card) in cards.iter().enumerate() {
                if cards[..i].contains(card) {
                    return Err(GameError::invalid(format!("forecast lists {card} twice")));
                }
            }
            cities.extend(cards.iter().copied());
        }
        Command::Pass { .. } | Command::OneQuietNight { .. } => {}
    }

    for city in cities {
        board().validate(city)?;
    }
    for role in roles {
        if state.player(role).is_none() {
            return Err(GameError::invalid(format!("{role} is not in this game")));
        }
    }
    Ok(())
}

fn check_preconditions(state: &GameState, command: &Command) -> GameResult<()> {
    let discard_or_event =
        matches!(command, Command::DiscardPlayerCard { .. }) || command.is_special_event();
    if state.any_hand_over_limit() && !discard_or_event {
        return Err(GameError::rule(format!(
            "a player holds more than {HAND_LIMIT} cards and must discard first"
        )));
    }
    if command.consumes_action() {
        let role = command.role();
        ensure(state.phase() == TurnPhase::DoActions, || {
            format!("actions are not allowed during {:?}", state.phase())
        })?;
        ensure(state.current_player().role == role, || {
            format!("it is not {role}'s turn")
        })?;
        ensure(state.current_player().actions_remaining > 0, || {
            format!("{role} has no actions left")
        })?;
    }
    Ok(())
}

fn ensure(condition: bool, message: impl FnOnce() -> String) -> GameResult<()> {
    if condition {
        Ok(())
    } else {
        Err(GameError::RuleViolation(message()))
    }
}

fn player(state: &GameState, role: Role) -> GameResult<&Player> {
    state
        .player(role)
        .ok_or_else(|| GameError::invalid(format!("{role} is not in this game")))
}

fn holds(player: &Player, city: CityId) -> GameResult<()> {
    ensure(player.hand.has_city_card(city), || {
        format!("{} does not hold the {city} card", player.role)
    })
}

fn not_already_in(player: &Player, city: CityId) -> GameResult<()> {
    ensure(player.location != city, || {
        format!("{} is already in {city}", player.role)
    })
}

fn has_station(state: &GameState, city: CityId) -> GameResult<()> {
    ensure(state.city(city).has_research_station, || {
        format!("{city} has no research station")
    })
}

fn can_place_station(state: &GameState, city: CityId) -> GameResult<()> {
    ensure(!state.city(city).has_research_station, || {
        format!("{city} already has a research station")
    })?;
    ensure(state.research_stations_remaining() > 0, || {
        "no research stations left".to_string()
    })
}

// === Movement ===

fn drive_ferry(t: &mut Transition, role: Role, city: CityId) -> GameResult<()> {
    let mover = player(t.state(), role)?;
    not_already_in(mover, city)?;
    ensure(board().is_adjacent(mover.location, city), || {
        format!("{city} is not connected to {}", mover.location)
    })?;
    t.emit(GameEvent::PlayerDroveFerried { role, city });
    arrive(t, role);
    Ok(())
}

fn direct_flight(t: &mut Transition, role: Role, city: CityId) -> GameResult<()> {
    let mover = player(t.state(), role)?;
    not_already_in(mover, city)?;
    holds(mover, city)?;
    t.emit(GameEvent::PlayerDirectFlew { role, city });
    arrive(t, role);
    Ok(())
}

fn charter_flight(t: &mut Transition, role: Role, city: CityId) -> GameResult<()> {
    let mover = player(t.state(), role)?;
    not_already_in(mover, city)?;
    holds(mover, mover.location)?;
    t.emit(GameEvent::PlayerCharterFlew { role, city });
    arrive(t, role);
    Ok(())
}

fn shuttle_flight(t: &mut Transition, role: Role, city: CityId) -> GameResult<()> {
    let state = t.state();
    let mover = player(state, role)?;
    not_already_in(mover, city)?;
    has_station(state, mover.location)?;
    has_station(state, city)?;
    t.emit(GameEvent::PlayerShuttleFlew { role, city });
    arrive(t, role);
    Ok(())
}

fn operations_expert_move(t: &mut Transition, card: CityId, city: CityId) -> GameResult<()> {
    let state = t.state();
    let expert = player(state, Role::OperationsExpert)?;
    ensure(!state.operations_expert_flew_this_turn(), || {
        "the Operations Expert already moved from a station this turn".to_string()
    })?;
    has_station(state, expert.location)?;
    not_already_in(expert, city)?;
    holds(expert, card)?;
    t.emit(GameEvent::OperationsExpertFlewFromStation {
        city,
        discarded: card,
    });
    arrive(t, Role::OperationsExpert);
    Ok(())
}

// === Dispatcher ===

fn dispatched_pawn(state: &GameState, pawn: Role) -> GameResult<&Player> {
    ensure(pawn != Role::Dispatcher, || {
        "the Dispatcher moves their own pawn with the regular actions".to_string()
    })?;
    player(state, pawn)
}

fn dispatcher_move_to_pawn(t: &mut Transition, pawn: Role, target: Role) -> GameResult<()> {
    let state = t.state();
    ensure(pawn != target, || format!("{pawn} cannot move to itself"))?;
    let destination = player(state, target)?.location;
    not_already_in(player(state, pawn)?, destination)?;
    t.emit(GameEvent::DispatcherMovedPawnToOtherPawn { pawn, target });
    arrive(t, pawn);
    Ok(())
}

fn dispatcher_drive(t: &mut Transition, pawn: Role, city: CityId) -> GameResult<()> {
    let moved = dispatched_pawn(t.state(), pawn)?;
    not_already_in(moved, city)?;
    ensure(board().is_adjacent(moved.location, city), || {
        format!("{city} is not connected to {}", moved.location)
    })?;
    t.emit(GameEvent::DispatcherDroveFerriedPawn { pawn, city });
    arrive(t, pawn);
    Ok(())
}

fn dispatcher_direct(t: &mut Transition, pawn: Role, city: CityId) -> GameResult<()> {
    let state = t.state();
    let moved = dispatched_pawn(state, pawn)?;
    not_already_in(moved, city)?;
    holds(player(state, Role::Dispatcher)?, city)?;
    t.emit(GameEvent::DispatcherDirectFlewPawn { pawn, city });
    arrive(t, pawn);
    Ok(())
}

fn dispatcher_charter(t: &mut Transition, pawn: Role, city: CityId) -> GameResult<()> {
    let state = t.state();
    let moved = dispatched_pawn(state, pawn)?;
    not_already_in(moved, city)?;
    holds(player(state, Role::Dispatcher)?, moved.location)?;
    t.emit(GameEvent::DispatcherCharterFlewPawn { pawn, city });
    arrive(t, pawn);
    Ok(())
}

fn dispatcher_shuttle(t: &mut Transition, pawn: Role, city: CityId) -> GameResult<()> {
    let state = t.state();
    let moved = dispatched_pawn(state, pawn)?;
    not_already_in(moved, city)?;
    has_station(state, moved.location)?;
    has_station(state, city)?;
    t.emit(GameEvent::DispatcherShuttleFlewPawn { pawn, city });
    arrive(t, pawn);
    Ok(())
}

// === Stations, treatment, knowledge, cures ===

fn build_research_station(t: &mut Transition, role: Role, city: CityId) -> GameResult<()> {
    let state = t.state();
    let builder = player(state, role)?;
    ensure(builder.location == city, || format!("{role} is not in {city}"))?;
    holds(builder, city)?;
    can_place_station(state, city)?;
    t.emit(GameEvent::ResearchStationBuilt { role, city });
    Ok(())
}

fn operations_expert_build(t: &mut Transition, city: CityId) -> GameResult<()> {
    let state = t.state();
    let expert = player(state, Role::OperationsExpert)?;
    ensure(expert.location == city, || {
        format!("the Operations Expert is not in {city}")
    })?;
    can_place_station(state, city)?;
    t.emit(GameEvent::OperationsExpertBuiltResearchStation { city });
    Ok(())
}

fn treat_disease(t: &mut Transition, role: Role, city: CityId, colour: Colour) -> GameResult<()> {
    let state = t.state();
    let treater = player(state, role)?;
    ensure(treater.location == city, || format!("{role} is not in {city}"))?;
    let present = state.city(city).cubes(colour);
    ensure(present > 0, || format!("{city} has no {colour} cubes"))?;

    let cubes_removed = if role == Role::Medic || state.is_cured(colour) {
        present
    } else {
        1
    };
    t.emit(GameEvent::DiseaseTreated {
        role,
        city,
        colour,
        cubes_removed,
    });
    check_eradication(t, colour);
    Ok(())
}

#[derive(Clone, Copy)]
enum Direction {
    Give,
    Take,
}

fn share_knowledge(
    t: &mut Transition,
    giver: Role,
    receiver: Role,
    city: CityId,
    direction: Direction,
) -> GameResult<()> {
    let state = t.state();
    ensure(giver != receiver, || format!("{giver} cannot share with itself"))?;
    let from = player(state, giver)?;
    let to = player(state, receiver)?;
    ensure(from.location == to.location, || {
        format!("{giver} and {receiver} are not in the same city")
    })?;
    holds(from, city)?;
    ensure(giver == Role::Researcher || from.location == city, || {
        format!("{giver} can only share the card of the city they are in")
    })?;

    t.emit(match direction {
        Direction::Give => GameEvent::ShareKnowledgeGiven {
            giver,
            receiver,
            city,
        },
        Direction::Take => GameEvent::ShareKnowledgeTaken {
            taker: receiver,
            giver,
            city,
        },
    });
    Ok(())
}

fn discover_cure(t: &mut Transition, role: Role, cards: &SmallVec<[CityId; 5]>) -> GameResult<()> {
    let state = t.state();
    let curer = player(state, role)?;
    has_station(state, curer.location)?;

    let needed = role.cards_for_cure();
    ensure(cards.len() == needed, || {
        format!("{role} needs exactly {needed} cards to cure, got {}", cards.len())
    })?;
    let Some(&first) = cards.first() else {
        return Err(GameError::rule("a cure needs cards"));
    };
    let colour = board().colour(first);
    ensure(cards.iter().all(|&c| board().colour(c) == colour), || {
        "cure cards must share one colour".to_string()
    })?;
    ensure(!state.is_cured(colour), || format!("{colour} is already cured"))?;
    for &card in cards {
        holds(curer, card)?;
    }

    t.emit(GameEvent::CureDiscovered {
        role,
        colour,
        cards: cards.clone(),
    });
    if let Some(medic_at) = t.state().location_of(Role::Medic) {
        medic_clears(t, medic_at, colour);
    }
    check_eradication(t, colour);
    Ok(())
}

// === Cards outside the action budget ===

fn discard(t: &mut Transition, role: Role, card: PlayerCard) -> GameResult<()> {
    let holder = player(t.state(), role)?;
    ensure(holder.hand.len() > HAND_LIMIT, || {
        format!(
            "{role} holds {} cards and may only discard above {HAND_LIMIT}",
            holder.hand.len()
        )
    })?;
    ensure(holder.hand.contains(card), || {
        format!("{role} does not hold {card}")
    })?;
    t.emit(GameEvent::PlayerCardDiscarded { role, card });
    Ok(())
}

fn holds_event(state: &GameState, role: Role, card: EventCard) -> GameResult<()> {
    let holder = player(state, role)?;
    ensure(holder.hand.contains(PlayerCard::Event(card)), || {
        format!("{role} does not hold {}", PlayerCard::Event(card))
    })
}

fn government_grant(t: &mut Transition, role: Role, city: CityId) -> GameResult<()> {
    let state = t.state();
    holds_event(state, role, EventCard::GovernmentGrant)?;
    can_place_station(state, city)?;
    t.emit(GameEvent::GovernmentGrantUsed { role, city });
    Ok(())
}

fn airlift(t: &mut Transition, role: Role, pawn: Role, city: CityId) -> GameResult<()> {
    let state = t.state();
    holds_event(state, role, EventCard::Airlift)?;
    not_already_in(player(state, pawn)?, city)?;
    t.emit(GameEvent::AirliftUsed { role, pawn, city });
    arrive(t, pawn);
    Ok(())
}

fn one_quiet_night(t: &mut Transition, role: Role) -> GameResult<()> {
    let state = t.state();
    holds_event(state, role, EventCard::OneQuietNight)?;
    ensure(!state.one_quiet_night_active(), || {
        "One Quiet Night is already in effect".to_string()
    })?;
    t.emit(GameEvent::OneQuietNightUsed { role });
    Ok(())
}

fn resilient_population(t: &mut Transition, role: Role, city: CityId) -> GameResult<()> {
    let state = t.state();
    holds_event(state, role, EventCard::ResilientPopulation)?;
    ensure(state.infection_discard_pile().contains(&city), || {
        format!("{city} is not in the infection discard pile")
    })?;
    t.emit(GameEvent::ResilientPopulationUsed { role, city });
    Ok(())
}

fn forecast(t: &mut Transition, role: Role, cards: &[CityId]) -> GameResult<()> {
    let state = t.state();
    holds_event(state, role, EventCard::Forecast)?;
    let mut top = state.infection_draw_pile().top_n(FORECAST_CARDS);
    let mut proposed = cards.to_vec();
    top.sort_unstable();
    proposed.sort_unstable();
    ensure(top == proposed, || {
        format!("forecast must reorder exactly the top {} infection cards", top.len())
    })?;
    t.emit(GameEvent::ForecastUsed {
        role,
        cards: cards.to_vec(),
    });
    Ok(())
}

// === Role side effects ===

/// After any pawn movement: the Medic clears cured colours on arrival.
fn arrive(t: &mut Transition, role: Role) {
    if role != Role::Medic {
        return;
    }
    if let Some(city) = t.state().location_of(Role::Medic) {
        for colour in Colour::ALL {
            if t.state().is_cured(colour) {
                medic_clears(t, city, colour);
                check_eradication(t, colour);
            }
        }
    }
}

fn medic_clears(t: &mut Transition, city: CityId, colour: Colour) {
    let cubes_removed = t.state().city(city).cubes(colour);
    if cubes_removed > 0 {
        t.emit(GameEvent::MedicAutoRemovedCubes {
            city,
            colour,
            cubes_removed,
        });
    }
}

/// A cured colour with no cubes left on the board is eradicated.
fn check_eradication(t: &mut Transition, colour: Colour) {
    let state = t.state();
    if state.disease_status(colour) == DiseaseStatus::Cured && state.cubes_on_board(colour) == 0 {
        t.emit(GameEvent::DiseaseEradicated { colour });
    }
}
