//! Legal command generation.
//!
//! Enumerates every command `validation::handle` would accept in a state.
//! Read-only: agents call this to pick their next move.

use smallvec::SmallVec;

use super::command::Command;
use super::validation::FORECAST_CARDS;
use crate::board::{board, CityId};
use crate::core::{Colour, EventCard, GameState, Player, PlayerCard, Role, TurnPhase, HAND_LIMIT};

/// Every legal command, grouped by issuer.
///
/// Empty once the game is over. While a hand is over the limit only that
/// player's discards and special events are returned.
#[must_use]
pub fn legal_commands(state: &GameState) -> Vec<Command> {
    let mut out = Vec::new();
    if state.is_over() || state.players().is_empty() {
        return out;
    }

    if state.any_hand_over_limit() {
        for player in state.players().iter().filter(|p| p.hand.len() > HAND_LIMIT) {
            out.extend(player.hand.iter().map(|card| Command::DiscardPlayerCard {
                role: player.role,
                card,
            }));
        }
    } else {
        let current = state.current_player();
        if state.phase() == TurnPhase::DoActions && current.actions_remaining > 0 {
            action_commands(state, current, &mut out);
        }
    }
    special_event_commands(state, &mut out);
    out
}

fn action_commands(state: &GameState, player: &Player, out: &mut Vec<Command>) {
    let role = player.role;
    let at = player.location;

    movement(state, player, out);

    if player.hand.has_city_card(at) && can_build(state, at) {
        out.push(Command::BuildResearchStation { role, city: at });
    }
    if role == Role::OperationsExpert {
        operations_expert(state, player, out);
    }

    for colour in Colour::ALL {
        if state.city(at).cubes(colour) > 0 {
            out.push(Command::TreatDisease {
                role,
                city: at,
                colour,
            });
        }
    }

    share_knowledge(state, player, out);
    cures(state, player, out);

    if role == Role::Dispatcher {
        dispatcher(state, player, out);
    }
    out.push(Command::Pass { role });
}

fn movement(state: &GameState, player: &Player, out: &mut Vec<Command>) {
    let role = player.role;
    let at = player.location;

    out.extend(
        board()
            .neighbours(at)
            .iter()
            .map(|&city| Command::DriveFerry { role, city }),
    );
    out.extend(
        player
            .hand
            .city_cards()
            .filter(|&city| city != at)
            .map(|city| Command::DirectFlight { role, city }),
    );
    if player.hand.has_city_card(at) {
        out.extend(
            other_cities(at).map(|city| Command::CharterFlight { role, city }),
        );
    }
    if state.city(at).has_research_station {
        out.extend(
            state
                .research_station_cities()
                .filter(|&city| city != at)
                .map(|city| Command::ShuttleFlight { role, city }),
        );
    }
}

fn operations_expert(state: &GameState, player: &Player, out: &mut Vec<Command>) {
    let at = player.location;
    if can_build(state, at) {
        out.push(Command::OperationsExpertBuildResearchStation { city: at });
    }
    if state.city(at).has_research_station && !state.operations_expert_flew_this_turn() {
        for card in player.hand.city_cards() {
            out.extend(other_cities(at).map(|city| {
                Command::OperationsExpertDiscardToMoveFromStation { card, city }
            }));
        }
    }
}

fn share_knowledge(state: &GameState, player: &Player, out: &mut Vec<Command>) {
    let role = player.role;
    let at = player.location;
    for other in state
        .players()
        .iter()
        .filter(|o| o.role != role && o.location == at)
    {
        for city in shareable(player) {
            out.push(Command::ShareKnowledgeGive {
                role,
                receiver: other.role,
                city,
            });
        }
        for city in shareable(other) {
            out.push(Command::ShareKnowledgeTake {
                role,
                giver: other.role,
                city,
            });
        }
    }
}

/// City cards `giver` may hand over where it stands.
fn shareable(giver: &Player) -> Vec<CityId> {
    if giver.role == Role::Researcher {
        giver.hand.city_cards().collect()
    } else if giver.hand.has_city_card(giver.location) {
        vec![giver.location]
    } else {
        Vec::new()
    }
}

fn cures(state: &GameState, player: &Player, out: &mut Vec<Command>) {
    if !state.city(player.location).has_research_station {
        return;
    }
    let needed = player.role.cards_for_cure();
    for colour in Colour::ALL {
        if state.is_cured(colour) {
            continue;
        }
        let cards: Vec<CityId> = player.hand.city_cards_of(colour).collect();
        let mut current = SmallVec::new();
        combinations(&cards, needed, 0, &mut current, &mut |cards| {
            out.push(Command::DiscoverCure {
                role: player.role,
                cards,
            });
        });
    }
}

/// Call `emit` with every `k`-element combination of `items[start..]`.
fn combinations(
    items: &[CityId],
    k: usize,
    start: usize,
    current: &mut SmallVec<[CityId; 5]>,
    emit: &mut impl FnMut(SmallVec<[CityId; 5]>),
) {
    if current.len() == k {
        emit(current.clone());
        return;
    }
    for i in start..items.len() {
        if items.len() - i < k - current.len() {
            break;
        }
        current.push(items[i]);
        combinations(items, k, i + 1, current, emit);
        current.pop();
    }
}

fn dispatcher(state: &GameState, dispatcher: &Player, out: &mut Vec<Command>) {
    for pawn in state.players() {
        for target in state
            .players()
            .iter()
            .filter(|t| t.role != pawn.role && t.location != pawn.location)
        {
            out.push(Command::DispatcherMovePawnToOtherPawn {
                pawn: pawn.role,
                target: target.role,
            });
        }
    }

    for pawn in state.players().iter().filter(|p| p.role != Role::Dispatcher) {
        let role = pawn.role;
        let at = pawn.location;
        out.extend(
            board()
                .neighbours(at)
                .iter()
                .map(|&city| Command::DispatcherDriveFerryPawn { pawn: role, city }),
        );
        out.extend(
            dispatcher
                .hand
                .city_cards()
                .filter(|&city| city != at)
                .map(|city| Command::DispatcherDirectFlyPawn { pawn: role, city }),
        );
        if dispatcher.hand.has_city_card(at) {
            out.extend(
                other_cities(at).map(|city| Command::DispatcherCharterFlyPawn { pawn: role, city }),
            );
        }
        if state.city(at).has_research_station {
            out.extend(
                state
                    .research_station_cities()
                    .filter(|&city| city != at)
                    .map(|city| Command::DispatcherShuttleFlyPawn { pawn: role, city }),
            );
        }
    }
}

fn special_event_commands(state: &GameState, out: &mut Vec<Command>) {
    for player in state.players() {
        let role = player.role;
        for card in player.hand.iter().filter_map(PlayerCard::event) {
            match card {
                EventCard::GovernmentGrant => {
                    out.extend(
                        board()
                            .city_ids()
                            .filter(|&city| can_build(state, city))
                            .map(|city| Command::GovernmentGrant { role, city }),
                    );
                }
                EventCard::Airlift => {
                    for pawn in state.players() {
                        out.extend(other_cities(pawn.location).map(|city| Command::Airlift {
                            role,
                            pawn: pawn.role,
                            city,
                        }));
                    }
                }
                EventCard::OneQuietNight => {
                    if !state.one_quiet_night_active() {
                        out.push(Command::OneQuietNight { role });
                    }
                }
                EventCard::ResilientPopulation => {
                    out.extend(
                        state
                            .infection_discard_pile()
                            .iter()
                            .map(|&city| Command::ResilientPopulation { role, city }),
                    );
                }
                EventCard::Forecast => forecast(state, role, out),
            }
        }
    }
}

/// Keep the current order, or reverse it.
fn forecast(state: &GameState, role: Role, out: &mut Vec<Command>) {
    let top = state.infection_draw_pile().top_n(FORECAST_CARDS);
    if top.is_empty() {
        return;
    }
    let mut reversed = top.clone();
    reversed.reverse();
    let differs = reversed != top;
    out.push(Command::Forecast { role, cards: top });
    if differs {
        out.push(Command::Forecast {
            role,
            cards: reversed,
        });
    }
}

fn can_build(state: &GameState, city: CityId) -> bool {
    !state.city(city).has_research_station && state.research_stations_remaining() > 0
}

fn other_cities(city: CityId) -> impl Iterator<Item = CityId> {
    board().city_ids().filter(move |&c| c != city)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameOptions;
    use crate::rules::Pandemic;

    #[test]
    fn test_fresh_game_commands_are_all_legal() {
        let engine = Pandemic::new();
        let (state, _) = engine.create_new_game(&GameOptions::default()).unwrap();
        let commands = legal_commands(&state);

        assert!(commands.contains(&Command::Pass { role: Role::Medic }));
        assert!(commands.iter().all(|c| c.role() == Role::Medic));
        for command in commands {
            assert!(
                engine.do_command(&state, command.clone()).is_ok(),
                "{command:?} should be legal"
            );
        }
    }

    #[test]
    fn test_no_commands_when_over() {
        let engine = Pandemic::new();
        let (mut state, _) = engine.create_new_game(&GameOptions::default()).unwrap();
        state.loss_reason = Some("Ran out of player cards".into());
        assert!(legal_commands(&state).is_empty());
    }

    #[test]
    fn test_combinations() {
        let items: Vec<CityId> = (0..6).map(CityId).collect();
        let mut count = 0;
        combinations(&items, 5, 0, &mut SmallVec::new(), &mut |c| {
            assert_eq!(c.len(), 5);
            count += 1;
        });
        assert_eq!(count, 6);
    }

    #[test]
    fn test_only_discards_over_limit() {
        let engine = Pandemic::new();
        let (mut state, _) = engine.create_new_game(&GameOptions::default()).unwrap();
        let extra: Vec<CityId> = state
            .player_draw_pile()
            .iter()
            .filter_map(|c| c.city())
            .take(4)
            .collect();
        for city in extra {
            state.players[1].hand.add(PlayerCard::City(city));
        }

        let commands = legal_commands(&state);
        assert_eq!(commands.len(), 8);
        assert!(commands
            .iter()
            .all(|c| matches!(c, Command::DiscardPlayerCard { role: Role::Scientist, .. })));
    }
}
