//! New-game setup, expressed entirely as events.

use tracing::info;

use super::infection::infect_city;
use super::transition::Transition;
use crate::board::{board, CityId};
use crate::core::{EventCard, GameOptions, GameResult, GameState, PlayerCard};
use crate::events::GameEvent;

/// Initial infection: cubes per card, three cards each.
const INITIAL_INFECTION: [u8; 3] = [3, 2, 1];
const CARDS_PER_INFECTION_ROUND: usize = 3;

/// Set up a new game.
///
/// The RNG seeded from `options.rng_seed` drives every shuffle; the shuffled
/// orders are recorded in the emitted events.
pub(crate) fn create_new_game(options: &GameOptions) -> GameResult<(GameState, Vec<GameEvent>)> {
    options.validate()?;
    let mut t = Transition::new(GameState::empty().with_rng_seed(options.rng_seed));

    t.emit(GameEvent::DifficultySet {
        difficulty: options.difficulty,
    });
    t.emit(GameEvent::ResearchStationPlaced {
        city: CityId::ATLANTA,
    });

    set_up_infection_deck(&mut t);
    initial_infection(&mut t);

    for &role in &options.roles {
        t.emit(GameEvent::PlayerAdded { role });
    }

    let remaining = deal_player_cards(&mut t, options);
    let finalised = insert_epidemics(&mut t, remaining, options.difficulty.epidemic_cards());
    t.emit(GameEvent::PlayerDeckFinalised { cards: finalised });

    let (state, events) = t.finish();
    info!(
        seed = options.rng_seed,
        difficulty = ?options.difficulty,
        players = options.roles.len(),
        "new game created"
    );
    Ok((state, events))
}

fn set_up_infection_deck(t: &mut Transition) {
    let mut cards: Vec<CityId> = board().city_ids().collect();
    t.rng().shuffle(&mut cards);
    t.emit(GameEvent::InfectionDeckSetUp { cards });
}

fn initial_infection(t: &mut Transition) {
    for cubes in INITIAL_INFECTION {
        for _ in 0..CARDS_PER_INFECTION_ROUND {
            let Some(city) = t.state().infection_draw_pile().top().copied() else {
                return;
            };
            t.emit(GameEvent::InfectionCardDrawn { city });
            infect_city(t, city, board().colour(city), cubes);
        }
    }
}

/// Shuffle the city (and event) cards, deal hands, and return what is left,
/// bottom first.
fn deal_player_cards(t: &mut Transition, options: &GameOptions) -> Vec<PlayerCard> {
    let mut cards: Vec<PlayerCard> = board().city_ids().map(PlayerCard::City).collect();
    if options.include_special_event_cards {
        cards.extend(EventCard::ALL.into_iter().map(PlayerCard::Event));
    }
    t.rng().shuffle(&mut cards);
    t.emit(GameEvent::PlayerDeckShuffledForDealing {
        cards: cards.clone(),
    });

    for _ in 0..options.initial_hand_size() {
        for &role in &options.roles {
            if let Some(card) = cards.pop() {
                t.emit(GameEvent::PlayerCardPickedUp { role, card });
            }
        }
    }
    cards
}

/// Split `cards` (bottom first) into `epidemics` piles, shuffle one epidemic
/// into each, and stack them with the larger piles on top. Returns the deck
/// bottom first.
fn insert_epidemics(t: &mut Transition, cards: Vec<PlayerCard>, epidemics: usize) -> Vec<PlayerCard> {
    let base = cards.len() / epidemics;
    let extra = cards.len() % epidemics;
    let mut top_first = cards.into_iter().rev();
    let mut deck = Vec::with_capacity(base * epidemics + extra + epidemics);

    for pile_index in 0..epidemics {
        let size = base + usize::from(pile_index < extra);
        let mut pile: Vec<PlayerCard> = top_first.by_ref().take(size).collect();
        let at = t.rng().gen_range_usize(0..pile.len() + 1);
        pile.insert(at, PlayerCard::Epidemic);
        deck.extend(pile);
    }

    deck.reverse();
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Difficulty, Role, TurnPhase};

    fn new_game(options: &GameOptions) -> (GameState, Vec<GameEvent>) {
        create_new_game(options).unwrap()
    }

    #[test]
    fn test_standard_setup() {
        let (state, events) = new_game(&GameOptions::default());

        assert_eq!(state.infection_rate(), 2);
        assert_eq!(state.outbreak_counter(), 0);
        assert_eq!(state.infection_draw_pile().len(), 39);
        assert_eq!(state.infection_discard_pile().len(), 9);
        assert_eq!(state.player_draw_pile().len(), 48 + 5 - 8);
        assert!(state.players().iter().all(|p| p.hand.len() == 4));
        assert_eq!(state.phase(), TurnPhase::DoActions);
        assert_eq!(state.current_player_index(), 0);
        assert!(state.city(CityId::ATLANTA).has_research_station);
        assert_eq!(state.research_stations_remaining(), 5);
        assert!(matches!(events[0], GameEvent::DifficultySet { .. }));
    }

    #[test]
    fn test_initial_infection_places_eighteen_cubes() {
        let (state, _) = new_game(&GameOptions::default());
        let on_board: u32 = crate::core::Colour::ALL
            .into_iter()
            .map(|c| state.cubes_on_board(c))
            .sum();
        assert_eq!(on_board, 18);
    }

    #[test]
    fn test_epidemics_spread_through_deck() {
        let options = GameOptions::default().with_difficulty(Difficulty::Heroic);
        let (state, _) = new_game(&options);
        let deck: Vec<_> = state.player_draw_pile().iter().rev().copied().collect();

        // 40 cards after dealing two hands of 4: piles of 7,7,7,7,6,6 from
        // the top, plus one epidemic each.
        assert_eq!(deck.len(), 46);
        let mut start = 0;
        for size in [8, 8, 8, 8, 7, 7] {
            let pile = &deck[start..start + size];
            assert_eq!(pile.iter().filter(|c| c.is_epidemic()).count(), 1);
            start += size;
        }
        assert_eq!(start, deck.len());
    }

    #[test]
    fn test_event_cards_included() {
        let options = GameOptions::default()
            .with_roles([Role::Medic, Role::Dispatcher, Role::Researcher, Role::Scientist])
            .with_special_event_cards(true);
        let (state, _) = new_game(&options);

        let mut event_cards = state
            .player_draw_pile()
            .iter()
            .filter(|c| c.event().is_some())
            .count();
        for player in state.players() {
            assert_eq!(player.hand.len(), 2);
            event_cards += player.hand.iter().filter(|c| c.event().is_some()).count();
        }
        assert_eq!(event_cards, 5);
        assert_eq!(state.player_draw_pile().len(), 53 - 8 + 5);
    }

    #[test]
    fn test_same_seed_same_game() {
        let options = GameOptions::default().with_seed(7);
        let (_, first) = new_game(&options);
        let (_, second) = new_game(&options);
        assert_eq!(first, second);

        let (_, other) = new_game(&options.clone().with_seed(8));
        assert_ne!(first, other);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = GameOptions::default().with_roles([Role::Medic]);
        assert!(create_new_game(&options).unwrap_err().is_invalid_input());
    }
}
