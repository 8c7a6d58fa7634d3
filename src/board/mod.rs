//! Static world map: cities, connections and shortest-path distances.
//!
//! The board never changes during a game, so it is built once per process
//! and shared by every state. Distances are precomputed with a breadth-first
//! search from every city, which makes movement legality and heuristic
//! lookups O(1).
//!
//! ```
//! use pandemic_engine::board::{board, CityId};
//!
//! let board = board();
//! let chicago = board.city_id("Chicago").unwrap();
//! assert_eq!(board.distance(CityId::ATLANTA, chicago), 1);
//! ```

mod data;

use std::collections::VecDeque;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Colour, GameError, GameResult};

/// City identifier: index into the board's city table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CityId(pub u8);

impl CityId {
    /// Atlanta, where every game starts.
    pub const ATLANTA: CityId = CityId(0);

    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match board().try_name(*self) {
            Some(name) => f.write_str(name),
            None => write!(f, "City({})", self.0),
        }
    }
}

/// Adjacency list for one city. No city has more than six connections.
pub type Neighbours = SmallVec<[CityId; 6]>;

/// The world map.
#[derive(Debug)]
pub struct Board {
    names: Vec<&'static str>,
    colours: Vec<Colour>,
    neighbours: Vec<Neighbours>,
    /// Row-major `len * len` table of hop counts.
    distances: Vec<u8>,
    by_name: FxHashMap<&'static str, CityId>,
}

/// The shared standard board.
pub fn board() -> &'static Board {
    static BOARD: OnceLock<Board> = OnceLock::new();
    BOARD.get_or_init(Board::standard)
}

impl Board {
    /// Build the standard 48-city board.
    fn standard() -> Self {
        let names: Vec<&'static str> = data::CITIES.iter().map(|(name, _)| *name).collect();
        let colours = data::CITIES.iter().map(|(_, colour)| *colour).collect();
        let by_name: FxHashMap<_, _> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (*name, CityId(i as u8)))
            .collect();

        let mut neighbours = vec![Neighbours::new(); names.len()];
        for (a, b) in data::CONNECTIONS {
            let a = by_name[a];
            let b = by_name[b];
            neighbours[a.index()].push(b);
            neighbours[b.index()].push(a);
        }

        let distances = all_pairs_distances(&neighbours);

        Self {
            names,
            colours,
            neighbours,
            distances,
            by_name,
        }
    }

    /// Number of cities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// The board is never empty; provided for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check that a city ID refers to a city on this board.
    #[must_use]
    pub fn contains(&self, city: CityId) -> bool {
        city.index() < self.len()
    }

    /// Reject city IDs that are not on the board.
    pub fn validate(&self, city: CityId) -> GameResult<CityId> {
        if self.contains(city) {
            Ok(city)
        } else {
            Err(GameError::invalid(format!("unknown city id {}", city.0)))
        }
    }

    /// Iterate over every city ID.
    pub fn city_ids(&self) -> impl Iterator<Item = CityId> {
        (0..self.len() as u8).map(CityId)
    }

    /// Look up a city by its exact name.
    pub fn city_id(&self, name: &str) -> GameResult<CityId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| GameError::invalid(format!("unknown city: {name}")))
    }

    /// City name, or `None` for an unknown ID.
    #[must_use]
    pub fn try_name(&self, city: CityId) -> Option<&'static str> {
        self.names.get(city.index()).copied()
    }

    /// City name. Panics on an unknown ID; validate input first.
    #[must_use]
    pub fn name(&self, city: CityId) -> &'static str {
        self.names[city.index()]
    }

    /// City colour. Panics on an unknown ID; validate input first.
    #[must_use]
    pub fn colour(&self, city: CityId) -> Colour {
        self.colours[city.index()]
    }

    /// Cities directly connected to `city`.
    #[must_use]
    pub fn neighbours(&self, city: CityId) -> &[CityId] {
        &self.neighbours[city.index()]
    }

    /// Check if two cities share a connection.
    #[must_use]
    pub fn is_adjacent(&self, a: CityId, b: CityId) -> bool {
        self.neighbours(a).contains(&b)
    }

    /// Shortest number of drive/ferry hops between two cities.
    #[must_use]
    pub fn distance(&self, a: CityId, b: CityId) -> u8 {
        self.distances[a.index() * self.len() + b.index()]
    }

    /// All cities of one colour.
    pub fn cities_of(&self, colour: Colour) -> impl Iterator<Item = CityId> + '_ {
        self.city_ids().filter(move |&city| self.colour(city) == colour)
    }
}

fn all_pairs_distances(neighbours: &[Neighbours]) -> Vec<u8> {
    let n = neighbours.len();
    let mut distances = vec![u8::MAX; n * n];
    let mut queue = VecDeque::with_capacity(n);

    for start in 0..n {
        let row = &mut distances[start * n..(start + 1) * n];
        row[start] = 0;
        queue.clear();
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let next_distance = row[current] + 1;
            for next in &neighbours[current] {
                if row[next.index()] == u8::MAX {
                    row[next.index()] = next_distance;
                    queue.push_back(next.index());
                }
            }
        }
    }

    distances
}
