//! Disease colours.

use serde::{Deserialize, Serialize};

/// One of the four diseases. Every city and city card carries one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Colour {
    Blue,
    Yellow,
    Black,
    Red,
}

impl Colour {
    /// All colours in index order.
    pub const ALL: [Colour; 4] = [Colour::Blue, Colour::Yellow, Colour::Black, Colour::Red];

    /// Index for per-colour arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lower-case name, as used in loss reasons.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Colour::Blue => "blue",
            Colour::Yellow => "yellow",
            Colour::Black => "black",
            Colour::Red => "red",
        }
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
