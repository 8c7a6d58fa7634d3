//! Ordered card collections.
//!
//! Backed by `im::Vector` so that cloning a deck is O(1) and a modified deck
//! shares structure with the one it came from. The top of the deck is the
//! end of the vector.

use im::Vector;
use serde::{Deserialize, Serialize};

/// An ordered stack of cards with top and bottom access.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck<T: Clone> {
    cards: Vector<T>,
}

impl<T: Clone> Default for Deck<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Deck<T> {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self { cards: Vector::new() }
    }

    /// Build a deck from cards listed bottom first, top last.
    #[must_use]
    pub fn from_bottom_up(cards: impl IntoIterator<Item = T>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Top card, if any.
    #[must_use]
    pub fn top(&self) -> Option<&T> {
        self.cards.back()
    }

    /// Bottom card, if any.
    #[must_use]
    pub fn bottom(&self) -> Option<&T> {
        self.cards.front()
    }

    /// Up to `n` cards from the top, top first.
    #[must_use]
    pub fn top_n(&self, n: usize) -> Vec<T> {
        self.cards.iter().rev().take(n).cloned().collect()
    }

    /// Remove and return the top card.
    pub fn draw_top(&mut self) -> Option<T> {
        self.cards.pop_back()
    }

    /// Remove and return the bottom card.
    pub fn draw_bottom(&mut self) -> Option<T> {
        self.cards.pop_front()
    }

    /// Put a card on top.
    pub fn place_on_top(&mut self, card: T) {
        self.cards.push_back(card);
    }

    /// Put a card on the bottom.
    pub fn place_on_bottom(&mut self, card: T) {
        self.cards.push_front(card);
    }

    /// Replace the top `cards.len()` cards with `cards`, given top first.
    pub fn replace_top(&mut self, cards: &[T]) {
        let keep = self.cards.len().saturating_sub(cards.len());
        self.cards.truncate(keep);
        for card in cards.iter().rev() {
            self.cards.push_back(card.clone());
        }
    }

    /// Remove every card, returning them bottom first.
    pub fn take_all(&mut self) -> Vec<T> {
        std::mem::take(&mut self.cards).into_iter().collect()
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.cards.iter()
    }
}

impl<T: Clone + PartialEq> Deck<T> {
    /// Check if an equal card is in the deck.
    #[must_use]
    pub fn contains(&self, card: &T) -> bool {
        self.cards.iter().any(|c| c == card)
    }

    /// Remove the topmost card equal to `card`. Returns whether one was found.
    pub fn remove(&mut self, card: &T) -> bool {
        match self.cards.iter().rposition(|c| c == card) {
            Some(index) => {
                self.cards.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_is_last() {
        let mut deck = Deck::from_bottom_up([1, 2, 3]);

        assert_eq!(deck.top(), Some(&3));
        assert_eq!(deck.bottom(), Some(&1));
        assert_eq!(deck.draw_top(), Some(3));
        assert_eq!(deck.draw_bottom(), Some(1));
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_place_and_top_n() {
        let mut deck = Deck::new();
        deck.place_on_top(1);
        deck.place_on_top(2);
        deck.place_on_bottom(0);

        assert_eq!(deck.top_n(2), vec![2, 1]);
        assert_eq!(deck.top_n(10), vec![2, 1, 0]);
    }

    #[test]
    fn test_replace_top() {
        let mut deck = Deck::from_bottom_up([1, 2, 3, 4]);
        deck.replace_top(&[3, 4]);

        assert_eq!(deck.top_n(4), vec![3, 4, 2, 1]);
    }

    #[test]
    fn test_remove_by_value() {
        let mut deck = Deck::from_bottom_up([1, 2, 1]);

        assert!(deck.remove(&1));
        assert_eq!(deck.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert!(!deck.remove(&9));
        assert!(deck.contains(&2));
    }

    #[test]
    fn test_clone_is_independent() {
        let deck = Deck::from_bottom_up(0..100);
        let mut other = deck.clone();
        other.draw_top();

        assert_eq!(deck.len(), 100);
        assert_eq!(other.len(), 99);
    }

    #[test]
    fn test_take_all() {
        let mut deck = Deck::from_bottom_up([1, 2, 3]);
        assert_eq!(deck.take_all(), vec![1, 2, 3]);
        assert!(deck.is_empty());
    }
}
