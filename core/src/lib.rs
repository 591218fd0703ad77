#![no_std]

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod generator;
mod snapshot;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub side: Coord,
    /// `0` means unlimited.
    pub max_moves: MoveCount,
}

impl GameConfig {
    pub const MIN_SIDE: Coord = 2;
    pub const MAX_SIDE: Coord = 10;

    pub const fn new_unchecked(side: Coord, max_moves: MoveCount) -> Self {
        Self { side, max_moves }
    }

    pub fn new(side: Coord, max_moves: MoveCount) -> Self {
        let side = side.clamp(Self::MIN_SIDE, Self::MAX_SIDE);
        Self::new_unchecked(side, max_moves)
    }

    pub const fn total_cells(&self) -> CardCount {
        square(self.side)
    }

    pub const fn pair_count(&self) -> CardCount {
        self.total_cells() / 2
    }

    pub const fn has_move_limit(&self) -> bool {
        self.max_moves != 0
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::MIN_SIDE, 0)
    }
}

/// Shuffled cards of one deal together with their place on the board.
///
/// Only built through [`Deck::from_values`] or a [`DeckGenerator`], so every card id indexes `cards`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Deck {
    cards: Vec<Card>,
    layout: Array2<Slot>,
}

impl Deck {
    /// Builds a deck dealing `values` in board order, checking every label in `1..=pairs` shows up exactly twice.
    pub fn from_values(side: Coord, values: &[PairValue]) -> Result<Self> {
        let pairs = square(side) / 2;
        if values.len() != usize::from(pairs) * 2 {
            return Err(GameError::InvalidDeck);
        }

        let mut seen = vec![0u8; usize::from(pairs) + 1];
        for &value in values {
            if value == 0 || value > pairs {
                return Err(GameError::InvalidDeck);
            }
            let count = &mut seen[usize::from(value)];
            *count += 1;
            if *count > 2 {
                return Err(GameError::InvalidDeck);
            }
        }

        Ok(Self::from_values_unchecked(side, values))
    }

    pub(crate) fn from_values_unchecked(side: Coord, values: &[PairValue]) -> Self {
        let cards: Vec<Card> = values
            .iter()
            .zip(0..)
            .map(|(&value, raw)| Card {
                id: CardId::new(raw),
                value,
            })
            .collect();

        let n = usize::from(side);
        let blank = blank_index(side);
        let layout = Array2::from_shape_fn((n, n), |(row, col)| {
            let cell = row * n + col;
            let card_index = match blank {
                Some(blank) if cell == blank => return Slot::Blank,
                Some(blank) if cell > blank => cell - 1,
                _ => cell,
            };
            cards
                .get(card_index)
                .map_or(Slot::Blank, |card| Slot::Card(card.id))
        });

        Self { cards, layout }
    }

    pub fn side(&self) -> Coord {
        self.layout.nrows().try_into().unwrap_or(Coord::MAX)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pair_count(&self) -> CardCount {
        (self.cards.len() / 2).try_into().unwrap_or(CardCount::MAX)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<Card> {
        self.cards.get(id.index()).copied().filter(|card| card.id == id)
    }

    pub fn validate_id(&self, id: CardId) -> Result<CardId> {
        self.card(id).map(|card| card.id).ok_or(GameError::UnknownCard)
    }

    pub fn slot_at(&self, coords: Coord2) -> Option<Slot> {
        self.layout.get(coords.to_nd_index()).copied()
    }

    /// Position of the inert cell on boards with an odd number of cells.
    pub fn blank_cell(&self) -> Option<Coord2> {
        let side = self.side();
        blank_index(side).map(|_| (side / 2, side / 2))
    }

    pub fn iter_slots(&self) -> impl Iterator<Item = (Coord2, Slot)> + '_ {
        self.layout.indexed_iter().map(|((row, col), &slot)| {
            // layout dimensions come from a `Coord` side
            ((row as Coord, col as Coord), slot)
        })
    }
}

impl Index<Coord2> for Deck {
    type Output = Slot;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.layout[coords.to_nd_index()]
    }
}

/// Row-major index of the centre cell, only for an odd cell count.
const fn blank_index(side: Coord) -> Option<usize> {
    let total = square(side) as usize;
    if total % 2 == 1 { Some(total / 2) } else { None }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FlipOutcome {
    NoChange,
    Flipped,
    Matched,
    Won,
    /// Both cards stay face-up until the returned clear is applied.
    Mismatched(PendingClear),
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        use FlipOutcome::*;
        match self {
            NoChange => false,
            Flipped => true,
            Matched => true,
            Won => true,
            Mismatched(_) => true,
        }
    }

    pub const fn pending_clear(self) -> Option<PendingClear> {
        match self {
            Self::Mismatched(pending) => Some(pending),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClearOutcome {
    NoChange,
    Cleared,
}

impl ClearOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Cleared => true,
        }
    }
}
