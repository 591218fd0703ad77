use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub value: PairValue,
}

/// One cell of the board layout. Odd boards leave their centre cell blank.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    Card(CardId),
    Blank,
}

impl Slot {
    pub const fn card_id(self) -> Option<CardId> {
        match self {
            Self::Card(id) => Some(id),
            Self::Blank => None,
        }
    }
}

impl Default for Slot {
    fn default() -> Self {
        Self::Blank
    }
}

/// Canonical player-visible state of a board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Hidden,
    FaceUp(PairValue),
    Resolved(PairValue),
    Blank,
}

impl CardFace {
    pub const fn value(self) -> Option<PairValue> {
        match self {
            Self::FaceUp(value) | Self::Resolved(value) => Some(value),
            Self::Hidden | Self::Blank => None,
        }
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl Default for CardFace {
    fn default() -> Self {
        Self::Hidden
    }
}
