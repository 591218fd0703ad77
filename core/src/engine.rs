use alloc::collections::BTreeSet;
use core::num::Saturating;
use core::time::Duration;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// How long a mismatched pair stays face-up before it is turned back down.
pub const MISMATCH_DELAY: Duration = Duration::from_millis(500);

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Won,
    OutOfMoves,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::OutOfMoves)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Deferred turn-down of a mismatched pair, only valid for the deal that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingClear {
    generation: Generation,
    first: CardId,
    second: CardId,
}

impl PendingClear {
    pub const fn generation(self) -> Generation {
        self.generation
    }

    pub const fn cards(self) -> (CardId, CardId) {
        (self.first, self.second)
    }

    pub const fn delay(self) -> Duration {
        MISMATCH_DELAY
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayEngine {
    deck: Deck,
    max_moves: MoveCount,
    generation: Generation,
    move_count: Saturating<MoveCount>,
    resolved: BTreeSet<CardId>,
    flipped: SmallVec<[CardId; 2]>,
    won: bool,
}

impl PlayEngine {
    pub fn new(deck: Deck, max_moves: MoveCount) -> Self {
        Self {
            deck,
            max_moves,
            generation: Generation::default(),
            move_count: Saturating(0),
            resolved: BTreeSet::new(),
            flipped: SmallVec::new(),
            won: false,
        }
    }

    /// Starts a game with a freshly shuffled deck.
    pub fn deal(config: GameConfig, seed: u64) -> Self {
        let deck = ShuffledDeckGenerator::new(seed).generate(config);
        Self::new(deck, config.max_moves)
    }

    /// Throws the whole session away and deals again, invalidating any pending clear.
    pub fn initialize(&mut self, config: GameConfig, seed: u64) {
        let deck = ShuffledDeckGenerator::new(seed).generate(config);
        self.redeal(deck, config.max_moves);
    }

    /// Same as [`Self::initialize`] with a deck built elsewhere.
    pub fn redeal(&mut self, deck: Deck, max_moves: MoveCount) {
        let generation = self.generation.next();
        log::debug!(
            "deal #{}: {} cards on a {}x{} board, move limit {}",
            generation.get(),
            deck.len(),
            deck.side(),
            deck.side(),
            max_moves
        );
        *self = Self {
            generation,
            ..Self::new(deck, max_moves)
        };
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.deck.side(), self.max_moves)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn side(&self) -> Coord {
        self.deck.side()
    }

    pub fn max_moves(&self) -> MoveCount {
        self.max_moves
    }

    pub fn move_count(&self) -> MoveCount {
        self.move_count.0
    }

    /// Remaining flips, `None` when there is no limit.
    pub fn moves_left(&self) -> Option<MoveCount> {
        (self.max_moves != 0).then(|| self.max_moves.saturating_sub(self.move_count.0))
    }

    pub fn flipped(&self) -> &[CardId] {
        &self.flipped
    }

    pub fn resolved(&self) -> impl Iterator<Item = CardId> + '_ {
        self.resolved.iter().copied()
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    pub fn card(&self, id: CardId) -> Option<Card> {
        self.deck.card(id)
    }

    pub fn is_flipped(&self, id: CardId) -> bool {
        self.flipped.contains(&id)
    }

    pub fn is_resolved(&self, id: CardId) -> bool {
        self.resolved.contains(&id)
    }

    pub fn is_move_limit_reached(&self) -> bool {
        self.max_moves != 0 && self.move_count.0 >= self.max_moves
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_over(&self) -> bool {
        self.won || self.is_move_limit_reached()
    }

    pub fn state(&self) -> EngineState {
        if self.won {
            EngineState::Won
        } else if self.is_move_limit_reached() {
            EngineState::OutOfMoves
        } else if self.move_count.0 == 0 {
            EngineState::Ready
        } else {
            EngineState::Active
        }
    }

    /// Clear still owed for the face-up pair, if they do not match.
    pub fn pending_clear(&self) -> Option<PendingClear> {
        let &[first, second] = self.flipped.as_slice() else {
            return None;
        };
        Some(PendingClear {
            generation: self.generation,
            first,
            second,
        })
    }

    pub fn face_of(&self, id: CardId) -> CardFace {
        match self.deck.card(id) {
            None => CardFace::Blank,
            Some(card) if self.is_resolved(id) => CardFace::Resolved(card.value),
            Some(card) if self.is_flipped(id) => CardFace::FaceUp(card.value),
            Some(_) => CardFace::Hidden,
        }
    }

    pub fn face_at(&self, coords: Coord2) -> CardFace {
        match self.deck.slot_at(coords) {
            Some(Slot::Card(id)) => self.face_of(id),
            Some(Slot::Blank) | None => CardFace::Blank,
        }
    }

    pub fn can_flip(&self, id: CardId) -> bool {
        self.deck.card(id).is_some()
            && !self.is_over()
            && self.flipped.len() < 2
            && !self.is_flipped(id)
            && !self.is_resolved(id)
    }

    pub fn flip(&mut self, id: CardId) -> Result<FlipOutcome> {
        let id = self.deck.validate_id(id)?;
        self.check_not_finished()?;

        if self.is_flipped(id) || self.is_resolved(id) {
            return Ok(FlipOutcome::NoChange);
        }

        if self.flipped.len() >= 2 {
            return Err(GameError::AwaitingClear);
        }

        self.flipped.push(id);
        self.move_count += 1;
        log::trace!("flip {} on move {}", id, self.move_count.0);

        if self.flipped.len() == 2 {
            Ok(self.resolve_pair())
        } else {
            Ok(FlipOutcome::Flipped)
        }
    }

    /// Turns a mismatched pair back down, unless the deal it belongs to is gone.
    pub fn clear_mismatch(&mut self, pending: PendingClear) -> Result<ClearOutcome> {
        if pending.generation != self.generation {
            log::debug!(
                "dropping clear from deal #{}, current deal is #{}",
                pending.generation.get(),
                self.generation.get()
            );
            return Err(GameError::StaleGeneration);
        }

        if self.flipped.as_slice() == [pending.first, pending.second] {
            self.flipped.clear();
            Ok(ClearOutcome::Cleared)
        } else {
            Ok(ClearOutcome::NoChange)
        }
    }

    fn resolve_pair(&mut self) -> FlipOutcome {
        let Some(pending) = self.pending_clear() else {
            return FlipOutcome::Flipped;
        };
        let (first, second) = pending.cards();

        let (Some(a), Some(b)) = (self.deck.card(first), self.deck.card(second)) else {
            return FlipOutcome::Flipped;
        };
        if a.value != b.value {
            log::trace!("mismatch {} / {}", first, second);
            return FlipOutcome::Mismatched(pending);
        }

        self.flipped.clear();
        self.resolved.insert(first);
        self.resolved.insert(second);
        log::trace!("matched {} / {}", first, second);

        if self.check_win() {
            FlipOutcome::Won
        } else {
            FlipOutcome::Matched
        }
    }

    fn check_win(&mut self) -> bool {
        if !self.won && !self.resolved.is_empty() && self.resolved.len() == self.deck.len() {
            self.won = true;
            log::debug!(
                "deal #{} won in {} moves",
                self.generation.get(),
                self.move_count.0
            );
        }
        self.won
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.is_over() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
