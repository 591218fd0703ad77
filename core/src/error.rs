use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Card is not part of the current deck")]
    UnknownCard,
    #[error("Deck values do not form complete pairs for the board")]
    InvalidDeck,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Mismatched pair is still face-up")]
    AwaitingClear,
    #[error("Pending clear belongs to a previous deal")]
    StaleGeneration,
}

pub type Result<T> = core::result::Result<T, GameError>;
