use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a renderer can observe about a game, without the hidden card values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub generation: Generation,
    pub side: Coord,
    pub max_moves: MoveCount,
    pub move_count: MoveCount,
    pub state: EngineState,
    pub faces: Array2<CardFace>,
    pub flipped: Vec<CardId>,
    pub resolved: Vec<CardId>,
}

impl Snapshot {
    pub fn from_engine(engine: &PlayEngine) -> Self {
        let side = engine.side();
        let mut faces = Array2::from_elem((side, side).to_nd_index(), CardFace::Hidden);
        for (coords, _) in engine.deck().iter_slots() {
            faces[coords.to_nd_index()] = engine.face_at(coords);
        }

        Self {
            generation: engine.generation(),
            side,
            max_moves: engine.max_moves(),
            move_count: engine.move_count(),
            state: engine.state(),
            faces,
            flipped: engine.flipped().to_vec(),
            resolved: engine.resolved().collect(),
        }
    }

    pub fn hidden_count(&self) -> usize {
        self.faces.iter().filter(|face| face.is_hidden()).count()
    }
}
