use std::fmt;

use crate::cards::{Card, CardStack};

/// Money every player starts the match with.
pub const STARTING_MONEY: i32 = 7;

/// One participant's record.
///
/// The board owns these: a player's record lives inside the stop the
/// player currently stands on and travels with them between stops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub id: usize,
    /// Never clamped; orchestrator updates may drive it negative.
    pub money: i32,
    pub points: i32,
    /// Landings on `V1` and `V2` stops, respectively.
    pub visits: [u32; 2],
    pub cards: CardStack,
}

impl Player {
    pub fn new(id: usize) -> Self {
        Player {
            id,
            money: STARTING_MONEY,
            points: 0,
            visits: [0, 0],
            cards: CardStack::new(),
        }
    }

    /// Final score: both visit tallies, accumulated points, and the value
    /// of the held cards.
    pub fn score(&self) -> i32 {
        self.visits[0] as i32 + self.visits[1] as i32 + self.points + self.cards.value()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player {} Money={} V1={} V2={} Points={}",
            self.id, self.money, self.visits[0], self.visits[1], self.points
        )?;
        for (label, card) in ["A", "B", "C", "D", "E"].into_iter().zip(Card::ALL) {
            write!(f, " {}={}", label, self.cards.count(card))?;
        }
        Ok(())
    }
}
