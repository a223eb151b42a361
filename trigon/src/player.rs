use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// One of the two players. `One` moves first in a fresh game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::One => write!(f, "player 1"),
            Player::Two => write!(f, "player 2"),
        }
    }
}

/// Points per player. Only ever increases while a game runs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores([u32; 2]);

impl Scores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(self, player: Player) -> u32 {
        self.0[player.index()]
    }

    /// The player ahead on points, or `None` when tied.
    pub fn leader(self) -> Option<Player> {
        match self.0[0].cmp(&self.0[1]) {
            Ordering::Greater => Some(Player::One),
            Ordering::Less => Some(Player::Two),
            Ordering::Equal => None,
        }
    }

    pub(crate) fn add_point(&mut self, player: Player) {
        self.0[player.index()] += 1;
    }
}

impl std::fmt::Display for Scores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.0[0], self.0[1])
    }
}
