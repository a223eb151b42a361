use serde::{Deserialize, Serialize};

use crate::{Dot, GameConfig, Player, Scores, SegmentId, TriangleId};

/// Request for a client to do something.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the client's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame {
        /// The seat this client plays for the whole game.
        seat: Player,
        config: GameConfig,
    },
    /// Request to play one move.
    ///
    /// The response should be a [`ProposedLine`].
    PlayTurn {
        /// The full position as the referee sees it. `view.to_move` is
        /// always the client's own seat.
        view: GameView,
    },
    /// The client should shut down.
    Bye,
}

/// Dummy struct for use in client communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Okay();

/// The move a client wants to play: the straight line between two dots.
///
/// The endpoints may be any distance apart, as long as the line is
/// horizontal, vertical or at 45°; the referee decomposes it into unit
/// segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedLine {
    pub from: Dot,
    pub to: Dot,
}

/// A serializable snapshot of a [`GameState`](crate::GameState).
///
/// Drawn segments are sorted by id and filled triangles come in
/// row-major cell order, so equal positions serialize identically.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub config: GameConfig,
    /// Every segment drawn so far, with its owner.
    pub drawn: Vec<DrawnSegment>,
    /// Every filled triangle so far.
    pub claimed: Vec<FilledTriangle>,
    pub scores: Scores,
    pub to_move: Player,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnSegment {
    pub id: SegmentId,
    pub owner: Player,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilledTriangle {
    pub id: TriangleId,
    /// The player the triangle scored for. `None` for a triangle voided
    /// under [`ScoringRule::SoleOwnership`](crate::ScoringRule::SoleOwnership),
    /// in which case the field is omitted from the JSON serialization.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub owner: Option<Player>,
}
