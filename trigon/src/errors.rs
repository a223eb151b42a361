use crate::SegmentId;

/// The error type for [`GameState::attempt_move`](crate::GameState::attempt_move).
///
/// Every variant is a plain rejection: the move is refused and the game
/// state is left exactly as it was. The checks run in declaration order
/// and the first one that fails is reported.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    /// The two dots are not on a common horizontal, vertical or 45° line.
    InvalidOrientation,
    /// No segment exists along the line: the dots coincide, the line
    /// leaves the board, or it needs a diagonal direction the active
    /// variant does not have.
    NoSegmentsFound,
    /// Some segment on the line is already drawn by the opponent.
    BlockedByOpponent { segment: SegmentId },
    /// Every segment on the line is already drawn, so there is nothing
    /// left to claim.
    AlreadyDrawn,
    /// The game has ended; no further moves are accepted until a reset.
    GameAlreadyOver,
}

impl std::error::Error for MoveError {}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::InvalidOrientation => {
                write!(f, "The line must be horizontal, vertical or at 45 degrees")
            }
            MoveError::NoSegmentsFound => {
                write!(f, "No segments exist along that line")
            }
            MoveError::BlockedByOpponent { segment } => {
                write!(f, "The path crosses {}, which belongs to the opponent", segment)
            }
            MoveError::AlreadyDrawn => {
                write!(f, "Every segment on that line has already been drawn")
            }
            MoveError::GameAlreadyOver => {
                write!(f, "The game is over; reset the board to keep playing")
            }
        }
    }
}
