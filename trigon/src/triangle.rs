use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Dot, Orientation, Player, SegmentId};

/// Which quarter of a unit cell a triangle occupies.
///
/// The `╲` diagonal cuts a cell into its `NorthEast` and `SouthWest`
/// halves; the `╱` anti-diagonal cuts it into `NorthWest` and
/// `SouthEast`. Boards without anti-diagonals only contain the first
/// two.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Half {
    #[serde(rename = "NE")]
    NorthEast,
    #[serde(rename = "SW")]
    SouthWest,
    #[serde(rename = "NW")]
    NorthWest,
    #[serde(rename = "SE")]
    SouthEast,
}

impl Half {
    pub fn tag(self) -> &'static str {
        match self {
            Half::NorthEast => "NE",
            Half::SouthWest => "SW",
            Half::NorthWest => "NW",
            Half::SouthEast => "SE",
        }
    }

    /// Whether this half is bounded by the anti-diagonal.
    pub fn uses_anti_diagonal(self) -> bool {
        matches!(self, Half::NorthWest | Half::SouthEast)
    }
}

/// Identity of a triangle: the unit cell it lives in (addressed by the
/// cell's top-left dot) plus the [`Half`] of the cell it covers.
///
/// Renders as `NE_0,1` and so on; serde uses that string form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TriangleId {
    pub row: u8,
    pub col: u8,
    pub half: Half,
}

impl TriangleId {
    pub const fn new(row: u8, col: u8, half: Half) -> Self {
        Self { row, col, half }
    }

    /// The three segment ids bounding this triangle.
    pub fn segment_ids(self) -> [SegmentId; 3] {
        let (r, c) = (self.row, self.col);
        let h = |row, col| SegmentId::new(Orientation::Horizontal, row, col);
        let v = |row, col| SegmentId::new(Orientation::Vertical, row, col);
        let d = SegmentId::new(Orientation::DiagonalDown, r, c);
        let a = SegmentId::new(Orientation::DiagonalUp, r, c + 1);
        match self.half {
            Half::NorthEast => [h(r, c), v(r, c + 1), d],
            Half::SouthWest => [h(r + 1, c), v(r, c), d],
            Half::NorthWest => [h(r, c), v(r, c), a],
            Half::SouthEast => [h(r + 1, c), v(r, c + 1), a],
        }
    }

    /// The three corner dots of this triangle.
    pub fn corners(self) -> [Dot; 3] {
        let (r, c) = (self.row, self.col);
        let dot = Dot::new;
        match self.half {
            Half::NorthEast => [dot(r, c), dot(r, c + 1), dot(r + 1, c + 1)],
            Half::SouthWest => [dot(r, c), dot(r + 1, c), dot(r + 1, c + 1)],
            Half::NorthWest => [dot(r, c), dot(r, c + 1), dot(r + 1, c)],
            Half::SouthEast => [dot(r, c + 1), dot(r + 1, c), dot(r + 1, c + 1)],
        }
    }
}

impl std::fmt::Display for TriangleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{},{}", self.half.tag(), self.row, self.col)
    }
}

/// The error type for the [`FromStr`] instance of [`TriangleId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriangleIdFromStrErr {
    InvalidHalf,
    MalformedCoordinates,
}

impl std::fmt::Display for TriangleIdFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriangleIdFromStrErr::InvalidHalf => {
                write!(f, "Triangle id must start with one of NE_, SW_, NW_ or SE_")
            }
            TriangleIdFromStrErr::MalformedCoordinates => {
                write!(f, "Triangle id coordinates must look like 0,1")
            }
        }
    }
}

impl std::error::Error for TriangleIdFromStrErr {}

impl FromStr for TriangleId {
    type Err = TriangleIdFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, coords) = s.split_once('_').ok_or(TriangleIdFromStrErr::InvalidHalf)?;
        let half = match tag {
            "NE" => Half::NorthEast,
            "SW" => Half::SouthWest,
            "NW" => Half::NorthWest,
            "SE" => Half::SouthEast,
            _ => return Err(TriangleIdFromStrErr::InvalidHalf),
        };
        let (row, col) = coords
            .split_once(',')
            .ok_or(TriangleIdFromStrErr::MalformedCoordinates)?;
        let row = row
            .parse()
            .map_err(|_| TriangleIdFromStrErr::MalformedCoordinates)?;
        let col = col
            .parse()
            .map_err(|_| TriangleIdFromStrErr::MalformedCoordinates)?;
        Ok(TriangleId::new(row, col, half))
    }
}

impl From<TriangleId> for String {
    fn from(id: TriangleId) -> String {
        id.to_string()
    }
}

impl TryFrom<String> for TriangleId {
    type Error = TriangleIdFromStrErr;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Fill state of a triangle.
///
/// `Void` only occurs under [`ScoringRule::SoleOwnership`](crate::ScoringRule):
/// the triangle closed, but its sides belong to different players, so
/// nobody gets the point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriangleStatus {
    Open,
    Won(Player),
    Void,
}

impl TriangleStatus {
    pub fn is_filled(self) -> bool {
        self != TriangleStatus::Open
    }

    /// The scoring player, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            TriangleStatus::Won(player) => Some(player),
            TriangleStatus::Open | TriangleStatus::Void => None,
        }
    }
}

/// A triangular region of the board.
///
/// The segment ids and corners are fixed at construction and derivable
/// from the id; they are stored here so consumers of a
/// [`MoveOutcome`](crate::MoveOutcome) get the full shape without extra
/// lookups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub id: TriangleId,
    pub segments: [SegmentId; 3],
    pub corners: [Dot; 3],
    pub status: TriangleStatus,
}

impl Triangle {
    pub(crate) fn open(id: TriangleId) -> Self {
        Self {
            id,
            segments: id.segment_ids(),
            corners: id.corners(),
            status: TriangleStatus::Open,
        }
    }
}
