use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A lattice point on the board, addressed by row and column.
///
/// Rows grow downwards and columns to the right, so `(0, 0)` is the
/// top-left dot of the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Dot {
    pub row: u8,
    pub col: u8,
}

impl Dot {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Dot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The direction of a unit segment between two adjacent dots.
///
/// `DiagonalUp` only exists on boards where the anti-diagonal variant
/// is enabled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Orientation {
    /// Left to right, `─`.
    #[serde(rename = "H")]
    Horizontal,
    /// Top to bottom, `│`.
    #[serde(rename = "V")]
    Vertical,
    /// Top-left to bottom-right, `╲`.
    #[serde(rename = "D")]
    DiagonalDown,
    /// Top-right to bottom-left, `╱`.
    #[serde(rename = "A")]
    DiagonalUp,
}

impl Orientation {
    /// Single-letter form used in the textual segment id.
    pub fn tag(self) -> char {
        match self {
            Orientation::Horizontal => 'H',
            Orientation::Vertical => 'V',
            Orientation::DiagonalDown => 'D',
            Orientation::DiagonalUp => 'A',
        }
    }

    /// The (row, col) offset from a segment's anchor to its other endpoint.
    pub fn step(self) -> (i8, i8) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
            Orientation::DiagonalDown => (1, 1),
            Orientation::DiagonalUp => (1, -1),
        }
    }
}

/// Canonical identity of a unit segment: an orientation plus the anchor dot.
///
/// The anchor is the topmost endpoint (the leftmost one for horizontal
/// segments), so a segment has the same id no matter which endpoint it
/// was traversed from. An anti-diagonal `A_r,c` runs from `(r, c)` down
/// to `(r + 1, c - 1)`.
///
/// Ids render as `H_0,1`, `V_2,0`, `D_1,1`, `A_1,2` and parse back via
/// [`FromStr`]; the serde representation is that same string, which keeps
/// JSON views and recordings readable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SegmentId {
    pub orientation: Orientation,
    pub row: u8,
    pub col: u8,
}

impl SegmentId {
    pub const fn new(orientation: Orientation, row: u8, col: u8) -> Self {
        Self {
            orientation,
            row,
            col,
        }
    }

    /// Both endpoints of the segment, anchor first.
    pub fn endpoints(self) -> (Dot, Dot) {
        debug_assert!(
            self.orientation != Orientation::DiagonalUp || self.col > 0,
            "anti-diagonal anchored at column 0 has no second endpoint"
        );
        let (dr, dc) = self.orientation.step();
        let anchor = Dot::new(self.row, self.col);
        let other = Dot::new(
            (self.row as i16 + dr as i16) as u8,
            (self.col as i16 + dc as i16) as u8,
        );
        (anchor, other)
    }

    /// The canonical id of the segment connecting two *adjacent* dots.
    ///
    /// Returns `None` if the dots are not exactly one unit step apart.
    /// `between(a, b)` and `between(b, a)` always agree.
    pub fn between(a: Dot, b: Dot) -> Option<SegmentId> {
        let dr = b.row as i16 - a.row as i16;
        let dc = b.col as i16 - a.col as i16;
        let orientation = match (dr, dc) {
            (0, 1) | (0, -1) => Orientation::Horizontal,
            (1, 0) | (-1, 0) => Orientation::Vertical,
            (1, 1) | (-1, -1) => Orientation::DiagonalDown,
            (1, -1) | (-1, 1) => Orientation::DiagonalUp,
            _ => return None,
        };
        Some(canonical(orientation, a, b))
    }
}

/// Builds the id for a unit step, picking the canonical anchor endpoint.
///
/// The caller guarantees that `a` and `b` are adjacent along `orientation`.
pub(crate) fn canonical(orientation: Orientation, a: Dot, b: Dot) -> SegmentId {
    let anchor = match orientation {
        Orientation::Horizontal => {
            if a.col < b.col {
                a
            } else {
                b
            }
        }
        _ => {
            if a.row < b.row {
                a
            } else {
                b
            }
        }
    };
    SegmentId::new(orientation, anchor.row, anchor.col)
}

impl std::fmt::Display for SegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{},{}", self.orientation.tag(), self.row, self.col)
    }
}

/// The error type for the [`FromStr`] instance of [`SegmentId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentIdFromStrErr {
    InvalidTag,
    MalformedCoordinates,
}

impl std::fmt::Display for SegmentIdFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentIdFromStrErr::InvalidTag => {
                write!(f, "Segment id must start with one of H_, V_, D_ or A_")
            }
            SegmentIdFromStrErr::MalformedCoordinates => {
                write!(f, "Segment id coordinates must look like 0,1")
            }
        }
    }
}

impl std::error::Error for SegmentIdFromStrErr {}

impl FromStr for SegmentId {
    type Err = SegmentIdFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, coords) = s.split_once('_').ok_or(SegmentIdFromStrErr::InvalidTag)?;
        let orientation = match tag {
            "H" => Orientation::Horizontal,
            "V" => Orientation::Vertical,
            "D" => Orientation::DiagonalDown,
            "A" => Orientation::DiagonalUp,
            _ => return Err(SegmentIdFromStrErr::InvalidTag),
        };
        let (row, col) = coords
            .split_once(',')
            .ok_or(SegmentIdFromStrErr::MalformedCoordinates)?;
        let row = row
            .parse()
            .map_err(|_| SegmentIdFromStrErr::MalformedCoordinates)?;
        let col = col
            .parse()
            .map_err(|_| SegmentIdFromStrErr::MalformedCoordinates)?;
        Ok(SegmentId::new(orientation, row, col))
    }
}

impl From<SegmentId> for String {
    fn from(id: SegmentId) -> String {
        id.to_string()
    }
}

impl TryFrom<String> for SegmentId {
    type Error = SegmentIdFromStrErr;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Shorthand for creating segment ids from their textual form.
///
/// The format is the orientation tag (`H`, `V`, `D` or `A`), an
/// underscore, and the anchor coordinates as `row,col`.
///
/// This macro is just calling the [`FromStr`] instance of [`SegmentId`].
/// ```
/// # use trigon::{seg, Orientation, SegmentId};
/// assert_eq!(
///     seg!("D_1,2"),
///     SegmentId { orientation: Orientation::DiagonalDown, row: 1, col: 2 }
/// );
/// ```
#[macro_export]
macro_rules! seg {
    ($s:expr) => {
        <$crate::SegmentId as std::str::FromStr>::from_str($s)
            .expect("Invalid segment id given to seg! macro")
    };
}
// The import is for using the macro in other modules.
#[allow(unused_imports)]
pub(crate) use seg;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_per_orientation() {
        assert_eq!(
            seg!("H_0,1").endpoints(),
            (Dot::new(0, 1), Dot::new(0, 2))
        );
        assert_eq!(
            seg!("V_2,0").endpoints(),
            (Dot::new(2, 0), Dot::new(3, 0))
        );
        assert_eq!(
            seg!("D_1,1").endpoints(),
            (Dot::new(1, 1), Dot::new(2, 2))
        );
        // The anti-diagonal runs down and to the left.
        assert_eq!(
            seg!("A_1,2").endpoints(),
            (Dot::new(1, 2), Dot::new(2, 1))
        );
    }

    #[test]
    fn between_is_direction_independent() {
        let pairs = [
            (Dot::new(0, 0), Dot::new(0, 1), "H_0,0"),
            (Dot::new(2, 1), Dot::new(1, 1), "V_1,1"),
            (Dot::new(2, 2), Dot::new(1, 1), "D_1,1"),
            (Dot::new(1, 0), Dot::new(0, 1), "A_0,1"),
        ];
        for (a, b, expected) in pairs {
            assert_eq!(SegmentId::between(a, b), Some(seg!(expected)));
            assert_eq!(SegmentId::between(b, a), Some(seg!(expected)));
        }
    }

    #[test]
    fn between_rejects_non_adjacent_dots() {
        assert_eq!(SegmentId::between(Dot::new(0, 0), Dot::new(0, 0)), None);
        assert_eq!(SegmentId::between(Dot::new(0, 0), Dot::new(0, 2)), None);
        assert_eq!(SegmentId::between(Dot::new(0, 0), Dot::new(1, 2)), None);
        assert_eq!(SegmentId::between(Dot::new(0, 0), Dot::new(2, 2)), None);
    }

    #[test]
    fn parse_and_display_round_trip() {
        for text in ["H_0,0", "V_3,1", "D_0,2", "A_2,10"] {
            let id: SegmentId = text.parse().unwrap();
            assert_eq!(id.to_string(), text);
        }
    }

    #[test]
    fn parse_rejects_malformed_ids() {
        assert_eq!(
            "X_0,0".parse::<SegmentId>(),
            Err(SegmentIdFromStrErr::InvalidTag)
        );
        assert_eq!(
            "H0,0".parse::<SegmentId>(),
            Err(SegmentIdFromStrErr::InvalidTag)
        );
        assert_eq!(
            "H_00".parse::<SegmentId>(),
            Err(SegmentIdFromStrErr::MalformedCoordinates)
        );
        assert_eq!(
            "H_a,0".parse::<SegmentId>(),
            Err(SegmentIdFromStrErr::MalformedCoordinates)
        );
    }
}
