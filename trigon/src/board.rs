use std::collections::BTreeMap;

use crate::segment::canonical;
use crate::{
    Dot, Half, MoveError, Orientation, Player, ScoringRule, SegmentId, Triangle, TriangleId,
    TriangleStatus,
};

/// The playing surface: an N×N lattice of dots, every unit segment the
/// active variant supports, and every triangular region those segments
/// can close.
///
/// The segment map is keyed by [`SegmentId`]; a key's presence means the
/// segment exists on this board, and its value is the owner once drawn.
/// Segment and triangle sets are fixed at construction — play only ever
/// flips owners from `None` to `Some` and triangle statuses from `Open`
/// to filled.
#[derive(Clone, Debug)]
pub struct Board {
    size: u8,
    anti_diagonals: bool,
    segments: BTreeMap<SegmentId, Option<Player>>,
    triangles: Vec<Triangle>,
    filled: usize,
}

impl Board {
    /// Creates an empty board.
    ///
    /// With `anti_diagonals` every unit cell is cut into four triangles
    /// (`NE`/`SW` by `╲` plus `NW`/`SE` by `╱`); without it, only the
    /// `╲` diagonal exists and each cell holds two triangles.
    ///
    /// Panics if `grid_size < 2` (no cell fits on a smaller lattice).
    pub fn new(grid_size: u8, anti_diagonals: bool) -> Self {
        assert!(grid_size >= 2, "the board needs at least a 2x2 grid of dots");

        let mut segments = BTreeMap::new();
        for r in 0..grid_size {
            for c in 0..grid_size {
                if c + 1 < grid_size {
                    segments.insert(SegmentId::new(Orientation::Horizontal, r, c), None);
                }
                if r + 1 < grid_size {
                    segments.insert(SegmentId::new(Orientation::Vertical, r, c), None);
                }
                if r + 1 < grid_size && c + 1 < grid_size {
                    segments.insert(SegmentId::new(Orientation::DiagonalDown, r, c), None);
                }
                if anti_diagonals && r + 1 < grid_size && c > 0 {
                    segments.insert(SegmentId::new(Orientation::DiagonalUp, r, c), None);
                }
            }
        }

        let mut triangles = Vec::new();
        for r in 0..grid_size - 1 {
            for c in 0..grid_size - 1 {
                triangles.push(Triangle::open(TriangleId::new(r, c, Half::NorthEast)));
                triangles.push(Triangle::open(TriangleId::new(r, c, Half::SouthWest)));
                if anti_diagonals {
                    triangles.push(Triangle::open(TriangleId::new(r, c, Half::NorthWest)));
                    triangles.push(Triangle::open(TriangleId::new(r, c, Half::SouthEast)));
                }
            }
        }
        debug_assert!(triangles
            .iter()
            .all(|t| t.segments.iter().all(|id| segments.contains_key(id))));

        Self {
            size: grid_size,
            anti_diagonals,
            segments,
            triangles,
            filled: 0,
        }
    }

    /// Number of dots per side.
    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn has_anti_diagonals(&self) -> bool {
        self.anti_diagonals
    }

    /// All segments of the active variant, drawn or not.
    pub fn segments(&self) -> &BTreeMap<SegmentId, Option<Player>> {
        &self.segments
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn contains_segment(&self, id: SegmentId) -> bool {
        self.segments.contains_key(&id)
    }

    /// The player who drew the segment, or `None` while it is undrawn
    /// (or does not exist in this variant).
    pub fn segment_owner(&self, id: SegmentId) -> Option<Player> {
        self.segments.get(&id).copied().flatten()
    }

    pub fn filled_triangles(&self) -> usize {
        self.filled
    }

    pub fn total_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// True once every triangle is filled — the game-over condition.
    pub fn is_complete(&self) -> bool {
        self.filled == self.triangles.len()
    }

    /// Decomposes the straight line from `a` to `b` into unit segment ids.
    ///
    /// This is the validation front half of a move. The line must be
    /// horizontal, vertical or at exactly 45°, and every unit step along
    /// it must name a segment that exists on this board; the returned
    /// ids are canonical, so the decomposition is identical regardless
    /// of which endpoint comes first.
    ///
    /// Ownership is not consulted here — see
    /// [`GameState::attempt_move`](crate::GameState::attempt_move) for
    /// the conflict checks layered on top.
    pub fn line_segments(&self, a: Dot, b: Dot) -> Result<Vec<SegmentId>, MoveError> {
        let dr = b.row as i16 - a.row as i16;
        let dc = b.col as i16 - a.col as i16;
        if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
            return Err(MoveError::InvalidOrientation);
        }
        let orientation = match (dr.signum(), dc.signum()) {
            (0, _) => Orientation::Horizontal,
            (_, 0) => Orientation::Vertical,
            (r, c) if r == c => Orientation::DiagonalDown,
            _ => Orientation::DiagonalUp,
        };

        let mut ids = Vec::with_capacity(dr.abs().max(dc.abs()) as usize);
        let mut cur = a;
        while cur != b {
            let next = Dot::new(
                (cur.row as i16 + dr.signum()) as u8,
                (cur.col as i16 + dc.signum()) as u8,
            );
            let id = canonical(orientation, cur, next);
            if !self.segments.contains_key(&id) {
                return Err(MoveError::NoSegmentsFound);
            }
            ids.push(id);
            cur = next;
        }
        if ids.is_empty() {
            return Err(MoveError::NoSegmentsFound);
        }
        Ok(ids)
    }

    /// Marks an undrawn segment as drawn by `player`.
    ///
    /// A segment that is already drawn keeps its original owner.
    pub(crate) fn draw(&mut self, id: SegmentId, player: Player) {
        debug_assert!(
            matches!(self.segments.get(&id), Some(None)),
            "drawing a missing or already drawn segment: {id}"
        );
        if let Some(slot) = self.segments.get_mut(&id) {
            if slot.is_none() {
                *slot = Some(player);
            }
        }
    }

    /// Fills every open triangle whose three sides are now drawn and
    /// returns the newly filled triangles.
    ///
    /// Under `FinisherTakes` the mover claims each of them outright;
    /// under `SoleOwnership` a triangle is only claimed when the mover
    /// drew all three sides, and is voided otherwise.
    pub(crate) fn settle_triangles(
        &mut self,
        mover: Player,
        rule: ScoringRule,
    ) -> Vec<Triangle> {
        let closed: Vec<usize> = self
            .triangles
            .iter()
            .enumerate()
            .filter(|(_, t)| {
                t.status == TriangleStatus::Open
                    && t.segments.iter().all(|&id| self.segment_owner(id).is_some())
            })
            .map(|(i, _)| i)
            .collect();

        let mut filled_now = Vec::with_capacity(closed.len());
        for i in closed {
            let unanimous = self.triangles[i]
                .segments
                .iter()
                .all(|&id| self.segment_owner(id) == Some(mover));
            self.triangles[i].status = match rule {
                ScoringRule::FinisherTakes => TriangleStatus::Won(mover),
                ScoringRule::SoleOwnership if unanimous => TriangleStatus::Won(mover),
                ScoringRule::SoleOwnership => TriangleStatus::Void,
            };
            self.filled += 1;
            filled_now.push(self.triangles[i].clone());
        }
        filled_now
    }

    /// Re-applies a known fill state, used when rebuilding a board from
    /// a serialized view.
    pub(crate) fn restore_claim(&mut self, id: TriangleId, status: TriangleStatus) {
        debug_assert!(status.is_filled());
        debug_assert!(self.triangles.iter().any(|t| t.id == id));
        if let Some(tri) = self.triangles.iter_mut().find(|t| t.id == id) {
            debug_assert_eq!(tri.status, TriangleStatus::Open);
            tri.status = status;
            self.filled += 1;
        }
    }
}
