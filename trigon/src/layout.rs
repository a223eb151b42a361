use crate::Dot;

/// Default pixel radius inside which a pointer press snaps to a dot.
pub const DOT_CLICK_TOLERANCE: f32 = 15.0;

/// Pixel geometry of the dot lattice, for front ends that map pointer
/// coordinates to dots and back.
///
/// Dots sit on a uniform grid: dot `(row, col)` is at
/// `(padding + col * spacing, padding + row * spacing)` with the y axis
/// pointing down, screen style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub spacing: f32,
    pub padding: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        GridLayout {
            spacing: 100.0,
            padding: 50.0,
        }
    }
}

impl GridLayout {
    /// The pixel center of a dot, as `(x, y)`.
    pub fn dot_position(&self, dot: Dot) -> (f32, f32) {
        (
            self.padding + dot.col as f32 * self.spacing,
            self.padding + dot.row as f32 * self.spacing,
        )
    }

    /// The `(width, height)` of a canvas that fits the whole lattice
    /// with padding on all sides.
    pub fn canvas_size(&self, grid_size: u8) -> (f32, f32) {
        let side = (grid_size as f32 - 1.0) * self.spacing + 2.0 * self.padding;
        (side, side)
    }

    /// The dot nearest to a pixel position, if any dot is within
    /// `tolerance`.
    ///
    /// This is a true nearest-dot search, not a first-within-tolerance
    /// scan, so a press between two dots snaps to the closer one. Exact
    /// ties go to the earlier dot in row-major order.
    pub fn nearest_dot(&self, grid_size: u8, x: f32, y: f32, tolerance: f32) -> Option<Dot> {
        let mut best: Option<(Dot, f32)> = None;
        for row in 0..grid_size {
            for col in 0..grid_size {
                let dot = Dot::new(row, col);
                let (dot_x, dot_y) = self.dot_position(dot);
                let distance_sq = (x - dot_x).powi(2) + (y - dot_y).powi(2);
                match best {
                    Some((_, best_sq)) if best_sq <= distance_sq => {}
                    _ => best = Some((dot, distance_sq)),
                }
            }
        }
        best.filter(|&(_, distance_sq)| distance_sq <= tolerance * tolerance)
            .map(|(dot, _)| dot)
    }
}
