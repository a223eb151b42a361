use crate::{Board, Orientation, SegmentId};

/// Renders the drawn segments as a box-drawing picture, for logs and
/// debugging. Ownership is not shown.
pub fn visualize_board(board: &Board) -> String {
    let n = board.size();
    let drawn = |id: SegmentId| board.segment_owner(id).is_some();

    let mut lines = Vec::new();
    for r in 0..n {
        let mut line = String::new();
        for c in 0..n {
            line += "•";
            if c + 1 < n {
                line += if drawn(SegmentId::new(Orientation::Horizontal, r, c)) {
                    "───"
                } else {
                    "   "
                };
            }
        }
        lines.push(line);

        if r + 1 < n {
            let mut line = String::new();
            for c in 0..n {
                line += if drawn(SegmentId::new(Orientation::Vertical, r, c)) {
                    "│"
                } else {
                    " "
                };
                if c + 1 < n {
                    let down = drawn(SegmentId::new(Orientation::DiagonalDown, r, c));
                    let up = drawn(SegmentId::new(Orientation::DiagonalUp, r, c + 1));
                    line += match (down, up) {
                        (true, true) => " ╳ ",
                        (true, false) => " ╲ ",
                        (false, true) => " ╱ ",
                        (false, false) => "   ",
                    };
                }
            }
            lines.push(line);
        }
    }

    let lines: Vec<&str> = lines.iter().map(|line| line.trim_end()).collect();
    lines.join("\n")
}
