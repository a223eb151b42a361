use quickcheck::Arbitrary;

use crate::{Dot, GameConfig, ScoringRule};

/// Two dots on the board of `config`, not necessarily distinct or
/// collinear.
#[derive(Clone, Debug)]
pub struct LineInput {
    pub config: GameConfig,
    pub a: Dot,
    pub b: Dot,
}

impl quickcheck::Arbitrary for LineInput {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let config = GameConfig::arbitrary(g);
        LineInput {
            config,
            a: dot_on_grid(g, config.grid_size),
            b: dot_on_grid(g, config.grid_size),
        }
    }
}

/// A whole playthrough attempt: a config plus a pile of move endpoints,
/// most of which will be legal on small boards.
#[derive(Clone, Debug)]
pub struct MoveScript {
    pub config: GameConfig,
    pub moves: Vec<(Dot, Dot)>,
}

impl quickcheck::Arbitrary for MoveScript {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let config = GameConfig::arbitrary(g);
        // Enough moves to regularly play small boards to completion.
        let len = u8::arbitrary(g) % 120;
        let moves = (0..len)
            .map(|_| {
                (
                    dot_on_grid(g, config.grid_size),
                    dot_on_grid(g, config.grid_size),
                )
            })
            .collect();
        MoveScript { config, moves }
    }
}

impl quickcheck::Arbitrary for GameConfig {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        GameConfig {
            grid_size: *g.choose(&[2, 3, 4, 5, 6]).unwrap(),
            anti_diagonals: bool::arbitrary(g),
            scoring: *g
                .choose(&[ScoringRule::FinisherTakes, ScoringRule::SoleOwnership])
                .unwrap(),
        }
    }
}

fn dot_on_grid(g: &mut quickcheck::Gen, grid_size: u8) -> Dot {
    Dot::new(u8::arbitrary(g) % grid_size, u8::arbitrary(g) % grid_size)
}
