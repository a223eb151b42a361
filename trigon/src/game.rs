use serde::{Deserialize, Serialize};

use crate::{
    Board, Dot, DrawnSegment, FilledTriangle, GameView, MoveError, Player, Scores, SegmentId,
    Triangle, TriangleStatus,
};

/// How completed triangles are awarded.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    /// Whoever draws the closing side claims the triangle, no matter who
    /// drew the other two.
    FinisherTakes,
    /// A triangle is only claimed when one player drew all three sides.
    /// Mixed triangles are voided and score for nobody.
    SoleOwnership,
}

/// Parameters fixed for the lifetime of a game.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Dots per side of the square lattice. Must be at least 2.
    pub grid_size: u8,
    /// Whether `╱` diagonals exist alongside `╲`, doubling the triangle
    /// count per cell from two to four.
    pub anti_diagonals: bool,
    pub scoring: ScoringRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_size: 4,
            anti_diagonals: true,
            scoring: ScoringRule::FinisherTakes,
        }
    }
}

/// The final verdict once every triangle is filled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GameResult {
    Won(Player),
    /// Equal scores, which includes the all-void game under
    /// [`ScoringRule::SoleOwnership`].
    Draw,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    InProgress,
    GameOver(GameResult),
}

/// Everything a single accepted move changed.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveOutcome {
    /// The segments this move actually drew, in walk order. Segments the
    /// mover had already drawn earlier are not repeated here.
    pub drawn: Vec<SegmentId>,
    /// Triangles filled by this move, with their settled status.
    pub completed: Vec<Triangle>,
    pub scores: Scores,
    /// False when the mover claimed at least one triangle (they move
    /// again) or when the game just ended.
    pub turn_switched: bool,
    pub result: Option<GameResult>,
}

/// A full game: board, whose turn it is, the score, and whether play
/// has finished.
///
/// All mutation goes through [`attempt_move`](GameState::attempt_move)
/// and [`reset`](GameState::reset), so the invariants hold by
/// construction: drawn segments never change owner, filled triangles
/// never reopen, and the scores equal the claimed-triangle counts.
#[derive(Clone, Debug)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    current: Player,
    scores: Scores,
    status: Status,
}

impl GameState {
    /// Starts a fresh game. Player 1 moves first.
    ///
    /// Panics if `config.grid_size < 2`.
    pub fn new(config: GameConfig) -> Self {
        GameState {
            config,
            board: Board::new(config.grid_size, config.anti_diagonals),
            current: Player::One,
            scores: Scores::new(),
            status: Status::InProgress,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player whose move it is. After the game ends this stays on
    /// whoever moved last.
    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Plays the line from `from` to `to` for the current player.
    ///
    /// Checks run in a fixed order, and the first failure wins:
    ///
    /// 1. the game must still be in progress ([`GameAlreadyOver`]),
    /// 2. the line must be horizontal, vertical or at 45°
    ///    ([`InvalidOrientation`]),
    /// 3. every unit step must name a segment of this board, and there
    ///    must be at least one ([`NoSegmentsFound`]),
    /// 4. no segment on the path may belong to the opponent
    ///    ([`BlockedByOpponent`]),
    /// 5. at least one segment on the path must still be undrawn
    ///    ([`AlreadyDrawn`]).
    ///
    /// On success the undrawn segments are drawn, closed triangles are
    /// settled under the configured [`ScoringRule`], and the turn passes
    /// to the opponent unless the mover claimed a triangle. Filling the
    /// last triangle ends the game; the result is decided purely by
    /// score.
    ///
    /// A rejected move changes nothing, including whose turn it is.
    ///
    /// [`GameAlreadyOver`]: MoveError::GameAlreadyOver
    /// [`InvalidOrientation`]: MoveError::InvalidOrientation
    /// [`NoSegmentsFound`]: MoveError::NoSegmentsFound
    /// [`BlockedByOpponent`]: MoveError::BlockedByOpponent
    /// [`AlreadyDrawn`]: MoveError::AlreadyDrawn
    pub fn attempt_move(&mut self, from: Dot, to: Dot) -> Result<MoveOutcome, MoveError> {
        if self.status != Status::InProgress {
            return Err(MoveError::GameAlreadyOver);
        }
        let path = self.board.line_segments(from, to)?;
        for &id in &path {
            if let Some(owner) = self.board.segment_owner(id) {
                if owner != self.current {
                    return Err(MoveError::BlockedByOpponent { segment: id });
                }
            }
        }
        let fresh: Vec<SegmentId> = path
            .iter()
            .copied()
            .filter(|&id| self.board.segment_owner(id).is_none())
            .collect();
        if fresh.is_empty() {
            return Err(MoveError::AlreadyDrawn);
        }

        for &id in &fresh {
            self.board.draw(id, self.current);
        }
        let completed = self.board.settle_triangles(self.current, self.config.scoring);
        let mut scored = false;
        for tri in &completed {
            if tri.status == TriangleStatus::Won(self.current) {
                self.scores.add_point(self.current);
                scored = true;
            }
        }

        let result = if self.board.is_complete() {
            Some(final_result(self.scores))
        } else {
            None
        };
        if let Some(result) = result {
            self.status = Status::GameOver(result);
        }
        let turn_switched = result.is_none() && !scored;
        if turn_switched {
            self.current = self.current.opponent();
        }

        Ok(MoveOutcome {
            drawn: fresh,
            completed,
            scores: self.scores,
            turn_switched,
            result,
        })
    }

    /// Throws away all progress and starts over with the same config.
    /// Player 1 moves first again.
    pub fn reset(&mut self) {
        *self = GameState::new(self.config);
    }

    /// Snapshots the game as the wire-friendly [`GameView`].
    pub fn to_view(&self) -> GameView {
        let drawn = self
            .board
            .segments()
            .iter()
            .filter_map(|(&id, &owner)| owner.map(|owner| DrawnSegment { id, owner }))
            .collect();
        let claimed = self
            .board
            .triangles()
            .iter()
            .filter(|t| t.status.is_filled())
            .map(|t| FilledTriangle {
                id: t.id,
                owner: t.status.owner(),
            })
            .collect();
        GameView {
            config: self.config,
            drawn,
            claimed,
            scores: self.scores,
            to_move: self.current,
        }
    }

    /// Rebuilds a game from a [`GameView`], e.g. on the client side of
    /// the wire protocol. The view is taken as authoritative.
    pub fn from_view(view: &GameView) -> Self {
        let mut board = Board::new(view.config.grid_size, view.config.anti_diagonals);
        for seg in &view.drawn {
            board.draw(seg.id, seg.owner);
        }
        for tri in &view.claimed {
            let status = match tri.owner {
                Some(player) => TriangleStatus::Won(player),
                None => TriangleStatus::Void,
            };
            board.restore_claim(tri.id, status);
        }
        #[cfg(debug_assertions)]
        {
            let mut recomputed = Scores::new();
            for tri in &view.claimed {
                if let Some(player) = tri.owner {
                    recomputed.add_point(player);
                }
            }
            debug_assert_eq!(recomputed, view.scores);
        }
        let status = if board.is_complete() {
            Status::GameOver(final_result(view.scores))
        } else {
            Status::InProgress
        };
        GameState {
            config: view.config,
            board,
            current: view.to_move,
            scores: view.scores,
            status,
        }
    }
}

fn final_result(scores: Scores) -> GameResult {
    match scores.leader() {
        Some(player) => GameResult::Won(player),
        None => GameResult::Draw,
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::MoveScript;
    use crate::seg;

    fn two_by_two(scoring: ScoringRule) -> GameState {
        GameState::new(GameConfig {
            grid_size: 2,
            anti_diagonals: true,
            scoring,
        })
    }

    fn scores(one: u32, two: u32) -> Scores {
        let mut scores = Scores::new();
        for _ in 0..one {
            scores.add_point(Player::One);
        }
        for _ in 0..two {
            scores.add_point(Player::Two);
        }
        scores
    }

    #[test]
    fn closing_a_triangle_scores_and_holds_the_turn() {
        let mut game = GameState::new(GameConfig::default());

        let outcome = game.attempt_move(Dot::new(0, 0), Dot::new(0, 1)).unwrap();
        assert_eq!(outcome.drawn, vec![seg!("H_0,0")]);
        assert!(outcome.completed.is_empty());
        assert!(outcome.turn_switched);
        assert_eq!(game.current_player(), Player::Two);

        game.attempt_move(Dot::new(0, 0), Dot::new(1, 0)).unwrap();
        assert_eq!(game.current_player(), Player::One);

        // The closing side wins the triangle under finisher-takes, even
        // though the opponent drew one of the other sides.
        let outcome = game.attempt_move(Dot::new(1, 0), Dot::new(0, 1)).unwrap();
        assert_eq!(outcome.drawn, vec![seg!("A_0,1")]);
        assert_eq!(outcome.completed.len(), 1);
        assert_eq!(outcome.completed[0].id.to_string(), "NW_0,0");
        assert_eq!(outcome.completed[0].status, TriangleStatus::Won(Player::One));
        assert_eq!(outcome.scores, scores(1, 0));
        assert!(!outcome.turn_switched);
        assert_eq!(game.current_player(), Player::One);
        assert_eq!(game.status(), Status::InProgress);
    }

    #[test]
    fn finisher_takes_game_runs_to_a_win() {
        let mut game = two_by_two(ScoringRule::FinisherTakes);

        game.attempt_move(Dot::new(0, 0), Dot::new(0, 1)).unwrap();
        game.attempt_move(Dot::new(0, 0), Dot::new(1, 0)).unwrap();
        // Player 1 closes NW and keeps the turn.
        let outcome = game.attempt_move(Dot::new(1, 0), Dot::new(0, 1)).unwrap();
        assert_eq!(outcome.scores, scores(1, 0));
        assert!(!outcome.turn_switched);
        // The extra move closes nothing, so the turn finally passes.
        let outcome = game.attempt_move(Dot::new(0, 0), Dot::new(1, 1)).unwrap();
        assert!(outcome.completed.is_empty());
        assert!(outcome.turn_switched);

        // Player 2 closes SW, keeps the turn, then closes NE and SE at
        // once with the last segment.
        let outcome = game.attempt_move(Dot::new(1, 0), Dot::new(1, 1)).unwrap();
        assert_eq!(outcome.scores, scores(1, 1));
        assert!(!outcome.turn_switched);
        let outcome = game.attempt_move(Dot::new(0, 1), Dot::new(1, 1)).unwrap();
        assert_eq!(outcome.completed.len(), 2);
        assert_eq!(outcome.scores, scores(1, 3));
        assert!(!outcome.turn_switched);
        assert_eq!(outcome.result, Some(GameResult::Won(Player::Two)));
        assert_eq!(game.status(), Status::GameOver(GameResult::Won(Player::Two)));
        assert!(game.board().is_complete());
    }

    #[test]
    fn sole_ownership_voids_mixed_triangles() {
        let mut game = two_by_two(ScoringRule::SoleOwnership);

        game.attempt_move(Dot::new(0, 0), Dot::new(0, 1)).unwrap();
        game.attempt_move(Dot::new(0, 0), Dot::new(1, 0)).unwrap();
        // Closing a mixed triangle scores nothing and does not hold the
        // turn.
        let outcome = game.attempt_move(Dot::new(1, 0), Dot::new(0, 1)).unwrap();
        assert_eq!(outcome.completed.len(), 1);
        assert_eq!(outcome.completed[0].status, TriangleStatus::Void);
        assert_eq!(outcome.scores, scores(0, 0));
        assert!(outcome.turn_switched);
        assert_eq!(game.current_player(), Player::Two);

        game.attempt_move(Dot::new(0, 0), Dot::new(1, 1)).unwrap();
        game.attempt_move(Dot::new(1, 0), Dot::new(1, 1)).unwrap();
        let outcome = game.attempt_move(Dot::new(0, 1), Dot::new(1, 1)).unwrap();
        assert_eq!(outcome.completed.len(), 2);
        assert!(outcome
            .completed
            .iter()
            .all(|t| t.status == TriangleStatus::Void));
        assert_eq!(outcome.result, Some(GameResult::Draw));
        assert_eq!(game.status(), Status::GameOver(GameResult::Draw));
        assert_eq!(game.scores(), scores(0, 0));
    }

    #[test]
    fn sole_ownership_rewards_unanimous_sides() {
        let mut game = GameState::new(GameConfig {
            grid_size: 3,
            anti_diagonals: true,
            scoring: ScoringRule::SoleOwnership,
        });

        game.attempt_move(Dot::new(0, 0), Dot::new(0, 1)).unwrap();
        game.attempt_move(Dot::new(2, 0), Dot::new(2, 1)).unwrap();
        game.attempt_move(Dot::new(0, 0), Dot::new(1, 0)).unwrap();
        game.attempt_move(Dot::new(2, 1), Dot::new(2, 2)).unwrap();
        let outcome = game.attempt_move(Dot::new(1, 0), Dot::new(0, 1)).unwrap();
        assert_eq!(outcome.completed[0].status, TriangleStatus::Won(Player::One));
        assert_eq!(outcome.scores, scores(1, 0));
        assert!(!outcome.turn_switched);
    }

    #[test]
    fn extending_your_own_line_draws_only_the_new_part() {
        let mut game = GameState::new(GameConfig::default());

        game.attempt_move(Dot::new(0, 0), Dot::new(0, 1)).unwrap();
        game.attempt_move(Dot::new(3, 0), Dot::new(3, 1)).unwrap();
        let outcome = game.attempt_move(Dot::new(0, 0), Dot::new(0, 3)).unwrap();
        assert_eq!(outcome.drawn, vec![seg!("H_0,1"), seg!("H_0,2")]);
    }

    #[test]
    fn redrawing_a_fully_drawn_path_is_rejected() {
        let mut game = GameState::new(GameConfig::default());

        game.attempt_move(Dot::new(0, 0), Dot::new(0, 2)).unwrap();
        game.attempt_move(Dot::new(3, 0), Dot::new(3, 1)).unwrap();
        assert_eq!(
            game.attempt_move(Dot::new(0, 1), Dot::new(0, 0)),
            Err(MoveError::AlreadyDrawn)
        );
        // The rejection does not consume the turn.
        assert_eq!(game.current_player(), Player::One);
    }

    #[test]
    fn paths_through_opponent_segments_are_blocked() {
        let mut game = GameState::new(GameConfig::default());

        game.attempt_move(Dot::new(0, 0), Dot::new(0, 1)).unwrap();
        assert_eq!(
            game.attempt_move(Dot::new(0, 0), Dot::new(0, 2)),
            Err(MoveError::BlockedByOpponent {
                segment: seg!("H_0,0")
            })
        );
        assert_eq!(game.current_player(), Player::Two);
    }

    #[test]
    fn decomposition_errors_come_before_conflict_errors() {
        let mut game = GameState::new(GameConfig::default());

        game.attempt_move(Dot::new(0, 0), Dot::new(0, 1)).unwrap();
        // The path starts on an opponent segment but also runs off the
        // board, and the off-board check fires first.
        assert_eq!(
            game.attempt_move(Dot::new(0, 0), Dot::new(0, 5)),
            Err(MoveError::NoSegmentsFound)
        );
        assert_eq!(
            game.attempt_move(Dot::new(0, 0), Dot::new(1, 2)),
            Err(MoveError::InvalidOrientation)
        );
    }

    #[test]
    fn finished_games_reject_further_moves_until_reset() {
        let mut game = two_by_two(ScoringRule::FinisherTakes);

        game.attempt_move(Dot::new(0, 0), Dot::new(0, 1)).unwrap();
        game.attempt_move(Dot::new(0, 0), Dot::new(1, 0)).unwrap();
        game.attempt_move(Dot::new(1, 0), Dot::new(0, 1)).unwrap();
        game.attempt_move(Dot::new(0, 0), Dot::new(1, 1)).unwrap();
        game.attempt_move(Dot::new(1, 0), Dot::new(1, 1)).unwrap();
        game.attempt_move(Dot::new(0, 1), Dot::new(1, 1)).unwrap();
        assert!(matches!(game.status(), Status::GameOver(_)));
        assert_eq!(
            game.attempt_move(Dot::new(0, 0), Dot::new(0, 1)),
            Err(MoveError::GameAlreadyOver)
        );

        game.reset();
        assert_eq!(game.status(), Status::InProgress);
        assert_eq!(game.current_player(), Player::One);
        assert_eq!(game.scores(), scores(0, 0));
        assert!(game.attempt_move(Dot::new(0, 0), Dot::new(0, 1)).is_ok());
    }

    #[test]
    fn views_round_trip_through_serde_and_back_into_a_game() {
        let mut game = GameState::new(GameConfig::default());
        game.attempt_move(Dot::new(0, 0), Dot::new(0, 1)).unwrap();
        game.attempt_move(Dot::new(0, 0), Dot::new(1, 0)).unwrap();
        game.attempt_move(Dot::new(1, 0), Dot::new(0, 1)).unwrap();

        let view = game.to_view();
        let json = serde_json::to_string(&view).unwrap();
        let parsed: GameView = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, view);

        let rebuilt = GameState::from_view(&parsed);
        assert_eq!(rebuilt.current_player(), game.current_player());
        assert_eq!(rebuilt.scores(), game.scores());
        assert_eq!(rebuilt.status(), game.status());
        assert_eq!(rebuilt.to_view(), view);
    }

    quickcheck! {
        fn random_play_upholds_the_scoring_invariants(script: MoveScript) -> bool {
            let mut game = GameState::new(script.config);
            let mut filled_before = 0;
            for (from, to) in script.moves {
                let over = game.status() != Status::InProgress;
                match game.attempt_move(from, to) {
                    Ok(outcome) => {
                        let filled = game.board().filled_triangles();
                        if filled != filled_before + outcome.completed.len()
                            || filled > game.board().total_triangles()
                        {
                            return false;
                        }
                        filled_before = filled;
                        let won = game
                            .board()
                            .triangles()
                            .iter()
                            .filter(|t| matches!(t.status, TriangleStatus::Won(_)))
                            .count() as u32;
                        if game.scores().get(Player::One) + game.scores().get(Player::Two) != won {
                            return false;
                        }
                        if outcome.result.is_some() != game.board().is_complete() {
                            return false;
                        }
                    }
                    Err(MoveError::GameAlreadyOver) => {
                        if !over {
                            return false;
                        }
                    }
                    Err(_) => {}
                }
            }
            true
        }

        fn views_always_rebuild_the_same_position(script: MoveScript) -> bool {
            let mut game = GameState::new(script.config);
            for (from, to) in script.moves {
                let _ = game.attempt_move(from, to);
            }
            let view = game.to_view();
            let rebuilt = GameState::from_view(&view);
            rebuilt.to_view() == view
                && rebuilt.scores() == game.scores()
                && rebuilt.status() == game.status()
        }
    }
}
