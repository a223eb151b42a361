use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use trigon::{
    visualize_board, GameConfig, GameResult, GameState, MoveError, Okay, Player, ProposedLine,
    Request,
};

use crate::client::Contestant;
use crate::recording::Recorder;

pub enum GameOutcome {
    WonByClient { client_idx: usize },
    Tie,
    IllegalMoveByClient { client_idx: usize, err: MoveError },
}

/// Plays one full game between the two clients.
///
/// The referee holds the authoritative [`GameState`]; the clients only
/// ever see [`GameView`](trigon::GameView) snapshots. An illegal
/// proposal ends the game as a [`GameOutcome::IllegalMoveByClient`]
/// instead of being retried.
///
/// Returns an error only on communication failure, not when an illegal
/// line is proposed.
pub fn play_game(
    rng: &mut StdRng,
    config: GameConfig,
    client_1: &mut Contestant,
    client_2: &mut Contestant,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameOutcome> {
    // Assign the seats randomly. Seat one always moves first.
    let [seat_1, seat_2] = {
        let mut arr = [Player::One, Player::Two];
        arr.shuffle(rng);
        arr
    };
    let mut clients = [(client_1, seat_1), (client_2, seat_2)];

    // Inform the clients about the new game, so that they can reset their state
    for (client, seat) in clients.iter_mut() {
        let _: Okay = client.perform_request(recorder, &Request::NewGame { seat: *seat, config })?;
    }

    let mut game = GameState::new(config);
    let outcome = loop {
        let to_move = game.current_player();
        let client_idx = if clients[0].1 == to_move { 0 } else { 1 };
        let (client, _) = &mut clients[client_idx];
        let req = Request::PlayTurn {
            view: game.to_view(),
        };
        let line: ProposedLine = client.perform_request(recorder, &req)?;
        match game.attempt_move(line.from, line.to) {
            Ok(outcome) => {
                tracing::debug!(
                    client = client.nick,
                    from = %line.from,
                    to = %line.to,
                    claimed = outcome.completed.len(),
                    scores = %outcome.scores,
                );
                tracing::trace!("board:\n{}", visualize_board(game.board()));
                if let Some(result) = outcome.result {
                    break match result {
                        GameResult::Won(seat) => GameOutcome::WonByClient {
                            client_idx: if clients[0].1 == seat { 0 } else { 1 },
                        },
                        GameResult::Draw => GameOutcome::Tie,
                    };
                }
            }
            Err(err) => break GameOutcome::IllegalMoveByClient { client_idx, err },
        }
    };

    if let Some(rec) = recorder {
        rec.write_game_recording()?;
    }
    Ok(outcome)
}
