use std::path::PathBuf;

use clap::Parser;
use trigon::{GameConfig, GameView, Player, ProposedLine};
use trigon_client_utils::Client;

#[derive(Parser)]
struct Args {
    /// Path to a JSON file with the lines to play, in order
    script: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let contents = std::fs::read_to_string(&args.script)?;
    let lines: Vec<ProposedLine> = serde_json::from_str(&contents)?;

    ScriptedClient { lines, next: 0 }.run()
}

/// Replays a fixed list of lines, one per turn, restarting from the top
/// on every new game. A deterministic peer for exercising the referee.
struct ScriptedClient {
    lines: Vec<ProposedLine>,
    next: usize,
}

impl Client for ScriptedClient {
    fn new_game(&mut self, _seat: Player, _config: GameConfig) {
        self.next = 0;
    }

    fn propose_line(&mut self, _view: GameView) -> ProposedLine {
        let line = *self
            .lines
            .get(self.next)
            .expect("The script ran out of lines");
        self.next += 1;
        line
    }
}
