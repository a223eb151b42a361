use trigon::{GameConfig, GameView, Okay, Player, ProposedLine, Request};

/// A trait to simplify writing clients.
pub trait Client {
    /// Called once per game, before any move. `seat` is the player this
    /// client moves for; player 1 always moves first.
    fn new_game(&mut self, seat: Player, config: GameConfig);

    /// Called whenever it is this client's turn, including extra turns
    /// earned by claiming a triangle.
    fn propose_line(&mut self, view: GameView) -> ProposedLine;

    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let mut stdin = std::io::stdin().lock();
        let mut stdout = std::io::stdout().lock();
        let mut buf = String::new();

        loop {
            // Read the next line into buf
            buf.clear(); // because stdin.read_line() appends to the buffer
            use std::io::BufRead;
            let num_bytes_read = stdin.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the referee has exited.
                break Ok(());
            }

            let req = serde_json::from_str::<Request>(buf.trim_end())?;

            match req {
                Request::NewGame { seat, config } => {
                    self.new_game(seat, config);
                    serde_json::to_writer(&mut stdout, &Okay())?;
                }
                Request::PlayTurn { view } => {
                    serde_json::to_writer(&mut stdout, &self.propose_line(view))?
                }
                Request::Bye => break Ok(()),
            }
            use std::io::Write;
            writeln!(stdout)?;
            stdout.flush()?;
        }
    }
}
