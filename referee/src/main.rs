use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use referee::{play_game, Contestant, GameOutcome, PlayerConfig, Recorder};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use trigon::{GameConfig, ScoringRule};

#[derive(Parser)]
struct Args {
    /// Paths to the config JSON files of the two players
    #[clap(num_args(2), value_delimiter = ' ')]
    player_configs: Vec<PathBuf>,

    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Dots per side of the board
    #[arg(short, long, default_value_t = 4)]
    grid_size: u8,

    /// Play the two-triangles-per-cell variant, without ╱ diagonals
    #[arg(long, default_value_t = false)]
    no_anti_diagonals: bool,

    /// Score only unanimously owned triangles; mixed ones are voided
    #[arg(long, default_value_t = false)]
    strict_scoring: bool,

    /// Stop the match as soon as one player makes an illegal move
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_move: bool,

    /// Record the games' interactions as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct MatchScore {
    wins: [usize; 2],
    illegal_moves: [usize; 2],
    ties: usize,
}

fn play_match(
    client_1: &mut Contestant,
    client_2: &mut Contestant,
    config: GameConfig,
    num_games: usize,
    rng: &mut StdRng,
    stop_on_illegal_move: bool,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<MatchScore> {
    let nicks = [client_1.nick.clone(), client_2.nick.clone()];
    let mut match_score = MatchScore::default();

    for game_idx in 0..num_games {
        match play_game(rng, config, client_1, client_2, recorder)? {
            GameOutcome::WonByClient { client_idx } => {
                debug!(winner = nicks[client_idx], game_idx);
                match_score.wins[client_idx] += 1;
            }
            GameOutcome::Tie => {
                debug!(game_idx, "Tie");
                match_score.ties += 1;
            }
            GameOutcome::IllegalMoveByClient { client_idx, err } => {
                info!(
                    player = nicks[client_idx],
                    game_idx,
                    "Illegal move by player: {}",
                    err
                );
                if stop_on_illegal_move {
                    break;
                } else {
                    match_score.wins[1 - client_idx] += 1;
                    match_score.illegal_moves[client_idx] += 1;
                }
            }
        }
    }

    let paren_1 = if match_score.illegal_moves[1] > 0 {
        format!(
            " ({} through illegal moves by {})",
            match_score.illegal_moves[1], nicks[1]
        )
    } else {
        String::new()
    };
    let paren_2 = if match_score.illegal_moves[0] > 0 {
        format!(
            " ({} through illegal moves by {})",
            match_score.illegal_moves[0], nicks[0]
        )
    } else {
        String::new()
    };
    eprintln!(
        "End result:\n- {} wins by {}{}\n- {} wins by {}{}\n- {} ties",
        match_score.wins[0],
        nicks[0],
        paren_1,
        match_score.wins[1],
        nicks[1],
        paren_2,
        match_score.ties
    );

    Ok(match_score)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    anyhow::ensure!(args.grid_size >= 2, "The grid needs at least 2x2 dots");
    let config = GameConfig {
        grid_size: args.grid_size,
        anti_diagonals: !args.no_anti_diagonals,
        scoring: if args.strict_scoring {
            ScoringRule::SoleOwnership
        } else {
            ScoringRule::FinisherTakes
        },
    };

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let player_configs = args
        .player_configs
        .iter()
        .map(|path| PlayerConfig::load(path))
        .collect::<Result<Vec<PlayerConfig>, anyhow::Error>>()?;

    let mut client_1 = Contestant::from_config(&player_configs[0])?;
    let mut client_2 = Contestant::from_config(&player_configs[1])?;

    play_match(
        &mut client_1,
        &mut client_2,
        config,
        args.num_games,
        &mut rng,
        args.stop_on_illegal_move,
        &mut recorder,
    )?;

    client_1.send_bye()?;
    client_2.send_bye()?;

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
