mod ascii_renderer;
mod autopilot;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use snake_engine::config::{ConfigManager, FileContentConfigProvider, GameConfig, YamlConfigSerializer};
use snake_engine::{log, logger, Direction, Game, GameError, GameState, SessionRng};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::LocalSet;
use tokio::time::{interval, sleep, MissedTickBehavior};

use ascii_renderer::AsciiRenderer;
use autopilot::Autopilot;

#[derive(Parser)]
#[command(name = "snake_headless")]
struct Args {
    /// YAML game config. A missing file means default settings.
    #[arg(long)]
    config: Option<String>,

    /// Seed for food placement and the autopilot; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 30)]
    duration_secs: u64,

    #[arg(long)]
    use_log_prefix: bool,

    /// Do not draw the arena.
    #[arg(long)]
    quiet: bool,

    /// Steer with w/a/s/d lines on stdin instead of the autopilot.
    #[arg(long)]
    keys: bool,
}

fn load_config(path: Option<&str>) -> Result<GameConfig, String> {
    match path {
        Some(path) => {
            let manager: ConfigManager<FileContentConfigProvider, GameConfig, YamlConfigSerializer> =
                ConfigManager::from_yaml_file(path);
            manager.get_config()
        }
        None => Ok(GameConfig::default()),
    }
}

fn directions_from_line(line: &str) -> Vec<Direction> {
    line.chars().filter_map(Direction::from_key).collect()
}

struct SessionSummary {
    rounds: Vec<usize>,
    final_score: usize,
}

async fn run(args: &Args, config: GameConfig) -> Result<SessionSummary, GameError> {
    let seed = args.seed.unwrap_or_else(|| SessionRng::from_random().seed());
    let mut game = Game::new(&config, AsciiRenderer::new(args.quiet), SessionRng::new(seed))?;
    let mut autopilot = Autopilot::new(SessionRng::new(seed.wrapping_add(1)));
    game.resize(42, 22);

    // Restarting from inside a state listener would re-enter the state manager.
    let round_over = Rc::new(Cell::new(false));
    {
        let round_over = Rc::clone(&round_over);
        game.state_manager().register_state_listener(move |state| {
            if state == GameState::EndGame {
                round_over.set(true);
            }
        });
    }

    game.start();
    game.reset();

    let mut steering = interval(game.logic_period());
    steering.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let deadline = sleep(Duration::from_secs(args.duration_secs));
    tokio::pin!(deadline);

    let mut keys = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = args.keys;

    let mut rounds = Vec::new();
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = steering.tick() => {
                if round_over.replace(false) {
                    log!("Round {} over with score {}, restarting", rounds.len() + 1, game.score());
                    rounds.push(game.score());
                    game.reset();
                    continue;
                }
                if args.keys {
                    continue;
                }
                let next = autopilot.calculate_move(&game.world().borrow());
                if let Some(direction) = next {
                    game.steer(direction)?;
                }
            }
            line = keys.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => {
                        for direction in directions_from_line(&line) {
                            game.steer(direction)?;
                        }
                    }
                    Ok(None) => stdin_open = false,
                    Err(e) => {
                        log!("Stopped reading keys: {}", e);
                        stdin_open = false;
                    }
                }
            }
        }
    }

    let final_score = game.score();
    log!("Drew {} distinct frames", game.renderer().frames_drawn());
    game.destroy();
    Ok(SessionSummary { rounds, final_score })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Headless".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = load_config(args.config.as_deref())
        .inspect_err(|e| log!("Failed to load config: {}", e))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let summary = LocalSet::new().block_on(&runtime, run(&args, config));
    // A pending stdin read cannot be cancelled, so do not wait for it.
    runtime.shutdown_background();
    let summary = summary?;

    log!("Finished {} rounds: {:?}", summary.rounds.len(), summary.rounds);
    println!("Final score: {}", summary.final_score);
    Ok(())
}
