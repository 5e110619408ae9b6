//! Ferris Road headless runner
//!
//! Drives a session with a simple look-ahead autopilot and prints the result.
//! Usage: `ferris-road [seed] [max_ticks] [config.json]`

use ferris_road::WorldConfig;
use ferris_road::consts::TICK_RATE_HZ;
use ferris_road::sim::{GameEvent, GameSession, SessionState, TickInput, tick};

/// Ticks the autopilot simulates ahead before committing to an input
const LOOKAHEAD_TICKS: u32 = 24;

/// One minute of play when no tick limit is given
const DEFAULT_MAX_TICKS: u64 = TICK_RATE_HZ as u64 * 60;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(12345);
    let max_ticks: u64 = args
        .next()
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(DEFAULT_MAX_TICKS);
    let config = match args.next() {
        Some(path) => WorldConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => WorldConfig::default(),
    };

    log::info!("Ferris Road (headless) starting, seed {}", seed);
    let mut session = GameSession::new(config, seed)?;

    let mut ticks = 0;
    while ticks < max_ticks {
        let input = autopilot(&session);
        let scene = tick(&mut session, &input)?;
        ticks += 1;

        for event in &scene.events {
            match event {
                GameEvent::SessionStarted => log::debug!("Run started"),
                GameEvent::GameOverEntered { score, cause } => {
                    log::info!("Run ended at tick {}: {:?}, score {}", ticks, cause, score);
                }
            }
        }
        if scene.state == SessionState::GameOver {
            break;
        }
    }

    let summary = serde_json::json!({
        "seed": seed,
        "ticks": ticks,
        "score": session.score(),
        "game_over": session.is_game_over(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Pick this tick's input: step up when it looks survivable, otherwise wait,
/// otherwise sidestep. Keys are released whenever the latch is closed.
fn autopilot(session: &GameSession) -> TickInput {
    if !session.player.can_move {
        return TickInput::default();
    }
    let options = [
        TickInput::up(),
        TickInput::default(),
        TickInput::left(),
        TickInput::right(),
    ];
    options
        .into_iter()
        .find(|input| survives(session, input))
        .unwrap_or_default()
}

fn survives(session: &GameSession, input: &TickInput) -> bool {
    let mut probe = session.clone();
    if tick(&mut probe, input).is_err() {
        return false;
    }
    for _ in 0..LOOKAHEAD_TICKS {
        if probe.is_game_over() {
            return false;
        }
        if tick(&mut probe, &TickInput::default()).is_err() {
            return false;
        }
    }
    !probe.is_game_over()
}
