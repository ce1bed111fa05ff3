//! Ice Runner headless driver
//!
//! Plays runs at a virtual 60 Hz with a simple autopilot on the jump button and
//! logs what the engine reports. Usage:
//!
//! `ice-runner [TUNING.json] [--runs N] [--seed S] [--dump]`

use anyhow::{Context, Result, bail};

use ice_runner::platform::input::JUMP_KEY;
use ice_runner::platform::{InputRouter, RawInput};
use ice_runner::sim::FrameSnapshot;
use ice_runner::ui::{Screen, UiAction};
use ice_runner::{Game, GameEvent, Tuning};

const FRAME_MS: f64 = 1000.0 / 60.0;
/// Ten minutes of play
const MAX_FRAMES: u64 = 60 * 60 * 10;

#[derive(Debug, Default)]
struct Args {
    tuning: Option<String>,
    runs: u32,
    seed: Option<u64>,
    dump: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        runs: 1,
        ..Default::default()
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--runs" => {
                let value = iter.next().context("--runs needs a value")?;
                args.runs = value.parse().with_context(|| format!("bad --runs `{value}`"))?;
            }
            "--seed" => {
                let value = iter.next().context("--seed needs a value")?;
                args.seed = Some(value.parse().with_context(|| format!("bad --seed `{value}`"))?);
            }
            "--dump" => args.dump = true,
            flag if flag.starts_with("--") => bail!("unknown flag `{flag}`"),
            path => args.tuning = Some(path.to_string()),
        }
    }
    Ok(args)
}

/// Press when the nearest obstacle ahead is about to reach the runner
fn autopilot_wants_jump(snapshot: &FrameSnapshot, lead_px: f32) -> bool {
    let c = &snapshot.character;
    snapshot.obstacles.iter().any(|o| {
        let gap = o.origin.x - c.pos.x;
        !o.falling && gap > 0.0 && gap < lead_px
    })
}

fn play_run(game: &mut Game, router: &mut InputRouter, now: &mut f64) -> Option<FrameSnapshot> {
    router.attach(game.start_run());
    let mut last_snapshot = None;
    let mut held = false;

    for _ in 0..MAX_FRAMES {
        *now += FRAME_MS;
        let frame = game.frame(*now);

        let mut back_at_menu = false;
        for event in &frame.events {
            match event {
                GameEvent::RunStarted { seed } => log::info!("Run started (seed {seed})"),
                GameEvent::Spawned(kind) => log::debug!("Spawned {}", kind.as_str()),
                GameEvent::Died { distance, obstacle } => {
                    log::info!("Hit a {} at distance {}", obstacle.as_str(), distance)
                }
                GameEvent::HandedOff => log::info!("Death screen"),
                GameEvent::Ui(UiAction::ShowScreen(Screen::Menu)) => back_at_menu = true,
                GameEvent::Ui(action) => log::debug!("UI: {:?}", action),
            }
        }

        if let Some(snapshot) = frame.snapshot {
            let lead = game.session().map_or(0.0, |s| s.scroll_speed()) * 12.0;
            let want = autopilot_wants_jump(&snapshot, lead.max(60.0));
            if want != held {
                let event = if want {
                    RawInput::KeyDown {
                        key: JUMP_KEY.to_string(),
                        repeat: false,
                    }
                } else {
                    RawInput::KeyUp {
                        key: JUMP_KEY.to_string(),
                    }
                };
                router.handle(game, &event);
                held = want;
            }
            last_snapshot = Some(snapshot);
        }

        if back_at_menu {
            break;
        }
    }

    last_snapshot
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path).with_context(|| format!("loading tuning from {path}"))?,
        None => Tuning::default(),
    };

    log::info!("Ice Runner (headless) starting...");
    let mut game = Game::new(tuning, 800.0, 600.0);
    if let Some(seed) = args.seed {
        game = game.with_seed(seed);
    }

    let mut router = InputRouter::new();
    let mut now = 0.0;
    let mut best = 0;

    for run in 1..=args.runs {
        let Some(snapshot) = play_run(&mut game, &mut router, &mut now) else {
            continue;
        };
        best = best.max(snapshot.distance);
        println!("run {run}: distance {}", snapshot.distance);

        if args.dump {
            let json = serde_json::to_string_pretty(&snapshot).context("serializing snapshot")?;
            println!("{json}");
        }
    }

    println!("best distance: {best}");
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `Game` directly; nothing to run here
}
