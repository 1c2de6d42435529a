//! Wave Blaster entry point
//!
//! Headless runner: the autopilot plays a seeded session and the result is
//! printed at the end. Frames can be dumped as JSON lines for an external
//! renderer.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use wave_blaster::Settings;
use wave_blaster::platform::{FixedRateClock, Frontend, Outcome, RunSummary, Session, Unpaced};
use wave_blaster::sim::{FrameSnapshot, GameState, TickInput};

#[derive(Parser)]
#[command(name = "wave-blaster")]
#[command(about = "Run a seeded Wave Blaster session headless")]
struct Args {
    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Beams per volley
    #[arg(long)]
    volley_size: Option<u32>,

    /// Pace the loop at the real tick rate
    #[arg(long)]
    realtime: bool,

    /// Write every frame to stdout as a JSON line
    #[arg(long)]
    snapshots: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

/// No window, no keyboard: input comes from the autopilot, frames
/// optionally go to stdout.
struct Headless<W: Write> {
    out: Option<W>,
}

impl<W: Write> Frontend for Headless<W> {
    fn poll_input(&mut self, _state: &GameState) -> TickInput {
        TickInput {
            idle_mode: true,
            ..Default::default()
        }
    }

    fn present(&mut self, frame: &FrameSnapshot) {
        for event in &frame.events {
            log::debug!("tick {}: {:?}", frame.tick, event);
        }
        let Some(out) = self.out.as_mut() else {
            return;
        };
        let written = serde_json::to_writer(&mut *out, frame)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(out));
        if let Err(e) = written {
            log::warn!("Dropping snapshot output: {e}");
            self.out = None;
        }
    }
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file {}", path.display()))?;
            Settings::from_json(&json)
                .with_context(|| format!("invalid settings file {}", path.display()))?
        }
        None => Settings::default(),
    };

    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if args.max_ticks.is_some() {
        settings.max_ticks = args.max_ticks;
    }
    if let Some(volley_size) = args.volley_size {
        settings.volley_size = volley_size;
    }
    settings.realtime |= args.realtime;
    // Nobody at the keyboard
    settings.idle_mode = true;
    Ok(settings.normalized())
}

fn run<W: Write>(settings: Settings, seed: u64, frontend: Headless<W>) -> RunSummary {
    if settings.realtime {
        let clock = FixedRateClock::new(settings.tick_duration());
        log::info!("Pacing at {:?} per tick", clock.period());
        Session::new(settings, seed, frontend, clock).run()
    } else {
        Session::new(settings, seed, frontend, Unpaced::default()).run()
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = load_settings(&args)?;
    if !settings.realtime && settings.max_ticks.is_none() {
        // An unpaced autopilot can otherwise run for a very long time
        settings.max_ticks = Some(30_000);
    }
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Wave Blaster starting with seed: {}", seed);

    let out = args.snapshots.then(|| BufWriter::new(io::stdout().lock()));
    let summary = run(settings, seed, Headless { out });

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("failed to encode summary")?
        );
        return Ok(());
    }

    let ending = match summary.outcome {
        Outcome::GameOver => "GAME OVER",
        Outcome::Quit => "QUIT",
        Outcome::TickLimit => "TICK LIMIT",
    };
    eprintln!();
    eprintln!("=== {ending} ===");
    eprintln!("  Seed:   {}", summary.seed);
    eprintln!("  Score:  {}", summary.score);
    eprintln!("  Wave:   {}", summary.wave);
    eprintln!("  Life:   {}", summary.life);
    eprintln!("  Ticks:  {}", summary.ticks);
    Ok(())
}
