//! botsim - headless reference host for the automation kernel.
//!
//! Runs the gathering routine against a small block-grid world at a fixed
//! tick rate, forwarding the routine's trace events to `tracing`. A scripted
//! hazard can be injected to exercise the safety/recovery path.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use bot_aim::AimScheduler;
use bot_behave::{GatherConfig, GatherRoutine, Toggle};
use bot_core::{ActionQueue, TickContext};

mod layout;
mod world;

use layout::load_layout;
use world::SimWorld;

const AGENT: u64 = 1;

#[derive(Parser)]
#[command(name = "botsim", about = "Headless gathering simulation", version)]
struct Args {
    /// Maximum number of simulation ticks
    #[arg(long, default_value_t = 2000)]
    ticks: u64,

    /// Milliseconds of simulated time per tick
    #[arg(long, default_value_t = 50.0)]
    tick_ms: f32,

    /// JSON world layout; a built-in demo field is used when omitted
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Apply hazard damage at this tick (exercises the recovery path)
    #[arg(long)]
    hazard_tick: Option<u64>,

    /// Damage dealt by the hazard
    #[arg(long, default_value_t = 12.0)]
    hazard_damage: f32,

    /// Print a JSON run summary on exit
    #[arg(long)]
    summary_json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(serde::Serialize)]
struct RunSummary {
    ticks: u64,
    mined: u32,
    final_state: String,
    health: f32,
    ore_remaining: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    fmt().with_env_filter(filter).with_target(false).init();

    let mut world = match &args.layout {
        Some(path) => SimWorld::from_layout(&load_layout(path)?),
        None => SimWorld::demo(),
    };

    let mut routine = GatherRoutine::new(GatherConfig::default());
    let mut queue = ActionQueue::new();
    let mut aim = AimScheduler::new();

    let start = TickContext::new(0, args.tick_ms);
    routine.set_enabled(true, &start, AGENT, &mut world, &mut queue, &mut aim);

    let mut ticks_run = 0;
    for tick in 0..args.ticks {
        let ctx = TickContext::new(tick, args.tick_ms);

        if args.hazard_tick == Some(tick) {
            warn!(tick, damage = args.hazard_damage, "hazard triggered");
            world.damage(AGENT, args.hazard_damage);
        }

        routine.tick(&ctx, AGENT, &mut world, &mut queue, &mut aim);
        queue.tick(&ctx, AGENT, &mut world);
        queue.evaluate(&ctx, AGENT, &mut world);
        aim.process(&ctx, AGENT, &mut world);
        world.step(args.tick_ms);

        for event in routine.drain_trace() {
            match event.tag.as_ref() {
                "gather.safety" => {
                    warn!(tick = event.tick, health = event.a, "safety check tripped")
                }
                "gather.mined" => info!(tick = event.tick, total = event.a, "deposit cleared"),
                tag => debug!(tick = event.tick, a = event.a, b = event.b, "{tag}"),
            }
        }

        ticks_run = tick + 1;
        if routine.toggle() == Toggle::Disabled {
            break;
        }
    }

    info!(
        ticks = ticks_run,
        mined = routine.mined(),
        state = ?routine.state(),
        "run complete"
    );

    if args.summary_json {
        let summary = RunSummary {
            ticks: ticks_run,
            mined: routine.mined(),
            final_state: format!("{:?}", routine.state()),
            health: world.agent_health(),
            ore_remaining: world.ore_remaining(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
