//! SkyGlitch headless demo: loads config, builds the world, and lets the autopilot fly
//! the mission at a fixed step.

use anyhow::{Context, Result};
use game::{Autopilot, GameConfig, SimPhase, Simulation};

/// Radar range used for the periodic status line.
const RADAR_RANGE: f32 = 2000.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════╗");
    println!("║                    SKYGLITCH                     ║");
    println!("╠══════════════════════════════════════════════════╣");
    println!("║  W/S  Pitch      A/D   Roll      Q/E  Yaw        ║");
    println!("║  Shift/Ctrl  Throttle    Space  Air brake        ║");
    println!("║  P  Pause        M  Mute                         ║");
    println!("╠══════════════════════════════════════════════════╣");
    println!("║  Headless demo: autopilot chases checkpoints     ║");
    println!("╚══════════════════════════════════════════════════╝");

    log::info!("Starting SkyGlitch");

    let config = GameConfig::load();
    config.validate().context("config.ron rejected")?;

    let step = 1.0 / config.simulation.fixed_hz;
    let demo_seconds = config.simulation.demo_seconds;
    let mut sim = Simulation::new(config)?;
    let autopilot = Autopilot::default();
    sim.start();

    let mut next_report = 0.0;
    while sim.mission().game_time < demo_seconds && !sim.phase().is_terminal() {
        let controls = autopilot.controls(sim.flight(), sim.world());
        sim.tick(&controls, step);
        if sim.take_glitch_sound() {
            log::debug!("Glitch sound cue");
        }

        let t = sim.mission().game_time;
        if t >= next_report {
            next_report += 10.0;
            let telemetry = sim.telemetry();
            log::info!(
                "T+{:>5.1}s  alt {:>6.0}  spd {:>4.0} km/h  hdg {:>3.0}  fuel {:>3.0}%  hull {:>3.0}%  threat {}  contacts {}",
                t,
                telemetry.altitude,
                telemetry.speed_kmh,
                telemetry.heading_deg,
                telemetry.fuel,
                telemetry.hull,
                telemetry.threat.label(),
                sim.radar_contacts(RADAR_RANGE).len()
            );
        }
    }

    let telemetry = sim.telemetry();
    let outcome = match sim.phase() {
        SimPhase::Terminal(_) => sim.phase().label(),
        _ => "TIME UP",
    };
    println!();
    println!("Mission {} after {:.1}s", outcome, telemetry.mission_time);
    println!(
        "  Checkpoints {}/{}  Score {}",
        telemetry.checkpoints_collected, telemetry.checkpoint_total, telemetry.score
    );
    println!(
        "  Fuel {:.0}%  Hull {:.0}%  Engine {:.0}%  Glitches {}",
        telemetry.fuel,
        telemetry.hull,
        telemetry.engine,
        sim.glitch().triggers
    );
    println!(
        "  Frames {}  Simulated {:.1}s  Log entries {}",
        sim.time().frame_count(),
        sim.time().elapsed_seconds(),
        sim.log().len()
    );

    Ok(())
}
