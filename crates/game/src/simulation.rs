//! Tick orchestrator: owns the aircraft, the world, the clock, and the mission, and
//! advances them one frame at a time.
//!
//! A running tick always executes input, dynamics, world interaction, and resources in
//! that order. Once a tick starts it finishes even if the mission ends part way through.

use anyhow::{Context, Result};
use engine_core::{FlightEvent, FlightState, Time, Vec3};
use hecs::World;
use input::{FlightControls, InputMapper};
use physics::{apply_resources, integrate};
use procgen::WorldLayout;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::camera::ChaseCamera;
use crate::config::{GameConfig, SimulationConfig};
use crate::effects::{hull_damage_glitch, AmbientParticles, GlitchPulse};
use crate::mission_log::MissionLog;
use crate::telemetry::{radar_contacts, AudioMix, RadarContact, TelemetrySnapshot};
use crate::world_interaction::interact;

/// Why the mission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalReason {
    MissionComplete,
    MissionFailed,
}

/// Simulation lifecycle. `Terminal` is never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimPhase {
    Loading,
    Running,
    Paused,
    Terminal(TerminalReason),
}

impl SimPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading => "LOADING",
            Self::Running => "RUNNING",
            Self::Paused => "PAUSED",
            Self::Terminal(TerminalReason::MissionComplete) => "COMPLETE",
            Self::Terminal(TerminalReason::MissionFailed) => "FAILED",
        }
    }
}

/// Mission progress.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionState {
    /// Seconds of running (unpaused) mission time.
    pub game_time: f32,
    pub score: u32,
    pub checkpoints_collected: u32,
    pub checkpoint_total: u32,
    pub phase: SimPhase,
}

impl MissionState {
    pub fn new(checkpoint_total: u32) -> Self {
        Self {
            game_time: 0.0,
            score: 0,
            checkpoints_collected: 0,
            checkpoint_total,
            phase: SimPhase::Loading,
        }
    }

    /// True once every checkpoint is in. A mission without checkpoints is never complete.
    pub fn all_collected(&self) -> bool {
        self.checkpoint_total > 0 && self.checkpoints_collected >= self.checkpoint_total
    }
}

/// Aircraft at its configured spawn point, nose along -Z.
pub fn spawn_flight(config: &SimulationConfig) -> FlightState {
    let position = Vec3::new(0.0, config.spawn_altitude, 0.0);
    let mut flight = FlightState::new(position, Vec3::ZERO).with_throttle(config.spawn_throttle);
    flight.velocity = flight.orientation.forward() * config.spawn_speed;
    flight.refresh_telemetry(flight.speed());
    flight
}

/// The whole flight session.
pub struct Simulation<R = StdRng> {
    config: GameConfig,
    mapper: InputMapper,
    flight: FlightState,
    world: World,
    rng: R,
    time: Time,
    mission: MissionState,
    log: MissionLog,
    particles: AmbientParticles,
    glitch: GlitchPulse,
    camera: ChaseCamera,
    muted: bool,
    seed: u64,
}

impl Simulation<StdRng> {
    /// Validate `config`, generate the world from its seed, and spawn the aircraft.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate().context("cannot build simulation")?;
        let seed = config.simulation.seed;
        let layout = WorldLayout::generate(seed, &config.world);
        let flight = spawn_flight(&config.simulation);
        // Hazard rolls get their own stream so the layout stays independent of them
        let rng = StdRng::seed_from_u64(seed.wrapping_add(1));
        Ok(Self::from_parts(config, layout, flight, rng))
    }
}

impl<R: Rng> Simulation<R> {
    /// Assemble a simulation from prepared pieces. Used by tests and scripted scenarios.
    pub fn from_parts(config: GameConfig, layout: WorldLayout, flight: FlightState, mut rng: R) -> Self {
        let particles = AmbientParticles::new(config.world.particles, config.world.size, &mut rng);
        let camera = ChaseCamera::behind(&flight);
        Self {
            mapper: InputMapper::new(config.controls.clone()),
            time: Time::new(config.simulation.max_dt),
            mission: MissionState::new(layout.checkpoint_count),
            world: layout.world,
            seed: layout.seed,
            flight,
            rng,
            log: MissionLog::new(),
            particles,
            glitch: GlitchPulse::default(),
            camera,
            muted: false,
            config,
        }
    }

    /// Leave `Loading`. Does nothing in any other phase.
    pub fn start(&mut self) -> Vec<FlightEvent> {
        if self.mission.phase != SimPhase::Loading {
            return Vec::new();
        }
        self.mission.phase = SimPhase::Running;
        log::info!(
            "Mission start: seed {}, {} checkpoints",
            self.seed,
            self.mission.checkpoint_total
        );
        let events = vec![FlightEvent::MissionStarted];
        self.record(&events);
        events
    }

    /// Flip between `Running` and `Paused`.
    pub fn toggle_pause(&mut self) -> Option<FlightEvent> {
        let event = self.flip_pause()?;
        self.log.record(self.mission.game_time, &event);
        Some(event)
    }

    pub fn toggle_mute(&mut self) -> FlightEvent {
        let event = self.flip_mute();
        self.log.record(self.mission.game_time, &event);
        event
    }

    fn flip_pause(&mut self) -> Option<FlightEvent> {
        match self.mission.phase {
            SimPhase::Running => {
                self.mission.phase = SimPhase::Paused;
                Some(FlightEvent::Paused)
            }
            SimPhase::Paused => {
                self.mission.phase = SimPhase::Running;
                Some(FlightEvent::Resumed)
            }
            SimPhase::Loading | SimPhase::Terminal(_) => None,
        }
    }

    fn flip_mute(&mut self) -> FlightEvent {
        self.muted = !self.muted;
        FlightEvent::AudioToggled { muted: self.muted }
    }

    /// Advance one frame by `raw_dt` seconds. Returns the events fired this tick; they
    /// are also written to the mission log.
    pub fn tick(&mut self, controls: &FlightControls, raw_dt: f32) -> Vec<FlightEvent> {
        let dt = self.time.advance(raw_dt);
        let mut events = Vec::new();

        if controls.toggle_pause {
            events.extend(self.flip_pause());
        }
        if controls.toggle_mute {
            events.push(self.flip_mute());
        }

        self.glitch.update(dt);
        if self.mission.phase == SimPhase::Running {
            self.step(controls, dt, &mut events);
        }

        self.camera.update(&self.flight, dt);
        self.log.update(dt);
        for event in &events {
            if matches!(event, FlightEvent::GlitchTriggered { .. }) {
                self.glitch.trigger(&mut self.rng);
            }
        }
        self.record(&events);
        events
    }

    fn step(&mut self, controls: &FlightControls, dt: f32, events: &mut Vec<FlightEvent>) {
        self.mission.game_time += dt;

        self.mapper.apply(controls, &mut self.flight, dt);
        integrate(&mut self.flight, &self.config.flight, dt);

        let report = interact(
            &mut self.flight,
            &mut self.world,
            &self.config.interaction,
            &mut self.rng,
            dt,
            events,
        );
        self.credit_checkpoints(report.collected.len() as u32);
        if self.mission.all_collected() {
            self.enter_terminal(TerminalReason::MissionComplete, events);
        }

        apply_resources(&mut self.flight, &self.config.flight, dt, events);
        hull_damage_glitch(
            &self.flight,
            self.config.interaction.damage_glitch_hull,
            self.config.interaction.damage_glitch_chance,
            &mut self.rng,
            dt,
            events,
        );
        if self.flight.hull.is_empty() {
            self.enter_terminal(TerminalReason::MissionFailed, events);
        }

        self.particles.update(dt, &mut self.rng);
    }

    fn credit_checkpoints(&mut self, count: u32) {
        let remaining = self.mission.checkpoint_total.saturating_sub(self.mission.checkpoints_collected);
        let credited = count.min(remaining);
        self.mission.checkpoints_collected += credited;
        self.mission.score += credited * self.config.interaction.checkpoint_score;
    }

    /// First terminal transition wins; later calls are ignored.
    fn enter_terminal(&mut self, reason: TerminalReason, events: &mut Vec<FlightEvent>) {
        if self.mission.phase.is_terminal() {
            return;
        }
        self.mission.phase = SimPhase::Terminal(reason);
        log::info!(
            "Mission over ({:?}) at T+{:.1}s, score {}",
            reason,
            self.mission.game_time,
            self.mission.score
        );
        events.push(match reason {
            TerminalReason::MissionComplete => FlightEvent::MissionComplete,
            TerminalReason::MissionFailed => FlightEvent::MissionFailed,
        });
    }

    fn record(&mut self, events: &[FlightEvent]) {
        for event in events {
            self.log.record(self.mission.game_time, event);
        }
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::capture(&self.flight, &self.mission)
    }

    pub fn radar_contacts(&self, range: f32) -> Vec<RadarContact> {
        radar_contacts(&self.world, self.flight.position, range)
    }

    pub fn audio_mix(&self) -> AudioMix {
        AudioMix::from_flight(&self.flight, self.muted)
    }

    pub fn flight(&self) -> &FlightState {
        &self.flight
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn mission(&self) -> &MissionState {
        &self.mission
    }

    pub fn phase(&self) -> SimPhase {
        self.mission.phase
    }

    pub fn log(&self) -> &MissionLog {
        &self.log
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn camera(&self) -> &ChaseCamera {
        &self.camera
    }

    pub fn glitch(&self) -> &GlitchPulse {
        &self.glitch
    }

    /// Take the pending glitch sound request, if any.
    pub fn take_glitch_sound(&mut self) -> bool {
        self.glitch.take_sound_cue()
    }

    pub fn particles(&self) -> &AmbientParticles {
        &self.particles
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{FlightConfig, Placement, REFERENCE_HZ};
    use procgen::spawn_checkpoint;
    use rand::rngs::mock::StepRng;

    const FRAME: f32 = 1.0 / REFERENCE_HZ;

    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.world.particles = 16;
        config
    }

    fn still_air() -> FlightConfig {
        FlightConfig {
            gravity: 0.0,
            lift_coefficient: 0.0,
            drag_coefficient: 0.0,
            ..FlightConfig::default()
        }
    }

    /// World with a single checkpoint far from the action.
    fn far_checkpoint_world() -> WorldLayout {
        let mut world = World::new();
        spawn_checkpoint(&mut world, 0, Vec3::new(1.0e6, 1000.0, 0.0));
        WorldLayout::from_world(world)
    }

    fn running<R: Rng>(mut sim: Simulation<R>) -> Simulation<R> {
        sim.start();
        sim
    }

    #[test]
    fn new_builds_a_ready_mission() {
        let sim = Simulation::new(quiet_config()).unwrap();
        assert_eq!(sim.phase(), SimPhase::Loading);
        assert_eq!(sim.mission().checkpoint_total, 10);
        assert_eq!(sim.flight().position, Vec3::new(0.0, 800.0, 0.0));
        assert!((sim.flight().velocity - Vec3::new(0.0, 0.0, -80.0)).length() < 1e-4);
        assert_eq!(sim.flight().throttle.value(), 60.0);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut config = quiet_config();
        config.world.checkpoints = 0;
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn loading_ticks_do_nothing_and_start_fires_once() {
        let mut sim = Simulation::new(quiet_config()).unwrap();
        let before = sim.flight().position;
        sim.tick(&FlightControls::default(), FRAME);
        assert_eq!(sim.flight().position, before);
        assert_eq!(sim.mission().game_time, 0.0);

        assert_eq!(sim.start(), vec![FlightEvent::MissionStarted]);
        assert!(sim.start().is_empty());
        assert_eq!(sim.phase(), SimPhase::Running);
        assert_eq!(sim.log().last().unwrap().text, "SYSTEMS ONLINE - MISSION START");
    }

    #[test]
    fn ground_impact_scenario() {
        let mut config = quiet_config();
        config.flight = still_air();
        config.simulation.max_dt = 0.5;
        let flight = FlightState::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -20.0, 0.0));
        let mut sim = running(Simulation::from_parts(
            config,
            far_checkpoint_world(),
            flight,
            StepRng::new(u64::MAX, 0),
        ));

        let events = sim.tick(&FlightControls::default(), 0.3);

        let state = sim.flight();
        assert_eq!(state.position.y, 0.0);
        assert_eq!(state.velocity.y, 0.0);
        assert!((state.hull.value() - 60.0).abs() < 1e-4);
        assert!(events.contains(&FlightEvent::GroundImpact { impact_speed: 20.0, damage: 40.0 }));
        assert_eq!(sim.telemetry().threat, crate::telemetry::ThreatLevel::Low);

        // resting on the ground is not a second impact
        let events = sim.tick(&FlightControls::default(), 0.3);
        assert!(!events.iter().any(|e| matches!(e, FlightEvent::GroundImpact { .. })));
        assert!((sim.flight().hull.value() - 60.0).abs() < 1e-4);
    }

    #[test]
    fn full_throttle_burns_fuel_linearly() {
        let mut config = quiet_config();
        config.flight = still_air();
        let flight = FlightState::new(Vec3::new(0.0, 5000.0, 0.0), Vec3::ZERO).with_throttle(100.0);
        let mut sim = running(Simulation::from_parts(
            config,
            far_checkpoint_world(),
            flight,
            StepRng::new(u64::MAX, 0),
        ));
        let hold = FlightControls { throttle: 1.0, ..Default::default() };
        for _ in 0..120 {
            sim.tick(&hold, FRAME);
        }
        assert!((sim.flight().fuel.value() - (100.0 - 0.5 * 2.0)).abs() < 1e-3);
    }

    #[test]
    fn dry_tank_clamps_at_zero_and_kills_the_engine_once() {
        let mut config = quiet_config();
        config.flight = still_air();
        let mut flight = FlightState::new(Vec3::new(0.0, 5000.0, 0.0), Vec3::ZERO).with_throttle(100.0);
        flight.fuel.set(0.1);
        let mut sim = running(Simulation::from_parts(
            config,
            far_checkpoint_world(),
            flight,
            StepRng::new(u64::MAX, 0),
        ));
        let mut failures = 0;
        for _ in 0..(20 * 60) {
            let events = sim.tick(&FlightControls::default(), FRAME);
            failures += events.iter().filter(|e| matches!(e, FlightEvent::EngineFailure { .. })).count();
        }
        assert_eq!(sim.flight().fuel.value(), 0.0);
        assert!(sim.flight().engine.is_empty());
        assert_eq!(sim.flight().throttle.value(), 0.0);
        assert_eq!(failures, 1);
    }

    #[test]
    fn failed_engine_stays_dead_under_held_throttle() {
        let mut config = quiet_config();
        config.flight = still_air();
        let mut flight = FlightState::new(Vec3::new(0.0, 1000.0, 0.0), Vec3::ZERO);
        flight.fuel.set(0.0);
        flight.engine.set(0.0);
        let mut sim = running(Simulation::from_parts(
            config,
            far_checkpoint_world(),
            flight,
            StepRng::new(u64::MAX, 0),
        ));
        let hold = FlightControls { throttle: 1.0, ..Default::default() };
        for _ in 0..600 {
            sim.tick(&hold, FRAME);
            assert_eq!(sim.flight().throttle.value(), 0.0);
        }
        assert_eq!(sim.flight().speed(), 0.0);
        assert_eq!(sim.flight().position, Vec3::new(0.0, 1000.0, 0.0));
    }

    #[test]
    fn empty_world_never_completes() {
        let flight = FlightState::new(Vec3::new(0.0, 1000.0, 0.0), Vec3::new(0.0, 0.0, -50.0));
        let mut sim = running(Simulation::from_parts(
            quiet_config(),
            WorldLayout::from_world(World::new()),
            flight,
            StepRng::new(u64::MAX, 0),
        ));
        for _ in 0..30 {
            let events = sim.tick(&FlightControls::default(), FRAME);
            assert!(!events.contains(&FlightEvent::MissionComplete));
        }
        assert_eq!(sim.phase(), SimPhase::Running);
        assert!(!sim.mission().all_collected());
    }

    #[test]
    fn checkpoint_counts_once_and_scores() {
        let mut world = World::new();
        let start = Vec3::new(0.0, 1000.0, 0.0);
        let near = spawn_checkpoint(&mut world, 0, start + Vec3::new(0.0, 0.0, -5.0));
        spawn_checkpoint(&mut world, 1, Vec3::new(1.0e6, 1000.0, 0.0));
        let flight = FlightState::new(start, Vec3::ZERO);
        let mut sim = running(Simulation::from_parts(
            quiet_config(),
            WorldLayout::from_world(world),
            flight,
            StepRng::new(u64::MAX, 0),
        ));

        let mut collected_events = 0;
        for _ in 0..30 {
            let events = sim.tick(&FlightControls::default(), FRAME);
            collected_events +=
                events.iter().filter(|e| matches!(e, FlightEvent::CheckpointCollected { .. })).count();
        }
        assert_eq!(collected_events, 1);
        assert_eq!(sim.mission().checkpoints_collected, 1);
        assert_eq!(sim.mission().score, 100);
        assert_eq!(sim.phase(), SimPhase::Running);
        assert!(!sim.world().get::<&Placement>(near).unwrap().visible);
    }

    #[test]
    fn mission_complete_fires_once() {
        let mut world = World::new();
        let start = Vec3::new(0.0, 1000.0, 0.0);
        spawn_checkpoint(&mut world, 0, start);
        let mut sim = running(Simulation::from_parts(
            quiet_config(),
            WorldLayout::from_world(world),
            FlightState::new(start, Vec3::ZERO),
            StepRng::new(u64::MAX, 0),
        ));

        let events = sim.tick(&FlightControls::default(), FRAME);
        assert_eq!(
            events,
            vec![FlightEvent::CheckpointCollected { id: 0 }, FlightEvent::MissionComplete]
        );
        assert_eq!(sim.phase(), SimPhase::Terminal(TerminalReason::MissionComplete));
        assert_eq!(sim.telemetry().score, 100);

        for _ in 0..10 {
            assert!(sim.tick(&FlightControls::default(), FRAME).is_empty());
        }
        assert!(sim.toggle_pause().is_none());
    }

    #[test]
    fn mission_failed_fires_once_and_freezes() {
        let mut flight = FlightState::new(Vec3::new(0.0, 1000.0, 0.0), Vec3::new(0.0, 0.0, -50.0));
        flight.hull.set(0.0);
        let mut sim = running(Simulation::from_parts(
            quiet_config(),
            far_checkpoint_world(),
            flight,
            StepRng::new(u64::MAX, 0),
        ));

        let events = sim.tick(&FlightControls::default(), FRAME);
        assert_eq!(events.iter().filter(|e| **e == FlightEvent::MissionFailed).count(), 1);
        let frozen = sim.flight().position;
        let clock = sim.mission().game_time;

        for _ in 0..10 {
            assert!(!sim.tick(&FlightControls::default(), FRAME).contains(&FlightEvent::MissionFailed));
        }
        assert_eq!(sim.flight().position, frozen);
        assert_eq!(sim.mission().game_time, clock);
        assert_eq!(sim.log().last().unwrap().text, "CRITICAL HULL FAILURE - MISSION TERMINATED");
    }

    #[test]
    fn pause_freezes_the_mission_clock() {
        let mut sim = running(Simulation::from_parts(
            quiet_config(),
            far_checkpoint_world(),
            spawn_flight(&SimulationConfig::default()),
            StepRng::new(u64::MAX, 0),
        ));
        for _ in 0..10 {
            sim.tick(&FlightControls::default(), FRAME);
        }
        let pause = FlightControls { toggle_pause: true, ..Default::default() };
        assert_eq!(sim.tick(&pause, FRAME), vec![FlightEvent::Paused]);
        let clock = sim.mission().game_time;
        let position = sim.flight().position;

        for _ in 0..30 {
            sim.tick(&FlightControls::default(), FRAME);
        }
        assert_eq!(sim.mission().game_time, clock);
        assert_eq!(sim.flight().position, position);

        assert_eq!(sim.toggle_pause(), Some(FlightEvent::Resumed));
        sim.tick(&FlightControls::default(), FRAME);
        assert!(sim.mission().game_time > clock);
    }

    #[test]
    fn invalid_frame_deltas_step_nothing() {
        let mut sim = running(Simulation::from_parts(
            quiet_config(),
            far_checkpoint_world(),
            spawn_flight(&SimulationConfig::default()),
            StepRng::new(u64::MAX, 0),
        ));
        let before = sim.flight().position;
        for raw in [f32::NAN, -1.0, f32::NEG_INFINITY, f32::INFINITY] {
            sim.tick(&FlightControls::default(), raw);
        }
        assert_eq!(sim.mission().game_time, 0.0);
        assert_eq!(sim.flight().position, before);
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut sim = running(Simulation::from_parts(
            quiet_config(),
            far_checkpoint_world(),
            spawn_flight(&SimulationConfig::default()),
            StepRng::new(u64::MAX, 0),
        ));
        sim.tick(&FlightControls::default(), 5.0);
        assert!((sim.mission().game_time - 0.1).abs() < 1e-6);
    }

    #[test]
    fn mute_toggle_silences_the_mix() {
        let mut sim = running(Simulation::new(quiet_config()).unwrap());
        assert!(sim.audio_mix().master > 0.0);
        let mute = FlightControls { toggle_mute: true, ..Default::default() };
        let events = sim.tick(&mute, FRAME);
        assert!(events.contains(&FlightEvent::AudioToggled { muted: true }));
        assert!(sim.is_muted());
        assert_eq!(sim.audio_mix().master, 0.0);
        assert_eq!(sim.toggle_mute(), FlightEvent::AudioToggled { muted: false });
    }

    #[test]
    fn random_inputs_keep_state_in_bounds() {
        let mut sim = running(Simulation::new(quiet_config()).unwrap());
        let mut driver = StdRng::seed_from_u64(99);
        for _ in 0..3000 {
            let controls = FlightControls {
                pitch: driver.gen_range(-1.5..1.5),
                roll: driver.gen_range(-1.5..1.5),
                yaw: driver.gen_range(-1.0..1.0),
                throttle: driver.gen_range(-1.0..1.0),
                brake: driver.gen_bool(0.1),
                ..Default::default()
            };
            let dt = match driver.gen_range(0..20) {
                0 => -0.5,
                1 => f32::NAN,
                2 => 3.0,
                _ => driver.gen_range(0.0..0.05),
            };
            sim.tick(&controls, dt);

            let flight = sim.flight();
            assert!(flight.orientation.is_within_limits());
            for gauge in [flight.throttle, flight.fuel, flight.hull, flight.engine] {
                assert!((0.0..=100.0).contains(&gauge.value()));
            }
            assert!(flight.position.y >= 0.0);
            assert!(sim.mission().checkpoints_collected <= sim.mission().checkpoint_total);
        }
    }

    #[test]
    fn same_seed_same_flight() {
        let fly = || {
            let mut sim = running(Simulation::new(quiet_config()).unwrap());
            let bank = FlightControls { roll: 0.5, yaw: 0.3, ..Default::default() };
            for _ in 0..300 {
                sim.tick(&bank, FRAME);
            }
            (sim.flight().position, sim.flight().engine.value())
        };
        assert_eq!(fly(), fly());
    }
}
