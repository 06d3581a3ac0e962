use kb_mechanics::{Outcome, RuleSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::anchor::AnchorSet;
use crate::body::{BODY_COUNT, Body, BodyPose};
use crate::bounds::TableBounds;
use crate::clock::FrameClock;
use crate::collision::resolve_collisions;
use crate::config::SimConfig;
use crate::context::StepContext;
use crate::error::{SimError, SimResult};
use crate::event::{EventLog, RoundEvent, RoundEventKind};
use crate::face::{FaceDecision, decide, nudge, topple};
use crate::fallback::{force_resolve, force_snap_due};
use crate::integrator::{confine, integrate};
use crate::layout::{neutral_layout, throw_layout};
use crate::settle::{SettleChange, is_at_rest, update_settle};
use crate::setup::DiceSetup;
use crate::snap::{advance_snap, begin_snap};

/// Where the controller is in the throw-to-score cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Bodies rest in the neutral layout; nothing is simulated.
    Idle,
    /// Bodies are in flight and none has come to rest yet.
    Throwing,
    /// At least one body is settling, snapping, or resolved.
    Resolving,
    /// Every body is resolved and the outcome is available.
    Complete,
}

/// One throw-to-score cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    /// Host timestamp (ms) of the throw.
    pub thrown_at_ms: f64,
    /// Scored result, set once when the round completes.
    pub outcome: Option<Outcome>,
}

/// Drives the five bodies from throw to outcome.
///
/// Owns every body and the current round. The host calls
/// [`throw`](Self::throw) and [`reset`](Self::reset) from its controls and
/// [`step`](Self::step) once per rendered frame with a monotonic
/// timestamp. Each step runs, in order: integration, collisions, rest
/// detection, face resolution and snapping, the force-snap timeout,
/// then scoring.
///
/// `throw` is accepted in any phase and replaces the running round.
/// Guarding it while a round is in progress is up to the caller.
pub struct RoundController<R: Rng = StdRng> {
    config: SimConfig,
    anchors: AnchorSet,
    rules: RuleSet,
    bodies: [Body; BODY_COUNT],
    phase: Phase,
    round: Option<Round>,
    clock: FrameClock,
    events: EventLog,
    rng: R,
}

impl<R: Rng> std::fmt::Debug for RoundController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundController")
            .field("phase", &self.phase)
            .field("frame", &self.clock.frame())
            .field("events", &self.events.len())
            .finish()
    }
}

impl RoundController<StdRng> {
    /// Create an idle controller whose randomness is seeded from `config.seed`.
    pub fn new(config: SimConfig, setup: &DiceSetup) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(config, setup, rng)
    }
}

impl<R: Rng> RoundController<R> {
    /// Create an idle controller drawing throw jitter and nudges from `rng`.
    pub fn with_rng(config: SimConfig, setup: &DiceSetup, rng: R) -> Self {
        let bodies = neutral_layout(&config);
        let clock = FrameClock::new(config.max_dt);
        let events = EventLog::new(config.max_events);
        Self {
            anchors: setup.anchor_set(),
            rules: setup.rules.clone(),
            config,
            bodies,
            phase: Phase::Idle,
            round: None,
            clock,
            events,
            rng,
        }
    }

    /// Launch all five bodies and start a new round at `now_ms`.
    pub fn throw(&mut self, now_ms: f64) {
        let now_ms = if now_ms.is_finite() {
            now_ms
        } else {
            self.clock.now_ms()
        };
        self.bodies = throw_layout(&self.config, &mut self.rng);
        self.clock.restart(now_ms);
        self.round = Some(Round {
            thrown_at_ms: now_ms,
            outcome: None,
        });
        self.phase = Phase::Throwing;
        self.events.clear();
        self.log(RoundEventKind::Thrown, "bodies thrown".to_string());
    }

    /// Discard the round and return the bodies to the neutral layout.
    pub fn reset(&mut self) {
        self.bodies = neutral_layout(&self.config);
        self.round = None;
        self.phase = Phase::Idle;
        self.clock.restart(self.clock.now_ms());
        self.events.clear();
        self.log(RoundEventKind::Reset, "round reset".to_string());
    }

    /// Replace the table bounds and pull every body back inside them.
    pub fn resize(&mut self, bounds: TableBounds) -> SimResult<()> {
        if !bounds.is_valid() {
            return Err(SimError::InvalidConfig(format!(
                "inverted table bounds x {}..{} z {}..{}",
                bounds.min_x, bounds.max_x, bounds.min_z, bounds.max_z
            )));
        }
        self.config.bounds = bounds;
        for body in &mut self.bodies {
            confine(body, &self.config.bounds, self.config.wall_restitution);
        }
        self.log(
            RoundEventKind::Resized,
            format!("table resized to {:.2} x {:.2}", bounds.width(), bounds.depth()),
        );
        Ok(())
    }

    /// Advance one frame at host time `now_ms`. Does nothing unless a
    /// round is in flight. Returns the phase after the frame.
    pub fn step(&mut self, now_ms: f64) -> Phase {
        if !matches!(self.phase, Phase::Throwing | Phase::Resolving) {
            return self.phase;
        }
        let thrown_at_ms = match &self.round {
            Some(round) => round.thrown_at_ms,
            None => return self.phase,
        };

        let dt = self.clock.advance(now_ms);
        let mut ctx = StepContext {
            config: &self.config,
            anchors: &self.anchors,
            events: &mut self.events,
            rng: &mut self.rng,
            frame: self.clock.frame(),
            now_ms: self.clock.now_ms(),
        };

        for body in &mut self.bodies {
            if !body.resolved && !body.is_snapping() && body.on_floor(ctx.config.floor_y) {
                topple(body, ctx.anchors, ctx.config.topple_rate, dt);
            }
            integrate(body, dt, ctx.config);
        }
        resolve_collisions(&mut self.bodies, ctx.config);
        settle_stage(&mut ctx, &mut self.bodies);
        face_stage(&mut ctx, &mut self.bodies);
        fallback_stage(&mut ctx, &mut self.bodies, thrown_at_ms);

        if self.phase == Phase::Throwing
            && self
                .bodies
                .iter()
                .any(|b| b.settled_since.is_some() || b.is_snapping() || b.resolved)
        {
            self.phase = Phase::Resolving;
        }
        if self.bodies.iter().all(|b| b.resolved) {
            self.complete();
        }
        self.phase
    }

    /// Throw at `start_ms` and step every `frame_ms` until the round
    /// completes or `max_frames` frames have run.
    pub fn run_to_completion(
        &mut self,
        start_ms: f64,
        frame_ms: f64,
        max_frames: u64,
    ) -> Option<&Outcome> {
        self.throw(start_ms);
        for n in 1..=max_frames {
            if self.step(start_ms + n as f64 * frame_ms) == Phase::Complete {
                break;
            }
        }
        self.outcome()
    }

    fn complete(&mut self) {
        let values: Vec<i32> = self.bodies.iter().map(|b| b.value).collect();
        let outcome = self.rules.score(&values);
        let description = format!("round complete: {outcome}");
        let sum = outcome.sum;
        if let Some(round) = self.round.as_mut() {
            round.outcome = Some(outcome);
        }
        self.phase = Phase::Complete;
        self.log(RoundEventKind::Completed { sum }, description);
    }

    fn log(&mut self, kind: RoundEventKind, description: String) {
        self.events.push(RoundEvent::new(
            self.clock.frame(),
            self.clock.now_ms(),
            kind,
            description,
        ));
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The five bodies, read-only.
    pub fn bodies(&self) -> &[Body; BODY_COUNT] {
        &self.bodies
    }

    /// Position and orientation of every body, for rendering.
    pub fn poses(&self) -> [BodyPose; BODY_COUNT] {
        self.bodies.each_ref().map(Body::pose)
    }

    /// The current round, if one was thrown since the last reset.
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// The outcome of the current round once it is complete.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.round.as_ref().and_then(|r| r.outcome.as_ref())
    }

    /// Events logged since the last throw or reset.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// The simulation parameters, including the current table bounds.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Face anchors paired with their values.
    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    /// Scoring rules applied when the round completes.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Frames stepped since the last throw or reset.
    pub fn frame(&self) -> u64 {
        self.clock.frame()
    }
}

fn settle_stage<R: Rng + ?Sized>(ctx: &mut StepContext<'_, R>, bodies: &mut [Body]) {
    for (i, body) in bodies.iter_mut().enumerate() {
        if body.resolved || body.is_snapping() {
            continue;
        }
        match update_settle(body, ctx.now_ms, ctx.config.settle_speed) {
            SettleChange::Settled => {
                ctx.emit(RoundEventKind::Settled { body: i }, format!("body {i} came to rest"));
            }
            SettleChange::Unsettled => {
                ctx.emit(RoundEventKind::Unsettled { body: i }, format!("body {i} moving again"));
            }
            SettleChange::None => {}
        }
    }
}

fn face_stage<R: Rng + ?Sized>(ctx: &mut StepContext<'_, R>, bodies: &mut [Body]) {
    for (i, body) in bodies.iter_mut().enumerate() {
        if body.is_snapping() {
            if advance_snap(body, ctx.now_ms, ctx.config.snap_ms) {
                ctx.emit(
                    RoundEventKind::Resolved {
                        body: i,
                        face: body.face.clone(),
                        value: body.value,
                        forced: false,
                    },
                    format!(
                        "body {i} landed on {} ({})",
                        body.face.as_deref().unwrap_or("?"),
                        body.value
                    ),
                );
            }
            continue;
        }
        if body.resolved || !is_at_rest(body, ctx.now_ms, ctx.config.settle_ms) {
            continue;
        }

        match decide(body.orientation, ctx.anchors, ctx.config.dot_lock) {
            FaceDecision::Lock(choice) => {
                if begin_snap(body, &choice, ctx.now_ms) {
                    ctx.emit(
                        RoundEventKind::SnapStarted {
                            body: i,
                            face: choice.name.clone(),
                        },
                        format!("body {i} locked {} (dot {:.3})", choice.name, choice.dot),
                    );
                }
            }
            FaceDecision::Nudge { best_dot } => {
                nudge(body, ctx.rng, ctx.config.nudge_spin, ctx.config.nudge_lift);
                let description = match best_dot {
                    Some(dot) => format!("body {i} on an edge (dot {dot:.3}), nudged"),
                    None => format!("body {i} has no face anchors, nudged"),
                };
                ctx.emit(RoundEventKind::Nudged { body: i, best_dot }, description);
            }
        }
    }
}

fn fallback_stage<R: Rng + ?Sized>(
    ctx: &mut StepContext<'_, R>,
    bodies: &mut [Body],
    thrown_at_ms: f64,
) {
    let pending = bodies.iter().filter(|b| !b.resolved).count();
    if pending == 0 || !force_snap_due(thrown_at_ms, ctx.now_ms, ctx.config.force_snap_ms) {
        return;
    }
    ctx.emit(
        RoundEventKind::ForceSnap { pending },
        format!("timeout: forcing {pending} unresolved bodies"),
    );
    for (i, body) in bodies.iter_mut().enumerate() {
        if let Some(forced) = force_resolve(body, ctx.anchors, ctx.config) {
            let description = format!(
                "body {i} forced onto {} ({})",
                forced.face.as_deref().unwrap_or("no face"),
                forced.value
            );
            ctx.emit(
                RoundEventKind::Resolved {
                    body: i,
                    face: forced.face,
                    value: forced.value,
                    forced: true,
                },
                description,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_mechanics::NO_FACE_VALUE;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn controller(seed: u64) -> RoundController {
        RoundController::new(SimConfig::default().with_seed(seed), &DiceSetup::classic())
    }

    #[test]
    fn starts_idle_in_neutral_layout() {
        let ctl = controller(1);
        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(ctl.round().is_none());
        assert!(ctl.outcome().is_none());
        assert_eq!(ctl.bodies(), &neutral_layout(ctl.config()));
    }

    #[test]
    fn step_while_idle_does_nothing() {
        let mut ctl = controller(1);
        let before = ctl.bodies().clone();
        assert_eq!(ctl.step(100.0), Phase::Idle);
        assert_eq!(ctl.bodies(), &before);
        assert_eq!(ctl.frame(), 0);
    }

    #[test]
    fn throw_enters_throwing_and_logs() {
        let mut ctl = controller(1);
        ctl.throw(500.0);
        assert_eq!(ctl.phase(), Phase::Throwing);
        assert_eq!(ctl.round().unwrap().thrown_at_ms, 500.0);
        assert_eq!(ctl.events().len(), 1);
        assert_eq!(ctl.events().events()[0].kind, RoundEventKind::Thrown);
        assert!(ctl.bodies().iter().all(|b| !b.resolved && b.settled_since.is_none()));
    }

    #[test]
    fn round_completes_with_valid_values() {
        let mut ctl = controller(7);
        let outcome = ctl.run_to_completion(0.0, FRAME_MS, 2000).cloned().unwrap();
        assert_eq!(ctl.phase(), Phase::Complete);
        assert_eq!(outcome.values.len(), BODY_COUNT);
        assert!(outcome.values.iter().all(|v| [1, 3, 4, 6].contains(v)));
        assert_eq!(outcome.sum, outcome.values.iter().sum::<i32>());
        let completed = ctl
            .events()
            .events()
            .iter()
            .filter(|e| matches!(e.kind, RoundEventKind::Completed { .. }))
            .count();
        assert_eq!(completed, 1);
    }

    #[test]
    fn completes_by_force_snap_deadline() {
        let config = SimConfig::default();
        let deadline = config.force_snap_ms + config.snap_ms;
        let mut ctl = controller(3);
        ctl.throw(0.0);
        let mut t = 0.0;
        while ctl.phase() != Phase::Complete {
            t += FRAME_MS;
            ctl.step(t);
            assert!(t <= deadline + FRAME_MS, "round still running at {t} ms");
        }
    }

    #[test]
    fn long_pause_still_triggers_force_snap() {
        let mut ctl = controller(11);
        ctl.throw(0.0);
        ctl.step(FRAME_MS);
        assert_eq!(ctl.step(10_000.0), Phase::Complete);
        assert!(ctl.bodies().iter().all(|b| b.resolved));
    }

    #[test]
    fn forced_bodies_rest_on_the_floor() {
        let mut ctl = controller(11);
        ctl.throw(0.0);
        ctl.step(FRAME_MS);
        assert_eq!(ctl.step(10_000.0), Phase::Complete);
        for n in 1..=100 {
            ctl.step(10_000.0 + n as f64 * FRAME_MS);
        }
        let rest_y = ctl.config().floor_y + ctl.config().radius;
        for (i, body) in ctl.bodies().iter().enumerate() {
            assert_eq!(body.position.y, rest_y, "body {i} left in the air");
            assert!(ctl.config().bounds.contains(body.position.x, body.position.z));
        }
    }

    #[test]
    fn resolving_lasts_from_first_settle_to_last_resolve() {
        let config = SimConfig::default().with_seed(13).with_force_snap_ms(6000.0);
        let mut ctl = RoundController::new(config, &DiceSetup::classic());
        ctl.throw(0.0);
        let mut saw_resolving = false;
        let mut t = 0.0;
        while ctl.phase() != Phase::Complete {
            t += FRAME_MS;
            let phase = ctl.step(t);
            let any_settled = ctl
                .bodies()
                .iter()
                .any(|b| b.settled_since.is_some() || b.is_snapping() || b.resolved);
            let all_resolved = ctl.bodies().iter().all(|b| b.resolved);
            if saw_resolving {
                assert_ne!(phase, Phase::Throwing, "fell back to throwing at {t} ms");
            }
            if phase == Phase::Resolving {
                saw_resolving = true;
                assert!(!all_resolved);
            }
            if any_settled && !all_resolved {
                assert_eq!(phase, Phase::Resolving, "at {t} ms");
            }
            assert!(t <= 6000.0 + 220.0 + FRAME_MS);
        }
        assert!(saw_resolving);
        assert!(ctl.bodies().iter().all(|b| b.resolved));
    }

    #[test]
    fn unlockable_faces_are_nudged_until_forced() {
        let config = SimConfig::default()
            .with_seed(17)
            .with_dot_lock(1.01)
            .with_force_snap_ms(6000.0);
        let mut ctl = RoundController::new(config, &DiceSetup::classic());
        ctl.throw(0.0);
        let mut nudges = 0;
        let mut t = 0.0;
        while ctl.phase() != Phase::Complete {
            t += FRAME_MS;
            ctl.step(t);
            let frame = ctl.frame();
            for event in ctl.events().events_at_frame(frame) {
                if let RoundEventKind::Nudged { body, best_dot } = &event.kind {
                    nudges += 1;
                    assert!(best_dot.is_some_and(|d| d < 1.01));
                    assert_eq!(ctl.bodies()[*body].settled_since, None);
                }
            }
            assert!(t <= 6000.0 + FRAME_MS, "round still running at {t} ms");
        }
        assert!(nudges > 0);
        assert!(ctl.bodies().iter().all(|b| b.resolved && b.forced));
        assert!(
            !ctl.events()
                .events()
                .iter()
                .any(|e| matches!(e.kind, RoundEventKind::SnapStarted { .. }))
        );
    }

    #[test]
    fn complete_round_ignores_further_steps() {
        let mut ctl = controller(2);
        ctl.run_to_completion(0.0, FRAME_MS, 2000);
        let outcome = ctl.outcome().cloned();
        let frame = ctl.frame();
        assert_eq!(ctl.step(99_999.0), Phase::Complete);
        assert_eq!(ctl.outcome().cloned(), outcome);
        assert_eq!(ctl.frame(), frame);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut ctl = controller(4);
        ctl.run_to_completion(0.0, FRAME_MS, 50);
        ctl.reset();
        let first = ctl.bodies().clone();
        ctl.reset();
        assert_eq!(ctl.bodies(), &first);
        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(ctl.outcome().is_none());
        assert_eq!(ctl.events().len(), 1);
        assert_eq!(ctl.events().events()[0].kind, RoundEventKind::Reset);
    }

    #[test]
    fn reset_mid_round_discards_snaps() {
        let mut ctl = controller(5);
        ctl.run_to_completion(0.0, FRAME_MS, 60);
        ctl.reset();
        assert!(ctl.bodies().iter().all(|b| !b.is_snapping() && !b.resolved));
    }

    #[test]
    fn same_seed_replays_identically() {
        let mut a = controller(21);
        let mut b = controller(21);
        let oa = a.run_to_completion(0.0, FRAME_MS, 2000).cloned();
        let ob = b.run_to_completion(0.0, FRAME_MS, 2000).cloned();
        assert_eq!(oa, ob);
        assert_eq!(a.poses(), b.poses());
    }

    #[test]
    fn missing_anchors_resolve_to_sentinel() {
        let mut setup = DiceSetup::classic();
        setup.anchors.clear();
        let mut ctl = RoundController::new(SimConfig::default(), &setup);
        let outcome = ctl.run_to_completion(0.0, FRAME_MS, 2000).cloned().unwrap();
        assert!(outcome.values.iter().all(|v| *v == NO_FACE_VALUE));
        assert!(ctl.bodies().iter().all(|b| b.forced));
    }

    #[test]
    fn resize_confines_bodies() {
        let mut ctl = controller(6);
        let bounds = TableBounds::centered(1.0, 1.0);
        ctl.resize(bounds).unwrap();
        for body in ctl.bodies() {
            assert!(bounds.contains(body.position.x, body.position.z));
        }
        assert!(matches!(
            ctl.events().events().last().map(|e| &e.kind),
            Some(RoundEventKind::Resized)
        ));
    }

    #[test]
    fn resize_rejects_inverted_bounds() {
        let mut ctl = controller(6);
        let err = ctl.resize(TableBounds::new(1.0, -1.0, 0.0, 1.0)).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn events_for_each_resolved_body() {
        let mut ctl = controller(8);
        ctl.run_to_completion(0.0, FRAME_MS, 2000);
        for i in 0..BODY_COUNT {
            let resolved = ctl
                .events()
                .events_for_body(i)
                .into_iter()
                .filter(|e| matches!(e.kind, RoundEventKind::Resolved { .. }))
                .count();
            assert_eq!(resolved, 1, "body {i}");
        }
    }
}
