//! Full-session tests driven by synthetic frame timestamps

use astrolab::consts::TICK_MS;
use astrolab::sim::{GameEvent, RunState, TickInput, Viewport, autopilot};
use astrolab::{FormFactor, MemoryStore, Session, Tuning};

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 600.0;

/// Meteorites as tall as the screen: every run ends at the first one
fn wall_tuning() -> Tuning {
    Tuning {
        obstacle_radius_base: HEIGHT / 2.0,
        obstacle_radius_extra: 0.0,
        ..Tuning::for_form_factor(FormFactor::Large)
    }
}

fn session(store: MemoryStore, tuning: Tuning) -> Session<MemoryStore> {
    Session::new(
        store,
        tuning,
        Viewport::new(WIDTH, HEIGHT).expect("valid viewport"),
        2024,
    )
    .expect("valid session")
}

/// Tick until the run ends; returns (events of the final tick, next timestamp)
fn run_until_over(
    session: &mut Session<MemoryStore>,
    mut now: f64,
    frame_ms: f64,
) -> (Vec<GameEvent>, f64) {
    let mut last_distance = 0.0;
    for _ in 0..10_000 {
        now += frame_ms;
        let events = session.tick(&TickInput::default(), now);
        if session.run_state() == RunState::Over {
            return (events, now);
        }
        assert!(session.distance() >= last_distance, "distance went backward");
        last_distance = session.distance();
    }
    panic!("run never ended");
}

#[test]
fn restart_twice_yields_identical_initial_state() {
    let mut session = session(MemoryStore::new(), Tuning::default());
    session.start(0.0);
    for i in 1..=90 {
        session.tick(&TickInput::thrust(i % 3 == 0), i as f64 * TICK_MS);
    }

    session.restart(2000.0);
    let first = session.snapshot();
    let (player, distance, state) = (first.player.clone(), first.distance, first.run_state);
    assert!(first.obstacles.is_empty());
    assert!(first.particles.is_empty());

    session.restart(2000.0);
    let second = session.snapshot();
    assert_eq!(second.player, &player);
    assert_eq!(second.distance, distance);
    assert_eq!(second.run_state, state);
    assert!(second.obstacles.is_empty());
    assert!(second.particles.is_empty());

    assert_eq!(player.velocity_y, 0.0);
    assert_eq!(player.pos.y, HEIGHT / 2.0);
    assert_eq!(distance, 0.0);
    assert_eq!(state, RunState::Running);
}

#[test]
fn collision_bursts_and_particles_fade_out() {
    let mut session = session(MemoryStore::new(), wall_tuning());
    session.start(0.0);
    let (events, mut now) = run_until_over(&mut session, 0.0, TICK_MS);

    let at = events
        .iter()
        .find_map(|e| match e {
            GameEvent::Collision { at } => Some(*at),
            _ => None,
        })
        .expect("collision event");
    let snapshot = session.snapshot();
    assert_eq!(at, snapshot.player.pos);
    assert_eq!(snapshot.particles.len(), 30);
    assert!(!snapshot.flame_visible);

    let mut fade_ticks = 0;
    while session.is_animating() {
        now += TICK_MS;
        session.tick(&TickInput::thrust(true), now);
        fade_ticks += 1;
    }
    // 50 fade steps total, the first one on the collision tick
    assert_eq!(fade_ticks, 49);
    assert!(session.snapshot().particles.is_empty());
    assert_eq!(session.run_state(), RunState::Over);
}

#[test]
fn best_distance_never_decreases_and_is_saved_every_run() {
    let mut session = session(MemoryStore::new(), wall_tuning());
    let mut now = 0.0;
    let mut best_so_far = 0;

    // Slower wall clocks per frame mean longer distances for the same tick count
    let frame_lengths = [TICK_MS * 2.0, TICK_MS, TICK_MS * 3.0, TICK_MS * 0.5];
    for (run, frame_ms) in frame_lengths.into_iter().enumerate() {
        if run == 0 {
            session.start(now);
        } else {
            session.restart(now);
        }
        let (events, next) = run_until_over(&mut session, now, frame_ms);
        now = next;

        let (distance, best, new_best) = events
            .iter()
            .find_map(|e| match e {
                GameEvent::RunOver {
                    distance,
                    best,
                    new_best,
                } => Some((*distance, *best, *new_best)),
                _ => None,
            })
            .expect("run over event");

        assert!(best >= best_so_far);
        assert_eq!(best, best_so_far.max(distance));
        assert_eq!(new_best, distance > best_so_far);
        best_so_far = best;

        assert_eq!(session.store().stored_best(), best);
        assert_eq!(session.store().save_count(), run as u32 + 1);
        assert!(session.best_saved());
        assert_eq!(session.share_text(), format!("{distance} m"));
        assert!(session.can_share());
    }
}

#[test]
fn failed_save_is_reported_and_play_continues() {
    let mut session = session(MemoryStore::with_best(5).failing_saves(), wall_tuning());
    session.start(0.0);
    let (events, now) = run_until_over(&mut session, 0.0, TICK_MS * 4.0);

    let over_best = events.iter().find_map(|e| match e {
        GameEvent::RunOver { best, .. } => Some(*best),
        _ => None,
    });
    let failed_best = events.iter().find_map(|e| match e {
        GameEvent::BestSaveFailed { best } => Some(*best),
        _ => None,
    });
    assert!(over_best.is_some());
    assert_eq!(over_best, failed_best);
    assert!(!session.best_saved());
    assert!(!session.snapshot().best_saved);
    // The in-memory best still advanced
    assert!(session.best_distance() >= 5);
    assert_eq!(session.store().stored_best(), 5);

    session.store_mut().set_fail_saves(false);
    session.restart(now);
    let _ = run_until_over(&mut session, now, TICK_MS);
    assert!(session.best_saved());
}

#[test]
fn resize_mid_run_waits_for_next_run() {
    let mut session = session(MemoryStore::new(), Tuning::default());
    session.start(0.0);
    session.tick(&TickInput::default(), TICK_MS);
    session.set_viewport(390.0, 844.0).expect("valid viewport");
    assert_eq!(session.snapshot().viewport.width, WIDTH);

    session.restart(1000.0);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.viewport.width, 390.0);
    assert_eq!(snapshot.player.pos.y, 422.0);
}

#[test]
fn shrinking_viewport_after_crash_keeps_bodies_inside() {
    let mut session = session(MemoryStore::new(), wall_tuning());
    session.start(0.0);
    // Without thrust the rocket sinks to the floor before the crash
    let (_, now) = run_until_over(&mut session, 0.0, TICK_MS);
    assert!(session.snapshot().player.pos.y > 200.0);

    session.set_viewport(WIDTH, 200.0).expect("valid viewport");
    let snapshot = session.snapshot();
    assert_eq!(snapshot.viewport.height, 200.0);
    let p = snapshot.player;
    assert!(p.pos.y >= p.radius && p.pos.y <= 200.0 - p.radius);
    // Screen-tall meteorites no longer fit at all
    assert!(snapshot.obstacles.is_empty());
    assert!(!snapshot.particles.is_empty());

    session.restart(now);
    assert_eq!(session.snapshot().player.pos.y, 100.0);
}

#[test]
fn autopilot_session_respects_invariants() {
    for form_factor in [FormFactor::Large, FormFactor::Compact] {
        let tuning = Tuning::for_form_factor(form_factor);
        let cap = tuning.max_obstacles;
        let mut session = session(MemoryStore::new(), tuning);
        session.start(0.0);

        let mut now = 0.0;
        for _ in 0..3000 {
            if session.run_state() == RunState::Over && !session.is_animating() {
                session.restart(now);
            }
            let input = autopilot(session.state());
            now += TICK_MS;
            session.tick(&input, now);

            let snap = session.snapshot();
            let p = snap.player;
            assert!(p.velocity_y.abs() <= p.max_speed);
            assert!(p.pos.y >= p.radius && p.pos.y <= HEIGHT - p.radius);
            assert!(snap.obstacles.len() <= cap);
            for o in snap.obstacles {
                assert!(o.radius > 0.0);
                assert!(o.pos.y >= o.radius && o.pos.y <= HEIGHT - o.radius);
            }
            for particle in snap.particles {
                assert!(particle.alpha > 0.0 && particle.alpha <= 1.0);
            }
        }
    }
}
