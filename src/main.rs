//! AR Hoops headless driver
//!
//! Plays a scripted session against an in-memory scene so the session core
//! can be exercised without a device. Usage:
//!
//! ```text
//! ar-hoops [config.json] [highscores.json]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ar_hoops::GameConfig;

    ar_hoops::init_logging();
    log::info!("AR Hoops (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load(path),
        None => GameConfig::default(),
    };
    let scores_path = args
        .next()
        .unwrap_or_else(|| "ar_hoops_highscores.json".to_string());

    let summary = headless::play(config, 120.0);
    println!(
        "Final score {} ({} hits, {} misses, {:.1}s)",
        summary.score, summary.hits, summary.misses, summary.seconds
    );

    let mut scores = ar_hoops::HighScores::load_from(&scores_path);
    let state = summary.state;
    if let Some(rank) = scores.record_session(&state, ar_hoops::now_millis()) {
        println!("New high score! Rank #{}", rank);
        if let Err(e) = scores.save_to(&scores_path) {
            log::warn!("Could not save high scores to {}: {}", scores_path, e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web shell drives the library directly
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use ar_hoops::GameConfig;
    use ar_hoops::sim::{
        CameraPose, FrameInput, RecordingScene, SessionController, SessionEvent, SessionPhase,
        SessionState, Surface, SurfaceAlignment, SurfaceHit,
    };
    use glam::{Mat4, Vec2, Vec3};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Chance per frame that the scripted player shoots at a live target
    const SHOT_CHANCE: f64 = 0.02;
    /// Chance that a shot connects
    const ACCURACY: f64 = 0.6;

    pub struct Summary {
        pub score: u64,
        pub hits: u32,
        pub misses: u32,
        pub seconds: f32,
        pub state: SessionState,
    }

    pub fn play(config: GameConfig, max_seconds: f32) -> Summary {
        let mut player = Pcg32::seed_from_u64(config.rng_seed.unwrap_or(7));
        let mut session = SessionController::new(RecordingScene::new(), config);
        session.subscribe(|event| {
            if let SessionEvent::GameOver { final_score } = event {
                log::info!("Presentation: game over banner, score {}", final_score);
            }
        });

        let wall = Surface {
            id: 1,
            alignment: SurfaceAlignment::Vertical,
            center: Vec3::ZERO,
            extent: Vec2::new(3.0, 2.0),
        };
        let hit = SurfaceHit {
            surface_id: wall.id,
            world_transform: Mat4::from_translation(Vec3::new(0.0, 1.0, -3.0)),
        };
        let aim = CameraPose::looking(Vec3::new(0.0, 1.4, 0.0), Vec3::NEG_Z);
        let floor = CameraPose::looking(Vec3::new(0.0, 1.4, 0.0), Vec3::NEG_Y);

        session.update(
            &FrameInput {
                reset: true,
                camera: Some(aim),
                surfaces_added: vec![wall],
                tap: Some(Some(hit)),
                ..Default::default()
            },
            0.0,
        );
        session.dispatch_notifications();

        let mut pending_hit: Option<u32> = None;
        let mut elapsed = 0.0;
        while elapsed < max_seconds && session.phase() == SessionPhase::Running {
            let mut input = FrameInput {
                camera: Some(aim),
                ..Default::default()
            };

            // Resolve last frame's shot
            if let Some(ball) = pending_hit.take() {
                match session.state().targets.first() {
                    Some(target) if player.random_bool(ACCURACY) => {
                        input.collisions.push((ball, target.id));
                    }
                    _ => input.projectiles_lost.push(ball),
                }
            }

            if session.state().ammo == 0 {
                input.camera = Some(floor);
            } else if !session.state().targets.is_empty() && player.random_bool(SHOT_CHANCE) {
                input.tap = Some(None);
            }

            let shots_before = session.scene().spawn_counts().1;
            session.update(&input, FRAME_DT);
            if session.scene().spawn_counts().1 > shots_before {
                pending_hit = session.state().projectiles.last().map(|p| p.id);
            }
            session.dispatch_notifications();
            elapsed += FRAME_DT;
        }

        let state = session.state().clone();
        Summary {
            score: state.score,
            hits: state.hits,
            misses: state.misses,
            seconds: elapsed,
            state,
        }
    }
}
