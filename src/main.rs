//! Marble Mixer entry point
//!
//! Headless driver: runs a scripted session through the same input policy a
//! windowed front end would use, logs progress, and prints the final frame
//! snapshot as JSON.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use marble_mixer::Settings;
    use marble_mixer::sim::{Controls, GameLogic};

    env_logger::init();
    log::info!("Marble Mixer (headless) starting...");

    let settings = Settings::load();
    let seed = 0x5eed_ba11;
    let mut logic = GameLogic::new(settings.sim.clone(), seed);
    logic.fill_to(settings.controls.target_ball_count);
    let mut controls = Controls::new(settings.controls.clone());

    let mut merges = 0;
    for frame in 0..SESSION_FRAMES {
        let input = scripted_input(frame, logic.screen_size());
        merges += controls.step(&mut logic, &input, FRAME_DT).len();

        if frame % FPS == FPS - 1 {
            log::info!(
                "t={:>2}s arena={} free={} held={}/{} merges={}",
                (frame + 1) / FPS,
                logic.balls().len(),
                logic.free_ball_count(),
                logic.inventory().len(),
                logic.inventory().capacity(),
                merges
            );
        }
    }

    match serde_json::to_string_pretty(&logic.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is a library on wasm; front ends drive it directly
}

const FPS: u32 = 60;
const FRAME_DT: f32 = 1.0 / FPS as f32;
const SESSION_FRAMES: u32 = 10 * FPS;

/// Cursor orbits the arena center. Absorb for the first four seconds, release
/// for the next three, spawn a ball every second and a half.
#[cfg(not(target_arch = "wasm32"))]
fn scripted_input(frame: u32, (width, height): (f32, f32)) -> marble_mixer::sim::TickInput {
    let t = frame as f32 * FRAME_DT;
    let center = marble_mixer::Vector2::new(width / 2.0, height / 2.0);
    let orbit = marble_mixer::Vector2::new(t.cos(), (t * 1.3).sin()) * (width.min(height) * 0.35);

    marble_mixer::sim::TickInput {
        mouse: Some(center + orbit),
        absorb: t < 4.0,
        release: (4.0..7.0).contains(&t),
        spawn: frame % (FPS * 3 / 2) == 0 && frame > 0,
    }
}
