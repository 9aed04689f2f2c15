//! Headless session runner.
//!
//! Loads the bundled config, plays a scripted learner session at 60 FPS, and
//! prints feedback, alerts, and analytics records to stdout.
//!
//! Run with: `cargo run -p pipeworks-data --example headless_runner`

use std::path::Path;

use pipeworks_core::engine::Simulation;
use pipeworks_core::event::{AnalyticsEvent, EventLog};
use pipeworks_core::id::ComponentId;
use pipeworks_data::load_game_config_dir;

const FRAME_MS: u64 = 16;

fn main() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let config = match load_game_config_dir(&dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load config: {e}");
            std::process::exit(1);
        }
    };

    let log = EventLog::new(Box::new(|e: &AnalyticsEvent| println!("  analytics {e}")));
    let mut sim = match Simulation::new(&config.simulation, log) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("failed to start simulation: {e}");
            std::process::exit(1);
        }
    };

    // (frame, clicked component)
    let script = [(120, 3), (400, 1), (700, 1), (900, 6), (1500, 4), (2600, 5)];

    let mut frame = 0u64;
    for (at_frame, id) in script {
        while frame < at_frame {
            let report = sim.tick(FRAME_MS);
            if let Some(alert) = report.alert {
                println!("[frame {frame}] alert ({:?}): {}", alert.band, alert.message);
            }
            frame += 1;
        }

        let Some(outcome) = sim.interact(ComponentId(id)) else {
            println!("[frame {frame}] input locked, click on {id} ignored");
            continue;
        };
        println!(
            "[frame {frame}] click {id}: {:?} \"{}\"",
            outcome.feedback.sound, outcome.feedback.message
        );
        if outcome.won {
            let state = sim.game_state();
            println!("{} Final health: {}%", sim.win_message(), state.health_percent());
        }
    }

    let state = sim.game_state();
    println!(
        "done after {frame} frames: health {}% ({:?}), all pipes repaired: {}",
        state.health_percent(),
        state.band,
        state.all_pipes_repaired
    );
}
